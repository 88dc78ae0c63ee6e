use glam::Vec2;
use tableau_engine::paint::Color;

use crate::error::SceneError;
use crate::sprite::SpriteCatalog;

/// Tunables for the interactive scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Size of every spawned circle, in logical pixels.
    pub circle_size: Vec2,
    /// Spawned circles draw their color index from `0..circle_color_count`.
    pub circle_color_count: u32,
    /// Sprite type ids a spawn picks from, uniformly.
    pub spawn_types: Vec<String>,
    /// Animation state new sprites start in.
    pub initial_state: String,
    pub background: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            circle_size: Vec2::new(50.0, 50.0),
            circle_color_count: 4,
            spawn_types: vec!["red_circle_man".to_string(), "multi_color_block".to_string()],
            initial_state: "FORWARD".to_string(),
            background: Color::from_straight(0.2, 0.85, 0.9, 1.0),
        }
    }
}

impl SceneConfig {
    /// Checks that every spawn type exists and has the initial state.
    ///
    /// Spawning re-checks at click time; this only front-loads the failure.
    pub fn validate(&self, catalog: &SpriteCatalog) -> Result<(), SceneError> {
        for id in &self.spawn_types {
            let ty = catalog
                .get(id)
                .ok_or_else(|| SceneError::UnknownSpriteType(id.clone()))?;
            if ty.animation(&self.initial_state).is_none() {
                return Err(SceneError::UnknownState {
                    sprite_type: id.clone(),
                    state: self.initial_state.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_builtin_catalog() {
        SceneConfig::default()
            .validate(&SpriteCatalog::builtin())
            .expect("defaults are consistent");
    }

    #[test]
    fn unknown_spawn_type_is_rejected() {
        let config = SceneConfig {
            spawn_types: vec!["ghost".to_string()],
            ..SceneConfig::default()
        };
        let err = config.validate(&SpriteCatalog::builtin()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownSpriteType(id) if id == "ghost"));
    }

    #[test]
    fn missing_initial_state_is_rejected() {
        let config = SceneConfig {
            initial_state: "SIDEWAYS".to_string(),
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(&SpriteCatalog::builtin()),
            Err(SceneError::UnknownState { .. })
        ));
    }
}
