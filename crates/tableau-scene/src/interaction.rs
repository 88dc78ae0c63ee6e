//! Pointer-driven interaction: hover, drag, spawn and remove.

use glam::{Vec2, Vec4};
use rand::Rng;
use rand::rngs::StdRng;

use crate::circle::GradientCircle;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::object::{ObjectId, ObjectKind, SceneObjectRef};
use crate::picker;
use crate::sprite::{AnimatedSprite, SpriteCatalog};
use crate::store::SceneStore;

/// Controller state. There is no terminal state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// `offset` is object position minus pointer, captured at press time.
    Dragging { target: ObjectId, offset: Vec2 },
}

/// Object under the pointer while idle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HoverTarget {
    Sprite(ObjectId),
    Circle(ObjectId),
}

impl HoverTarget {
    pub fn id(self) -> ObjectId {
        match self {
            HoverTarget::Sprite(id) | HoverTarget::Circle(id) => id,
        }
    }
}

/// What a click did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickOutcome {
    /// Empty space: a new object was created.
    Spawned(ObjectId),
    /// An object was under the pointer; nothing changed.
    Hit(ObjectId),
}

/// Cursor shape matching the controller state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

/// Turns pointer events into scene mutations.
///
/// Owns the store. Catalog, config and RNG are handed in at construction so
/// that spawning is reproducible under a seeded RNG.
pub struct InteractionController {
    store: SceneStore,
    catalog: SpriteCatalog,
    config: SceneConfig,
    rng: StdRng,
    state: InteractionState,
    hover: Option<HoverTarget>,
}

impl InteractionController {
    pub fn new(catalog: SpriteCatalog, config: SceneConfig, rng: StdRng) -> Self {
        Self::with_store(SceneStore::new(), catalog, config, rng)
    }

    pub fn with_store(
        store: SceneStore,
        catalog: SpriteCatalog,
        config: SceneConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            catalog,
            config,
            rng,
            state: InteractionState::Idle,
            hover: None,
        }
    }

    /// Primary button pressed: start dragging whatever is under the pointer.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        let Some(hit) = picker::pick_at(&self.store, x, y) else {
            return;
        };

        let p = hit.position();
        let offset = Vec2::new(p.x - x, p.y - y);
        let target = hit.id();
        log::debug!("drag start on {target}, offset {offset}");
        self.state = InteractionState::Dragging { target, offset };
    }

    /// Pointer moved: drag the target along, or refresh hover when idle.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        match self.state {
            InteractionState::Dragging { target, offset } => {
                if let Some(mut obj) = self.store.get_mut(target) {
                    let p = obj.position();
                    obj.set_position(Vec4::new(x + offset.x, y + offset.y, p.z, p.w));
                }
            }
            InteractionState::Idle => {
                self.hover = picker::pick_at(&self.store, x, y).map(|obj| match obj.kind() {
                    ObjectKind::Sprite => HoverTarget::Sprite(obj.id()),
                    ObjectKind::Circle => HoverTarget::Circle(obj.id()),
                });
            }
        }
    }

    /// Primary button released: any drag ends.
    pub fn on_pointer_up(&mut self, _x: f32, _y: f32) {
        if let InteractionState::Dragging { target, .. } = self.state {
            log::debug!("drag end on {target}");
        }
        self.state = InteractionState::Idle;
    }

    /// Pointer left the window; hover no longer applies.
    pub fn on_pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Click: spawn one object at `(x, y)` on empty space, otherwise report
    /// the hit.
    ///
    /// The kind is a fair coin flip; sprites pick their type uniformly from
    /// the configured spawn list. An empty spawn list always yields circles.
    pub fn on_click(&mut self, x: f32, y: f32) -> Result<ClickOutcome, SceneError> {
        if let Some(id) = picker::pick_id_at(&self.store, x, y) {
            return Ok(ClickOutcome::Hit(id));
        }

        let spawn_sprite = !self.config.spawn_types.is_empty() && self.rng.random_bool(0.5);
        let position = Vec4::new(x, y, 0.0, 1.0);

        let id = if spawn_sprite {
            let pick = self.rng.random_range(0..self.config.spawn_types.len());
            let type_id = &self.config.spawn_types[pick];
            let sprite_type = self
                .catalog
                .get(type_id)
                .ok_or_else(|| SceneError::UnknownSpriteType(type_id.clone()))?;

            let id = self.store.next_id();
            let sprite = AnimatedSprite::new(id, sprite_type, &self.config.initial_state)?;
            self.store.add_sprite(sprite.with_position(position))
        } else {
            let color_index = self.rng.random_range(0..self.config.circle_color_count.max(1));
            let id = self.store.next_id();
            self.store.add_circle(
                GradientCircle::new(id, self.config.circle_size, color_index).with_position(position),
            )
        };

        log::debug!("spawned {id} at ({x}, {y}); {} objects", self.store.count());
        Ok(ClickOutcome::Spawned(id))
    }

    /// Double-click: remove the object under the pointer, if any.
    pub fn on_double_click(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        let id = picker::pick_id_at(&self.store, x, y)?;
        self.store.remove(id)?;

        if self.hover.is_some_and(|h| h.id() == id) {
            self.hover = None;
        }
        if matches!(self.state, InteractionState::Dragging { target, .. } if target == id) {
            self.state = InteractionState::Idle;
        }

        log::debug!("removed {id}; {} objects", self.store.count());
        Some(id)
    }

    /// Frame tick: advance animations.
    pub fn update(&mut self, delta_ms: f32) {
        self.store.update(delta_ms);
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hover(&self) -> Option<HoverTarget> {
        self.hover
    }

    /// Hovered object, if it still exists.
    pub fn hovered_object(&self) -> Option<SceneObjectRef<'_>> {
        self.store.get(self.hover?.id())
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match (self.state, self.hover) {
            (InteractionState::Dragging { .. }, _) => CursorHint::Grabbing,
            (InteractionState::Idle, Some(h)) if self.store.get(h.id()).is_some() => CursorHint::Grab,
            _ => CursorHint::Default,
        }
    }

    pub fn object_count(&self) -> usize {
        self.store.count()
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn controller(config: SceneConfig) -> InteractionController {
        InteractionController::new(SpriteCatalog::builtin(), config, StdRng::seed_from_u64(7))
    }

    fn circle_at(ctl: &mut InteractionController, x: f32, y: f32) -> ObjectId {
        let store = ctl.store_mut();
        let id = store.next_id();
        store.add_circle(
            GradientCircle::new(id, Vec2::new(50.0, 50.0), 0).with_position(Vec4::new(x, y, 3.0, 1.0)),
        )
    }

    #[test]
    fn press_on_object_starts_drag_with_offset() {
        let mut ctl = controller(SceneConfig::default());
        let id = circle_at(&mut ctl, 100.0, 100.0);

        ctl.on_pointer_down(110.0, 120.0);
        assert_eq!(
            ctl.state(),
            InteractionState::Dragging { target: id, offset: Vec2::new(-10.0, -20.0) }
        );
    }

    #[test]
    fn press_on_empty_space_stays_idle() {
        let mut ctl = controller(SceneConfig::default());
        circle_at(&mut ctl, 100.0, 100.0);
        ctl.on_pointer_down(10.0, 10.0);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn drag_moves_target_and_preserves_zw() {
        let mut ctl = controller(SceneConfig::default());
        let id = circle_at(&mut ctl, 100.0, 100.0);

        ctl.on_pointer_down(110.0, 120.0);
        ctl.on_pointer_move(300.0, 50.0);
        assert_eq!(ctl.store().get(id).unwrap().position(), Vec4::new(290.0, 30.0, 3.0, 1.0));

        ctl.on_pointer_up(300.0, 50.0);
        assert_eq!(ctl.state(), InteractionState::Idle);

        // Moves after release leave the object alone.
        ctl.on_pointer_move(0.0, 0.0);
        assert_eq!(ctl.store().get(id).unwrap().position().x, 290.0);
    }

    #[test]
    fn drag_of_removed_target_is_a_noop() {
        let mut ctl = controller(SceneConfig::default());
        let id = circle_at(&mut ctl, 100.0, 100.0);
        let other = circle_at(&mut ctl, 400.0, 400.0);

        ctl.on_pointer_down(110.0, 110.0);
        ctl.store_mut().remove(id);
        ctl.on_pointer_move(410.0, 410.0);

        assert_eq!(ctl.store().get(other).unwrap().position().x, 400.0);
        assert_eq!(ctl.object_count(), 1);
    }

    #[test]
    fn hover_tracks_pointer_only_when_idle() {
        let mut ctl = controller(SceneConfig::default());
        let a = circle_at(&mut ctl, 100.0, 100.0);
        let _b = circle_at(&mut ctl, 300.0, 300.0);

        ctl.on_pointer_move(110.0, 110.0);
        assert_eq!(ctl.hover(), Some(HoverTarget::Circle(a)));
        assert_eq!(ctl.cursor_hint(), CursorHint::Grab);

        ctl.on_pointer_down(110.0, 110.0);
        ctl.on_pointer_move(310.0, 310.0);
        assert_eq!(ctl.hover(), Some(HoverTarget::Circle(a)));
        assert_eq!(ctl.cursor_hint(), CursorHint::Grabbing);

        ctl.on_pointer_up(310.0, 310.0);
        ctl.on_pointer_move(360.0, 360.0);
        assert_eq!(ctl.hover(), None);
        assert_eq!(ctl.cursor_hint(), CursorHint::Default);
    }

    #[test]
    fn hovered_sprite_is_reported_as_sprite() {
        let mut ctl = controller(SceneConfig::default());
        let ty = ctl.catalog().get("red_circle_man").unwrap();
        let store = ctl.store_mut();
        let id = store.next_id();
        store.add_sprite(AnimatedSprite::new(id, ty, "FORWARD").unwrap());

        ctl.on_pointer_move(5.0, 5.0);
        assert_eq!(ctl.hover(), Some(HoverTarget::Sprite(id)));
        assert!(matches!(ctl.hovered_object(), Some(SceneObjectRef::Sprite(_))));

        ctl.on_pointer_leave();
        assert_eq!(ctl.hover(), None);
    }

    #[test]
    fn click_on_object_changes_nothing() {
        let mut ctl = controller(SceneConfig::default());
        let id = circle_at(&mut ctl, 100.0, 100.0);
        assert_eq!(ctl.on_click(120.0, 120.0).unwrap(), ClickOutcome::Hit(id));
        assert_eq!(ctl.object_count(), 1);
    }

    #[test]
    fn click_on_empty_space_spawns_at_pointer() {
        let mut ctl = controller(SceneConfig::default());
        for i in 0..16 {
            let (x, y) = (i as f32 * 100.0, 700.0 + i as f32);
            let ClickOutcome::Spawned(id) = ctl.on_click(x, y).unwrap() else {
                panic!("expected a spawn at ({x}, {y})");
            };
            let p = ctl.store().get(id).unwrap().position();
            assert_eq!((p.x, p.y), (x, y));
            assert_eq!(ctl.object_count(), i + 1);
        }
        // A fair coin over 16 flips lands both ways with this seed.
        assert!(ctl.store().sprite_count() > 0);
        assert!(ctl.store().circle_count() > 0);
    }

    #[test]
    fn spawned_circles_use_configured_size_and_colors() {
        let mut ctl = controller(SceneConfig {
            spawn_types: Vec::new(),
            circle_color_count: 2,
            ..SceneConfig::default()
        });
        for i in 0..8 {
            ctl.on_click(i as f32 * 60.0, 0.0).unwrap();
        }
        assert_eq!(ctl.store().circle_count(), 8);
        for c in ctl.store().circles() {
            assert_eq!(crate::object::SceneObject::size(c), Vec2::new(50.0, 50.0));
            assert!(c.color_index() < 2);
        }
    }

    #[test]
    fn unknown_sprite_type_aborts_spawn() {
        let mut ctl = controller(SceneConfig {
            spawn_types: vec!["ghost".to_string()],
            ..SceneConfig::default()
        });

        let mut spawned = 0;
        let mut failed = false;
        for i in 0..32 {
            match ctl.on_click(i as f32 * 60.0, 0.0) {
                Ok(_) => spawned += 1,
                Err(SceneError::UnknownSpriteType(id)) => {
                    assert_eq!(id, "ghost");
                    failed = true;
                    break;
                }
                Err(other) => panic!("unexpected error {other}"),
            }
        }
        assert!(failed);
        assert_eq!(ctl.object_count(), spawned);
        assert_eq!(ctl.store().sprite_count(), 0);
    }

    #[test]
    fn double_click_removes_hit_only() {
        let mut ctl = controller(SceneConfig::default());
        let id = circle_at(&mut ctl, 100.0, 100.0);
        ctl.on_pointer_move(110.0, 110.0);

        assert_eq!(ctl.on_double_click(10.0, 10.0), None);
        assert_eq!(ctl.object_count(), 1);

        assert_eq!(ctl.on_double_click(110.0, 110.0), Some(id));
        assert_eq!(ctl.object_count(), 0);
        assert_eq!(ctl.hover(), None);
        assert_eq!(ctl.on_double_click(110.0, 110.0), None);
    }
}
