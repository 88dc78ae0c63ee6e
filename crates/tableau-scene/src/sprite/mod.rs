//! Animated sprites and the catalog of sprite types they are built from.

mod catalog;

pub use catalog::{AnimationFrame, SpriteCatalog, SpriteType};

use std::rc::Rc;

use glam::{Vec2, Vec4};
use tableau_engine::coords::Rect;

use crate::error::SceneError;
use crate::object::{ObjectId, SceneObject};

/// A sprite playing one of its type's named animations.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    id: ObjectId,
    sprite_type: Rc<SpriteType>,
    position: Vec4,
    state: String,
    /// Position within the current animation.
    frame: usize,
    /// Milliseconds spent on the current frame.
    frame_counter: f32,
}

impl AnimatedSprite {
    /// Creates a sprite playing `state` from its first frame.
    pub fn new(id: ObjectId, sprite_type: Rc<SpriteType>, state: &str) -> Result<Self, SceneError> {
        check_state(&sprite_type, state)?;
        Ok(Self {
            id,
            sprite_type,
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            state: state.to_string(),
            frame: 0,
            frame_counter: 0.0,
        })
    }

    pub fn with_position(mut self, position: Vec4) -> Self {
        self.position = position;
        self
    }

    pub fn sprite_type(&self) -> &SpriteType {
        &self.sprite_type
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Switches animation and restarts it.
    pub fn set_state(&mut self, state: &str) -> Result<(), SceneError> {
        check_state(&self.sprite_type, state)?;
        self.state = state.to_string();
        self.frame = 0;
        self.frame_counter = 0.0;
        Ok(())
    }

    pub fn frame_counter(&self) -> f32 {
        self.frame_counter
    }

    /// Sheet index of the frame currently shown.
    pub fn animation_frame_index(&self) -> u32 {
        self.frames().get(self.frame).map_or(0, |f| f.index)
    }

    /// Progress through the current animation, in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        let len = self.frames().len().max(1);
        self.frame as f32 / len as f32
    }

    pub fn sheet_cell(&self) -> [u32; 2] {
        self.sprite_type.cell(self.animation_frame_index())
    }

    /// Pixel rectangle of the current frame within the sheet.
    pub fn frame_rect(&self) -> Rect {
        self.sprite_type.frame_rect(self.animation_frame_index())
    }

    /// Advances the animation by `delta_ms`, wrapping at the end.
    pub fn update(&mut self, delta_ms: f32) {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return;
        }
        let frames = match self.sprite_type.animation(&self.state) {
            Some(frames) if !frames.is_empty() => frames,
            _ => return,
        };

        self.frame_counter += delta_ms;

        // Skip whole loops so a long stall does not walk every frame.
        let cycle: f32 = frames.iter().map(|f| f.duration_ms).sum();
        if self.frame_counter >= cycle {
            self.frame_counter %= cycle;
        }

        while self.frame_counter >= frames[self.frame].duration_ms {
            self.frame_counter -= frames[self.frame].duration_ms;
            self.frame = (self.frame + 1) % frames.len();
        }
    }

    fn frames(&self) -> &[AnimationFrame] {
        self.sprite_type.animation(&self.state).unwrap_or(&[])
    }
}

fn check_state(sprite_type: &SpriteType, state: &str) -> Result<(), SceneError> {
    match sprite_type.animation(state) {
        Some(_) => Ok(()),
        None => Err(SceneError::UnknownState {
            sprite_type: sprite_type.id().to_string(),
            state: state.to_string(),
        }),
    }
}

impl SceneObject for AnimatedSprite {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn position(&self) -> Vec4 {
        self.position
    }

    fn set_position(&mut self, position: Vec4) {
        self.position = position;
    }

    fn size(&self) -> Vec2 {
        self.sprite_type.size()
    }
}
