use glam::{Vec2, Vec4};
use tableau_engine::paint::Color;

use crate::object::{ObjectId, SceneObject};

/// Fixed palette spawned circles index into.
pub const CIRCLE_PALETTE: [Color; 4] = [
    Color::from_premul(0.90, 0.20, 0.20, 1.0),
    Color::from_premul(0.20, 0.70, 0.30, 1.0),
    Color::from_premul(0.20, 0.35, 0.90, 1.0),
    Color::from_premul(0.95, 0.80, 0.15, 1.0),
];

/// Circle filled with a radial gradient, drawn inside its bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientCircle {
    id: ObjectId,
    position: Vec4,
    size: Vec2,
    color_index: u32,
}

impl GradientCircle {
    pub fn new(id: ObjectId, size: Vec2, color_index: u32) -> Self {
        Self {
            id,
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            size,
            color_index,
        }
    }

    pub fn with_position(mut self, position: Vec4) -> Self {
        self.position = position;
        self
    }

    pub fn color_index(&self) -> u32 {
        self.color_index
    }

    /// Palette color for this circle; indices past the palette wrap around.
    pub fn color(&self) -> Color {
        CIRCLE_PALETTE[self.color_index as usize % CIRCLE_PALETTE.len()]
    }
}

impl SceneObject for GradientCircle {
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
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_wraps_over_palette() {
        let c = GradientCircle::new(ObjectId(0), Vec2::splat(50.0), 5);
        assert_eq!(c.color(), CIRCLE_PALETTE[1]);
    }
}
