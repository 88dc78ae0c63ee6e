use glam::Mat4;

use crate::paint::Color;

/// How the shared quad is filled for the next draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fill {
    /// Disc inscribed in the quad; color ramps from transparent at the center
    /// to `color` at the rim. Fragments outside the disc are discarded.
    GradientDisc { color: Color },

    /// One sprite-sheet cell.
    ///
    /// `cell` is the frame's `(column, row)` in the sheet and `phase` its
    /// position within the running animation, in `[0, 1)`.
    SpriteFrame {
        tint: Color,
        cell: [u32; 2],
        phase: f32,
    },
}

/// Drawing capability set consumed by scene renderers.
///
/// Call order per frame: `use_program` once, then for each object
/// `bind_quad`, `upload_transform`, `set_fill` and `draw_quad`.
/// Implementations keep the last uploaded transform and fill until replaced.
pub trait DrawContext {
    /// Selects the shared quad program.
    fn use_program(&mut self);

    /// Binds the unit-quad vertex and index buffers.
    fn bind_quad(&mut self);

    /// Uploads the model matrix for the next draw.
    fn upload_transform(&mut self, model: &Mat4);

    fn set_fill(&mut self, fill: Fill);

    /// Issues one indexed draw of the bound quad.
    fn draw_quad(&mut self);
}
