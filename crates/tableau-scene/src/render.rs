//! Issues one draw per visible object through a [`DrawContext`].

use tableau_engine::coords::Viewport;
use tableau_engine::render::{DrawContext, Fill};

use crate::object::SceneObjectRef;
use crate::store::SceneStore;
use crate::transform::TransformCalculator;

/// Stateless scene renderer.
///
/// Reads the store, never mutates it. Draw order is the visible-set order,
/// so later objects paint over earlier ones.
#[derive(Debug, Default, Copy, Clone)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draws the visible set; returns the number of draws issued.
    ///
    /// Nothing is drawn for an empty or degenerate viewport.
    pub fn render<D>(&self, store: &SceneStore, viewport: Viewport, ctx: &mut D) -> usize
    where
        D: DrawContext + ?Sized,
    {
        if !viewport.is_valid() || store.is_empty() {
            return 0;
        }

        let transforms = TransformCalculator::new(viewport);
        ctx.use_program();

        let mut drawn = 0;
        for obj in store.visible_set() {
            ctx.bind_quad();
            ctx.upload_transform(&transforms.model(&obj));
            ctx.set_fill(fill_for(&obj));
            ctx.draw_quad();
            drawn += 1;
        }
        drawn
    }
}

pub(crate) fn fill_for(obj: &SceneObjectRef<'_>) -> Fill {
    match obj {
        SceneObjectRef::Sprite(s) => Fill::SpriteFrame {
            tint: s.sprite_type().tint(),
            cell: s.sheet_cell(),
            phase: s.phase(),
        },
        SceneObjectRef::Circle(c) => Fill::GradientDisc { color: c.color() },
    }
}
