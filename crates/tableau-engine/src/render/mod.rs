//! GPU rendering subsystem.
//!
//! One shared pipeline draws every object as a transformed unit quad.
//! Higher layers talk to it through the [`DrawContext`] capability trait and
//! never touch wgpu directly.
//!
//! Convention:
//! - the unit quad spans `[-0.5, 0.5]` on both axes, centered on the origin
//! - a per-draw model matrix maps it straight to NDC (no viewport uniform)

mod ctx;
mod draw;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use draw::{DrawContext, Fill};
pub use quad::{QuadPass, QuadRenderer};
