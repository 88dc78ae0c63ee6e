//! Core engine-facing contracts.
//!
//! Stable interface between the runtime (platform loop) and higher layers.
//! Runtime internals stay private; user code sees `App` and a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
