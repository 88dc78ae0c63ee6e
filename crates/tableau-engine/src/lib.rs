//! Tableau engine crate.
//!
//! Platform + GPU runtime underneath the scene layer: window loop, wgpu device,
//! input translation, frame timing and the shared quad pipeline.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
