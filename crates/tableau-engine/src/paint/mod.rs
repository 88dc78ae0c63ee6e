//! Color model shared between the scene layer and the quad pipeline.
//!
//! Colors are linear premultiplied alpha; the pipeline blends with
//! `One, OneMinusSrcAlpha`.

pub mod color;

pub use color::Color;
