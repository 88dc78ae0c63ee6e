//! Time subsystem.
//!
//! One `FrameClock` per window; `tick()` once per presented frame yields the
//! `FrameTime` whose delta drives scene updates.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
