//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s and feeds primary
//! button transitions through a `GestureTracker`, which synthesizes click and
//! double-click events.

mod gesture;
pub(crate) mod platform;
mod state;
mod types;

pub use gesture::{GestureConfig, GestureTracker};
pub use state::InputState;
pub use types::{
    ClickEvent,
    InputEvent,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};
