use std::collections::HashSet;

use super::types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    ///
    /// Returns `true` when the event changed the set of held buttons.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f && !self.buttons_down.is_empty() {
                    // On focus loss, clear held buttons so none stay stuck.
                    self.buttons_down.clear();
                    return true;
                }
                false
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                false
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                false
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                }
            }

            // Derived events carry no state of their own.
            InputEvent::Click(_) | InputEvent::DoubleClick(_) => false,
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x: 3.0, y: 4.0 })
    }

    #[test]
    fn press_and_release_change_state_once() {
        let mut state = InputState::default();

        assert!(state.apply_event(&button(MouseButtonState::Pressed)));
        assert!(!state.apply_event(&button(MouseButtonState::Pressed)));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));

        assert!(state.apply_event(&button(MouseButtonState::Released)));
        assert!(!state.button_down(MouseButton::Left));
        assert!(!state.apply_event(&button(MouseButtonState::Released)));
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut state = InputState::default();
        state.apply_event(&button(MouseButtonState::Pressed));
        assert!(state.apply_event(&InputEvent::Focused(false)));
        assert!(state.buttons_down.is_empty());
        assert!(!state.focused);
    }

    #[test]
    fn pointer_leaving_forgets_position() {
        let mut state = InputState::default();
        state.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));
        state.apply_event(&InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
