use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::types::{ClickEvent, InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};

/// Thresholds for click synthesis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureConfig {
    /// Maximum time between two clicks for them to form a double-click.
    pub double_click_interval: Duration,
    /// Maximum pointer travel (logical px) between the two clicks.
    pub double_click_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_click_interval: Duration::from_millis(500),
            double_click_distance: 4.0,
        }
    }
}

/// Synthesizes `Click` / `DoubleClick` from primary button transitions.
///
/// Every primary release that follows a primary press produces a `Click` at the
/// release position, whether or not the pointer moved in between. When a click
/// lands within the configured interval and distance of the previous one, a
/// `DoubleClick` follows it. The pair is then consumed, so a third rapid click
/// starts a new pair rather than producing a second double-click.
#[derive(Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    pressed: bool,
    last_click: Option<(Instant, Vec2)>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, pressed: false, last_click: None }
    }

    /// Feeds a button transition observed at `now`; returns the derived events.
    pub fn on_button(&mut self, ev: &PointerButtonEvent, now: Instant) -> Vec<InputEvent> {
        if ev.button != MouseButton::Left {
            return Vec::new();
        }

        match ev.state {
            MouseButtonState::Pressed => {
                self.pressed = true;
                Vec::new()
            }
            MouseButtonState::Released => {
                if !std::mem::take(&mut self.pressed) {
                    return Vec::new();
                }

                let pos = Vec2::new(ev.x, ev.y);
                let click = ClickEvent { x: ev.x, y: ev.y };
                let mut out = vec![InputEvent::Click(click)];

                let pairs = self.last_click.is_some_and(|(at, prev)| {
                    now.saturating_duration_since(at) <= self.config.double_click_interval
                        && prev.distance(pos) <= self.config.double_click_distance
                });

                if pairs {
                    out.push(InputEvent::DoubleClick(click));
                    self.last_click = None;
                } else {
                    self.last_click = Some((now, pos));
                }

                out
            }
        }
    }

    /// Forgets any pending press and click (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.pressed = false;
        self.last_click = None;
    }
}
