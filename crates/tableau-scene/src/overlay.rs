//! Debug text describing the scene.
//!
//! Only composes strings; drawing them is the host's job.

use crate::interaction::InteractionController;
use crate::object::SceneObjectRef;

/// The two overlay lines: object count and hover detail.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct OverlayText {
    pub object_count: String,
    /// Empty when nothing is hovered.
    pub detail: String,
}

impl OverlayText {
    pub fn compose(controller: &InteractionController) -> Self {
        let object_count = format!("Number of Scene Objects: {}", controller.object_count());

        let detail = match controller.hovered_object() {
            Some(SceneObjectRef::Sprite(s)) => format!(
                "State: {}    FrameCnt: {:.0}    FrameIndex: {}",
                s.state(),
                s.frame_counter(),
                s.animation_frame_index()
            ),
            Some(SceneObjectRef::Circle(c)) => format!("Circle    Color: {}", c.color_index()),
            None => String::new(),
        };

        Self { object_count, detail }
    }

    /// Single-line form, e.g. for a window title.
    pub fn title(&self, prefix: &str) -> String {
        let mut out = String::from(prefix);
        for part in [&self.object_count, &self.detail] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str(" | ");
            }
            out.push_str(part);
        }
        out
    }
}
