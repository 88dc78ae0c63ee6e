//! Platform event translation.

mod winit_events;

pub(crate) use winit_events::translate_window_event;
