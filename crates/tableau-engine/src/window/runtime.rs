use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::collections::HashMap;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{GestureConfig, GestureTracker, InputEvent, InputState};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Click / double-click synthesis thresholds.
    pub gestures: GestureConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tableau".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            gestures: GestureConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the last window closes or the app exits.
    ///
    /// Failing to bring up the initial window or its GPU context is returned
    /// as an error.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    gestures: GestureTracker,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    windows: HashMap<WindowId, WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            app,
            windows: HashMap::new(),
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: RuntimeConfig,
    ) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            gestures: GestureTracker::new(config.gestures),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        log::info!("window {id:?} ready");
        self.windows.insert(id, entry);
        Ok(id)
    }

    fn destroy_window_entry(&mut self, id: WindowId) {
        self.windows.remove(&id);
        if self.windows.is_empty() {
            self.request_exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop, self.initial.clone()) {
            log::error!("failed to create initial window: {e:#}");
            self.fatal = Some(e);
            self.request_exit();
            event_loop.exit();
            return;
        }

        for entry in self.windows.values() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Sprites animate continuously; keep redrawing.
        for entry in self.windows.values() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.dispatch_input(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.destroy_window_entry(window_id),
            WindowEvent::Resized(new_size) => self.resize(window_id, Some(*new_size)),
            WindowEvent::ScaleFactorChanged { .. } => self.resize(window_id, None),
            WindowEvent::RedrawRequested => {
                if self.redraw(window_id) == AppControl::Exit {
                    self.request_exit();
                }
            }
            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    /// Hands the raw event to the app, then its translated form plus any
    /// gestures it completes.
    fn dispatch_input(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, windows) = (&mut self.app, &mut self.windows);
        let Some(entry) = windows.get_mut(&window_id) else {
            return AppControl::Continue;
        };

        let mut control = app.on_window_event(window_id, event);

        entry.with_mut(|fields| {
            let Some(ev) = translate_window_event(fields.window, fields.input_state, event) else {
                return;
            };

            let mut pending = vec![ev];
            match ev {
                InputEvent::PointerButton(pb) => {
                    pending.extend(fields.gestures.on_button(&pb, Instant::now()));
                }
                InputEvent::Focused(false) => fields.gestures.reset(),
                _ => {}
            }

            for ev in pending {
                if fields.input_state.apply_event(&ev) {
                    log::trace!("window {window_id:?} held buttons: {:?}", fields.input_state.buttons_down);
                }
                if app.on_input(window_id, &ev) == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }
        });

        control
    }

    /// Reconfigures the surface; `None` re-reads the window's current size.
    fn resize(&mut self, window_id: WindowId, new_size: Option<PhysicalSize<u32>>) {
        let Some(entry) = self.windows.get_mut(&window_id) else {
            return;
        };
        let size = new_size.unwrap_or_else(|| entry.with_window(|w| w.inner_size()));
        log::debug!("window {window_id:?} resized to {}x{}", size.width, size.height);
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        entry.with_window(|w| w.request_redraw());
    }

    /// Drives one frame for a window.
    fn redraw(&mut self, window_id: WindowId) -> AppControl {
        let (app, windows) = (&mut self.app, &mut self.windows);
        let Some(entry) = windows.get_mut(&window_id) else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let time: FrameTime = fields.clock.tick();

            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time,
            };
            app.on_frame(&mut ctx)
        })
    }
}
