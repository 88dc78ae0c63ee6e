use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::dpi::LogicalSize;
use winit::window::WindowId;

use tableau_engine::core::{App as EngineApp, AppControl, FrameCtx};
use tableau_engine::device::GpuInit;
use tableau_engine::input::{
    ClickEvent, GestureConfig, InputEvent, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
use tableau_engine::paint::Color;
use tableau_engine::render::QuadRenderer;
use tableau_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::config::SceneConfig;
use crate::interaction::{CursorHint, InteractionController};
use crate::overlay::OverlayText;
use crate::render::Renderer;
use crate::sprite::SpriteCatalog;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level builder: configure, then [`run`](Application::run).
///
/// ```rust,ignore
/// Application::new()
///     .title("Tableau")
///     .size(800.0, 600.0)
///     .seed(42)
///     .run()?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    catalog: SpriteCatalog,
    config: SceneConfig,
    gestures: GestureConfig,
    seed: Option<u64>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "tableau".to_string(),
            width: 800.0,
            height: 600.0,
            catalog: SpriteCatalog::builtin(),
            config: SceneConfig::default(),
            gestures: GestureConfig::default(),
            seed: None,
        }
    }

    /// Set the window title. Overlay text is appended to it while running.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the built-in sprite catalog.
    pub fn catalog(mut self, catalog: SpriteCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Click / double-click thresholds.
    pub fn gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    /// Fix the spawn RNG seed. Without one the RNG is seeded from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration against the catalog, then runs the event
    /// loop until the window closes.
    pub fn run(self) -> Result<()> {
        self.config
            .validate(&self.catalog)
            .context("scene configuration does not match the sprite catalog")?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let runtime_config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            gestures: self.gestures,
        };

        log::info!(
            "starting scene: {} sprite types, seed {:?}",
            self.catalog.len(),
            self.seed
        );

        let state = SceneApp::new(self.title, InteractionController::new(self.catalog, self.config, rng));
        Runtime::run(runtime_config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── SceneApp ──────────────────────────────────────────────────────────────

/// Internal state implementing `tableau_engine::core::App`.
///
/// Pointer events go straight to the controller; each frame steps animation,
/// refreshes title and cursor, then draws.
struct SceneApp {
    base_title: String,
    controller: InteractionController,
    renderer: Renderer,
    quads: QuadRenderer,
    background: Color,

    shown_title: String,
    shown_cursor: Option<CursorIcon>,
}

impl SceneApp {
    fn new(base_title: String, controller: InteractionController) -> Self {
        let background = controller.config().background;
        Self {
            shown_title: base_title.clone(),
            base_title,
            controller,
            renderer: Renderer::new(),
            quads: QuadRenderer::new(),
            background,
            shown_cursor: None,
        }
    }
}

fn cursor_icon(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Default => CursorIcon::Default,
        CursorHint::Grab => CursorIcon::Grab,
        CursorHint::Grabbing => CursorIcon::Grabbing,
    }
}

impl EngineApp for SceneApp {
    fn on_input(&mut self, _window_id: WindowId, event: &InputEvent) -> AppControl {
        match *event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.controller.on_pointer_move(x, y);
            }
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
            }) => match state {
                MouseButtonState::Pressed => self.controller.on_pointer_down(x, y),
                MouseButtonState::Released => self.controller.on_pointer_up(x, y),
            },
            InputEvent::Click(ClickEvent { x, y }) => {
                if let Err(e) = self.controller.on_click(x, y) {
                    log::error!("spawn at ({x}, {y}) aborted: {e}");
                }
            }
            InputEvent::DoubleClick(ClickEvent { x, y }) => {
                self.controller.on_double_click(x, y);
            }
            InputEvent::PointerLeft => self.controller.on_pointer_leave(),
            InputEvent::Focused(false) => self.controller.on_pointer_up(0.0, 0.0),
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.controller.update(ctx.time.dt_ms());

        let title = OverlayText::compose(&self.controller).title(&self.base_title);
        if title != self.shown_title {
            ctx.window.set_title(&title);
            self.shown_title = title;
        }

        let cursor = cursor_icon(self.controller.cursor_hint());
        if self.shown_cursor != Some(cursor) {
            ctx.window.set_cursor(cursor);
            self.shown_cursor = Some(cursor);
        }

        let store = self.controller.store();
        let renderer = &self.renderer;
        let quads = &mut self.quads;

        ctx.render(self.background, |rctx, target| {
            let viewport = rctx.viewport;
            if let Some(mut pass) = quads.begin_pass(rctx, target, store.count()) {
                renderer.render(store, viewport, &mut pass);
            }
        })
    }
}
