//! Tableau scene layer.
//!
//! A live collection of animated sprites and gradient circles with pointer
//! picking, drag-to-move and click-to-spawn interaction, drawn as transformed
//! unit quads through `tableau_engine`'s shared pipeline.
//!
//! Frame flow: pointer events → [`InteractionController`] (reads the store
//! through the [`picker`], mutates it) → `update(delta_ms)` →
//! [`SceneStore::visible_set`] → [`Renderer`].

pub mod app;
pub mod circle;
pub mod config;
pub mod error;
pub mod interaction;
pub mod object;
pub mod overlay;
pub mod picker;
pub mod render;
pub mod sprite;
pub mod store;
pub mod transform;

pub use app::Application;
pub use circle::GradientCircle;
pub use config::SceneConfig;
pub use error::{CatalogError, SceneError};
pub use interaction::{ClickOutcome, CursorHint, HoverTarget, InteractionController, InteractionState};
pub use object::{AnyObject, ObjectId, ObjectKind, SceneObject, SceneObjectMut, SceneObjectRef};
pub use overlay::OverlayText;
pub use render::Renderer;
pub use sprite::{AnimatedSprite, AnimationFrame, SpriteCatalog, SpriteType};
pub use store::SceneStore;
pub use transform::{model_transform, TransformCalculator};
