//! Scene-layer errors.

use std::path::PathBuf;

/// Errors raised by scene operations.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A spawn named a sprite type the catalog does not know.
    #[error("unknown sprite type: {0}")]
    UnknownSpriteType(String),

    /// A sprite type has no animation with the requested state name.
    #[error("sprite type {sprite_type} has no animation state {state}")]
    UnknownState { sprite_type: String, state: String },
}

/// Errors raised while loading a sprite catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sprite type {0} is declared twice")]
    Duplicate(String),

    /// Geometry or timing that cannot produce a drawable frame.
    #[error("sprite type {sprite_type}: {reason}")]
    Invalid { sprite_type: String, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid(sprite_type: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            sprite_type: sprite_type.to_string(),
            reason: reason.into(),
        }
    }
}
