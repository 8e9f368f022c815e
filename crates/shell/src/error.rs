use std::path::PathBuf;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, BootError>;

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    /// Production builds refuse to run inside a child frame.
    #[error("iFrame inclusion not allowed")]
    FrameEmbedding { reload_parent: bool },

    #[error("no application named '{name}' is registered (available: {})", available.join(", "))]
    UnknownApplication { name: String, available: Vec<String> },

    #[error("no route matches '{path}'")]
    NotFound { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read preload file '{path}': {source}")]
    PreloadIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preload payload: {0}")]
    Preload(#[from] serde_json::Error),
}
