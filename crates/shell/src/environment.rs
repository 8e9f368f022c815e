use crate::error::{BootError, Result};

/// Facts about the page the application is started in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    pub debug: bool,
    /// The application window is not its own top-level parent.
    pub framed: bool,
}

impl Environment {
    pub fn top_level(debug: bool) -> Self {
        Self {
            debug,
            framed: false,
        }
    }

    /// Compares the application window with its parent.
    pub fn from_frames<W: PartialEq>(debug: bool, window: &W, parent: &W) -> Self {
        Self {
            debug,
            framed: window != parent,
        }
    }
}

/// Fails when a non-debug build is loaded inside another page's frame.
///
/// The error asks the caller to reload the parent page so the application
/// can be opened at top level instead.
pub fn guard_embedding(env: &Environment) -> Result<()> {
    if env.framed && !env.debug {
        tracing::error!("refusing to start inside a child frame");
        return Err(BootError::FrameEmbedding {
            reload_parent: true,
        });
    }
    Ok(())
}
