//! Bootstrap and composition root for Trellis applications.
//!
//! [`Shell::boot`] runs the start-up sequence in a fixed order: refuse to run
//! inside a foreign frame, register every feature module, freeze the registry,
//! pick the configured application and seed the store from the preload
//! payload. After that the registry is read-only.

mod config;
mod environment;
mod error;
mod modules;
mod preload;
mod shell;

pub use crate::config::{ConfigError, ShellConfig};
pub use crate::environment::{Environment, guard_embedding};
pub use crate::error::{BootError, Result};
pub use crate::modules::ModuleList;
pub use crate::preload::{CurrentUser, Payload, Preload};
pub use crate::shell::Shell;
