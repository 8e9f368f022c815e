use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

pub const FILE_NAME: &str = "trellis.toml";
pub const ENV_PREFIX: &str = "TRELLIS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid url '{url}' for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Start-up settings of the shell.
///
/// Layered as built-in defaults, then an optional TOML file, then
/// `TRELLIS_*` environment variables (`__` separates nested keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Name of the application registered under the `APP` slot.
    pub app: String,
    /// Debug builds may run inside a child frame.
    #[serde(default)]
    pub debug: bool,
    pub api_url: String,
    /// Defaults to `{api_url}/users`.
    #[serde(default)]
    pub users_url: Option<String>,
    /// JSON file holding the `PAYLOAD`/`CURRENT_USER` bootstrap data.
    #[serde(default)]
    pub preload: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app: "hacker_news".to_string(),
            debug: false,
            api_url: "http://localhost:5000/api/".to_string(),
            users_url: None,
            preload: None,
        }
    }
}

impl ShellConfig {
    /// `trellis.toml` in the platform config directory, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "trellis", "trellis").map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Loads from `path` (or `./trellis.toml`, then [`default_path`](Self::default_path))
    /// with overrides from the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_vars(path, None)
    }

    /// Like [`load`](Self::load) but reads overrides from `vars` instead of the
    /// process environment when given.
    pub fn load_with_vars(
        path: Option<&Path>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("app", defaults.app)?
            .set_default("debug", defaults.debug)?
            .set_default("api_url", defaults.api_url)?;

        if let Some(file) = locate(path) {
            tracing::debug!(path = %file.display(), "reading shell config");
            builder = builder.add_source(config::File::from(file).required(path.is_some()));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Base URL for relative endpoints, always ending in `/`.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let mut raw = self.api_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
            field: "api_url",
            url: self.api_url.clone(),
            source,
        })
    }

    pub fn users_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.users_url {
            return Url::parse(url)
                .map(|_| url.trim_end_matches('/').to_string())
                .map_err(|source| ConfigError::InvalidUrl {
                    field: "users_url",
                    url: url.clone(),
                    source,
                });
        }

        let base = self.api_base()?;
        base.join("users")
            .map(String::from)
            .map_err(|source| ConfigError::InvalidUrl {
                field: "users_url",
                url: base.to_string(),
                source,
            })
    }
}

fn locate(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    ShellConfig::default_path().filter(|path| path.exists())
}
