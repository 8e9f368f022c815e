use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use trellis_api::{EntityRef, format_jsonapi_result};
use trellis_state::State;

use crate::error::{BootError, Result};

/// Bootstrap data embedded in the host page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Preload {
    #[serde(rename = "PAYLOAD", default)]
    pub payload: Option<Payload>,
    #[serde(rename = "CURRENT_USER", default)]
    pub current_user: Option<CurrentUser>,
}

/// A JSON-API document and the state key its primary data is stored under.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub data: Value,
}

impl Preload {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BootError::PreloadIo {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&raw)
    }

    /// Initial store state. A user given as a JSON-API resource is flattened
    /// the same way entities are, so views can read `name` directly.
    pub fn into_state(self) -> State {
        let payload = self
            .payload
            .map(|payload| format_jsonapi_result(&payload.data, payload.key.as_deref()));

        let current_user = self
            .current_user
            .map(|user| user.data)
            .filter(|data| !data.is_null())
            .map(flatten_user);

        tracing::debug!(
            payload = payload.is_some(),
            user = current_user.is_some(),
            "seeding state from preload"
        );
        State::from_preload(payload, current_user)
    }
}

fn flatten_user(data: Value) -> Value {
    let Some(reference) = EntityRef::from_value(&data) else {
        return data;
    };
    format_jsonapi_result(&data, None)
        .entity(&reference.kind, &reference.id)
        .cloned()
        .map(Value::Object)
        .unwrap_or(data)
}
