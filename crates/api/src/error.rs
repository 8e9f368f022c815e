use crate::http::HttpError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Why an API call ended in a FAILURE action.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The endpoint could not be turned into an absolute URL.
    #[error("invalid endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// The response body was not JSON.
    #[error("response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },

    /// The document carried a JSON-API `errors` member.
    #[error("server reported {} error(s): {}", errors.len(), summarize(errors))]
    Server { errors: Vec<ServerError> },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status,
            Self::Server { errors } => errors
                .iter()
                .find_map(|e| e.status.as_deref().and_then(|s| s.parse().ok())),
            _ => None,
        }
    }
}

/// One entry of a JSON-API `errors` array.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ServerError {
    /// Reads an `errors` entry, tolerating numeric members. Entries that are
    /// not objects are kept whole as the detail.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                detail: Some(value.to_string()),
                ..Self::default()
            };
        };
        let member = |name: &str| match object.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        };
        Self {
            status: member("status"),
            code: member("code"),
            title: member("title"),
            detail: member("detail"),
        }
    }

    fn describe(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .or(self.code.as_deref())
            .unwrap_or("unknown error")
    }
}

fn summarize(errors: &[ServerError]) -> String {
    errors
        .iter()
        .map(ServerError::describe)
        .collect::<Vec<_>>()
        .join("; ")
}
