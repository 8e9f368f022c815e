use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{HttpError, HttpErrorKind, HttpExecutor, HttpRequest, HttpResponse};

/// Serves canned responses keyed by URL and records every request it sees.
///
/// Unknown URLs answer `404` with an empty JSON-API error document.
#[derive(Default)]
pub struct StaticExecutor {
    responses: HashMap<String, Result<HttpResponse, HttpError>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl StaticExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses
            .insert(url.into(), Ok(HttpResponse::json(200, &body)));
        self
    }

    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.responses.insert(url.into(), Ok(response));
        self
    }

    pub fn with_error(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(
            url.into(),
            Err(HttpError::new(HttpErrorKind::Connection, message)),
        );
        self
    }

    /// Requests executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpExecutor for StaticExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self.responses.get(&request.url).cloned();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }

        match response {
            Some(response) => response,
            None => {
                tracing::debug!(url = %request.url, "no fixture registered");
                Ok(HttpResponse::json(404, &serde_json::json!({ "errors": [] })))
            }
        }
    }
}
