//! The three-phase API call wrapper.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use url::Url;

use crate::action::{Action, ApiCall, Phase};
use crate::error::{ApiError, Result, ServerError};
use crate::http::{HttpExecutor, HttpRequest, JSONAPI_MEDIA_TYPE};
use crate::normalize::{Normalized, format_jsonapi_result};

/// Receives actions. Implemented by the state store.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

/// Collects actions, mostly useful in tests.
impl Dispatch for Vec<Action> {
    fn dispatch(&mut self, action: Action) {
        self.push(action);
    }
}

/// Runs [`ApiCall`]s against a backend.
#[derive(Clone)]
pub struct CallApi {
    executor: Arc<dyn HttpExecutor>,
    base_url: Option<Url>,
}

impl CallApi {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            executor,
            base_url: None,
        }
    }

    /// Relative endpoints are resolved against `base_url`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Dispatches REQUEST, performs the fetch, then dispatches exactly one of
    /// SUCCESS or FAILURE. Returns the terminal phase.
    pub async fn call<D>(&self, call: &ApiCall, sink: &mut D) -> Phase
    where
        D: Dispatch + ?Sized,
    {
        sink.dispatch(Action::request(call));

        let span = tracing::info_span!(
            "api_call",
            kind = %call.types.name,
            endpoint = %call.endpoint,
        );

        match self.fetch(call).instrument(span).await {
            Ok(normalized) => {
                tracing::debug!(kind = %call.types.success, "api call succeeded");
                sink.dispatch(Action::success(call, normalized));
                Phase::Success
            }
            Err(error) => {
                tracing::warn!(kind = %call.types.failure, %error, "api call failed");
                sink.dispatch(Action::failure(call, error));
                Phase::Failure
            }
        }
    }

    async fn fetch(&self, call: &ApiCall) -> Result<Normalized> {
        let url = self.resolve(&call.endpoint)?;
        let request = HttpRequest::get(url.as_str())
            .with_method(call.method)
            .with_header("Accept", JSONAPI_MEDIA_TYPE);

        tracing::info!(method = %call.method, %url, "executing api request");

        let response = self
            .executor
            .execute(request)
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let body = match response.data.as_deref() {
            None | Some([]) => Ok(Value::Null),
            Some(bytes) => serde_json::from_slice::<Value>(bytes),
        };

        if !response.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: response.status,
                body: body.ok().filter(|b| !b.is_null()),
            });
        }

        let body = body.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            let errors = errors.iter().map(ServerError::from_value).collect();
            return Err(ApiError::Server { errors });
        }

        Ok(match &call.schema {
            Some(schema) => schema.normalize(&body),
            None => format_jsonapi_result(&body, None),
        })
    }

    /// Relative endpoints always land under the base path, even when they
    /// start with `/`.
    fn resolve(&self, endpoint: &str) -> Result<Url> {
        let invalid = |source: url::ParseError| ApiError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        };

        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base
                    .join(endpoint.trim_start_matches('/'))
                    .map_err(invalid),
                None => Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
            },
            Err(e) => Err(invalid(e)),
        }
    }
}
