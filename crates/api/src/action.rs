//! Declarative API calls and the actions they produce.

use std::fmt;

use crate::error::ApiError;
use crate::http::Method;
use crate::normalize::{Normalized, Schema};

/// The three action kinds an [`ApiCall`] emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypes {
    pub name: String,
    pub request: String,
    pub success: String,
    pub failure: String,
}

impl ActionTypes {
    /// `ActionTypes::prefixed("USER_LIKES")` → `USER_LIKES_REQUEST`, `_SUCCESS`, `_FAILURE`.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        let name = prefix.into();
        Self {
            request: format!("{name}_REQUEST"),
            success: format!("{name}_SUCCESS"),
            failure: format!("{name}_FAILURE"),
            name,
        }
    }

    pub fn new(
        request: impl Into<String>,
        success: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        let request = request.into();
        let name = request
            .strip_suffix("_REQUEST")
            .unwrap_or(&request)
            .to_string();
        Self {
            name,
            request,
            success: success.into(),
            failure: failure.into(),
        }
    }

    pub fn kind(&self, phase: Phase) -> &str {
        match phase {
            Phase::Request => &self.request,
            Phase::Success => &self.success,
            Phase::Failure => &self.failure,
            Phase::Plain => &self.name,
        }
    }
}

/// Description of one backend round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub types: ActionTypes,
    pub endpoint: String,
    pub method: Method,
    pub schema: Option<Schema>,
}

impl ApiCall {
    pub fn new(types: ActionTypes, endpoint: impl Into<String>) -> Self {
        Self {
            types,
            endpoint: endpoint.into(),
            method: Method::Get,
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Request,
    Success,
    Failure,
    /// Not tied to a network call.
    Plain,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Request => write!(f, "request"),
            Phase::Success => write!(f, "success"),
            Phase::Failure => write!(f, "failure"),
            Phase::Plain => write!(f, "plain"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ActionPayload {
    None,
    Normalized(Normalized),
    Error(ApiError),
    Value(serde_json::Value),
}

/// An event delivered to the store.
#[derive(Debug, Clone)]
pub struct Action {
    pub kind: String,
    /// Shared name of the request/success/failure triple, or `kind` for plain actions.
    pub name: String,
    pub phase: Phase,
    pub endpoint: Option<String>,
    pub payload: ActionPayload,
}

impl Action {
    pub fn plain(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            name: kind.clone(),
            kind,
            phase: Phase::Plain,
            endpoint: None,
            payload: ActionPayload::None,
        }
    }

    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.payload = ActionPayload::Value(value);
        self
    }

    pub fn request(call: &ApiCall) -> Self {
        Self::for_call(call, Phase::Request, ActionPayload::None)
    }

    pub fn success(call: &ApiCall, normalized: Normalized) -> Self {
        Self::for_call(call, Phase::Success, ActionPayload::Normalized(normalized))
    }

    pub fn failure(call: &ApiCall, error: ApiError) -> Self {
        Self::for_call(call, Phase::Failure, ActionPayload::Error(error))
    }

    fn for_call(call: &ApiCall, phase: Phase, payload: ActionPayload) -> Self {
        Self {
            kind: call.types.kind(phase).to_string(),
            name: call.types.name.clone(),
            phase,
            endpoint: Some(call.endpoint.clone()),
            payload,
        }
    }

    pub fn normalized(&self) -> Option<&Normalized> {
        match &self.payload {
            ActionPayload::Normalized(normalized) => Some(normalized),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.payload {
            ActionPayload::Error(error) => Some(error),
            _ => None,
        }
    }
}
