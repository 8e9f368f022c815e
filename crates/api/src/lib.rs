//! Data layer for Trellis.
//!
//! Talks to a JSON-API backend: [`normalize`] flattens response documents into
//! per-type entity maps, and [`dispatch`] turns an [`ApiCall`] into the
//! request/success/failure action sequence consumed by the state store.

pub mod action;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod normalize;

pub use action::{Action, ActionPayload, ActionTypes, ApiCall, Phase};
pub use dispatch::{CallApi, Dispatch};
pub use error::{ApiError, Result};
pub use normalize::{
    Entity, EntityRef, EntityStore, Normalized, ResultRef, Schema, format_jsonapi_result,
};
