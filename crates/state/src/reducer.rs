use serde_json::{Value, json};
use trellis_api::{Action, ActionPayload, Phase};

use crate::state::{RequestStatus, State};

pub const SET_FLAG: &str = "SET_FLAG";
pub const SET_CURRENT_USER: &str = "SET_CURRENT_USER";

/// Folds an action into the state tree.
pub trait Reducer: Send + Sync {
    fn reduce(&self, state: &mut State, action: &Action);
}

impl<F> Reducer for F
where
    F: Fn(&mut State, &Action) + Send + Sync,
{
    fn reduce(&self, state: &mut State, action: &Action) {
        self(state, action)
    }
}

/// Tracks request status and merges normalized responses.
#[derive(Debug, Default)]
pub struct EntitiesReducer;

impl Reducer for EntitiesReducer {
    fn reduce(&self, state: &mut State, action: &Action) {
        let status = match (&action.phase, &action.payload) {
            (Phase::Request, _) => RequestStatus::Pending,
            (Phase::Success, ActionPayload::Normalized(normalized)) => {
                state.merge(normalized.clone());
                RequestStatus::Loaded
            }
            (Phase::Success, _) => RequestStatus::Loaded,
            (Phase::Failure, ActionPayload::Error(error)) => {
                RequestStatus::Failed(error.to_string())
            }
            (Phase::Failure, _) => RequestStatus::Failed("unknown error".to_string()),
            (Phase::Plain, _) => return,
        };
        state.requests.insert(action.name.clone(), status);
    }
}

/// Handles the plain UI actions built by [`set_flag`] and [`set_current_user`].
#[derive(Debug, Default)]
pub struct UiReducer;

impl Reducer for UiReducer {
    fn reduce(&self, state: &mut State, action: &Action) {
        if action.phase != Phase::Plain {
            return;
        }
        let ActionPayload::Value(value) = &action.payload else {
            return;
        };

        match action.kind.as_str() {
            SET_FLAG => {
                if let Some(name) = value.get("name").and_then(Value::as_str) {
                    let flag = value.get("value").cloned().unwrap_or(Value::Bool(true));
                    state.flags.insert(name.to_string(), flag);
                }
            }
            SET_CURRENT_USER => {
                state.current_user = Some(value.clone()).filter(|user| !user.is_null());
            }
            _ => {}
        }
    }
}

pub fn set_flag(name: &str, value: impl Into<Value>) -> Action {
    Action::plain(SET_FLAG).with_value(json!({ "name": name, "value": value.into() }))
}

/// `Value::Null` logs the user out.
pub fn set_current_user(user: Value) -> Action {
    Action::plain(SET_CURRENT_USER).with_value(user)
}
