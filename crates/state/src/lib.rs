//! Central application state.
//!
//! The [`Store`] owns a single [`State`] tree and folds every dispatched
//! [`Action`](trellis_api::Action) into it through its reducers, in the order
//! they were installed.

mod reducer;
mod state;
mod store;

pub use reducer::{EntitiesReducer, Reducer, UiReducer, set_current_user, set_flag};
pub use state::{RequestStatus, State};
pub use store::Store;
