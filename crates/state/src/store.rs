use trellis_api::{Action, Dispatch, Entity};

use crate::reducer::{EntitiesReducer, Reducer, UiReducer};
use crate::state::State;

/// Owns the state tree and the reducers that update it.
pub struct Store {
    state: State,
    reducers: Vec<Box<dyn Reducer>>,
    history: Vec<String>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl Store {
    /// Creates a store with the built-in entity and UI reducers installed.
    pub fn new(initial: State) -> Self {
        Self {
            state: initial,
            reducers: vec![Box::new(EntitiesReducer), Box::new(UiReducer)],
            history: Vec::new(),
        }
    }

    /// Installs an extra reducer that runs after the ones already present.
    pub fn with_reducer(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducers.push(Box::new(reducer));
        self
    }

    pub fn add_reducer(&mut self, reducer: Box<dyn Reducer>) {
        self.reducers.push(reducer);
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Kinds of every action dispatched so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn get_entity(&self, kind: &str, id: &str) -> Option<&Entity> {
        self.state.entity(kind, id)
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) {
        tracing::debug!(kind = %action.kind, phase = %action.phase, "dispatch");
        for reducer in &self.reducers {
            reducer.reduce(&mut self.state, &action);
        }
        self.history.push(action.kind);
    }
}
