use std::collections::BTreeMap;

use trellis_api::ApiCall;
use trellis_state::State;

use crate::fragment::{Fragment, Registry};
use crate::node::Node;

/// Everything a view may read while rendering.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub registry: &'a Registry,
    pub state: &'a State,
    pub params: &'a BTreeMap<String, String>,
    pub path: &'a str,
}

impl<'a> ViewContext<'a> {
    pub fn new(
        registry: &'a Registry,
        state: &'a State,
        params: &'a BTreeMap<String, String>,
        path: &'a str,
    ) -> Self {
        Self {
            registry,
            state,
            params,
            path,
        }
    }

    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).map(String::as_str)
    }

    /// Resolved nodes of `slot`.
    pub fn slot(&self, slot: &str) -> Vec<Node> {
        Fragment::nodes(self.registry, slot)
    }
}

/// A routed view. `outlet` holds the already rendered child route, if any.
pub trait View: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, cx: &ViewContext<'_>, outlet: Node) -> Node;

    /// Calls to dispatch before this view is rendered.
    fn requires(&self, _cx: &ViewContext<'_>) -> Vec<ApiCall> {
        Vec::new()
    }
}

/// A building block rendered inside views.
pub trait Component {
    fn render(&self, cx: &ViewContext<'_>) -> Node;
}
