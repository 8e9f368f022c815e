use std::fmt;
use std::sync::Arc;

use trellis_registry::{Contribution, ExtensionRegistry};

use crate::context::View;
use crate::node::Node;
use crate::router::RouteDescriptor;

/// Well-known slot names shared between the shell and feature modules.
pub mod slots {
    /// Tools shown on the right of the main menu.
    pub const MAIN_NAVIGATION_TOOLS: &str = "MainNavigationTools";
    /// Extra entries of the main menu list.
    pub const MAIN_MENU_ITEM: &str = "MainMenuItem";
    /// Links in the logged-in user's menu.
    pub const USER_NAVIGATION_ITEMS: &str = "userNavigationItems";
    /// Routes mounted below `account/`.
    pub const ACCOUNT_ROUTES: &str = "accountRoutes";
    /// Routes mounted directly below the application root.
    pub const ROOT_ROUTES: &str = "rootRoutes";
    /// Named application root views.
    pub const APP: &str = "APP";
}

/// Anything a feature module can put into a slot.
#[derive(Clone)]
pub enum Fragment {
    Node(Node),
    Route(RouteDescriptor),
    App(Arc<dyn View>),
}

pub type Registry = ExtensionRegistry<Fragment>;

impl Fragment {
    pub fn app(view: impl View + 'static) -> Self {
        Self::App(Arc::new(view))
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_route(self) -> Option<RouteDescriptor> {
        match self {
            Self::Route(route) => Some(route),
            _ => None,
        }
    }

    pub fn into_app(self) -> Option<Arc<dyn View>> {
        match self {
            Self::App(app) => Some(app),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Route(_) => "route",
            Self::App(_) => "app",
        }
    }

    /// Nodes registered in `slot`. Other fragment kinds are skipped.
    pub fn nodes(registry: &Registry, slot: &str) -> Vec<Node> {
        collect(registry, slot, Fragment::into_node)
    }

    /// Routes registered in `slot`. Other fragment kinds are skipped.
    pub fn routes(registry: &Registry, slot: &str) -> Vec<RouteDescriptor> {
        collect(registry, slot, Fragment::into_route)
    }
}

fn collect<T>(registry: &Registry, slot: &str, pick: fn(Fragment) -> Option<T>) -> Vec<T> {
    registry
        .get_extensions(slot)
        .into_iter()
        .filter_map(|fragment| {
            let kind = fragment.kind();
            let picked = pick(fragment);
            if picked.is_none() {
                tracing::warn!(slot, kind, "skipping fragment of unexpected kind");
            }
            picked
        })
        .collect()
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Route(route) => f.debug_tuple("Route").field(route).finish(),
            Self::App(app) => f.debug_tuple("App").field(&app.name()).finish(),
        }
    }
}

impl From<Node> for Fragment {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<RouteDescriptor> for Fragment {
    fn from(value: RouteDescriptor) -> Self {
        Self::Route(value)
    }
}

impl From<Node> for Contribution<Fragment> {
    fn from(value: Node) -> Self {
        Contribution::Value(Fragment::Node(value))
    }
}

impl From<RouteDescriptor> for Contribution<Fragment> {
    fn from(value: RouteDescriptor) -> Self {
        Contribution::Value(Fragment::Route(value))
    }
}

/// A node built fresh on every read of the slot.
pub fn lazy_node(build: impl Fn() -> Node + Send + Sync + 'static) -> Contribution<Fragment> {
    Contribution::producer(move || Fragment::Node(build()))
}
