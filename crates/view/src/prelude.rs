pub use trellis_api::{ActionTypes, ApiCall, Schema};
pub use trellis_registry::Contribution;
pub use trellis_state::State;

pub use crate::components::{MainMenu, MenuStyles, UserMenuWidget, UserModal};
pub use crate::url as make_url;
pub use crate::{
    Component, Element, FeatureModule, Fragment, Node, Registry, RouteDescriptor, View,
    ViewContext, lazy_node, slots,
};
