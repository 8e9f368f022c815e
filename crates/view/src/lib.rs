//! View composition for Trellis.
//!
//! Views render into a [`Node`] tree. Shell components combine their own
//! props with whatever feature modules registered in the slot they own, and
//! the [`RouteTree`] nests routed views inside the selected application.

pub mod components;
mod context;
mod fragment;
mod module;
mod node;
pub mod prelude;
mod router;
pub mod url;

pub use context::{Component, View, ViewContext};
pub use fragment::{Fragment, Registry, lazy_node, slots};
pub use module::FeatureModule;
pub use node::{Element, Node};
pub use router::{RouteDescriptor, RouteMatch, RouteTree};
