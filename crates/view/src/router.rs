//! Route tree assembled from slot-registered route descriptors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::components::AccountView;
use crate::context::View;
use crate::fragment::{Fragment, Registry, slots};

/// A path pattern bound to a view. Segments starting with `:` capture a parameter.
#[derive(Clone)]
pub struct RouteDescriptor {
    pub path: String,
    pub view: Arc<dyn View>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, view: impl View + 'static) -> Self {
        Self::shared(path, Arc::new(view))
    }

    pub fn shared(path: impl Into<String>, view: Arc<dyn View>) -> Self {
        Self {
            path: path.into(),
            view,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        self.children.extend(children);
        self
    }

    fn segments(&self) -> Vec<&str> {
        split(&self.path)
    }

    fn matches(&self, path: &[&str], found: &mut RouteMatch) -> bool {
        let own = self.segments();
        if own.len() > path.len() {
            return false;
        }

        let mut params = Vec::new();
        for (pattern, segment) in own.iter().zip(path) {
            match pattern.strip_prefix(':') {
                Some(name) => params.push((name.to_string(), segment.to_string())),
                None if pattern == segment => {}
                None => return false,
            }
        }

        let rest = &path[own.len()..];
        if !rest.is_empty() && !self.children.iter().any(|c| c.matches(rest, found)) {
            return false;
        }

        found.chain.insert(0, self.view.clone());
        found.params.extend(params);
        true
    }

    fn describe_into(&self, prefix: &str, out: &mut Vec<String>) {
        let full = join(prefix, &self.path);
        out.push(format!("{full} -> {}", self.view.name()));
        for child in &self.children {
            child.describe_into(&full, out);
        }
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path)
            .field("view", &self.view.name())
            .field("children", &self.children)
            .finish()
    }
}

/// Views from the root to the matched leaf, plus captured parameters.
#[derive(Default, Clone)]
pub struct RouteMatch {
    pub chain: Vec<Arc<dyn View>>,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn view_names(&self) -> Vec<&str> {
        self.chain.iter().map(|v| v.name()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct RouteTree {
    root: RouteDescriptor,
}

impl RouteTree {
    pub fn new(root: RouteDescriptor) -> Self {
        Self { root }
    }

    /// Mounts `app` at `/` with `rootRoutes` below it and an `account/`
    /// branch holding `accountRoutes`, each in registration order.
    pub fn from_registry(registry: &Registry, app: Arc<dyn View>) -> Self {
        let account = RouteDescriptor::new("account/", AccountView)
            .with_children(Fragment::routes(registry, slots::ACCOUNT_ROUTES));

        let root = RouteDescriptor::shared("/", app)
            .with_children(Fragment::routes(registry, slots::ROOT_ROUTES))
            .with_children([account]);

        Self::new(root)
    }

    /// Matches `path` against the tree. The first child route that matches
    /// wins; leading and trailing slashes are ignored.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let segments = split(path.split(['?', '#']).next().unwrap_or_default());
        let mut found = RouteMatch::default();
        self.root.matches(&segments, &mut found).then_some(found)
    }

    /// One `path -> view` line per route, depth first.
    pub fn describe(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.root.describe_into("", &mut out);
        out
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn join(prefix: &str, path: &str) -> String {
    let mut full = String::from("/");
    for segment in split(prefix).into_iter().chain(split(path)) {
        full.push_str(segment);
        full.push('/');
    }
    full
}
