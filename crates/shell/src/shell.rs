use std::sync::Arc;

use trellis_api::http::HttpExecutor;
use trellis_api::{Action, ApiCall, CallApi, Dispatch, Phase};
use trellis_state::{State, Store};
use trellis_view::{Fragment, Node, Registry, RouteMatch, RouteTree, ViewContext, slots};

use crate::config::ShellConfig;
use crate::environment::{Environment, guard_embedding};
use crate::error::{BootError, Result};
use crate::modules::ModuleList;
use crate::preload::Preload;

/// A booted application: frozen registry, route tree and store.
pub struct Shell {
    config: ShellConfig,
    registry: Arc<Registry>,
    routes: RouteTree,
    store: Store,
    api: CallApi,
}

impl Shell {
    /// Starts the application.
    ///
    /// The embedding guard runs before any module registers, so a rejected
    /// start leaves nothing mounted.
    pub fn boot(
        config: ShellConfig,
        env: &Environment,
        modules: &ModuleList,
        executor: Arc<dyn HttpExecutor>,
        preload: Preload,
    ) -> Result<Self> {
        guard_embedding(env)?;

        let mut registry = Registry::new();
        modules.register_all(&mut registry);
        let registry = Arc::new(registry);

        let app = registry
            .get_named_extension(slots::APP, &config.app)
            .and_then(Fragment::into_app)
            .ok_or_else(|| BootError::UnknownApplication {
                name: config.app.clone(),
                available: registry
                    .get_named_extensions(slots::APP)
                    .into_iter()
                    .filter_map(|named| named.name)
                    .collect(),
            })?;

        let routes = RouteTree::from_registry(&registry, app);

        let mut store = Store::new(preload.into_state());
        for reducer in modules.reducers() {
            store.add_reducer(reducer);
        }

        let api = CallApi::new(executor).with_base_url(config.api_base()?);

        tracing::info!(
            app = %config.app,
            modules = ?modules.names(),
            "application booted"
        );

        Ok(Self {
            config,
            registry,
            routes,
            store,
            api,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn routes(&self) -> &RouteTree {
        &self.routes
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api(&self) -> &CallApi {
        &self.api
    }

    pub fn state(&self) -> &State {
        self.store.state()
    }

    /// Runs `call` through the dispatch wrapper into the store.
    pub async fn call(&mut self, call: &ApiCall) -> Phase {
        self.api.call(call, &mut self.store).await
    }

    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Resolves `path`, loads the data its views ask for and renders the
    /// nested view chain.
    pub async fn navigate(&mut self, path: &str) -> Result<Node> {
        let found = self.routes.resolve(path).ok_or_else(|| BootError::NotFound {
            path: path.to_string(),
        })?;
        tracing::debug!(path, views = ?found.view_names(), "route resolved");

        let calls: Vec<ApiCall> = {
            let cx = ViewContext::new(&self.registry, self.store.state(), &found.params, path);
            found.chain.iter().flat_map(|view| view.requires(&cx)).collect()
        };
        for call in &calls {
            self.api.call(call, &mut self.store).await;
        }

        Ok(self.render_match(&found, path))
    }

    /// Renders an already resolved route against the current state.
    pub fn render_match(&self, found: &RouteMatch, path: &str) -> Node {
        let cx = ViewContext::new(&self.registry, self.store.state(), &found.params, path);
        found
            .chain
            .iter()
            .rev()
            .fold(Node::Empty, |outlet, view| view.render(&cx, outlet))
    }

    pub async fn render(&mut self, path: &str) -> Result<String> {
        Ok(self.navigate(path).await?.render_html())
    }
}
