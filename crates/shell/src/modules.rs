use trellis_state::Reducer;
use trellis_view::{FeatureModule, Registry};

/// Feature modules in the order they register.
#[derive(Default)]
pub struct ModuleList {
    modules: Vec<Box<dyn FeatureModule>>,
}

impl ModuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, module: impl FeatureModule + 'static) -> Self {
        self.push(Box::new(module));
        self
    }

    pub fn push(&mut self, module: Box<dyn FeatureModule>) {
        self.modules.push(module);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Runs every module's registration exactly once, in list order.
    pub fn register_all(&self, registry: &mut Registry) {
        for module in &self.modules {
            tracing::info!(module = module.name(), "registering feature module");
            module.register(registry);
        }
    }

    pub fn reducers(&self) -> Vec<Box<dyn Reducer>> {
        self.modules.iter().flat_map(|m| m.reducers()).collect()
    }
}

impl std::fmt::Debug for ModuleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
