use trellis_state::Reducer;

use crate::fragment::Registry;

/// A self-contained feature bundle.
///
/// Modules never reference each other. Everything they contribute goes
/// through the registry, and the bootstrap calls [`register`](Self::register)
/// exactly once per module, in list order.
pub trait FeatureModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn register(&self, registry: &mut Registry);

    /// Extra reducers installed into the store after the built-in ones.
    fn reducers(&self) -> Vec<Box<dyn Reducer>> {
        Vec::new()
    }
}
