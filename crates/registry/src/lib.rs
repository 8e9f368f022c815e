//! Named extension points for Trellis.
//!
//! Feature modules push contributions into named slots while the application
//! loads; layout components pull them back out every time they render. Writes
//! take `&mut self` and reads take `&self`, so once the composition root has
//! moved the registry behind an `Arc` no further registration is possible.

mod contribution;
mod slot;

use std::collections::BTreeMap;

pub use contribution::{Contribution, Named};
pub use slot::Slot;

#[derive(Clone)]
struct Entry<T> {
    name: Option<String>,
    contribution: Contribution<T>,
}

/// Map from slot name to an ordered list of contributions.
#[derive(Clone)]
pub struct ExtensionRegistry<T> {
    slots: BTreeMap<Slot, Vec<Entry<T>>>,
}

impl<T> Default for ExtensionRegistry<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> ExtensionRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contribution to the end of `slot`, creating the slot if needed.
    pub fn add_extension(
        &mut self,
        slot: impl Into<Slot>,
        contribution: impl Into<Contribution<T>>,
    ) {
        self.push(slot.into(), None, contribution.into());
    }

    /// Appends a contribution that consumers can look up by `name`.
    pub fn add_named_extension(
        &mut self,
        slot: impl Into<Slot>,
        name: impl Into<String>,
        contribution: impl Into<Contribution<T>>,
    ) {
        self.push(slot.into(), Some(name.into()), contribution.into());
    }

    /// Inserts a contribution at `index`, clamped to the current length of the slot.
    pub fn insert_extension(
        &mut self,
        slot: impl Into<Slot>,
        index: usize,
        contribution: impl Into<Contribution<T>>,
    ) {
        self.insert(slot.into(), index, None, contribution.into());
    }

    pub fn insert_named_extension(
        &mut self,
        slot: impl Into<Slot>,
        index: usize,
        name: impl Into<String>,
        contribution: impl Into<Contribution<T>>,
    ) {
        self.insert(slot.into(), index, Some(name.into()), contribution.into());
    }

    /// Number of contributions registered under `slot`.
    pub fn len(&self, slot: &str) -> usize {
        self.slots.get(slot).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }

    /// Registered slot names in sorted order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.keys()
    }

    fn push(&mut self, slot: Slot, name: Option<String>, contribution: Contribution<T>) {
        let entries = self.slots.entry(slot.clone()).or_default();
        tracing::debug!(
            slot = %slot,
            position = entries.len(),
            name = name.as_deref(),
            producer = contribution.is_producer(),
            "extension added"
        );
        entries.push(Entry { name, contribution });
    }

    fn insert(
        &mut self,
        slot: Slot,
        index: usize,
        name: Option<String>,
        contribution: Contribution<T>,
    ) {
        let entries = self.slots.entry(slot.clone()).or_default();
        let position = index.min(entries.len());
        tracing::debug!(
            slot = %slot,
            requested = index,
            position,
            name = name.as_deref(),
            "extension inserted"
        );
        entries.insert(position, Entry { name, contribution });
    }
}

impl<T: Clone> ExtensionRegistry<T> {
    /// Resolves every contribution of `slot` in order. Producers are invoked now.
    ///
    /// An unknown slot yields an empty list.
    pub fn get_extensions(&self, slot: &str) -> Vec<T> {
        self.entries(slot)
            .map(|entry| entry.contribution.resolve())
            .collect()
    }

    /// Like [`get_extensions`](Self::get_extensions) but keeps the registration name.
    pub fn get_named_extensions(&self, slot: &str) -> Vec<Named<T>> {
        self.entries(slot)
            .map(|entry| Named {
                name: entry.name.clone(),
                value: entry.contribution.resolve(),
            })
            .collect()
    }

    /// First contribution of `slot` registered under `name`.
    pub fn get_named_extension(&self, slot: &str, name: &str) -> Option<T> {
        self.entries(slot)
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| entry.contribution.resolve())
    }

    fn entries(&self, slot: &str) -> impl Iterator<Item = &Entry<T>> {
        self.slots.get(slot).into_iter().flatten()
    }
}

impl<T> std::fmt::Debug for ExtensionRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(slot, entries)| (slot, entries.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn add_preserves_call_order() {
        let mut registry = ExtensionRegistry::<&str>::new();
        for value in ["a", "b", "c", "d"] {
            registry.add_extension("accountRoutes", value);
        }

        assert_eq!(
            registry.get_extensions("accountRoutes"),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn unknown_slot_is_empty() {
        let registry = ExtensionRegistry::<u32>::new();
        assert!(registry.get_extensions("nothing").is_empty());
        assert!(registry.get_named_extensions("nothing").is_empty());
        assert_eq!(registry.len("nothing"), 0);
    }

    #[test]
    fn insert_places_at_index() {
        let mut registry = ExtensionRegistry::<i32>::new();
        registry.add_extension("tools", 1);
        registry.add_extension("tools", 2);
        registry.add_extension("tools", 3);
        registry.insert_extension("tools", 1, 9);

        assert_eq!(registry.get_extensions("tools"), vec![1, 9, 2, 3]);
    }

    #[test]
    fn insert_clamps_past_the_end() {
        let mut registry = ExtensionRegistry::<i32>::new();
        registry.add_extension("tools", 1);
        registry.insert_extension("tools", 42, 2);
        registry.insert_extension("fresh", 5, 7);

        assert_eq!(registry.get_extensions("tools"), vec![1, 2]);
        assert_eq!(registry.get_extensions("fresh"), vec![7]);
    }

    #[test]
    fn insert_at_zero_prepends() {
        let mut registry = ExtensionRegistry::<&str>::new();
        registry.add_extension("MainNavigationTools", "search");
        registry.insert_extension("MainNavigationTools", 0, "user");

        assert_eq!(
            registry.get_extensions("MainNavigationTools"),
            vec!["user", "search"]
        );
    }

    #[test]
    fn producers_run_on_every_read() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registry = ExtensionRegistry::<String>::new();
        registry.add_extension("userNavigationItems", "static".to_string());
        registry.add_extension(
            "userNavigationItems",
            Contribution::producer(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                format!("produced-{n}")
            }),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            registry.get_extensions("userNavigationItems"),
            vec!["static".to_string(), "produced-0".to_string()]
        );
        assert_eq!(
            registry.get_extensions("userNavigationItems")[1],
            "produced-1"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn named_extensions_keep_names() {
        let mut registry = ExtensionRegistry::<i32>::new();
        registry.add_named_extension("APP", "hacker_news", 1);
        registry.add_extension("APP", 2);
        registry.insert_named_extension("APP", 0, "blog", 3);

        let named = registry.get_named_extensions("APP");
        let names: Vec<_> = named.iter().map(|n| n.name.as_deref()).collect();
        assert_eq!(names, vec![Some("blog"), Some("hacker_news"), None]);
        assert_eq!(registry.get_named_extension("APP", "hacker_news"), Some(1));
        assert_eq!(registry.get_named_extension("APP", "missing"), None);
    }

    #[test]
    fn first_name_wins_on_lookup() {
        let mut registry = ExtensionRegistry::<&str>::new();
        registry.add_named_extension("APP", "dup", "first");
        registry.add_named_extension("APP", "dup", "second");

        assert_eq!(registry.get_named_extension("APP", "dup"), Some("first"));
        assert_eq!(registry.len("APP"), 2);
    }

    #[test]
    fn slots_are_listed_sorted() {
        let mut registry = ExtensionRegistry::<()>::new();
        registry.add_extension("userNavigationItems", ());
        registry.add_extension("accountRoutes", ());

        let slots: Vec<_> = registry.slots().map(Slot::as_str).collect();
        assert_eq!(slots, vec!["accountRoutes", "userNavigationItems"]);
        assert!(!registry.is_empty());
    }
}
