use std::fmt;
use std::sync::Arc;

/// A value registered against a slot.
///
/// Producers are called every time the slot is read, so they can build a
/// fresh fragment per render.
pub enum Contribution<T> {
    Value(T),
    Producer(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T> Contribution<T> {
    pub fn producer(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::Producer(Arc::new(f))
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }
}

impl<T: Clone> Contribution<T> {
    pub fn resolve(&self) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Producer(produce) => produce(),
        }
    }
}

impl<T: Clone> Clone for Contribution<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Producer(produce) => Self::Producer(produce.clone()),
        }
    }
}

impl<T> From<T> for Contribution<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Contribution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// A resolved contribution together with the name it was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named<T> {
    pub name: Option<String>,
    pub value: T,
}
