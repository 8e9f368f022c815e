use std::borrow::Borrow;
use std::fmt;

/// Name of an extension point. Two slots are the same slot if their names match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(String);

impl Slot {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Slot {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Slot> for Slot {
    fn from(value: &Slot) -> Self {
        value.clone()
    }
}
