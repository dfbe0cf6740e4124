//! Variant values exposed by a resolved component.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, attribute-tagged bundle of capabilities a component exposes.
///
/// Equality and hashing are by value: two variants with the same name and
/// the same attribute set are the same variant, wherever they came from.
/// Attributes live in a `BTreeMap` so both derives are stable regardless
/// of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variant {
    /// Display name of the variant (e.g. `runtimeElements`).
    pub name: String,
    /// Attribute key/value pairs describing the variant.
    pub attributes: BTreeMap<String, String>,
}

impl Variant {
    /// Create a variant with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Variant {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute, builder-style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
