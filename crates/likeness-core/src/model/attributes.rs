use std::collections::BTreeMap;

use super::value::Value;

/// Name to value mapping of an object's introspectable state
///
/// Backed by a `BTreeMap` so iteration is always in lexicographic name order,
/// which is the order every diagnostic is reported in.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: BTreeMap<String, Value>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an attribute, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Attribute names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` on top of this map; entries in `other` win
    pub fn merge(&mut self, other: &AttributeMap) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl From<AttributeMap> for BTreeMap<String, Value> {
    fn from(map: AttributeMap) -> Self {
        map.entries
    }
}

impl From<BTreeMap<String, Value>> for AttributeMap {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

/// Result of asking a value for its attribute mapping
#[derive(Debug, Clone)]
pub enum Attributes {
    Map(AttributeMap),
    /// The value exposes no enumerable attribute mapping
    Unsupported,
}

impl Attributes {
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            Attributes::Map(map) => Some(map),
            Attributes::Unsupported => None,
        }
    }

    pub fn into_map(self) -> Option<AttributeMap> {
        match self {
            Attributes::Map(map) => Some(map),
            Attributes::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Attributes::Map(_))
    }
}
