use crate::value::Value;
use std::{
    collections::{BTreeMap, btree_map},
    ops::Bound,
};

///
/// StorageMap
///
/// Ordered identifier → value map for one account domain.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StorageMap {
    entries: BTreeMap<String, Value>,
}

impl StorageMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Value> {
        self.entries.get(identifier)
    }

    /// Write `value` under `identifier`, returning the previous value.
    pub fn set_value(&mut self, identifier: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(identifier.into(), value)
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Value> {
        self.entries.remove(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First identifier strictly after `cursor`, or the first identifier
    /// when there is no cursor.
    #[must_use]
    pub fn next_key_after(&self, cursor: Option<&str>) -> Option<&str> {
        let lower = cursor.map_or(Bound::Unbounded, Bound::Excluded);

        self.entries
            .range::<str, _>((lower, Bound::Unbounded))
            .next()
            .map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for StorageMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StorageMap {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
