use std::sync::Arc;

use indexmap::IndexMap;

use crate::object::{DictPairs, Object};

/// Fallback values for fields not explicitly bound on a call.
///
/// A bag is shared, not copied: every arity it attaches to, and every record
/// resolved against those arities, holds a reference to the same map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultBag(Arc<IndexMap<String, Object>>);

impl DefaultBag {
    #[must_use]
    pub fn new(values: IndexMap<String, Object>) -> Self {
        Self(Arc::new(values))
    }

    /// Returns an empty bag, used for arities that never received one.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Object> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Object> {
        self.0.iter()
    }

    /// Returns true if both bags are the same shared allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<String>, V: Into<Object>> FromIterator<(K, V)> for DefaultBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Object>, const N: usize> From<[(K, V); N]> for DefaultBag {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<DictPairs> for DefaultBag {
    fn from(pairs: DictPairs) -> Self {
        Self::new(pairs.into())
    }
}

impl serde::Serialize for DefaultBag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for DefaultBag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, Object>::deserialize(deserializer).map(Self::new)
    }
}
