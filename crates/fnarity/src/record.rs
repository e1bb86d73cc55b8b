//! The named-field record handed to a dispatcher's handler.
//!
//! A record is two layers: the explicitly bound fields of one call, and the
//! default bag of the arity that call resolved to. Lookups consult the explicit
//! layer first, so a bound field shadows its default while an unbound field
//! still reads as the default.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeMap;

use crate::{
    defaults::DefaultBag,
    object::{DictPairs, Object},
};

/// The per-call output of resolution.
///
/// Equality, iteration and serialization all see the union of both layers,
/// with explicit values taking precedence. Records are created fresh for each
/// call and never written back into the dispatch table.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRecord {
    /// Fields bound from positional arguments, in binding order.
    explicit: IndexMap<String, Object>,
    /// Fallback layer shared with the dispatch table.
    defaults: DefaultBag,
}

impl ResolvedRecord {
    /// Creates an empty record whose unbound fields fall back to `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: DefaultBag) -> Self {
        Self {
            explicit: IndexMap::new(),
            defaults,
        }
    }

    /// Binds `field` explicitly, shadowing any default.
    ///
    /// Binding a field twice keeps the later value.
    pub fn bind(&mut self, field: impl Into<String>, value: Object) {
        self.explicit.insert(field.into(), value);
    }

    /// Reads a field, falling back to the default bag.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Object> {
        self.explicit.get(field).or_else(|| self.defaults.get(field))
    }

    /// Returns true if the field is readable through either layer.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.explicit.contains_key(field) || self.defaults.contains(field)
    }

    /// Reads only the explicit layer.
    #[must_use]
    pub fn own(&self, field: &str) -> Option<&Object> {
        self.explicit.get(field)
    }

    /// Returns true if the field was explicitly bound on this call.
    #[must_use]
    pub fn is_explicit(&self, field: &str) -> bool {
        self.explicit.contains_key(field)
    }

    /// Iterates explicitly bound fields in binding order.
    pub fn explicit_fields(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.explicit.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the fallback layer.
    #[must_use]
    pub fn defaults(&self) -> &DefaultBag {
        &self.defaults
    }

    /// Iterates every readable field: explicit fields first, then defaults not shadowed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        let inherited = self
            .defaults
            .iter()
            .filter(|(k, _)| !self.explicit.contains_key(k.as_str()));
        self.explicit
            .iter()
            .chain(inherited)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Number of readable fields across both layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.defaults.is_empty()
    }

    /// Collapses both layers into one owned map.
    #[must_use]
    pub fn flatten(&self) -> IndexMap<String, Object> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }

    /// Collapses both layers into an `Object::Dict`.
    #[must_use]
    pub fn to_object(&self) -> Object {
        Object::Dict(self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect::<DictPairs>())
    }

    /// Collapses both layers into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.iter().map(|(k, v)| (k.to_owned(), v.to_json())).collect())
    }
}

/// Records compare by their readable fields, ignoring which layer supplied them.
impl PartialEq for ResolvedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_object().repr_fmt(f)
    }
}

impl serde::Serialize for ResolvedRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
