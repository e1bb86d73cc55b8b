use std::ops::Index;

use smallvec::SmallVec;

use crate::object::Object;

/// The positional arguments of one call.
///
/// Most calls carry a handful of arguments, so up to four are stored inline
/// without a heap allocation. The count of stored values is the call arity,
/// `Object::Missing` slots included.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArgValues(SmallVec<[Object; 4]>);

impl ArgValues {
    /// Creates an empty argument list (a zero-arity call).
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Appends one argument.
    pub fn push(&mut self, value: impl Into<Object>) {
        self.0.push(value.into());
    }

    /// Returns the call arity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the argument at `index`, if the call supplied that many.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Object> {
        self.0.get(index)
    }

    /// Returns the argument at `index` unless it is absent or `Missing`.
    #[must_use]
    pub fn get_present(&self, index: usize) -> Option<&Object> {
        self.0.get(index).filter(|value| !value.is_missing())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Object] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.0.iter()
    }

    /// Parses a JSON array into positional arguments.
    ///
    /// Returns `None` if `value` is not an array.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(items) => Some(items.into_iter().map(Object::from).collect()),
            _ => None,
        }
    }
}

impl Index<usize> for ArgValues {
    type Output = Object;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Object>> for ArgValues {
    fn from(values: Vec<Object>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl<T: Into<Object>, const N: usize> From<[T; N]> for ArgValues {
    fn from(values: [T; N]) -> Self {
        values.into_iter().map(Into::into).collect()
    }
}

impl FromIterator<Object> for ArgValues {
    fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ArgValues {
    type Item = Object;
    type IntoIter = smallvec::IntoIter<[Object; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgValues {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
