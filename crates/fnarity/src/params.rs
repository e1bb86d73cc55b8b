use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    options::VariadicScan,
};

/// The ordered parameter names declared for one arity.
///
/// The arity of the list is its length. A name ending in the variadic marker
/// (`...` by default) flags the variadic slot, but only when the list ends up
/// being the maximum-arity declaration; anywhere else the marker is part of an
/// ordinary field name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParameterList(SmallVec<[String; 4]>);

impl ParameterList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Number of positional parameters in the list.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Finds the variadic slot, returning its position and the stripped field name.
    ///
    /// An empty `marker` disables detection.
    ///
    /// # Errors
    /// Returns a configuration error if more than one parameter carries the
    /// marker (only possible with [`VariadicScan::Anywhere`]) or if stripping
    /// the marker leaves an empty name.
    pub(crate) fn variadic_slot(&self, marker: &str, scan: VariadicScan) -> Result<Option<(usize, String)>> {
        if marker.is_empty() || self.0.is_empty() {
            return Ok(None);
        }
        let candidates = match scan {
            VariadicScan::TrailingOnly => self.0.len() - 1..self.0.len(),
            VariadicScan::Anywhere => 0..self.0.len(),
        };

        let mut found: Option<(usize, String)> = None;
        for position in candidates {
            let Some(stripped) = self.0[position].strip_suffix(marker) else {
                continue;
            };
            if let Some((first, _)) = &found {
                return Err(Error::duplicate_variadic(self.arity(), *first, position));
            }
            if stripped.is_empty() {
                return Err(Error::empty_variadic_name(self.arity(), position));
            }
            found = Some((position, stripped.to_owned()));
        }
        Ok(found)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ParameterList {
    fn from(names: [S; N]) -> Self {
        Self::new(names)
    }
}

impl<S: Into<String>> From<Vec<S>> for ParameterList {
    fn from(names: Vec<S>) -> Self {
        Self::new(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_marker_is_stripped() {
        let list = ParameterList::from(["a", "b", "c..."]);
        let slot = list.variadic_slot("...", VariadicScan::TrailingOnly).unwrap();
        assert_eq!(slot, Some((2, "c".to_owned())));
    }

    #[test]
    fn inner_marker_ignored_when_trailing_only() {
        let list = ParameterList::from(["a...", "b"]);
        let slot = list.variadic_slot("...", VariadicScan::TrailingOnly).unwrap();
        assert_eq!(slot, None);
    }

    #[test]
    fn inner_marker_found_when_scanning_anywhere() {
        let list = ParameterList::from(["a", "rest...", "z"]);
        let slot = list.variadic_slot("...", VariadicScan::Anywhere).unwrap();
        assert_eq!(slot, Some((1, "rest".to_owned())));
    }

    #[test]
    fn two_markers_rejected() {
        let list = ParameterList::from(["a...", "b..."]);
        let err = list.variadic_slot("...", VariadicScan::Anywhere).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn bare_marker_rejected() {
        let list = ParameterList::from(["a", "..."]);
        let err = list.variadic_slot("...", VariadicScan::TrailingOnly).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn empty_marker_disables_detection() {
        let list = ParameterList::from(["a", "b"]);
        assert_eq!(list.variadic_slot("", VariadicScan::Anywhere).unwrap(), None);
    }
}
