//! Compiled binding rules.
//!
//! A rule maps a positional argument sequence onto a [`ResolvedRecord`]. Fixed
//! rules cover one exact arity; the single variadic rule covers every call the
//! fixed rules do not, splitting the arguments into a head, a collected window
//! and a tail:
//!
//! ```text
//! args:   [h0 h1 | v0 v1 v2 ... | t0 t1]
//! names:  [a  b  | rest...      | y  z ]
//! window: head.len() .. args.len() - tail.len()
//! ```

use std::ops::Range;

use crate::{
    args::ArgValues,
    object::Object,
    options::MissingArgs,
    params::ParameterList,
    record::ResolvedRecord,
};

/// Binds a single positional argument under the missing-argument policy.
fn bind_one(record: &mut ResolvedRecord, name: &str, value: Option<&Object>, missing: MissingArgs) {
    match (value, missing) {
        (Some(value), MissingArgs::Overwrite) => record.bind(name, value.clone()),
        (Some(value), MissingArgs::Skip) if !value.is_missing() => record.bind(name, value.clone()),
        _ => {}
    }
}

/// A rule that assigns argument `i` to parameter `i` for one exact arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRule {
    params: ParameterList,
}

impl FixedRule {
    pub(crate) fn new(params: ParameterList) -> Self {
        Self { params }
    }

    /// The arity this rule is registered under.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.arity()
    }

    #[must_use]
    pub fn params(&self) -> &ParameterList {
        &self.params
    }

    pub(crate) fn bind(&self, args: &ArgValues, record: &mut ResolvedRecord, missing: MissingArgs) {
        for (i, name) in self.params.names().iter().enumerate() {
            bind_one(record, name, args.get(i), missing);
        }
    }
}

/// The rule compiled from a maximum-arity list carrying a variadic marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariadicRule {
    /// Names before the variadic slot.
    head: Vec<String>,
    /// Field receiving the collected window, marker stripped.
    name: String,
    /// Names after the variadic slot.
    tail: Vec<String>,
}

impl VariadicRule {
    /// Splits `params` around the slot at `position`, binding the slot to `name`.
    pub(crate) fn new(params: &ParameterList, position: usize, name: String) -> Self {
        let names = params.names();
        Self {
            head: names[..position].to_vec(),
            name,
            tail: names[position + 1..].to_vec(),
        }
    }

    #[must_use]
    pub fn head(&self) -> &[String] {
        &self.head
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tail(&self) -> &[String] {
        &self.tail
    }

    /// Position of the variadic slot in the declared list.
    #[must_use]
    pub fn position(&self) -> usize {
        self.head.len()
    }

    /// Fewest arguments that fill every head and tail name.
    #[must_use]
    pub fn min_arity(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// Index range of the arguments collected into the variadic field.
    ///
    /// The range is empty, never inverted, when `call_arity` is below
    /// [`min_arity`](Self::min_arity).
    #[must_use]
    pub fn window(&self, call_arity: usize) -> Range<usize> {
        let start = self.head.len().min(call_arity);
        let end = call_arity.saturating_sub(self.tail.len()).max(start);
        start..end
    }

    /// Binds head from the front, the window to the variadic field, and tail from the back.
    ///
    /// Tail names are aligned to the end of `args`; a tail name whose aligned
    /// index falls inside the head (short calls in non-strict mode) is left unbound.
    pub(crate) fn bind(&self, args: &ArgValues, record: &mut ResolvedRecord, missing: MissingArgs) {
        let window = self.window(args.len());

        for (i, name) in self.head.iter().enumerate() {
            bind_one(record, name, args.get(i), missing);
        }

        let collected: Vec<Object> = args.as_slice()[window.clone()].to_vec();
        record.bind(self.name.as_str(), Object::List(collected));

        for (j, name) in self.tail.iter().enumerate() {
            let index = (args.len() + j).checked_sub(self.tail.len());
            if let Some(index) = index.filter(|&index| index >= window.end) {
                bind_one(record, name, args.get(index), missing);
            }
        }
    }
}

/// The rule chosen for one call.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BindingRule<'a> {
    Fixed(&'a FixedRule),
    Variadic(&'a VariadicRule),
}

impl BindingRule<'_> {
    pub(crate) fn bind(self, args: &ArgValues, record: &mut ResolvedRecord, missing: MissingArgs) {
        match self {
            Self::Fixed(rule) => rule.bind(args, record, missing),
            Self::Variadic(rule) => rule.bind(args, record, missing),
        }
    }

    pub(crate) fn is_variadic(self) -> bool {
        matches!(self, Self::Variadic(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(names: &[&str], position: usize) -> VariadicRule {
        let params = ParameterList::new(names.iter().copied());
        let name = names[position].trim_end_matches("...").to_owned();
        VariadicRule::new(&params, position, name)
    }

    #[test]
    fn window_sits_between_head_and_tail() {
        let rule = rule(&["a", "rest...", "y", "z"], 1);
        assert_eq!(rule.min_arity(), 3);
        assert_eq!(rule.window(3), 1..1);
        assert_eq!(rule.window(6), 1..4);
    }

    #[test]
    fn window_never_inverts_on_short_calls() {
        let rule = rule(&["a", "b", "rest...", "z"], 2);
        assert_eq!(rule.window(0), 0..0);
        assert_eq!(rule.window(1), 1..1);
        assert_eq!(rule.window(2), 2..2);
    }

    #[test]
    fn tail_aligns_to_last_argument() {
        let rule = rule(&["a", "rest...", "y", "z"], 1);
        let args = ArgValues::from([1, 2, 3, 4, 5]);
        let mut record = ResolvedRecord::default();
        rule.bind(&args, &mut record, MissingArgs::Skip);

        assert_eq!(record.get("a"), Some(&Object::Int(1)));
        assert_eq!(record.get("rest"), Some(&Object::from(vec![2, 3])));
        assert_eq!(record.get("y"), Some(&Object::Int(4)));
        assert_eq!(record.get("z"), Some(&Object::Int(5)));
    }

    #[test]
    fn short_call_leaves_overlapping_tail_unbound() {
        let rule = rule(&["a", "b", "rest...", "z"], 2);
        let args = ArgValues::from([1]);
        let mut record = ResolvedRecord::default();
        rule.bind(&args, &mut record, MissingArgs::Skip);

        assert_eq!(record.get("a"), Some(&Object::Int(1)));
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("rest"), Some(&Object::List(vec![])));
        assert_eq!(record.get("z"), None);
    }

    #[test]
    fn fixed_rule_skips_missing_by_default() {
        let rule = FixedRule::new(ParameterList::from(["a", "b"]));
        let args = ArgValues::from([Object::Int(1), Object::Missing]);

        let mut skipped = ResolvedRecord::default();
        rule.bind(&args, &mut skipped, MissingArgs::Skip);
        assert!(!skipped.is_explicit("b"));

        let mut overwritten = ResolvedRecord::default();
        rule.bind(&args, &mut overwritten, MissingArgs::Overwrite);
        assert_eq!(overwritten.own("b"), Some(&Object::Missing));
    }
}
