use ahash::AHashMap;

use crate::{
    defaults::DefaultBag,
    options::DispatchOptions,
    rule::{BindingRule, FixedRule, VariadicRule},
};

/// The compiled, immutable form of a declaration sequence.
///
/// Holds one fixed rule per declared arity (minus the maximum arity when that
/// list was promoted to the variadic rule), the optional variadic rule, the
/// default bag attached to each arity, and the options the table was compiled
/// with. Nothing here changes after compilation.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    pub(crate) fixed: AHashMap<usize, FixedRule>,
    pub(crate) variadic: Option<VariadicRule>,
    pub(crate) defaults: AHashMap<usize, DefaultBag>,
    pub(crate) max_arity: usize,
    pub(crate) options: DispatchOptions,
}

impl DispatchTable {
    pub(crate) fn new(options: DispatchOptions) -> Self {
        Self {
            fixed: AHashMap::new(),
            variadic: None,
            defaults: AHashMap::new(),
            max_arity: 0,
            options,
        }
    }

    /// Arities served by fixed rules, ascending.
    #[must_use]
    pub fn fixed_arities(&self) -> Vec<usize> {
        let mut arities: Vec<usize> = self.fixed.keys().copied().collect();
        arities.sort_unstable();
        arities
    }

    #[must_use]
    pub fn fixed_rule(&self, arity: usize) -> Option<&FixedRule> {
        self.fixed.get(&arity)
    }

    #[must_use]
    pub fn variadic(&self) -> Option<&VariadicRule> {
        self.variadic.as_ref()
    }

    /// The default bag attached to `arity`, if any declaration supplied one.
    #[must_use]
    pub fn defaults_for(&self, arity: usize) -> Option<&DefaultBag> {
        self.defaults.get(&arity)
    }

    /// The largest declared arity, variadic or not.
    #[must_use]
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    #[must_use]
    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Smallest call arity the variadic rule accepts, if there is one.
    ///
    /// Without strict checking the variadic rule accepts any call the fixed
    /// rules do not, so this is `0`.
    #[must_use]
    pub fn variadic_min_arity(&self) -> Option<usize> {
        self.variadic.as_ref().map(|rule| {
            if self.options.strict_variadic {
                rule.min_arity()
            } else {
                0
            }
        })
    }

    /// Picks the rule for a call, returning it with the arity whose defaults apply.
    ///
    /// An exact fixed arity wins; otherwise the variadic rule applies under the
    /// maximum arity.
    pub(crate) fn select(&self, call_arity: usize) -> Option<(BindingRule<'_>, usize)> {
        if let Some(rule) = self.fixed.get(&call_arity) {
            return Some((BindingRule::Fixed(rule), call_arity));
        }
        let rule = self.variadic.as_ref()?;
        if self.options.strict_variadic && call_arity < rule.min_arity() {
            return None;
        }
        Some((BindingRule::Variadic(rule), self.max_arity))
    }
}
