//! Compilation of a declaration sequence into a [`Dispatcher`].
//!
//! Declarations are processed in order:
//! 1. A parameter list registers a fixed rule under its length and raises the
//!    running maximum arity. A later list of the same length replaces the earlier one.
//! 2. A default bag attaches to every arity registered so far that has no bag.
//!    Bags are never overridden by later declarations.
//! 3. After the sequence, the maximum-arity list is checked for the variadic
//!    marker and, if found, moved out of the fixed table into the variadic rule.

use std::{convert::Infallible, fmt};

use crate::{
    defaults::DefaultBag,
    dispatcher::Dispatcher,
    error::{Error, Result},
    options::DispatchOptions,
    params::ParameterList,
    rule::{FixedRule, VariadicRule},
    table::DispatchTable,
    tracer::{NoopTracer, ResolveTracer},
};

/// One element of a configuration sequence.
///
/// The sequence must contain at least one `Params` and end with exactly one
/// `Handler`. The default type parameter `Infallible` describes sequences that
/// cannot hold a handler, such as those parsed from JSON or collected by
/// [`DispatcherBuilder`].
pub enum Declaration<H = Infallible> {
    /// Parameter names for the arity equal to the list's length.
    Params(ParameterList),
    /// Fallback values for every already-declared arity lacking a bag.
    Defaults(DefaultBag),
    /// The wrapped function.
    Handler(H),
}

impl<H> Declaration<H> {
    pub fn params(list: impl Into<ParameterList>) -> Self {
        Self::Params(list.into())
    }

    pub fn defaults(bag: impl Into<DefaultBag>) -> Self {
        Self::Defaults(bag.into())
    }
}

impl Declaration {
    /// Widens a handler-free declaration to any handler type.
    #[must_use]
    pub fn with_handler_type<H>(self) -> Declaration<H> {
        match self {
            Self::Params(list) => Declaration::Params(list),
            Self::Defaults(bag) => Declaration::Defaults(bag),
            Self::Handler(never) => match never {},
        }
    }
}

impl<H> fmt::Debug for Declaration<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(list) => f.debug_tuple("Params").field(list).finish(),
            Self::Defaults(bag) => f.debug_tuple("Defaults").field(bag).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl<H: Clone> Clone for Declaration<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Params(list) => Self::Params(list.clone()),
            Self::Defaults(bag) => Self::Defaults(bag.clone()),
            Self::Handler(handler) => Self::Handler(handler.clone()),
        }
    }
}

/// Compiles `declarations` with default options.
///
/// # Errors
/// Returns a `ConfigurationError` if no parameter list is declared, if the
/// final declaration is not a handler, if a handler appears anywhere else, or
/// if the maximum-arity list carries a malformed variadic marker.
pub fn compile<H>(declarations: impl IntoIterator<Item = Declaration<H>>) -> Result<Dispatcher<H>> {
    compile_with(declarations, DispatchOptions::default(), NoopTracer)
}

/// Compiles `declarations` with explicit options, reporting to `tracer`.
pub fn compile_with<H>(
    declarations: impl IntoIterator<Item = Declaration<H>>,
    options: DispatchOptions,
    mut tracer: impl ResolveTracer,
) -> Result<Dispatcher<H>> {
    let mut declarations: Vec<Declaration<H>> = declarations.into_iter().collect();
    if !declarations.iter().any(|d| matches!(d, Declaration::Params(_))) {
        return Err(Error::no_parameter_list());
    }
    let total = declarations.len();
    let Some(Declaration::Handler(handler)) = declarations.pop() else {
        return Err(Error::no_handler());
    };

    let mut compiler = Compiler::new(options);
    for (i, declaration) in declarations.into_iter().enumerate() {
        match declaration {
            Declaration::Params(list) => compiler.register(list, &mut tracer),
            Declaration::Defaults(bag) => compiler.attach(&bag, &mut tracer),
            Declaration::Handler(_) => return Err(Error::handler_not_last(i + 1, total)),
        }
    }
    let table = compiler.finish(&mut tracer)?;
    Ok(Dispatcher::new(table, handler))
}

/// Running state while walking a declaration sequence.
struct Compiler {
    table: DispatchTable,
}

impl Compiler {
    fn new(options: DispatchOptions) -> Self {
        Self {
            table: DispatchTable::new(options),
        }
    }

    fn register(&mut self, list: ParameterList, tracer: &mut impl ResolveTracer) {
        let arity = list.arity();
        let replaced = self.table.fixed.insert(arity, FixedRule::new(list)).is_some();
        self.table.max_arity = self.table.max_arity.max(arity);
        tracer.on_params(arity, replaced);
    }

    fn attach(&mut self, bag: &DefaultBag, tracer: &mut impl ResolveTracer) {
        let mut attached: Vec<usize> = self
            .table
            .fixed
            .keys()
            .copied()
            .filter(|arity| !self.table.defaults.contains_key(arity))
            .collect();
        attached.sort_unstable();
        for &arity in &attached {
            self.table.defaults.insert(arity, bag.clone());
        }
        tracer.on_defaults(&attached, bag.len());
    }

    /// Promotes the maximum-arity list to the variadic rule when it carries the marker.
    fn finish(mut self, tracer: &mut impl ResolveTracer) -> Result<DispatchTable> {
        let max_arity = self.table.max_arity;
        let slot = match self.table.fixed.get(&max_arity) {
            Some(rule) => {
                let options = &self.table.options;
                rule.params()
                    .variadic_slot(&options.variadic_marker, options.variadic_scan)?
            }
            None => None,
        };
        if let Some((position, name)) = slot
            && let Some(rule) = self.table.fixed.remove(&max_arity)
        {
            self.table.variadic = Some(VariadicRule::new(rule.params(), position, name));
            tracer.on_variadic(max_arity, position);
        }
        Ok(self.table)
    }
}

/// Collects declarations fluently and finishes with a handler.
///
/// ```
/// use fnarity::{Dispatcher, Object};
///
/// let area = Dispatcher::builder()
///     .params(["w"])
///     .defaults([("h", 1)])
///     .params(["w", "h"])
///     .handler(|_: &(), args| {
///         let w = i64::try_from(args.get("w").unwrap()).unwrap();
///         let h = i64::try_from(args.get("h").unwrap()).unwrap();
///         w * h
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(area.call(&(), [3]).unwrap(), 3);
/// assert_eq!(area.call(&(), [3, 4]).unwrap(), 12);
/// assert!(area.call(&(), [1, 2, 3]).unwrap_err().is_unsupported_arity());
/// assert_eq!(area.resolve_args([5]).unwrap().get("h"), Some(&Object::Int(1)));
/// ```
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    declarations: Vec<Declaration>,
    options: DispatchOptions,
}

impl DispatcherBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a parameter list.
    #[must_use]
    pub fn params(mut self, list: impl Into<ParameterList>) -> Self {
        self.declarations.push(Declaration::params(list));
        self
    }

    /// Declares a default bag for every arity declared so far without one.
    #[must_use]
    pub fn defaults(mut self, bag: impl Into<DefaultBag>) -> Self {
        self.declarations.push(Declaration::defaults(bag));
        self
    }

    #[must_use]
    pub fn options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Terminates the sequence with the handler.
    pub fn handler<R, T, H>(self, handler: H) -> TerminatedBuilder<H>
    where
        R: ?Sized,
        H: Fn(&R, crate::ResolvedRecord) -> T,
    {
        TerminatedBuilder {
            declarations: self.declarations,
            options: self.options,
            handler,
        }
    }
}

/// A builder whose sequence has been terminated by a handler.
#[derive(Debug)]
pub struct TerminatedBuilder<H> {
    declarations: Vec<Declaration>,
    options: DispatchOptions,
    handler: H,
}

impl<H> TerminatedBuilder<H> {
    /// Compiles the collected declarations.
    pub fn build(self) -> Result<Dispatcher<H>> {
        self.build_traced(NoopTracer)
    }

    /// Compiles the collected declarations, reporting to `tracer`.
    pub fn build_traced(self, tracer: impl ResolveTracer) -> Result<Dispatcher<H>> {
        let declarations = self
            .declarations
            .into_iter()
            .map(Declaration::with_handler_type)
            .chain(std::iter::once(Declaration::Handler(self.handler)));
        compile_with(declarations, self.options, tracer)
    }
}
