use std::fmt;

use crate::{
    args::ArgValues,
    compile::DispatcherBuilder,
    error::Result,
    record::ResolvedRecord,
    resolve::{resolve, resolve_record},
    table::DispatchTable,
    tracer::{NoopTracer, ResolveTracer},
};

/// A handler boxed behind a trait object, for storing dispatchers of differing closures together.
pub type BoxedHandler<R, T> = Box<dyn Fn(&R, ResolvedRecord) -> T + Send + Sync>;

/// A compiled multiple-arity function.
///
/// Owns its [`DispatchTable`] and handler exclusively. The table never changes
/// after compilation, so a dispatcher can be shared across threads whenever
/// `H` can.
pub struct Dispatcher<H> {
    table: DispatchTable,
    handler: H,
}

impl Dispatcher<()> {
    /// Starts a [`DispatcherBuilder`].
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }
}

impl<H> Dispatcher<H> {
    pub(crate) fn new(table: DispatchTable, handler: H) -> Self {
        Self { table, handler }
    }

    #[must_use]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Arities served by fixed rules, ascending.
    #[must_use]
    pub fn arities(&self) -> Vec<usize> {
        self.table.fixed_arities()
    }

    /// Smallest call arity the variadic rule accepts, if there is one.
    #[must_use]
    pub fn variadic_min_arity(&self) -> Option<usize> {
        self.table.variadic_min_arity()
    }

    /// Resolves a call into its record without invoking the handler.
    pub fn resolve_args(&self, args: impl Into<ArgValues>) -> Result<ResolvedRecord> {
        resolve_record(&self.table, &args.into(), &mut NoopTracer)
    }

    /// Calls the dispatcher with `receiver` as the handler's context.
    ///
    /// # Errors
    /// Returns an `UnsupportedArityError` if no declared arity accepts the call.
    pub fn call<R, T>(&self, receiver: &R, args: impl Into<ArgValues>) -> Result<T>
    where
        R: ?Sized,
        H: Fn(&R, ResolvedRecord) -> T,
    {
        resolve(&self.table, &self.handler, receiver, &args.into(), &mut NoopTracer)
    }

    /// Like [`call`](Self::call), reporting resolution to `tracer`.
    pub fn call_traced<R, T>(
        &self,
        receiver: &R,
        args: impl Into<ArgValues>,
        tracer: &mut impl ResolveTracer,
    ) -> Result<T>
    where
        R: ?Sized,
        H: Fn(&R, ResolvedRecord) -> T,
    {
        resolve(&self.table, &self.handler, receiver, &args.into(), tracer)
    }
}

impl<H> fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
