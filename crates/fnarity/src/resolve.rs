//! Per-call resolution against a compiled [`DispatchTable`].

use crate::{
    args::ArgValues,
    error::{Error, Result},
    record::ResolvedRecord,
    table::DispatchTable,
    tracer::ResolveTracer,
};

/// Resolves `args` into a record without invoking any handler.
///
/// 1. Selects the fixed rule for `args.len()`, else the variadic rule.
/// 2. Seeds the record with the default bag of the active arity.
/// 3. Applies the rule, binding explicit fields over the defaults.
///
/// # Errors
/// Returns an `UnsupportedArityError` if no rule accepts `args.len()`.
pub fn resolve_record(
    table: &DispatchTable,
    args: &ArgValues,
    tracer: &mut impl ResolveTracer,
) -> Result<ResolvedRecord> {
    let call_arity = args.len();
    let Some((rule, active_arity)) = table.select(call_arity) else {
        tracer.on_reject(call_arity);
        return Err(Error::unsupported_arity(
            call_arity,
            &table.fixed_arities(),
            table.variadic_min_arity(),
        ));
    };
    tracer.on_resolve(call_arity, active_arity, rule.is_variadic());

    let defaults = table.defaults_for(active_arity).cloned().unwrap_or_default();
    let mut record = ResolvedRecord::with_defaults(defaults);
    rule.bind(args, &mut record, table.options().missing_args);
    Ok(record)
}

/// Resolves `args` and invokes `handler` with `receiver` and the resolved record.
///
/// The handler's return value is passed through unchanged. The handler is not
/// called when resolution fails.
pub fn resolve<R, T, H>(
    table: &DispatchTable,
    handler: &H,
    receiver: &R,
    args: &ArgValues,
    tracer: &mut impl ResolveTracer,
) -> Result<T>
where
    R: ?Sized,
    H: Fn(&R, ResolvedRecord) -> T,
{
    let record = resolve_record(table, args, tracer)?;
    Ok(handler(receiver, record))
}
