//! Compile and resolve tracing.
//!
//! A trait-based hook layer for observing a dispatcher. When using
//! [`NoopTracer`] every hook compiles away through monomorphization.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default for `compile` and `call`) |
//! | [`StderrTracer`] | Human-readable log to stderr |
//! | [`ProfilingTracer`] | Per-arity call counts and rejection totals |
//! | [`RecordingTracer`] | Full event recording for assertions or post-mortem |
//!
//! # Usage
//!
//! ```
//! use fnarity::{Dispatcher, RecordingTracer, TraceEvent};
//!
//! let mut tracer = RecordingTracer::new();
//! let join = Dispatcher::builder()
//!     .params(["a"])
//!     .params(["a", "rest..."])
//!     .handler(|_: &(), args| args.to_object())
//!     .build_traced(&mut tracer)
//!     .unwrap();
//! join.call_traced(&(), [1, 2, 3], &mut tracer).unwrap();
//! assert!(matches!(tracer.events().last(), Some(TraceEvent::Resolve { variadic: true, .. })));
//! ```

use std::collections::BTreeMap;

/// Trace event emitted while compiling or resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A parameter list was registered as a fixed rule.
    Params {
        /// Arity the list was registered under.
        arity: usize,
        /// True if it replaced an earlier list of the same arity.
        replaced: bool,
    },
    /// A default bag was attached to the listed arities.
    Defaults {
        /// Arities that received the bag (those without one yet).
        arities: Vec<usize>,
        /// Number of fields in the bag.
        fields: usize,
    },
    /// The maximum-arity list was promoted to the variadic rule.
    Variadic {
        /// The maximum declared arity.
        arity: usize,
        /// Position of the variadic slot.
        position: usize,
    },
    /// A call resolved to a rule.
    Resolve {
        /// Number of arguments supplied.
        call_arity: usize,
        /// Arity whose default bag seeded the record.
        active_arity: usize,
        /// True if the variadic rule was used.
        variadic: bool,
    },
    /// A call matched no rule.
    Reject {
        /// Number of arguments supplied.
        call_arity: usize,
    },
}

/// Hooks invoked by the compiler and resolver.
///
/// All methods default to no-ops, so implementations only override the hooks
/// they care about.
pub trait ResolveTracer: std::fmt::Debug {
    /// Called for each parameter list registered during compilation.
    #[inline(always)]
    fn on_params(&mut self, _arity: usize, _replaced: bool) {}

    /// Called for each default bag declaration.
    ///
    /// `arities` may be empty when every declared arity already had a bag.
    #[inline(always)]
    fn on_defaults(&mut self, _arities: &[usize], _fields: usize) {}

    /// Called once if the maximum-arity list carries the variadic marker.
    #[inline(always)]
    fn on_variadic(&mut self, _arity: usize, _position: usize) {}

    /// Called when a call selects a rule, before the handler runs.
    #[inline(always)]
    fn on_resolve(&mut self, _call_arity: usize, _active_arity: usize, _variadic: bool) {}

    /// Called when a call is rejected with an unsupported-arity error.
    #[inline(always)]
    fn on_reject(&mut self, _call_arity: usize) {}
}

impl<T: ResolveTracer + ?Sized> ResolveTracer for &mut T {
    fn on_params(&mut self, arity: usize, replaced: bool) {
        (**self).on_params(arity, replaced);
    }

    fn on_defaults(&mut self, arities: &[usize], fields: usize) {
        (**self).on_defaults(arities, fields);
    }

    fn on_variadic(&mut self, arity: usize, position: usize) {
        (**self).on_variadic(arity, position);
    }

    fn on_resolve(&mut self, call_arity: usize, active_arity: usize, variadic: bool) {
        (**self).on_resolve(call_arity, active_arity, variadic);
    }

    fn on_reject(&mut self, call_arity: usize) {
        (**self).on_reject(call_arity);
    }
}

// ============================================================================
// NoopTracer
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl ResolveTracer for NoopTracer {}

// ============================================================================
// StderrTracer
// ============================================================================

/// Tracer that prints a human-readable log to stderr.
///
/// Output format:
/// ```text
///   +++ PARAMS    arity=2
///   +++ DEFAULTS  fields=3 arities=[1, 2]
///   +++ VARIADIC  arity=3 slot=2
///   >>> RESOLVE   args=4 -> arity=3 (variadic)
///   !!! REJECT    args=5
/// ```
#[derive(Debug, Default)]
pub struct StderrTracer {
    /// Maximum number of lines before going quiet. None = unlimited.
    limit: Option<usize>,
    /// Lines printed so far.
    count: usize,
}

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracer that stops printing after `limit` lines.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            count: 0,
        }
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if self.limit.is_some_and(|limit| self.count >= limit) {
            return;
        }
        eprintln!("{line}");
        self.count += 1;
        if let Some(limit) = self.limit
            && self.count == limit
        {
            eprintln!("--- trace limit reached ({limit} lines) ---");
        }
    }
}

impl ResolveTracer for StderrTracer {
    fn on_params(&mut self, arity: usize, replaced: bool) {
        let note = if replaced { " (replaced)" } else { "" };
        self.emit(format_args!("  +++ PARAMS    arity={arity}{note}"));
    }

    fn on_defaults(&mut self, arities: &[usize], fields: usize) {
        self.emit(format_args!("  +++ DEFAULTS  fields={fields} arities={arities:?}"));
    }

    fn on_variadic(&mut self, arity: usize, position: usize) {
        self.emit(format_args!("  +++ VARIADIC  arity={arity} slot={position}"));
    }

    fn on_resolve(&mut self, call_arity: usize, active_arity: usize, variadic: bool) {
        let note = if variadic { " (variadic)" } else { "" };
        self.emit(format_args!("  >>> RESOLVE   args={call_arity} -> arity={active_arity}{note}"));
    }

    fn on_reject(&mut self, call_arity: usize) {
        self.emit(format_args!("  !!! REJECT    args={call_arity}"));
    }
}

// ============================================================================
// ProfilingTracer
// ============================================================================

/// Tracer that counts resolutions per call arity.
#[derive(Debug, Default)]
pub struct ProfilingTracer {
    calls: BTreeMap<usize, u64>,
    variadic_calls: u64,
    rejected: u64,
}

/// Summary report from a profiling trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilingReport {
    /// `(call arity, count)` sorted by frequency, highest first.
    pub calls: Vec<(usize, u64)>,
    /// Calls served by the variadic rule.
    pub variadic_calls: u64,
    /// Calls rejected with an unsupported-arity error.
    pub rejected: u64,
}

impl ProfilingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a report; ties keep ascending arity order.
    #[must_use]
    pub fn report(&self) -> ProfilingReport {
        let mut calls: Vec<_> = self.calls.iter().map(|(&k, &v)| (k, v)).collect();
        calls.sort_by(|a, b| b.1.cmp(&a.1));
        ProfilingReport {
            calls,
            variadic_calls: self.variadic_calls,
            rejected: self.rejected,
        }
    }
}

impl ResolveTracer for ProfilingTracer {
    #[inline]
    fn on_resolve(&mut self, call_arity: usize, _active_arity: usize, variadic: bool) {
        *self.calls.entry(call_arity).or_insert(0) += 1;
        if variadic {
            self.variadic_calls += 1;
        }
    }

    fn on_reject(&mut self, _call_arity: usize) {
        self.rejected += 1;
    }
}

// ============================================================================
// RecordingTracer
// ============================================================================

/// Tracer that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Consumes the tracer and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl ResolveTracer for RecordingTracer {
    fn on_params(&mut self, arity: usize, replaced: bool) {
        self.events.push(TraceEvent::Params { arity, replaced });
    }

    fn on_defaults(&mut self, arities: &[usize], fields: usize) {
        self.events.push(TraceEvent::Defaults {
            arities: arities.to_vec(),
            fields,
        });
    }

    fn on_variadic(&mut self, arity: usize, position: usize) {
        self.events.push(TraceEvent::Variadic { arity, position });
    }

    fn on_resolve(&mut self, call_arity: usize, active_arity: usize, variadic: bool) {
        self.events.push(TraceEvent::Resolve {
            call_arity,
            active_arity,
            variadic,
        });
    }

    fn on_reject(&mut self, call_arity: usize) {
        self.events.push(TraceEvent::Reject { call_arity });
    }
}
