#![doc = include_str!("../../../README.md")]

mod args;
mod compile;
pub mod config;
mod defaults;
mod dispatcher;
mod error;
mod object;
mod options;
mod params;
mod record;
mod resolve;
mod rule;
mod table;
pub mod tracer;

pub use crate::{
    args::ArgValues,
    compile::{Declaration, DispatcherBuilder, TerminatedBuilder, compile, compile_with},
    config::DispatchConfig,
    defaults::DefaultBag,
    dispatcher::{BoxedHandler, Dispatcher},
    error::{Error, ErrorKind, Result},
    object::{ConversionError, DictPairs, Object},
    options::{DEFAULT_VARIADIC_MARKER, DispatchOptions, MissingArgs, VariadicScan},
    params::ParameterList,
    record::ResolvedRecord,
    resolve::{resolve, resolve_record},
    rule::{FixedRule, VariadicRule},
    table::DispatchTable,
    tracer::{
        NoopTracer, ProfilingReport, ProfilingTracer, RecordingTracer, ResolveTracer, StderrTracer, TraceEvent,
    },
};
