//! Configuration errors raised while compiling a declaration sequence.

use std::str::FromStr;

use fnarity::{Declaration, DispatchOptions, Dispatcher, ErrorKind, ResolvedRecord, VariadicScan, compile, compile_with};
use pretty_assertions::assert_eq;

type Handler = fn(&(), ResolvedRecord) -> usize;

fn count(_: &(), args: ResolvedRecord) -> usize {
    args.len()
}

#[test]
fn no_parameter_list() {
    let err = Dispatcher::builder().handler(count).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigurationError);
    assert_eq!(err.to_string(), "ConfigurationError: no parameter list defined");

    let err = Dispatcher::builder()
        .defaults([("a", 1)])
        .handler(count)
        .build()
        .unwrap_err();
    assert_eq!(err.message(), "no parameter list defined");

    let err = compile(Vec::<Declaration<Handler>>::new()).unwrap_err();
    assert_eq!(err.message(), "no parameter list defined");
}

#[test]
fn no_handler() {
    let declarations: Vec<Declaration<Handler>> = vec![Declaration::params(["a"]), Declaration::defaults([("b", 1)])];
    let err = compile(declarations).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.message(), "no handler specified as the final declaration");
}

#[test]
fn missing_parameter_list_is_reported_before_missing_handler() {
    let declarations: Vec<Declaration<Handler>> = vec![Declaration::defaults([("b", 1)])];
    let err = compile(declarations).unwrap_err();
    assert_eq!(err.message(), "no parameter list defined");
}

#[test]
fn handler_must_be_last() {
    let declarations: Vec<Declaration<Handler>> = vec![
        Declaration::params(["a"]),
        Declaration::Handler(count as Handler),
        Declaration::params(["a", "b"]),
        Declaration::Handler(count as Handler),
    ];
    let err = compile(declarations).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.message(),
        "handler found at declaration 2 of 4, it must be the final declaration"
    );
}

#[test]
fn two_variadic_markers_in_the_maximum_list() {
    let options = DispatchOptions::new().variadic_scan(VariadicScan::Anywhere);
    let declarations: Vec<Declaration<Handler>> = vec![
        Declaration::params(["a...", "b", "c..."]),
        Declaration::Handler(count as Handler),
    ];
    let err = compile_with(declarations, options, fnarity::NoopTracer).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.message(),
        "parameter list of arity 3 marks both position 0 and position 2 as variadic"
    );
}

#[test]
fn bare_marker_has_no_name() {
    let err = Dispatcher::builder()
        .params(["a", "..."])
        .handler(count)
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.message(), "variadic parameter at position 1 of arity 2 has an empty name");
}

#[test]
fn marker_problems_below_the_maximum_arity_are_ignored() {
    let f = Dispatcher::builder()
        .params(["..."])
        .params(["a", "b"])
        .handler(count)
        .build()
        .unwrap();
    assert_eq!(f.call(&(), [1]).unwrap(), 1);
}

#[test]
fn error_kind_names() {
    assert_eq!(ErrorKind::ConfigurationError.to_string(), "ConfigurationError");
    assert_eq!(
        ErrorKind::from_str("UnsupportedArityError").unwrap(),
        ErrorKind::UnsupportedArityError
    );
    let name: &'static str = ErrorKind::UnsupportedArityError.into();
    assert_eq!(name, "UnsupportedArityError");
    assert!(ErrorKind::from_str("TypeError").is_err());
}

#[test]
fn errors_are_std_errors() {
    let err = Dispatcher::builder().handler(count).build().unwrap_err();
    let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
    assert_eq!(boxed.to_string(), err.to_string());
}
