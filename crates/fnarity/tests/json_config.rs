//! Declaration sequences loaded from JSON.

use fnarity::{ArgValues, DispatchConfig, DispatchOptions, MissingArgs, Object, ResolvedRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

fn config_error(text: &str) -> String {
    let err = DispatchConfig::from_json_str(text).unwrap_err();
    assert!(err.is_configuration());
    err.message().to_owned()
}

#[test]
fn bare_declaration_array() {
    let config = DispatchConfig::from_json_str(r#"[["a"], {"b": 8, "c": 9}, ["a", "b"], ["a", "b", "c..."]]"#).unwrap();
    assert_eq!(config.declarations.len(), 4);
    assert_eq!(config.options, DispatchOptions::default());

    let f = config.compile(|_: &(), record: ResolvedRecord| record.to_json()).unwrap();
    assert_eq!(f.call(&(), [1]).unwrap(), json!({"a": 1, "b": 8, "c": 9}));
    assert_eq!(f.call(&(), [1, 2]).unwrap(), json!({"a": 1, "b": 2}));
    assert_eq!(f.call(&(), [1, 2, 3, 4]).unwrap(), json!({"a": 1, "b": 2, "c": [3, 4]}));
}

#[test]
fn object_form_with_options() {
    let config = DispatchConfig::from_json(json!({
        "declarations": [["a", "b"], {"b": 8}],
        "options": {"missing_args": "overwrite"}
    }))
    .unwrap();
    assert_eq!(config.options.missing_args, MissingArgs::Overwrite);
    assert!(config.options.strict_variadic);
    assert_eq!(config.options.variadic_marker, "...");

    let f = config.compile(|_: &(), record: ResolvedRecord| record).unwrap();
    let record = f.call(&(), vec![Object::Int(1), Object::Missing]).unwrap();
    assert_eq!(record.get("b"), Some(&Object::Missing));
}

#[test]
fn object_form_without_options() {
    let config = DispatchConfig::from_json(json!({"declarations": [["x"]]})).unwrap();
    assert_eq!(config.options, DispatchOptions::default());
}

#[test]
fn bag_values_keep_their_json_types() {
    let config = DispatchConfig::from_json(json!([
        ["a"],
        {"n": null, "f": 1.5, "s": "text", "l": [1, true], "d": {"k": "v"}}
    ]))
    .unwrap();
    let f = config.compile(|_: &(), record: ResolvedRecord| record).unwrap();
    let record = f.call(&(), [0]).unwrap();

    assert_eq!(record.get("n"), Some(&Object::None));
    assert_eq!(record.get("f"), Some(&Object::Float(1.5)));
    assert_eq!(record.get("s"), Some(&Object::from("text")));
    assert_eq!(
        record.get("l"),
        Some(&Object::List(vec![Object::Int(1), Object::Bool(true)]))
    );
    assert_eq!(record.get("d").unwrap().repr(), r#"{"k": "v"}"#);
}

#[test]
fn empty_declarations_fail_at_compile_time() {
    let config = DispatchConfig::from_json_str("[]").unwrap();
    let err = config.compile(|_: &(), record: ResolvedRecord| record).unwrap_err();
    assert_eq!(err.message(), "no parameter list defined");
}

#[test]
fn malformed_configurations() {
    assert_eq!(
        config_error("42"),
        "configuration must be an array or object, got number"
    );
    assert_eq!(
        config_error(r#"{"decls": []}"#),
        "configuration object needs a `declarations` array"
    );
    assert_eq!(
        config_error(r#"{"declarations": [], "extra": 1}"#),
        "unknown configuration key `extra`"
    );
    assert_eq!(
        config_error("[[1]]"),
        "declaration 1: parameter names must be strings, got number"
    );
    assert_eq!(
        config_error(r#"[["a"], "b"]"#),
        "declaration 2: expected a parameter list or a default bag, got string"
    );
    assert!(config_error("[").starts_with("invalid JSON"));
    assert!(config_error(r#"{"declarations": [], "options": {"missing_args": "ignore"}}"#).starts_with("invalid options"));
}

#[test]
fn call_arguments_from_json() {
    let args = ArgValues::from_json(json!([1, "two", null])).unwrap();
    assert_eq!(args.len(), 3);
    assert_eq!(args[1], Object::from("two"));
    assert_eq!(args[2], Object::None);
    assert!(ArgValues::from_json(json!({"a": 1})).is_none());
}
