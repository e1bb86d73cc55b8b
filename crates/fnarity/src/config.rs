//! JSON configuration surface.
//!
//! A configuration is either a bare declaration array, or an object carrying
//! that array under `declarations` plus optional `options`:
//!
//! ```json
//! {
//!     "declarations": [["a"], {"b": 8}, ["a", "b"], ["a", "b", "c..."]],
//!     "options": {"missing_args": "overwrite", "strict_variadic": false}
//! }
//! ```
//!
//! Arrays of strings are parameter lists and objects are default bags. JSON
//! has no callables, so the handler is supplied when compiling.

use crate::{
    compile::{Declaration, compile_with},
    defaults::DefaultBag,
    dispatcher::Dispatcher,
    error::{Error, Result},
    object::Object,
    options::DispatchOptions,
    params::ParameterList,
    tracer::{NoopTracer, ResolveTracer},
};

/// A parsed configuration: declarations without their handler, plus options.
#[derive(Debug, Default)]
pub struct DispatchConfig {
    pub declarations: Vec<Declaration>,
    pub options: DispatchOptions,
}

impl DispatchConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    /// Returns a `ConfigurationError` for invalid JSON or an unexpected shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|err| Error::configuration(format!("invalid JSON: {err}")))?;
        Self::from_json(value)
    }

    /// Parses a configuration from a JSON value.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(items) => Ok(Self {
                declarations: declarations_from_json(items)?,
                options: DispatchOptions::default(),
            }),
            serde_json::Value::Object(mut map) => {
                let Some(serde_json::Value::Array(items)) = map.remove("declarations") else {
                    return Err(Error::configuration("configuration object needs a `declarations` array"));
                };
                let options = match map.remove("options") {
                    Some(options) => serde_json::from_value(options)
                        .map_err(|err| Error::configuration(format!("invalid options: {err}")))?,
                    None => DispatchOptions::default(),
                };
                if let Some(key) = map.keys().next() {
                    return Err(Error::configuration(format!("unknown configuration key `{key}`")));
                }
                Ok(Self {
                    declarations: declarations_from_json(items)?,
                    options,
                })
            }
            other => Err(Error::configuration(format!(
                "configuration must be an array or object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Terminates the declarations with `handler` and compiles them.
    pub fn compile<H>(self, handler: H) -> Result<Dispatcher<H>> {
        self.compile_traced(handler, NoopTracer)
    }

    /// Like [`compile`](Self::compile), reporting to `tracer`.
    pub fn compile_traced<H>(self, handler: H, tracer: impl ResolveTracer) -> Result<Dispatcher<H>> {
        let declarations = self
            .declarations
            .into_iter()
            .map(Declaration::with_handler_type)
            .chain(std::iter::once(Declaration::Handler(handler)));
        compile_with(declarations, self.options, tracer)
    }
}

/// Converts a JSON declaration array into handler-free declarations.
fn declarations_from_json(items: Vec<serde_json::Value>) -> Result<Vec<Declaration>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::Array(names) => names
                .into_iter()
                .map(|name| match name {
                    serde_json::Value::String(name) => Ok(name),
                    other => Err(Error::configuration(format!(
                        "declaration {}: parameter names must be strings, got {}",
                        i + 1,
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<String>>>()
                .map(|names| Declaration::Params(ParameterList::new(names))),
            serde_json::Value::Object(map) => Ok(Declaration::Defaults(
                map.into_iter().map(|(k, v)| (k, Object::from(v))).collect::<DefaultBag>(),
            )),
            other => Err(Error::configuration(format!(
                "declaration {}: expected a parameter list or a default bag, got {}",
                i + 1,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
