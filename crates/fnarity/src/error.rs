use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Result type alias for compile and resolve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two failure kinds of a dispatcher.
///
/// `Display`, `FromStr` and `Into<&'static str>` all use the bare variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The declaration sequence could not be compiled; no dispatcher is produced.
    ConfigurationError,
    /// A call's argument count matched neither a fixed arity nor the variadic rule.
    UnsupportedArityError,
}

/// An error raised while compiling declarations or resolving a call.
///
/// Both kinds are fatal to the attempted operation: compilation produces no
/// dispatcher, and resolution never reaches the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::ConfigurationError
    }

    #[must_use]
    pub fn is_unsupported_arity(&self) -> bool {
        self.kind == ErrorKind::UnsupportedArityError
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message)
    }

    pub(crate) fn no_parameter_list() -> Self {
        Self::configuration("no parameter list defined")
    }

    pub(crate) fn no_handler() -> Self {
        Self::configuration("no handler specified as the final declaration")
    }

    pub(crate) fn handler_not_last(position: usize, total: usize) -> Self {
        Self::configuration(format!(
            "handler found at declaration {position} of {total}, it must be the final declaration"
        ))
    }

    pub(crate) fn duplicate_variadic(arity: usize, first: usize, second: usize) -> Self {
        Self::configuration(format!(
            "parameter list of arity {arity} marks both position {first} and position {second} as variadic"
        ))
    }

    pub(crate) fn empty_variadic_name(arity: usize, position: usize) -> Self {
        Self::configuration(format!(
            "variadic parameter at position {position} of arity {arity} has an empty name"
        ))
    }

    /// Builds the unsupported-arity error, listing what the dispatcher does accept.
    pub(crate) fn unsupported_arity(call_arity: usize, fixed: &[usize], variadic_min: Option<usize>) -> Self {
        let mut message = format!("unsupported number of arguments: {call_arity}");
        let mut accepted = String::new();
        for (i, arity) in fixed.iter().enumerate() {
            if i > 0 {
                accepted.push_str(", ");
            }
            // writing to a String cannot fail
            let _ = write!(accepted, "{arity}");
        }
        if let Some(min) = variadic_min {
            if !accepted.is_empty() {
                accepted.push_str(", ");
            }
            let _ = write!(accepted, "{min} or more");
        }
        if !accepted.is_empty() {
            let _ = write!(message, " (accepts {accepted})");
        }
        Self::new(ErrorKind::UnsupportedArityError, message)
    }
}
