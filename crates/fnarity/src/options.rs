/// Marker suffix that flags a parameter name as variadic, unless overridden.
pub const DEFAULT_VARIADIC_MARKER: &str = "...";

/// How a fixed or head/tail binding treats an argument slot holding [`Object::Missing`](crate::Object::Missing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingArgs {
    /// Leave the field unbound so the default bag value shows through.
    #[default]
    Skip,
    /// Bind the field to `Missing`, shadowing any default.
    Overwrite,
}

/// Where the compiler looks for the variadic marker in the maximum-arity list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariadicScan {
    /// Only the last parameter may be variadic.
    #[default]
    TrailingOnly,
    /// Any single parameter may be variadic; parameters after it form the tail.
    Anywhere,
}

/// Options applied when compiling declarations and resolving calls.
///
/// Use `DispatchOptions::default()` for the standard behavior, or adjust
/// individual settings with the builder methods.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DispatchOptions {
    /// Treatment of `Missing` arguments during binding.
    pub missing_args: MissingArgs,
    /// Positions inspected for the variadic marker.
    pub variadic_scan: VariadicScan,
    /// Reject variadic-fallback calls with fewer arguments than head + tail.
    ///
    /// When disabled, such calls bind an empty variadic list and the tail only
    /// receives the arguments that exist.
    pub strict_variadic: bool,
    /// Suffix marking a variadic parameter name.
    pub variadic_marker: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            missing_args: MissingArgs::default(),
            variadic_scan: VariadicScan::default(),
            strict_variadic: true,
            variadic_marker: DEFAULT_VARIADIC_MARKER.to_owned(),
        }
    }
}

impl DispatchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the treatment of `Missing` arguments.
    #[must_use]
    pub fn missing_args(mut self, policy: MissingArgs) -> Self {
        self.missing_args = policy;
        self
    }

    /// Sets where the variadic marker may appear.
    #[must_use]
    pub fn variadic_scan(mut self, scan: VariadicScan) -> Self {
        self.variadic_scan = scan;
        self
    }

    /// Enables or disables the head + tail length check on variadic calls.
    #[must_use]
    pub fn strict_variadic(mut self, strict: bool) -> Self {
        self.strict_variadic = strict;
        self
    }

    /// Sets the variadic marker suffix.
    #[must_use]
    pub fn variadic_marker(mut self, marker: impl Into<String>) -> Self {
        self.variadic_marker = marker.into();
        self
    }
}
