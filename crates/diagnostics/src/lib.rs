//! Diagnostics for the GS1 element string toolchain.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`DiagnosticCode`], used to
//! report problems found while splitting and validating element strings.
//! The numbered codes are defined in the [`codes`] module, generated from
//! `spec/diagnostics.jsonc` at build time.

#![warn(missing_docs)]

/// Diagnostic code constants auto-generated from the catalogue.
pub mod codes;

/// Policy tables derived from the diagnostic catalogue.
pub mod policy {
    use crate::DiagnosticCode;

    include!(concat!(env!("OUT_DIR"), "/generated_policy.rs"));
}

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Identity of a diagnostic: the public error number plus a stable name.
///
/// Two codes may share a number when they belong to different validation
/// scopes (for example the coupon and freight-unit checks both use 2017);
/// the name always tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiagnosticCode {
    number: u16,
    name: &'static str,
}

impl DiagnosticCode {
    /// Create a code. Only the generated [`codes`] constants should need this.
    pub const fn new(number: u16, name: &'static str) -> Self {
        Self { number, name }
    }

    /// The public error number (e.g. `2002`).
    pub const fn number(self) -> u16 {
        self.number
    }

    /// The symbolic name (e.g. `"UNRECOGNISED_AI"`).
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Default severity from the catalogue.
    pub fn default_severity(self) -> Severity {
        default_severity(self.name).unwrap_or(Severity::Error)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The field's data cannot be trusted at all.
    Fatal,
    /// The value is invalid for its application identifier.
    Error,
    /// The value is usable but suspicious.
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// A diagnostic attached to a resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Numbered diagnostic code.
    pub code: DiagnosticCode,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Character offset inside the field the diagnostic points at, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<String>,
        offset: Option<usize>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            offset,
            context: None,
        }
    }

    /// Create a diagnostic using the catalogue's default severity for `code`.
    pub fn from_catalogue(
        code: DiagnosticCode,
        message: impl Into<String>,
        offset: Option<usize>,
    ) -> Self {
        Self::new(code, code.default_severity(), message, offset)
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// The public error number.
    pub fn number(&self) -> u16 {
        self.code.number()
    }

    /// Whether the diagnostic marks its field's data as untrustworthy.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Returns the long explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(self.code.name())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Returns the long explanation for a diagnostic name, if known.
pub fn explain(name: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}

/// Returns the catalogue severity for a diagnostic name, if known.
pub fn default_severity(name: &str) -> Option<Severity> {
    include!(concat!(env!("OUT_DIR"), "/generated_severity.rs"))
}

/// Returns the message template for `(name, variant)`, if one exists.
///
/// Templates contain `{key}` placeholders drawn from the entry's context keys.
pub fn message_template_for(name: &str, variant: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_templates.rs"))
}

/// Find every code matching a user-supplied key: a number (`"2017"`) or a
/// symbolic name (`"NULL_VALUE"`, case-insensitive).
pub fn lookup(key: &str) -> Vec<DiagnosticCode> {
    let key = key.trim();
    match key.parse::<u16>() {
        Ok(number) => codes::ALL
            .iter()
            .copied()
            .filter(|c| c.number() == number)
            .collect(),
        Err(_) => codes::ALL
            .iter()
            .copied()
            .filter(|c| c.name().eq_ignore_ascii_case(key))
            .collect(),
    }
}
