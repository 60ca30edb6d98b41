//! GS1 element string core library.
//!
//! Splits element strings (the decoded payload of GS1-128, DataMatrix,
//! DataBar, QR and Composite symbols) into application identifier fields,
//! resolves each identifier and validates its value. The main entry points
//! are [`parse`] / [`parse_to_vec`] for the built-in registry and
//! [`Parser`] for an injected [`Registry`] or [`ScanOptions`].
//!
//! Data problems are reported as [`Diagnostic`]s on the delivered
//! [`ResolvedField`]s; a scan never returns an error and never panics on
//! input.

#![warn(missing_docs)]

/// Check-digit primitives.
pub mod checksum;
mod coupon;
/// AI descriptors and validation.
pub mod descriptor;
mod diagnostics_util;
/// The resolved-field record.
pub mod field;
mod iban;
/// Scan options.
pub mod options;
/// Descriptor registry.
pub mod registry;
/// AI resolution.
pub mod resolver;
/// String helpers and separator constants.
pub mod text;
/// The element string splitter.
pub mod tokenizer;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Scanning
pub use tokenizer::{Parser, parse, parse_to_vec, predefined_length};

// Results
pub use field::{AiCode, ResolvedField};

// Validation
pub use checksum::{gs1_check_digit, gs1_checksum_is_valid, iban_checksum_is_valid};
pub use descriptor::{Check, Descriptor, Validation, ValidationFault};
pub use registry::Registry;
pub use resolver::producible_codes;

// Configuration
pub use options::{OptionsError, ScanOptions, load_options_from_str};

// Diagnostics (re-exported from the diagnostics crate)
pub use gs1_diagnostics::{Diagnostic, DiagnosticCode, Severity, codes};

// Tables
pub use gs1_tables::{PrefixAllocation, RegistryError, country_for};
pub use text::GROUP_SEPARATOR;
