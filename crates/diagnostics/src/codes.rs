//! Diagnostic code constants.
//!
//! Auto-generated from `spec/diagnostics.jsonc` at build time.
//! Use these instead of bare numbers: several numbers are shared between
//! validation scopes, and the constants keep them apart.

use crate::DiagnosticCode;

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));
