//! Shared test helpers for `gs1_core` integration tests.

#![allow(unreachable_pub)]

use gs1_core::{Diagnostic, ResolvedField, parse_to_vec};

/// Build an element string, writing the group separator as `^`.
pub fn es(text: &str) -> String {
    text.replace('^', "\u{1d}")
}

/// Scan an element string written with `^` separators.
pub fn scan(text: &str) -> Vec<ResolvedField> {
    parse_to_vec(Some(&es(text)))
}

/// Diagnostic numbers on a field, in attachment order.
#[allow(dead_code)]
pub fn numbers(field: &ResolvedField) -> Vec<u16> {
    field.diagnostics().iter().map(Diagnostic::number).collect()
}

/// Whether `field` carries a diagnostic numbered `number`.
#[allow(dead_code)]
pub fn has(field: &ResolvedField, number: u16) -> bool {
    field.diagnostics().iter().any(|d| d.number() == number)
}

/// Scan a single field and return it, asserting exactly one was produced.
#[allow(dead_code)]
pub fn single(text: &str) -> ResolvedField {
    let mut fields = scan(text);
    assert_eq!(fields.len(), 1, "expected one field for {text:?}: {fields:#?}");
    fields.remove(0)
}

/// Assert a field resolved without any diagnostic.
#[allow(dead_code)]
pub fn assert_clean(field: &ResolvedField) {
    assert!(
        !field.is_error(),
        "AI {} value {:?} unexpectedly has diagnostics: {:#?}",
        field.identifier(),
        field.value(),
        field.diagnostics()
    );
}
