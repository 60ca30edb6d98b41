//! IBAN structure and check-digit validation for AI 8007.

use crate::checksum::iban_checksum_is_valid;
use crate::diagnostics_util::catalogue_diagnostic;
use gs1_diagnostics::{Diagnostic, codes};
use gs1_tables::IbanFormat;
use gs1_tables::iban::{
    ASPIRATIONAL_IBAN_FORMATS, IBAN_FORMATS, aspirational_iban_format, iban_format,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

struct IbanPatterns {
    base: Regex,
    /// Compiled BBAN structures for both tables, keyed by country.
    structures: HashMap<&'static str, Regex>,
}

fn patterns() -> &'static IbanPatterns {
    static PATTERNS: OnceLock<IbanPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| IbanPatterns {
        base: Regex::new(r"^[A-Z]{2}\d{2}[A-Za-z0-9]{1,30}$").expect("static pattern"),
        structures: IBAN_FORMATS
            .iter()
            .chain(ASPIRATIONAL_IBAN_FORMATS)
            .map(|f| {
                let re = Regex::new(&format!(r"^{}\d{{2}}{}$", f.country, f.bban))
                    .expect("IBAN structure tables hold valid patterns");
                (f.country, re)
            })
            .collect(),
    })
}

fn has_structure(format: Option<&IbanFormat>, value: &str) -> bool {
    format.is_some_and(|f| {
        f.length == value.len()
            && patterns()
                .structures
                .get(f.country)
                .is_some_and(|re| re.is_match(value))
    })
}

/// Check `value` as an IBAN. Returns the diagnostic for the first failing
/// stage: overall shape, country structure, then check digits.
pub(crate) fn check(value: &str) -> Result<(), Diagnostic> {
    if !patterns().base.is_match(value) {
        return Err(catalogue_diagnostic(
            codes::IBAN_STRUCTURE_INVALID,
            &[("value", value.to_string())],
            None,
        ));
    }
    // The base pattern guarantees two leading ASCII letters.
    let country = &value[..2];
    if has_structure(iban_format(country), value) {
        if iban_checksum_is_valid(value) {
            return Ok(());
        }
        return Err(catalogue_diagnostic(codes::IBAN_CHECKSUM_INVALID, &[], None));
    }
    let code = if has_structure(aspirational_iban_format(country), value) {
        codes::IBAN_COUNTRY_ASPIRATIONAL
    } else {
        codes::IBAN_COUNTRY_UNKNOWN
    };
    Err(catalogue_diagnostic(
        code,
        &[("country", country.to_string())],
        None,
    ))
}
