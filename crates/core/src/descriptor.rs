//! AI descriptors and the validation they perform.

use crate::checksum::gs1_checksum_is_valid;
use crate::diagnostics_util::catalogue_diagnostic;
use crate::options::ScanOptions;
use crate::{coupon, iban};
use gs1_diagnostics::{Diagnostic, DiagnosticCode, Severity, codes};
use gs1_tables::{AiEntry, RegistryError, ValidatorKind, is_freight_unit_type};
use regex::{Regex, RegexBuilder};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Compiled-program limit for registry patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Algorithmic check layered on top of a descriptor's pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Pattern only.
    Pattern,
    /// GS1 check digit over the whole value.
    FinalChecksum,
    /// GS1 check digit over the first 13 characters.
    LeadingChecksum13,
    /// GS1 check digit over the first 14 characters.
    LeadingChecksum14,
    /// North American coupon grammar.
    NorthAmericanCoupon,
    /// Positive offer file coupon grammar.
    PositiveOfferCoupon,
    /// IBAN structure and mod-97.
    Iban,
    /// UN/CEFACT freight unit type membership (warning only).
    FreightUnitType,
}

impl From<ValidatorKind> for Check {
    fn from(kind: ValidatorKind) -> Self {
        match kind {
            ValidatorKind::Pattern => Check::Pattern,
            ValidatorKind::FinalChecksum => Check::FinalChecksum,
            ValidatorKind::LeadingChecksum13 => Check::LeadingChecksum13,
            ValidatorKind::LeadingChecksum14 => Check::LeadingChecksum14,
            ValidatorKind::NorthAmericanCoupon => Check::NorthAmericanCoupon,
            ValidatorKind::PositiveOfferCoupon => Check::PositiveOfferCoupon,
            ValidatorKind::Iban => Check::Iban,
            ValidatorKind::FreightUnitType => Check::FreightUnitType,
        }
    }
}

/// Outcome of validating a non-blank value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the value is acceptable. Warnings leave it `true`.
    pub valid: bool,
    /// Diagnostics produced by the pattern and layered checks.
    pub diagnostics: Vec<Diagnostic>,
}

impl Validation {
    fn passed() -> Self {
        Self {
            valid: true,
            diagnostics: Vec::new(),
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity != Severity::Warn {
            self.valid = false;
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Conditions that prevent validation from producing a result at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFault {
    /// The value was empty or blank.
    #[error("no value to validate")]
    NullValue,
    /// Pattern evaluation took at least the configured budget.
    #[error("pattern evaluation exceeded {budget:?}")]
    PatternTimeout {
        /// The budget that was exceeded.
        budget: Duration,
    },
}

/// Immutable metadata and validation rules for one AI code.
#[derive(Debug, Clone)]
pub struct Descriptor {
    data_title: String,
    description: String,
    fixed_width: bool,
    pattern: Option<Regex>,
    check: Check,
}

impl Descriptor {
    /// Build a descriptor, compiling `pattern` with bounded program size.
    ///
    /// # Errors
    /// Returns the regex compiler's error for an invalid pattern.
    pub fn new(
        data_title: impl Into<String>,
        description: impl Into<String>,
        fixed_width: bool,
        pattern: Option<&str>,
        check: Check,
    ) -> Result<Self, regex::Error> {
        let pattern = pattern
            .map(|p| {
                RegexBuilder::new(p)
                    .size_limit(PATTERN_SIZE_LIMIT)
                    .dfa_size_limit(PATTERN_SIZE_LIMIT)
                    .build()
            })
            .transpose()?;
        Ok(Self {
            data_title: data_title.into(),
            description: description.into(),
            fixed_width,
            pattern,
            check,
        })
    }

    pub(crate) fn from_entry(entry: &AiEntry) -> Result<Self, RegistryError> {
        Self::new(
            entry.title.as_str(),
            entry.description.as_str(),
            entry.fixed_width,
            entry.pattern.as_deref(),
            entry.validator.into(),
        )
        .map_err(|e| RegistryError::InvalidPattern {
            code: entry.code,
            reason: e.to_string(),
        })
    }

    /// Short data title.
    pub fn data_title(&self) -> &str {
        &self.data_title
    }

    /// Longer description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether values have a defined length.
    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    /// Source text of the structural pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// The layered check.
    pub fn check(&self) -> Check {
        self.check
    }

    /// Validate `value` against the pattern, then the layered check.
    ///
    /// The layered check runs even when the pattern does not match, so a
    /// value may carry both a pattern and a checksum diagnostic.
    ///
    /// The match itself always runs to completion. Its cost is bounded by
    /// the regex engine's linear-time matching and the compile-time size
    /// limits; the time budget is only compared afterwards, so an overlong
    /// match is reported rather than interrupted.
    ///
    /// # Errors
    /// [`ValidationFault::NullValue`] for a blank value and
    /// [`ValidationFault::PatternTimeout`] when the completed match took at
    /// least `options.match_timeout_ms`.
    pub fn validate(
        &self,
        value: &str,
        options: &ScanOptions,
    ) -> Result<Validation, ValidationFault> {
        if value.trim().is_empty() {
            return Err(ValidationFault::NullValue);
        }
        let mut validation = Validation::passed();

        if let Some(pattern) = &self.pattern {
            let budget = options.match_timeout();
            let started = Instant::now();
            let matched = pattern.is_match(value);
            if started.elapsed() >= budget {
                return Err(ValidationFault::PatternTimeout { budget });
            }
            if !matched {
                validation.push(catalogue_diagnostic(codes::PATTERN_MISMATCH, &[], None));
            }
        }

        match self.check {
            Check::Pattern => {}
            Check::FinalChecksum => {
                if !gs1_checksum_is_valid(value) {
                    validation.push(catalogue_diagnostic(
                        codes::CHECKSUM_FINAL,
                        &[("value", value.to_string())],
                        None,
                    ));
                }
            }
            Check::LeadingChecksum13 => {
                leading_checksum(&mut validation, value, 13, codes::CHECKSUM_POSITION_13);
            }
            Check::LeadingChecksum14 => {
                leading_checksum(&mut validation, value, 14, codes::CHECKSUM_POSITION_14);
            }
            Check::NorthAmericanCoupon => {
                if let Err(reason) = coupon::north_american(value) {
                    validation.push(catalogue_diagnostic(
                        codes::COUPON_NORTH_AMERICA_INVALID,
                        &[("reason", reason)],
                        None,
                    ));
                }
            }
            Check::PositiveOfferCoupon => {
                if let Err(reason) = coupon::positive_offer(value) {
                    validation.push(catalogue_diagnostic(
                        codes::COUPON_POSITIVE_OFFER_INVALID,
                        &[("reason", reason)],
                        None,
                    ));
                }
            }
            Check::Iban => {
                if let Err(diagnostic) = iban::check(value) {
                    validation.push(diagnostic);
                }
            }
            Check::FreightUnitType => {
                if !is_freight_unit_type(value) {
                    validation.push(catalogue_diagnostic(
                        codes::FREIGHT_UNIT_TYPE_UNKNOWN,
                        &[("value", value.to_string())],
                        None,
                    ));
                }
            }
        }
        Ok(validation)
    }
}

/// Check the key in the first `len` characters; shorter values are not
/// assessable yet and pass.
fn leading_checksum(validation: &mut Validation, value: &str, len: usize, code: DiagnosticCode) {
    if value.chars().count() < len {
        return;
    }
    let key: String = value.chars().take(len).collect();
    if !gs1_checksum_is_valid(&key) {
        validation.push(catalogue_diagnostic(code, &[("key", key)], None));
    }
}
