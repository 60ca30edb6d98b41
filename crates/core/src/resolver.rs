//! Application identifier resolution.
//!
//! The leading two digits of a chunk select a dispatch entry. Each entry is a
//! list of rules saying how many digits make up the full identifier, which
//! values the digits after the leading pair may take, and whether the final
//! identifier digit is an inverse exponent or a sequence number.

use crate::descriptor::ValidationFault;
use crate::diagnostics_util::catalogue_diagnostic;
use crate::field::{AiCode, ResolvedField};
use crate::options::ScanOptions;
use crate::registry::Registry;
use crate::text::split_at_char;
use gs1_diagnostics::codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubDigit {
    None,
    InverseExponent,
    Sequence,
}

/// One identifier shape under a leading pair.
#[derive(Debug, Clone, Copy)]
struct Rule {
    /// Total identifier length in characters.
    len: usize,
    /// Permitted value of the digits between the pair and the sub-digit.
    lo: u16,
    hi: u16,
    sub: SubDigit,
}

impl Rule {
    const fn new(len: usize, lo: u16, hi: u16, sub: SubDigit) -> Self {
        Self { len, lo, hi, sub }
    }

    const fn plain(len: usize, lo: u16, hi: u16) -> Self {
        Self::new(len, lo, hi, SubDigit::None)
    }

    const fn measure(lo: u16, hi: u16) -> Self {
        Self::new(4, lo, hi, SubDigit::InverseExponent)
    }

    /// Digits between the leading pair and the sub-digit.
    const fn extension_len(&self) -> usize {
        match self.sub {
            SubDigit::None => self.len - 2,
            SubDigit::InverseExponent | SubDigit::Sequence => self.len - 3,
        }
    }

    fn code(&self, pair: u16, extension: u16) -> AiCode {
        AiCode::new(pair * 10u16.pow(self.extension_len() as u32) + extension)
    }

    /// Match the identifier digits (`None` = non-digit character).
    fn apply(&self, pair: u16, digits: &[Option<u16>]) -> Option<Identified> {
        let ext_len = self.extension_len();
        let mut extension = 0u16;
        for i in 2..2 + ext_len {
            extension = extension * 10 + digits.get(i).copied().flatten()?;
        }
        if extension < self.lo || extension > self.hi {
            return None;
        }
        let sub = match self.sub {
            SubDigit::None => Sub::None,
            // Present but not a digit: resolved, reported as 2011.
            SubDigit::InverseExponent => {
                Sub::InverseExponent(digits.get(self.len - 1).copied()?.map(|d| d as u8))
            }
            // A malformed sequence digit is part of the identifier range.
            SubDigit::Sequence => Sub::Sequence(digits.get(self.len - 1).copied().flatten()? as u8),
        };
        Some(Identified {
            code: self.code(pair, extension),
            len: self.len,
            sub,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sub {
    None,
    InverseExponent(Option<u8>),
    Sequence(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Identified {
    code: AiCode,
    len: usize,
    sub: Sub,
}

// ── Dispatch table ──────────────────────────────────────────────────────────

const TWO_DIGIT: &[Rule] = &[Rule::plain(2, 0, 0)];
const AI_23: &[Rule] = &[Rule::plain(3, 5, 5)];
const AI_24: &[Rule] = &[Rule::plain(3, 0, 3)];
const AI_25: &[Rule] = &[Rule::plain(3, 0, 1), Rule::plain(3, 3, 5)];
const AI_31: &[Rule] = &[Rule::measure(0, 6)];
const AI_32: &[Rule] = &[Rule::measure(0, 9)];
const AI_33: &[Rule] = &[Rule::measure(0, 7)];
const AI_34: &[Rule] = &[Rule::measure(0, 9)];
const AI_35: &[Rule] = &[Rule::measure(0, 7)];
const AI_36: &[Rule] = &[Rule::measure(0, 9)];
const AI_39: &[Rule] = &[Rule::measure(0, 5)];
const AI_40: &[Rule] = &[Rule::plain(3, 0, 3)];
const AI_41: &[Rule] = &[Rule::plain(3, 0, 7)];
const AI_42: &[Rule] = &[Rule::plain(3, 0, 7)];
const AI_43: &[Rule] = &[Rule::plain(4, 0, 26)];
const AI_70: &[Rule] = &[
    Rule::plain(4, 1, 11),
    Rule::plain(4, 20, 23),
    Rule::new(4, 3, 3, SubDigit::Sequence),
    Rule::plain(4, 40, 41),
];
const AI_71: &[Rule] = &[Rule::plain(3, 0, 6)];
const AI_72: &[Rule] = &[
    Rule::new(4, 3, 3, SubDigit::Sequence),
    Rule::plain(4, 40, 42),
];
const AI_80: &[Rule] = &[
    Rule::plain(4, 1, 14),
    Rule::plain(4, 17, 20),
    Rule::plain(4, 26, 26),
    Rule::plain(4, 30, 30),
];
const AI_81: &[Rule] = &[Rule::plain(4, 10, 12)];
const AI_82: &[Rule] = &[Rule::plain(4, 0, 0)];

fn rules_for(pair: u16) -> Option<&'static [Rule]> {
    Some(match pair {
        0..=3 | 10..=13 | 15..=17 | 20..=22 | 30 | 37 | 90..=99 => TWO_DIGIT,
        23 => AI_23,
        24 => AI_24,
        25 => AI_25,
        31 => AI_31,
        32 => AI_32,
        33 => AI_33,
        34 => AI_34,
        35 => AI_35,
        36 => AI_36,
        39 => AI_39,
        40 => AI_40,
        41 => AI_41,
        42 => AI_42,
        43 => AI_43,
        70 => AI_70,
        71 => AI_71,
        72 => AI_72,
        80 => AI_80,
        81 => AI_81,
        82 => AI_82,
        _ => return None,
    })
}

fn identify(chunk: &str) -> Option<Identified> {
    let digits: Vec<Option<u16>> = chunk
        .chars()
        .take(4)
        .map(|c| c.to_digit(10).map(|d| d as u16))
        .collect();
    let pair = digits.first().copied().flatten()? * 10 + digits.get(1).copied().flatten()?;
    rules_for(pair)?
        .iter()
        .find_map(|rule| rule.apply(pair, &digits))
}

/// Every AI code the resolver can produce, ascending.
pub fn producible_codes() -> Vec<AiCode> {
    let mut codes: Vec<AiCode> = (0u16..100)
        .filter_map(|pair| rules_for(pair).map(|rules| (pair, rules)))
        .flat_map(|(pair, rules)| {
            rules
                .iter()
                .flat_map(move |rule| (rule.lo..=rule.hi).map(move |ext| rule.code(pair, ext)))
        })
        .collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

// ── Resolver ────────────────────────────────────────────────────────────────

/// Turns one field chunk into a [`ResolvedField`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver<'r> {
    registry: &'r Registry,
    options: ScanOptions,
}

impl<'r> Resolver<'r> {
    pub(crate) fn new(registry: &'r Registry, options: ScanOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve `chunk`, whose first character sits at `position` in the
    /// original input. With `truncated` set an empty value is not validated.
    pub(crate) fn resolve(&self, chunk: &str, position: usize, truncated: bool) -> ResolvedField {
        let Some(identified) = identify(chunk) else {
            let (identifier, value) = split_at_char(chunk, 2).unwrap_or((chunk, ""));
            return unrecognised(identifier, value, position);
        };
        let (identifier, value) = split_at_char(chunk, identified.len).unwrap_or((chunk, ""));
        let Some(descriptor) = self.registry.descriptor_for(identified.code) else {
            return unrecognised(identifier, value, position);
        };

        let mut field = ResolvedField::new(identifier, value, position)
            .with_descriptor(identified.code, descriptor);
        match identified.sub {
            Sub::None => {}
            Sub::InverseExponent(exponent) => field = field.with_inverse_exponent(exponent),
            Sub::Sequence(sequence) => field = field.with_sequence(Some(sequence)),
        }

        if !(truncated && value.is_empty()) {
            let ai = || ("ai", identifier.to_string());
            match descriptor.validate(value, &self.options) {
                Ok(validation) => {
                    let valid = validation.valid;
                    for diagnostic in validation.diagnostics {
                        field = field.attach(diagnostic);
                    }
                    if !valid {
                        field = field.attach(catalogue_diagnostic(
                            codes::VALUE_INVALID,
                            &[ai()],
                            None,
                        ));
                    }
                }
                Err(ValidationFault::NullValue) => {
                    field = field.attach(catalogue_diagnostic(codes::NULL_VALUE, &[ai()], None));
                }
                Err(ValidationFault::PatternTimeout { budget }) => {
                    field = field.attach(catalogue_diagnostic(
                        codes::PATTERN_TIMEOUT,
                        &[ai(), ("timeout_ms", budget.as_millis().to_string())],
                        None,
                    ));
                }
            }
        }

        if identified.sub == Sub::InverseExponent(None) {
            field = field.attach(catalogue_diagnostic(
                codes::INVERSE_EXPONENT_INVALID,
                &[("ai", identifier.to_string())],
                Some(identified.len - 1),
            ));
        }
        field
    }
}

fn unrecognised(identifier: &str, value: &str, position: usize) -> ResolvedField {
    ResolvedField::new(identifier, value, position).attach(catalogue_diagnostic(
        codes::UNRECOGNISED_AI,
        &[("ai", identifier.to_string())],
        Some(0),
    ))
}
