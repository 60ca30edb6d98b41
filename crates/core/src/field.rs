//! The resolved-field record delivered to scan sinks.

use crate::descriptor::Descriptor;
use gs1_diagnostics::Diagnostic;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Numeric application identifier code.
///
/// One code may print as an identifier of 2, 3 or 4 digits: code `1` is AI
/// `01`, code `310` covers AIs `3100`–`3109` (the last digit being the
/// inverse exponent), code `703` covers `7030`–`7039` (sequence digit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AiCode(u16);

impl AiCode {
    /// Wrap a numeric code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The numeric code.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for AiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One AI/value field carved out of an element string.
///
/// Fields are immutable once built; [`attach`](Self::attach) returns a new
/// field with one more diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    entity: Option<AiCode>,
    identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    inverse_exponent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<u8>,
    value: String,
    fixed_width: bool,
    data_title: String,
    description: String,
    character_position: usize,
    diagnostics: Vec<Diagnostic>,
}

impl ResolvedField {
    /// An unrecognised field at `character_position` with no diagnostics yet.
    pub(crate) fn new(
        identifier: impl Into<String>,
        value: impl Into<String>,
        character_position: usize,
    ) -> Self {
        Self {
            entity: None,
            identifier: identifier.into(),
            inverse_exponent: None,
            sequence: None,
            value: value.into(),
            fixed_width: false,
            data_title: String::new(),
            description: String::new(),
            character_position,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn with_descriptor(mut self, code: AiCode, descriptor: &Descriptor) -> Self {
        self.entity = Some(code);
        self.fixed_width = descriptor.is_fixed_width();
        self.data_title = descriptor.data_title().to_string();
        self.description = descriptor.description().to_string();
        self
    }

    pub(crate) fn with_inverse_exponent(mut self, inverse_exponent: Option<u8>) -> Self {
        self.inverse_exponent = inverse_exponent;
        self
    }

    pub(crate) fn with_sequence(mut self, sequence: Option<u8>) -> Self {
        self.sequence = sequence;
        self
    }

    /// Return this field with `diagnostic` appended.
    #[must_use]
    pub fn attach(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// The resolved AI code, `None` when unrecognised.
    pub fn entity(&self) -> Option<AiCode> {
        self.entity
    }

    /// The AI code as an integer, `-1` when unrecognised.
    pub fn entity_number(&self) -> i32 {
        self.entity.map_or(-1, |c| i32::from(c.get()))
    }

    /// The printable identifier (e.g. `"01"`, `"3102"`).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Implied decimal point position for measure and amount AIs.
    pub fn inverse_exponent(&self) -> Option<u8> {
        self.inverse_exponent
    }

    /// Sequence digit for repeating AIs (`703s`, `723s`).
    pub fn sequence(&self) -> Option<u8> {
        self.sequence
    }

    /// The raw value following the identifier.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the AI has a defined value length.
    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    /// Short data title (empty when unrecognised).
    pub fn data_title(&self) -> &str {
        &self.data_title
    }

    /// Longer description (empty when unrecognised).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// 0-based character offset of the identifier in the original input.
    pub fn character_position(&self) -> usize {
        self.character_position
    }

    /// Diagnostics in the order they were attached.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any diagnostic is attached.
    pub fn is_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Whether any attached diagnostic is fatal.
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// The value with its implied decimal point applied.
    ///
    /// `Some` only for fields carrying an inverse exponent whose value is all
    /// digits, e.g. AI `3102` with value `001250` gives `12.50`.
    pub fn decimal_value(&self) -> Option<Decimal> {
        let scale = self.inverse_exponent?;
        if self.value.is_empty() || !self.value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mantissa: i128 = self.value.parse().ok()?;
        Decimal::try_from_i128_with_scale(mantissa, u32::from(scale)).ok()
    }
}
