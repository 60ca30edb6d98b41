use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Current format version for the registry JSON schema.
pub const REGISTRY_FORMAT_VERSION: &str = "1.0.0";

/// The built-in registry, embedded at compile time.
const BUILTIN_REGISTRY_JSONC: &str = include_str!("../data/ai_registry.jsonc");

/// Errors that can occur when loading or checking an AI registry table.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// JSON deserialization failed.
    #[error("invalid registry JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The table was written for an incompatible format version.
    #[error("unsupported registry format version {found} (expected {expected})")]
    UnsupportedFormat {
        /// Version declared by the table.
        found: String,
        /// Version this crate reads.
        expected: &'static str,
    },

    /// Two entries share an AI code.
    #[error("duplicate registry entry for AI code {0}")]
    DuplicateCode(u16),

    /// An entry is structurally unusable.
    #[error("invalid entry for AI code {code}: {reason}")]
    InvalidEntry {
        /// The AI code of the offending entry.
        code: u16,
        /// A human-readable explanation.
        reason: String,
    },

    /// An entry's pattern is not a valid regular expression.
    #[error("invalid pattern for AI code {code}: {reason}")]
    InvalidPattern {
        /// The AI code of the offending entry.
        code: u16,
        /// The regex compiler's explanation.
        reason: String,
    },
}

/// Additional algorithmic check layered on top of an entry's pattern.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorKind {
    /// Pattern check only.
    #[default]
    Pattern,
    /// GS1 check digit in the last position of the value.
    FinalChecksum,
    /// GS1 check digit in position 13 (13-digit key plus optional serial).
    LeadingChecksum13,
    /// GS1 check digit in position 14 (14-digit key plus optional component).
    LeadingChecksum14,
    /// North American coupon code grammar (AI 8110).
    NorthAmericanCoupon,
    /// Positive offer file coupon grammar (AI 8112).
    PositiveOfferCoupon,
    /// IBAN structure and mod-97 check (AI 8007).
    Iban,
    /// UN/CEFACT Rec. 21 freight unit type membership (AI 7041).
    FreightUnitType,
}

/// Registry metadata for one numeric AI code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiEntry {
    /// Numeric AI code (e.g. `1` for AI `01`, `310` for AI `310n`).
    pub code: u16,
    /// Short data title printed on human-readable interpretations.
    pub title: String,
    /// Longer description of the data.
    pub description: String,
    /// Whether the value always has a defined length.
    #[serde(default)]
    pub fixed_width: bool,
    /// Structural pattern the whole value must match; absent accepts anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Extra check layered on the pattern.
    #[serde(default)]
    pub validator: ValidatorKind,
}

/// Top-level container for the AI registry.
///
/// Deserialized from JSONC and consumed by the core registry, which compiles
/// the patterns once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRegistryTable {
    /// Table format version for compatibility checks.
    pub format_version: String,
    /// Version of the GS1 General Specifications the content follows.
    #[serde(default)]
    pub gs1_spec_version: Option<String>,
    /// All entries.
    pub entries: Vec<AiEntry>,
}

impl AiRegistryTable {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the structural invariants every loaded table must satisfy.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn check(&self) -> Result<(), RegistryError> {
        if self.format_version != REGISTRY_FORMAT_VERSION {
            return Err(RegistryError::UnsupportedFormat {
                found: self.format_version.clone(),
                expected: REGISTRY_FORMAT_VERSION,
            });
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.code) {
                return Err(RegistryError::DuplicateCode(entry.code));
            }
            if entry.title.trim().is_empty() {
                return Err(RegistryError::InvalidEntry {
                    code: entry.code,
                    reason: "title must not be empty".into(),
                });
            }
            if let Some(p) = &entry.pattern
                && !(p.starts_with('^') && p.ends_with('$'))
            {
                return Err(RegistryError::InvalidEntry {
                    code: entry.code,
                    reason: format!("pattern {p:?} must be anchored with ^ and $"),
                });
            }
        }
        Ok(())
    }
}

/// Load and check a registry table from JSONC text.
///
/// # Errors
/// Returns [`RegistryError`] for malformed JSON or a table that fails
/// [`AiRegistryTable::check`].
pub fn load_registry_table_from_str(jsonc: &str) -> Result<AiRegistryTable, RegistryError> {
    let table: AiRegistryTable = serde_json::from_str(&gs1_jsonc_strip::strip_jsonc(jsonc))?;
    table.check()?;
    Ok(table)
}

static BUILTIN: OnceLock<AiRegistryTable> = OnceLock::new();

/// The registry table shipped with this crate, parsed once per process.
pub fn builtin_registry_table() -> &'static AiRegistryTable {
    BUILTIN.get_or_init(|| {
        load_registry_table_from_str(BUILTIN_REGISTRY_JSONC)
            .unwrap_or_else(|e| panic!("embedded ai_registry.jsonc is invalid: {e}"))
    })
}
