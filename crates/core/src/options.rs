//! Scan options and their loader.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default pattern-evaluation budget in milliseconds.
pub const DEFAULT_MATCH_TIMEOUT_MS: u64 = 250;

/// Upper bound accepted for `match_timeout_ms`.
pub const MAX_MATCH_TIMEOUT_MS: u64 = 60_000;

/// Errors that can occur when loading scan options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// JSON deserialization failed.
    #[error("invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: &'static str,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Options controlling a single scan.
///
/// # Example
/// ```
/// let options = gs1_core::ScanOptions {
///     strip_symbology_identifier: true,
///     ..Default::default()
/// };
/// assert_eq!(options.match_timeout_ms, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Time budget for one pattern evaluation. A match that took at least
    /// this long reports `PATTERN_TIMEOUT` on the field instead of a
    /// validation result. The match is measured, not interrupted.
    pub match_timeout_ms: u64,
    /// Skip a leading AIM symbology identifier (`]C1`, `]e0`, `]d2`, `]Q3`,
    /// `]J1`) before scanning. Character positions stay relative to the
    /// original input.
    pub strip_symbology_identifier: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            match_timeout_ms: DEFAULT_MATCH_TIMEOUT_MS,
            strip_symbology_identifier: false,
        }
    }
}

impl ScanOptions {
    /// The pattern-evaluation budget as a [`Duration`].
    pub fn match_timeout(&self) -> Duration {
        Duration::from_millis(self.match_timeout_ms)
    }
}

/// Load scan options from a JSON string. Missing fields take their defaults.
///
/// # Errors
/// Returns [`OptionsError`] for malformed JSON, unknown fields or a timeout
/// above [`MAX_MATCH_TIMEOUT_MS`].
pub fn load_options_from_str(s: &str) -> Result<ScanOptions, OptionsError> {
    let options: ScanOptions = serde_json::from_str(s)?;
    if options.match_timeout_ms > MAX_MATCH_TIMEOUT_MS {
        return Err(OptionsError::InvalidField {
            field: "match_timeout_ms",
            reason: format!(
                "{} exceeds the maximum of {MAX_MATCH_TIMEOUT_MS}",
                options.match_timeout_ms
            ),
        });
    }
    Ok(options)
}
