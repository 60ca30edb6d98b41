//! The element string splitter.
//!
//! Walks the input left to right, carving it into field chunks. A chunk whose
//! leading two digits appear in the predefined fixed-length table takes that
//! many characters; any other chunk runs to the next group separator. Each
//! chunk is handed to the resolver and the resulting field to the sink.
//!
//! Only three conditions stop the scan early: no data, a group separator
//! inside a fixed-length chunk, and a fixed-length chunk cut short by the end
//! of input. Fatal diagnostics on a field never stop it by themselves.

use crate::diagnostics_util::catalogue_diagnostic;
use crate::field::ResolvedField;
use crate::options::ScanOptions;
use crate::registry::Registry;
use crate::resolver::Resolver;
use crate::text::{GROUP_SEPARATOR, split_at_char, strip_symbology_identifier};
use gs1_diagnostics::codes;
use tracing::{debug, trace};

/// Predefined total chunk length (identifier included) by leading pair.
///
/// These lengths hold regardless of whether the pair resolves to a known AI.
pub fn predefined_length(first_two: &str) -> Option<usize> {
    Some(match first_two {
        "00" => 20,
        "01" | "02" | "03" => 16,
        "04" => 18,
        "11" | "12" | "13" | "14" | "15" | "16" | "17" | "18" | "19" => 8,
        "20" => 4,
        "31" | "32" | "33" | "34" | "35" | "36" => 10,
        "41" => 16,
        _ => return None,
    })
}

// ─── Scan State Machine ─────────────────────────────────────────────────────

enum State {
    /// At a field boundary.
    Start,
    /// Inside a field of predefined total length.
    FixedWidthField(usize),
    /// Inside a separator-terminated field.
    VariableWidthField,
    /// Input exhausted.
    Done,
    /// Stopped by a structural condition.
    Aborted,
}

/// A configured scanner over a borrowed registry.
///
/// ```
/// use gs1_core::{Parser, Registry};
///
/// let parser = Parser::new(Registry::builtin());
/// let fields = parser.parse_to_vec(Some("0109506000134352\u{1d}10ABC123"));
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].identifier(), "10");
/// assert_eq!(fields[1].value(), "ABC123");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
    options: ScanOptions,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}

impl<'r> Parser<'r> {
    /// A parser using `registry` and default options.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: ScanOptions::default(),
        }
    }

    /// Replace the scan options.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// The scan options in effect.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `input`, calling `sink` once per field in left-to-right order.
    pub fn parse(&self, input: Option<&str>, mut sink: impl FnMut(ResolvedField)) {
        let resolver = Resolver::new(self.registry, self.options);
        let mut rest = input.unwrap_or("");
        let mut position = 0usize;
        if self.options.strip_symbology_identifier
            && let Some(stripped) = strip_symbology_identifier(rest)
        {
            rest = stripped;
            position = 3;
        }

        if rest.chars().all(|c| c != GROUP_SEPARATOR && c.is_whitespace()) {
            debug!(position = 0, reason = "no data", "scan aborted");
            sink(ResolvedField::new("", "", 0).attach(catalogue_diagnostic(
                codes::NO_DATA,
                &[],
                None,
            )));
            return;
        }

        let mut emit = |field: ResolvedField| {
            trace!(
                position = field.character_position(),
                ai = field.identifier(),
                diagnostics = field.diagnostics().len(),
                "resolved field"
            );
            sink(field);
        };

        let mut state = State::Start;
        loop {
            state = match state {
                State::Start => {
                    if rest.is_empty() {
                        State::Done
                    } else {
                        let first_two = split_at_char(rest, 2).map_or(rest, |(head, _)| head);
                        match predefined_length(first_two) {
                            Some(len) => State::FixedWidthField(len),
                            None => State::VariableWidthField,
                        }
                    }
                }
                State::FixedWidthField(len) => match split_at_char(rest, len) {
                    Some((chunk, tail)) => {
                        if let Some(offset) = chunk.chars().position(|c| c == GROUP_SEPARATOR) {
                            let field = resolver.resolve(chunk, position, false);
                            let ai = field.identifier().to_string();
                            emit(field.attach(catalogue_diagnostic(
                                codes::EMBEDDED_SEPARATOR,
                                &[("ai", ai)],
                                Some(offset),
                            )));
                            debug!(position, reason = "embedded separator", "scan aborted");
                            State::Aborted
                        } else {
                            emit(resolver.resolve(chunk, position, false));
                            position += len;
                            rest = tail;
                            if let Some(after) = rest.strip_prefix(GROUP_SEPARATOR) {
                                rest = after;
                                position += 1;
                            }
                            State::Start
                        }
                    }
                    None => {
                        let actual = rest.chars().count();
                        let field = resolver.resolve(rest, position, true);
                        let ai = field.identifier().to_string();
                        emit(field.attach(catalogue_diagnostic(
                            codes::INSUFFICIENT_LENGTH,
                            &[
                                ("ai", ai),
                                ("expected", len.to_string()),
                                ("actual", actual.to_string()),
                            ],
                            Some(actual),
                        )));
                        debug!(position, reason = "insufficient length", "scan aborted");
                        State::Aborted
                    }
                },
                State::VariableWidthField => match rest.split_once(GROUP_SEPARATOR) {
                    Some((chunk, tail)) => {
                        emit(resolver.resolve(chunk, position, false));
                        position += chunk.chars().count() + 1;
                        rest = tail;
                        State::Start
                    }
                    None => {
                        emit(resolver.resolve(rest, position, false));
                        State::Done
                    }
                },
                State::Done => {
                    debug!(position, "scan complete");
                    break;
                }
                State::Aborted => break,
            };
        }
    }

    /// Scan `input` and collect every field.
    pub fn parse_to_vec(&self, input: Option<&str>) -> Vec<ResolvedField> {
        let mut fields = Vec::new();
        self.parse(input, |field| fields.push(field));
        fields
    }
}

/// Scan `input` with the built-in registry and default options.
pub fn parse(input: Option<&str>, sink: impl FnMut(ResolvedField)) {
    Parser::default().parse(input, sink);
}

/// Scan `input` with the built-in registry and default options, collecting
/// every field.
pub fn parse_to_vec(input: Option<&str>) -> Vec<ResolvedField> {
    Parser::default().parse_to_vec(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_lengths() {
        assert_eq!(predefined_length("00"), Some(20));
        assert_eq!(predefined_length("04"), Some(18));
        assert_eq!(predefined_length("19"), Some(8));
        assert_eq!(predefined_length("36"), Some(10));
        assert_eq!(predefined_length("41"), Some(16));
        assert_eq!(predefined_length("10"), None);
        assert_eq!(predefined_length("37"), None);
        assert_eq!(predefined_length("1"), None);
    }

    #[test]
    fn positions_count_separators() {
        let fields = parse_to_vec(Some("10AB\u{1d}21XYZ\u{1d}17251231"));
        let positions: Vec<usize> = fields.iter().map(|f| f.character_position()).collect();
        assert_eq!(positions, vec![0, 5, 11]);
    }

    #[test]
    fn embedded_separator_offset_is_chunk_relative() {
        let fields = parse_to_vec(Some("01095060\u{1d}0134352"));
        assert_eq!(fields.len(), 1);
        let d = fields[0].diagnostics().last().expect("diagnostic");
        assert_eq!(d.number(), 2003);
        assert_eq!(d.offset, Some(8));
    }

    #[test]
    fn separators_at_field_boundaries_delimit_empty_chunks() {
        let fields = parse_to_vec(Some("\u{1d}10AB\u{1d}\u{1d}21X"));
        let positions: Vec<usize> = fields.iter().map(|f| f.character_position()).collect();
        assert_eq!(positions, vec![0, 1, 6, 7]);
        assert_eq!(fields[0].identifier(), "");
        assert_eq!(fields[0].diagnostics()[0].number(), 2002);
        assert_eq!(fields[2].value(), "");
        assert_eq!(fields[2].diagnostics()[0].number(), 2002);
    }

    #[test]
    fn lone_separator_is_data() {
        let fields = parse_to_vec(Some("\u{1d}"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].diagnostics()[0].number(), 2002);
    }

    #[test]
    fn stop_conditions_match_the_catalogue_policy() {
        use gs1_diagnostics::policy::SCAN_TERMINATING;

        let mut stopped_by: Vec<u16> = [
            "",
            "01095060\u{1d}0134352\u{1d}10AB",
            "0112345",
        ]
        .into_iter()
        .map(|input| {
            let fields = parse_to_vec(Some(input));
            assert_eq!(fields.len(), 1, "{input:?}");
            fields[0].diagnostics().last().expect("diagnostic").number()
        })
        .collect();
        stopped_by.sort_unstable();
        let mut policy: Vec<u16> = SCAN_TERMINATING.iter().map(|c| c.number()).collect();
        policy.sort_unstable();
        assert_eq!(stopped_by, policy);

        // A fatal code outside the policy does not stop the scan.
        assert!(!SCAN_TERMINATING.contains(&codes::UNRECOGNISED_AI));
        assert_eq!(parse_to_vec(Some("38X\u{1d}10AB")).len(), 2);
    }

    #[test]
    fn symbology_identifier_is_optional() {
        let options = ScanOptions {
            strip_symbology_identifier: true,
            ..Default::default()
        };
        let parser = Parser::default().with_options(options);
        let fields = parser.parse_to_vec(Some("]C10109506000134352"));
        assert_eq!(fields.len(), 1);
        assert!(!fields[0].is_error());
        assert_eq!(fields[0].character_position(), 3);

        let fields = parser.parse_to_vec(Some("]C1"));
        assert_eq!(fields[0].diagnostics()[0].number(), 2001);

        // Without the option the identifier is data.
        let fields = parse_to_vec(Some("]C10109506000134352"));
        assert!(fields[0].is_fatal());
    }
}
