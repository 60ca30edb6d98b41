//! Character-indexed string helpers shared by the tokenizer and resolver.

/// ASCII group separator (FNC1 in data), the only field separator.
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// AIM symbology identifiers that scanners may prepend to GS1 payloads.
pub const SYMBOLOGY_IDENTIFIERS: &[&str] = &["]C1", "]e0", "]d2", "]Q3", "]J1"];

/// Split `s` after its first `n` characters. `None` if `s` is shorter.
pub(crate) fn split_at_char(s: &str, n: usize) -> Option<(&str, &str)> {
    match s.char_indices().nth(n) {
        Some((i, _)) => Some(s.split_at(i)),
        None if s.chars().count() == n => Some((s, "")),
        None => None,
    }
}

/// Strip a leading symbology identifier, returning the remainder.
pub(crate) fn strip_symbology_identifier(s: &str) -> Option<&str> {
    SYMBOLOGY_IDENTIFIERS
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
}
