//! Reading element strings from the command line or stdin.
//!
//! The group separator is a control character that cannot be typed on most
//! terminals, so three spellings are accepted in its place: the escape
//! `\x1d`, the token `<GS>`, and a caret `^` (outside the GS1 character set).

use std::io::{self, Read};

use anyhow::{Context, Result};
use gs1_core::GROUP_SEPARATOR;

const GS: &str = "\u{1d}";

/// Visible stand-in used when the input is echoed in rendered reports.
pub(crate) const GS_GLYPH: char = '\u{241d}';

/// Replace every accepted spelling of the group separator with the real one.
pub(crate) fn decode_separators(raw: &str) -> String {
    raw.replace("\\x1d", GS)
        .replace("\\x1D", GS)
        .replace("<GS>", GS)
        .replace("<gs>", GS)
        .replace('^', GS)
}

/// Resolve the `input` argument: `-` reads all of stdin, anything else is the
/// element string itself. One trailing line ending is dropped from stdin.
pub(crate) fn read_input(arg: &str) -> Result<(String, &'static str)> {
    if arg != "-" {
        return Ok((decode_separators(arg), "<input>"));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read element string from stdin")?;
    let trimmed = buf
        .strip_suffix("\r\n")
        .or_else(|| buf.strip_suffix('\n'))
        .unwrap_or(buf.as_str());
    Ok((decode_separators(trimmed), "<stdin>"))
}

/// The input with separators made visible, one char per char so character
/// positions still line up.
pub(crate) fn display_source(input: &str) -> String {
    input
        .chars()
        .map(|c| if c == GROUP_SEPARATOR { GS_GLYPH } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_spellings_decode() {
        assert_eq!(decode_separators("10A^21B"), "10A\u{1d}21B");
        assert_eq!(decode_separators("10A<GS>21B"), "10A\u{1d}21B");
        assert_eq!(decode_separators("10A\\x1d21B\\x1D22C"), "10A\u{1d}21B\u{1d}22C");
        assert_eq!(decode_separators("10A\u{1d}21B"), "10A\u{1d}21B");
    }

    #[test]
    fn plain_input_is_untouched() {
        assert_eq!(decode_separators("0109506000134352"), "0109506000134352");
    }

    #[test]
    fn display_keeps_char_count() {
        let input = "10Ä\u{1d}21B";
        let shown = display_source(input);
        assert_eq!(shown.chars().count(), input.chars().count());
        assert!(shown.contains(GS_GLYPH));
    }
}
