//! JSONC preprocessing for the hand-authored GS1 data files.
//!
//! Turns JSONC into plain JSON that `serde_json` accepts:
//! - `//` line comments and `/* ... */` block comments are removed
//! - a trailing comma before `}` or `]` is removed
//! - string literals (including escaped quotes) pass through untouched

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Strip comments and trailing commas from JSONC input.
///
/// Newlines inside line comments are kept so that `serde_json` error
/// positions still point at the right line of the original file.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // A comma waiting to see whether the next significant char closes a container.
    let mut pending_comma: Option<usize> = None;
    let mut state = State::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Str => {
                out.push(c);
                match c {
                    '\\' => state = State::StrEscape,
                    '"' => state = State::Code,
                    _ => {}
                }
            }
            State::StrEscape => {
                out.push(c);
                state = State::Str;
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                c if c.is_whitespace() => out.push(c),
                '}' | ']' => {
                    if let Some(at) = pending_comma.take() {
                        out.replace_range(at..=at, " ");
                    }
                    out.push(c);
                }
                ',' => {
                    pending_comma = Some(out.len());
                    out.push(',');
                }
                '"' => {
                    pending_comma = None;
                    out.push(c);
                    state = State::Str;
                }
                _ => {
                    pending_comma = None;
                    out.push(c);
                }
            },
        }
    }
    out
}
