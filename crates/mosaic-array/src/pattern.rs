//! Delimited regular expressions.
//!
//! Patterns are written as `<delimiter>body<delimiter>modifiers`, for
//! example `/^.*s$/` or `#user_\d+#i`. The delimiter is any ASCII character
//! that is not alphanumeric, a backslash or whitespace. If the opening
//! delimiter is `(`, `[`, `{` or `<`, the closing one is its partner, and
//! nested pairs inside the body are balanced.
//!
//! | Modifier | Effect |
//! |----------|--------|
//! | `i` | case-insensitive |
//! | `m` | `^`/`$` match at line boundaries |
//! | `s` | `.` matches newlines |
//! | `x` | whitespace and `#` comments ignored |
//! | `U` | greediness swapped |
//! | `A` | anchored at the start of the subject |
//! | `u` | accepted; matching is always Unicode-aware |
//! | `D` | accepted; `$` only ever matches at the very end |

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{MosaicError, Result};

bitflags::bitflags! {
    /// Modifiers parsed from the end of a delimited pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const NONE           = 0;
        const CASELESS       = 1 << 0;
        const MULTILINE      = 1 << 1;
        const DOTALL         = 1 << 2;
        const EXTENDED       = 1 << 3;
        const UNGREEDY       = 1 << 4;
        const UTF8           = 1 << 5;
        const ANCHORED       = 1 << 6;
        const DOLLAR_ENDONLY = 1 << 7;
    }
}

impl Modifiers {
    fn from_char(c: char) -> Option<Self> {
        let flag = match c {
            'i' => Modifiers::CASELESS,
            'm' => Modifiers::MULTILINE,
            's' => Modifiers::DOTALL,
            'x' => Modifiers::EXTENDED,
            'U' => Modifiers::UNGREEDY,
            'u' => Modifiers::UTF8,
            'A' => Modifiers::ANCHORED,
            'D' => Modifiers::DOLLAR_ENDONLY,
            _ => return None,
        };
        Some(flag)
    }
}

bitflags::bitflags! {
    /// Options for [`preg_keys`](crate::Container::preg_keys) and
    /// [`preg_values`](crate::Container::preg_values).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GrepFlags: u32 {
        const NONE   = 0;
        /// Select the entries that do *not* match.
        const INVERT = 1 << 0;
    }
}

impl Default for GrepFlags {
    fn default() -> Self {
        GrepFlags::NONE
    }
}

/// A compiled delimited pattern.
///
/// # Example
///
/// ```
/// use mosaic_array::{GrepFlags, Pattern};
///
/// let pattern = Pattern::parse("/^user_\\d+$/i").unwrap();
/// assert!(pattern.is_match("USER_42"));
/// assert!(pattern.selects("guest", GrepFlags::INVERT));
/// assert!(Pattern::parse("no delimiters").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    modifiers: Modifiers,
    regex: Regex,
}

impl Pattern {
    /// Parses and compiles a delimited pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim_start();
        let invalid = || MosaicError::InvalidDelimiter {
            pattern: pattern.to_string(),
        };

        let delimiter = trimmed.chars().next().ok_or_else(invalid)?;
        if !delimiter.is_ascii() || delimiter.is_ascii_alphanumeric() || delimiter == '\\' {
            return Err(invalid());
        }
        let closing = match delimiter {
            '(' => ')',
            '[' => ']',
            '{' => '}',
            '<' => '>',
            d => d,
        };

        let rest = &trimmed[delimiter.len_utf8()..];
        let end = find_closing(rest, delimiter, closing).ok_or_else(|| {
            MosaicError::MissingEndDelimiter {
                pattern: pattern.to_string(),
                delimiter: closing,
            }
        })?;
        let body = &rest[..end];

        let mut modifiers = Modifiers::NONE;
        for c in rest[end + closing.len_utf8()..].chars() {
            if c.is_whitespace() {
                continue;
            }
            modifiers |= Modifiers::from_char(c).ok_or(MosaicError::UnknownModifier(c))?;
        }

        let extended = modifiers.contains(Modifiers::EXTENDED);
        let expr = match (modifiers.contains(Modifiers::ANCHORED), extended) {
            // Newline keeps a trailing `#` comment from swallowing the `)`.
            (true, true) => format!("\\A(?:{body}\n)"),
            (true, false) => format!("\\A(?:{body})"),
            (false, _) => body.to_string(),
        };
        let regex = RegexBuilder::new(&expr)
            .case_insensitive(modifiers.contains(Modifiers::CASELESS))
            .multi_line(modifiers.contains(Modifiers::MULTILINE))
            .dot_matches_new_line(modifiers.contains(Modifiers::DOTALL))
            .ignore_whitespace(extended)
            .swap_greed(modifiers.contains(Modifiers::UNGREEDY))
            .build()?;

        debug!(pattern, ?modifiers, "compiled pattern");

        Ok(Pattern {
            source: pattern.to_string(),
            modifiers,
            regex,
        })
    }

    /// Returns the pattern as written, delimiters included.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns `true` if `text` is selected under `flags`: a match normally,
    /// a non-match with [`GrepFlags::INVERT`].
    pub fn selects(&self, text: &str, flags: GrepFlags) -> bool {
        self.is_match(text) != flags.contains(GrepFlags::INVERT)
    }
}

/// Byte offset of the closing delimiter in `rest`, skipping escaped
/// characters and balancing nested bracket pairs.
fn find_closing(rest: &str, opening: char, closing: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;

    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == closing {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        } else if c == opening {
            depth += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_delimited_pattern() {
        let p = Pattern::parse("/^.*s$/").unwrap();
        assert!(p.is_match("numbers"));
        assert!(!p.is_match("number"));
        assert_eq!(p.modifiers(), Modifiers::NONE);
        assert_eq!(p.as_str(), "/^.*s$/");
    }

    #[test]
    fn alternative_delimiters() {
        assert!(Pattern::parse("#a/b#").unwrap().is_match("a/b"));
        assert!(Pattern::parse("~^x~").unwrap().is_match("xy"));
        assert!(Pattern::parse("{^\\d{2}$}").unwrap().is_match("42"));
        assert!(Pattern::parse("(a(b)c)").unwrap().is_match("abc"));
        assert!(Pattern::parse("[a[0-9]]").unwrap().is_match("a5"));
        assert!(Pattern::parse("  /lead/").unwrap().is_match("leading"));
    }

    #[test]
    fn escaped_delimiter_does_not_close() {
        let p = Pattern::parse(r"/a\/b/").unwrap();
        assert!(p.is_match("a/b"));
    }

    #[test]
    fn modifiers_are_applied() {
        let p = Pattern::parse("/value/i").unwrap();
        assert!(p.modifiers().contains(Modifiers::CASELESS));
        assert!(p.is_match("VALUE"));

        let p = Pattern::parse("/^b/m").unwrap();
        assert!(p.is_match("a\nb"));

        let p = Pattern::parse("/a.b/s").unwrap();
        assert!(p.is_match("a\nb"));

        let p = Pattern::parse("/a b c/x").unwrap();
        assert!(p.is_match("abc"));

        let p = Pattern::parse("/a+/U").unwrap();
        assert_eq!(p.regex().find("aaa").map(|m| m.as_str()), Some("a"));

        let p = Pattern::parse("/b/A").unwrap();
        assert!(p.is_match("bc"));
        assert!(!p.is_match("abc"));

        let p = Pattern::parse("/x/uD\n").unwrap();
        assert!(p.modifiers().contains(Modifiers::UTF8 | Modifiers::DOLLAR_ENDONLY));
    }

    #[test]
    fn invalid_delimiters() {
        for input in ["", "   ", "abc", "5abc5", "\\a\\"] {
            assert!(
                matches!(
                    Pattern::parse(input),
                    Err(MosaicError::InvalidDelimiter { .. })
                ),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn missing_end_delimiter() {
        let err = Pattern::parse("/abc").unwrap_err();
        assert!(matches!(
            err,
            MosaicError::MissingEndDelimiter { delimiter: '/', .. }
        ));

        let err = Pattern::parse("(a(b)").unwrap_err();
        assert!(matches!(
            err,
            MosaicError::MissingEndDelimiter { delimiter: ')', .. }
        ));
    }

    #[test]
    fn unknown_modifier() {
        assert!(matches!(
            Pattern::parse("/abc/q"),
            Err(MosaicError::UnknownModifier('q'))
        ));
    }

    #[test]
    fn malformed_body_is_a_regex_error() {
        assert!(matches!(
            Pattern::parse("/(unclosed/"),
            Err(MosaicError::Regex(_))
        ));
    }

    #[test]
    fn grep_flags_select() {
        let p = Pattern::parse("/o/").unwrap();
        assert!(p.selects("World", GrepFlags::NONE));
        assert!(!p.selects("VALUE", GrepFlags::NONE));
        assert!(p.selects("VALUE", GrepFlags::INVERT));
        assert_eq!(GrepFlags::default(), GrepFlags::NONE);
    }
}
