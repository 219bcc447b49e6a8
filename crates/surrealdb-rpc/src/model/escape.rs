//! Escaping rules for identifiers and text in query literals.
//!
//! The query grammar reads bare words as identifiers. Text made only of ASCII
//! letters, digits and underscores can appear bare; anything else has to be
//! wrapped in a delimiter pair to survive as a single token.

use std::borrow::Cow;

/// Delimiter pair used to wrap non-simple text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    /// `⟨…⟩`
    #[default]
    Angle,
    /// `` `…` ``
    Backtick,
}

impl Delimiter {
    /// Opening character.
    pub fn open(self) -> char {
        match self {
            Delimiter::Angle => '⟨',
            Delimiter::Backtick => '`',
        }
    }

    /// Closing character.
    pub fn close(self) -> char {
        match self {
            Delimiter::Angle => '⟩',
            Delimiter::Backtick => '`',
        }
    }

    /// Returns the delimiter opened by `c`, if any.
    pub fn from_open(c: char) -> Option<Delimiter> {
        match c {
            '⟨' => Some(Delimiter::Angle),
            '`' => Some(Delimiter::Backtick),
            _ => None,
        }
    }
}

#[inline]
fn is_simple_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if `text` can appear bare. The empty string is simple.
pub fn is_simple(text: &str) -> bool {
    text.chars().all(is_simple_char)
}

/// Returns true if `text` is non-empty and made only of ASCII digits.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `text` is exactly one delimited token.
///
/// Matching outer characters are not enough: `⟨a⟩ OR ⟨b⟩` closes early and
/// `⟨a\⟩` never closes, so neither counts.
pub fn is_delimited(text: &str) -> bool {
    undelimit(text).is_some()
}

/// Wraps `text` in `delimiter`, escaping the closing character and backslashes.
///
/// Always wraps, even simple text. Use [`auto_escape`] to leave simple text bare.
pub fn delimit(text: &str, delimiter: Delimiter) -> String {
    let close = delimiter.close();
    let mut out = String::with_capacity(text.len() + 2 * close.len_utf8());
    out.push(delimiter.open());
    for c in text.chars() {
        if c == close || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(close);
    out
}

/// Removes one delimiter layer from a fully delimited token.
///
/// Returns `None` unless `text` is exactly one delimited token.
pub fn undelimit(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let delimiter = Delimiter::from_open(chars.next()?)?;
    let close = delimiter.close();
    let mut inner = String::with_capacity(text.len());
    while let Some(c) = chars.next() {
        match c {
            '\\' => inner.push(chars.next()?),
            c if c == close => {
                return chars.as_str().is_empty().then_some(inner);
            }
            c => inner.push(c),
        }
    }
    None
}

fn escape_complex(text: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if is_delimited(text) {
        tracing::warn!(
            text,
            "text is already delimited, returning it unchanged; was it escaped twice?"
        );
        return Cow::Borrowed(text);
    }
    Cow::Owned(delimit(text, delimiter))
}

/// Returns simple text unchanged and wraps anything else in `delimiter`.
///
/// Already-delimited input is returned unchanged and a warning is emitted.
///
/// ```rust
/// use surrealdb_rpc::model::escape::{auto_escape, Delimiter};
///
/// assert_eq!(auto_escape("simple_string", Delimiter::Angle), "simple_string");
/// assert_eq!(auto_escape("complex-string", Delimiter::Angle), "⟨complex-string⟩");
/// assert_eq!(auto_escape("complex-string", Delimiter::Backtick), "`complex-string`");
/// ```
pub fn auto_escape(text: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if is_simple(text) {
        Cow::Borrowed(text)
    } else {
        escape_complex(text, delimiter)
    }
}

/// Like [`auto_escape`], but simple text is wrapped in double quotes.
///
/// Used for leaf strings nested inside arrays and objects, where a bare word
/// would read as an identifier.
pub fn auto_quote(text: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if is_simple(text) {
        Cow::Owned(format!("\"{text}\""))
    } else {
        escape_complex(text, delimiter)
    }
}
