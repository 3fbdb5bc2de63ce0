//! Quoted literal unescaping.
//!
//! A backslash escapes the character that follows it, whatever it is:
//! `\\` is a backslash, `\'` and `\"` are quotes, `\n` is the letter `n`.

/// Strip the surrounding quotes of a string token and resolve escapes.
///
/// `text` is the full token slice including both quotes. Input that is too
/// short to hold two quotes unescapes to an empty string.
pub fn unescape_literal(text: &str) -> String {
    let mut chars = text.chars();
    let (Some(_open), Some(_close)) = (chars.next(), chars.next_back()) else {
        return String::new();
    };

    let inner = chars.as_str();
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Is this string token single-quoted (a character literal)?
#[inline]
pub fn is_char_literal(text: &str) -> bool {
    text.starts_with('\'')
}
