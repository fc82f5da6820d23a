//! Character-level transforms for text content and attribute values.
//!
//! Escaping is deliberately narrow: text escapes only `<` and `>`, attribute
//! values escape only `"`. Ampersands pass through unchanged in both.

use std::borrow::Cow;

/// Entity for `"` inside attribute values.
pub const QUOTE_ENTITY: &str = "&quot;";
/// Entity for `<` inside text content.
pub const LT_ENTITY: &str = "&lt;";
/// Entity for `>` inside text content.
pub const GT_ENTITY: &str = "&gt;";

/// Leading character that marks an attribute name for hyphen encoding.
pub const ATTR_NAME_MARKER: char = '_';

/// Escape text content, replacing `<` and `>` with entities.
///
/// Returns the input unchanged (borrowed) when there is nothing to escape.
///
/// # Examples
///
/// ```
/// use tagtree::escape_text;
///
/// assert_eq!(escape_text("<html>"), "&lt;html&gt;");
/// assert_eq!(escape_text("a & b"), "a & b");
/// ```
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '<' => out.push_str(LT_ENTITY),
            '>' => out.push_str(GT_ENTITY),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Encode an attribute value, replacing every `"` with `&quot;`.
///
/// # Examples
///
/// ```
/// use tagtree::encode_attr_value;
///
/// assert_eq!(encode_attr_value(r#""x""#), "&quot;x&quot;");
/// ```
pub fn encode_attr_value(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', QUOTE_ENTITY))
    } else {
        Cow::Borrowed(value)
    }
}

/// Encode a marker-prefixed attribute name.
///
/// A name starting with [`ATTR_NAME_MARKER`] has that single leading marker
/// stripped and every following marker replaced with a hyphen. Any other name
/// is returned verbatim.
///
/// - `_class` → `class`
/// - `_data_count` → `data-count`
/// - `__test_key` → `-test-key`
/// - `-_test_key` → `-_test_key`
///
/// # Examples
///
/// ```
/// use tagtree::encode_attr_name;
///
/// assert_eq!(encode_attr_name("_data_count"), "data-count");
/// assert_eq!(encode_attr_name("-_test_key"), "-_test_key");
/// ```
pub fn encode_attr_name(raw: &str) -> Cow<'_, str> {
    match raw.strip_prefix(ATTR_NAME_MARKER) {
        Some(rest) => Cow::Owned(rest.replace(ATTR_NAME_MARKER, "-")),
        None => Cow::Borrowed(raw),
    }
}

/// Position of the next character the renderer must treat specially.
///
/// Matches `<`/`>` when `escape` is set and `\n` when `newlines` is set.
pub(crate) fn find_special(text: &str, escape: bool, newlines: bool) -> Option<usize> {
    text.find(|c: char| match c {
        '<' | '>' => escape,
        '\n' => newlines,
        _ => false,
    })
}
