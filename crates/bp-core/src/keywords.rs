//! Ordered keyword tables and the one matcher that consumes them.
//!
//! Zone classification and hint inference are both "scan a text for the
//! first rule whose keyword list hits". Each table is plain data: a slice of
//! `(value, keywords)` rules in priority order.

/// A single classification rule: produce `value` when any keyword occurs.
pub type Rule<T> = (T, &'static [&'static str]);

/// Return the value of the first rule with a keyword contained in `text`.
///
/// `text` is expected to be lowercase already; keywords are lowercase.
pub fn first_match<T: Copy>(text: &str, table: &[Rule<T>]) -> Option<T> {
    first_match_where(text, table, |_| true)
}

/// Like [`first_match`], but skips rules whose value `accept` rejects.
/// Scanning continues with the next rule.
pub fn first_match_where<T: Copy>(
    text: &str,
    table: &[Rule<T>],
    mut accept: impl FnMut(T) -> bool,
) -> Option<T> {
    table
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(value, _)| *value)
        .find(|value| accept(*value))
}

/// Build the lowercase search text from the given parts, space separated.
pub fn search_text<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let mut text = String::new();
    for part in parts.into_iter().flatten() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&part.to_lowercase());
    }
    text
}
