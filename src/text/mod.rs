//! Text normalization for extracted resume text.

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use regex::Regex;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r?\n)+").expect("newline pattern is valid")
});

static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s.,]").expect("character-class pattern is valid")
});

/// Collapses newline runs into a single space, drops every character that is not
/// a word character, whitespace, comma or period, and trims the result.
pub fn clean_text(text: &str) -> String {
    let joined = NEWLINE_RUNS.replace_all(text, " ");
    let stripped = DISALLOWED_CHARS.replace_all(&joined, "");
    stripped.trim().to_string()
}

/// Splits text into lower-cased alphanumeric terms.
pub(crate) fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}
