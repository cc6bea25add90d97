use super::*;
use proptest::prelude::*;

#[test]
fn test_clean_text_empty() {
    assert_eq!(clean_text(""), "");
    assert_eq!(clean_text("\n\n\n"), "");
}

#[test]
fn test_clean_text_collapses_newline_runs() {
    assert_eq!(clean_text("Rust\n\n\nGo"), "Rust Go");
    assert_eq!(clean_text("Rust\r\n\r\nGo"), "Rust Go");
}

#[test]
fn test_clean_text_strips_punctuation() {
    assert_eq!(
        clean_text("  Skills: C++, Rust (async) & SQL!  "),
        "Skills C, Rust async  SQL"
    );
}

#[test]
fn test_clean_text_keeps_commas_periods_and_underscores() {
    assert_eq!(clean_text("node.js, snake_case."), "node.js, snake_case.");
}

#[test]
fn test_clean_text_keeps_unicode_letters() {
    assert_eq!(clean_text("Café • Zürich"), "Café  Zürich");
}

#[test]
fn test_terms_lowercases_and_splits() {
    let terms: Vec<String> = terms("Python/ML, Data-Science").collect();
    assert_eq!(terms, vec!["python", "ml", "data", "science"]);
}

proptest! {
    #[test]
    fn test_clean_text_only_allowed_chars(text in "\\PC*") {
        let allowed = Regex::new(r"^[\w\s.,]*$").unwrap();
        let cleaned = clean_text(&text);
        prop_assert!(allowed.is_match(&cleaned));
    }

    #[test]
    fn test_clean_text_is_trimmed_and_newline_free(text in "(\\PC|\n)*") {
        let cleaned = clean_text(&text);
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        prop_assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn test_clean_text_idempotent(text in "\\PC*") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once.clone());
    }
}
