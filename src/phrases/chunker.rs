use crate::constants::{MAX_PHRASE_TOKENS, MIN_PHRASE_TOKENS};

use super::PhraseSet;
use super::pos::Pos;

/// A word stripped of surrounding punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWord {
    pub text: String,
    /// Punctuation followed the word, so no chunk may continue past it.
    pub boundary_after: bool,
}

/// A word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub text: String,
    pub pos: Pos,
    pub boundary_after: bool,
}

impl TaggedWord {
    pub fn new(word: &RawWord, pos: Pos) -> Self {
        Self {
            text: word.text.clone(),
            pos,
            boundary_after: word.boundary_after,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#')
}

/// Splits on whitespace and peels punctuation off both ends of every word.
///
/// Interior punctuation is kept (`node.js`, `e-commerce`). Leading or trailing
/// punctuation, and punctuation-only pieces, mark a boundary.
pub fn split_words(text: &str) -> Vec<RawWord> {
    let mut words: Vec<RawWord> = Vec::new();

    for piece in text.split_whitespace() {
        let Some(start) = piece.find(is_word_char) else {
            if let Some(last) = words.last_mut() {
                last.boundary_after = true;
            }
            continue;
        };

        let end = piece
            .char_indices()
            .rev()
            .find(|(_, c)| is_word_char(*c))
            .map_or(piece.len(), |(idx, c)| idx + c.len_utf8());

        if start > 0
            && let Some(last) = words.last_mut()
        {
            last.boundary_after = true;
        }

        words.push(RawWord {
            text: piece[start..end].to_string(),
            boundary_after: end < piece.len(),
        });
    }

    words
}

/// Maximal runs of chunk members, each trimmed right to its last noun.
pub fn noun_chunks(words: &[TaggedWord]) -> Vec<&[TaggedWord]> {
    let mut chunks = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, word) in words.iter().enumerate() {
        if word.pos.is_chunk_member() {
            let start = *run_start.get_or_insert(idx);
            if word.boundary_after {
                push_trimmed(&mut chunks, &words[start..=idx]);
                run_start = None;
            }
        } else if let Some(start) = run_start.take() {
            push_trimmed(&mut chunks, &words[start..idx]);
        }
    }

    if let Some(start) = run_start {
        push_trimmed(&mut chunks, &words[start..]);
    }

    chunks
}

fn push_trimmed<'a>(chunks: &mut Vec<&'a [TaggedWord]>, run: &'a [TaggedWord]) {
    if let Some(head) = run.iter().rposition(|w| w.pos.is_head()) {
        chunks.push(&run[..=head]);
    }
}

/// Adds every chunk and its head-anchored suffixes.
///
/// A chunk longer than `MAX_PHRASE_TOKENS` is dropped whole, suffixes included.
pub fn collect_phrases(words: &[TaggedWord], phrases: &mut PhraseSet) {
    for chunk in noun_chunks(words) {
        if chunk.len() > MAX_PHRASE_TOKENS {
            continue;
        }
        for start in 0..chunk.len() {
            let joined = chunk[start..]
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            let phrase = joined.trim();

            let tokens = phrase.split_whitespace().count();
            if (MIN_PHRASE_TOKENS..=MAX_PHRASE_TOKENS).contains(&tokens) {
                phrases.insert(phrase.to_string());
            }
        }
    }
}
