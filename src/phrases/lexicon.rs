//! Closed-class English lexicon for the reduced (model-free) pipeline.
//!
//! Anything not listed here is tagged as a noun, so the lists favour words that
//! commonly interrupt noun phrases in resumes and job ads.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::pos::Pos;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
    "any", "some", "no", "all", "both", "another", "such", "what", "which", "whatever", "whose",
    "much", "many", "few", "several", "more", "most", "less", "least", "other", "own", "same",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "who",
    "whom", "someone", "anyone", "everyone", "something", "anything", "everything", "nothing",
    "one",
];

const ADPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "amid", "among", "around", "as",
    "at", "before", "behind", "below", "beneath", "beside", "besides", "between", "beyond", "by",
    "despite", "down", "during", "except", "for", "from", "in", "inside", "into", "like", "near",
    "of", "off", "on", "onto", "out", "outside", "over", "past", "per", "since", "than",
    "through", "throughout", "to", "toward", "towards", "under", "until", "up", "upon", "via",
    "with", "within", "without",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "plus"];

const SUBORDINATORS: &[&str] = &[
    "although", "because", "if", "once", "unless", "whereas", "whether", "while", "when",
    "where", "why", "how", "though", "whilst",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const VERBS: &[&str] = &[
    "need", "needs", "needed", "want", "wants", "seek", "seeks", "seeking", "looking", "look",
    "hire", "hiring", "join", "joining", "works", "worked", "working", "builds", "built",
    "develop", "develops", "developed", "designed", "managed", "managing", "create", "created",
    "creating", "used", "using", "ensure", "ensuring", "supporting", "maintain", "maintaining",
    "helping", "make", "making", "get", "got", "provide", "providing", "require", "requires",
    "required", "include", "includes", "including", "driving", "deliver", "delivered",
    "delivering", "improve", "improved", "collaborate", "collaborating", "implement",
    "implemented", "implementing", "apply", "offers", "grow", "know", "write", "writing",
    "wrote", "running", "ran", "take", "took", "owning",
];

const ADVERBS: &[&str] = &[
    "also", "very", "well", "highly", "strongly", "really", "just", "only", "even", "still",
    "already", "always", "never", "often", "usually", "currently", "previously", "then", "there",
    "here", "now", "too", "quite", "rather", "however", "closely", "directly", "effectively",
    "successfully", "independently", "preferably", "ideally",
];

const PARTICLES: &[&str] = &["'s", "not", "n't"];

static LEXICON: LazyLock<HashMap<&'static str, Pos>> = LazyLock::new(|| {
    let classes: [(&[&str], Pos); 9] = [
        (PARTICLES, Pos::Part),
        (ADVERBS, Pos::Adv),
        (VERBS, Pos::Verb),
        (AUXILIARIES, Pos::Aux),
        (SUBORDINATORS, Pos::Sconj),
        (CONJUNCTIONS, Pos::Cconj),
        (ADPOSITIONS, Pos::Adp),
        (PRONOUNS, Pos::Pron),
        (DETERMINERS, Pos::Det),
    ];

    let mut lexicon = HashMap::new();
    for (words, pos) in classes {
        for word in words {
            lexicon.insert(*word, pos);
        }
    }
    lexicon
});

/// Tag of a lower-cased word in the closed-class lexicon.
pub fn lookup(word: &str) -> Option<Pos> {
    LEXICON.get(word).copied()
}

/// Returns `true` for words listed in the lexicon.
pub fn is_function_word(word: &str) -> bool {
    lookup(word).is_some()
}

/// Tags a lower-cased word: lexicon entry, number, or noun.
pub fn tag(word: &str) -> Pos {
    if let Some(pos) = lookup(word) {
        return pos;
    }

    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    if has_digit && word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%')) {
        return Pos::Num;
    }

    Pos::Noun
}
