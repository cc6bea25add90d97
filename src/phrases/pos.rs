/// Universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Pos {
    /// Maps a classifier label to a tag.
    ///
    /// Accepts Universal tags (`NOUN`), Penn Treebank tags (`NNS`) and BIO-prefixed
    /// variants (`B-NOUN`). Unknown labels map to [`Pos::X`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        let label = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(label)
            .to_ascii_uppercase();

        match label.as_str() {
            "ADJ" | "JJ" | "JJR" | "JJS" => Pos::Adj,
            "ADP" | "IN" | "TO" => Pos::Adp,
            "ADV" | "RB" | "RBR" | "RBS" | "WRB" => Pos::Adv,
            "AUX" | "MD" => Pos::Aux,
            "CCONJ" | "CONJ" | "CC" => Pos::Cconj,
            "DET" | "DT" | "PDT" | "WDT" => Pos::Det,
            "INTJ" | "UH" => Pos::Intj,
            "NOUN" | "NN" | "NNS" => Pos::Noun,
            "NUM" | "CD" => Pos::Num,
            "PART" | "RP" | "POS" => Pos::Part,
            "PRON" | "PRP" | "PRP$" | "WP" | "WP$" | "EX" => Pos::Pron,
            "PROPN" | "NNP" | "NNPS" => Pos::Propn,
            "PUNCT" | "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => {
                Pos::Punct
            }
            "SCONJ" => Pos::Sconj,
            "SYM" | "$" | "#" => Pos::Sym,
            "VERB" | "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Pos::Verb,
            _ => Pos::X,
        }
    }

    /// Nouns and proper nouns; a chunk always ends on one.
    pub fn is_head(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn)
    }

    /// Tags allowed inside a noun chunk.
    pub fn is_chunk_member(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Num)
    }
}
