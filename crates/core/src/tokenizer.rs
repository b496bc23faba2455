//! Word tokenizer used by the classifier's preprocessing.
//!
//! Text is segmented into word and punctuation tokens, contractions are split the way treebank
//! tokenizers split them (`don't` → `do`, `n't`), and every token is case-folded, reduced to its
//! noun lemma and trimmed. The tokenizer is a pure function: nothing is retained between calls.

use regex::Regex;
use std::sync::OnceLock;

/// Words joined by inner hyphens, dots or apostrophes, or a single punctuation character.
const TOKEN_PATTERN: &str = r"\w+(?:['’.\-]\w+)*|[^\w\s]";

/// Clitic suffixes split off after an apostrophe.
const CLITICS: [&str; 6] = ["s", "re", "ve", "ll", "d", "m"];

/// Irregular plural nouns and their lemmas.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
    ("shelves", "shelf"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("thieves", "thief"),
];

/// Words ending in `s` that are already lemmas.
const INVARIANT_NOUNS: &[&str] = &[
    "always", "does", "has", "its", "news", "perhaps", "series", "species", "thanks", "this",
    "was", "whereas", "yes",
];

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Tokenize `text` into normalized word tokens.
///
/// # Examples
/// ```
/// let tokens = dr_core::tokenizer::tokenize("We don't have WATER, floods everywhere!");
/// assert_eq!(tokens, ["we", "do", "n't", "have", "water", ",", "flood", "everywhere", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in token_regex().find_iter(text) {
        for piece in split_contraction(m.as_str()) {
            let lowered = piece.to_lowercase();
            let token = lemmatize(&lowered).trim().to_string();
            if !token.is_empty() {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Split a trailing clitic off a word: `don't` → `do` + `n't`, `it's` → `it` + `'s`.
fn split_contraction(word: &str) -> Vec<String> {
    let normalized = word.replace('’', "'");

    if normalized.len() > 3 {
        let cut = normalized.len() - 3;
        if let (Some(stem), Some(tail)) = (normalized.get(..cut), normalized.get(cut..)) {
            if tail.eq_ignore_ascii_case("n't") && !stem.contains('\'') {
                return vec![stem.to_string(), tail.to_string()];
            }
        }
    }

    if let Some(pos) = normalized.rfind('\'') {
        let suffix = normalized[pos + 1..].to_lowercase();
        if pos > 0 && CLITICS.contains(&suffix.as_str()) {
            return vec![normalized[..pos].to_string(), normalized[pos..].to_string()];
        }
    }

    vec![normalized]
}

/// Reduce a lower-cased word to its noun lemma.
///
/// Tokens that are not purely alphabetic are returned unchanged.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(plural, _)| *plural == word) {
        return (*lemma).to_string();
    }
    if word.chars().count() <= 3
        || !word.chars().all(char::is_alphabetic)
        || INVARIANT_NOUNS.contains(&word)
    {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() > 1 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(
            tokenize("Help needed in Port-au-Prince. Please!"),
            vec!["help", "needed", "in", "port-au-prince", ".", "please", "!"]
        );
    }

    #[test]
    fn splits_contractions() {
        assert_eq!(tokenize("don't"), vec!["do", "n't"]);
        assert_eq!(tokenize("It's"), vec!["it", "'s"]);
        assert_eq!(tokenize("we’re"), vec!["we", "'re"]);
        assert_eq!(tokenize("can't"), vec!["ca", "n't"]);
    }

    #[test]
    fn lemmatizes_plural_nouns() {
        assert_eq!(lemmatize("floods"), "flood");
        assert_eq!(lemmatize("cities"), "city");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("churches"), "church");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("houses"), "house");
    }

    #[test]
    fn leaves_non_plurals_alone() {
        for word in ["news", "virus", "crisis", "glass", "gas", "water", "2010s"] {
            assert_eq!(lemmatize(word), word);
        }
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn tokenize_is_deterministic() {
        let text = "Earthquake victims NEED tents & food supplies";
        assert_eq!(tokenize(text), tokenize(text));
        assert_eq!(
            tokenize(text),
            vec!["earthquake", "victim", "need", "tent", "&", "food", "supply"]
        );
    }
}
