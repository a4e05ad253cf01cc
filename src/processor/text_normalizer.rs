use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};

/// Negation terms exempted from stop-word removal; dropping these
/// flips the meaning of a review.
pub const NEGATIONS: [&str; 4] = ["not", "no", "nor", "never"];

/// High-frequency English words removed before vectorization.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "again", "never",
];

/// Deterministic, stateless text cleaner for review bodies: lower-case,
/// strip tag-shaped substrings, drop non-alphabetic characters, collapse
/// whitespace, remove stop-words (negations exempt), optionally stem.
pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    stemmer: Option<Stemmer>,
    tag_re: Regex,
    non_alpha_re: Regex,
    whitespace_re: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::with_stemming(false)
    }

    pub fn with_stemming(stemming: bool) -> Self {
        let mut stop_words: HashSet<&'static str> = STOP_WORDS.iter().copied().collect();
        for negation in NEGATIONS {
            stop_words.remove(negation);
        }

        TextNormalizer {
            stop_words,
            stemmer: stemming.then(|| Stemmer::create(Algorithm::English)),
            tag_re: Regex::new(r"<[^>]*>").unwrap(),
            non_alpha_re: Regex::new(r"[^a-z\s]").unwrap(),
            whitespace_re: Regex::new(r"\s+").unwrap(),
        }
    }

    pub fn stemming(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Normalize raw text into a space-joined token string.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Normalize raw text into its surviving tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.tag_re.replace_all(&lowered, "");
        let alpha = self.non_alpha_re.replace_all(&stripped, "");
        let collapsed = self.whitespace_re.replace_all(&alpha, " ");

        collapsed
            .trim()
            .split(' ')
            .filter(|token| !token.is_empty() && !self.stop_words.contains(token))
            .map(|token| match &self.stemmer {
                Some(stemmer) => stemmer.stem(token).to_string(),
                None => token.to_string(),
            })
            .collect()
    }

    /// Token counts across a set of texts, most frequent first, capped
    /// at `top_n`. Ties break alphabetically so the output is stable.
    pub fn word_frequencies<'a, I>(&self, texts: I, top_n: usize) -> Vec<(String, usize)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for token in self.tokens(text) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top_n);
        ranked
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
