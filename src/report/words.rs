//! Word frequencies for the word cloud

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Common English words left out of the cloud
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "else", "ever", "few", "for", "from", "further", "get", "got", "had", "has",
    "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
    "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "with", "would", "you", "your",
    "yours", "yourself", "yourselves", "www", "http", "com", "r", "k", "s", "t", "d", "ll",
    "m", "re", "ve", "don", "didn", "doesn", "isn", "wasn", "won", "couldn", "wouldn",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// A word and how often it appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    /// Count relative to the most frequent word (0-1]
    pub weight: f64,
}

/// Split text into lowercase word tokens, dropping stop words.
///
/// Possessive `'s` is stripped; other apostrophes split the token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .map(|t| t.strip_suffix("'s").unwrap_or(t))
        .flat_map(|t| t.split('\''))
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()))
        .map(|t| t.to_lowercase())
        .filter(|t| !stop_words().contains(t.as_str()))
        .collect()
}

/// The `max_words` most frequent words, ties broken alphabetically
pub fn word_frequencies<'a, I>(texts: I, max_words: usize) -> Vec<WordFrequency>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_words);

    let top = ranked.first().map(|(_, c)| *c).unwrap_or(1) as f64;
    ranked
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word,
            weight: count as f64 / top,
            count,
        })
        .collect()
}
