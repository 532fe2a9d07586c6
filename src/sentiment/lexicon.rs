//! Lexicon-based polarity and subjectivity scoring
//!
//! Pattern-style averaging over opinion words: every word found in the
//! lexicon contributes a (polarity, subjectivity) assessment, adjusted by
//! a preceding intensifier, a nearby negation, and trailing exclamation
//! marks. The text score is the mean of all assessments.

use super::{PolarityScorer, Scores};
use crate::error::{InputError, Result};
use std::collections::HashMap;

/// Polarity damping applied to a negated word (flip and dampen)
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity boost per trailing `!`
const EXCLAMATION_BOOST: f64 = 0.25;

/// At most this many `!` are counted
const MAX_EXCLAMATIONS: usize = 3;

/// How far back a negation reaches
const NEGATION_SCOPE: usize = 3;

/// Characters kept in the snippet of a rejected text
const SNIPPET_LEN: usize = 32;

/// Sentiment of a lexicon word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl LexiconEntry {
    pub const fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }
}

/// Scorer using word, emoticon and emoji lexicons
pub struct LexiconScorer {
    /// Opinion words
    lexicon: HashMap<String, LexiconEntry>,
    /// Multi-character emoticons matched as whole tokens, e.g. `:)`
    emoticons: HashMap<String, f64>,
    /// Single-character emoji matched anywhere in the text
    emoji: HashMap<char, f64>,
    /// Intensity modifiers (very, extremely, etc.)
    intensifiers: HashMap<String, f64>,
    /// Negation words
    negations: Vec<String>,
}

impl LexiconScorer {
    /// Create a scorer with the built-in English review lexicon
    pub fn new() -> Self {
        let mut scorer = Self {
            lexicon: HashMap::new(),
            emoticons: HashMap::new(),
            emoji: HashMap::new(),
            intensifiers: HashMap::new(),
            negations: Vec::new(),
        };
        scorer.init_lexicons();
        scorer
    }

    /// Create a scorer with no words at all; populate with [`Self::insert_word`]
    pub fn empty() -> Self {
        Self {
            lexicon: HashMap::new(),
            emoticons: HashMap::new(),
            emoji: HashMap::new(),
            intensifiers: HashMap::new(),
            negations: Vec::new(),
        }
    }

    fn init_lexicons(&mut self) {
        // (word, polarity, subjectivity)
        let positive_words = [
            ("good", 0.7, 0.6),
            ("great", 0.8, 0.75),
            ("excellent", 1.0, 1.0),
            ("amazing", 0.6, 0.9),
            ("awesome", 1.0, 1.0),
            ("fantastic", 0.4, 0.9),
            ("wonderful", 1.0, 1.0),
            ("perfect", 1.0, 1.0),
            ("best", 1.0, 0.3),
            ("better", 0.5, 0.5),
            ("love", 0.5, 0.6),
            ("loved", 0.7, 0.8),
            ("loves", 0.5, 0.6),
            ("like", 0.2, 0.3),
            ("liked", 0.6, 0.8),
            ("nice", 0.6, 1.0),
            ("happy", 0.8, 1.0),
            ("pleased", 0.5, 1.0),
            ("beautiful", 0.85, 1.0),
            ("cool", 0.35, 0.65),
            ("fun", 0.3, 0.2),
            ("easy", 0.43, 0.83),
            ("simple", 0.2, 0.4),
            ("helpful", 0.5, 0.5),
            ("useful", 0.3, 0.0),
            ("handy", 0.4, 0.5),
            ("convenient", 0.5, 0.6),
            ("clear", 0.1, 0.38),
            ("smart", 0.21, 0.64),
            ("fast", 0.2, 0.6),
            ("quick", 0.33, 0.5),
            ("reliable", 0.5, 0.5),
            ("recommend", 0.2, 0.3),
            ("recommended", 0.2, 0.3),
            ("enjoy", 0.4, 0.5),
            ("enjoyed", 0.4, 0.5),
            ("satisfied", 0.5, 1.0),
            ("impressed", 1.0, 1.0),
            ("impressive", 1.0, 1.0),
            ("incredible", 0.9, 0.9),
            ("outstanding", 0.5, 0.5),
            ("superb", 1.0, 1.0),
            ("brilliant", 0.9, 1.0),
            ("glad", 0.5, 1.0),
            ("thanks", 0.2, 0.2),
            ("worth", 0.3, 0.1),
            ("favorite", 0.5, 1.0),
            ("fine", 0.42, 0.5),
            ("solid", 0.0, 0.1),
            ("sturdy", 0.2, 0.4),
            ("crisp", 0.3, 0.5),
            ("loud", 0.1, 0.4),
            ("works", 0.1, 0.2),
            ("working", 0.1, 0.2),
        ];

        let negative_words = [
            ("bad", -0.7, 0.67),
            ("terrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("poor", -0.4, 0.6),
            ("worst", -1.0, 1.0),
            ("worse", -0.4, 0.6),
            ("hate", -0.8, 0.9),
            ("hated", -0.9, 0.7),
            ("dislike", -0.3, 0.5),
            ("disappointed", -0.75, 0.75),
            ("disappointing", -0.6, 0.7),
            ("disappointment", -0.6, 0.7),
            ("sad", -0.5, 1.0),
            ("ugly", -0.7, 1.0),
            ("annoying", -0.8, 0.9),
            ("annoyed", -0.4, 0.6),
            ("frustrating", -0.4, 0.7),
            ("frustrated", -0.7, 0.4),
            ("useless", -0.5, 0.0),
            ("broken", -0.4, 0.4),
            ("defective", -0.6, 0.6),
            ("junk", -0.5, 0.5),
            ("garbage", -0.5, 0.5),
            ("waste", -0.2, 0.1),
            ("wrong", -0.5, 0.9),
            ("difficult", -0.5, 1.0),
            ("hard", -0.29, 0.54),
            ("slow", -0.3, 0.39),
            ("stupid", -0.8, 1.0),
            ("dumb", -0.38, 0.5),
            ("cheap", -0.2, 0.7),
            ("flimsy", -0.4, 0.6),
            ("unhappy", -0.6, 0.9),
            ("unreliable", -0.5, 0.5),
            ("unusable", -0.5, 0.5),
            ("problem", -0.2, 0.4),
            ("problems", -0.2, 0.4),
            ("issue", -0.1, 0.3),
            ("issues", -0.1, 0.3),
            ("fail", -0.5, 0.4),
            ("failed", -0.5, 0.4),
            ("fails", -0.5, 0.4),
            ("failure", -0.5, 0.4),
            ("return", -0.1, 0.1),
            ("returned", -0.2, 0.2),
            ("returning", -0.2, 0.2),
            ("sucks", -0.3, 0.6),
            ("crap", -0.8, 0.8),
            ("mediocre", -0.3, 0.6),
            ("boring", -1.0, 1.0),
            ("confusing", -0.3, 0.6),
            ("quiet", -0.1, 0.3),
            ("limited", -0.07, 0.14),
        ];

        for (word, polarity, subjectivity) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon
                .insert(word.to_string(), LexiconEntry::new(*polarity, *subjectivity));
        }

        let emoticons = [
            (":)", 0.5),
            (":-)", 0.5),
            (":d", 1.0),
            (":-d", 1.0),
            (";)", 0.5),
            ("<3", 0.8),
            (":(", -0.75),
            (":-(", -0.75),
            (":'(", -0.75),
            (":/", -0.25),
            (":|", 0.0),
        ];

        for (emoticon, polarity) in emoticons {
            self.emoticons.insert(emoticon.to_string(), polarity);
        }

        let emoji = [
            ('😀', 0.8),
            ('😃', 0.8),
            ('😊', 0.7),
            ('😍', 0.9),
            ('🥰', 0.9),
            ('👍', 0.5),
            ('❤', 0.6),
            ('💯', 0.6),
            ('🙂', 0.4),
            ('😐', 0.0),
            ('🙁', -0.4),
            ('😞', -0.6),
            ('😢', -0.6),
            ('😡', -0.8),
            ('😠', -0.7),
            ('👎', -0.5),
            ('💩', -0.6),
        ];

        for (symbol, polarity) in emoji {
            self.emoji.insert(symbol, polarity);
        }

        let intensifiers = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("completely", 1.4),
            ("totally", 1.3),
            ("so", 1.2),
            ("super", 1.3),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("truly", 1.2),
            ("pretty", 1.1),
            ("quite", 1.1),
        ];

        for (word, factor) in intensifiers {
            self.intensifiers.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "none", "neither", "nobody", "nothing", "nowhere", "cannot",
            "without",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();
    }

    /// Add or replace a lexicon word
    pub fn insert_word(&mut self, word: &str, entry: LexiconEntry) {
        self.lexicon.insert(word.to_lowercase(), entry);
    }

    /// Look up a word's lexicon entry
    pub fn entry(&self, word: &str) -> Option<LexiconEntry> {
        self.lexicon.get(&word.to_lowercase()).copied()
    }

    /// Number of words in the lexicon
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Score text, rejecting binary content
    pub fn analyze(&self, text: &str) -> Result<Scores> {
        validate_text(text)?;

        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();

        let mut assessments: Vec<LexiconEntry> = Vec::new();

        for c in text.chars() {
            if let Some(&polarity) = self.emoji.get(&c) {
                assessments.push(LexiconEntry::new(polarity, 1.0));
            }
        }

        for (i, token) in tokens.iter().enumerate() {
            if let Some(&polarity) = self.emoticons.get(*token) {
                assessments.push(LexiconEntry::new(polarity, 1.0));
                continue;
            }

            let word = clean_word(token);
            if let Some(&entry) = self.lexicon.get(&word) {
                let exclamations = token.chars().rev().take_while(|c| *c == '!').count();
                assessments.push(self.apply_modifiers(&tokens, i, entry, exclamations));
            }
        }

        if assessments.is_empty() {
            return Ok(Scores::neutral());
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|a| a.polarity).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|a| a.subjectivity).sum::<f64>() / n;

        Ok(Scores {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        })
    }

    /// Apply intensifier, negation and exclamation to a word's entry
    fn apply_modifiers(
        &self,
        tokens: &[&str],
        index: usize,
        entry: LexiconEntry,
        exclamations: usize,
    ) -> LexiconEntry {
        let mut polarity = entry.polarity;
        let mut subjectivity = entry.subjectivity;

        // Only the word directly before intensifies
        if index > 0 {
            let prev = clean_word(tokens[index - 1]);
            if let Some(&factor) = self.intensifiers.get(&prev) {
                polarity *= factor;
                subjectivity *= factor;
            }
        }

        let start = index.saturating_sub(NEGATION_SCOPE);
        let negated = tokens[start..index]
            .iter()
            .map(|t| clean_word(t))
            .any(|w| self.is_negation(&w));
        if negated {
            polarity *= NEGATION_FACTOR;
        }

        if exclamations > 0 {
            polarity *= 1.0 + EXCLAMATION_BOOST * exclamations.min(MAX_EXCLAMATIONS) as f64;
        }

        LexiconEntry::new(polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0))
    }

    fn is_negation(&self, word: &str) -> bool {
        word.ends_with("n't") || self.negations.iter().any(|n| n == word)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<Scores> {
        self.analyze(text)
    }
}

/// Strip punctuation around a word, keeping apostrophes and hyphens
fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

/// Reject control characters other than whitespace (binary content)
fn validate_text(text: &str) -> std::result::Result<(), InputError> {
    if let Some(bad) = text.chars().find(|c| c.is_control() && !c.is_whitespace()) {
        let snippet: String = text.chars().take(SNIPPET_LEN).collect();
        return Err(InputError::InvalidText {
            reason: format!("binary content (control character {:?})", bad),
            snippet: snippet.escape_debug().to_string(),
        });
    }
    Ok(())
}
