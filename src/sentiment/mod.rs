//! Review Sentiment Classification
//!
//! Turns review text into a polarity score, a subjectivity score and a
//! discrete label. Scoring itself sits behind [`PolarityScorer`] so the
//! lexicon scorer can be swapped for another model or mocked in tests.

pub mod lexicon;


pub use lexicon::{LexiconEntry, LexiconScorer};

use crate::error::{Result, VisentifyError};
use crate::types::{Review, ScoredReview, Sentiment};
use serde::{Deserialize, Serialize};

/// Raw scores produced by a scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Expected in [0.0, 1.0]
    pub subjectivity: f64,
    /// Expected in [-1.0, 1.0]
    pub polarity: f64,
}

impl Scores {
    pub fn neutral() -> Self {
        Self {
            subjectivity: 0.0,
            polarity: 0.0,
        }
    }
}

/// Text scoring capability: `text -> (subjectivity, polarity)`
#[cfg_attr(test, mockall::automock)]
pub trait PolarityScorer {
    /// Score a text. Malformed input is an `InputError`.
    fn score(&self, text: &str) -> Result<Scores>;
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Box<S> {
    fn score(&self, text: &str) -> Result<Scores> {
        (**self).score(text)
    }
}

/// Result of classifying one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub subjectivity: f64,
    pub polarity: f64,
    pub sentiment: Sentiment,
}

impl Classification {
    fn neutral() -> Self {
        Self {
            subjectivity: 0.0,
            polarity: 0.0,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Sentiment classifier over a pluggable scorer
pub struct SentimentClassifier<S = LexiconScorer> {
    scorer: S,
}

impl SentimentClassifier<LexiconScorer> {
    /// Classifier backed by the built-in lexicon
    pub fn new() -> Self {
        Self::with_scorer(LexiconScorer::new())
    }
}

impl Default for SentimentClassifier<LexiconScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Classify a text.
    ///
    /// Empty or whitespace-only text is Neutral with zero scores and never
    /// reaches the scorer.
    pub fn classify(&self, text: &str) -> Result<Classification> {
        if text.trim().is_empty() {
            return Ok(Classification::neutral());
        }

        let scores = self.scorer.score(text)?;
        check_range("subjectivity", scores.subjectivity, 0.0, 1.0)?;
        check_range("polarity", scores.polarity, -1.0, 1.0)?;

        Ok(Classification {
            subjectivity: scores.subjectivity,
            polarity: scores.polarity,
            sentiment: Sentiment::from_polarity(scores.polarity),
        })
    }

    /// Classify a review, returning an augmented copy
    pub fn classify_review(&self, review: &Review) -> Result<ScoredReview> {
        let c = self.classify(&review.text)?;
        Ok(ScoredReview {
            review: review.clone(),
            subjectivity: c.subjectivity,
            polarity: c.polarity,
            sentiment: c.sentiment,
        })
    }

    /// Classify every review in order, stopping at the first failure.
    ///
    /// The error names the index of the offending review.
    pub fn classify_all(&self, reviews: &[Review]) -> Result<Vec<ScoredReview>> {
        reviews
            .iter()
            .enumerate()
            .map(|(i, review)| self.classify_review(review).map_err(|e| e.at_record(i)))
            .collect()
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(VisentifyError::RangeViolation {
            field,
            value,
            min,
            max,
        })
    }
}
