//! Dashboard data
//!
//! Everything a presentation layer needs to draw the review dashboard:
//! rating shares (pie), variation counts (bar), word frequencies (word
//! cloud), sentiment breakdown and the smoothed polarity trend (line).
//! No rendering happens here.

pub mod words;

pub use words::{word_frequencies, WordFrequency};

use crate::aggregate;
use crate::config::AnalysisConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::sentiment::{PolarityScorer, SentimentClassifier};
use crate::types::{PolarityPoint, Review, ScoredReview, Sentiment, SmoothedSeries};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Share of reviews with a given star rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingShare {
    pub rating: i32,
    pub count: usize,
    /// 0-100
    pub percent: f64,
}

/// Number of reviews for a product variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationCount {
    pub variation: String,
    pub count: usize,
}

/// Review counts per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub mean_polarity: f64,
    pub mean_subjectivity: f64,
}

impl SentimentBreakdown {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Rating distribution, most common rating first (ties by rating)
pub fn rating_distribution(reviews: &[Review]) -> Vec<RatingShare> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for review in reviews {
        *counts.entry(review.rating).or_insert(0) += 1;
    }

    let total = reviews.len() as f64;
    let mut shares: Vec<RatingShare> = counts
        .into_iter()
        .map(|(rating, count)| RatingShare {
            rating,
            count,
            percent: count as f64 / total * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then(a.rating.cmp(&b.rating)));
    shares
}

/// Reviews per variation, most common first (ties by name)
pub fn variation_counts(reviews: &[Review]) -> Vec<VariationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for review in reviews {
        *counts.entry(review.variation.as_str()).or_insert(0) += 1;
    }

    let mut result: Vec<VariationCount> = counts
        .into_iter()
        .map(|(variation, count)| VariationCount {
            variation: variation.to_string(),
            count,
        })
        .collect();

    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.variation.cmp(&b.variation)));
    result
}

/// Label counts and mean scores
pub fn sentiment_breakdown(scored: &[ScoredReview]) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown::default();
    if scored.is_empty() {
        return breakdown;
    }

    for s in scored {
        match s.sentiment {
            Sentiment::Positive => breakdown.positive += 1,
            Sentiment::Neutral => breakdown.neutral += 1,
            Sentiment::Negative => breakdown.negative += 1,
        }
    }

    let n = scored.len() as f64;
    breakdown.mean_polarity = scored.iter().map(|s| s.polarity).sum::<f64>() / n;
    breakdown.mean_subjectivity = scored.iter().map(|s| s.subjectivity).sum::<f64>() / n;
    breakdown
}

/// Complete dashboard data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub rows: usize,
    pub columns: usize,
    pub ratings: Vec<RatingShare>,
    pub variations: Vec<VariationCount>,
    pub words: Vec<WordFrequency>,
    pub sentiment: SentimentBreakdown,
    pub window: usize,
    pub trend: SmoothedSeries,
}

impl DashboardReport {
    /// Score every review and derive all dashboard series
    pub fn build<S: PolarityScorer>(
        dataset: &Dataset,
        classifier: &SentimentClassifier<S>,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let (rows, columns) = dataset.shape();
        debug!("Building dashboard report for {} reviews", rows);

        let scored = classifier.classify_all(&dataset.reviews)?;
        let points: Vec<PolarityPoint> = scored.iter().map(PolarityPoint::from).collect();
        let trend = aggregate::aggregate(&points, config.smoothing_window)?;

        let report = Self {
            rows,
            columns,
            ratings: rating_distribution(&dataset.reviews),
            variations: variation_counts(&dataset.reviews),
            words: word_frequencies(
                dataset.reviews.iter().map(|r| r.text.as_str()),
                config.max_words,
            ),
            sentiment: sentiment_breakdown(&scored),
            window: config.smoothing_window,
            trend,
        };

        info!(
            "Report ready: {} dates in trend, {} variations, {} words",
            report.trend.len(),
            report.variations.len(),
            report.words.len()
        );
        Ok(report)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests;
