//! Core data types shared across the pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single product review as read from the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    pub date: NaiveDate,
    pub rating: i32,
    pub variation: String,
}

/// Discrete sentiment label derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Sign rule: `< 0` Negative, `== 0` Neutral, `> 0` Positive.
    ///
    /// Zero is an exact comparison. NaN never reaches here; scores are
    /// range-checked before labelling.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity < 0.0 {
            Sentiment::Negative
        } else if polarity == 0.0 {
            Sentiment::Neutral
        } else {
            Sentiment::Positive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A review augmented with its sentiment scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    pub review: Review,
    /// 0.0 (factual) to 1.0 (opinion)
    pub subjectivity: f64,
    /// -1.0 (unfavorable) to 1.0 (favorable)
    pub polarity: f64,
    pub sentiment: Sentiment,
}

/// Aggregator input: one polarity observation on a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityPoint {
    pub date: NaiveDate,
    pub polarity: f64,
}

impl From<&ScoredReview> for PolarityPoint {
    fn from(scored: &ScoredReview) -> Self {
        Self {
            date: scored.review.date,
            polarity: scored.polarity,
        }
    }
}

/// Mean polarity for one distinct date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub mean_polarity: f64,
    /// Number of observations averaged
    pub count: usize,
}

/// One entry of a smoothed series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ascending by date, one entry per distinct date
pub type SmoothedSeries = Vec<SmoothedPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_sign_rule() {
        assert_eq!(Sentiment::from_polarity(-0.01), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(1e-12), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_serialization() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"Positive\""
        );
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
    }

    #[test]
    fn test_polarity_point_from_scored() {
        let scored = ScoredReview {
            review: Review {
                text: "Love my Echo!".to_string(),
                date: NaiveDate::from_ymd_opt(2018, 7, 31).unwrap(),
                rating: 5,
                variation: "Charcoal Fabric".to_string(),
            },
            subjectivity: 0.6,
            polarity: 0.625,
            sentiment: Sentiment::Positive,
        };

        let point = PolarityPoint::from(&scored);
        assert_eq!(point.date, scored.review.date);
        assert_eq!(point.polarity, 0.625);
    }
}
