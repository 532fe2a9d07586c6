//! Visentify: Review Sentiment Pipeline
//!
//! Scores product reviews for polarity and subjectivity, aggregates
//! polarity over time, and derives the data series a review dashboard
//! charts.

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod sentiment;
pub mod testing;
pub mod types;


pub use aggregate::{aggregate, daily_means, DEFAULT_WINDOW};
pub use error::{InputError, Result, VisentifyError};
pub use sentiment::{Classification, LexiconScorer, PolarityScorer, Scores, SentimentClassifier};
pub use types::{DailyAggregate, PolarityPoint, Review, ScoredReview, Sentiment, SmoothedPoint, SmoothedSeries};
