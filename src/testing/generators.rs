//! Test Data Generators
//!
//! Utilities for generating review data. All generators are seeded so a
//! given seed always yields the same data.

use crate::config::DatasetConfig;
use crate::error::Result;
use crate::types::{PolarityPoint, Review};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::io::Write;

const OPINION_WORDS: &[&str] = &[
    "love", "great", "good", "excellent", "easy", "perfect", "awesome", "nice", "bad",
    "terrible", "awful", "poor", "disappointed", "broken", "slow", "useless", "hate",
];

const FILLER_WORDS: &[&str] = &[
    "the", "speaker", "alexa", "echo", "sound", "music", "setup", "it", "is", "this", "my",
    "with", "and", "but", "for", "kids", "kitchen", "weather", "lights", "app",
];

const MODIFIERS: &[&str] = &["very", "really", "not", "never", "so", "don't", "extremely"];

const DECORATIONS: &[&str] = &["!", "!!", ".", ",", "?", " :)", " :(", " 👍", " 😡", ""];

const VARIATIONS: &[&str] = &[
    "Black Dot",
    "Charcoal Fabric",
    "Configuration: Fire TV Stick",
    "Black Plus",
    "White Spot",
    "Heather Gray Fabric",
];

/// Seeded generator for reviews and polarity observations
pub struct ReviewGenerator {
    rng: StdRng,
    counter: u32,
}

impl ReviewGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Random review-like text, possibly empty
    pub fn text(&mut self) -> String {
        let words = self.rng.random_range(0..12);
        let mut text = String::new();

        for i in 0..words {
            if i > 0 {
                text.push(' ');
            }
            let pool = match self.rng.random_range(0..10) {
                0..=2 => OPINION_WORDS,
                3 => MODIFIERS,
                _ => FILLER_WORDS,
            };
            text.push_str(pool.choose(&mut self.rng).copied().unwrap_or("ok"));
            if self.rng.random_bool(0.2) {
                text.push_str(DECORATIONS.choose(&mut self.rng).copied().unwrap_or(""));
            }
        }

        text
    }

    /// Random review dated within `span_days` after `start`
    pub fn review(&mut self, start: NaiveDate, span_days: i64) -> Review {
        self.counter += 1;
        let offset = self.rng.random_range(0..span_days.max(1));

        Review {
            text: self.text(),
            date: start + Duration::days(offset),
            rating: self.rng.random_range(1..=5),
            variation: VARIATIONS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("Black Dot")
                .to_string(),
        }
    }

    /// Generate multiple reviews
    pub fn reviews(&mut self, count: usize, start: NaiveDate, span_days: i64) -> Vec<Review> {
        (0..count).map(|_| self.review(start, span_days)).collect()
    }

    /// Random polarity observations within `span_days` after `start`
    pub fn polarity_points(
        &mut self,
        count: usize,
        start: NaiveDate,
        span_days: i64,
    ) -> Vec<PolarityPoint> {
        (0..count)
            .map(|_| PolarityPoint {
                date: start + Duration::days(self.rng.random_range(0..span_days.max(1))),
                polarity: self.rng.random_range(-1.0..=1.0),
            })
            .collect()
    }

    /// Number of reviews generated so far
    pub fn generated(&self) -> u32 {
        self.counter
    }
}

/// Write reviews as a delimited dataset using the configured column names.
///
/// Dates use the `31-Jul-18` form of the review dataset.
pub fn write_dataset<W: Write>(writer: W, reviews: &[Review], config: &DatasetConfig) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(writer);

    csv.write_record([
        config.rating_column.as_str(),
        config.date_column.as_str(),
        config.variation_column.as_str(),
        config.text_column.as_str(),
    ])?;

    for review in reviews {
        csv.write_record([
            review.rating.to_string(),
            review.date.format("%d-%b-%y").to_string(),
            review.variation.clone(),
            review.text.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
