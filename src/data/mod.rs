//! Review dataset handling
//!
//! - Delimited-file loading with strict column and row validation
//! - Explicit dataset cache keyed by source path

pub mod cache;
pub mod loader;

pub use cache::{CacheStats, DatasetCache, SourceKey};
pub use loader::DatasetLoader;

use crate::types::Review;
use serde::Serialize;

/// A loaded review dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header names in file order, including columns the pipeline ignores
    pub columns: Vec<String>,
    pub reviews: Vec<Review>,
}

/// Column name with the type the loader reads it as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnType {
    pub name: String,
    pub kind: &'static str,
}

impl Dataset {
    pub fn new(columns: Vec<String>, reviews: Vec<Review>) -> Self {
        Self { columns, reviews }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.reviews.len(), self.columns.len())
    }

    /// First `n` reviews
    pub fn preview(&self, n: usize) -> &[Review] {
        &self.reviews[..n.min(self.reviews.len())]
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Type of each column as interpreted by `loader`
    pub fn column_types(&self, loader: &DatasetLoader) -> Vec<ColumnType> {
        let config = loader.config();
        self.columns
            .iter()
            .map(|name| {
                let kind = if *name == config.rating_column {
                    "integer"
                } else if *name == config.date_column {
                    "date"
                } else if *name == config.text_column || *name == config.variation_column {
                    "text"
                } else {
                    "ignored"
                };
                ColumnType {
                    name: name.clone(),
                    kind,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use chrono::NaiveDate;

    fn dataset(rows: usize) -> Dataset {
        let reviews = (0..rows)
            .map(|i| Review {
                text: format!("review {}", i),
                date: NaiveDate::from_ymd_opt(2018, 7, 1).unwrap(),
                rating: 5,
                variation: "Black Dot".to_string(),
            })
            .collect();
        Dataset::new(
            vec![
                "rating".to_string(),
                "date".to_string(),
                "variation".to_string(),
                "verified_reviews".to_string(),
                "feedback".to_string(),
            ],
            reviews,
        )
    }

    #[test]
    fn test_shape_and_preview() {
        let data = dataset(8);
        assert_eq!(data.shape(), (8, 5));
        assert_eq!(data.preview(5).len(), 5);
        assert_eq!(data.preview(50).len(), 8);
        assert_eq!(data.preview(1)[0].text, "review 0");
    }

    #[test]
    fn test_empty_dataset() {
        let data = Dataset::new(vec![], vec![]);
        assert!(data.is_empty());
        assert_eq!(data.shape(), (0, 0));
        assert!(data.preview(5).is_empty());
    }

    #[test]
    fn test_column_types() {
        let data = dataset(1);
        let loader = DatasetLoader::new(DatasetConfig::default());
        let kinds: Vec<&str> = data.column_types(&loader).iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec!["integer", "date", "text", "text", "ignored"]);
    }
}
