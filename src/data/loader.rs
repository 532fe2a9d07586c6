//! Delimited review file loading
//!
//! Reads a header row, resolves the configured column names, and converts
//! each row into a [`Review`]. The first bad row aborts the load; nothing is
//! skipped or defaulted.

use super::Dataset;
use crate::aggregate::parse_review_date;
use crate::config::DatasetConfig;
use crate::error::{InputError, Result};
use crate::types::Review;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Header positions of the columns the pipeline reads
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    text: usize,
    date: usize,
    rating: usize,
    variation: usize,
}

/// Loads review datasets according to a [`DatasetConfig`]
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    config: DatasetConfig,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DatasetConfig::default())
    }
}

impl DatasetLoader {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Load a dataset from a file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = self.load_from_reader(file)?;
        info!(
            "Loaded {} reviews from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load a dataset from any reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let index = self.resolve_columns(&headers)?;
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut reviews = Vec::new();
        for (i, row) in reader.records().enumerate() {
            // 1-based, header excluded
            let record = i + 1;
            let row = row.map_err(|e| InputError::MalformedRecord {
                record,
                reason: e.to_string(),
            })?;
            reviews.push(self.parse_row(&row, index, record)?);
        }

        debug!("Parsed {} rows across {} columns", reviews.len(), columns.len());
        Ok(Dataset::new(columns, reviews))
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<ColumnIndex> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    InputError::MissingColumn {
                        column: name.to_string(),
                    }
                    .into()
                })
        };

        Ok(ColumnIndex {
            text: find(&self.config.text_column)?,
            date: find(&self.config.date_column)?,
            rating: find(&self.config.rating_column)?,
            variation: find(&self.config.variation_column)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, index: ColumnIndex, record: usize) -> Result<Review> {
        let raw_date = field(row, index.date, &self.config.date_column, record)?;
        let date = parse_review_date(raw_date).map_err(|_| InputError::InvalidField {
            record,
            field: self.config.date_column.clone(),
            value: raw_date.to_string(),
        })?;

        let raw_rating = field(row, index.rating, &self.config.rating_column, record)?;
        let rating = raw_rating
            .trim()
            .parse::<i32>()
            .map_err(|_| InputError::InvalidField {
                record,
                field: self.config.rating_column.clone(),
                value: raw_rating.to_string(),
            })?;

        Ok(Review {
            text: field(row, index.text, &self.config.text_column, record)?.to_string(),
            date,
            rating,
            variation: field(row, index.variation, &self.config.variation_column, record)?
                .trim()
                .to_string(),
        })
    }
}

fn field<'a>(row: &'a StringRecord, i: usize, name: &str, record: usize) -> Result<&'a str> {
    row.get(i).ok_or_else(|| {
        InputError::MalformedRecord {
            record,
            reason: format!("missing value for '{}'", name),
        }
        .into()
    })
}
