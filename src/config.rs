//! Configuration management

use crate::aggregate::DEFAULT_WINDOW;
use crate::error::{Result, VisentifyError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the review dataset
    pub path: PathBuf,
    /// Field delimiter: a single character, or "tab"
    pub delimiter: String,
    /// Review text column
    pub text_column: String,
    /// Review date column
    pub date_column: String,
    /// Star rating column
    pub rating_column: String,
    /// Product variation column
    pub variation_column: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing moving average window (days with data, not calendar days)
    pub smoothing_window: usize,
    /// Maximum number of words kept for the word cloud
    pub max_words: usize,
    /// Rows shown in dataset previews
    pub preview_rows: usize,
}

impl Config {
    /// Load configuration from file, overlaid with `VISENTIFY__*` env vars
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("VISENTIFY").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = [
            "visentify.toml",
            "config.toml",
            "~/.config/visentify/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                tracing::debug!("Loading configuration from {}", expanded);
                return Self::load(expanded.as_ref());
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("VISENTIFY").separator("__"))
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.analysis.smoothing_window == 0 {
            return Err(VisentifyError::Config(
                "analysis.smoothing_window must be at least 1".to_string(),
            ));
        }
        self.dataset.delimiter_byte()?;
        Ok(())
    }
}

impl DatasetConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_str() {
            "tab" | "\\t" | "\t" => Ok(b'\t'),
            d if d.len() == 1 => Ok(d.as_bytes()[0]),
            d => Err(VisentifyError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                d
            ))),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("amazon_alexa.tsv"),
            delimiter: "\t".to_string(),
            text_column: "verified_reviews".to_string(),
            date_column: "date".to_string(),
            rating_column: "rating".to_string(),
            variation_column: "variation".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_WINDOW,
            max_words: 50,
            preview_rows: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.text_column, "verified_reviews");
        assert_eq!(config.dataset.delimiter_byte().unwrap(), b'\t');
        assert_eq!(config.analysis.smoothing_window, 3);
        assert_eq!(config.analysis.max_words, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [dataset]
            path = "reviews.csv"
            delimiter = ","

            [analysis]
            smoothing_window = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("reviews.csv"));
        assert_eq!(config.dataset.delimiter_byte().unwrap(), b',');
        assert_eq!(config.dataset.date_column, "date");
        assert_eq!(config.analysis.smoothing_window, 7);
        assert_eq!(config.analysis.preview_rows, 5);
    }

    #[test]
    fn test_delimiter_aliases() {
        let mut dataset = DatasetConfig::default();
        dataset.delimiter = "tab".to_string();
        assert_eq!(dataset.delimiter_byte().unwrap(), b'\t');

        dataset.delimiter = "\\t".to_string();
        assert_eq!(dataset.delimiter_byte().unwrap(), b'\t');

        dataset.delimiter = ";;".to_string();
        assert!(dataset.delimiter_byte().is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = Config::default();
        config.analysis.smoothing_window = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("smoothing_window"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[dataset]\npath = \"data/reviews.tsv\"\n\n[analysis]\nmax_words = 20"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/reviews.tsv"));
        assert_eq!(config.analysis.max_words, 20);
        assert_eq!(config.analysis.smoothing_window, 3);
    }
}
