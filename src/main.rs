//! Visentify CLI
//!
//! Loads the review dataset and prints the data behind each dashboard
//! panel.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visentify::{
    config::Config,
    data::{Dataset, DatasetCache, DatasetLoader},
    report::DashboardReport,
    testing::{write_dataset, ReviewGenerator},
    types::PolarityPoint,
    SentimentClassifier,
};

#[derive(Parser)]
#[command(name = "visentify")]
#[command(about = "Sentiment analysis data for product review dashboards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults: visentify.toml, config.toml, ~/.config/visentify/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset path, overriding the configuration
    #[arg(short, long)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset shape, column types and a preview
    Summary {
        /// Number of rows to preview
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Classify a single text
    Classify {
        /// Text to score
        #[arg(short, long)]
        text: String,
    },
    /// Show the smoothed polarity trend
    Trend {
        /// Trailing window size
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Build all dashboard data
    Report {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic review dataset
    Sample {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
        /// Number of reviews
        #[arg(short = 'n', long, default_value = "500")]
        count: usize,
        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(path) = cli.data {
        config.dataset.path = path;
    }

    let cache = DatasetCache::new();

    match cli.command {
        Commands::Summary { rows } => show_summary(&config, &cache, rows),
        Commands::Classify { text } => classify_text(&text),
        Commands::Trend { window } => show_trend(&config, &cache, window),
        Commands::Report { json } => show_report(&config, &cache, json),
        Commands::Sample { out, count, seed } => write_sample(&config, &out, count, seed),
    }
}

fn load(config: &Config, cache: &DatasetCache, loader: &DatasetLoader) -> anyhow::Result<Arc<Dataset>> {
    cache
        .get_or_load(&config.dataset.path, loader)
        .with_context(|| format!("Failed to load dataset {}", config.dataset.path.display()))
}

fn show_summary(config: &Config, cache: &DatasetCache, rows: Option<usize>) -> anyhow::Result<()> {
    let loader = DatasetLoader::new(config.dataset.clone());
    let dataset = load(config, cache, &loader)?;
    let (n_rows, n_cols) = dataset.shape();

    println!("\n📋 Dataset: {}\n", config.dataset.path.display());
    println!("Shape: ({}, {})", n_rows, n_cols);

    println!("\nColumns:");
    for column in dataset.column_types(&loader) {
        println!("  {:<24} {}", column.name, column.kind);
    }

    let preview = rows.unwrap_or(config.analysis.preview_rows);
    println!("\nPreview:");
    println!("{:>6} {:<12} {:<28} {}", "Rating", "Date", "Variation", "Review");
    println!("{}", "-".repeat(80));
    for review in dataset.preview(preview) {
        println!(
            "{:>6} {:<12} {:<28} {}",
            review.rating,
            review.date.to_string(),
            truncate(&review.variation, 28),
            truncate(&review.text, 40)
        );
    }

    Ok(())
}

fn classify_text(text: &str) -> anyhow::Result<()> {
    let classifier = SentimentClassifier::new();
    let c = classifier.classify(text)?;

    println!("Subjectivity: {:.3}", c.subjectivity);
    println!("Polarity:     {:.3}", c.polarity);
    println!("Sentiment:    {}", c.sentiment);
    Ok(())
}

fn show_trend(config: &Config, cache: &DatasetCache, window: Option<usize>) -> anyhow::Result<()> {
    let loader = DatasetLoader::new(config.dataset.clone());
    let dataset = load(config, cache, &loader)?;
    let window = window.unwrap_or(config.analysis.smoothing_window);

    let classifier = SentimentClassifier::new();
    let scored = classifier.classify_all(&dataset.reviews)?;
    let points: Vec<PolarityPoint> = scored.iter().map(PolarityPoint::from).collect();
    let daily = visentify::daily_means(&points);
    let series = visentify::aggregate::smooth(&daily, window)?;

    println!("\n📈 Smoothed Average Polarity (window {})\n", window);
    println!("{:<12} {:>8} {:>10} {:>10}", "Date", "Reviews", "Mean", "Smoothed");
    println!("{}", "-".repeat(44));
    for (day, point) in daily.iter().zip(&series) {
        println!(
            "{:<12} {:>8} {:>10.3} {:>10.3}",
            point.date.to_string(),
            day.count,
            day.mean_polarity,
            point.value
        );
    }

    Ok(())
}

fn show_report(config: &Config, cache: &DatasetCache, json: bool) -> anyhow::Result<()> {
    let loader = DatasetLoader::new(config.dataset.clone());
    let dataset = load(config, cache, &loader)?;
    let classifier = SentimentClassifier::new();
    let report = DashboardReport::build(&dataset, &classifier, &config.analysis)?;

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("\n🎭 Visentify - Review Sentiment\n");
    println!("Reviews: {}  Columns: {}", report.rows, report.columns);

    println!("\nRating distribution:");
    for share in &report.ratings {
        println!("  {} ★  {:>6} ({:>5.1}%)", share.rating, share.count, share.percent);
    }

    println!("\nSentiment:");
    println!("  Positive {:>6}", report.sentiment.positive);
    println!("  Neutral  {:>6}", report.sentiment.neutral);
    println!("  Negative {:>6}", report.sentiment.negative);
    println!(
        "  Mean polarity {:.3}, mean subjectivity {:.3}",
        report.sentiment.mean_polarity, report.sentiment.mean_subjectivity
    );

    println!("\nVariations:");
    for v in &report.variations {
        println!("  {:<36} {:>6}", truncate(&v.variation, 36), v.count);
    }

    println!("\nTop words:");
    for w in report.words.iter().take(15) {
        println!("  {:<20} {:>6}", w.word, w.count);
    }

    let first: Option<NaiveDate> = report.trend.first().map(|p| p.date);
    let last: Option<NaiveDate> = report.trend.last().map(|p| p.date);
    if let (Some(first), Some(last)) = (first, last) {
        println!(
            "\nTrend: {} dates from {} to {} (window {})",
            report.trend.len(),
            first,
            last,
            report.window
        );
    }

    Ok(())
}

fn write_sample(config: &Config, out: &Path, count: usize, seed: u64) -> anyhow::Result<()> {
    let start = NaiveDate::from_ymd_opt(2018, 5, 16).context("invalid start date")?;
    let reviews = ReviewGenerator::new(seed).reviews(count, start, 77);

    let file = File::create(out).with_context(|| format!("Failed to create {}", out.display()))?;
    write_dataset(file, &reviews, &config.dataset)?;

    tracing::info!("Wrote {} reviews to {}", count, out.display());
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
