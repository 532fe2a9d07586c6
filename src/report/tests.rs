//! Unit tests for dashboard data

use super::*;
use crate::error::VisentifyError;
use crate::sentiment::{MockPolarityScorer, Scores};
use chrono::NaiveDate;

fn review(text: &str, date: &str, rating: i32, variation: &str) -> Review {
    Review {
        text: text.to_string(),
        date: aggregate::parse_review_date(date).unwrap(),
        rating,
        variation: variation.to_string(),
    }
}

fn sample() -> Dataset {
    Dataset::new(
        vec![
            "rating".to_string(),
            "date".to_string(),
            "variation".to_string(),
            "verified_reviews".to_string(),
        ],
        vec![
            review("I love this product!", "2023-01-01", 5, "Color1"),
            review("This is a terrible product.", "2023-01-02", 1, "Color2"),
            review("Great sound, easy setup", "2023-01-02", 5, "Color1"),
            review("", "2023-01-03", 4, "Color3"),
        ],
    )
}

#[test]
fn test_rating_distribution() {
    let data = sample();
    let shares = rating_distribution(&data.reviews);

    assert_eq!(shares.len(), 3);
    assert_eq!(shares[0].rating, 5);
    assert_eq!(shares[0].count, 2);
    assert!((shares[0].percent - 50.0).abs() < 1e-9);
    // Ties ordered by rating
    assert_eq!(shares[1].rating, 1);
    assert_eq!(shares[2].rating, 4);

    let total: f64 = shares.iter().map(|s| s.percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_rating_distribution_empty() {
    assert!(rating_distribution(&[]).is_empty());
}

#[test]
fn test_variation_counts() {
    let data = sample();
    let counts = variation_counts(&data.reviews);

    assert_eq!(
        counts,
        vec![
            VariationCount {
                variation: "Color1".to_string(),
                count: 2
            },
            VariationCount {
                variation: "Color2".to_string(),
                count: 1
            },
            VariationCount {
                variation: "Color3".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn test_sentiment_breakdown() {
    let data = sample();
    let scored = SentimentClassifier::new().classify_all(&data.reviews).unwrap();
    let breakdown = sentiment_breakdown(&scored);

    assert_eq!(breakdown.positive, 2);
    assert_eq!(breakdown.negative, 1);
    assert_eq!(breakdown.neutral, 1);
    assert_eq!(breakdown.total(), 4);
    assert!(breakdown.mean_subjectivity > 0.0);
}

#[test]
fn test_sentiment_breakdown_empty() {
    let breakdown = sentiment_breakdown(&[]);
    assert_eq!(breakdown.total(), 0);
    assert_eq!(breakdown.mean_polarity, 0.0);
}

#[test]
fn test_build_report_with_mock_scores() {
    let mut scorer = MockPolarityScorer::new();
    scorer.expect_score().returning(|text| {
        let polarity = if text.contains("love") {
            0.5
        } else if text.contains("terrible") {
            -0.2
        } else {
            0.3
        };
        Ok(Scores {
            subjectivity: 0.5,
            polarity,
        })
    });

    let classifier = SentimentClassifier::with_scorer(scorer);
    let report = DashboardReport::build(&sample(), &classifier, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.rows, 4);
    assert_eq!(report.columns, 4);
    assert_eq!(report.window, 3);
    assert_eq!(report.trend.len(), 3);

    // 01-01: 0.5; 01-02: mean(-0.2, 0.3) = 0.05; 01-03: 0.0 (empty text)
    let values: Vec<f64> = report.trend.iter().map(|p| p.value).collect();
    assert!((values[0] - 0.5).abs() < 1e-9);
    assert!((values[1] - 0.275).abs() < 1e-9);
    assert!((values[2] - 0.55 / 3.0).abs() < 1e-9);
    assert_eq!(
        report.trend[2].date,
        NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()
    );

    assert!(report.words.iter().any(|w| w.word == "product" && w.count == 2));
}

#[test]
fn test_build_report_propagates_errors() {
    let mut data = sample();
    data.reviews[1].text = "corrupt\u{0}".to_string();

    let err = DashboardReport::build(&data, &SentimentClassifier::new(), &AnalysisConfig::default())
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(matches!(err, VisentifyError::Record { index: 1, .. }));
}

#[test]
fn test_report_json() {
    let report =
        DashboardReport::build(&sample(), &SentimentClassifier::new(), &AnalysisConfig::default())
            .unwrap();
    let json = report.to_json().unwrap();

    assert!(json.contains("\"trend\""));
    assert!(json.contains("\"2023-01-01\""));

    let back: DashboardReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.trend.len(), report.trend.len());
    assert_eq!(back.ratings, report.ratings);
}
