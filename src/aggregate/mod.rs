//! Temporal aggregation of review polarity
//!
//! Two steps, both over in-memory data:
//! - group observations by calendar date and average each group
//! - smooth the date-ordered means with a trailing moving average
//!
//! Summation runs in input order within a group and in date order across
//! the window, so results are reproducible for the same input.

pub mod dates;


pub use dates::parse_review_date;

use crate::error::{InputError, Result};
use crate::types::{DailyAggregate, PolarityPoint, SmoothedPoint, SmoothedSeries};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Default smoothing window
pub const DEFAULT_WINDOW: usize = 3;

/// Mean polarity per distinct date, ascending by date.
///
/// Only dates present in the input appear; no gaps are filled.
pub fn daily_means(records: &[PolarityPoint]) -> Vec<DailyAggregate> {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for record in records {
        let (sum, count) = groups.entry(record.date).or_insert((0.0, 0));
        *sum += record.polarity;
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(date, (sum, count))| DailyAggregate {
            date,
            mean_polarity: sum / count as f64,
            count,
        })
        .collect()
}

/// Trailing moving average.
///
/// Entry `i` is the mean of `values[max(0, i + 1 - window)..=i]`; the first
/// `window - 1` entries average whatever is available.
pub fn trailing_mean(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(InputError::InvalidWindow(window).into());
    }

    Ok((0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect())
}

/// Group by date, average, then smooth with a trailing window
pub fn aggregate(records: &[PolarityPoint], window: usize) -> Result<SmoothedSeries> {
    let daily = daily_means(records);
    smooth(&daily, window)
}

/// Smooth already-grouped daily means
pub fn smooth(daily: &[DailyAggregate], window: usize) -> Result<SmoothedSeries> {
    let means: Vec<f64> = daily.iter().map(|d| d.mean_polarity).collect();
    let smoothed = trailing_mean(&means, window)?;

    Ok(daily
        .iter()
        .zip(smoothed)
        .map(|(d, value)| SmoothedPoint {
            date: d.date,
            value,
        })
        .collect())
}

/// Like [`aggregate`], with dates still in text form.
///
/// Every date is parsed before grouping; the first unparsable one fails the
/// whole call with the offending value.
pub fn aggregate_raw<S: AsRef<str>>(records: &[(S, f64)], window: usize) -> Result<SmoothedSeries> {
    let points = records
        .iter()
        .map(|(date, polarity)| -> Result<PolarityPoint> {
            Ok(PolarityPoint {
                date: parse_review_date(date.as_ref())?,
                polarity: *polarity,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    aggregate(&points, window)
}
