//! Placeholder data for the showcase.
//!
//! Everything here is deliberately cheap and disposable: random numbers,
//! generated labels and date strings. Generators take the RNG as a parameter
//! so tests can seed it.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform random numbers in `[0, 1)`.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Arc<[f64]> {
    (0..len).map(|_| rng.random::<f64>()).collect()
}

/// Per-item "expensive" transform: each item plus the sum of `0..range`.
pub fn expensive_transform(data: &[f64], range: u64) -> Arc<[f64]> {
    let base: u64 = (0..range).sum();
    data.iter().map(|item| base as f64 + item).collect()
}

/// Generated list labels `item-0`, `item-1`, ...
pub fn list_labels(len: usize) -> Arc<[String]> {
    (0..len).map(|i| format!("item-{i}")).collect()
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// The indices `0..len` in random order.
pub fn shuffled_indices<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

/// Relative time phrase with an "ago"/"in" suffix.
pub fn time_ago<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let seconds = now.clone().signed_duration_since(then.clone()).num_seconds();
    let phrase = distance_phrase(seconds.unsigned_abs());
    if seconds < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn distance_phrase(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;

    let minutes = (seconds + MINUTE / 2) / MINUTE;
    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => format!("{minutes} minutes"),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {} hours", (s + HOUR / 2) / HOUR),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => format!("{} days", (s + DAY / 2) / DAY),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s => format!("{} months", (s + MONTH / 2) / MONTH),
    }
}

/// Line chart data: one label and one value per point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// `points` consecutive days starting at `start`, with random values in `[0, 1000)`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        name: &str,
        start: NaiveDate,
        points: usize,
    ) -> Self {
        let labels = (0..points)
            .map(|i| {
                start
                    .checked_add_days(Days::new(i as u64))
                    .unwrap_or(NaiveDate::MAX)
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .collect();
        let values = (0..points).map(|_| rng.random::<f64>() * 1000.0).collect();
        Self {
            name: name.to_string(),
            labels,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value, if any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Long human timestamp, e.g. `October 15th 2026, 3:04:05 PM`.
pub fn long_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let (pm, hour) = at.hour12();
    format!(
        "{} {} {}, {}:{:02}:{:02} {}",
        at.format("%B"),
        ordinal(at.day()),
        at.year(),
        hour,
        at.minute(),
        at.second(),
        if pm { "PM" } else { "AM" }
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_random_sequence_is_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = random_sequence(&mut rng, 1000);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_expensive_transform_adds_range_sum() {
        let out = expensive_transform(&[0.5, 1.0], 100);
        assert_eq!(&*out, &[4950.5, 4951.0]);
    }

    #[test]
    fn test_labels_and_capitalize() {
        let labels = list_labels(3);
        assert_eq!(&*labels, &["item-0", "item-1", "item-2"]);
        assert_eq!(capitalize("item-0"), "Item-0");
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut shuffled = shuffled_indices(&mut rng, 100);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_time_ago_phrases() {
        let now = Utc::now();
        assert_eq!(time_ago(&now, &now), "less than a minute ago");
        assert_eq!(time_ago(&(now - Duration::minutes(5)), &now), "5 minutes ago");
        assert_eq!(time_ago(&(now - Duration::hours(3)), &now), "about 3 hours ago");
        assert_eq!(time_ago(&(now + Duration::days(3)), &now), "in 3 days");
    }

    #[test]
    fn test_chart_series_uses_consecutive_dates() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let series = ChartSeries::generate(&mut rng, "Sample Data", start, 4);
        assert_eq!(
            series.labels,
            vec!["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]
        );
        assert_eq!(series.len(), 4);
        let (lo, hi) = series.bounds().unwrap();
        assert!(lo >= 0.0 && hi < 1000.0);
    }

    #[test]
    fn test_long_timestamp_has_ordinal_day() {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 15, 4, 5).unwrap();
        assert_eq!(long_timestamp(&at), "October 1st 2026, 3:04:05 PM");
        let at = Utc.with_ymd_and_hms(2026, 1, 12, 0, 30, 0).unwrap();
        assert_eq!(long_timestamp(&at), "January 12th 2026, 12:30:00 AM");
    }
}
