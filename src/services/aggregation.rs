//! Mood trend and distribution over a caller-scoped snapshot of journal entries.
//!
//! Both aggregators are pure: the handler fetches the owner's samples, resolves the
//! window once, and hands both to these functions.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::mood;

/// Days covered by the window when the caller gives neither bound.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Label reported for entries stored without a mood.
pub const UNKNOWN_MOOD: &str = "Unknown";

/// The slice of a journal entry the aggregators need.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MoodSample {
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub mood: Option<String>,
}

impl MoodSample {
    pub fn new(date: NaiveDate, mood: impl Into<String>) -> Self {
        Self {
            date,
            mood: Some(mood.into()),
        }
    }
}

/// Inclusive calendar-date range. A missing bound is open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Apply the trailing default only when both bounds are absent.
    pub fn resolve(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Self {
        match (from, to) {
            (None, None) => Self {
                from: Some(today - Duration::days(DEFAULT_WINDOW_DAYS)),
                to: Some(today),
            },
            (from, to) => Self { from, to },
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub day: String,
    pub average_mood: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    pub mood: String,
    pub count: u32,
}

/// Per-day average mood score, ascending by day.
///
/// Unrecognized labels score 0 and still count toward the day's denominator.
pub fn mood_trend(samples: &[MoodSample], window: &DateWindow) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();

    for sample in samples.iter().filter(|s| window.contains(s.date)) {
        let score = sample.mood.as_deref().map(mood::score).unwrap_or(0);
        let (sum, count) = days.entry(sample.date).or_insert((0, 0));
        *sum += u32::from(score);
        *count += 1;
    }

    days.into_iter()
        .map(|(day, (sum, count))| TrendPoint {
            day: day.format("%Y-%m-%d").to_string(),
            average_mood: round2(f64::from(sum) / f64::from(count)),
            count,
        })
        .collect()
}

/// Occurrences per raw mood label, most frequent first. Ties keep first-seen order.
pub fn mood_distribution(samples: &[MoodSample], window: &DateWindow) -> Vec<DistributionBucket> {
    let mut buckets: Vec<DistributionBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in samples.iter().filter(|s| window.contains(s.date)) {
        let label = match sample.mood.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => UNKNOWN_MOOD,
        };
        match index.get(label) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index.insert(label.to_string(), buckets.len());
                buckets.push(DistributionBucket {
                    mood: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
