// File: crates/wind-chart-core/src/model.rs
// Summary: Typed rows produced by the adapter and the sorted timeline used for nearest-point lookup.

use chrono::{DateTime, NaiveDate, Utc};

use crate::time::to_secs;

/// One forecast-vs-actual sample (line and scatter charts).
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub actual: f64,
    pub predicted: Option<f64>,
}

impl TimeSeriesPoint {
    /// Actual minus predicted, when a prediction exists.
    pub fn error(&self) -> Option<f64> { self.predicted.map(|p| self.actual - p) }
}

/// Per-day forecast error statistics (bar chart).
#[derive(Clone, Debug, PartialEq)]
pub struct DailyAggregateRow {
    pub date: NaiveDate,
    pub sample_count: u32,
    pub coverage: f64,
    pub mae: f64,
    pub rmse: f64,
    pub bias: f64,
    pub smape: f64,
    pub mean_actual: f64,
    pub mean_predicted: f64,
}

impl DailyAggregateRow {
    /// ISO key (`YYYY-MM-DD`); unique within a dataset and lexicographically sortable.
    pub fn date_key(&self) -> String { self.date.format("%Y-%m-%d").to_string() }
}

/// One wind sample (arrow chart).
/// Invariant: `direction_degrees` is in `[0, 360)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WindObservation {
    pub timestamp: DateTime<Utc>,
    pub speed_knots: f64,
    pub gust_knots: Option<f64>,
    pub direction_degrees: f64,
    pub direction_text: String,
}

/// Adapted rows for one chart instance, already sorted and de-duplicated.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    Series(Vec<TimeSeriesPoint>),
    Daily(Vec<DailyAggregateRow>),
    Wind(Vec<WindObservation>),
}

impl Default for Dataset {
    fn default() -> Self { Dataset::Series(Vec::new()) }
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Series(v) => v.len(),
            Dataset::Daily(v) => v.len(),
            Dataset::Wind(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Sort by key and keep the last row for duplicate keys. Returns how many rows were removed.
    pub fn normalize(&mut self) -> usize {
        match self {
            Dataset::Series(v) => sort_dedup(v, |p| p.timestamp),
            Dataset::Daily(v) => sort_dedup(v, |r| r.date),
            Dataset::Wind(v) => sort_dedup(v, |o| o.timestamp),
        }
    }

    /// Time keys in seconds for time-based datasets; `None` for daily rows (category axis).
    pub fn timeline(&self) -> Option<Timeline> {
        match self {
            Dataset::Series(v) => Some(Timeline::new(v.iter().map(|p| to_secs(p.timestamp)).collect())),
            Dataset::Wind(v) => Some(Timeline::new(v.iter().map(|o| to_secs(o.timestamp)).collect())),
            Dataset::Daily(_) => None,
        }
    }
}

/// Stable sort by `key`; among equal keys the row that came last wins.
pub(crate) fn sort_dedup<T, K: Ord + Copy>(rows: &mut Vec<T>, key: impl Fn(&T) -> K) -> usize {
    rows.sort_by_key(|r| key(r));
    let before = rows.len();
    let mut deduped: Vec<T> = Vec::with_capacity(before);
    for row in rows.drain(..) {
        let duplicate = deduped.last().is_some_and(|prev| key(prev) == key(&row));
        match deduped.last_mut() {
            Some(prev) if duplicate => *prev = row,
            _ => deduped.push(row),
        }
    }
    *rows = deduped;
    before - rows.len()
}

/// Sorted instants (seconds) supporting logarithmic nearest lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    secs: Vec<f64>,
}

impl Timeline {
    /// `secs` must be sorted ascending.
    pub fn new(secs: Vec<f64>) -> Self {
        debug_assert!(secs.windows(2).all(|w| w[0] <= w[1]), "timeline must be sorted");
        Self { secs }
    }

    pub fn len(&self) -> usize { self.secs.len() }
    pub fn is_empty(&self) -> bool { self.secs.is_empty() }
    pub fn as_slice(&self) -> &[f64] { &self.secs }

    /// First and last instant.
    pub fn extent(&self) -> Option<(f64, f64)> {
        Some((*self.secs.first()?, *self.secs.last()?))
    }

    /// Index of the sample closest to `t`. Equidistant neighbours resolve to the later one.
    pub fn nearest(&self, t: f64) -> Option<usize> {
        if self.secs.is_empty() || t.is_nan() {
            return None;
        }
        let idx = self.secs.partition_point(|&s| s < t);
        if idx == 0 {
            return Some(0);
        }
        if idx == self.secs.len() {
            return Some(idx - 1);
        }
        let before = t - self.secs[idx - 1];
        let after = self.secs[idx] - t;
        Some(if after <= before { idx } else { idx - 1 })
    }
}
