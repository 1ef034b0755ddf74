// File: crates/wind-chart-core/src/adapter.rs
// Summary: Normalizes loosely-typed API rows into sorted, de-duplicated typed datasets.
// Rows whose required numeric fields are missing or non-finite are dropped, never reported as errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::marks::MarkKind;
use crate::model::{sort_dedup, DailyAggregateRow, Dataset, TimeSeriesPoint, WindObservation};
use crate::time::{brisbane_today, parse_stamp, DayWrapClock, Stamp};

const TIME_KEYS: &[&str] = &["time", "timestamp", "x", "datetime"];
const WIND_TIME_KEYS: &[&str] = &["x", "time", "timestamp"];
/// Keys accepted for the calendar date of a daily row.
pub const DATE_KEYS: &[&str] = &["date", "day"];

/// Target row schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    TimeSeries,
    DailyAggregate,
    Wind,
}

impl Schema {
    pub fn for_kind(kind: MarkKind) -> Self {
        match kind {
            MarkKind::Line | MarkKind::Scatter => Schema::TimeSeries,
            MarkKind::Bar => Schema::DailyAggregate,
            MarkKind::Arrow => Schema::Wind,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdapterOptions {
    /// Day that bare `HH:MM` samples start on.
    pub anchor_date: NaiveDate,
    /// Keep only the most recent N rows after sorting.
    pub max_points: Option<usize>,
    /// Drop series rows without a prediction (scatter needs both values).
    pub require_predicted: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self { anchor_date: brisbane_today(), max_points: None, require_predicted: false }
    }
}

/// Adapter output plus the number of rows that were discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct Adapted<T> {
    pub rows: T,
    pub dropped: usize,
}

#[derive(Clone, Debug, Default)]
pub struct DataAdapter {
    options: AdapterOptions,
}

impl DataAdapter {
    pub fn new(options: AdapterOptions) -> Self { Self { options } }

    pub fn options(&self) -> &AdapterOptions { &self.options }

    /// Adapt rows for the schema a chart kind draws.
    pub fn adapt(&self, kind: MarkKind, rows: &[Value]) -> Adapted<Dataset> {
        let out = match Schema::for_kind(kind) {
            Schema::TimeSeries => {
                let a = self.series(rows, self.options.require_predicted || kind == MarkKind::Scatter);
                Adapted { rows: Dataset::Series(a.rows), dropped: a.dropped }
            }
            Schema::DailyAggregate => {
                let a = self.daily(rows);
                Adapted { rows: Dataset::Daily(a.rows), dropped: a.dropped }
            }
            Schema::Wind => {
                let a = self.wind(rows);
                Adapted { rows: Dataset::Wind(a.rows), dropped: a.dropped }
            }
        };
        debug!(?kind, kept = out.rows.len(), dropped = out.dropped, "adapted rows");
        out
    }

    pub fn series(&self, rows: &[Value], require_predicted: bool) -> Adapted<Vec<TimeSeriesPoint>> {
        let mut clock = DayWrapClock::new(self.options.anchor_date);
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(timestamp) = timestamp(row, TIME_KEYS, &mut clock) else { continue };
            let Some(actual) = number(row, &["actual", "actual_knots"]) else { continue };
            let Some(predicted) = optional_number(row, &["predicted", "forecast", "predicted_knots"]) else { continue };
            if require_predicted && predicted.is_none() {
                continue;
            }
            out.push(TimeSeriesPoint { timestamp, actual, predicted });
        }
        let dropped = rows.len() - out.len();
        let (rows, dups) = self.finish(out, |p| p.timestamp);
        Adapted { rows, dropped: dropped + dups }
    }

    pub fn daily(&self, rows: &[Value]) -> Adapted<Vec<DailyAggregateRow>> {
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(date) = field(row, DATE_KEYS).and_then(Value::as_str).and_then(parse_iso_date) else {
                continue;
            };
            let stats = (
                number(row, &["n", "count", "sample_count"]),
                number(row, &["coverage"]),
                number(row, &["mae"]),
                number(row, &["rmse"]),
                number(row, &["bias"]),
                number(row, &["smape"]),
                number(row, &["mean_actual"]),
                number(row, &["mean_predicted"]),
            );
            let (Some(n), Some(coverage), Some(mae), Some(rmse), Some(bias), Some(smape), Some(mean_actual), Some(mean_predicted)) =
                stats
            else {
                continue;
            };
            if n < 0.0 {
                continue;
            }
            out.push(DailyAggregateRow {
                date,
                sample_count: n.round() as u32,
                coverage,
                mae,
                rmse,
                bias,
                smape,
                mean_actual,
                mean_predicted,
            });
        }
        let dropped = rows.len() - out.len();
        let (rows, dups) = self.finish(out, |r| r.date);
        Adapted { rows, dropped: dropped + dups }
    }

    pub fn wind(&self, rows: &[Value]) -> Adapted<Vec<WindObservation>> {
        let mut clock = DayWrapClock::new(self.options.anchor_date);
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(timestamp) = timestamp(row, WIND_TIME_KEYS, &mut clock) else { continue };
            let Some(speed_knots) = number(row, &["wind_knots", "speed_knots", "speed"]) else { continue };
            let Some(direction) = number(row, &["direction_degrees", "direction"]) else { continue };
            let Some(gust_knots) = optional_number(row, &["wind_gust_knots", "gust_knots", "gust"]) else { continue };
            let direction_degrees = direction.rem_euclid(360.0);
            let direction_text = field(row, &["direction_text"])
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| compass_point(direction_degrees).to_owned());
            out.push(WindObservation { timestamp, speed_knots, gust_knots, direction_degrees, direction_text });
        }
        let dropped = rows.len() - out.len();
        let (rows, dups) = self.finish(out, |o| o.timestamp);
        Adapted { rows, dropped: dropped + dups }
    }

    /// Sort by key, keep the last row for duplicate keys, then apply `max_points`.
    /// Returns the rows and how many duplicates were removed.
    fn finish<T, K: Ord + Copy>(&self, mut rows: Vec<T>, key: impl Fn(&T) -> K) -> (Vec<T>, usize) {
        let dups = sort_dedup(&mut rows, key);
        if let Some(max) = self.options.max_points {
            if rows.len() > max {
                rows.drain(..rows.len() - max);
            }
        }
        (rows, dups)
    }
}

/// Extract the `data` array from an API response body. A bare JSON array is accepted too.
pub fn parse_envelope(body: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(ChartError::MissingData),
        },
        _ => Err(ChartError::MissingData),
    }
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Strict `YYYY-MM-DD` so keys stay lexicographically sortable.
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// First present, non-null field among `keys`.
fn field<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| row.get(*k)).find(|v| !v.is_null())
}

fn number(row: &Value, keys: &[&str]) -> Option<f64> { field(row, keys).and_then(as_number) }

/// Optional numeric field: `Some(None)` when absent or null, `None` when present but not a
/// finite number (the row is malformed).
fn optional_number(row: &Value, keys: &[&str]) -> Option<Option<f64>> {
    match field(row, keys) {
        None => Some(None),
        Some(v) => as_number(v).map(Some),
    }
}

/// Finite number from a JSON number or a numeric string.
fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn timestamp(row: &Value, keys: &[&str], clock: &mut DayWrapClock) -> Option<DateTime<Utc>> {
    match parse_stamp(field(row, keys)?)? {
        Stamp::Absolute(ts) => Some(ts),
        Stamp::TimeOfDay(t) => Some(clock.place(t)),
    }
}

/// 16-point compass name for a direction in degrees.
pub fn compass_point(deg: f64) -> &'static str {
    const POINTS: [&str; 16] =
        ["N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW"];
    let idx = ((deg.rem_euclid(360.0) / 22.5) + 0.5).floor() as usize % 16;
    POINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> DataAdapter {
        DataAdapter::new(AdapterOptions {
            anchor_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            ..AdapterOptions::default()
        })
    }

    #[test]
    fn compass_points_round_to_nearest() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(350.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(200.0), "SSW");
    }

    #[test]
    fn envelope_requires_data_array() {
        assert_eq!(parse_envelope(r#"{"data":[{"a":1}]}"#).unwrap().len(), 1);
        assert_eq!(parse_envelope("[]").unwrap().len(), 0);
        assert!(matches!(parse_envelope(r#"{"rows":[]}"#), Err(ChartError::MissingData)));
        assert!(matches!(parse_envelope("{oops"), Err(ChartError::Json(_))));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let rows = vec![json!({"time": "2025-10-01 06:00", "actual": "12.5", "predicted": 11})];
        let out = adapter().series(&rows, false);
        assert_eq!(out.rows[0].actual, 12.5);
        assert_eq!(out.rows[0].predicted, Some(11.0));
    }

    #[test]
    fn null_prediction_is_optional_for_lines() {
        let rows = vec![
            json!({"time": "06:00", "actual": 10, "predicted": null}),
            json!({"time": "06:10", "actual": 11, "predicted": 12}),
        ];
        assert_eq!(adapter().series(&rows, false).rows.len(), 2);
        assert_eq!(adapter().series(&rows, true).rows.len(), 1);
    }
}
