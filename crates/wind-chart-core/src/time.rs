// File: crates/wind-chart-core/src/time.rs
// Summary: Brisbane display time, timestamp parsing and the day-wrapping clock for HH:MM samples.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde_json::Value;

/// Brisbane does not observe daylight saving; it is always UTC+10.
pub const BRISBANE_UTC_OFFSET_SECS: i32 = 10 * 3600;

const SECS_PER_DAY: i64 = 86_400;

pub fn brisbane() -> FixedOffset {
    FixedOffset::east_opt(BRISBANE_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Today's calendar date in Brisbane.
pub fn brisbane_today() -> NaiveDate {
    Utc::now().with_timezone(&brisbane()).date_naive()
}

/// Midnight (Brisbane) of `date`, as an absolute instant.
pub fn brisbane_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc) - Duration::seconds(BRISBANE_UTC_OFFSET_SECS as i64)
}

pub fn format_brisbane(ts: DateTime<Utc>, fmt: &str) -> String {
    ts.with_timezone(&brisbane()).format(fmt).to_string()
}

/// `YYYY-MM-DD HH:MM` in Brisbane time.
pub fn format_stamp(ts: DateTime<Utc>) -> String { format_brisbane(ts, "%Y-%m-%d %H:%M") }

/// `HH:MM` in Brisbane time.
pub fn format_hhmm(ts: DateTime<Utc>) -> String { format_brisbane(ts, "%H:%M") }

/// `DD/MM` (bar axis labels).
pub fn format_day_month(date: NaiveDate) -> String { date.format("%d/%m").to_string() }

/// `DD/MM/YYYY` (tooltip header for daily rows).
pub fn format_aus_date(date: NaiveDate) -> String { date.format("%d/%m/%Y").to_string() }

/// Seconds since the Unix epoch as `f64`, the x coordinate used by time scales.
pub fn to_secs(ts: DateTime<Utc>) -> f64 { ts.timestamp_millis() as f64 / 1000.0 }

pub fn from_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis((secs * 1000.0).round() as i64)
}

/// Whole-hour instants in `[start, end]`, in seconds.
pub fn hour_ticks(start: f64, end: f64) -> Vec<f64> {
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Vec::new();
    }
    let first = (start / 3600.0).ceil() as i64;
    let last = (end / 3600.0).floor() as i64;
    (first..=last).map(|h| (h * 3600) as f64).collect()
}

/// Brisbane midnights in `[start, end)`, in seconds.
pub fn day_starts(start: f64, end: f64) -> Vec<f64> {
    if !(start.is_finite() && end.is_finite()) || end <= start {
        return Vec::new();
    }
    let off = BRISBANE_UTC_OFFSET_SECS as i64;
    let s = start.ceil() as i64 + off;
    let first = s.div_euclid(SECS_PER_DAY) + i64::from(s.rem_euclid(SECS_PER_DAY) != 0);
    let mut out = Vec::new();
    let mut day = first;
    loop {
        let t = day * SECS_PER_DAY - off;
        if (t as f64) >= end {
            break;
        }
        out.push(t as f64);
        day += 1;
    }
    out
}

/// A parsed timestamp cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stamp {
    Absolute(DateTime<Utc>),
    /// Bare time-of-day (`HH:MM`); placed on a day-wrapping timeline.
    TimeOfDay(NaiveTime),
}

/// Parse one timestamp cell. Strings may be RFC 3339, naive ISO (Brisbane), or `HH:MM`.
/// Numbers are epoch seconds, or epoch milliseconds when larger than 10^12.
pub fn parse_stamp(value: &Value) -> Option<Stamp> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64()?;
            if !n.is_finite() {
                return None;
            }
            let secs = if n.abs() > 1e12 { n / 1000.0 } else { n };
            from_secs(secs).map(Stamp::Absolute)
        }
        Value::String(s) => parse_stamp_str(s.trim()),
        _ => None,
    }
}

fn parse_stamp_str(s: &str) -> Option<Stamp> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Stamp::Absolute(dt.with_timezone(&Utc)));
    }
    const NAIVE: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in NAIVE {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return brisbane()
                .from_local_datetime(&naive)
                .single()
                .map(|dt| Stamp::Absolute(dt.with_timezone(&Utc)));
        }
    }
    for fmt in ["%H:%M", "%H:%M:%S"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(Stamp::TimeOfDay(t));
        }
    }
    None
}

/// Places a sequence of time-of-day samples on a monotonically increasing timeline.
/// Every backward wrap in time of day (e.g. 23:50 -> 00:00) advances one day.
#[derive(Clone, Debug)]
pub struct DayWrapClock {
    anchor: DateTime<Utc>,
    prev: Option<NaiveTime>,
    day_offset: i64,
}

impl DayWrapClock {
    /// Timeline starting at Brisbane midnight of `anchor_date`.
    pub fn new(anchor_date: NaiveDate) -> Self {
        Self { anchor: brisbane_midnight(anchor_date), prev: None, day_offset: 0 }
    }

    pub fn place(&mut self, t: NaiveTime) -> DateTime<Utc> {
        if let Some(prev) = self.prev {
            if t < prev {
                self.day_offset += 1;
            }
        }
        self.prev = Some(t);
        self.anchor + Duration::days(self.day_offset) + t.signed_duration_since(NaiveTime::MIN)
    }

    pub fn day_offset(&self) -> i64 { self.day_offset }
}
