// File: crates/wind-chart-core/src/range.rs
// Summary: Date-range filter for analysis charts: validated start/end dates, page callbacks,
// and the analysis query string. Never fetches anything itself.

use std::fmt;

use chrono::NaiveDate;
use tracing::warn;

use crate::adapter::parse_iso_date;
use crate::error::{ChartError, Result};
use crate::marks::MarkKind;

/// `type` parameter of the analysis endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisType {
    Line,
    Bar,
}

impl AnalysisType {
    /// Bars read daily aggregates; every other kind reads the raw series.
    pub fn for_kind(kind: MarkKind) -> Self {
        match kind {
            MarkKind::Bar => AnalysisType::Bar,
            _ => AnalysisType::Line,
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisType::Line => "line",
            AnalysisType::Bar => "bar",
        })
    }
}

/// Inclusive date range, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ChartError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate { self.end }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 { (self.end - self.start).num_days() + 1 }

    pub fn contains(&self, date: NaiveDate) -> bool { self.start <= date && date <= self.end }

    /// `type=line&start=YYYY-MM-DD&end=YYYY-MM-DD`
    pub fn query(&self, kind: AnalysisType) -> String {
        format!("type={kind}&start={}&end={}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> { parse_iso_date(s).ok_or_else(|| ChartError::InvalidDate(s.to_owned())) }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

type ChangeHandler = Box<dyn FnMut(RangeField, NaiveDate)>;
type ApplyHandler = Box<dyn FnMut(DateRange)>;

/// Start/end inputs with page-supplied change and apply callbacks.
#[derive(Default)]
pub struct RangeFilter {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    on_date_change: Option<ChangeHandler>,
    on_apply: Option<ApplyHandler>,
}

impl RangeFilter {
    pub fn new() -> Self { Self::default() }

    pub fn with_range(range: DateRange) -> Self {
        Self { start: Some(range.start), end: Some(range.end), ..Self::default() }
    }

    pub fn with_change_handler(mut self, f: impl FnMut(RangeField, NaiveDate) + 'static) -> Self {
        self.on_date_change = Some(Box::new(f));
        self
    }

    pub fn with_apply_handler(mut self, f: impl FnMut(DateRange) + 'static) -> Self {
        self.on_apply = Some(Box::new(f));
        self
    }

    pub fn start(&self) -> Option<NaiveDate> { self.start }
    pub fn end(&self) -> Option<NaiveDate> { self.end }

    /// A date input changed. Invalid text leaves the stored value untouched.
    pub fn on_change(&mut self, field: RangeField, value: &str) -> Result<()> {
        let date = parse_date(value).inspect_err(|_| warn!(?field, value, "rejected date input"))?;
        match field {
            RangeField::Start => self.start = Some(date),
            RangeField::End => self.end = Some(date),
        }
        if let Some(f) = self.on_date_change.as_mut() {
            f(field, date);
        }
        Ok(())
    }

    /// Validate and forward the range to the page.
    pub fn apply(&mut self) -> Result<DateRange> {
        let start = self.start.ok_or(ChartError::IncompleteRange("start"))?;
        let end = self.end.ok_or(ChartError::IncompleteRange("end"))?;
        let range = DateRange::new(start, end).inspect_err(|e| warn!(error = %e, "rejected date range"))?;
        if let Some(f) = self.on_apply.as_mut() {
            f(range);
        }
        Ok(range)
    }
}

impl fmt::Debug for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeFilter").field("start", &self.start).field("end", &self.end).finish_non_exhaustive()
    }
}
