// File: crates/wind-chart-core/src/payload.rs
// Summary: Tooltip panel contents for each chart kind, built from the hovered datum.

use crate::marks::MarkKind;
use crate::model::{DailyAggregateRow, Dataset, TimeSeriesPoint, WindObservation};
use crate::time::{format_aus_date, format_hhmm, format_stamp};

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipPayload {
    Line(TimeSeriesPoint),
    Bar(DailyAggregateRow),
    Scatter(TimeSeriesPoint),
    Arrow(WindObservation),
}

impl TooltipPayload {
    /// Payload for row `idx`; `None` if the kind and dataset disagree or the index is out of range.
    pub fn from_dataset(kind: MarkKind, dataset: &Dataset, idx: usize) -> Option<Self> {
        match (kind, dataset) {
            (MarkKind::Line, Dataset::Series(v)) => v.get(idx).cloned().map(Self::Line),
            (MarkKind::Scatter, Dataset::Series(v)) => v.get(idx).cloned().map(Self::Scatter),
            (MarkKind::Bar, Dataset::Daily(v)) => v.get(idx).cloned().map(Self::Bar),
            (MarkKind::Arrow, Dataset::Wind(v)) => v.get(idx).cloned().map(Self::Arrow),
            _ => None,
        }
    }

    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Line(_) => MarkKind::Line,
            Self::Bar(_) => MarkKind::Bar,
            Self::Scatter(_) => MarkKind::Scatter,
            Self::Arrow(_) => MarkKind::Arrow,
        }
    }

    /// Panel text, one entry per row.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Line(p) => {
                let mut out = vec![format!("Time: {}", format_stamp(p.timestamp)), format!("Actual: {} kn", p.actual.round())];
                match p.predicted {
                    Some(pred) => {
                        out.push(format!("Predicted: {} kn", pred.round()));
                        out.push(format!("Error: {} kn", (p.actual - pred).round()));
                    }
                    None => out.push("Predicted: n/a".to_owned()),
                }
                out
            }
            Self::Bar(d) => vec![
                format_aus_date(d.date),
                format!("n: {} (coverage {:.1}%)", d.sample_count, d.coverage * 100.0),
                format!("MAE: {:.2} kn", d.mae),
                format!("RMSE: {:.2} kn", d.rmse),
                format!("Bias: {:.2} kn", d.bias),
                format!("sMAPE: {:.1}%", d.smape * 100.0),
                format!("Mean A/P: {:.2} / {:.2}", d.mean_actual, d.mean_predicted),
            ],
            Self::Scatter(p) => {
                let pred = p.predicted.unwrap_or(f64::NAN);
                vec![
                    format_stamp(p.timestamp),
                    format!("Forecast / Actual: {:.2} / {:.2} kn", pred, p.actual),
                    format!("Error (A\u{2212}P): {:.2} kn", p.actual - pred),
                    "Diagonal = perfect forecast".to_owned(),
                ]
            }
            Self::Arrow(o) => {
                let mut out = vec![format!("Time: {}", format_hhmm(o.timestamp)), format!("Average: {} kn", o.speed_knots)];
                if let Some(g) = o.gust_knots {
                    out.push(format!("Gust: {g} kn"));
                }
                out.push(format!("Direction: {}", o.direction_text));
                out
            }
        }
    }
}
