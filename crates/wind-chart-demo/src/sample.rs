// File: crates/wind-chart-demo/src/sample.rs
// Summary: Synthetic API rows for each chart kind, shaped like the forecast service's payloads.

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use wind_chart_core::time::{brisbane_midnight, format_stamp};
use wind_chart_core::MarkKind;

/// Deterministic sea-breeze curve in knots for hour `h` of the day.
fn breeze(h: f64) -> f64 {
    let diurnal = ((h - 15.0) / 24.0 * std::f64::consts::TAU).cos();
    11.0 + 7.0 * diurnal + (h * 1.7).sin() * 1.5
}

pub fn rows(kind: MarkKind, anchor: NaiveDate) -> Vec<Value> {
    match kind {
        MarkKind::Line | MarkKind::Scatter => {
            let start = brisbane_midnight(anchor);
            (0..24 * 6)
                .map(|i| {
                    let h = i as f64 / 6.0;
                    let actual = breeze(h);
                    let predicted = breeze(h - 0.75) * 0.95 + 0.4;
                    json!({
                        "time": format_stamp(start + Duration::minutes(10 * i)),
                        "actual": format!("{actual:.1}"),
                        "predicted": (predicted * 10.0).round() / 10.0,
                    })
                })
                .collect()
        }
        MarkKind::Bar => (0..14)
            .map(|d| {
                let date = anchor - Duration::days(13 - d);
                let bias = ((d as f64) * 0.9).sin() * 0.6;
                let mae = 1.4 + ((d as f64) * 0.5).cos().abs() * 1.8;
                json!({
                    "date": date.format("%Y-%m-%d").to_string(),
                    "n": 130 + d * 3,
                    "coverage": 0.9 + (d % 5) as f64 * 0.02,
                    "mae": mae,
                    "rmse": mae * 1.25,
                    "bias": bias,
                    "smape": 0.08 + mae / 40.0,
                    "mean_actual": 13.0 + bias,
                    "mean_predicted": 13.0,
                })
            })
            .collect(),
        MarkKind::Arrow => (0..72)
            .map(|i| {
                let h = i as f64;
                let speed = breeze(h).max(0.0).round();
                json!({
                    "x": format!("{:02}:00", i % 24),
                    "wind_knots": speed,
                    "wind_gust_knots": if i % 3 == 0 { json!(speed + 6.0) } else { Value::Null },
                    "direction_degrees": (90.0 + h * 5.0) % 360.0,
                })
            })
            .collect(),
    }
}
