// File: crates/wind-chart-core/tests/adapter.rs
// Purpose: Row normalization end to end: envelopes, day wrapping, dedup, filtering, trimming.

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use wind_chart_core::{parse_envelope, AdapterOptions, DataAdapter, Dataset, MarkKind};

fn adapter() -> DataAdapter {
    DataAdapter::new(AdapterOptions {
        anchor_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        ..AdapterOptions::default()
    })
}

#[test]
fn hhmm_samples_cross_midnight_monotonically() {
    let rows = vec![
        json!({"time": "23:40", "actual": 10, "predicted": 11}),
        json!({"time": "23:50", "actual": 11, "predicted": 11}),
        json!({"time": "00:00", "actual": 12, "predicted": 10}),
        json!({"time": "00:10", "actual": 13, "predicted": 12}),
    ];
    let out = adapter().series(&rows, false);
    assert_eq!(out.dropped, 0);
    let ts: Vec<_> = out.rows.iter().map(|p| p.timestamp).collect();
    assert!(ts.windows(2).all(|w| w[0] < w[1]));
    // 00:00 Brisbane on 2 Oct is 14:00 UTC on 1 Oct.
    assert_eq!(ts[2], Utc.with_ymd_and_hms(2025, 10, 1, 14, 0, 0).unwrap());
}

#[test]
fn non_finite_and_missing_values_are_dropped() {
    let rows = vec![
        json!({"time": "2025-10-01 06:00", "actual": 10}),
        json!({"time": "2025-10-01 06:10", "actual": "NaN"}),
        json!({"time": "2025-10-01 06:20"}),
        json!({"time": "not a time", "actual": 3}),
        json!({"time": "2025-10-01 06:30", "actual": 9, "predicted": "abc"}),
    ];
    let out = adapter().series(&rows, false);
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.dropped, 4);
}

#[test]
fn duplicate_timestamps_keep_the_later_row() {
    let rows = vec![
        json!({"timestamp": "2025-10-01T06:00:00+10:00", "actual": 1}),
        json!({"timestamp": "2025-10-01T05:00:00+10:00", "actual": 2}),
        json!({"timestamp": "2025-10-01T06:00:00+10:00", "actual": 3}),
    ];
    let out = adapter().series(&rows, false);
    assert_eq!(out.rows.len(), 2);
    assert_eq!(out.rows[1].actual, 3.0);
    assert_eq!(out.dropped, 1);
}

#[test]
fn daily_rows_sort_by_date_and_skip_undated() {
    let row = |date: Option<&str>, mae: f64| {
        json!({
            "date": date, "n": 144, "coverage": 1.0, "mae": mae, "rmse": mae * 1.2,
            "bias": 0.0, "smape": 0.1, "mean_actual": 12.0, "mean_predicted": 12.0
        })
    };
    let rows = vec![row(Some("2025-10-02"), 2.0), row(None, 9.0), row(Some("2025-10-01"), 1.0)];
    let out = adapter().daily(&rows);
    let keys: Vec<String> = out.rows.iter().map(|r| r.date_key()).collect();
    assert_eq!(keys, ["2025-10-01", "2025-10-02"]);
    assert_eq!(out.dropped, 1);
}

#[test]
fn wind_keeps_latest_seventy_two_and_normalizes_direction() {
    let rows: Vec<_> = (0..80)
        .map(|i| {
            json!({
                "x": 1_759_269_600 + i * 3600,
                "wind_knots": 10,
                "wind_gust_knots": null,
                "direction_degrees": -90 + i,
            })
        })
        .collect();
    let adapter = DataAdapter::new(AdapterOptions { max_points: Some(72), ..AdapterOptions::default() });
    let Dataset::Wind(obs) = adapter.adapt(MarkKind::Arrow, &rows).rows else { panic!("wind dataset expected") };
    assert_eq!(obs.len(), 72);
    // The first 8 hours were trimmed; direction -82 wraps to 278.
    assert_eq!(obs[0].direction_degrees, 278.0);
    assert_eq!(obs[0].direction_text, "W");
    assert!(obs.iter().all(|o| (0.0..360.0).contains(&o.direction_degrees) && o.gust_knots.is_none()));
}

#[test]
fn scatter_requires_both_values() {
    let rows = vec![
        json!({"time": "06:00", "actual": 10, "predicted": 12}),
        json!({"time": "06:10", "actual": 10}),
    ];
    let out = adapter().adapt(MarkKind::Scatter, &rows);
    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.dropped, 1);
}

#[test]
fn envelope_feeds_the_adapter() {
    let body = r#"{"data":[{"time":"06:00","actual":"7.5","forecast":8}]}"#;
    let rows = parse_envelope(body).expect("envelope");
    let out = adapter().adapt(MarkKind::Line, &rows);
    let Dataset::Series(points) = out.rows else { panic!("series expected") };
    assert_eq!(points[0].predicted, Some(8.0));
}

#[test]
fn malformed_gusts_drop_the_row_but_missing_gusts_do_not() {
    let rows = vec![
        json!({"x": "06:00", "wind_knots": 12, "wind_gust_knots": "NaN", "direction_degrees": 90}),
        json!({"x": "07:00", "wind_knots": 13, "wind_gust_knots": "abc", "direction_degrees": 90}),
        json!({"x": "08:00", "wind_knots": 14, "wind_gust_knots": null, "direction_degrees": 90}),
        json!({"x": "09:00", "wind_knots": 15, "direction_degrees": 90}),
        json!({"x": "10:00", "wind_knots": 16, "wind_gust_knots": "21", "direction_degrees": 90}),
    ];
    let out = adapter().wind(&rows);
    assert_eq!(out.dropped, 2);
    let gusts: Vec<_> = out.rows.iter().map(|o| o.gust_knots).collect();
    assert_eq!(gusts, vec![None, None, Some(21.0)]);
}

#[test]
fn daily_rows_accept_the_day_alias() {
    let rows = vec![json!({
        "day": "2025-10-02", "n": 144, "coverage": 1.0, "mae": 1.2, "rmse": 1.5,
        "bias": 0.0, "smape": 0.1, "mean_actual": 12.0, "mean_predicted": 12.0
    })];
    let out = adapter().daily(&rows);
    assert_eq!(out.dropped, 0);
    assert_eq!(out.rows[0].date, NaiveDate::from_ymd_opt(2025, 10, 2).unwrap());
}
