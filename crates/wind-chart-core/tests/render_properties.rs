// File: crates/wind-chart-core/tests/render_properties.rs
// Purpose: Scene-level properties of the renderer: domains, color bands, layout and idempotence.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::json;
use wind_chart_core::marks::MarkKind;
use wind_chart_core::scene::{Role, Shape, Tone};
use wind_chart_core::time::to_secs;
use wind_chart_core::{
    AdapterOptions, Breakpoint, ChartConfig, DailyAggregateRow, DataAdapter, Dataset, RenderOutcome, RendererEngine,
    TimeSeriesPoint, WindObservation, XScale,
};

fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap() }

fn series(minutes: &[i64]) -> Dataset {
    Dataset::Series(
        minutes
            .iter()
            .enumerate()
            .map(|(i, m)| TimeSeriesPoint {
                timestamp: t0() + Duration::minutes(*m),
                actual: 8.0 + i as f64,
                predicted: Some(9.0 + i as f64 * 0.5),
            })
            .collect(),
    )
}

fn daily(bias: &[f64]) -> Dataset {
    Dataset::Daily(
        bias.iter()
            .enumerate()
            .map(|(i, b)| DailyAggregateRow {
                date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap() + Duration::days(i as i64),
                sample_count: 144,
                coverage: 1.0,
                mae: 1.0 + i as f64,
                rmse: 2.0,
                bias: *b,
                smape: 0.1,
                mean_actual: 12.0,
                mean_predicted: 12.0 + b,
            })
            .collect(),
    )
}

fn wind(speeds: &[f64]) -> Dataset {
    Dataset::Wind(
        speeds
            .iter()
            .enumerate()
            .map(|(i, s)| WindObservation {
                timestamp: t0() + Duration::hours(i as i64),
                speed_knots: *s,
                gust_knots: Some(s + 4.0),
                direction_degrees: (i * 15 % 360) as f64,
                direction_text: "N".into(),
            })
            .collect(),
    )
}

#[test]
fn time_domain_equals_data_extent() {
    let data = series(&[0, 7, 31, 95, 240]);
    for config in [ChartConfig::line(), ChartConfig::arrow()] {
        let mut engine = RendererEngine::new();
        let dataset = if config.kind == MarkKind::Arrow { wind(&[5.0, 8.0, 12.0]) } else { data.clone() };
        assert_eq!(engine.render(&dataset, &config, Breakpoint::Desktop, Some(1000.0)), RenderOutcome::Rendered);
        let time = engine.scales().and_then(|s| s.time()).expect("time scale");
        let expected = match &dataset {
            Dataset::Series(p) => (to_secs(p[0].timestamp), to_secs(p[p.len() - 1].timestamp)),
            Dataset::Wind(o) => (to_secs(o[0].timestamp), to_secs(o[o.len() - 1].timestamp)),
            Dataset::Daily(_) => unreachable!(),
        };
        assert_eq!(time.domain(), expected, "{:?}", config.kind);
    }
}

#[test]
fn bar_fill_follows_bias_band_with_inclusive_neutral_edges() {
    let mut engine = RendererEngine::new();
    let biases = [-0.5, -0.1, 0.0, 0.1, 0.1001, 0.5];
    engine.render(&daily(&biases), &ChartConfig::bar(), Breakpoint::Desktop, Some(900.0));
    let tones: Vec<Tone> = engine.scene().plot.with_role(Role::Bar).filter_map(|e| e.style.fill).collect();
    assert_eq!(tones, [Tone::Under, Tone::Neutral, Tone::Neutral, Tone::Neutral, Tone::Over, Tone::Over]);
}

#[test]
fn rerender_with_same_inputs_is_identical() {
    let config = ChartConfig::line();
    let data = series(&[0, 10, 20, 30, 40, 50, 60, 600, 1400]);
    let mut engine = RendererEngine::new();
    engine.render(&data, &config, Breakpoint::Mobile, Some(500.0));
    let first = engine.scene().clone();
    engine.render(&data, &config, Breakpoint::Mobile, Some(500.0));
    assert_eq!(engine.scene(), &first);
    assert!(!first.plot.is_empty());
}

#[test]
fn seventy_two_arrows_band_by_speed() {
    let speeds: Vec<f64> = (0..72).map(|i| 5.0 + (i / 4) as f64).collect();
    assert_eq!((speeds[0], speeds[71]), (5.0, 22.0));
    let mut engine = RendererEngine::new();
    engine.render(&wind(&speeds), &ChartConfig::arrow(), Breakpoint::Desktop, Some(1200.0));
    let plot = &engine.scene().plot;
    let arrows: Vec<_> = plot.with_role(Role::Arrow).collect();
    assert_eq!(arrows.len(), 72);
    for el in &arrows {
        let speed = speeds[el.datum.expect("arrow datum")];
        let want = if speed <= 10.0 {
            Tone::Low
        } else if speed <= 17.0 {
            Tone::Mid
        } else {
            Tone::High
        };
        assert_eq!(el.style.fill, Some(want), "speed {speed}");
    }
    let count = |t: Tone| arrows.iter().filter(|e| e.style.fill == Some(t)).count();
    assert_eq!((count(Tone::Low), count(Tone::Mid), count(Tone::High)), (24, 28, 20));

    // Gusts are drawn first, and every glyph center clears the plot bottom by 18 px.
    let first_arrow = plot.elements.iter().position(|e| e.role == Role::Arrow).unwrap();
    let last_gust = plot.elements.iter().rposition(|e| e.role == Role::GustArrow).unwrap();
    assert!(last_gust < first_arrow);
    let bottom = engine.scales().unwrap().frame.plot_bottom();
    for el in plot.with_role(Role::Arrow) {
        let Shape::Glyph { origin, rotation_deg, .. } = &el.shape else { panic!("glyph expected") };
        assert!(origin.y <= bottom - 18.0);
        assert!(*rotation_deg >= 180.0 && *rotation_deg < 540.0);
    }
}

#[test]
fn missing_day_still_spaces_bars_evenly() {
    let rows: Vec<_> = (0..7)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap() + Duration::days(i);
            let date = if i == 3 { serde_json::Value::Null } else { json!(date.format("%Y-%m-%d").to_string()) };
            json!({
                "date": date,
                "n": 144, "coverage": 0.99, "mae": 1.5 + i as f64 * 0.2, "rmse": 2.0,
                "bias": 0.0, "smape": 0.12, "mean_actual": 11.0, "mean_predicted": 11.0
            })
        })
        .collect();
    let adapter = DataAdapter::new(AdapterOptions::default());
    let dataset = adapter.adapt(MarkKind::Bar, &rows).rows;
    assert_eq!(dataset.len(), 6);

    let mut engine = RendererEngine::new();
    engine.render(&dataset, &ChartConfig::bar(), Breakpoint::Desktop, Some(800.0));
    let rects: Vec<_> = engine
        .scene()
        .plot
        .with_role(Role::Bar)
        .map(|e| match &e.shape {
            Shape::Rect(r) => *r,
            other => panic!("bar drawn as {other:?}"),
        })
        .collect();
    assert_eq!(rects.len(), 6);
    let pitch = rects[1].left - rects[0].left;
    assert!(pitch > 0.0);
    for w in rects.windows(2) {
        assert!((w[1].left - w[0].left - pitch).abs() < 1e-3);
        assert!((w[1].width() - w[0].width()).abs() < 1e-3);
    }
}

#[test]
fn empty_dataset_renders_nothing() {
    let mut engine = RendererEngine::new();
    engine.render(&series(&[0, 10]), &ChartConfig::line(), Breakpoint::Desktop, Some(800.0));
    assert!(!engine.scene().is_empty());
    let out = engine.render(&Dataset::Series(Vec::new()), &ChartConfig::line(), Breakpoint::Desktop, Some(800.0));
    assert_eq!(out, RenderOutcome::Empty);
    assert!(engine.scene().is_empty());
    assert!(engine.scales().is_none());
}

#[test]
fn unmeasured_container_skips_and_keeps_previous_scene() {
    let mut engine = RendererEngine::new();
    let data = series(&[0, 10, 20]);
    engine.render(&data, &ChartConfig::line(), Breakpoint::Desktop, Some(800.0));
    let before = engine.scene().clone();
    assert_eq!(engine.render(&series(&[0, 5]), &ChartConfig::line(), Breakpoint::Desktop, None), RenderOutcome::Skipped);
    assert_eq!(engine.render(&data, &ChartConfig::line(), Breakpoint::Desktop, Some(0.0)), RenderOutcome::Skipped);
    assert_eq!(engine.scene(), &before);
}

#[test]
fn long_series_grow_the_surface_instead_of_squeezing() {
    let config = ChartConfig::line();
    let day: Vec<i64> = (0..=24 * 6).map(|i| i * 10).collect();
    let data = series(&day);
    let mut engine = RendererEngine::new();
    engine.render(&data, &config, Breakpoint::Desktop, Some(1070.0));
    let desktop = engine.scales().unwrap().frame;
    // 24 h at 12 visible hours is twice the 1000 px inner width.
    assert!((desktop.chart_width - 2000.0).abs() < 1.0);
    engine.render(&data, &config, Breakpoint::Mobile, Some(1070.0));
    assert!(engine.scales().unwrap().frame.chart_width > desktop.chart_width);
}

#[test]
fn line_axis_has_a_thirty_knot_floor() {
    let mut engine = RendererEngine::new();
    engine.render(&series(&[0, 60]), &ChartConfig::line(), Breakpoint::Desktop, Some(800.0));
    assert_eq!(engine.scales().unwrap().y.domain(), (0.0, 30.0));
}

#[test]
fn scatter_axes_share_a_domain() {
    let mut engine = RendererEngine::new();
    engine.render(&series(&[0, 10, 20, 30]), &ChartConfig::scatter(), Breakpoint::Desktop, Some(600.0));
    let scales = engine.scales().unwrap();
    let XScale::Value(x) = scales.x else { panic!("value scale expected") };
    assert_eq!(x.domain(), scales.y.domain());
    assert_eq!(engine.scene().plot.count(Role::Diagonal), 1);
    assert_eq!(engine.scene().plot.count(Role::Point), 4);
}

#[test]
fn midnight_dividers_carry_the_new_date() {
    let mut engine = RendererEngine::new();
    // 20:00 to 04:00 Brisbane crosses one midnight.
    let start = Utc.with_ymd_and_hms(2025, 10, 1, 10, 0, 0).unwrap();
    let points = (0..=8)
        .map(|h| TimeSeriesPoint { timestamp: start + Duration::hours(h), actual: 10.0, predicted: None })
        .collect();
    engine.render(&Dataset::Series(points), &ChartConfig::line(), Breakpoint::Desktop, Some(900.0));
    let plot = &engine.scene().plot;
    assert_eq!(plot.count(Role::DayDivider), 1);
    let label = plot.with_role(Role::DayLabel).next().unwrap();
    let Shape::Text { text, .. } = &label.shape else { panic!("text expected") };
    assert_eq!(text, "2025-10-02");
    // No predictions: only the actual line is drawn.
    assert_eq!(plot.count(Role::PredictedLine), 0);
    assert_eq!(plot.count(Role::ActualLine), 1);
}
