// File: crates/wind-chart-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use std::time::Instant;

use chrono::{Duration, TimeZone, Utc};
use wind_chart_core::{
    render_to_rgba8, ChartConfig, ChartInstance, ChartLayout, Dataset, PointerKind, Point, Rect, RenderOptions, Theme,
    WindObservation,
};

fn wind_chart(now: Instant) -> ChartInstance {
    let start = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
    let obs = (0..24)
        .map(|h| WindObservation {
            timestamp: start + Duration::hours(h),
            speed_knots: 6.0 + h as f64 * 0.6,
            gust_knots: Some(10.0 + h as f64 * 0.6),
            direction_degrees: 135.0,
            direction_text: "SE".into(),
        })
        .collect();
    let mut chart = ChartInstance::new(ChartConfig::arrow());
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 500.0, 300.0), 1024.0), now);
    chart.set_dataset(Dataset::Wind(obs), now);
    chart
}

#[test]
fn render_rgba8_buffer() {
    let chart = wind_chart(Instant::now());
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    let (px, w, h, stride) = render_to_rgba8(&chart, &opts).expect("rgba render");
    assert_eq!((w, h), (500, 300));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel is opaque background.
    let bg = opts.theme.background;
    assert_eq!(&px[..4], &[bg.r(), bg.g(), bg.b(), 255]);
}

#[test]
fn tooltip_panel_changes_pixels() {
    let now = Instant::now();
    let mut chart = wind_chart(now);
    let mut opts = RenderOptions { theme: Theme::dark(), ..RenderOptions::default() };
    opts.draw_labels = false;
    let (plain, ..) = render_to_rgba8(&chart, &opts).expect("rgba render");
    chart.pointer_move(Point::new(200.0, 180.0), PointerKind::Mouse, now);
    assert!(chart.tooltip().is_visible());
    let (with_panel, ..) = render_to_rgba8(&chart, &opts).expect("rgba render");
    assert_ne!(plain, with_panel);

    opts.show_tooltip = false;
    let (hidden, ..) = render_to_rgba8(&chart, &opts).expect("rgba render");
    assert_eq!(plain, hidden);
}
