// File: crates/wind-chart-core/tests/tooltip.rs
// Purpose: Tooltip lifecycle through a mounted chart instance: hover, dismissal triggers,
// timer replacement, placement and teardown.

use std::time::{Duration, Instant};

use chrono::{Duration as Span, NaiveDate, TimeZone, Utc};
use wind_chart_core::{
    ChartConfig, ChartInstance, ChartLayout, ChartState, DailyAggregateRow, Dataset, DismissReason, Placement, Point,
    PointerHub, PointerKind, Rect, TimeSeriesPoint,
};

fn ms(n: u64) -> Duration { Duration::from_millis(n) }

/// Samples every 10 minutes starting 06:00 Brisbane.
fn series(n: usize) -> Dataset {
    let start = Utc.with_ymd_and_hms(2025, 10, 1, 20, 0, 0).unwrap();
    Dataset::Series(
        (0..n)
            .map(|i| TimeSeriesPoint {
                timestamp: start + Span::minutes(10 * i as i64),
                actual: 10.0 + i as f64,
                predicted: Some(11.0),
            })
            .collect(),
    )
}

/// Line chart whose data surface is exactly 600 px wide and starts at client x = 50.
fn line_chart(n: usize, now: Instant) -> ChartInstance {
    let mut chart = ChartInstance::new(ChartConfig::line());
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 670.0, 300.0), 1024.0), now);
    chart.set_dataset(series(n), now);
    assert_eq!(chart.state(), &ChartState::Rendered { resized: false });
    chart
}

#[test]
fn hover_shows_nearest_then_times_out() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    // Surface x 590 is closest to the last sample at 600.
    chart.pointer_move(Point::new(640.0, 120.0), PointerKind::Mouse, t0);
    assert!(chart.tooltip().is_visible());
    assert_eq!(chart.tooltip().state().datum, Some(6));

    chart.tick(t0 + ms(999));
    assert!(chart.tooltip().is_visible());
    assert!(chart.tick(t0 + ms(1000)));
    assert!(!chart.tooltip().is_visible());
    assert_eq!(chart.tooltip().last_dismissal(), Some(DismissReason::Timeout));
}

#[test]
fn equidistant_pointer_resolves_to_later_sample() {
    let t0 = Instant::now();
    let mut chart = line_chart(3, t0);
    // Samples sit at surface x 0, 300, 600; x 150 is halfway between the first two.
    chart.pointer_move(Point::new(200.0, 120.0), PointerKind::Mouse, t0);
    assert_eq!(chart.tooltip().state().datum, Some(1));
}

#[test]
fn newer_show_replaces_stale_timer() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    chart.pointer_move(Point::new(100.0, 120.0), PointerKind::Mouse, t0);
    chart.pointer_move(Point::new(110.0, 120.0), PointerKind::Mouse, t0 + ms(800));
    chart.tick(t0 + ms(1000));
    assert!(chart.tooltip().is_visible(), "the first deadline must not hide the newer tooltip");
    chart.tick(t0 + ms(1800));
    assert!(!chart.tooltip().is_visible());
}

#[test]
fn pointer_down_outside_container_hides_via_hub() {
    let t0 = Instant::now();
    let hub = PointerHub::new();
    let mut chart = line_chart(7, t0);
    chart.mount(&hub);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Mouse, t0);

    // A press inside the container is left to the chart itself.
    hub.dispatch_pointer_down(Point::new(300.0, 120.0));
    assert!(chart.tooltip().is_visible());

    hub.dispatch_pointer_down(Point::new(900.0, 10.0));
    assert!(!chart.tooltip().is_visible());
    assert_eq!(chart.tooltip().last_dismissal(), Some(DismissReason::PointerDownOutside));
}

#[test]
fn pointer_down_inside_but_off_mark_hides() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Mouse, t0);
    // Bottom margin, well away from either line.
    chart.pointer_down(Point::new(300.0, 295.0));
    assert_eq!(chart.tooltip().last_dismissal(), Some(DismissReason::PointerDownOffMark));
}

#[test]
fn leaving_the_data_surface_hides() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Mouse, t0);
    // Over the fixed y-axis surface.
    chart.pointer_move(Point::new(20.0, 120.0), PointerKind::Mouse, t0 + ms(10));
    assert_eq!(chart.tooltip().last_dismissal(), Some(DismissReason::PointerLeave));
}

#[test]
fn touch_end_hides_immediately() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Touch, t0);
    chart.touch_end();
    assert!(!chart.tooltip().is_visible());
    assert_eq!(chart.next_deadline(), None);
}

#[test]
fn panel_flips_across_the_viewport_midline() {
    let t0 = Instant::now();
    let mut chart = line_chart(7, t0);
    chart.pointer_move(Point::new(200.0, 150.0), PointerKind::Mouse, t0);
    let pos = chart.tooltip_position().unwrap();
    assert_eq!(pos.top, 50.0);
    assert_eq!(pos.placement, Placement::Left(220.0));

    chart.pointer_move(Point::new(600.0, 150.0), PointerKind::Mouse, t0);
    assert_eq!(chart.tooltip_position().unwrap().placement, Placement::Right(1024.0 - 600.0 + 20.0));
}

#[test]
fn bars_only_show_while_over_a_bar() {
    let t0 = Instant::now();
    let rows = (0..3)
        .map(|i| DailyAggregateRow {
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap() + Span::days(i),
            sample_count: 144,
            coverage: 1.0,
            mae: 4.0,
            rmse: 5.0,
            bias: 0.3,
            smape: 0.2,
            mean_actual: 12.0,
            mean_predicted: 12.3,
        })
        .collect();
    let mut chart = ChartInstance::new(ChartConfig::bar());
    // Inner width 600: bands are 193 px wide with 10 px gaps.
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 668.0, 304.0), 1024.0), t0);
    chart.set_dataset(Dataset::Daily(rows), t0);

    chart.pointer_move(Point::new(56.0 + 100.0, 250.0), PointerKind::Mouse, t0);
    assert_eq!(chart.tooltip().state().datum, Some(0));
    chart.pointer_move(Point::new(56.0 + 198.0, 250.0), PointerKind::Mouse, t0);
    assert!(!chart.tooltip().is_visible());
    chart.pointer_move(Point::new(56.0 + 210.0, 250.0), PointerKind::Mouse, t0);
    assert_eq!(chart.tooltip().state().datum, Some(1));
    assert_eq!(chart.tooltip_position().unwrap().top, 250.0 - 110.0);
}

#[test]
fn teardown_cancels_timers_and_releases_the_hub() {
    let t0 = Instant::now();
    let hub = PointerHub::new();
    let mut chart = line_chart(7, t0);
    chart.mount(&hub);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Mouse, t0);
    assert_eq!(hub.len(), 1);

    chart.teardown();
    assert_eq!(chart.state(), &ChartState::Detached);
    assert!(hub.is_empty());
    assert_eq!(chart.next_deadline(), None);
    chart.pointer_move(Point::new(300.0, 120.0), PointerKind::Mouse, t0 + ms(5));
    assert!(!chart.tooltip().is_visible());
}

#[test]
fn dropping_a_chart_unsubscribes() {
    let hub = PointerHub::new();
    {
        let mut chart = ChartInstance::new(ChartConfig::arrow());
        chart.mount(&hub);
        assert_eq!(hub.len(), 1);
    }
    assert!(hub.is_empty());
    assert_eq!(hub.dispatch_pointer_down(Point::new(0.0, 0.0)), 0);
}

#[test]
fn resize_rerenders_and_scrolls_to_latest() {
    let t0 = Instant::now();
    let mut chart = ChartInstance::new(ChartConfig::line());
    // Data before the container is measured: render is deferred.
    chart.set_dataset(series(24 * 6), t0);
    assert_eq!(chart.state(), &ChartState::Empty);
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 670.0, 300.0), 1024.0), t0);
    assert_eq!(chart.state(), &ChartState::Rendered { resized: false });

    let region = chart.scroll_region();
    assert!(region.content_width > region.visible_width);
    assert_eq!(chart.next_deadline(), Some(t0 + ms(100)));
    assert!(chart.tick(t0 + ms(100)));
    assert_eq!(chart.scroll_region().scroll_left, region.max_scroll());

    // Crossing the mobile breakpoint rebuilds the scene for the new layout.
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 400.0, 300.0), 420.0), t0 + ms(200));
    assert_eq!(chart.state(), &ChartState::Rendered { resized: true });

    chart.navigate();
    assert_eq!(chart.scroll_region().scroll_left, 0.0);
}

#[test]
fn caller_built_dataset_is_sorted_and_deduplicated() {
    let t0 = Instant::now();
    let Dataset::Series(mut points) = series(3) else { unreachable!() };
    points.reverse();
    let mut replacement = points[1].clone();
    replacement.actual = 42.0;
    points.push(replacement);

    let mut chart = ChartInstance::new(ChartConfig::line());
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, 670.0, 300.0), 1024.0), t0);
    chart.set_dataset(Dataset::Series(points), t0);
    assert_eq!(chart.state(), &ChartState::Rendered { resized: false });

    let Dataset::Series(kept) = chart.dataset() else { panic!("series dataset expected") };
    assert_eq!(kept.len(), 3);
    assert!(kept.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert_eq!(kept[1].actual, 42.0, "the later duplicate wins");

    let (d0, d1) = chart.scales().and_then(|s| s.time()).map(|t| t.domain()).unwrap();
    assert!(d0 < d1);
    chart.pointer_move(Point::new(200.0, 120.0), PointerKind::Mouse, t0);
    assert_eq!(chart.tooltip().state().datum, Some(1));
}
