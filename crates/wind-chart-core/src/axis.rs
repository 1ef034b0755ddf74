// File: crates/wind-chart-core/src/axis.rs
// Summary: Axes, gridlines and midnight day dividers. The y axis goes on the fixed axis surface,
// everything else on the scrollable plot surface.

use crate::config::ChartConfig;
use crate::geometry::Point;
use crate::grid::{format_tick, nice_ticks, stepped_ticks};
use crate::model::Dataset;
use crate::scale::{Scales, XScale};
use crate::scene::{Element, Role, Shape, Style, Surface, TextAnchor, Tone};
use crate::time::{day_starts, format_brisbane, format_day_month, from_secs, hour_ticks};

const TICK_LEN: f32 = 5.0;
const LABEL_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 12.0;
/// Hour labels closer than this are thinned out.
const MIN_LABEL_PITCH: f32 = 44.0;

/// Values at which the y axis is ticked.
pub fn y_ticks(scales: &Scales, config: &ChartConfig) -> Vec<f64> {
    let (d0, d1) = scales.y.domain();
    match config.vertical.tick_step {
        Some(step) => stepped_ticks(d0, d1, step),
        None => nice_ticks(d0, d1, config.vertical.tick_count),
    }
}

fn text(role: Role, s: String, at: Point, size: f32, anchor: TextAnchor, rotation_deg: f32) -> Element {
    Element::new(role, Shape::Text { text: s, at, size, anchor, rotation_deg }, Style::fill(Tone::Label))
}

fn line(role: Role, from: Point, to: Point, style: Style) -> Element {
    Element::new(role, Shape::Line { from, to }, style)
}

/// Left axis with tick labels and a rotated title.
pub fn draw_y_axis(scales: &Scales, config: &ChartConfig, surface: &mut Surface) {
    let frame = scales.frame;
    let x = frame.axis_width() - 0.5;
    let axis = Style::stroke(Tone::Axis, 1.0);
    surface.push(line(Role::AxisLine, Point::new(x, frame.plot_top()), Point::new(x, frame.plot_bottom()), axis));
    for v in y_ticks(scales, config) {
        let y = scales.y.to_px(v);
        surface.push(line(Role::Tick, Point::new(x - TICK_LEN, y), Point::new(x, y), axis));
        surface.push(text(
            Role::TickLabel,
            format_tick(v),
            Point::new(x - TICK_LEN - 3.0, y + LABEL_SIZE * 0.35),
            LABEL_SIZE,
            TextAnchor::End,
            0.0,
        ));
    }
    let mid = (frame.plot_top() + frame.plot_bottom()) * 0.5;
    surface.push(text(Role::AxisTitle, config.y_title.clone(), Point::new(TITLE_SIZE + 2.0, mid), TITLE_SIZE, TextAnchor::Middle, -90.0));
}

/// Horizontal gridlines across the whole data surface.
pub fn draw_gridlines(scales: &Scales, config: &ChartConfig, surface: &mut Surface) {
    let w = scales.frame.chart_width;
    let style = Style::stroke(Tone::Grid, 1.0).with_opacity(0.6);
    for v in y_ticks(scales, config) {
        let y = scales.y.to_px(v);
        surface.push(line(Role::Grid, Point::new(0.0, y), Point::new(w, y), style));
    }
}

/// Bottom axis: hourly `HH:MM` ticks, `DD/MM` day labels, or value ticks for scatter.
pub fn draw_x_axis(dataset: &Dataset, scales: &Scales, config: &ChartConfig, surface: &mut Surface) {
    let frame = scales.frame;
    let bottom = frame.plot_bottom();
    let axis = Style::stroke(Tone::Axis, 1.0);
    let label_y = bottom + TICK_LEN + LABEL_SIZE + 2.0;
    surface.push(line(Role::AxisLine, Point::new(0.0, bottom), Point::new(frame.chart_width, bottom), axis));

    match (&scales.x, dataset) {
        (XScale::Time(time), _) => {
            let (start, end) = time.domain();
            let ticks = hour_ticks(start, end);
            let pitch = time.to_px(start + 3600.0) - time.to_px(start);
            let every = if pitch > 0.0 { (MIN_LABEL_PITCH / pitch).ceil().max(1.0) as usize } else { 1 };
            for (i, t) in ticks.iter().enumerate() {
                let x = time.to_px(*t);
                surface.push(line(Role::Tick, Point::new(x, bottom), Point::new(x, bottom + TICK_LEN), axis));
                if i % every != 0 {
                    continue;
                }
                let Some(ts) = from_secs(*t) else { continue };
                surface.push(text(Role::TickLabel, format_brisbane(ts, "%H:%M"), Point::new(x, label_y), LABEL_SIZE, TextAnchor::Middle, 0.0));
            }
        }
        (XScale::Band(band), Dataset::Daily(rows)) => {
            for (i, row) in rows.iter().enumerate() {
                let x = band.center(i);
                surface.push(line(Role::Tick, Point::new(x, bottom), Point::new(x, bottom + TICK_LEN), axis));
                surface.push(text(Role::TickLabel, format_day_month(row.date), Point::new(x, label_y), LABEL_SIZE, TextAnchor::Middle, 0.0));
            }
        }
        (XScale::Value(value), _) => {
            let (d0, d1) = value.domain();
            for v in nice_ticks(d0, d1, config.vertical.tick_count) {
                let x = value.to_px(v);
                surface.push(line(Role::Tick, Point::new(x, bottom), Point::new(x, bottom + TICK_LEN), axis));
                surface.push(text(Role::TickLabel, format_tick(v), Point::new(x, label_y), LABEL_SIZE, TextAnchor::Middle, 0.0));
            }
        }
        (XScale::Band(_), _) => {}
    }

    if let Some(title) = &config.x_title {
        let at = Point::new(frame.chart_width * 0.5, bottom + frame.margins.bottom - 6.0);
        surface.push(text(Role::AxisTitle, title.clone(), at, TITLE_SIZE, TextAnchor::Middle, 0.0));
    }
}

/// Dashed verticals at Brisbane midnights, labelled with the new date.
pub fn draw_day_dividers(scales: &Scales, surface: &mut Surface) {
    let Some(time) = scales.time() else { return };
    let (start, end) = time.domain();
    let frame = scales.frame;
    let style = Style::stroke(Tone::Divider, 1.0).dashed(3.0, 3.0);
    for t in day_starts(start, end) {
        let x = time.to_px(t);
        surface.push(line(Role::DayDivider, Point::new(x, frame.plot_top()), Point::new(x, frame.plot_bottom()), style));
        let Some(ts) = from_secs(t) else { continue };
        surface.push(text(
            Role::DayLabel,
            format_brisbane(ts, "%Y-%m-%d"),
            Point::new(x + 4.0, frame.plot_top() - 8.0),
            LABEL_SIZE,
            TextAnchor::Start,
            0.0,
        ));
    }
}
