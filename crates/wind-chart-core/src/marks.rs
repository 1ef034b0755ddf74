// File: crates/wind-chart-core/src/marks.rs
// Summary: Mark strategies (bars, lines, scatter points, wind arrows) and their color bands.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::geometry::{monotone_x, Path, Point, Rect};
use crate::model::{DailyAggregateRow, TimeSeriesPoint, WindObservation};
use crate::scale::{Scales, XScale};
use crate::scene::{Element, Role, Shape, Style, Surface, Tone};
use crate::time::to_secs;
use crate::types::Breakpoint;

/// Which mark a chart instance draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Bar,
    Line,
    Scatter,
    Arrow,
}

impl MarkKind {
    pub const ALL: [MarkKind; 4] = [MarkKind::Bar, MarkKind::Line, MarkKind::Scatter, MarkKind::Arrow];

    pub fn name(self) -> &'static str {
        match self {
            MarkKind::Bar => "bar",
            MarkKind::Line => "line",
            MarkKind::Scatter => "scatter",
            MarkKind::Arrow => "arrow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl FromStr for MarkKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s).ok_or_else(|| ChartError::UnknownKind(s.to_owned())) }
}

/// Bias classification for daily bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiasBand {
    Over,
    Under,
    Neutral,
}

impl BiasBand {
    pub fn tone(self) -> Tone {
        match self {
            BiasBand::Over => Tone::Over,
            BiasBand::Under => Tone::Under,
            BiasBand::Neutral => Tone::Neutral,
        }
    }
}

/// `Over` above +0.1 kn, `Under` below -0.1 kn; the boundaries themselves are neutral.
pub fn bias_band(bias: f64) -> BiasBand {
    if bias > 0.1 {
        BiasBand::Over
    } else if bias < -0.1 {
        BiasBand::Under
    } else {
        BiasBand::Neutral
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeedBand {
    Low,
    Mid,
    High,
}

impl SpeedBand {
    pub fn tone(self) -> Tone {
        match self {
            SpeedBand::Low => Tone::Low,
            SpeedBand::Mid => Tone::Mid,
            SpeedBand::High => Tone::High,
        }
    }
}

pub fn speed_band(knots: f64) -> SpeedBand {
    if knots <= 10.0 {
        SpeedBand::Low
    } else if knots <= 17.0 {
        SpeedBand::Mid
    } else {
        SpeedBand::High
    }
}

/// Glyph geometry, in px.
const SHAFT_WIDTH: f32 = 7.0;
const SHAFT_LENGTH: f32 = 12.0;
const HEAD_WIDTH: f32 = 12.0;
const HEAD_LENGTH: f32 = 10.0;
/// Arrow centers stay at least this far above the plot bottom.
const ARROW_BOTTOM_CLEARANCE: f32 = 18.0;

/// Upward-pointing arrow centered on the origin.
pub fn arrow_glyph() -> Path {
    let total = SHAFT_LENGTH + HEAD_LENGTH;
    let tip = -total * 0.5;
    let neck = tip + HEAD_LENGTH;
    let tail = total * 0.5;
    let (sw, hw) = (SHAFT_WIDTH * 0.5, HEAD_WIDTH * 0.5);
    Path::polygon(&[
        Point::new(0.0, tip),
        Point::new(hw, neck),
        Point::new(sw, neck),
        Point::new(sw, tail),
        Point::new(-sw, tail),
        Point::new(-sw, neck),
        Point::new(-hw, neck),
    ])
}

/// Daily MAE bars, one per row, filled by bias band.
pub fn draw_bars(rows: &[DailyAggregateRow], scales: &Scales, surface: &mut Surface) {
    let Some(band) = scales.band() else { return };
    let bottom = scales.frame.plot_bottom();
    for (i, row) in rows.iter().enumerate() {
        let x = band.x(i);
        let top = scales.y.to_px(row.mae.max(0.0)).min(bottom);
        let rect = Rect::from_ltrb(x, top, x + band.band_width, bottom);
        let tone = bias_band(row.bias).tone();
        surface.push(Element::new(Role::Bar, Shape::Rect(rect), Style::fill(tone)).with_datum(i));
    }
}

/// Actual and predicted wind lines. The predicted path skips samples without a prediction.
pub fn draw_lines(points: &[TimeSeriesPoint], scales: &Scales, surface: &mut Surface) {
    let Some(time) = scales.time() else { return };
    let actual: Vec<Point> = points
        .iter()
        .map(|p| Point::new(time.to_px(to_secs(p.timestamp)), scales.y.to_px(p.actual)))
        .collect();
    let predicted: Vec<Point> = points
        .iter()
        .filter_map(|p| Some(Point::new(time.to_px(to_secs(p.timestamp)), scales.y.to_px(p.predicted?))))
        .collect();
    if !predicted.is_empty() {
        surface.push(Element::new(
            Role::PredictedLine,
            Shape::Path(monotone_x(&predicted)),
            Style::stroke(Tone::Predicted, 2.0).dashed(6.0, 4.0),
        ));
    }
    surface.push(Element::new(Role::ActualLine, Shape::Path(monotone_x(&actual)), Style::stroke(Tone::Actual, 2.0)));
}

/// Forecast-vs-actual points over a dashed perfect-forecast diagonal.
pub fn draw_scatter(points: &[TimeSeriesPoint], scales: &Scales, config: &ChartConfig, bp: Breakpoint, surface: &mut Surface) {
    let XScale::Value(x) = scales.x else { return };
    let (d0, d1) = x.domain();
    surface.push(Element::new(
        Role::Diagonal,
        Shape::Line {
            from: Point::new(x.to_px(d0), scales.y.to_px(d0)),
            to: Point::new(x.to_px(d1), scales.y.to_px(d1)),
        },
        Style::stroke(Tone::Reference, 1.0).dashed(4.0, 4.0),
    ));
    let radius = config.point_radius(bp);
    for (i, p) in points.iter().enumerate() {
        let Some(predicted) = p.predicted else { continue };
        let tone = if predicted - p.actual > 0.0 { Tone::Over } else { Tone::Under };
        let center = Point::new(x.to_px(predicted), scales.y.to_px(p.actual));
        surface.push(
            Element::new(Role::Point, Shape::Circle { center, radius }, Style::fill(tone).with_opacity(0.85))
                .with_datum(i),
        );
    }
}

/// Wind arrows rotated to the direction of travel; gust arrows sit behind them.
pub fn draw_arrows(obs: &[WindObservation], scales: &Scales, surface: &mut Surface) {
    let Some(time) = scales.time() else { return };
    let floor_y = scales.frame.plot_bottom() - ARROW_BOTTOM_CLEARANCE;
    let glyph = arrow_glyph();
    let place = |o: &WindObservation, knots: f64| {
        let origin = Point::new(time.to_px(to_secs(o.timestamp)), scales.y.to_px(knots).min(floor_y));
        Shape::Glyph { path: glyph.clone(), origin, rotation_deg: (o.direction_degrees + 180.0) as f32 }
    };
    for (i, o) in obs.iter().enumerate() {
        if let Some(gust) = o.gust_knots.filter(|g| *g > 0.0) {
            let style = Style::fill(Tone::Gust).outlined(Tone::GustOutline, 1.0).with_opacity(0.45);
            surface.push(Element::new(Role::GustArrow, place(o, gust), style).with_datum(i));
        }
    }
    for (i, o) in obs.iter().enumerate() {
        let style = Style::fill(speed_band(o.speed_knots).tone()).outlined(Tone::Outline, 0.5);
        surface.push(Element::new(Role::Arrow, place(o, o.speed_knots), style).with_datum(i));
    }
}
