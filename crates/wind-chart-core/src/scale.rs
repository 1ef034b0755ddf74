// File: crates/wind-chart-core/src/scale.rs
// Summary: Horizontal (time / band / value) and vertical value scales, and the ScaleBuilder
// that sizes the scrollable surface from the data extent and the container width.

use crate::config::{ChartConfig, WidthPolicy};
use crate::grid::{ceil_to_step, nice};
use crate::marks::MarkKind;
use crate::model::Dataset;
use crate::time::to_secs;
use crate::types::{Breakpoint, Margins};

/// Linear mapping from a data domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let span = self.d1 - self.d0;
        if span.abs() < 1e-12 {
            // Degenerate domain: everything sits mid-range.
            return (self.r0 + self.r1) * 0.5;
        }
        self.r0 + ((v - self.d0) / span) as f32 * (self.r1 - self.r0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-6 {
            return self.d0;
        }
        self.d0 + ((px - self.r0) / span) as f64 * (self.d1 - self.d0)
    }

    pub fn domain(&self) -> (f64, f64) { (self.d0, self.d1) }
}

/// Time axis; domain is in epoch seconds and always equals the data extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub inner: LinearScale,
}

impl TimeScale {
    pub fn new(start_secs: f64, end_secs: f64, left_px: f32, right_px: f32) -> Self {
        Self { inner: LinearScale::new((start_secs, end_secs), (left_px, right_px)) }
    }
    pub fn to_px(&self, secs: f64) -> f32 { self.inner.to_px(secs) }
    pub fn from_px(&self, px: f32) -> f64 { self.inner.from_px(px) }
    pub fn domain(&self) -> (f64, f64) { self.inner.domain() }
}

/// Evenly spaced category slots (one bar per row); missing rows leave no gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub band_width: f32,
    pub gap: f32,
}

impl BandScale {
    /// Left edge of slot `i`.
    pub fn x(&self, i: usize) -> f32 { i as f32 * (self.band_width + self.gap) }
    pub fn center(&self, i: usize) -> f32 { self.x(i) + self.band_width * 0.5 }

    /// Slot whose band (not gap) contains `px`.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.count == 0 || px < 0.0 {
            return None;
        }
        let pitch = self.band_width + self.gap;
        let i = (px / pitch).floor() as usize;
        (i < self.count && px - self.x(i) < self.band_width).then_some(i)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XScale {
    Time(TimeScale),
    Band(BandScale),
    Value(LinearScale),
}

/// Surface sizes for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub margins: Margins,
    pub plot_height: f32,
    /// Width of the scrollable data surface.
    pub chart_width: f32,
    /// Width of the scroll region that shows the data surface.
    pub visible_width: f32,
}

impl Frame {
    /// Fixed y-axis surface width.
    pub fn axis_width(&self) -> f32 { self.margins.left }
    pub fn surface_height(&self) -> f32 { self.plot_height + self.margins.vsum() }
    pub fn plot_top(&self) -> f32 { self.margins.top }
    pub fn plot_bottom(&self) -> f32 { self.margins.top + self.plot_height }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub frame: Frame,
    pub x: XScale,
    pub y: LinearScale,
}

impl Scales {
    pub fn time(&self) -> Option<&TimeScale> {
        match &self.x {
            XScale::Time(t) => Some(t),
            _ => None,
        }
    }
    pub fn band(&self) -> Option<&BandScale> {
        match &self.x {
            XScale::Band(b) => Some(b),
            _ => None,
        }
    }
}

pub struct ScaleBuilder<'a> {
    config: &'a ChartConfig,
    breakpoint: Breakpoint,
}

impl<'a> ScaleBuilder<'a> {
    pub fn new(config: &'a ChartConfig, breakpoint: Breakpoint) -> Self { Self { config, breakpoint } }

    /// Scales for `dataset` in a container `container_width` px wide; `None` for empty data.
    pub fn build(&self, dataset: &Dataset, container_width: f32) -> Option<Scales> {
        if dataset.is_empty() {
            return None;
        }
        let margins = self.config.margins;
        let visible_width = (container_width - margins.left).max(1.0);
        let inner_width = (container_width - margins.hsum()).max(1.0);
        let frame = |chart_width: f32| Frame {
            margins,
            plot_height: self.config.plot_height,
            chart_width,
            visible_width,
        };
        let bottom = margins.top + self.config.plot_height;
        let top = margins.top;

        match dataset {
            Dataset::Daily(rows) => {
                let n = rows.len();
                let (mark, gap) = self.config.width.pitch(self.breakpoint).unwrap_or((34.0, 10.0));
                let needed = n as f32 * mark + (n.saturating_sub(1)) as f32 * gap;
                let chart_width = inner_width.max(needed);
                let band_width = ((chart_width - (n - 1) as f32 * gap) / n as f32).floor().max(1.0);
                let max_mae = rows.iter().map(|r| r.mae).fold(0.0, f64::max);
                let y_top = self.vertical_top(max_mae);
                Some(Scales {
                    frame: frame(chart_width),
                    x: XScale::Band(BandScale { count: n, band_width, gap }),
                    y: LinearScale::new((0.0, y_top), (bottom, top)),
                })
            }
            Dataset::Series(points) if self.config.kind == MarkKind::Scatter => {
                let chart_width = match self.config.width {
                    WidthPolicy::Fill { min } => inner_width.max(min),
                    _ => inner_width,
                };
                let (lo, hi) = points
                    .iter()
                    .flat_map(|p| [Some(p.actual), p.predicted])
                    .flatten()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
                let v_min = lo.min(0.0);
                let v_max = (hi * self.config.vertical.headroom).max(self.config.vertical.floor_top);
                let v_max = if v_max > v_min { v_max } else { v_min + 1.0 };
                let (d0, d1) = nice(v_min, v_max, self.config.vertical.tick_count);
                Some(Scales {
                    frame: frame(chart_width),
                    x: XScale::Value(LinearScale::new((d0, d1), (0.0, chart_width))),
                    y: LinearScale::new((d0, d1), (bottom, top)),
                })
            }
            Dataset::Series(points) => {
                let start = to_secs(points[0].timestamp);
                let end = to_secs(points[points.len() - 1].timestamp);
                let chart_width = self.time_width(inner_width, end - start, points.len());
                let max_v = points
                    .iter()
                    .flat_map(|p| [Some(p.actual), p.predicted])
                    .flatten()
                    .fold(0.0, f64::max);
                Some(Scales {
                    frame: frame(chart_width),
                    x: XScale::Time(TimeScale::new(start, end, 0.0, chart_width)),
                    y: LinearScale::new((0.0, self.vertical_top(max_v)), (bottom, top)),
                })
            }
            Dataset::Wind(obs) => {
                let start = to_secs(obs[0].timestamp);
                let end = to_secs(obs[obs.len() - 1].timestamp);
                let chart_width = self.time_width(inner_width, end - start, obs.len());
                // Keep edge glyphs inside the surface.
                let pad = self.config.width.pitch(self.breakpoint).map(|(m, g)| (m + g) * 0.5).unwrap_or(0.0);
                let max_v = obs.iter().map(|o| o.speed_knots.max(o.gust_knots.unwrap_or(0.0))).fold(0.0, f64::max);
                Some(Scales {
                    frame: frame(chart_width),
                    x: XScale::Time(TimeScale::new(start, end, pad, chart_width - pad)),
                    y: LinearScale::new((0.0, self.vertical_top(max_v)), (bottom, top)),
                })
            }
        }
    }

    /// Chart width for time-based kinds: grow rather than squeeze marks.
    fn time_width(&self, inner_width: f32, span_secs: f64, count: usize) -> f32 {
        match self.config.width {
            WidthPolicy::VisibleHours { desktop, mobile } => {
                let visible_secs = self.breakpoint.pick(desktop, mobile) * 3600.0;
                if visible_secs <= 0.0 {
                    return inner_width;
                }
                inner_width.max(inner_width * (span_secs / visible_secs) as f32)
            }
            WidthPolicy::MarkPitch { .. } => {
                let (mark, gap) = self.config.width.pitch(self.breakpoint).unwrap_or((12.0, 4.0));
                inner_width.max(count as f32 * (mark + gap))
            }
            WidthPolicy::Fill { min } => inner_width.max(min),
        }
    }

    /// Domain top for value axes anchored at zero, with the policy floor applied.
    fn vertical_top(&self, data_max: f64) -> f64 {
        let v = self.config.vertical;
        let top = (data_max * v.headroom).max(v.floor_top);
        let top = if top > 0.0 { top } else { 1.0 };
        match v.tick_step {
            Some(step) => ceil_to_step(top, step),
            None => nice(0.0, top, v.tick_count).1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_hits_skip_gaps() {
        let b = BandScale { count: 3, band_width: 30.0, gap: 10.0 };
        assert_eq!(b.index_at(5.0), Some(0));
        assert_eq!(b.index_at(35.0), None);
        assert_eq!(b.index_at(45.0), Some(1));
        assert_eq!(b.index_at(200.0), None);
    }

    #[test]
    fn linear_round_trips() {
        let s = LinearScale::new((0.0, 30.0), (240.0, 40.0));
        assert_eq!(s.to_px(0.0), 240.0);
        assert_eq!(s.to_px(30.0), 40.0);
        assert!((s.from_px(140.0) - 15.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_domain_sits_mid_range() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.to_px(5.0), 50.0);
    }
}
