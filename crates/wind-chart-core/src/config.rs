// File: crates/wind-chart-core/src/config.rs
// Summary: Per-kind chart configuration presets and serde-loadable overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::marks::MarkKind;
use crate::types::{Breakpoint, Margins};

/// How wide the scrollable data surface grows beyond the visible container.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WidthPolicy {
    /// Keep a time span of this many hours visible; longer datasets scroll.
    VisibleHours { desktop: f64, mobile: f64 },
    /// Keep each mark at least `mark` px wide with `gap` px between marks.
    MarkPitch { mark_desktop: f32, gap_desktop: f32, mark_mobile: f32, gap_mobile: f32 },
    /// Fill the container, never narrower than `min`.
    Fill { min: f32 },
}

impl WidthPolicy {
    /// (mark, gap) in pixels for pitch-based policies.
    pub fn pitch(&self, bp: Breakpoint) -> Option<(f32, f32)> {
        match *self {
            WidthPolicy::MarkPitch { mark_desktop, gap_desktop, mark_mobile, gap_mobile } => {
                Some(bp.pick((mark_desktop, gap_desktop), (mark_mobile, gap_mobile)))
            }
            _ => None,
        }
    }
}

/// Vertical domain policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalPolicy {
    /// Domain top is never below this value.
    pub floor_top: f64,
    /// Multiplier applied to the data maximum before the floor.
    pub headroom: f64,
    /// Fixed tick step (e.g. every 5 knots); `None` uses "nice" ticks.
    pub tick_step: Option<f64>,
    /// Approximate tick count for nice ticks.
    pub tick_count: usize,
}

/// How the pointer selects a datum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverPolicy {
    /// Anywhere over the data surface; nearest sample by time.
    Nearest,
    /// Only while over a mark.
    OnMark,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub timeout_ms: u64,
    /// Horizontal gap between pointer and panel.
    pub offset_x: f32,
    /// Panel top sits this far above the pointer.
    pub lift: f32,
    pub hover: HoverPolicy,
    /// Extra hit radius for point marks (touch friendliness).
    pub touch_slop: f32,
}

impl TooltipConfig {
    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_ms) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: MarkKind,
    pub margins: Margins,
    pub plot_height: f32,
    pub width: WidthPolicy,
    pub vertical: VerticalPolicy,
    pub tooltip: TooltipConfig,
    /// Delay before auto-scrolling to the latest data after a render.
    pub scroll_delay_ms: u64,
    pub y_title: String,
    pub x_title: Option<String>,
    /// Keep only the most recent N samples (wind chart).
    pub max_points: Option<usize>,
    /// Point radius (desktop, mobile).
    pub point_radius: (f32, f32),
}

impl ChartConfig {
    pub fn for_kind(kind: MarkKind) -> Self {
        match kind {
            MarkKind::Bar => Self::bar(),
            MarkKind::Line => Self::line(),
            MarkKind::Scatter => Self::scatter(),
            MarkKind::Arrow => Self::arrow(),
        }
    }

    pub fn bar() -> Self {
        Self {
            kind: MarkKind::Bar,
            margins: Margins::new(16.0, 12.0, 48.0, 56.0),
            plot_height: 240.0,
            width: WidthPolicy::MarkPitch { mark_desktop: 34.0, gap_desktop: 10.0, mark_mobile: 28.0, gap_mobile: 8.0 },
            vertical: VerticalPolicy { floor_top: 10.0, headroom: 1.15, tick_step: None, tick_count: 6 },
            tooltip: TooltipConfig { timeout_ms: 1000, offset_x: 18.0, lift: 110.0, hover: HoverPolicy::OnMark, touch_slop: 0.0 },
            scroll_delay_ms: 100,
            y_title: "MAE (knots)".into(),
            x_title: None,
            max_points: None,
            point_radius: (3.5, 3.0),
        }
    }

    pub fn line() -> Self {
        Self {
            kind: MarkKind::Line,
            margins: Margins::new(40.0, 20.0, 60.0, 50.0),
            plot_height: 200.0,
            width: WidthPolicy::VisibleHours { desktop: 12.0, mobile: 5.0 },
            vertical: VerticalPolicy { floor_top: 30.0, headroom: 1.0, tick_step: Some(5.0), tick_count: 6 },
            tooltip: TooltipConfig { timeout_ms: 1000, offset_x: 20.0, lift: 100.0, hover: HoverPolicy::Nearest, touch_slop: 0.0 },
            scroll_delay_ms: 100,
            y_title: "Wind Speed (knots)".into(),
            x_title: None,
            max_points: None,
            point_radius: (3.5, 3.0),
        }
    }

    pub fn scatter() -> Self {
        Self {
            kind: MarkKind::Scatter,
            margins: Margins::new(28.0, 16.0, 44.0, 56.0),
            plot_height: 260.0,
            width: WidthPolicy::Fill { min: 280.0 },
            vertical: VerticalPolicy { floor_top: 0.0, headroom: 1.05, tick_step: None, tick_count: 6 },
            tooltip: TooltipConfig { timeout_ms: 1000, offset_x: 18.0, lift: 110.0, hover: HoverPolicy::OnMark, touch_slop: 4.0 },
            scroll_delay_ms: 100,
            y_title: "Actual (knots)".into(),
            x_title: Some("Forecast (knots)".into()),
            max_points: None,
            point_radius: (3.5, 3.0),
        }
    }

    pub fn arrow() -> Self {
        Self {
            kind: MarkKind::Arrow,
            margins: Margins::new(40.0, 20.0, 60.0, 50.0),
            plot_height: 200.0,
            width: WidthPolicy::MarkPitch { mark_desktop: 12.0, gap_desktop: 4.0, mark_mobile: 12.0, gap_mobile: 10.0 },
            vertical: VerticalPolicy { floor_top: 30.0, headroom: 1.0, tick_step: Some(5.0), tick_count: 6 },
            tooltip: TooltipConfig { timeout_ms: 3000, offset_x: 20.0, lift: 100.0, hover: HoverPolicy::Nearest, touch_slop: 0.0 },
            scroll_delay_ms: 100,
            y_title: "Wind Speed (knots)".into(),
            x_title: None,
            max_points: Some(72),
            point_radius: (3.5, 3.0),
        }
    }

    pub fn scroll_delay(&self) -> Duration { Duration::from_millis(self.scroll_delay_ms) }

    pub fn point_radius(&self, bp: Breakpoint) -> f32 { bp.pick(self.point_radius.0, self.point_radius.1) }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(m) = overrides.margins { self.margins = m; }
        if let Some(h) = overrides.plot_height { self.plot_height = h.max(1.0); }
        if let Some(w) = overrides.width { self.width = w; }
        if let Some(ms) = overrides.tooltip_timeout_ms { self.tooltip.timeout_ms = ms; }
        if let Some(ms) = overrides.scroll_delay_ms { self.scroll_delay_ms = ms; }
        if let Some(t) = &overrides.y_title { self.y_title = t.clone(); }
        if let Some(n) = overrides.max_points { self.max_points = Some(n); }
        if let Some(top) = overrides.floor_top { self.vertical.floor_top = top; }
    }
}

/// Partial overrides applied on top of a preset; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub margins: Option<Margins>,
    pub plot_height: Option<f32>,
    pub width: Option<WidthPolicy>,
    pub tooltip_timeout_ms: Option<u64>,
    pub scroll_delay_ms: Option<u64>,
    pub y_title: Option<String>,
    pub max_points: Option<usize>,
    pub floor_top: Option<f64>,
}
