// File: crates/wind-chart-core/src/types.rs
// Summary: Shared layout types and constants (margins, breakpoint, host layout).

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Viewports at or below this width are classified as mobile.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Default raster width in pixels when no container is measured.
pub const WIDTH: i32 = 1024;
/// Default raster height in pixels.
pub const HEIGHT: i32 = 640;

/// Space around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f32 { self.top + self.bottom }
}

/// Viewport classification; a change re-renders the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn classify(viewport_width: f32) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT_PX { Breakpoint::Mobile } else { Breakpoint::Desktop }
    }

    pub fn is_mobile(self) -> bool { self == Breakpoint::Mobile }

    /// Pick the value for this breakpoint.
    pub fn pick<T>(self, desktop: T, mobile: T) -> T {
        match self {
            Breakpoint::Desktop => desktop,
            Breakpoint::Mobile => mobile,
        }
    }
}

/// Where the host placed the chart container, in client (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Container box. A zero width means the container is not laid out yet.
    pub container: Rect,
    /// Width of the whole window; drives the breakpoint and tooltip flipping.
    pub viewport_width: f32,
}

impl ChartLayout {
    pub fn new(container: Rect, viewport_width: f32) -> Self {
        Self { container, viewport_width }
    }

    /// Container width if it has been measured.
    pub fn measured_width(&self) -> Option<f32> {
        let w = self.container.width();
        (w.is_finite() && w > 0.0).then_some(w)
    }

    pub fn breakpoint(&self) -> Breakpoint { Breakpoint::classify(self.viewport_width) }
}
