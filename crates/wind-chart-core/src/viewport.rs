// File: crates/wind-chart-core/src/viewport.rs
// Summary: Horizontal scroll region of the data surface and the deferred scroll-to-latest
// that runs after each render.

use std::time::{Duration, Instant};

use tracing::trace;

/// Visible window over the scrollable data surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollRegion {
    pub visible_width: f32,
    pub content_width: f32,
    pub scroll_left: f32,
}

impl ScrollRegion {
    pub fn max_scroll(&self) -> f32 { (self.content_width - self.visible_width).max(0.0) }

    pub fn is_scrollable(&self) -> bool { self.max_scroll() > 0.0 }

    fn clamp(&mut self) { self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll()); }
}

#[derive(Debug)]
pub struct ViewportSync {
    region: ScrollRegion,
    delay: Duration,
    pending: Option<Instant>,
}

impl ViewportSync {
    pub fn new(delay: Duration) -> Self { Self { region: ScrollRegion::default(), delay, pending: None } }

    pub fn region(&self) -> ScrollRegion { self.region }

    pub fn scroll_left(&self) -> f32 { self.region.scroll_left }

    /// Record new surface sizes and schedule a scroll to the latest data. Replaces any
    /// pending scroll from an earlier render.
    pub fn after_render(&mut self, visible_width: f32, content_width: f32, now: Instant) {
        self.region.visible_width = visible_width;
        self.region.content_width = content_width;
        self.region.clamp();
        self.pending = self.region.is_scrollable().then(|| now + self.delay);
        trace!(visible_width, content_width, pending = self.pending.is_some(), "scroll sync scheduled");
    }

    /// Run the deferred scroll once due. Returns the new offset when it moved.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let due = self.pending?;
        if now < due {
            return None;
        }
        self.pending = None;
        self.region.scroll_left = self.region.max_scroll();
        trace!(scroll_left = self.region.scroll_left, "scrolled to latest");
        Some(self.region.scroll_left)
    }

    /// User scroll (wheel, drag). Cancels a pending auto-scroll so it does not yank the view.
    pub fn scroll_by(&mut self, dx: f32) -> f32 {
        self.pending = None;
        self.region.scroll_left += dx;
        self.region.clamp();
        self.region.scroll_left
    }

    /// Back to the start, as on page navigation.
    pub fn reset_for_navigation(&mut self) {
        self.pending = None;
        self.region.scroll_left = 0.0;
    }

    pub fn cancel(&mut self) { self.pending = None; }

    pub fn next_deadline(&self) -> Option<Instant> { self.pending }
}
