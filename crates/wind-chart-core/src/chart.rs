// File: crates/wind-chart-core/src/chart.rs
// Summary: ChartInstance ties the pieces together: adapter -> renderer -> tooltip/scroll, plus
// the instance lifecycle (Empty, Loading, Rendered, Error, Detached).

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::adapter::{AdapterOptions, DataAdapter};
use crate::config::{ChartConfig, HoverPolicy};
use crate::geometry::{Point, Rect};
use crate::listeners::{PointerHub, Subscription};
use crate::model::{Dataset, Timeline};
use crate::payload::TooltipPayload;
use crate::render::{RenderOutcome, RendererEngine};
use crate::scale::Scales;
use crate::scene::Scene;
use crate::tooltip::{DismissReason, PanelPosition, TooltipController};
use crate::types::{Breakpoint, ChartLayout};
use crate::viewport::{ScrollRegion, ViewportSync};

#[derive(Clone, Debug, PartialEq)]
pub enum ChartState {
    Empty,
    Loading,
    /// `resized` once the scene was rebuilt for a new layout.
    Rendered { resized: bool },
    /// Failure text from the page.
    Error(String),
    Detached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

pub struct ChartInstance {
    config: ChartConfig,
    adapter: DataAdapter,
    dataset: Dataset,
    timeline: Option<Timeline>,
    engine: RendererEngine,
    tooltip: Rc<RefCell<TooltipController>>,
    viewport: ViewportSync,
    layout: ChartLayout,
    /// Shared with the pointer hub handler for outside-click checks.
    container: Rc<Cell<Rect>>,
    rendered_for: Option<(Breakpoint, f32)>,
    needs_render: bool,
    state: ChartState,
    subscription: Option<Subscription>,
}

impl ChartInstance {
    pub fn new(config: ChartConfig) -> Self {
        let options = AdapterOptions { max_points: config.max_points, ..AdapterOptions::default() };
        Self::with_adapter(config, DataAdapter::new(options))
    }

    pub fn with_adapter(config: ChartConfig, adapter: DataAdapter) -> Self {
        let tooltip = Rc::new(RefCell::new(TooltipController::new(config.tooltip)));
        let viewport = ViewportSync::new(config.scroll_delay());
        Self {
            config,
            adapter,
            dataset: Dataset::default(),
            timeline: None,
            engine: RendererEngine::new(),
            tooltip,
            viewport,
            layout: ChartLayout::new(Rect::default(), 0.0),
            container: Rc::new(Cell::new(Rect::default())),
            rendered_for: None,
            needs_render: false,
            state: ChartState::Empty,
            subscription: None,
        }
    }

    /// Subscribe to page-level pointer-downs. Presses outside the container dismiss the tooltip.
    pub fn mount(&mut self, hub: &PointerHub) {
        let tooltip = Rc::downgrade(&self.tooltip);
        let container = Rc::clone(&self.container);
        self.subscription = Some(hub.subscribe(move |at| {
            if container.get().contains(at) {
                return;
            }
            let Some(tooltip) = tooltip.upgrade() else { return };
            let borrowed = tooltip.try_borrow_mut();
            if let Ok(mut tt) = borrowed {
                tt.pointer_down(false, false);
            }
        }));
        debug!(kind = ?self.config.kind, "chart mounted");
    }

    pub fn is_mounted(&self) -> bool { self.subscription.is_some() }

    /// New container measurement. Re-renders when the width or breakpoint changed, or when an
    /// earlier render was skipped for lack of a measurement.
    pub fn set_layout(&mut self, layout: ChartLayout, now: Instant) {
        if self.state == ChartState::Detached {
            return;
        }
        self.layout = layout;
        self.container.set(layout.container);
        let key = layout.measured_width().map(|w| (layout.breakpoint(), w));
        let changed = key.is_some() && key != self.rendered_for;
        if self.needs_render || (changed && matches!(self.state, ChartState::Rendered { .. })) {
            let resized = self.rendered_for.is_some();
            self.render(now, resized);
        }
    }

    pub fn begin_loading(&mut self) {
        if self.state == ChartState::Detached {
            return;
        }
        self.tooltip.borrow_mut().hide(DismissReason::DataChanged);
        self.state = ChartState::Loading;
        debug!(kind = ?self.config.kind, "loading");
    }

    /// Adapt raw API rows and render them.
    pub fn set_rows(&mut self, rows: &[Value], now: Instant) -> usize {
        let adapted = self.adapter.adapt(self.config.kind, rows);
        self.set_dataset(adapted.rows, now);
        adapted.dropped
    }

    /// Caller-built datasets are sorted and de-duplicated the same way adapted rows are.
    pub fn set_dataset(&mut self, mut dataset: Dataset, now: Instant) {
        if self.state == ChartState::Detached {
            warn!(kind = ?self.config.kind, "data delivered to a detached chart, ignored");
            return;
        }
        self.tooltip.borrow_mut().hide(DismissReason::DataChanged);
        let removed = dataset.normalize();
        if removed > 0 {
            debug!(kind = ?self.config.kind, removed, "duplicate keys removed from dataset");
        }
        self.timeline = dataset.timeline();
        self.dataset = dataset;
        self.rendered_for = None;
        self.render(now, false);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        if self.state == ChartState::Detached {
            return;
        }
        let message = message.into();
        warn!(kind = ?self.config.kind, %message, "chart load failed");
        self.tooltip.borrow_mut().hide(DismissReason::DataChanged);
        self.viewport.cancel();
        self.state = ChartState::Error(message);
    }

    fn render(&mut self, now: Instant, resized: bool) {
        let bp = self.layout.breakpoint();
        let width = self.layout.measured_width();
        match self.engine.render(&self.dataset, &self.config, bp, width) {
            RenderOutcome::Rendered => {
                self.needs_render = false;
                self.rendered_for = width.map(|w| (bp, w));
                if let Some(scales) = self.engine.scales() {
                    let content = self.engine.scene().plot.width;
                    self.viewport.after_render(scales.frame.visible_width, content, now);
                }
                self.state = ChartState::Rendered { resized };
            }
            RenderOutcome::Empty => {
                self.needs_render = false;
                self.rendered_for = width.map(|w| (bp, w));
                self.viewport.cancel();
                self.state = ChartState::Empty;
            }
            RenderOutcome::Skipped => self.needs_render = true,
        }
        debug!(kind = ?self.config.kind, state = ?self.state, "render cycle");
    }

    /// Client point to data-surface coordinates.
    pub fn to_surface(&self, at: Point) -> Point {
        let c = self.layout.container;
        let axis = self.engine.scales().map(|s| s.frame.axis_width()).unwrap_or(self.config.margins.left);
        Point::new(at.x - (c.left + axis) + self.viewport.scroll_left(), at.y - c.top)
    }

    /// Whether the client point is over the visible part of the data surface.
    fn over_plot(&self, at: Point) -> bool {
        let Some(scales) = self.engine.scales() else { return false };
        let c = self.layout.container;
        let plot = Rect::from_ltrb(c.left + scales.frame.axis_width(), c.top, c.right, c.top + scales.frame.surface_height());
        plot.contains(at)
    }

    /// Datum under the pointer, per the hover policy.
    fn datum_at(&self, p: Point) -> Option<usize> {
        match self.config.tooltip.hover {
            HoverPolicy::Nearest => {
                let t = self.engine.scales()?.time()?.from_px(p.x);
                self.timeline.as_ref()?.nearest(t)
            }
            HoverPolicy::OnMark => self.engine.scene().plot.hit_test(p, self.config.tooltip.touch_slop)?.datum,
        }
    }

    pub fn pointer_move(&mut self, at: Point, kind: PointerKind, now: Instant) {
        if !matches!(self.state, ChartState::Rendered { .. }) {
            return;
        }
        if !self.over_plot(at) {
            self.tooltip.borrow_mut().hide(DismissReason::PointerLeave);
            return;
        }
        let p = self.to_surface(at);
        let hit = self
            .datum_at(p)
            .and_then(|i| TooltipPayload::from_dataset(self.config.kind, &self.dataset, i).map(|payload| (i, payload)));
        trace!(?kind, x = p.x, y = p.y, datum = hit.as_ref().map(|h| h.0), "pointer move");
        let mut tt = self.tooltip.borrow_mut();
        match hit {
            Some((i, payload)) => tt.show(payload, i, at.x, at.y, now),
            None => {
                tt.hide(DismissReason::PointerLeave);
            }
        }
    }

    /// Pointer-down on this chart's container (page-level presses go through the hub).
    pub fn pointer_down(&mut self, at: Point) {
        let inside = self.layout.container.contains(at);
        let on_mark = inside
            && self.over_plot(at)
            && self.engine.scene().plot.hit_test(self.to_surface(at), self.config.tooltip.touch_slop).is_some();
        trace!(inside, on_mark, "pointer down");
        self.tooltip.borrow_mut().pointer_down(inside, on_mark);
    }

    pub fn pointer_leave(&mut self) { self.tooltip.borrow_mut().hide(DismissReason::PointerLeave); }

    pub fn touch_end(&mut self) { self.tooltip.borrow_mut().hide(DismissReason::TouchEnd); }

    pub fn scroll_by(&mut self, dx: f32) -> f32 { self.viewport.scroll_by(dx) }

    pub fn navigate(&mut self) { self.viewport.reset_for_navigation(); }

    /// Fire due timers. Returns true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let hidden = self.tooltip.borrow_mut().tick(now).is_some();
        let scrolled = self.viewport.tick(now).is_some();
        hidden || scrolled
    }

    /// Earliest pending deadline; hosts should wake up then and call `tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        let tt = self.tooltip.borrow().next_deadline();
        match (tt, self.viewport.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel timers, drop the pointer subscription and detach.
    pub fn teardown(&mut self) {
        if self.state == ChartState::Detached {
            return;
        }
        self.tooltip.borrow_mut().teardown();
        self.viewport.cancel();
        self.subscription = None;
        self.state = ChartState::Detached;
        debug!(kind = ?self.config.kind, "chart detached");
    }

    pub fn state(&self) -> &ChartState { &self.state }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn layout(&self) -> ChartLayout { self.layout }
    pub fn scene(&self) -> &Scene { self.engine.scene() }
    pub fn scales(&self) -> Option<&Scales> { self.engine.scales() }
    pub fn scroll_region(&self) -> ScrollRegion { self.viewport.region() }
    pub fn tooltip(&self) -> Ref<'_, TooltipController> { self.tooltip.borrow() }

    pub fn tooltip_position(&self) -> Option<PanelPosition> {
        self.tooltip.borrow().position(self.layout.viewport_width)
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) { self.teardown(); }
}
