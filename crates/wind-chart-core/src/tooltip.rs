// File: crates/wind-chart-core/src/tooltip.rs
// Summary: Tooltip state and its show/hide lifecycle. A single owned hide timer is replaced on
// every show, so an older deadline can never hide a newer tooltip.

use std::time::Instant;

use tracing::trace;

use crate::config::TooltipConfig;
use crate::payload::TooltipPayload;

/// Transient panel state, in client coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub screen_x: f32,
    pub screen_y: f32,
    pub payload: Option<TooltipPayload>,
    /// Row the payload was built from.
    pub datum: Option<usize>,
}

/// Why a visible tooltip went away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    Timeout,
    PointerLeave,
    /// Pointer-down outside the chart container.
    PointerDownOutside,
    /// Pointer-down inside the container but not on a mark.
    PointerDownOffMark,
    TouchEnd,
    /// New data replaced the hovered row.
    DataChanged,
    Teardown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HideTimer {
    token: u64,
    deadline: Instant,
}

/// Horizontal anchor of the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Panel's left edge at this client x.
    Left(f32),
    /// Panel's right edge this far from the viewport's right edge.
    Right(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPosition {
    pub top: f32,
    pub placement: Placement,
}

#[derive(Debug)]
pub struct TooltipController {
    config: TooltipConfig,
    state: TooltipState,
    timer: Option<HideTimer>,
    next_token: u64,
    last_dismissal: Option<DismissReason>,
    torn_down: bool,
}

impl TooltipController {
    pub fn new(config: TooltipConfig) -> Self {
        Self { config, state: TooltipState::default(), timer: None, next_token: 0, last_dismissal: None, torn_down: false }
    }

    pub fn config(&self) -> &TooltipConfig { &self.config }
    pub fn state(&self) -> &TooltipState { &self.state }
    pub fn is_visible(&self) -> bool { self.state.visible }
    pub fn last_dismissal(&self) -> Option<DismissReason> { self.last_dismissal }
    pub fn is_torn_down(&self) -> bool { self.torn_down }

    /// Show `payload` at the pointer and restart the hide timer.
    pub fn show(&mut self, payload: TooltipPayload, datum: usize, screen_x: f32, screen_y: f32, now: Instant) {
        if self.torn_down {
            return;
        }
        self.state = TooltipState { visible: true, screen_x, screen_y, payload: Some(payload), datum: Some(datum) };
        self.next_token += 1;
        self.timer = Some(HideTimer { token: self.next_token, deadline: now + self.config.timeout() });
        trace!(datum, x = screen_x, y = screen_y, token = self.next_token, "tooltip shown");
    }

    /// Hide and cancel the pending timer. Returns whether a visible tooltip was hidden.
    pub fn hide(&mut self, reason: DismissReason) -> bool {
        self.timer = None;
        if !self.state.visible {
            return false;
        }
        self.state = TooltipState::default();
        self.last_dismissal = Some(reason);
        trace!(?reason, "tooltip hidden");
        true
    }

    /// Apply the pointer-down dismissal rules. A press on a mark keeps the tooltip.
    pub fn pointer_down(&mut self, inside_container: bool, on_mark: bool) -> bool {
        match (inside_container, on_mark) {
            (false, _) => self.hide(DismissReason::PointerDownOutside),
            (true, false) => self.hide(DismissReason::PointerDownOffMark),
            (true, true) => false,
        }
    }

    /// Fire the hide timer if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<DismissReason> {
        let timer = self.timer?;
        if now < timer.deadline {
            return None;
        }
        trace!(token = timer.token, "hide timer fired");
        self.hide(DismissReason::Timeout).then_some(DismissReason::Timeout)
    }

    pub fn next_deadline(&self) -> Option<Instant> { self.timer.map(|t| t.deadline) }

    /// Panel position for a viewport `viewport_width` px wide, flipping to the pointer's left
    /// once the pointer is past the middle.
    pub fn position(&self, viewport_width: f32) -> Option<PanelPosition> {
        if !self.state.visible {
            return None;
        }
        let (x, y) = (self.state.screen_x, self.state.screen_y);
        let placement = if x <= viewport_width * 0.5 {
            Placement::Left(x + self.config.offset_x)
        } else {
            Placement::Right(viewport_width - x + self.config.offset_x)
        };
        Some(PanelPosition { top: y - self.config.lift, placement })
    }

    /// Cancel the timer and refuse further shows.
    pub fn teardown(&mut self) {
        self.hide(DismissReason::Teardown);
        self.timer = None;
        self.torn_down = true;
    }
}
