// File: crates/wind-chart-core/src/render.rs
// Summary: RendererEngine: rebuilds the whole scene (axes, gridlines, marks) from a dataset,
// a chart config and the viewport classification.

use tracing::debug;

use crate::axis::{draw_day_dividers, draw_gridlines, draw_x_axis, draw_y_axis};
use crate::config::ChartConfig;
use crate::marks::{draw_arrows, draw_bars, draw_lines, draw_scatter, MarkKind};
use crate::model::Dataset;
use crate::scale::{ScaleBuilder, Scales};
use crate::scene::Scene;
use crate::types::Breakpoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The scene holds axes and marks for the dataset.
    Rendered,
    /// Nothing to draw; the scene was cleared.
    Empty,
    /// Container not measured yet; the previous scene is untouched.
    Skipped,
}

#[derive(Debug, Default)]
pub struct RendererEngine {
    scene: Scene,
    scales: Option<Scales>,
}

impl RendererEngine {
    pub fn new() -> Self { Self::default() }

    pub fn scene(&self) -> &Scene { &self.scene }

    /// Scales of the last successful render.
    pub fn scales(&self) -> Option<&Scales> { self.scales.as_ref() }

    /// Redraw everything. The previous scene is cleared first, so repeated calls with the
    /// same inputs produce the same scene.
    pub fn render(
        &mut self,
        dataset: &Dataset,
        config: &ChartConfig,
        breakpoint: Breakpoint,
        container_width: Option<f32>,
    ) -> RenderOutcome {
        let Some(width) = container_width.filter(|w| w.is_finite() && *w > 0.0) else {
            debug!(kind = ?config.kind, "container not measured, render skipped");
            return RenderOutcome::Skipped;
        };
        self.scene.clear();
        self.scales = None;

        let Some(scales) = ScaleBuilder::new(config, breakpoint).build(dataset, width) else {
            debug!(kind = ?config.kind, "empty dataset, nothing rendered");
            return RenderOutcome::Empty;
        };
        let frame = scales.frame;
        self.scene.axis.resize(frame.axis_width(), frame.surface_height());
        self.scene.plot.resize(frame.chart_width + frame.margins.right, frame.surface_height());

        draw_y_axis(&scales, config, &mut self.scene.axis);
        let plot = &mut self.scene.plot;
        draw_gridlines(&scales, config, plot);
        match (config.kind, dataset) {
            (MarkKind::Bar, Dataset::Daily(rows)) => draw_bars(rows, &scales, plot),
            (MarkKind::Line, Dataset::Series(points)) => {
                draw_day_dividers(&scales, plot);
                draw_lines(points, &scales, plot);
            }
            (MarkKind::Scatter, Dataset::Series(points)) => draw_scatter(points, &scales, config, breakpoint, plot),
            (MarkKind::Arrow, Dataset::Wind(obs)) => draw_arrows(obs, &scales, plot),
            (kind, _) => debug!(?kind, "dataset does not match chart kind, marks skipped"),
        }
        draw_x_axis(dataset, &scales, config, plot);

        debug!(
            kind = ?config.kind,
            ?breakpoint,
            points = dataset.len(),
            chart_width = frame.chart_width,
            elements = self.scene.axis.elements.len() + self.scene.plot.elements.len(),
            "rendered"
        );
        self.scales = Some(scales);
        RenderOutcome::Rendered
    }
}
