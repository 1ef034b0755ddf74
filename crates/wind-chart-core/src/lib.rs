// File: crates/wind-chart-core/src/lib.rs
// Summary: Core library entry point; exports the unified wind chart component and its raster backend.

pub mod adapter;
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod listeners;
pub mod marks;
pub mod model;
pub mod payload;
pub mod range;
pub mod raster;
pub mod render;
pub mod scale;
pub mod scene;
pub mod text;
pub mod theme;
pub mod time;
pub mod tooltip;
pub mod types;
pub mod viewport;

pub use adapter::{parse_envelope, AdapterOptions, Adapted, DataAdapter, Schema};
pub use chart::{ChartInstance, ChartState, PointerKind};
pub use config::{ChartConfig, ConfigOverrides, HoverPolicy, TooltipConfig, VerticalPolicy, WidthPolicy};
pub use error::{ChartError, Result};
pub use geometry::{Point, Rect};
pub use listeners::{PointerHub, Subscription};
pub use marks::{bias_band, speed_band, BiasBand, MarkKind, SpeedBand};
pub use model::{DailyAggregateRow, Dataset, TimeSeriesPoint, Timeline, WindObservation};
pub use payload::TooltipPayload;
pub use range::{AnalysisType, DateRange, RangeField, RangeFilter};
pub use raster::{render_to_png, render_to_png_bytes, render_to_rgba8, RenderOptions};
pub use render::{RenderOutcome, RendererEngine};
pub use scale::{BandScale, LinearScale, ScaleBuilder, Scales, TimeScale, XScale};
pub use scene::{Element, Role, Scene, Shape, Surface, Tone};
pub use text::TextShaper;
pub use theme::Theme;
pub use tooltip::{DismissReason, PanelPosition, Placement, TooltipController, TooltipState};
pub use types::{Breakpoint, ChartLayout, Margins};
pub use viewport::{ScrollRegion, ViewportSync};
