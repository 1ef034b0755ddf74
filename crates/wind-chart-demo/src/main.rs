// File: crates/wind-chart-demo/src/main.rs
// Summary: Demo loads forecast API payloads (JSON envelope or CSV export) and renders wind chart PNGs.

mod sample;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wind_chart_core::adapter::{parse_iso_date, DATE_KEYS};
use wind_chart_core::time::brisbane_today;
use wind_chart_core::{
    parse_envelope, render_to_png, theme, AdapterOptions, AnalysisType, ChartConfig, ChartInstance, ChartLayout,
    ConfigOverrides, DataAdapter, MarkKind, Point, PointerKind, RangeField, RangeFilter, Rect, RenderOptions,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "wind-chart-demo")]
#[command(about = "Render wind forecast charts to PNG")]
#[command(version)]
struct Args {
    /// Chart kind: bar, line, scatter or arrow.
    #[arg(short, long, default_value = "line")]
    kind: MarkKind,

    /// Payload file. JSON `{ "data": [...] }` envelope or a CSV export.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Input format; guessed from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Render every kind from synthetic data.
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Container width in pixels.
    #[arg(short, long, default_value_t = 1024.0)]
    width: f32,

    /// Classify the viewport as mobile.
    #[arg(long)]
    mobile: bool,

    /// Output directory.
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// JSON file with chart config overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme name (light, dark).
    #[arg(long, default_value = "light")]
    theme: String,

    /// Day that bare `HH:MM` samples start on (YYYY-MM-DD, Brisbane).
    #[arg(long, value_parser = parse_date)]
    anchor_date: Option<NaiveDate>,

    /// Only keep daily rows on or after this date (YYYY-MM-DD).
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Only keep daily rows on or before this date (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Show the tooltip for a pointer at this client position, e.g. `420,180`.
    #[arg(long, value_parser = parse_point)]
    hover: Option<Point>,

    /// Skip text rendering.
    #[arg(long)]
    no_labels: bool,
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("`{s}`: {e}"))
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let overrides = match &args.config {
        Some(path) => load_overrides(path)?,
        None => ConfigOverrides::default(),
    };
    let anchor = args.anchor_date.unwrap_or_else(brisbane_today);

    if args.sample {
        for kind in MarkKind::ALL {
            let rows = sample::rows(kind, anchor);
            render_kind(&args, kind, &rows, &overrides, anchor)?;
        }
        return Ok(());
    }

    let Some(input) = &args.input else {
        bail!("pass --input <FILE> or --sample");
    };
    let rows = load_rows(input, args.format)?;
    info!(file = %input.display(), rows = rows.len(), "loaded payload");
    render_kind(&args, args.kind, &rows, &overrides, anchor)
}

fn load_overrides(path: &Path) -> Result<ConfigOverrides> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config overrides {}", path.display()))
}

fn load_rows(path: &Path, format: Option<InputFormat>) -> Result<Vec<Value>> {
    let format = format.unwrap_or_else(|| match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
        _ => InputFormat::Json,
    });
    match format {
        InputFormat::Json => {
            let body = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            parse_envelope(&body).with_context(|| format!("parsing payload {}", path.display()))
        }
        InputFormat::Csv => load_csv(path),
    }
}

/// CSV rows become JSON objects keyed by lower-cased header; empty cells are null.
fn load_csv(path: &Path) -> Result<Vec<Value>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("reading {}", path.display()))?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, cell)| {
                let v = if cell.is_empty() { Value::Null } else { Value::String(cell.to_owned()) };
                (h.clone(), v)
            })
            .collect();
        out.push(Value::Object(row));
    }
    Ok(out)
}

fn render_kind(args: &Args, kind: MarkKind, rows: &[Value], overrides: &ConfigOverrides, anchor: NaiveDate) -> Result<()> {
    let mut config = ChartConfig::for_kind(kind);
    config.apply(overrides);

    let rows = match (&args.start, &args.end) {
        (Some(start), Some(end)) => filter_range(kind, rows, start, end)?,
        _ => rows.to_vec(),
    };

    let adapter = DataAdapter::new(AdapterOptions { anchor_date: anchor, max_points: config.max_points, require_predicted: false });
    let now = Instant::now();
    let mut chart = ChartInstance::with_adapter(config, adapter);
    let viewport = if args.mobile { args.width.min(wind_chart_core::types::MOBILE_BREAKPOINT_PX) } else { args.width.max(1024.0) };
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, args.width, 0.0), viewport), now);
    let dropped = chart.set_rows(&rows, now);
    if dropped > 0 {
        warn!(kind = kind.name(), dropped, "rows dropped by the adapter");
    }
    if chart.dataset().is_empty() {
        warn!(kind = kind.name(), "no usable rows, rendering an empty chart");
    }
    // Container height follows the rendered surface.
    let height = chart.scene().axis.height.max(1.0);
    chart.set_layout(ChartLayout::new(Rect::from_ltwh(0.0, 0.0, args.width, height), viewport), now);
    if let Some(at) = args.hover {
        chart.pointer_move(at, PointerKind::Mouse, now);
    }

    let opts = RenderOptions { theme: theme::find(&args.theme), draw_labels: !args.no_labels, show_tooltip: true };
    let out = args.out.join(format!("wind_{}.png", kind.name()));
    render_to_png(&chart, &opts, &out)?;
    info!(kind = kind.name(), points = chart.dataset().len(), out = %out.display(), "wrote chart");
    Ok(())
}

/// Keep rows whose `date` falls inside the range and log the analysis query the page would send.
fn filter_range(kind: MarkKind, rows: &[Value], start: &str, end: &str) -> Result<Vec<Value>> {
    let mut filter = RangeFilter::new();
    filter.on_change(RangeField::Start, start)?;
    filter.on_change(RangeField::End, end)?;
    let range = filter.apply()?;
    info!(query = %range.query(AnalysisType::for_kind(kind)), "analysis range");
    if kind != MarkKind::Bar {
        return Ok(rows.to_vec());
    }
    Ok(rows
        .iter()
        .filter(|r| {
            DATE_KEYS
                .iter()
                .filter_map(|k| r.get(*k))
                .find(|v| !v.is_null())
                .and_then(Value::as_str)
                .and_then(parse_iso_date)
                .is_some_and(|d| range.contains(d))
        })
        .cloned()
        .collect())
}
