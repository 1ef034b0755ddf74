// File: crates/wind-chart-core/src/raster.rs
// Summary: Headless Skia CPU raster backend. Paints a chart instance (axis surface, scrolled
// data surface, tooltip panel) to PNG bytes, a PNG file or an RGBA8 buffer.

use anyhow::{anyhow, Context, Result};
use skia_safe as skia;

use crate::chart::ChartInstance;
use crate::geometry::{Path, PathCommand};
use crate::scene::{Element, Shape, Style, Surface};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::tooltip::Placement;

pub struct RenderOptions {
    pub theme: Theme,
    /// Skip text so pixel snapshots don't depend on installed fonts.
    pub draw_labels: bool,
    pub show_tooltip: bool,
}

impl Default for RenderOptions {
    fn default() -> Self { Self { theme: Theme::light(), draw_labels: true, show_tooltip: true } }
}

const PANEL_FONT: f32 = 12.0;
const PANEL_LINE: f32 = 17.0;
const PANEL_PAD: f32 = 8.0;

/// Pixel size of the chart's container as rasterized.
fn canvas_size(chart: &ChartInstance) -> Result<(i32, i32)> {
    let width = chart.layout().measured_width().ok_or_else(|| anyhow!("chart container has not been measured"))?;
    let scene = chart.scene();
    let height = if scene.axis.height > 0.0 {
        scene.axis.height
    } else {
        chart.config().plot_height + chart.config().margins.vsum()
    };
    Ok((width.ceil() as i32, height.ceil() as i32))
}

fn draw_chart(canvas: &skia::Canvas, chart: &ChartInstance, opts: &RenderOptions, width: f32, height: f32) {
    canvas.clear(opts.theme.background);
    let shaper = opts.draw_labels.then(TextShaper::new);
    let scene = chart.scene();
    let axis_w = scene.axis.width;

    // Data surface, scrolled and clipped to the region right of the axis.
    canvas.save();
    canvas.clip_rect(skia::Rect::from_ltrb(axis_w, 0.0, width, height), None, Some(true));
    canvas.translate((axis_w - chart.scroll_region().scroll_left, 0.0));
    paint_surface(canvas, &scene.plot, &opts.theme, shaper.as_ref());
    canvas.restore();

    paint_surface(canvas, &scene.axis, &opts.theme, shaper.as_ref());

    if opts.show_tooltip {
        draw_panel(canvas, chart, &opts.theme, shaper.as_ref(), width);
    }
}

fn paint_surface(canvas: &skia::Canvas, surface: &Surface, theme: &Theme, shaper: Option<&TextShaper>) {
    for el in &surface.elements {
        paint_element(canvas, el, theme, shaper);
    }
}

fn to_skia_path(path: &Path) -> skia::Path {
    let mut p = skia::Path::new();
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo(a) => {
                p.move_to((a.x, a.y));
            }
            PathCommand::LineTo(a) => {
                p.line_to((a.x, a.y));
            }
            PathCommand::CubicTo(c1, c2, a) => {
                p.cubic_to((c1.x, c1.y), (c2.x, c2.y), (a.x, a.y));
            }
            PathCommand::Close => {
                p.close();
            }
        }
    }
    p
}

fn fill_paint(theme: &Theme, style: &Style) -> Option<skia::Paint> {
    let color = theme.color(style.fill?);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.with_a((color.a() as f32 * style.opacity).round() as u8));
    Some(paint)
}

fn stroke_paint(theme: &Theme, style: &Style) -> Option<skia::Paint> {
    let color = theme.color(style.stroke?);
    if style.stroke_width <= 0.0 {
        return None;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.stroke_width);
    paint.set_color(color.with_a((color.a() as f32 * style.opacity).round() as u8));
    if let Some([on, off]) = style.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    Some(paint)
}

fn paint_element(canvas: &skia::Canvas, el: &Element, theme: &Theme, shaper: Option<&TextShaper>) {
    let fill = fill_paint(theme, &el.style);
    let stroke = stroke_paint(theme, &el.style);
    match &el.shape {
        Shape::Line { from, to } => {
            if let Some(paint) = &stroke {
                canvas.draw_line((from.x, from.y), (to.x, to.y), paint);
            }
        }
        Shape::Rect(r) => {
            let rect = skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom);
            for paint in fill.iter().chain(stroke.iter()) {
                canvas.draw_rect(rect, paint);
            }
        }
        Shape::Circle { center, radius } => {
            for paint in fill.iter().chain(stroke.iter()) {
                canvas.draw_circle((center.x, center.y), *radius, paint);
            }
        }
        Shape::Path(path) => {
            let p = to_skia_path(path);
            for paint in fill.iter().chain(stroke.iter()) {
                canvas.draw_path(&p, paint);
            }
        }
        Shape::Glyph { path, origin, rotation_deg } => {
            let p = to_skia_path(path);
            canvas.save();
            canvas.translate((origin.x, origin.y));
            canvas.rotate(*rotation_deg, None);
            for paint in fill.iter().chain(stroke.iter()) {
                canvas.draw_path(&p, paint);
            }
            canvas.restore();
        }
        Shape::Text { text, at, size, anchor, rotation_deg } => {
            if let (Some(shaper), Some(tone)) = (shaper, el.style.fill) {
                shaper.draw(canvas, text, at.x, at.y, *size, theme.color(tone), *anchor, *rotation_deg);
            }
        }
    }
}

/// Floating tooltip panel, kept inside the canvas.
fn draw_panel(canvas: &skia::Canvas, chart: &ChartInstance, theme: &Theme, shaper: Option<&TextShaper>, width: f32) {
    let Some(pos) = chart.tooltip_position() else { return };
    let Some(payload) = chart.tooltip().state().payload.clone() else { return };
    let lines = payload.lines();
    let text_w = match shaper {
        Some(s) => lines.iter().map(|l| s.measure_width(l, PANEL_FONT, false)).fold(0.0, f32::max),
        None => lines.iter().map(|l| l.chars().count() as f32 * PANEL_FONT * 0.55).fold(0.0, f32::max),
    };
    let panel_w = text_w + PANEL_PAD * 2.0;
    let panel_h = lines.len() as f32 * PANEL_LINE + PANEL_PAD * 2.0;

    let layout = chart.layout();
    let container = layout.container;
    let left_client = match pos.placement {
        Placement::Left(x) => x,
        Placement::Right(r) => layout.viewport_width - r - panel_w,
    };
    let left = (left_client - container.left).clamp(0.0, (width - panel_w).max(0.0));
    let top = (pos.top - container.top).max(0.0);
    let rect = skia::Rect::from_xywh(left, top, panel_w, panel_h);
    let rrect = skia::RRect::new_rect_xy(rect, 6.0, 6.0);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_color(theme.panel_fill);
    canvas.draw_rrect(rrect, &fill);
    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.panel_border);
    canvas.draw_rrect(rrect, &border);

    if let Some(shaper) = shaper {
        for (i, line) in lines.iter().enumerate() {
            let y = top + PANEL_PAD + PANEL_FONT + i as f32 * PANEL_LINE;
            shaper.draw_left(canvas, line, left + PANEL_PAD, y, PANEL_FONT, theme.panel_text, i == 0);
        }
    }
}

fn raster(chart: &ChartInstance, opts: &RenderOptions) -> Result<skia::Surface> {
    let (w, h) = canvas_size(chart)?;
    let mut surface =
        skia::surfaces::raster_n32_premul((w, h)).ok_or_else(|| anyhow!("failed to create raster surface {w}x{h}"))?;
    draw_chart(surface.canvas(), chart, opts, w as f32, h as f32);
    Ok(surface)
}

/// Render to PNG bytes in memory.
pub fn render_to_png_bytes(chart: &ChartInstance, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = raster(chart, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render to a PNG file, creating parent directories as needed.
pub fn render_to_png(chart: &ChartInstance, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = output_png_path.as_ref();
    let bytes = render_to_png_bytes(chart, opts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Render to an unpremultiplied RGBA8 buffer: `(pixels, width, height, row_stride)`.
pub fn render_to_rgba8(chart: &ChartInstance, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = raster(chart, opts)?;
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut pixels = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        return Err(anyhow!("read_pixels failed for {w}x{h} surface"));
    }
    Ok((pixels, w, h, stride))
}
