// File: crates/wind-chart-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; anchored and rotated labels.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::scene::TextAnchor;

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let pstyle = ParagraphStyle::new();
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, bold).longest_line()
    }

    /// Draw with the baseline at `y`, anchored horizontally at `x`, rotated around the anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        anchor: TextAnchor,
        rotation_deg: f32,
    ) {
        let mut p = self.layout(text, size, color, false);
        let w = p.longest_line();
        let dx = match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -w * 0.5,
            TextAnchor::End => -w,
        };
        canvas.save();
        canvas.translate((x, y));
        if rotation_deg != 0.0 {
            canvas.rotate(rotation_deg, None);
        }
        // Paragraph draws from top-left; shift up by the ascent approximation.
        p.paint(canvas, (dx, -size * 0.8));
        canvas.restore();
    }

    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, bold: bool) {
        let mut p = self.layout(text, size, color, bold);
        p.paint(canvas, (x, y - size * 0.8));
    }
}
