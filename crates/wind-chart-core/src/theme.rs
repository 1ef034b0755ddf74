// File: crates/wind-chart-core/src/theme.rs
// Summary: Light/Dark palettes resolving scene tones to Skia colors.

use skia_safe as skia;

use crate::scene::Tone;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub divider: skia::Color,
    pub reference: skia::Color,
    pub actual: skia::Color,
    pub predicted: skia::Color,
    pub over: skia::Color,
    pub under: skia::Color,
    pub neutral: skia::Color,
    pub speed_low: skia::Color,
    pub speed_mid: skia::Color,
    pub speed_high: skia::Color,
    pub gust: skia::Color,
    pub gust_outline: skia::Color,
    pub outline: skia::Color,
    pub panel_fill: skia::Color,
    pub panel_border: skia::Color,
    pub panel_text: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 229, 231, 235),
            axis_line: skia::Color::from_argb(255, 55, 65, 81),
            axis_label: skia::Color::from_argb(255, 31, 41, 55),
            divider: skia::Color::from_argb(255, 156, 163, 175),
            reference: skia::Color::from_argb(255, 107, 114, 128),
            actual: skia::Color::from_argb(255, 70, 130, 180),   // steelblue
            predicted: skia::Color::from_argb(255, 255, 165, 0), // orange
            over: skia::Color::from_argb(255, 0xf5, 0x9e, 0x0b),
            under: skia::Color::from_argb(255, 0x3b, 0x82, 0xf6),
            neutral: skia::Color::from_argb(255, 156, 163, 175),
            speed_low: skia::Color::from_argb(255, 34, 197, 94),
            speed_mid: skia::Color::from_argb(255, 234, 179, 8),
            speed_high: skia::Color::from_argb(255, 239, 68, 68),
            gust: skia::Color::from_argb(255, 203, 213, 225),
            gust_outline: skia::Color::from_argb(255, 148, 163, 184),
            outline: skia::Color::from_argb(255, 51, 65, 85),
            panel_fill: skia::Color::from_argb(240, 255, 255, 255),
            panel_border: skia::Color::from_argb(255, 209, 213, 219),
            panel_text: skia::Color::from_argb(255, 17, 24, 39),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            divider: skia::Color::from_argb(255, 110, 110, 120),
            reference: skia::Color::from_argb(255, 150, 150, 160),
            actual: skia::Color::from_argb(255, 96, 165, 250),
            predicted: skia::Color::from_argb(255, 251, 146, 60),
            over: skia::Color::from_argb(255, 0xf5, 0x9e, 0x0b),
            under: skia::Color::from_argb(255, 0x3b, 0x82, 0xf6),
            neutral: skia::Color::from_argb(255, 120, 120, 130),
            speed_low: skia::Color::from_argb(255, 74, 222, 128),
            speed_mid: skia::Color::from_argb(255, 250, 204, 21),
            speed_high: skia::Color::from_argb(255, 248, 113, 113),
            gust: skia::Color::from_argb(255, 71, 85, 105),
            gust_outline: skia::Color::from_argb(255, 100, 116, 139),
            outline: skia::Color::from_argb(255, 15, 23, 42),
            panel_fill: skia::Color::from_argb(235, 30, 30, 36),
            panel_border: skia::Color::from_argb(255, 70, 70, 80),
            panel_text: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn color(&self, tone: Tone) -> skia::Color {
        match tone {
            Tone::Over => self.over,
            Tone::Under => self.under,
            Tone::Neutral => self.neutral,
            Tone::Low => self.speed_low,
            Tone::Mid => self.speed_mid,
            Tone::High => self.speed_high,
            Tone::Actual => self.actual,
            Tone::Predicted => self.predicted,
            Tone::Gust => self.gust,
            Tone::GustOutline => self.gust_outline,
            Tone::Grid => self.grid,
            Tone::Axis => self.axis_line,
            Tone::Label => self.axis_label,
            Tone::Divider => self.divider,
            Tone::Reference => self.reference,
            Tone::Outline => self.outline,
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> { vec![Theme::light(), Theme::dark()] }

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::light)
}
