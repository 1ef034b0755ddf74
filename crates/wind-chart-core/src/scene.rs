// File: crates/wind-chart-core/src/scene.rs
// Summary: Backend-neutral display list. The renderer fills two surfaces (fixed y-axis and
// scrollable data area); the raster backend paints them, the tooltip hit-tests them.

use crate::geometry::{Path, Point, Rect};

/// Semantic color slot, resolved by the theme at paint time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Forecast above actual.
    Over,
    /// Forecast below actual.
    Under,
    Neutral,
    /// Wind speed bands.
    Low,
    Mid,
    High,
    Actual,
    Predicted,
    Gust,
    GustOutline,
    Grid,
    Axis,
    Label,
    Divider,
    Reference,
    Outline,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Tone>,
    pub stroke: Option<Tone>,
    pub stroke_width: f32,
    /// On/off dash lengths.
    pub dash: Option<[f32; 2]>,
    pub opacity: f32,
}

impl Style {
    pub const fn fill(tone: Tone) -> Self {
        Self { fill: Some(tone), stroke: None, stroke_width: 0.0, dash: None, opacity: 1.0 }
    }
    pub const fn stroke(tone: Tone, width: f32) -> Self {
        Self { fill: None, stroke: Some(tone), stroke_width: width, dash: None, opacity: 1.0 }
    }
    pub const fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some([on, off]);
        self
    }
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
    pub const fn outlined(mut self, tone: Tone, width: f32) -> Self {
        self.stroke = Some(tone);
        self.stroke_width = width;
        self
    }
}

/// What an element is for. Only data marks take part in hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Grid,
    AxisLine,
    Tick,
    TickLabel,
    AxisTitle,
    DayDivider,
    DayLabel,
    Bar,
    ActualLine,
    PredictedLine,
    Point,
    Diagonal,
    Arrow,
    GustArrow,
}

impl Role {
    pub fn is_mark(self) -> bool {
        matches!(
            self,
            Role::Bar | Role::ActualLine | Role::PredictedLine | Role::Point | Role::Arrow | Role::GustArrow
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line { from: Point, to: Point },
    Rect(Rect),
    Circle { center: Point, radius: f32 },
    Path(Path),
    /// `path` in glyph space, placed at `origin` and rotated clockwise by `rotation_deg`.
    Glyph { path: Path, origin: Point, rotation_deg: f32 },
    Text { text: String, at: Point, size: f32, anchor: TextAnchor, rotation_deg: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub role: Role,
    pub shape: Shape,
    pub style: Style,
    /// Index of the datum this mark draws.
    pub datum: Option<usize>,
}

impl Element {
    pub fn new(role: Role, shape: Shape, style: Style) -> Self { Self { role, shape, style, datum: None } }

    pub fn with_datum(mut self, datum: usize) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Whether `p` (surface coordinates) lands on this element.
    pub fn hit(&self, p: Point, slop: f32) -> bool {
        match &self.shape {
            Shape::Rect(r) => r.contains(p),
            Shape::Circle { center, radius } => center.distance(p) <= radius + slop,
            Shape::Path(path) => path.distance_to(p) <= self.style.stroke_width.max(1.0) * 0.5 + 3.0 + slop,
            Shape::Glyph { path, origin, rotation_deg } => {
                // Undo placement, then test against the glyph's bounding box.
                let local = Point::new(p.x - origin.x, p.y - origin.y).rotated(-rotation_deg);
                let verts: Vec<Point> = path.vertices().collect();
                let (l, r) = verts.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(l, r), v| (l.min(v.x), r.max(v.x)));
                let (t, b) = verts.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(t, b), v| (t.min(v.y), b.max(v.y)));
                local.x >= l - slop && local.x <= r + slop && local.y >= t - slop && local.y <= b + slop
            }
            Shape::Line { .. } | Shape::Text { .. } => false,
        }
    }
}

/// One drawing surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
}

impl Surface {
    /// Drop every element and reset the size.
    pub fn clear(&mut self) {
        self.width = 0.0;
        self.height = 0.0;
        self.elements.clear();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn push(&mut self, element: Element) { self.elements.push(element); }

    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.role == role)
    }

    pub fn count(&self, role: Role) -> usize { self.with_role(role).count() }

    /// Topmost data mark under `p`.
    pub fn hit_test(&self, p: Point, slop: f32) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.role.is_mark() && e.hit(p, slop))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Fixed y-axis surface.
    pub axis: Surface,
    /// Horizontally scrollable data surface.
    pub plot: Surface,
}

impl Scene {
    pub fn clear(&mut self) {
        self.axis.clear();
        self.plot.clear();
    }

    pub fn is_empty(&self) -> bool { self.axis.is_empty() && self.plot.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_ignores_non_marks() {
        let mut s = Surface::default();
        s.push(Element::new(Role::Grid, Shape::Rect(Rect::from_ltwh(0.0, 0.0, 10.0, 10.0)), Style::fill(Tone::Grid)));
        assert!(s.hit_test(Point::new(5.0, 5.0), 0.0).is_none());
        s.push(
            Element::new(Role::Bar, Shape::Rect(Rect::from_ltwh(0.0, 0.0, 10.0, 10.0)), Style::fill(Tone::Over))
                .with_datum(3),
        );
        assert_eq!(s.hit_test(Point::new(5.0, 5.0), 0.0).and_then(|e| e.datum), Some(3));
    }

    #[test]
    fn rotated_glyph_hit_follows_rotation() {
        let glyph = Path::polygon(&[Point::new(-2.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, -20.0)]);
        let el = Element::new(
            Role::Arrow,
            Shape::Glyph { path: glyph, origin: Point::new(50.0, 50.0), rotation_deg: 180.0 },
            Style::fill(Tone::Low),
        );
        // Rotated 180 degrees, the glyph points down from its origin.
        assert!(el.hit(Point::new(50.0, 60.0), 0.0));
        assert!(!el.hit(Point::new(50.0, 40.0), 0.0));
    }
}
