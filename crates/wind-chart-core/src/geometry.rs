// File: crates/wind-chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math, paths and hit testing.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Rotate around the origin by `deg` degrees (clockwise in screen space, y down).
    pub fn rotated(&self, deg: f32) -> Point {
        let (s, c) = deg.to_radians().sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point { Point::new(self.x + dx, self.y + dy) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = clamp(((p.x - a.x) * dx + (p.y - a.y) * dy) / len2, 0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Backend-neutral vector path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self { Self::default() }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }
    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(c1, c2, p));
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Path::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }

    /// On-curve points in drawing order (control points are skipped).
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => Some(p),
            PathCommand::Close => None,
        })
    }

    /// Distance from `p` to the polyline through the path's on-curve points.
    pub fn distance_to(&self, p: Point) -> f32 {
        let verts: Vec<Point> = self.vertices().collect();
        match verts.len() {
            0 => f32::INFINITY,
            1 => p.distance(verts[0]),
            _ => verts
                .windows(2)
                .map(|w| distance_to_segment(p, w[0], w[1]))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

/// Monotone cubic interpolation in x (Fritsch–Carlson tangents, Steffen-style limiter).
/// Input points must be sorted by x. The curve never overshoots between samples.
pub fn monotone_x(points: &[Point]) -> Path {
    let mut path = Path::new();
    let n = points.len();
    match n {
        0 => return path,
        1 => {
            path.move_to(points[0]);
            return path;
        }
        2 => {
            path.move_to(points[0]).line_to(points[1]);
            return path;
        }
        _ => {}
    }

    let slope = |a: Point, b: Point| -> f32 {
        let h = b.x - a.x;
        if h.abs() <= f32::EPSILON { 0.0 } else { (b.y - a.y) / h }
    };

    // Interior tangents.
    let mut tangents = vec![0.0f32; n];
    for i in 1..n - 1 {
        let (p0, p1, p2) = (points[i - 1], points[i], points[i + 1]);
        let h0 = p1.x - p0.x;
        let h1 = p2.x - p1.x;
        let s0 = slope(p0, p1);
        let s1 = slope(p1, p2);
        let hs = h0 + h1;
        let p = if hs.abs() <= f32::EPSILON { 0.0 } else { (s0 * h1 + s1 * h0) / hs };
        tangents[i] = (s0.signum() + s1.signum()) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    }
    // End tangents derived from the neighbouring interior tangent.
    let h = points[1].x - points[0].x;
    tangents[0] = if h.abs() <= f32::EPSILON {
        tangents[1]
    } else {
        (3.0 * slope(points[0], points[1]) - tangents[1]) / 2.0
    };
    let h = points[n - 1].x - points[n - 2].x;
    tangents[n - 1] = if h.abs() <= f32::EPSILON {
        tangents[n - 2]
    } else {
        (3.0 * slope(points[n - 2], points[n - 1]) - tangents[n - 2]) / 2.0
    };

    path.move_to(points[0]);
    for i in 0..n - 1 {
        let (a, b) = (points[i], points[i + 1]);
        let dx = (b.x - a.x) / 3.0;
        path.cubic_to(
            Point::new(a.x + dx, a.y + dx * tangents[i]),
            Point::new(b.x - dx, b.y - dx * tangents[i + 1]),
            b,
        );
    }
    path
}
