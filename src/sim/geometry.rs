//! Shape geometry for vector sprites
//!
//! Shapes are straight-edged: either a closed polygon (filled region) or an
//! open polyline (zero area). The one delicate routine here is
//! [`shapes_overlap`], which answers "do the two filled regions share a
//! nonzero area?" without a general polygon boolean library:
//!
//! 1. Ear-clip each polygon into triangles (interiors are disjoint).
//! 2. Clip every triangle pair with Sutherland-Hodgman (both are convex).
//! 3. Any clipped piece with area above `AREA_EPSILON` is an overlap.
//!
//! Edge-sharing polygons clip to slivers of zero area, so touching shapes
//! do not count as intersecting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::AREA_EPSILON;
use crate::cross;

/// Deepest edge halving `Shape::flatten` performs
pub const MAX_FLATTEN_RESOLUTION: u32 = 8;

/// Axis-aligned rectangle (y grows downward, like screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Interiors overlap (rectangles that only touch do not)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Closed rectangles share at least one point
    pub fn touches(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Point lies inside or on the border
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Grow by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
    }

    /// Scale width and height by `factor`, keeping the same center
    pub fn scale_about_center(&self, factor: f32) -> Self {
        let half = self.size() * factor * 0.5;
        let c = self.center();
        Self::new(c - half, c + half)
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// A straight-edged outline in world space
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    points: Vec<Vec2>,
    closed: bool,
}

impl Shape {
    /// Closed polygon. A trailing point equal to the first is dropped.
    pub fn polygon(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut points: Vec<Vec2> = points.into_iter().collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self {
            points,
            closed: true,
        }
    }

    /// Open polyline
    pub fn polyline(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
            closed: false,
        }
    }

    /// Single line segment
    pub fn segment(from: Vec2, to: Vec2) -> Self {
        Self::polyline([from, to])
    }

    /// Axis-aligned square of side `length` centered on `center`
    pub fn square(center: Vec2, length: f32) -> Self {
        let half = length / 2.0;
        Self::polygon([
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn translate(&mut self, offset: Vec2) {
        if offset == Vec2::ZERO {
            return;
        }
        for p in &mut self.points {
            *p += offset;
        }
    }

    /// Tight bounding rectangle (zero rect for an empty shape)
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::new(Vec2::ZERO, Vec2::ZERO);
        };
        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Rect { min, max }
    }

    /// Consecutive vertex pairs, including the closing edge for polygons
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        let count = match (self.closed, n) {
            (_, 0 | 1) => 0,
            (true, _) => n,
            (false, _) => n - 1,
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Enclosed area (zero for polylines)
    pub fn area(&self) -> f32 {
        if !self.closed {
            return 0.0;
        }
        signed_area(&self.points).abs()
    }

    /// Vertices of the outline with every edge halved `resolution` times.
    ///
    /// `resolution` is capped at [`MAX_FLATTEN_RESOLUTION`], so an edge
    /// yields at most 256 pieces. Consecutive duplicates are dropped. For
    /// polygons the closing vertex is not repeated.
    pub fn flatten(&self, resolution: u32) -> Vec<Vec2> {
        let pieces = 1u32 << resolution.min(MAX_FLATTEN_RESOLUTION);
        let mut out: Vec<Vec2> = Vec::with_capacity(self.points.len() * pieces as usize);
        for (a, b) in self.edges() {
            for k in 0..pieces {
                push_distinct(&mut out, a.lerp(b, k as f32 / pieces as f32));
            }
        }
        match (self.closed, self.points.last()) {
            (false, Some(&last)) => push_distinct(&mut out, last),
            (true, _) if out.len() > 1 && out.first() == out.last() => {
                out.pop();
            }
            _ => {}
        }
        if out.is_empty() {
            out.extend(self.points.first());
        }
        out
    }

    /// Point is inside the filled region (polylines contain nothing)
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.closed && point_in_polygon(&self.points, p)
    }

    /// Shape touches the rectangle: a vertex or edge lies in it, or the
    /// rectangle sits wholly inside the polygon.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if self.is_empty() || !self.bounds().touches(rect) {
            return false;
        }
        if self.points.iter().any(|&p| rect.contains(p)) {
            return true;
        }
        if self.edges().any(|(a, b)| segment_touches_rect(a, b, rect)) {
            return true;
        }
        self.contains_point(rect.center())
    }

    /// Split the filled region into triangles with disjoint interiors
    pub fn triangulate(&self) -> Vec<[Vec2; 3]> {
        if !self.closed {
            return Vec::new();
        }
        triangulate(&self.points)
    }
}

fn push_distinct(out: &mut Vec<Vec2>, p: Vec2) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

/// Shoelace signed area (positive for counter-clockwise in y-up terms)
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| cross(points[i], points[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Even-odd ray cast
pub fn point_in_polygon(points: &[Vec2], p: Vec2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Liang-Barsky: does any part of segment `a`-`b` fall in the closed rect?
fn segment_touches_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let checks = [
        (-d.x, a.x - rect.min.x),
        (d.x, rect.max.x - a.x),
        (-d.y, a.y - rect.min.y),
        (d.y, rect.max.y - a.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return false;
        }
    }
    true
}

/// Ear clipping. Degenerate input (repeated or collinear points) is
/// cleaned first; a polygon with no findable ear falls back to a fan.
fn triangulate(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    let mut ring: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        push_distinct(&mut ring, p);
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    drop_collinear(&mut ring);
    if ring.len() < 3 {
        return Vec::new();
    }
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(ring.len() - 2);
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            if cross(cur - prev, next - cur) <= 0.0 {
                return false;
            }
            !ring.iter().enumerate().any(|(k, &p)| {
                k != i
                    && k != (i + n - 1) % n
                    && k != (i + 1) % n
                    && point_in_triangle(p, prev, cur, next)
            })
        });
        let Some(i) = ear else {
            // Self-intersecting outline; fan the rest
            for k in 1..ring.len() - 1 {
                let t = [ring[0], ring[k], ring[k + 1]];
                if signed_area(&t) < 0.0 {
                    triangles.push([t[0], t[2], t[1]]);
                } else {
                    triangles.push(t);
                }
            }
            return triangles;
        };
        let n = ring.len();
        triangles.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
        ring.remove(i);
    }
    triangles.push([ring[0], ring[1], ring[2]]);
    triangles
}

fn drop_collinear(ring: &mut Vec<Vec2>) {
    let mut i = 0;
    while ring.len() >= 3 && i < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        if cross(ring[i] - prev, next - ring[i]).abs() <= f32::EPSILON {
            ring.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

/// Closed triangle test (counter-clockwise triangle)
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    cross(b - a, p - a) >= 0.0 && cross(c - b, p - b) >= 0.0 && cross(a - c, p - c) >= 0.0
}

/// Sutherland-Hodgman: clip `subject` by the convex counter-clockwise `clip`
fn clip_convex(subject: &[Vec2], clip: &[Vec2; 3]) -> Vec<Vec2> {
    let mut output: Vec<Vec2> = subject.to_vec();
    for i in 0..3 {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % 3];
        let edge = b - a;
        let inside = |p: Vec2| cross(edge, p - a) >= 0.0;
        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(prev), inside(cur)) {
                (true, true) => output.push(cur),
                (true, false) => output.push(line_intersection(prev, cur, a, b)),
                (false, true) => {
                    output.push(line_intersection(prev, cur, a, b));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }
    output
}

fn line_intersection(p: Vec2, q: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let r = q - p;
    let s = b - a;
    let denom = cross(r, s);
    if denom.abs() <= f32::EPSILON {
        return q;
    }
    let t = cross(a - p, s) / denom;
    p + r * t
}

fn triangle_bounds(t: &[Vec2; 3]) -> Rect {
    Rect {
        min: t[0].min(t[1]).min(t[2]),
        max: t[0].max(t[1]).max(t[2]),
    }
}

/// Area of the intersection of two filled shapes
pub fn overlap_area(a: &Shape, b: &Shape) -> f32 {
    let (ta, tb) = (a.triangulate(), b.triangulate());
    let mut total = 0.0;
    for t in &ta {
        let bt = triangle_bounds(t);
        for u in &tb {
            if !bt.overlaps(&triangle_bounds(u)) {
                continue;
            }
            total += signed_area(&clip_convex(t, u)).abs();
        }
    }
    total
}

/// The filled regions share a nonzero area
pub fn shapes_overlap(a: &Shape, b: &Shape) -> bool {
    if a.area() <= AREA_EPSILON || b.area() <= AREA_EPSILON {
        return false;
    }
    let (ta, tb) = (a.triangulate(), b.triangulate());
    ta.iter().any(|t| {
        let bt = triangle_bounds(t);
        tb.iter().any(|u| {
            bt.overlaps(&triangle_bounds(u))
                && signed_area(&clip_convex(t, u)).abs() > AREA_EPSILON
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, side: f32) -> Shape {
        Shape::square(Vec2::new(x + side / 2.0, y + side / 2.0), side)
    }

    /// Concave "C" opening to the right
    fn notch() -> Shape {
        Shape::polygon([
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 20.0),
            Vec2::new(30.0, 20.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(0.0, 30.0),
        ])
    }

    #[test]
    fn test_polygon_drops_repeated_closing_point() {
        let shape = Shape::polygon([
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(0.0, 0.0),
        ]);
        assert_eq!(shape.points().len(), 3);
        assert_eq!(shape.edges().count(), 3);
        assert!((shape.area() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounds_and_translate() {
        let mut shape = square(2.0, 3.0, 4.0);
        assert_eq!(shape.bounds(), Rect::from_xywh(2.0, 3.0, 4.0, 4.0));
        shape.translate(Vec2::new(-2.0, 1.0));
        assert_eq!(shape.bounds(), Rect::from_xywh(0.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn test_rect_scale_about_center() {
        let r = Rect::from_xywh(10.0, 20.0, 40.0, 20.0);
        let s = r.scale_about_center(1.5);
        assert_eq!(s.center(), r.center());
        assert!((s.width() - 60.0).abs() < 1e-4);
        assert!((s.height() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_triangulation_covers_concave_area() {
        let shape = notch();
        let area: f32 = shape
            .triangulate()
            .iter()
            .map(|t| signed_area(t).abs())
            .sum();
        assert!((area - shape.area()).abs() < 1e-3);
        assert!((shape.area() - 700.0).abs() < 1e-3);
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        assert!(shapes_overlap(&a, &b));
        assert!((overlap_area(&a, &b) - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 0.0, 10.0);
        assert!(!shapes_overlap(&a, &b));
        assert!(overlap_area(&a, &b) <= AREA_EPSILON);
    }

    #[test]
    fn test_coincident_shapes_overlap() {
        let a = notch();
        let b = notch();
        assert!(shapes_overlap(&a, &b));
        assert!((overlap_area(&a, &b) - a.area()).abs() < 1e-2);
    }

    #[test]
    fn test_concave_pocket_is_not_overlap() {
        // Sits in the notch's pocket: bounds overlap, regions do not
        let pocket = square(12.0, 12.0, 6.0);
        assert!(notch().bounds().overlaps(&pocket.bounds()));
        assert!(!shapes_overlap(&notch(), &pocket));
    }

    #[test]
    fn test_contained_shape_overlaps() {
        let outer = square(0.0, 0.0, 100.0);
        let inner = square(40.0, 40.0, 2.0);
        assert!(shapes_overlap(&outer, &inner));
        assert!(shapes_overlap(&inner, &outer));
    }

    #[test]
    fn test_polylines_never_overlap() {
        let line = Shape::segment(Vec2::new(-5.0, 5.0), Vec2::new(20.0, 5.0));
        assert!(!shapes_overlap(&line, &square(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_intersects_rect() {
        let view = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert!(square(90.0, 90.0, 20.0).intersects_rect(&view));
        assert!(!square(120.0, 0.0, 10.0).intersects_rect(&view));
        // Segment passing straight through with both ends outside
        assert!(Shape::segment(Vec2::new(-10.0, 50.0), Vec2::new(110.0, 50.0)).intersects_rect(&view));
        // Rect wholly inside a big polygon
        assert!(square(-50.0, -50.0, 300.0).intersects_rect(&view));
    }

    #[test]
    fn test_flatten_subdivides_edges() {
        let tri = Shape::polygon([Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)]);
        assert_eq!(tri.flatten(0).len(), 3);
        assert_eq!(tri.flatten(1).len(), 6);
        let line = Shape::polyline([Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(4.0, 0.0)]);
        assert_eq!(line.flatten(0), vec![Vec2::ZERO, Vec2::new(4.0, 0.0)]);
    }

    #[test]
    fn test_flatten_resolution_is_capped() {
        let seg = Shape::segment(Vec2::ZERO, Vec2::new(256.0, 0.0));
        let deepest = seg.flatten(MAX_FLATTEN_RESOLUTION);
        assert_eq!(deepest.len(), 257);
        assert_eq!(seg.flatten(20), deepest);
    }

    #[test]
    fn test_empty_shape_touches_nothing() {
        let empty = Shape::default();
        assert!(empty.is_empty());
        assert!(!empty.intersects_rect(&Rect::from_xywh(-10.0, -10.0, 20.0, 20.0)));
        assert!(!Shape::segment(Vec2::ZERO, Vec2::X).is_empty());
    }
}
