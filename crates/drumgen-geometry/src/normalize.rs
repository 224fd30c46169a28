//! Canonical normalisation of polygons.
//!
//! Every isometric or similar copy of a polygon should reduce to one
//! representative inside the unit square. The reduction: enforce clockwise
//! winding, translate the midpoint of the largest vertex-pair vector to the
//! origin, rotate that vector onto the x axis, resolve reflections by the
//! dominant quadrant area, then rescale uniformly so the coordinates span
//! exactly [0, 1]. Normalising an already-normalised polygon is a fixed
//! point within floating tolerance.

use crate::error::GeometryResult;
use crate::point::Point;
use crate::polygon::{signed_area, Polygon};

/// Normalises a polygon to its canonical representative in the unit square.
///
/// Colinear adjacent-vertex triples are not repaired here; callers that
/// require a clean polygon should check [`Polygon::has_colinear_triple`] on
/// the result and regenerate.
pub fn normalize(polygon: &Polygon) -> GeometryResult<Polygon> {
    let mut vertices = polygon.vertices().to_vec();

    // Clockwise winding, so every downstream orientation test is uniform.
    if signed_area(&vertices) > 0.0 {
        vertices.reverse();
    }

    // The largest vector fixes the canonical frame: its midpoint becomes the
    // origin and its direction the x axis.
    let (i, j) = largest_pair(&vertices);
    let mid = Point::midpoint(vertices[i], vertices[j]);
    for v in &mut vertices {
        *v = *v - mid;
    }
    let theta = -(vertices[j] - vertices[i]).angle();
    for v in &mut vertices {
        *v = v.rotated(theta);
    }

    // Reflections are isometries too: pick the mirror image whose dominant
    // quadrant (by clipped area) is the first quadrant.
    let (sx, sy) = dominant_quadrant_flip(&vertices);
    if sx < 0.0 || sy < 0.0 {
        for v in &mut vertices {
            v.x *= sx;
            v.y *= sy;
        }
        if sx * sy < 0.0 {
            // A single mirror reverses the winding.
            vertices.reverse();
        }
    }

    // Centre the y span, then rescale so all coordinates lie in [0, 1]. The
    // largest vector bounds every axis span, so the x extremes survive as
    // the global extremes and map to exactly 0 and 1.
    let (min_y, max_y) = extent(vertices.iter().map(|v| v.y));
    let y_shift = (min_y + max_y) / 2.0;
    for v in &mut vertices {
        v.y -= y_shift;
    }
    let min = vertices.iter().fold(f64::INFINITY, |m, v| m.min(v.x.min(v.y)));
    let max = vertices
        .iter()
        .fold(f64::NEG_INFINITY, |m, v| m.max(v.x.max(v.y)));
    let span = max - min;
    for v in &mut vertices {
        v.x = ((v.x - min) / span).clamp(0.0, 1.0);
        v.y = ((v.y - min) / span).clamp(0.0, 1.0);
    }

    // Order the loop to start at the x = 0 endpoint of the largest vector.
    let start = vertices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    vertices.rotate_left(start);

    Polygon::new(vertices)
}

/// Whether the polygon's bounding box spans the unit square.
pub fn is_normalized(polygon: &Polygon) -> bool {
    let (min, max) = polygon.bounding_box();
    let tol = 1e-9;
    min.x.min(min.y).abs() < tol && (max.x.max(max.y) - 1.0).abs() < tol
}

fn largest_pair(vertices: &[Point]) -> (usize, usize) {
    let n = vertices.len();
    let mut best = (0.0f64, (0, 0));
    for i in 0..n {
        for j in i + 1..n {
            let length = vertices[i].distance(vertices[j]);
            if length > best.0 {
                best = (length, (i, j));
            }
        }
    }
    best.1
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Chooses axis flips so the quadrant holding the most polygon area becomes
/// the first quadrant. Ties keep the earlier quadrant, so symmetric shapes
/// stay untouched.
fn dominant_quadrant_flip(vertices: &[Point]) -> (f64, f64) {
    let right = clip_halfplane(vertices, Point::new(1.0, 0.0));
    let left = clip_halfplane(vertices, Point::new(-1.0, 0.0));
    let quadrants = [
        clip_halfplane(&right, Point::new(0.0, 1.0)),
        clip_halfplane(&left, Point::new(0.0, 1.0)),
        clip_halfplane(&left, Point::new(0.0, -1.0)),
        clip_halfplane(&right, Point::new(0.0, -1.0)),
    ];
    let areas: Vec<f64> = quadrants
        .iter()
        .map(|q| signed_area(q).abs())
        .collect();
    let mut best = 0;
    for (idx, area) in areas.iter().enumerate().skip(1) {
        if *area > areas[best] + 1e-12 {
            best = idx;
        }
    }
    match best {
        0 => (1.0, 1.0),
        1 => (-1.0, 1.0),
        2 => (-1.0, -1.0),
        _ => (1.0, -1.0),
    }
}

/// Sutherland-Hodgman clip against the half-plane `normal . p >= 0`.
fn clip_halfplane(vertices: &[Point], normal: Point) -> Vec<Point> {
    let inside = |p: Point| normal.x * p.x + normal.y * p.y >= 0.0;
    let n = vertices.len();
    let mut out = Vec::with_capacity(n + 2);
    for idx in 0..n {
        let cur = vertices[idx];
        let next = vertices[(idx + 1) % n];
        let cur_in = inside(cur);
        let next_in = inside(next);
        if cur_in {
            out.push(cur);
        }
        if cur_in != next_in {
            let edge = next - cur;
            let denom = normal.x * edge.x + normal.y * edge.y;
            let t = -(normal.x * cur.x + normal.y * cur.y) / denom;
            out.push(cur + edge * t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn assert_vertices_close(a: &Polygon, b: &[Point]) {
        assert_eq!(a.num_vertices(), b.len());
        for (got, want) in a.vertices().iter().zip(b) {
            assert_abs_diff_eq!(got.x, want.x, epsilon = 1e-9);
            assert_abs_diff_eq!(got.y, want.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unit_square_becomes_canonical_diamond() {
        let square =
            Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
        let normalized = normalize(&square).unwrap();
        assert_vertices_close(
            &normalized,
            &[p(0.0, 0.5), p(0.5, 1.0), p(1.0, 0.5), p(0.5, 0.0)],
        );
        assert!(normalized.is_clockwise());
    }

    #[test]
    fn test_opposite_windings_share_a_representative() {
        let cw = Polygon::new(vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
        let ccw = Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
        let a = normalize(&cw).unwrap();
        let b = normalize(&ccw).unwrap();
        assert_vertices_close(&a, b.vertices());
    }

    #[test]
    fn test_axis_swap_shares_a_representative() {
        // The same quad with x and y exchanged (a reflection across y = x).
        let quad = Polygon::new(vec![p(0.0, 0.0), p(1.1, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
        let swapped =
            Polygon::new(vec![p(0.0, 0.0), p(0.0, 1.1), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
        let a = normalize(&quad).unwrap();
        let b = normalize(&swapped).unwrap();
        assert_vertices_close(&a, b.vertices());
    }

    #[test]
    fn test_similarity_transforms_share_a_representative() {
        let quad = Polygon::new(vec![p(0.0, 0.0), p(1.1, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
        let moved: Vec<Point> = quad
            .vertices()
            .iter()
            .map(|v| (v.rotated(0.7) * 3.5) + p(-2.0, 11.0))
            .collect();
        let a = normalize(&quad).unwrap();
        let b = normalize(&Polygon::new(moved).unwrap()).unwrap();
        assert_vertices_close(&a, b.vertices());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let quad = Polygon::new(vec![p(0.2, 0.1), p(1.3, 0.4), p(0.9, 1.2), p(0.1, 0.8)]).unwrap();
        let once = normalize(&quad).unwrap();
        let twice = normalize(&once).unwrap();
        assert_vertices_close(&twice, once.vertices());
    }

    #[test]
    fn test_output_spans_unit_interval() {
        let tri = Polygon::new(vec![p(-3.0, 2.0), p(4.0, 5.0), p(1.0, -1.0)]).unwrap();
        let normalized = normalize(&tri).unwrap();
        let (min, max) = normalized.bounding_box();
        assert_abs_diff_eq!(min.x.min(min.y), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max.x.max(max.y), 1.0, epsilon = 1e-12);
        assert!(is_normalized(&normalized));

        // The longest diagonal spans [0, 1] along the x axis.
        let (length, (i, j)) = normalized.largest_vector();
        assert_abs_diff_eq!(length, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalized.vertices()[i].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalized.vertices()[j].x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_vertex_starts_the_largest_vector() {
        let tri = Polygon::new(vec![p(0.3, 0.4), p(5.0, 1.0), p(2.0, 3.0)]).unwrap();
        let normalized = normalize(&tri).unwrap();
        assert_abs_diff_eq!(normalized.vertices()[0].x, 0.0, epsilon = 1e-12);
    }
}
