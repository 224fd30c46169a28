//! The immutable polygon value type.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::lines::{is_colinear, line_intersection, EPSILON};
use crate::point::Point;

/// A simple polygon given by its ordered vertices.
///
/// The value is immutable once constructed: area, centroid, and convexity
/// are computed exactly once. Simplicity is an O(n^2) pairwise check and is
/// therefore evaluated on demand rather than cached up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
    area: f64,
    centroid: Point,
    convex: bool,
}

impl Polygon {
    /// Builds a polygon from its ordered vertices.
    ///
    /// Fails when fewer than three vertices are supplied. Simplicity is not
    /// verified here; see [`Polygon::is_simple`].
    pub fn new(vertices: Vec<Point>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let area = signed_area(&vertices);
        let centroid = centroid(&vertices, area);
        let convex = is_convex(&vertices);
        Ok(Self {
            vertices,
            area: area.abs(),
            centroid,
            convex,
        })
    }

    /// The ordered vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Surface area, from the shoelace formula.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Geometric centroid.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Whether the polygon is convex.
    pub fn is_convex(&self) -> bool {
        self.convex
    }

    /// Whether the vertices wind clockwise (negative signed area).
    pub fn is_clockwise(&self) -> bool {
        signed_area(&self.vertices) < 0.0
    }

    /// Checks that no two non-adjacent edges meet.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = (self.vertices[i], self.vertices[(i + 1) % n]);
            for j in i + 1..n {
                // Adjacent edges share a vertex by construction.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let b = (self.vertices[j], self.vertices[(j + 1) % n]);
                if line_intersection(a, b).exists() {
                    return false;
                }
            }
        }
        true
    }

    /// Explicit validity check for generated shapes.
    ///
    /// Fails on self-intersection or on a colinear adjacent-vertex triple.
    /// Nothing is repaired here; callers regenerate on failure.
    pub fn validate_shape(&self) -> GeometryResult<()> {
        if !self.is_simple() {
            return Err(GeometryError::NotSimple);
        }
        if self.has_colinear_triple() {
            return Err(GeometryError::ColinearVertices);
        }
        Ok(())
    }

    /// Whether any three cyclically adjacent vertices are colinear.
    pub fn has_colinear_triple(&self) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            is_colinear(
                self.vertices[i],
                self.vertices[(i + 1) % n],
                self.vertices[(i + 2) % n],
            )
        })
    }

    /// Finds the longest vertex-pair vector by exhaustive pairwise search.
    ///
    /// Returns the length and the index pair `(i, j)` with `i < j`; ties keep
    /// the first pair found, so the result is deterministic.
    pub fn largest_vector(&self) -> (f64, (usize, usize)) {
        let n = self.vertices.len();
        let mut best = (0.0, (0, 0));
        for i in 0..n {
            for j in i + 1..n {
                let length = self.vertices[i].distance(self.vertices[j]);
                if length > best.0 {
                    best = (length, (i, j));
                }
            }
        }
        best
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounding_box(&self) -> (Point, Point) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        (min, max)
    }

    /// Determines whether `p` lies on or inside the polygon.
    ///
    /// Convex polygons use the half-plane fan test; concave polygons fall
    /// back to an even-odd ray cast with an explicit boundary check.
    pub fn contains(&self, p: Point) -> bool {
        if self.convex {
            self.contains_convex(p)
        } else {
            self.on_boundary(p) || self.contains_even_odd(p)
        }
    }

    fn contains_convex(&self, p: Point) -> bool {
        let n = self.vertices.len();
        let mut sign = 0.0f64;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = (b - a).cross(p - a);
            if cross.abs() < EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if sign != cross.signum() {
                return false;
            }
        }
        true
    }

    fn contains_even_odd(&self, p: Point) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }

    fn on_boundary(&self, p: Point) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            (b - a).cross(p - a).abs() < EPSILON
                && p.x >= a.x.min(b.x) - EPSILON
                && p.x <= a.x.max(b.x) + EPSILON
                && p.y >= a.y.min(b.y) - EPSILON
                && p.y <= a.y.max(b.y) + EPSILON
        })
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<Point>) -> GeometryResult<Self> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

/// Signed shoelace area; positive for counter-clockwise winding.
pub(crate) fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        twice_area += a.cross(b);
    }
    twice_area / 2.0
}

fn centroid(vertices: &[Point], signed_area: f64) -> Point {
    let n = vertices.len();
    if signed_area.abs() < f64::EPSILON {
        // Degenerate sliver; fall back to the vertex mean.
        let sum = vertices.iter().fold(Point::default(), |acc, v| acc + *v);
        return sum * (1.0 / n as f64);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let w = a.cross(b);
        cx += (a.x + b.x) * w;
        cy += (a.y + b.y) * w;
    }
    Point::new(cx / (6.0 * signed_area), cy / (6.0 * signed_area))
}

fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b - a).cross(c - b);
        if cross.abs() < EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if sign != cross.signum() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn unit_square() -> Polygon {
        Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        assert!(Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_unit_square_properties() {
        let square = unit_square();
        assert_eq!(square.area(), 1.0);
        assert_eq!(square.centroid(), p(0.5, 0.5));
        assert!(square.is_convex());
        assert!(square.is_simple());
        assert!(!square.has_colinear_triple());
    }

    #[test]
    fn test_winding_direction() {
        let ccw = unit_square();
        assert!(!ccw.is_clockwise());
        let cw =
            Polygon::new(vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
        assert!(cw.is_clockwise());
        assert_eq!(cw.area(), 1.0);
    }

    #[test]
    fn test_largest_vector_is_diagonal() {
        let (length, (i, j)) = unit_square().largest_vector();
        assert_abs_diff_eq!(length, std::f64::consts::SQRT_2, epsilon = 1e-15);
        assert_eq!((i, j), (0, 2));
    }

    #[test]
    fn test_concave_quad_detected() {
        let dart = Polygon::new(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.5, 0.25),
            p(0.5, 1.0),
        ])
        .unwrap();
        assert!(!dart.is_convex());
        assert!(dart.is_simple());
    }

    #[test]
    fn test_self_intersection_detected() {
        let bowtie = Polygon::new(vec![
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
        ])
        .unwrap();
        assert!(!bowtie.is_simple());
    }

    #[test]
    fn test_validate_shape() {
        assert!(unit_square().validate_shape().is_ok());

        let bowtie = Polygon::new(vec![
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
        ])
        .unwrap();
        assert!(matches!(
            bowtie.validate_shape(),
            Err(GeometryError::NotSimple)
        ));

        let flat = Polygon::new(vec![
            p(0.0, 0.0),
            p(0.5, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
        ])
        .unwrap();
        assert!(matches!(
            flat.validate_shape(),
            Err(GeometryError::ColinearVertices)
        ));
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let square = unit_square();
        for v in square.vertices() {
            assert!(square.contains(*v));
        }
        assert!(square.contains(p(0.999, 0.5)));
        assert!(!square.contains(p(1.001, 0.5)));
        assert!(square.contains(p(0.5, 0.001)));
        assert!(!square.contains(p(0.5, -0.001)));
    }

    #[test]
    fn test_contains_concave() {
        let dart = Polygon::new(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.5, 0.25),
            p(0.5, 1.0),
        ])
        .unwrap();
        // The notch above the reflex vertex is outside.
        assert!(!dart.contains(p(0.75, 0.5)));
        assert!(dart.contains(p(0.5, 0.2)));
        assert!(dart.contains(p(0.5, 0.25)));
    }

    #[test]
    fn test_serde_round_trip() {
        let square = unit_square();
        let json = serde_json::to_string(&square).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(square, back);
        assert_eq!(back.area(), 1.0);
    }
}
