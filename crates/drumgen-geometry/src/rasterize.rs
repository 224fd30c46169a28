//! Rasterisation of normalised polygons into boundary masks.

use crate::error::{GeometryError, GeometryResult};
use crate::point::Point;
use crate::polygon::Polygon;

/// An H x H boolean occupancy grid over the unit square.
///
/// `mask[x][y]` is set iff the unit-square point corresponding to cell
/// `(x, y)` lies on or inside the polygon. The first index runs along the x
/// axis, matching the coordinate semantics of the strike and listening
/// logic downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMask {
    resolution: usize,
    cells: Vec<bool>,
}

impl BoundaryMask {
    /// Rasterises a polygon onto a `resolution` x `resolution` grid.
    ///
    /// The polygon must already live inside the unit square (see
    /// [`crate::normalize::normalize`]). Convex polygons take a fan/scan
    /// fill; concave polygons use an even-odd scanline fill. Both paths mark
    /// the boundary cells explicitly, so the mask is interior + boundary.
    pub fn render(polygon: &Polygon, resolution: usize) -> GeometryResult<Self> {
        if resolution < 2 {
            return Err(GeometryError::InvalidResolution { resolution });
        }
        let (min, max) = polygon.bounding_box();
        let tol = 1e-9;
        if min.x < -tol || min.y < -tol || max.x > 1.0 + tol || max.y > 1.0 + tol {
            return Err(GeometryError::NotNormalised);
        }

        // Snap vertices onto the grid the way the fill sees them, so the
        // filled interior and the drawn boundary agree exactly.
        let scale = (resolution - 1) as f64;
        let snapped: Vec<(i64, i64)> = polygon
            .vertices()
            .iter()
            .map(|v| ((v.x * scale).round() as i64, (v.y * scale).round() as i64))
            .collect();

        let mut mask = Self {
            resolution,
            cells: vec![false; resolution * resolution],
        };
        if polygon.is_convex() {
            mask.fill_convex(&snapped);
        } else {
            mask.fill_even_odd(&snapped);
        }
        for i in 0..snapped.len() {
            let a = snapped[i];
            let b = snapped[(i + 1) % snapped.len()];
            mask.draw_segment(a, b);
        }
        Ok(mask)
    }

    /// Grid resolution H.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Whether cell `(x, y)` is on or inside the polygon.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x * self.resolution + y]
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Fraction of the grid covered, an estimate of the polygon area.
    pub fn coverage(&self) -> f64 {
        self.count_set() as f64 / (self.resolution * self.resolution) as f64
    }

    /// Inclusive bounding ranges `((x0, x1), (y0, y1))` of the set cells, or
    /// `None` when the mask is empty.
    pub fn bounding_box(&self) -> Option<((usize, usize), (usize, usize))> {
        let mut x_range: Option<(usize, usize)> = None;
        let mut y_range: Option<(usize, usize)> = None;
        for x in 0..self.resolution {
            for y in 0..self.resolution {
                if self.get(x, y) {
                    x_range = Some(match x_range {
                        Some((lo, hi)) => (lo.min(x), hi.max(x)),
                        None => (x, x),
                    });
                    y_range = Some(match y_range {
                        Some((lo, hi)) => (lo.min(y), hi.max(y)),
                        None => (y, y),
                    });
                }
            }
        }
        Some((x_range?, y_range?))
    }

    /// Converts a unit-square coordinate to its nearest grid cell.
    pub fn cell_of(&self, p: Point) -> (usize, usize) {
        let scale = (self.resolution - 1) as f64;
        let clamp = |v: f64| (v * scale).round().clamp(0.0, scale) as usize;
        (clamp(p.x), clamp(p.y))
    }

    fn set(&mut self, x: i64, y: i64) {
        let h = self.resolution as i64;
        if (0..h).contains(&x) && (0..h).contains(&y) {
            self.cells[(x * h + y) as usize] = true;
        }
    }

    /// Scanline fill for convex outlines: each row is one solid span.
    fn fill_convex(&mut self, snapped: &[(i64, i64)]) {
        for y in 0..self.resolution as i64 {
            let crossings = row_crossings(snapped, y);
            if let (Some(lo), Some(hi)) = (
                crossings.iter().cloned().reduce(f64::min),
                crossings.iter().cloned().reduce(f64::max),
            ) {
                self.fill_row(y, lo, hi);
            }
        }
    }

    /// Even-odd scanline fill for general simple outlines.
    fn fill_even_odd(&mut self, snapped: &[(i64, i64)]) {
        for y in 0..self.resolution as i64 {
            let mut crossings = row_crossings(snapped, y);
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                self.fill_row(y, pair[0], pair[1]);
            }
        }
    }

    fn fill_row(&mut self, y: i64, lo: f64, hi: f64) {
        let start = lo.ceil() as i64;
        let end = hi.floor() as i64;
        for x in start..=end {
            self.set(x, y);
        }
    }

    /// Bresenham segment rasterisation, marking boundary cells.
    fn draw_segment(&mut self, a: (i64, i64), b: (i64, i64)) {
        let (mut x, mut y) = a;
        let dx = (b.0 - a.0).abs();
        let dy = -(b.1 - a.1).abs();
        let sx = if a.0 < b.0 { 1 } else { -1 };
        let sy = if a.1 < b.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set(x, y);
            if (x, y) == b {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Intersections of the outline with the horizontal row `y`, using the
/// half-open crossing rule so shared vertices count once.
fn row_crossings(snapped: &[(i64, i64)], y: i64) -> Vec<f64> {
    let n = snapped.len();
    let yf = y as f64;
    let mut crossings = Vec::new();
    for i in 0..n {
        let (ax, ay) = snapped[i];
        let (bx, by) = snapped[(i + 1) % n];
        if (ay > y) != (by > y) {
            let t = (yf - ay as f64) / (by - ay) as f64;
            crossings.push(ax as f64 + t * (bx - ax) as f64);
        }
    }
    crossings
}
