//! Random polygon generators.
//!
//! Three strategies with different coverage/cost trade-offs:
//!
//! - [`generate_convex`]: Valtr's algorithm. Convex by construction.
//! - [`generate_star`]: scatter-and-sort. Reaches star-shaped concave
//!   polygons only; this is a documented coverage limitation.
//! - [`generate_simple`]: 2-opt untangling of a random closed loop. Reaches
//!   a broader (still not complete) family of simple polygons and has an
//!   unquantified chance of returning a convex result.
//!
//! Output vertices are raw: not yet normalised, and possibly containing
//! colinear triples. Callers are expected to check and regenerate.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::{GeometryError, GeometryResult};
use crate::lines::line_intersection;
use crate::point::Point;
use crate::polygon::Polygon;

/// Upper bound on 2-opt untangling passes before giving up.
const MAX_UNTANGLE_PASSES: usize = 4096;

fn check_vertex_count(n: usize) -> GeometryResult<()> {
    if n < 3 {
        return Err(GeometryError::TooFewVertices { count: n });
    }
    Ok(())
}

/// Generates a random convex polygon with `n` vertices.
///
/// Valtr's 1995 algorithm: two independently sorted coordinate sequences are
/// split into chains by random bit choice, pairwise-differenced into edge
/// vectors, sorted by polar angle, and summed into a closed loop. Convexity
/// follows by construction and is not re-verified here.
pub fn generate_convex(n: usize, rng: &mut Pcg32) -> GeometryResult<Polygon> {
    check_vertex_count(n)?;

    let mut xs: Vec<f64> = (0..n).map(|_| rng.gen()).collect();
    let mut ys: Vec<f64> = (0..n).map(|_| rng.gen()).collect();
    xs.sort_by(f64::total_cmp);
    ys.sort_by(f64::total_cmp);

    // Divide the interior points into a positive and a negative chain.
    let mut dx = vec![0.0; n];
    let mut dy = vec![0.0; n];
    let (mut last_top, mut last_bot) = (xs[0], xs[0]);
    let (mut last_left, mut last_right) = (ys[0], ys[0]);
    for i in 1..n - 1 {
        if rng.gen::<bool>() {
            dx[i] = xs[i] - last_top;
            last_top = xs[i];
            dy[i] = ys[i] - last_left;
            last_left = ys[i];
        } else {
            dx[i] = last_bot - xs[i];
            last_bot = xs[i];
            dy[i] = last_right - ys[i];
            last_right = ys[i];
        }
    }
    dx[0] = xs[n - 1] - last_top;
    dx[n - 1] = last_bot - xs[n - 1];
    dy[0] = ys[n - 1] - last_left;
    dy[n - 1] = last_right - ys[n - 1];

    // Randomly pair the x and y components, then order by polar angle.
    dy.shuffle(rng);
    let mut vectors: Vec<Point> = dx
        .into_iter()
        .zip(dy)
        .map(|(x, y)| Point::new(x, y))
        .collect();
    vectors.sort_by(|a, b| a.angle().total_cmp(&b.angle()));

    // Lay the vectors end to end; the chains telescope, so the loop closes.
    let mut vertices = Vec::with_capacity(n);
    let mut accum = Point::default();
    for v in vectors {
        vertices.push(accum);
        accum = accum + v;
    }

    Polygon::new(vertices)
}

/// Generates a random star-shaped polygon with `n` vertices.
///
/// Scatters points in the unit square, centres them on their centroid, and
/// orders them by polar angle about the origin. The centroid sits inside the
/// convex hull, so the angular ordering cannot tangle; the price is that
/// most concave simple polygons are unreachable, and a convex result slips
/// through occasionally.
pub fn generate_star(n: usize, rng: &mut Pcg32) -> GeometryResult<Polygon> {
    check_vertex_count(n)?;

    let mut vertices: Vec<Point> = (0..n).map(|_| Point::new(rng.gen(), rng.gen())).collect();

    let centre = vertices
        .iter()
        .fold(Point::default(), |acc, v| acc + *v)
        * (1.0 / n as f64);
    for v in &mut vertices {
        *v = *v - centre;
    }

    vertices.sort_by(|a, b| a.angle().total_cmp(&b.angle()));
    Polygon::new(vertices)
}

/// Generates a random simple polygon with `n` vertices by 2-opt untangling.
///
/// Starts from an arbitrary closed loop of random points, sweeps for
/// intersecting edge pairs, and resolves one randomly selected crossing per
/// pass by reversing the vertex run between the crossing edges, until no
/// crossings remain.
pub fn generate_simple(n: usize, rng: &mut Pcg32) -> GeometryResult<Polygon> {
    check_vertex_count(n)?;

    let mut vertices: Vec<Point> = (0..n).map(|_| Point::new(rng.gen(), rng.gen())).collect();

    for _ in 0..MAX_UNTANGLE_PASSES {
        let crossings = find_crossings(&vertices);
        if crossings.is_empty() {
            return Polygon::new(vertices);
        }
        let (i, j) = crossings[rng.gen_range(0..crossings.len())];
        // Reconnect edges (i, i+1) and (j, j+1) as (i, j) and (i+1, j+1).
        vertices[i + 1..=j].reverse();
    }

    Err(GeometryError::UntangleFailed {
        passes: MAX_UNTANGLE_PASSES,
    })
}

/// Collects all pairs of non-adjacent edges that meet, as `(i, j)` with
/// `i < j` indexing the first vertex of each edge.
fn find_crossings(vertices: &[Point]) -> Vec<(usize, usize)> {
    let n = vertices.len();
    let mut crossings = Vec::new();
    for i in 0..n {
        let a = (vertices[i], vertices[(i + 1) % n]);
        for j in i + 1..n {
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let b = (vertices[j], vertices[(j + 1) % n]);
            if line_intersection(a, b).exists() {
                crossings.push((i, j));
            }
        }
    }
    crossings
}
