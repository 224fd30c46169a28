//! Strike excitation distributions.
//!
//! A drum strike is modelled as a smooth, compactly supported pulse placed
//! on the grid at the strike cell: either a raised cosine or a raised
//! triangle. Two-dimensional grids are flat row-major vectors indexed as
//! `grid[x * height + y]`, matching the boundary mask convention.

/// One-dimensional raised cosine centred at `mu` with radius `sigma`.
///
/// `value[i] = 0.5 * (1 + cos(pi * |i - mu| / sigma))` for `|i - mu| <=
/// sigma`, else zero.
pub fn raised_cosine_1d(length: usize, mu: f64, sigma: f64) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let r = (i as f64 - mu).abs();
            if r <= sigma {
                0.5 * (1.0 + (std::f64::consts::PI * r / sigma).cos())
            } else {
                0.0
            }
        })
        .collect()
}

/// Two-dimensional raised cosine centred at `mu` with radius `sigma`, on a
/// `width` x `height` grid.
///
/// The radius is Euclidean: the pulse has circular support, peaks at exactly
/// 1 on the centre cell, and is exactly 0 beyond `sigma`.
pub fn raised_cosine_2d(
    width: usize,
    height: usize,
    mu: (f64, f64),
    sigma: f64,
) -> Vec<f64> {
    let mut grid = vec![0.0; width * height];
    for x in 0..width {
        for y in 0..height {
            let r = (x as f64 - mu.0).hypot(y as f64 - mu.1);
            if r <= sigma {
                grid[x * height + y] = 0.5 * (1.0 + (std::f64::consts::PI * r / sigma).cos());
            }
        }
    }
    grid
}

/// One-dimensional triangular distribution peaking at `mu`, supported on
/// `[a, b]`.
pub fn raised_triangle_1d(length: usize, mu: f64, a: f64, b: f64) -> Vec<f64> {
    (0..length).map(|i| triangle(i as f64, mu, a, b)).collect()
}

/// Two-dimensional triangular distribution `lambda(x) * lambda(y)` peaking
/// at `mu`, supported on `x_ab` x `y_ab`.
pub fn raised_triangle_2d(
    width: usize,
    height: usize,
    mu: (f64, f64),
    x_ab: (f64, f64),
    y_ab: (f64, f64),
) -> Vec<f64> {
    let mut grid = vec![0.0; width * height];
    for x in 0..width {
        let lx = triangle(x as f64, mu.0, x_ab.0, x_ab.1);
        if lx == 0.0 {
            continue;
        }
        for y in 0..height {
            grid[x * height + y] = lx * triangle(y as f64, mu.1, y_ab.0, y_ab.1);
        }
    }
    grid
}

fn triangle(x: f64, mu: f64, a: f64, b: f64) -> f64 {
    if x < a || x > b {
        0.0
    } else if x <= mu {
        if mu == a {
            1.0
        } else {
            (x - a) / (mu - a)
        }
    } else if mu == b {
        1.0
    } else {
        1.0 - (x - mu) / (b - mu)
    }
}
