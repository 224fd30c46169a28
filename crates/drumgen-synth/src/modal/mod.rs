//! Closed-form modal synthesis for canonical membrane shapes.
//!
//! Each shape class has an eigenvalue series with known closed form; a
//! strike location weights the modes, and the waveform is the decaying sum
//! of sinusoids at the eigenfrequencies. No grid, no stability bound - but
//! only shapes with analytic eigenfunctions qualify.

mod bessel;

pub use bessel::{bessel_j, bessel_j_zero};

/// One eigenmode: its index pair and dimensionless eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode {
    /// Modal order n.
    pub n: usize,
    /// Mode number m within the order.
    pub m: usize,
    /// Dimensionless eigenvalue; multiply by c / L for a frequency in Hz.
    pub eigenvalue: f64,
}

/// Eigenmodes of a circular membrane: `z_nm`, the m-th zero of `J_n`, for
/// `0 <= n < orders` and `1 <= m <= per_order`.
pub fn circular_series(orders: usize, per_order: usize) -> Vec<Mode> {
    let mut series = Vec::with_capacity(orders * per_order);
    for n in 0..orders {
        for m in 1..=per_order {
            series.push(Mode {
                n,
                m,
                eigenvalue: bessel_j_zero(n, m),
            });
        }
    }
    series
}

/// Mode amplitudes of a circular membrane for a polar strike `(r, theta)`:
/// `J_n(z_nm * r) * sqrt(2) * sin(n * theta * pi / 4)`.
pub fn circular_amplitudes(r: f64, theta: f64, series: &[Mode]) -> Vec<f64> {
    let sqrt2 = std::f64::consts::SQRT_2;
    series
        .iter()
        .map(|mode| {
            bessel_j(mode.n, mode.eigenvalue * r)
                * sqrt2
                * (mode.n as f64 * theta * std::f64::consts::PI / 4.0).sin()
        })
        .collect()
}

/// Eigenmodes of a unit-area rectangle with aspect ratio `epsilon`:
/// `sqrt(m^2 / e + e n^2)` for `1 <= n <= orders`, `1 <= m <= per_order`.
pub fn rectangular_series(orders: usize, per_order: usize, epsilon: f64) -> Vec<Mode> {
    let mut series = Vec::with_capacity(orders * per_order);
    for n in 1..=orders {
        for m in 1..=per_order {
            let mf = m as f64;
            let nf = n as f64;
            series.push(Mode {
                n,
                m,
                eigenvalue: (mf * mf / epsilon + epsilon * nf * nf).sqrt(),
            });
        }
    }
    series
}

/// Mode amplitudes of a rectangular membrane for a cartesian strike already
/// scaled by the aspect ratio: `sin(m x pi / sqrt(e)) * sin(n y pi *
/// sqrt(e))`.
pub fn rectangular_amplitudes(p: (f64, f64), epsilon: f64, series: &[Mode]) -> Vec<f64> {
    let pi = std::f64::consts::PI;
    let root = epsilon.sqrt();
    series
        .iter()
        .map(|mode| {
            (mode.m as f64 * p.0 * pi / root).sin() * (mode.n as f64 * p.1 * pi * root).sin()
        })
        .collect()
}

/// Eigenmodes of an equilateral triangle membrane (Lamé):
/// `sqrt(m^2 + n^2 + m n)` for `1 <= n <= orders`, `1 <= m <= per_order`.
pub fn triangular_series(orders: usize, per_order: usize) -> Vec<Mode> {
    let mut series = Vec::with_capacity(orders * per_order);
    for n in 1..=orders {
        for m in 1..=per_order {
            let mf = m as f64;
            let nf = n as f64;
            series.push(Mode {
                n,
                m,
                eigenvalue: (mf * mf + nf * nf + mf * nf).sqrt(),
            });
        }
    }
    series
}

/// Mode amplitudes of an equilateral triangle for a trilinear strike
/// `(u, v, w)` with `u + v + w = 1`:
/// `|sin(n u pi) * sin(n v pi) * sin(n w pi)|`.
pub fn triangular_amplitudes(u: f64, v: f64, w: f64, series: &[Mode]) -> Vec<f64> {
    let pi = std::f64::consts::PI;
    series
        .iter()
        .map(|mode| {
            let nf = mode.n as f64;
            ((nf * u * pi).sin() * (nf * v * pi).sin() * (nf * w * pi).sin()).abs()
        })
        .collect()
}

/// Eigenmodes of a 1D string: `z_n = n` for `1 <= n <= orders`.
pub fn linear_series(orders: usize) -> Vec<Mode> {
    (1..=orders)
        .map(|n| Mode {
            n,
            m: 0,
            eigenvalue: n as f64,
        })
        .collect()
}

/// Mode amplitudes of a string struck at normalised position `x`:
/// `sin(n pi x)`.
pub fn linear_amplitudes(x: f64, series: &[Mode]) -> Vec<f64> {
    let pi = std::f64::consts::PI;
    series
        .iter()
        .map(|mode| (mode.n as f64 * pi * x).sin())
        .collect()
}

/// Per-sample exponential decay constant from a T60 decay time.
///
/// An infinite decay time maps deterministically to 0.0 (a flat envelope);
/// the infinity never enters the arithmetic.
pub fn modal_decay(decay_time: f64, sample_length: f64) -> f64 {
    if !decay_time.is_finite() {
        return 0.0;
    }
    -sample_length * 6.0 * std::f64::consts::LN_10 / decay_time
}

/// Closed-form solution of the wave equation as a decaying mode sum.
///
/// `W[t] = sum(A_i * exp(decay * t) * sin(t * 2 pi f_i k)) / (count * peak)`
/// where `peak = max |A|`. A nodal strike (all amplitudes zero) yields
/// silence rather than a division by zero.
pub fn wave_equation_waveform(
    frequencies: &[f64],
    amplitudes: &[f64],
    decay: f64,
    sample_length: f64,
    num_samples: usize,
) -> Vec<f64> {
    debug_assert_eq!(frequencies.len(), amplitudes.len());
    let count = frequencies.len().min(amplitudes.len());
    let peak = amplitudes.iter().fold(0.0_f64, |acc, a| acc.max(a.abs()));
    if count == 0 || peak == 0.0 {
        return vec![0.0; num_samples];
    }

    let two_pi_k = 2.0 * std::f64::consts::PI * sample_length;
    let norm = 1.0 / (count as f64 * peak);
    let mut waveform = vec![0.0; num_samples];
    for (sample, value) in waveform.iter_mut().enumerate() {
        let t = sample as f64;
        let envelope = (decay * t).exp();
        let mut sum = 0.0;
        for i in 0..count {
            sum += amplitudes[i] * (t * two_pi_k * frequencies[i]).sin();
        }
        *value = sum * envelope * norm;
    }
    waveform
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_circular_amplitudes_vanish_on_the_boundary() {
        let series = circular_series(10, 10);
        for r in [1.0, -1.0] {
            for theta in [0.0, std::f64::consts::FRAC_PI_2, std::f64::consts::PI] {
                let peak = circular_amplitudes(r, theta, &series)
                    .into_iter()
                    .fold(0.0_f64, |acc, a| acc.max(a.abs()));
                assert_abs_diff_eq!(peak, 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_circular_centre_strike_is_radially_symmetric() {
        let series = circular_series(8, 8);
        let reference = circular_amplitudes(0.0, 0.0, &series);
        for theta in [0.5, 1.0, 2.0, std::f64::consts::PI] {
            let other = circular_amplitudes(0.0, theta, &series);
            for (a, b) in reference.iter().zip(&other) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_rectangular_amplitudes_vanish_on_the_boundary() {
        for epsilon in [1.0, 1.5, 2.0] {
            let series = rectangular_series(10, 10, epsilon);
            let root = epsilon.sqrt();
            for corner in [
                (0.0, 0.0),
                (root, 0.0),
                (0.0, 1.0 / root),
                (root, 1.0 / root),
            ] {
                let peak = rectangular_amplitudes(corner, epsilon, &series)
                    .into_iter()
                    .fold(0.0_f64, |acc, a| acc.max(a.abs()));
                assert_abs_diff_eq!(peak, 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_triangular_amplitudes_vanish_on_edges() {
        let series = triangular_series(8, 8);
        // On an edge one trilinear coordinate is zero.
        let peak = triangular_amplitudes(0.0, 0.5, 0.5, &series)
            .into_iter()
            .fold(0.0_f64, |acc, a| acc.max(a.abs()));
        assert_abs_diff_eq!(peak, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_amplitudes_vanish_at_the_ends() {
        let series = linear_series(10);
        for x in [0.0, 1.0] {
            let peak = linear_amplitudes(x, &series)
                .into_iter()
                .fold(0.0_f64, |acc, a| acc.max(a.abs()));
            assert_abs_diff_eq!(peak, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_series_sizes_and_ordering() {
        let series = circular_series(3, 4);
        assert_eq!(series.len(), 12);
        assert_eq!((series[0].n, series[0].m), (0, 1));
        assert_eq!((series[11].n, series[11].m), (2, 4));
        // Zeros increase within an order.
        assert!(series[1].eigenvalue > series[0].eigenvalue);
    }

    #[test]
    fn test_waveform_is_normalised_and_bounded() {
        let frequencies = [100.0, 200.0, 300.0];
        let amplitudes = [0.5, 0.25, 0.125];
        let waveform = wave_equation_waveform(&frequencies, &amplitudes, -1e-4, 1.0 / 48000.0, 4800);
        assert_eq!(waveform.len(), 4800);
        assert!(waveform.iter().all(|v| v.abs() <= 1.0));
        assert!(waveform.iter().any(|v| v.abs() > 0.0));
    }

    #[test]
    fn test_nodal_strike_yields_silence_not_nan() {
        let frequencies = [100.0, 200.0];
        let amplitudes = [0.0, 0.0];
        let waveform = wave_equation_waveform(&frequencies, &amplitudes, -1e-4, 1.0 / 48000.0, 100);
        assert!(waveform.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_zero_decay_keeps_envelope_flat() {
        let frequencies = [441.0];
        let amplitudes = [1.0];
        let waveform = wave_equation_waveform(&frequencies, &amplitudes, 0.0, 1.0 / 44100.0, 2000);
        // With no decay the mode rings at constant amplitude; compare the
        // first and last quarter peaks.
        let early = waveform[..500].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let late = waveform[1500..].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert_abs_diff_eq!(early, late, epsilon = 1e-6);
    }
}
