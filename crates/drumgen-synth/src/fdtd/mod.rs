//! Finite-difference time-domain integration of the 2D wave equation.
//!
//! The scheme is the explicit leapfrog 5-point stencil over a padded square
//! grid, with Dirichlet boundaries imposed by a boolean mask: cells outside
//! the mask are simply never written. Integration coefficients derive once
//! from the physical parameters; the Courant bound lambda <= 1/sqrt(2) is
//! asserted at that point and treated as a configuration error, never a
//! runtime condition.

mod stencil;

use drumgen_geometry::BoundaryMask;
use drumgen_spec::{FdtdParams, StencilBackend};

use crate::error::{SynthError, SynthResult};
use crate::fdtd::stencil::{kernel_for, StencilKernel, StencilPass};

/// Smallest grid the integrator accepts; anything coarser cannot hold a
/// drum shape and a strike.
const MIN_RESOLUTION: usize = 4;

/// Integration coefficients derived from physical material parameters.
///
/// All of the quantities the update loop needs, computed once:
///
/// ```text
/// c      = sqrt(tension / density)
/// gamma  = c / L
/// H      = floor((1 / sqrt(2)) / (gamma * k))
/// h      = 1 / H
/// lambda = gamma * k / h
/// s0     = lambda^2
/// s1     = 2 - 4 * lambda^2
/// d      = (1 - (6 ln10 / t60) k) / (1 + (6 ln10 / t60) k)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdtdCoefficients {
    /// Wavespeed c in m/s.
    pub wavespeed: f64,
    /// Scaled wavespeed gamma = c / L in 1/s.
    pub gamma: f64,
    /// Grid resolution H across each dimension of the unit domain.
    pub resolution: usize,
    /// Grid step h = 1 / H.
    pub grid_step: f64,
    /// Courant number lambda = gamma * k / h.
    pub courant: f64,
    /// First stencil coefficient, lambda^2.
    pub s0: f64,
    /// Second stencil coefficient, 2 - 4 lambda^2.
    pub s1: f64,
    /// Per-step decay coefficient d.
    pub decay: f64,
    /// Sample length k = 1 / sample_rate in seconds.
    pub sample_length: f64,
}

impl FdtdCoefficients {
    /// Derives the coefficients from physical parameters.
    ///
    /// Fails when the parameters imply a grid too coarse to simulate or a
    /// Courant number above the 2D stability bound; both are configuration
    /// bugs and fatal to the sampler.
    pub fn derive(params: &FdtdParams, sample_rate: u32) -> SynthResult<Self> {
        let k = 1.0 / sample_rate as f64;
        let wavespeed = (params.tension / params.material_density).sqrt();
        let gamma = wavespeed / params.drum_size;
        let resolution = (std::f64::consts::FRAC_1_SQRT_2 / (gamma * k)).floor() as usize;
        if resolution < MIN_RESOLUTION {
            return Err(SynthError::GridTooCoarse { resolution });
        }
        let grid_step = 1.0 / resolution as f64;
        let courant = gamma * k / grid_step;
        if courant > std::f64::consts::FRAC_1_SQRT_2 + 1e-12 {
            return Err(SynthError::CourantViolation { courant });
        }
        Ok(Self {
            wavespeed,
            gamma,
            resolution,
            grid_step,
            courant,
            s0: courant * courant,
            s1: 2.0 - 4.0 * courant * courant,
            decay: decay_coefficient(params.decay_time, k),
            sample_length: k,
        })
    }
}

/// Per-step decay coefficient from a T60 decay time.
///
/// An infinite decay time maps deterministically to 1.0 (no decay); the
/// infinity never enters the arithmetic.
pub fn decay_coefficient(decay_time: f64, sample_length: f64) -> f64 {
    if !decay_time.is_finite() {
        return 1.0;
    }
    let sigma = 6.0 * std::f64::consts::LN_10 / decay_time;
    (1.0 - sigma * sample_length) / (1.0 + sigma * sample_length)
}

/// Double-buffered FDTD state over a masked grid.
///
/// Buffers are (H+2)^2, padded by one cell on every side so the stencil
/// needs no bounds checks. Three buffers rotate across steps; nothing is
/// reallocated inside the loop.
pub struct FdtdSimulation {
    resolution: usize,
    stride: usize,
    mask: Vec<bool>,
    pass: StencilPass,
    kernel: Box<dyn StencilKernel>,
    u_prev2: Vec<f64>,
    u_prev: Vec<f64>,
    u_next: Vec<f64>,
}

impl FdtdSimulation {
    /// Builds a simulation over `mask` with the given stencil coefficients.
    pub fn new(
        mask: &BoundaryMask,
        s0: f64,
        s1: f64,
        decay: f64,
        backend: StencilBackend,
    ) -> Self {
        let resolution = mask.resolution();
        let stride = resolution + 2;

        let mut padded = vec![false; stride * stride];
        for x in 0..resolution {
            for y in 0..resolution {
                padded[(x + 1) * stride + y + 1] = mask.get(x, y);
            }
        }

        // Restrict the sweep to the mask's bounding box; an empty mask gets
        // a degenerate range that updates nothing.
        let (x_range, y_range) = match mask.bounding_box() {
            Some(((x0, x1), (y0, y1))) => ((x0 + 1, x1 + 1), (y0 + 1, y1 + 1)),
            None => ((1, 0), (1, 0)),
        };

        Self {
            resolution,
            stride,
            mask: padded,
            pass: StencilPass {
                s0,
                s1,
                decay,
                stride,
                x_range,
                y_range,
            },
            kernel: kernel_for(backend),
            u_prev2: vec![0.0; stride * stride],
            u_prev: vec![0.0; stride * stride],
            u_next: vec![0.0; stride * stride],
        }
    }

    /// Grid resolution H.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Applies an excitation as the t = 0 state.
    ///
    /// `pulse` is an unpadded H x H grid indexed `[x * H + y]`. The t = -1
    /// buffer is zeroed; cells outside the mask are dropped so the boundary
    /// condition holds from the first step.
    pub fn strike(&mut self, pulse: &[f64]) {
        debug_assert_eq!(pulse.len(), self.resolution * self.resolution);
        self.u_prev2.fill(0.0);
        self.u_next.fill(0.0);
        self.u_prev.fill(0.0);
        for x in 0..self.resolution {
            for y in 0..self.resolution {
                let padded = (x + 1) * self.stride + y + 1;
                if self.mask[padded] {
                    self.u_prev[padded] = pulse[x * self.resolution + y];
                }
            }
        }
    }

    /// The current padded grid state.
    pub fn state(&self) -> &[f64] {
        &self.u_prev
    }

    /// Value of the current state at the unpadded cell `(x, y)`.
    pub fn sample_at(&self, cell: (usize, usize)) -> f64 {
        self.u_prev[(cell.0 + 1) * self.stride + cell.1 + 1]
    }

    /// Advances the simulation by one step.
    pub fn step(&mut self) {
        self.kernel.step(
            &mut self.u_next,
            &self.u_prev,
            &self.u_prev2,
            &self.mask,
            &self.pass,
        );
        // Rotate (prev2, prev, next) <- (prev, next, prev2). The retired
        // buffer becomes the next write target; its masked cells are all
        // overwritten, its unmasked cells are zero forever.
        std::mem::swap(&mut self.u_prev2, &mut self.u_prev);
        std::mem::swap(&mut self.u_prev, &mut self.u_next);
    }

    /// Runs `num_samples` steps, recording the waveform at `listen`.
    ///
    /// Sample 0 is the excitation itself. Divergence is detected after the
    /// run: the first non-finite sample fails the generation.
    pub fn run(&mut self, num_samples: usize, listen: (usize, usize)) -> SynthResult<Vec<f64>> {
        let mut waveform = vec![0.0; num_samples];
        if num_samples == 0 {
            return Ok(waveform);
        }
        waveform[0] = self.sample_at(listen);
        for sample in &mut waveform[1..] {
            self.step();
            *sample = self.sample_at(listen);
        }
        if let Some(sample) = waveform.iter().position(|v| !v.is_finite()) {
            return Err(SynthError::Divergence { sample });
        }
        Ok(waveform)
    }

    /// Iterates over full padded grid states, stepping once per item.
    ///
    /// Intended for inspection and tests; the waveform path does not pay
    /// for the per-step copies this makes.
    pub fn states(&mut self, steps: usize) -> GridStates<'_> {
        GridStates {
            sim: self,
            remaining: steps,
        }
    }
}

/// Iterator over successive grid states of a running simulation.
pub struct GridStates<'a> {
    sim: &'a mut FdtdSimulation,
    remaining: usize,
}

impl Iterator for GridStates<'_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.sim.step();
        Some(self.sim.state().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use drumgen_geometry::{Point, Polygon};

    use super::*;
    use crate::excitation::raised_cosine_2d;

    fn full_square_mask(resolution: usize) -> BoundaryMask {
        let square = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        BoundaryMask::render(&square, resolution).unwrap()
    }

    #[test]
    fn test_coefficients_satisfy_courant_bound() {
        for drum_size in [0.9, 0.5, 0.3, 0.1] {
            for tension in [3000.0, 2000.0, 1000.0] {
                let params = FdtdParams {
                    drum_size,
                    tension,
                    ..FdtdParams::default()
                };
                let coefficients = FdtdCoefficients::derive(&params, 48000).unwrap();
                assert!(coefficients.courant <= std::f64::consts::FRAC_1_SQRT_2);
                assert!(coefficients.resolution >= MIN_RESOLUTION);
                assert_abs_diff_eq!(
                    coefficients.s1,
                    2.0 - 4.0 * coefficients.courant * coefficients.courant,
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn test_too_coarse_grid_is_a_configuration_error() {
        // A tiny, stiff drum derives a handful of grid points.
        let params = FdtdParams {
            drum_size: 0.001,
            ..FdtdParams::default()
        };
        match FdtdCoefficients::derive(&params, 22050) {
            Err(SynthError::GridTooCoarse { .. }) => {}
            other => panic!("expected GridTooCoarse, got {other:?}"),
        }
    }

    #[test]
    fn test_infinite_decay_time_maps_to_unity() {
        assert_eq!(decay_coefficient(f64::INFINITY, 1.0 / 48000.0), 1.0);
        // Finite decay times sit strictly below 1.
        assert!(decay_coefficient(1.0, 1.0 / 48000.0) < 1.0);
        assert!(decay_coefficient(1.0, 1.0 / 48000.0) > 0.0);
    }

    #[test]
    fn test_energy_stays_bounded_at_the_stability_limit() {
        let cfl = std::f64::consts::FRAC_1_SQRT_2;
        let mask = full_square_mask(10);
        let mut sim = FdtdSimulation::new(
            &mask,
            cfl * cfl,
            2.0 * (1.0 - 2.0 * cfl * cfl),
            1.0,
            StencilBackend::Sequential,
        );
        sim.strike(&raised_cosine_2d(10, 10, (4.0, 4.0), 2.0));

        for state in sim.states(20) {
            assert!(state.iter().all(|v| v.is_finite()));
            let peak = state.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let trough = state.iter().cloned().fold(f64::INFINITY, f64::min);
            assert!(peak <= 1.0 && trough >= -1.0);
        }
    }

    #[test]
    fn test_waveform_is_bounded_and_finite() {
        let cfl = std::f64::consts::FRAC_1_SQRT_2;
        let mask = full_square_mask(16);
        let mut sim = FdtdSimulation::new(
            &mask,
            cfl * cfl,
            2.0 - 4.0 * cfl * cfl,
            1.0,
            StencilBackend::Sequential,
        );
        sim.strike(&raised_cosine_2d(16, 16, (8.0, 8.0), 3.0));
        let waveform = sim.run(200, (8, 8)).unwrap();
        assert_eq!(waveform.len(), 200);
        assert_eq!(waveform[0], 1.0);
        assert!(waveform.iter().all(|v| v.abs() <= 1.0));
    }

    #[test]
    fn test_tiled_backend_matches_sequential() {
        let cfl = 0.5;
        let mask = full_square_mask(20);
        let pulse = raised_cosine_2d(20, 20, (7.0, 11.0), 4.0);

        let mut sequential = FdtdSimulation::new(
            &mask,
            cfl * cfl,
            2.0 - 4.0 * cfl * cfl,
            0.999,
            StencilBackend::Sequential,
        );
        let mut tiled = FdtdSimulation::new(
            &mask,
            cfl * cfl,
            2.0 - 4.0 * cfl * cfl,
            0.999,
            StencilBackend::Tiled,
        );
        sequential.strike(&pulse);
        tiled.strike(&pulse);

        let a = sequential.run(300, (10, 10)).unwrap();
        let b = tiled.run(300, (10, 10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_boundary_cells_stay_at_zero() {
        let cfl = 0.5;
        // Mask a centred diamond; corners of the grid stay outside it.
        let diamond = Polygon::new(vec![
            Point::new(0.0, 0.5),
            Point::new(0.5, 1.0),
            Point::new(1.0, 0.5),
            Point::new(0.5, 0.0),
        ])
        .unwrap();
        let mask = BoundaryMask::render(&diamond, 21).unwrap();
        let mut sim = FdtdSimulation::new(
            &mask,
            cfl * cfl,
            2.0 - 4.0 * cfl * cfl,
            1.0,
            StencilBackend::Sequential,
        );
        sim.strike(&raised_cosine_2d(21, 21, (10.0, 10.0), 4.0));
        for state in sim.states(50) {
            // (0, 0) is outside the diamond; padded index (1, 1) with
            // stride 23.
            assert_eq!(state[24], 0.0);
        }
    }
}
