//! FDTD simulation of an arbitrarily shaped polygonal drum.

use rand::Rng;
use rand_pcg::Pcg32;

use drumgen_geometry::{
    generate_convex, generate_simple, generate_star, normalize, BoundaryMask, Polygon,
};
use drumgen_spec::{
    CommonParams, ConcaveGenerator, FdtdParams, Labels, StrikeDistribution,
};

use crate::error::{SynthError, SynthResult};
use crate::excitation::{raised_cosine_2d, raised_triangle_2d};
use crate::fdtd::{FdtdCoefficients, FdtdSimulation};
use crate::rng::component_rng;
use crate::sampler::{Sampler, SAMPLES_PER_SHAPE};

/// Generation attempts before a shape failure becomes an error.
const MAX_SHAPE_ATTEMPTS: usize = 64;

/// Random strike draws before falling back to a deterministic scan.
const MAX_STRIKE_DRAWS: usize = 10_000;

struct DrumShape {
    polygon: Polygon,
    mask: BoundaryMask,
}

/// A 2D simulation of an arbitrarily shaped drum, integrated with an FDTD
/// scheme over the polygon's boundary mask.
pub struct FdtdModel {
    common: CommonParams,
    params: FdtdParams,
    coefficients: FdtdCoefficients,
    shape_rng: Pcg32,
    strike_rng: Pcg32,
    shape: Option<DrumShape>,
    strike: (usize, usize),
    waveform: Vec<f64>,
}

impl FdtdModel {
    /// Builds the model, deriving all integration coefficients up front.
    pub fn new(common: CommonParams, params: FdtdParams, seed: u32) -> SynthResult<Self> {
        let coefficients = FdtdCoefficients::derive(&params, common.sample_rate)?;
        let waveform = vec![0.0; common.num_samples()];
        Ok(Self {
            common,
            params,
            coefficients,
            shape_rng: component_rng(seed, "fdtd.shape"),
            strike_rng: component_rng(seed, "fdtd.strike"),
            shape: None,
            strike: (0, 0),
            waveform,
        })
    }

    /// The derived integration coefficients.
    pub fn coefficients(&self) -> &FdtdCoefficients {
        &self.coefficients
    }

    /// The current drum outline, if a shape has been generated.
    pub fn polygon(&self) -> Option<&Polygon> {
        self.shape.as_ref().map(|shape| &shape.polygon)
    }

    /// The current strike cell.
    pub fn strike_cell(&self) -> (usize, usize) {
        self.strike
    }

    /// Draws shapes until one passes the simplicity and colinearity checks.
    ///
    /// The generators never auto-resample; rejection and retry live here so
    /// the behaviour stays deterministic and observable.
    fn random_shape(&mut self) -> SynthResult<DrumShape> {
        for _ in 0..MAX_SHAPE_ATTEMPTS {
            let n = self.shape_rng.gen_range(3..=self.params.max_vertices);
            let raw = if self.params.allow_concave && self.shape_rng.gen::<bool>() {
                match self.params.concave_generator {
                    ConcaveGenerator::Star => generate_star(n, &mut self.shape_rng)?,
                    ConcaveGenerator::TwoOpt => generate_simple(n, &mut self.shape_rng)?,
                }
            } else {
                generate_convex(n, &mut self.shape_rng)?
            };
            let polygon = normalize(&raw)?;
            if polygon.validate_shape().is_err() {
                continue;
            }
            let mask = BoundaryMask::render(&polygon, self.coefficients.resolution)?;
            if mask.count_set() == 0 {
                continue;
            }
            return Ok(DrumShape { polygon, mask });
        }
        Err(SynthError::ShapeRejected {
            attempts: MAX_SHAPE_ATTEMPTS,
        })
    }

    fn random_strike(mask: &BoundaryMask, rng: &mut Pcg32) -> (usize, usize) {
        let resolution = mask.resolution();
        for _ in 0..MAX_STRIKE_DRAWS {
            let cell = (rng.gen_range(0..resolution), rng.gen_range(0..resolution));
            if mask.get(cell.0, cell.1) {
                return cell;
            }
        }
        // The mask is non-empty by construction; scan as a last resort.
        for x in 0..resolution {
            for y in 0..resolution {
                if mask.get(x, y) {
                    return (x, y);
                }
            }
        }
        (0, 0)
    }
}

impl Sampler for FdtdModel {
    fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        let regenerate = index % SAMPLES_PER_SHAPE == 0 || self.shape.is_none();
        if regenerate {
            let shape = self.random_shape()?;
            // The first strike of each group lands on the centroid.
            self.strike = shape.mask.cell_of(shape.polygon.centroid());
            self.shape = Some(shape);
        } else if let Some(shape) = &self.shape {
            self.strike = Self::random_strike(&shape.mask, &mut self.strike_rng);
        }
        Ok(())
    }

    fn generate_waveform(&mut self) -> SynthResult<()> {
        let Some(shape) = &self.shape else {
            return Ok(());
        };
        let h = self.coefficients.resolution;
        let mu = (self.strike.0 as f64, self.strike.1 as f64);
        let mut pulse = match self.params.strike {
            StrikeDistribution::RaisedCosine { sigma } => raised_cosine_2d(h, h, mu, sigma),
            StrikeDistribution::RaisedTriangle { sigma } => raised_triangle_2d(
                h,
                h,
                mu,
                (mu.0 - sigma, mu.0 + sigma),
                (mu.1 - sigma, mu.1 + sigma),
            ),
        };
        for value in &mut pulse {
            *value *= self.params.amplitude;
        }

        let mut sim = FdtdSimulation::new(
            &shape.mask,
            self.coefficients.s0,
            self.coefficients.s1,
            self.coefficients.decay,
            self.params.backend,
        );
        sim.strike(&pulse);
        // Listen where the drum was struck.
        self.waveform = sim.run(self.common.num_samples(), self.strike)?;
        Ok(())
    }

    fn waveform(&self) -> &[f64] {
        &self.waveform
    }

    fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        if let Some(shape) = &self.shape {
            let vertices: Vec<f64> = shape
                .polygon
                .vertices()
                .iter()
                .flat_map(|v| [v.x, v.y])
                .collect();
            let scale = (self.coefficients.resolution - 1) as f64;
            labels.insert_scalar("N", shape.polygon.num_vertices() as f64);
            labels.insert("vertices", vertices);
            labels.insert(
                "strike_location",
                vec![self.strike.0 as f64 / scale, self.strike.1 as f64 / scale],
            );
        }
        labels
    }
}
