//! Modal model of an equilateral triangle membrane (Lamé eigenmodes).

use rand::Rng;
use rand_pcg::Pcg32;

use drumgen_spec::{CommonParams, Labels, ModalParams};

use crate::error::SynthResult;
use crate::modal::{modal_decay, triangular_amplitudes, triangular_series, wave_equation_waveform, Mode};
use crate::rng::component_rng;
use crate::sampler::{Sampler, SAMPLES_PER_SHAPE};

/// A linear model of an equilateral triangle membrane.
///
/// Strikes are trilinear coordinates `(u, v, w)` with `u + v + w = 1`; the
/// centroid is `(1/3, 1/3, 1/3)`.
pub struct TriangularModel {
    common: CommonParams,
    params: ModalParams,
    series: Vec<Mode>,
    wavespeed: f64,
    decay: f64,
    size_rng: Pcg32,
    strike_rng: Pcg32,
    drum_size: Option<f64>,
    strike: (f64, f64, f64),
    waveform: Vec<f64>,
}

impl TriangularModel {
    /// Builds the model; the eigenvalue series is computed once here.
    pub fn new(common: CommonParams, params: ModalParams, seed: u32) -> Self {
        let waveform = vec![0.0; common.num_samples()];
        Self {
            series: triangular_series(params.modal_orders, params.modes_per_order),
            wavespeed: params.wavespeed(),
            decay: modal_decay(params.decay_time, common.sample_length()),
            size_rng: component_rng(seed, "triangular.size"),
            strike_rng: component_rng(seed, "triangular.strike"),
            drum_size: None,
            strike: (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            waveform,
            common,
            params,
        }
    }

    /// The current trilinear strike location.
    pub fn strike(&self) -> (f64, f64, f64) {
        self.strike
    }
}

impl Sampler for TriangularModel {
    fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        if index % SAMPLES_PER_SHAPE == 0 || self.drum_size.is_none() {
            self.drum_size = Some(self.size_rng.gen_range(0.1..2.0));
            self.strike = (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        } else {
            // Uniform barycentric draw, so the coordinates sum to one.
            let r1: f64 = self.strike_rng.gen();
            let r2: f64 = self.strike_rng.gen();
            let root = r1.sqrt();
            self.strike = (1.0 - root, root * (1.0 - r2), root * r2);
        }
        Ok(())
    }

    fn generate_waveform(&mut self) -> SynthResult<()> {
        let Some(drum_size) = self.drum_size else {
            return Ok(());
        };
        let gamma = self.wavespeed / drum_size;
        let frequencies: Vec<f64> = self
            .series
            .iter()
            .map(|mode| mode.eigenvalue * gamma)
            .collect();
        let (u, v, w) = self.strike;
        let amplitudes: Vec<f64> = triangular_amplitudes(u, v, w, &self.series)
            .into_iter()
            .map(|a| self.params.amplitude * a)
            .collect();
        self.waveform = wave_equation_waveform(
            &frequencies,
            &amplitudes,
            self.decay,
            self.common.sample_length(),
            self.common.num_samples(),
        );
        Ok(())
    }

    fn waveform(&self) -> &[f64] {
        &self.waveform
    }

    fn labels(&self) -> Labels {
        let mut labels = Labels::new();
        if let Some(drum_size) = self.drum_size {
            labels.insert_scalar("drum_size", drum_size);
            labels.insert(
                "strike_location",
                vec![self.strike.0, self.strike.1, self.strike.2],
            );
        }
        labels
    }
}
