//! Modal model of a circular membrane using Bessel eigenmodes.

use rand::Rng;
use rand_pcg::Pcg32;

use drumgen_spec::{CommonParams, Labels, ModalParams};

use crate::error::SynthResult;
use crate::modal::{circular_amplitudes, circular_series, modal_decay, wave_equation_waveform, Mode};
use crate::rng::component_rng;
use crate::sampler::{Sampler, SAMPLES_PER_SHAPE};

/// A linear model of a circular membrane; eigenvalues are the zeros of the
/// Bessel functions of the first kind.
pub struct CircularModel {
    common: CommonParams,
    params: ModalParams,
    series: Vec<Mode>,
    wavespeed: f64,
    decay: f64,
    size_rng: Pcg32,
    strike_rng: Pcg32,
    drum_size: Option<f64>,
    strike: (f64, f64),
    waveform: Vec<f64>,
}

impl CircularModel {
    /// Builds the model; the eigenvalue series is computed once here and
    /// reused across the strike sweep.
    pub fn new(common: CommonParams, params: ModalParams, seed: u32) -> Self {
        let waveform = vec![0.0; common.num_samples()];
        Self {
            series: circular_series(params.modal_orders, params.modes_per_order),
            wavespeed: params.wavespeed(),
            decay: modal_decay(params.decay_time, common.sample_length()),
            size_rng: component_rng(seed, "circular.size"),
            strike_rng: component_rng(seed, "circular.strike"),
            drum_size: None,
            strike: (0.0, 0.0),
            waveform,
            common,
            params,
        }
    }

    /// The current drum diameter, if one has been drawn.
    pub fn drum_size(&self) -> Option<f64> {
        self.drum_size
    }
}

impl Sampler for CircularModel {
    fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        if index % SAMPLES_PER_SHAPE == 0 || self.drum_size.is_none() {
            self.drum_size = Some(self.size_rng.gen_range(0.1..2.0));
            // Centre strike: the polar origin.
            self.strike = (0.0, 0.0);
        } else {
            self.strike = (
                self.strike_rng.gen_range(-1.0..1.0),
                self.strike_rng.gen_range(0.0..std::f64::consts::PI),
            );
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
        let amplitudes: Vec<f64> =
            circular_amplitudes(self.strike.0, self.strike.1, &self.series)
                .into_iter()
                .map(|a| self.params.amplitude * a.abs())
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
            labels.insert("strike_location", vec![self.strike.0, self.strike.1]);
        }
        labels
    }
}
