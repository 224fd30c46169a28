//! Modal model of a 1D string.

use rand::Rng;
use rand_pcg::Pcg32;

use drumgen_spec::{CommonParams, Labels, ModalParams};

use crate::error::SynthResult;
use crate::modal::{linear_amplitudes, linear_series, modal_decay, wave_equation_waveform, Mode};
use crate::rng::component_rng;
use crate::sampler::{Sampler, SAMPLES_PER_SHAPE};

/// A linear model of a string or vibrating air column.
///
/// The 1D counterpart of the membrane models: harmonic eigenvalues and a
/// single normalised strike coordinate.
pub struct LinearModel {
    common: CommonParams,
    params: ModalParams,
    series: Vec<Mode>,
    wavespeed: f64,
    decay: f64,
    size_rng: Pcg32,
    strike_rng: Pcg32,
    size: Option<f64>,
    strike: f64,
    waveform: Vec<f64>,
}

impl LinearModel {
    /// Builds the model; `modes_per_order` is unused in one dimension.
    pub fn new(common: CommonParams, params: ModalParams, seed: u32) -> Self {
        let waveform = vec![0.0; common.num_samples()];
        Self {
            series: linear_series(params.modal_orders),
            wavespeed: params.wavespeed(),
            decay: modal_decay(params.decay_time, common.sample_length()),
            size_rng: component_rng(seed, "linear.size"),
            strike_rng: component_rng(seed, "linear.strike"),
            size: None,
            strike: 0.5,
            waveform,
            common,
            params,
        }
    }
}

impl Sampler for LinearModel {
    fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        if index % SAMPLES_PER_SHAPE == 0 || self.size.is_none() {
            self.size = Some(self.size_rng.gen_range(0.1..2.0));
            self.strike = 0.5;
        } else {
            self.strike = self.strike_rng.gen_range(0.0..1.0);
        }
        Ok(())
    }

    fn generate_waveform(&mut self) -> SynthResult<()> {
        let Some(size) = self.size else {
            return Ok(());
        };
        let gamma = self.wavespeed / size;
        let frequencies: Vec<f64> = self
            .series
            .iter()
            .map(|mode| mode.eigenvalue * gamma)
            .collect();
        let amplitudes: Vec<f64> = linear_amplitudes(self.strike, &self.series)
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
        if let Some(size) = self.size {
            labels.insert_scalar("size", size);
            labels.insert("strike_location", vec![self.strike]);
        }
        labels
    }
}
