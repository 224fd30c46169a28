//! Modal model of a rectangular membrane.

use rand::Rng;
use rand_pcg::Pcg32;

use drumgen_spec::{CommonParams, Labels, ModalParams};

use crate::error::SynthResult;
use crate::modal::{modal_decay, rectangular_amplitudes, rectangular_series, wave_equation_waveform, Mode};
use crate::rng::component_rng;
use crate::sampler::{Sampler, SAMPLES_PER_SHAPE};

/// A linear model of a unit-area rectangle with aspect ratio epsilon.
///
/// The eigenvalue series depends on the aspect ratio, so it is recomputed
/// with each shape group rather than once at construction.
pub struct RectangularModel {
    common: CommonParams,
    params: ModalParams,
    fixed_aspect_ratio: Option<f64>,
    wavespeed: f64,
    decay: f64,
    size_rng: Pcg32,
    strike_rng: Pcg32,
    shape: Option<RectangleShape>,
    strike: (f64, f64),
    waveform: Vec<f64>,
}

struct RectangleShape {
    drum_size: f64,
    epsilon: f64,
    series: Vec<Mode>,
}

impl RectangularModel {
    /// Builds the model. A `Some` aspect ratio pins the rectangle; `None`
    /// redraws it with each shape group.
    pub fn new(
        common: CommonParams,
        params: ModalParams,
        aspect_ratio: Option<f64>,
        seed: u32,
    ) -> Self {
        let waveform = vec![0.0; common.num_samples()];
        Self {
            fixed_aspect_ratio: aspect_ratio,
            wavespeed: params.wavespeed(),
            decay: modal_decay(params.decay_time, common.sample_length()),
            size_rng: component_rng(seed, "rectangular.size"),
            strike_rng: component_rng(seed, "rectangular.strike"),
            shape: None,
            strike: (0.5, 0.5),
            waveform,
            common,
            params,
        }
    }

    /// The current aspect ratio, if a shape has been drawn.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.shape.as_ref().map(|shape| shape.epsilon)
    }
}

impl Sampler for RectangularModel {
    fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        if index % SAMPLES_PER_SHAPE == 0 || self.shape.is_none() {
            let epsilon = self
                .fixed_aspect_ratio
                .unwrap_or_else(|| self.size_rng.gen_range(1.0..4.0));
            let drum_size = self.size_rng.gen_range(0.1..2.0);
            self.shape = Some(RectangleShape {
                drum_size,
                epsilon,
                series: rectangular_series(
                    self.params.modal_orders,
                    self.params.modes_per_order,
                    epsilon,
                ),
            });
            // Centre strike to start the group.
            self.strike = (0.5, 0.5);
        } else {
            self.strike = (
                self.strike_rng.gen_range(0.0..1.0),
                self.strike_rng.gen_range(0.0..1.0),
            );
        }
        Ok(())
    }

    fn generate_waveform(&mut self) -> SynthResult<()> {
        let Some(shape) = &self.shape else {
            return Ok(());
        };
        let gamma = self.wavespeed / shape.drum_size;
        let frequencies: Vec<f64> = shape
            .series
            .iter()
            .map(|mode| mode.eigenvalue * gamma)
            .collect();
        // Scale the unit-square strike onto the epsilon-stretched membrane.
        let root = shape.epsilon.sqrt();
        let scaled = (self.strike.0 * root, self.strike.1 / root);
        let amplitudes: Vec<f64> = rectangular_amplitudes(scaled, shape.epsilon, &shape.series)
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
        if let Some(shape) = &self.shape {
            labels.insert_scalar("aspect_ratio", shape.epsilon);
            labels.insert_scalar("drum_size", shape.drum_size);
            labels.insert("strike_location", vec![self.strike.0, self.strike.1]);
        }
        labels
    }
}
