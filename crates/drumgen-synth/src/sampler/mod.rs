//! Sampler variants: one per synthesis strategy, sharing a single
//! generate/label contract.
//!
//! The intended use inside a generation loop:
//!
//! ```
//! use drumgen_spec::{CommonParams, ModalParams, SamplerConfig};
//! use drumgen_synth::sampler::DrumSampler;
//!
//! let config = SamplerConfig::Circular {
//!     params: ModalParams::default(),
//! };
//! let mut sampler = DrumSampler::from_config(CommonParams::new(0.05), config, 42).unwrap();
//! for index in 0..3 {
//!     let result = sampler.render_sample(index).unwrap();
//!     assert_eq!(result.samples.len(), 2400);
//!     assert!(!result.labels.is_empty());
//! }
//! ```
//!
//! Shape state (polygon, eigen-series scale) refreshes every
//! [`SAMPLES_PER_SHAPE`] samples; the strike refreshes every sample, and the
//! first strike of each group lands on the shape's centroid.

mod circular_model;
mod fdtd_model;
mod linear_model;
mod rectangular_model;
mod triangular_model;

pub use circular_model::CircularModel;
pub use fdtd_model::FdtdModel;
pub use linear_model::LinearModel;
pub use rectangular_model::RectangularModel;
pub use triangular_model::TriangularModel;

use drumgen_spec::{CommonParams, Labels, SamplerConfig};

use crate::error::{SynthError, SynthResult};

/// How many samples share one shape/eigen-series instance.
pub const SAMPLES_PER_SHAPE: usize = 5;

/// The capability contract every sampler variant implements.
pub trait Sampler {
    /// Refreshes shape and strike state for sample `index` of the loop.
    ///
    /// Shape state regenerates when `index % SAMPLES_PER_SHAPE == 0` (and on
    /// the first call); the strike regenerates every time, starting each
    /// group at the centroid.
    fn update_properties(&mut self, index: usize) -> SynthResult<()>;

    /// Renders the waveform for the current properties.
    fn generate_waveform(&mut self) -> SynthResult<()>;

    /// The most recently generated waveform.
    fn waveform(&self) -> &[f64];

    /// Shape and strike descriptors for the current properties.
    ///
    /// Empty until [`Sampler::update_properties`] has run.
    fn labels(&self) -> Labels;
}

/// One generated sample: the waveform and its label record.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformResult {
    /// Audio samples, `ceil(duration * sample_rate)` of them.
    pub samples: Vec<f64>,
    /// Shape/strike descriptors.
    pub labels: Labels,
}

/// A sampler variant, selected at construction from its configuration
/// record.
pub enum DrumSampler {
    /// FDTD simulation of an arbitrary polygonal drum.
    Fdtd(FdtdModel),
    /// Modal circular membrane.
    Circular(CircularModel),
    /// Modal rectangular membrane.
    Rectangular(RectangularModel),
    /// Modal equilateral triangle membrane.
    Triangular(TriangularModel),
    /// Modal 1D string.
    Linear1d(LinearModel),
}

impl DrumSampler {
    /// Builds the sampler for a configuration record.
    ///
    /// Validation happens here; synthesis assumes clean parameters.
    pub fn from_config(
        common: CommonParams,
        config: SamplerConfig,
        seed: u32,
    ) -> SynthResult<Self> {
        common.validate().map_err(SynthError::from)?;
        config.validate().map_err(SynthError::from)?;
        Ok(match config {
            SamplerConfig::Fdtd { params } => {
                DrumSampler::Fdtd(FdtdModel::new(common, params, seed)?)
            }
            SamplerConfig::Circular { params } => {
                DrumSampler::Circular(CircularModel::new(common, params, seed))
            }
            SamplerConfig::Rectangular {
                params,
                aspect_ratio,
            } => DrumSampler::Rectangular(RectangularModel::new(common, params, aspect_ratio, seed)),
            SamplerConfig::Triangular { params } => {
                DrumSampler::Triangular(TriangularModel::new(common, params, seed))
            }
            SamplerConfig::Linear1d { params } => {
                DrumSampler::Linear1d(LinearModel::new(common, params, seed))
            }
        })
    }

    fn inner(&self) -> &dyn Sampler {
        match self {
            DrumSampler::Fdtd(model) => model,
            DrumSampler::Circular(model) => model,
            DrumSampler::Rectangular(model) => model,
            DrumSampler::Triangular(model) => model,
            DrumSampler::Linear1d(model) => model,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Sampler {
        match self {
            DrumSampler::Fdtd(model) => model,
            DrumSampler::Circular(model) => model,
            DrumSampler::Rectangular(model) => model,
            DrumSampler::Triangular(model) => model,
            DrumSampler::Linear1d(model) => model,
        }
    }

    /// See [`Sampler::update_properties`].
    pub fn update_properties(&mut self, index: usize) -> SynthResult<()> {
        self.inner_mut().update_properties(index)
    }

    /// See [`Sampler::generate_waveform`].
    pub fn generate_waveform(&mut self) -> SynthResult<()> {
        self.inner_mut().generate_waveform()
    }

    /// See [`Sampler::waveform`].
    pub fn waveform(&self) -> &[f64] {
        self.inner().waveform()
    }

    /// See [`Sampler::labels`].
    pub fn labels(&self) -> Labels {
        self.inner().labels()
    }

    /// Updates properties for `index`, renders, and returns the waveform
    /// with its labels. Divergence surfaces as a failed generation.
    pub fn render_sample(&mut self, index: usize) -> SynthResult<WaveformResult> {
        self.update_properties(index)?;
        self.generate_waveform()?;
        Ok(WaveformResult {
            samples: self.waveform().to_vec(),
            labels: self.labels(),
        })
    }
}
