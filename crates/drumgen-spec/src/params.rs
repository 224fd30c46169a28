//! Typed parameter records for the sampler variants.
//!
//! Every synthesis strategy has its own configuration struct with named
//! fields and documented defaults. A [`SamplerConfig`] tags one of them
//! together with the [`CommonParams`] shared by all strategies. Validation
//! happens once, at construction time, so the synthesis code downstream can
//! assume finite, in-range values.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Parameters shared by every sampler variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonParams {
    /// Duration of the generated audio in seconds.
    pub duration_seconds: f64,
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    48000
}

impl CommonParams {
    /// Creates common parameters with the default sample rate.
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration_seconds,
            sample_rate: default_sample_rate(),
        }
    }

    /// Length of the generated waveform in samples.
    pub fn num_samples(&self) -> usize {
        (self.duration_seconds * self.sample_rate as f64).ceil() as usize
    }

    /// Sample length k = 1 / sample_rate in seconds.
    pub fn sample_length(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }

    /// Validates duration and sample rate.
    pub fn validate(&self) -> SpecResult<()> {
        match self.sample_rate {
            22050 | 44100 | 48000 => {}
            other => return Err(SpecError::InvalidSampleRate { rate: other }),
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(SpecError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        Ok(())
    }
}

/// Which generator produces concave drum shapes for the FDTD model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcaveGenerator {
    /// Scatter-and-sort star-shaped polygons. Fast, limited coverage.
    Star,
    /// 2-opt untangling of a random closed loop. Broader coverage, slower.
    TwoOpt,
}

/// The excitation distribution applied at the strike location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum StrikeDistribution {
    /// Raised cosine pulse with the given radius in grid cells.
    RaisedCosine {
        /// Radius of the pulse in grid cells.
        sigma: f64,
    },
    /// Raised triangle pulse with the given radius in grid cells.
    RaisedTriangle {
        /// Radius of the pulse in grid cells.
        sigma: f64,
    },
}

impl Default for StrikeDistribution {
    fn default() -> Self {
        StrikeDistribution::RaisedCosine { sigma: 0.5 }
    }
}

impl StrikeDistribution {
    /// Radius of the distribution in grid cells.
    pub fn sigma(&self) -> f64 {
        match self {
            StrikeDistribution::RaisedCosine { sigma } => *sigma,
            StrikeDistribution::RaisedTriangle { sigma } => *sigma,
        }
    }
}

/// Which stencil-update implementation the FDTD engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StencilBackend {
    /// Single-threaded double-buffered sweep.
    Sequential,
    /// Row-band tiles over the mask's bounding box, one rayon task per tile.
    Tiled,
}

impl Default for StencilBackend {
    fn default() -> Self {
        StencilBackend::Sequential
    }
}

/// Parameters for the arbitrary-polygon FDTD model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FdtdParams {
    /// Maximum amplitude of the simulation, in [0, 1].
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// T60 decay time in seconds. `+inf` disables decay.
    #[serde(default = "default_fdtd_decay_time")]
    pub decay_time: f64,
    /// Size of the drum, spanning both axes (m).
    #[serde(default = "default_drum_size")]
    pub drum_size: f64,
    /// Material density of the membrane (kg/m^2).
    #[serde(default = "default_fdtd_density")]
    pub material_density: f64,
    /// Maximum amount of vertices for a given drum.
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
    /// Membrane tension at rest (N/m).
    #[serde(default = "default_tension")]
    pub tension: f64,
    /// Whether concave drum shapes may be generated.
    #[serde(default)]
    pub allow_concave: bool,
    /// Generator used when a concave shape is drawn.
    #[serde(default = "default_concave_generator")]
    pub concave_generator: ConcaveGenerator,
    /// Excitation distribution applied at the strike location.
    #[serde(default)]
    pub strike: StrikeDistribution,
    /// Stencil-update implementation.
    #[serde(default)]
    pub backend: StencilBackend,
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_fdtd_decay_time() -> f64 {
    1.0
}

fn default_drum_size() -> f64 {
    0.3
}

fn default_fdtd_density() -> f64 {
    0.26
}

fn default_max_vertices() -> usize {
    10
}

fn default_tension() -> f64 {
    2000.0
}

fn default_concave_generator() -> ConcaveGenerator {
    ConcaveGenerator::Star
}

impl Default for FdtdParams {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            decay_time: default_fdtd_decay_time(),
            drum_size: default_drum_size(),
            material_density: default_fdtd_density(),
            max_vertices: default_max_vertices(),
            tension: default_tension(),
            allow_concave: false,
            concave_generator: default_concave_generator(),
            strike: StrikeDistribution::default(),
            backend: StencilBackend::default(),
        }
    }
}

impl FdtdParams {
    /// Validates the physical parameters.
    ///
    /// `decay_time` may be `+inf` (no decay), but every other field must be
    /// finite and inside its documented range.
    pub fn validate(&self) -> SpecResult<()> {
        validate_amplitude(self.amplitude)?;
        validate_decay_time(self.decay_time)?;
        validate_positive("drum_size", self.drum_size)?;
        validate_positive("material_density", self.material_density)?;
        validate_positive("tension", self.tension)?;
        if self.max_vertices < 3 {
            return Err(SpecError::invalid_param(
                "max_vertices",
                format!("must be at least 3, got {}", self.max_vertices),
            ));
        }
        if !self.strike.sigma().is_finite() || self.strike.sigma() <= 0.0 {
            return Err(SpecError::invalid_param(
                "strike.sigma",
                format!("must be a positive finite radius, got {}", self.strike.sigma()),
            ));
        }
        Ok(())
    }
}

/// Parameters shared by the closed-form modal models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalParams {
    /// Maximum amplitude of the simulation, in [0, 1].
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// T60 decay time in seconds. `+inf` disables decay.
    #[serde(default = "default_modal_decay_time")]
    pub decay_time: f64,
    /// Material density of the membrane (kg/m^2).
    #[serde(default = "default_modal_density")]
    pub material_density: f64,
    /// Membrane tension at rest (N/m).
    #[serde(default = "default_tension")]
    pub tension: f64,
    /// Number of modal orders n.
    #[serde(default = "default_modal_order")]
    pub modal_orders: usize,
    /// Number of modes m per order.
    #[serde(default = "default_modal_order")]
    pub modes_per_order: usize,
}

fn default_modal_decay_time() -> f64 {
    2.0
}

fn default_modal_density() -> f64 {
    0.2
}

fn default_modal_order() -> usize {
    10
}

impl Default for ModalParams {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            decay_time: default_modal_decay_time(),
            material_density: default_modal_density(),
            tension: default_tension(),
            modal_orders: default_modal_order(),
            modes_per_order: default_modal_order(),
        }
    }
}

impl ModalParams {
    /// Validates the physical parameters.
    pub fn validate(&self) -> SpecResult<()> {
        validate_amplitude(self.amplitude)?;
        validate_decay_time(self.decay_time)?;
        validate_positive("material_density", self.material_density)?;
        validate_positive("tension", self.tension)?;
        if self.modal_orders == 0 {
            return Err(SpecError::invalid_param("modal_orders", "must be at least 1"));
        }
        if self.modes_per_order == 0 {
            return Err(SpecError::invalid_param("modes_per_order", "must be at least 1"));
        }
        Ok(())
    }

    /// Wavespeed c = sqrt(tension / density) in m/s.
    pub fn wavespeed(&self) -> f64 {
        (self.tension / self.material_density).sqrt()
    }
}

/// Configuration record for one synthesis strategy.
///
/// The variant selects the synthesis strategy at construction; every variant
/// exposes the same generate/label contract downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case", deny_unknown_fields)]
pub enum SamplerConfig {
    /// FDTD simulation of an arbitrarily shaped polygonal drum.
    Fdtd {
        /// Physical and numerical parameters of the simulation.
        #[serde(default)]
        params: FdtdParams,
    },
    /// Modal synthesis of a circular membrane (Bessel eigenmodes).
    Circular {
        /// Physical parameters of the model.
        #[serde(default)]
        params: ModalParams,
    },
    /// Modal synthesis of a rectangular membrane.
    Rectangular {
        /// Physical parameters of the model.
        #[serde(default)]
        params: ModalParams,
        /// Fixed aspect ratio. `None` redraws it with each shape group.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aspect_ratio: Option<f64>,
    },
    /// Modal synthesis of an equilateral triangle membrane (Lamé eigenmodes).
    Triangular {
        /// Physical parameters of the model.
        #[serde(default)]
        params: ModalParams,
    },
    /// Modal synthesis of a 1D string.
    Linear1d {
        /// Physical parameters of the model. `modes_per_order` is unused.
        #[serde(default)]
        params: ModalParams,
    },
}

impl SamplerConfig {
    /// Validates the strategy-specific parameters.
    pub fn validate(&self) -> SpecResult<()> {
        match self {
            SamplerConfig::Fdtd { params } => params.validate(),
            SamplerConfig::Circular { params }
            | SamplerConfig::Triangular { params }
            | SamplerConfig::Linear1d { params } => params.validate(),
            SamplerConfig::Rectangular {
                params,
                aspect_ratio,
            } => {
                params.validate()?;
                if let Some(epsilon) = aspect_ratio {
                    if !epsilon.is_finite() || *epsilon < 1.0 {
                        return Err(SpecError::invalid_param(
                            "aspect_ratio",
                            format!("must be finite and >= 1, got {epsilon}"),
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

fn validate_amplitude(amplitude: f64) -> SpecResult<()> {
    if !amplitude.is_finite() || !(0.0..=1.0).contains(&amplitude) {
        return Err(SpecError::invalid_param(
            "amplitude",
            format!("must be within [0, 1], got {amplitude}"),
        ));
    }
    Ok(())
}

fn validate_decay_time(decay_time: f64) -> SpecResult<()> {
    // +inf is the documented no-decay case; NaN and non-positive values are not.
    if decay_time.is_nan() || decay_time <= 0.0 {
        return Err(SpecError::invalid_param(
            "decay_time",
            format!("must be positive (or +inf for no decay), got {decay_time}"),
        ));
    }
    Ok(())
}

fn validate_positive(name: &str, value: f64) -> SpecResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SpecError::invalid_param(
            name,
            format!("must be positive and finite, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_common_params_num_samples_rounds_up() {
        let common = CommonParams {
            duration_seconds: 1.0,
            sample_rate: 44100,
        };
        assert_eq!(common.num_samples(), 44100);

        let common = CommonParams {
            duration_seconds: 0.0001,
            sample_rate: 44100,
        };
        // 4.41 samples rounds up to 5.
        assert_eq!(common.num_samples(), 5);
    }

    #[test]
    fn test_common_params_rejects_bad_rates() {
        let common = CommonParams {
            duration_seconds: 1.0,
            sample_rate: 44101,
        };
        assert!(common.validate().is_err());
    }

    #[test]
    fn test_fdtd_defaults_are_valid() {
        assert!(FdtdParams::default().validate().is_ok());
        assert!(ModalParams::default().validate().is_ok());
    }

    #[test]
    fn test_infinite_decay_time_is_accepted() {
        let params = FdtdParams {
            decay_time: f64::INFINITY,
            ..FdtdParams::default()
        };
        assert!(params.validate().is_ok());

        let params = FdtdParams {
            decay_time: f64::NAN,
            ..FdtdParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_max_vertices_lower_bound() {
        let params = FdtdParams {
            max_vertices: 2,
            ..FdtdParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SamplerConfig::Rectangular {
            params: ModalParams::default(),
            aspect_ratio: Some(1.5),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SamplerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let json = r#"{"model": "fdtd", "params": {"amplitude": 0.5, "bogus": 1}}"#;
        assert!(serde_json::from_str::<SamplerConfig>(json).is_err());
    }

    #[test]
    fn test_aspect_ratio_bounds() {
        let config = SamplerConfig::Rectangular {
            params: ModalParams::default(),
            aspect_ratio: Some(0.5),
        };
        assert!(config.validate().is_err());
    }
}
