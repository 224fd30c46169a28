//! Physically-based drum synthesis.
//!
//! This crate renders audio waveforms for two-dimensional vibrating
//! membranes with two interchangeable strategies sharing one physical
//! parameterisation:
//!
//! - **FDTD** ([`fdtd`]) - explicit finite-difference integration of the 2D
//!   wave equation over an arbitrary polygonal boundary mask.
//! - **Modal** ([`modal`]) - closed-form eigenmode sums for canonical
//!   shapes: circle (Bessel), rectangle, equilateral triangle (Lamé), and a
//!   1D string.
//!
//! The [`sampler`] module orchestrates both behind a single generate/label
//! contract: every variant produces a fixed-length waveform plus a label
//! record describing shape and strike.
//!
//! # Determinism
//!
//! All synthesis is deterministic. Given the same configuration and seed,
//! the output waveform and labels are identical across runs. Randomness
//! flows through PCG32 streams derived per component with BLAKE3 (see
//! [`rng`]), so shape and strike sweeps never perturb one another.
//!
//! # Example
//!
//! ```
//! use drumgen_spec::{CommonParams, ModalParams, SamplerConfig};
//! use drumgen_synth::sampler::DrumSampler;
//!
//! let config = SamplerConfig::Triangular {
//!     params: ModalParams::default(),
//! };
//! let mut sampler = DrumSampler::from_config(CommonParams::new(0.1), config, 7).unwrap();
//! let sample = sampler.render_sample(0).unwrap();
//! assert_eq!(sample.samples.len(), 4800);
//! ```

pub mod error;
pub mod excitation;
pub mod fdtd;
pub mod modal;
pub mod rng;
pub mod sampler;

pub use error::{SynthError, SynthResult};
pub use fdtd::{decay_coefficient, FdtdCoefficients, FdtdSimulation};
pub use sampler::{DrumSampler, Sampler, WaveformResult, SAMPLES_PER_SHAPE};
