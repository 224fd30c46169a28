//! Typed configuration and label records for the drum synthesis workspace.
//!
//! Configuration is explicit and fully typed: one parameter struct per
//! synthesis strategy, tagged together in [`SamplerConfig`], with documented
//! defaults and a `validate()` step that runs at construction time. Label
//! records ([`Labels`]) map shape/strike descriptors to numeric lists and
//! serialize deterministically.
//!
//! # Example
//!
//! ```
//! use drumgen_spec::{CommonParams, FdtdParams, SamplerConfig};
//!
//! let config = SamplerConfig::Fdtd {
//!     params: FdtdParams::default(),
//! };
//! config.validate().unwrap();
//!
//! let common = CommonParams::new(1.0);
//! assert_eq!(common.num_samples(), 48000);
//! ```

pub mod error;
pub mod labels;
pub mod params;

pub use error::{ComponentError, SpecError, SpecResult};
pub use labels::Labels;
pub use params::{
    CommonParams, ConcaveGenerator, FdtdParams, ModalParams, SamplerConfig, StencilBackend,
    StrikeDistribution,
};
