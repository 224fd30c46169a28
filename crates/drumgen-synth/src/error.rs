//! Error types for the synthesis backend.

use drumgen_spec::{ComponentError, SpecError};
use drumgen_geometry::GeometryError;
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while configuring or running a synthesis model.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Invalid configuration record.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Geometry generation or rasterisation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The derived Courant number violates the stability bound.
    ///
    /// This is a configuration bug, not a transient condition: the physical
    /// parameters imply an unstable integration scheme.
    #[error("courant number {courant} exceeds the 2D stability bound 1/sqrt(2)")]
    CourantViolation {
        /// The offending Courant number.
        courant: f64,
    },

    /// The physical parameters derive a grid too coarse to simulate.
    #[error("derived grid resolution {resolution} is too coarse to simulate")]
    GridTooCoarse {
        /// The derived resolution H.
        resolution: usize,
    },

    /// No acceptable drum shape was produced within the retry limit.
    #[error("no valid drum shape after {attempts} attempts")]
    ShapeRejected {
        /// Number of generation attempts.
        attempts: usize,
    },

    /// The simulation diverged: a non-finite sample appeared in the output.
    ///
    /// Detected after the run completes, never mid-loop.
    #[error("simulation diverged at sample {sample}")]
    Divergence {
        /// Index of the first non-finite sample.
        sample: usize,
    },
}

impl ComponentError for SynthError {
    fn code(&self) -> &'static str {
        match self {
            SynthError::Spec(_) => "SYNTH_001",
            SynthError::Geometry(_) => "SYNTH_002",
            SynthError::CourantViolation { .. } => "SYNTH_003",
            SynthError::GridTooCoarse { .. } => "SYNTH_004",
            SynthError::ShapeRejected { .. } => "SYNTH_005",
            SynthError::Divergence { .. } => "SYNTH_006",
        }
    }

    fn category(&self) -> &'static str {
        "synthesis"
    }
}
