//! Error types for geometry operations.

use drumgen_spec::ComponentError;
use thiserror::Error;

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while generating or processing polygons.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A polygon needs at least three vertices.
    #[error("a polygon requires at least 3 vertices, got {count}")]
    TooFewVertices {
        /// The offending vertex count.
        count: usize,
    },

    /// The polygon self-intersects.
    #[error("polygon is not simple")]
    NotSimple,

    /// Three cyclically adjacent vertices lie on one line.
    #[error("three cyclically adjacent vertices are colinear")]
    ColinearVertices,

    /// A grid resolution unusable for rasterisation.
    #[error("invalid grid resolution: {resolution}")]
    InvalidResolution {
        /// The offending resolution.
        resolution: usize,
    },

    /// Vertices passed to the rasteriser were not normalised to [0, 1].
    #[error("polygon is not normalised to the unit square")]
    NotNormalised,

    /// The 2-opt untangler did not converge.
    #[error("2-opt untangling did not converge after {passes} passes")]
    UntangleFailed {
        /// Number of passes attempted.
        passes: usize,
    },
}

impl ComponentError for GeometryError {
    fn code(&self) -> &'static str {
        match self {
            GeometryError::TooFewVertices { .. } => "GEOM_001",
            GeometryError::NotSimple => "GEOM_002",
            GeometryError::ColinearVertices => "GEOM_003",
            GeometryError::InvalidResolution { .. } => "GEOM_004",
            GeometryError::NotNormalised => "GEOM_005",
            GeometryError::UntangleFailed { .. } => "GEOM_006",
        }
    }

    fn category(&self) -> &'static str {
        "geometry"
    }
}
