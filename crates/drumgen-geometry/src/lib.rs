//! Drum shape geometry: random simple polygons, canonical normalisation,
//! and boundary rasterisation.
//!
//! # Overview
//!
//! The crate covers the geometric half of membrane synthesis:
//!
//! - [`generate`] - random convex (Valtr), star-shaped, and general simple
//!   (2-opt) polygon generators, all threading an explicit RNG handle
//! - [`normalize`] - reduction of isometric/similar copies to one canonical
//!   representative inside the unit square
//! - [`rasterize`] - conversion of a normalised polygon into a boolean
//!   occupancy grid used as a Dirichlet boundary mask
//! - [`polygon`] - the immutable [`Polygon`] value type with area, centroid
//!   and convexity computed once at construction
//! - [`lines`] - segment predicates shared by the generators and checks
//!
//! # Determinism
//!
//! Nothing here touches a global RNG. Every generator takes `&mut Pcg32`, so
//! a seeded caller reproduces shapes exactly.

pub mod error;
pub mod generate;
pub mod lines;
pub mod normalize;
pub mod point;
pub mod polygon;
pub mod rasterize;

pub use error::{GeometryError, GeometryResult};
pub use generate::{generate_convex, generate_simple, generate_star};
pub use lines::{is_colinear, line_intersection, line_midpoint, Intersection};
pub use normalize::{is_normalized, normalize};
pub use point::Point;
pub use polygon::Polygon;
pub use rasterize::BoundaryMask;
