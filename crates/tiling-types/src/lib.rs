//! Core types for adaptive quadrilateral tilings on a hexagonal lattice.
//!
//! This crate provides the exact-arithmetic foundation shared by the
//! diamond-kite and kite-fractal refinement engines:
//!
//! - [`LatticeValue`] - exact 3-adic lattice coordinate `(a + b·ω)/3^m`
//! - [`directions`] - the twelve basic offset vectors
//! - [`Vertex`] / [`VertexRegistry`] - deduplicating vertex store with
//!   stable ids
//! - [`Face`] / [`Edge`] / [`QuadMesh`] - canonical derived topology
//!
//! No mesh graph is stored: a vertex's neighborhood is recomputed from its
//! `(kind, orientation)` tag and the offset tables in `tiling-refine`,
//! which is what keeps a subdivision step local to a handful of records.
//!
//! # Exactness
//!
//! All lattice coordinates use arbitrary-precision numerators. The `f64`
//! plane embedding ([`LatticeValue::to_point`]) exists for display and
//! scalar-field evaluation; equality, hashing, and every topology decision
//! go through the exact triples.
//!
//! # Example
//!
//! ```
//! use tiling_types::{directions, LatticeValue, VertexRegistry};
//!
//! let mut registry = VertexRegistry::new();
//! let (center, _) = registry.insert(LatticeValue::zero(), 6, 0, 0);
//!
//! // place the six even-direction neighbors
//! for i in (0..12).step_by(2) {
//!     let coord = LatticeValue::zero().offset(&directions()[i], 0);
//!     registry.insert(coord, 3, 0, 0);
//! }
//! assert_eq!(registry.len(), 7);
//! assert_eq!(registry[center].kind, 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod direction;
mod face;
mod lattice;
mod registry;
mod vertex;

pub use direction::{directions, rotate_row};
pub use face::{Edge, Face, QuadMesh};
pub use lattice::LatticeValue;
pub use registry::VertexRegistry;
pub use vertex::{Vertex, VertexId};

// Re-export the display-point type for convenience
pub use nalgebra::Point2;
