//! Adaptive refinement engines for diamond-kite and kite-fractal tilings.
//!
//! This crate holds the topology tables and the two subdivision state
//! machines that grow a tiling from a seed mesh:
//!
//! - [`DiamondMesh`] - diamond-kite tilings; degree-tagged vertices, a
//!   prerequisite-ordered queue driver, and pluggable
//!   [`RefinePredicate`]s deciding where to refine
//! - [`KiteMesh`] - kite-fractal tilings; type-code-tagged vertices
//!   refined in whole rounds
//!
//! Both engines are purely vertex-centric: no mesh graph exists during
//! refinement, and a subdivision step rewrites at most a handful of
//! vertex records. The quadrilateral faces and edges are reconstructed
//! afterwards from the final registry ([`DiamondMesh::reconstruct`],
//! [`KiteMesh::reconstruct`]).
//!
//! # Example
//!
//! ```
//! use tiling_refine::{hex_base_mesh, UniformDepth};
//!
//! let mut mesh = hex_base_mesh(2);
//! let report = mesh.refine(&mut UniformDepth::new(1), 1)?;
//! assert!(report.subdivisions > 0);
//!
//! let quads = mesh.reconstruct()?;
//! assert!(quads.face_count() > 0);
//! # Ok::<(), tiling_refine::RefineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod diamond;
mod error;
mod kite;
mod predicate;
mod reconstruct;
mod tables;

pub use diamond::{hex_base_mesh, DiamondMesh, RefineReport};
pub use error::{RefineError, RefineResult};
pub use kite::{kite_base_mesh, KiteMesh};
pub use predicate::{taubin_field, CurveCrossing, RandomDepth, RefinePredicate, UniformDepth};
pub use tables::{
    diamond_tables, kite_degree, kite_tables, DiamondTables, KiteTables, OrientedOffsets,
    KITE_KINDS,
};
