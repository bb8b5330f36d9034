//! Mesh snapshot I/O for adaptive quadrilateral tilings.
//!
//! A snapshot is the persisted form of a vertex registry: a small text
//! table of exact lattice triples and classification tags, one vertex per
//! line. Because the mesh is vertex-centric, the snapshot is the whole
//! mesh — faces and edges are rederived after loading.
//!
//! # Example
//!
//! ```no_run
//! use tiling_io::{load_diamond_snapshot, save_snapshot};
//!
//! let mesh = load_diamond_snapshot("mesh.csv").unwrap();
//! save_snapshot(mesh.vertices(), "copy.csv").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
pub use snapshot::{
    load_diamond_snapshot, load_kite_snapshot, read_diamond, read_kite, read_snapshot,
    save_snapshot, write_snapshot, SnapshotRecord,
};
