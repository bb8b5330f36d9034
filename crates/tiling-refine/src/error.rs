//! Error types for refinement operations.
//!
//! Every variant is an invariant violation, not a recoverable condition: a
//! half-refined mesh is not valid output, so callers propagate and abort
//! the construction run.

use thiserror::Error;
use tiling_types::VertexId;

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;

/// Errors raised by the subdivision engines and drivers.
#[derive(Debug, Error)]
pub enum RefineError {
    /// Subdivision was invoked on a vertex whose kind has no transition.
    #[error("vertex {id} has kind {kind}, which cannot be subdivided")]
    InvalidSubdivisionTarget {
        /// The offending vertex.
        id: VertexId,
        /// Its kind at the time of the attempt.
        kind: u8,
    },

    /// A structural lookup expected an already-created neighbor.
    ///
    /// Stars of placed vertices always resolve in a consistent mesh; a
    /// miss means the topology invariant was broken upstream.
    #[error("neighbor {index} of vertex {id} has not been created")]
    MissingAdjacency {
        /// Vertex whose neighborhood was being resolved.
        id: VertexId,
        /// Local neighbor index within the offset row.
        index: usize,
    },

    /// A create-new neighbor operation found the target site occupied.
    ///
    /// Signals inconsistent offset tables or seed data, not a user error.
    #[error("new neighbor {index} of vertex {id} is already occupied")]
    UnexpectedExistingVertex {
        /// Vertex being given a fresh star.
        id: VertexId,
        /// Local neighbor index within the offset row.
        index: usize,
    },
}
