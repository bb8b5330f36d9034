//! Vertex identity and classification.

use crate::LatticeValue;
use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable vertex identifier, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexId(pub u32);

impl VertexId {
    /// Index into creation-ordered storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A tagged lattice vertex.
///
/// Identity — the id, the normalized lattice coordinate, and the derived
/// display point — never changes once the vertex is created. The
/// classification fields are rewritten in place as neighboring vertices
/// refine:
///
/// - `kind`: the vertex's degree (0, 3..=6) in a diamond-kite mesh, or its
///   two-digit type code (20, 31, 32, 41, 42, 43, 50, 60; 0 for a not yet
///   classified placeholder) in a kite-fractal mesh. The kind selects the
///   topology-table row that describes the vertex's neighborhood.
/// - `k`: orientation, an index in `[0, 12)` choosing the rotated copy of
///   that row.
/// - `n`: refinement level, which scales the row's offsets.
/// - `boundary`: set for hexagonal-seed rim vertices (diamond-kite only);
///   boundary vertices keep kind 0 and take no part in subdivision.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    id: VertexId,
    coord: LatticeValue,
    point: Point2<f64>,
    /// Kind discriminant; see the type-level docs.
    pub kind: u8,
    /// Orientation index in `[0, 12)`.
    pub k: u8,
    /// Refinement level.
    pub n: u32,
    /// Seed-mesh rim marker (diamond-kite only).
    pub boundary: bool,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, coord: LatticeValue, kind: u8, k: u8, n: u32) -> Self {
        let point = coord.to_point();
        Self {
            id,
            coord,
            point,
            kind,
            k,
            n,
            boundary: false,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> VertexId {
        self.id
    }

    /// Normalized lattice coordinate; the vertex's identity key.
    #[must_use]
    pub const fn coord(&self) -> &LatticeValue {
        &self.coord
    }

    /// Display coordinate in the plane (derived, approximate).
    #[must_use]
    pub const fn point(&self) -> Point2<f64> {
        self.point
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_fields_are_derived_from_coord() {
        let coord = LatticeValue::from_ints(0, 1, 0);
        let v = Vertex::new(VertexId(3), coord.clone(), 6, 0, 0);
        assert_eq!(v.id(), VertexId(3));
        assert_eq!(*v.coord(), coord);
        assert!((v.point().x - 0.5).abs() < 1e-12);
        assert!(!v.boundary);
    }

    #[test]
    fn vertex_id_display() {
        assert_eq!(VertexId(7).to_string(), "v7");
    }
}
