//! Canonical faces and edges.
//!
//! Faces and edges are derived data: after refinement finishes they are
//! recomputed wholesale from the vertex registry, deduplicated, and then
//! read only. Canonical forms make the deduplication order-independent.

use crate::VertexId;
use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quadrilateral face as a canonical 4-tuple of vertex ids.
///
/// The tuple is rotated so the minimum id comes first; all four cyclic
/// rotations of the same quad canonicalize to the same value.
///
/// # Example
///
/// ```
/// use tiling_types::{Face, VertexId};
///
/// let a = Face::new([VertexId(7), VertexId(2), VertexId(9), VertexId(4)]);
/// let b = Face::new([VertexId(9), VertexId(4), VertexId(7), VertexId(2)]);
/// assert_eq!(a, b);
/// assert_eq!(a.ids()[0], VertexId(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face([VertexId; 4]);

impl Face {
    /// Canonicalize a quad by rotating its minimum id to the front.
    #[must_use]
    pub fn new(ids: [VertexId; 4]) -> Self {
        let mut j = 0;
        for (i, id) in ids.iter().enumerate() {
            if *id < ids[j] {
                j = i;
            }
        }
        Self([ids[j], ids[(j + 1) % 4], ids[(j + 2) % 4], ids[(j + 3) % 4]])
    }

    /// The four vertex ids in canonical cyclic order.
    #[must_use]
    pub const fn ids(&self) -> &[VertexId; 4] {
        &self.0
    }
}

/// An undirected edge as a canonical id pair, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge(VertexId, VertexId);

impl Edge {
    /// Canonicalize an id pair.
    #[must_use]
    pub fn new(v1: VertexId, v2: VertexId) -> Self {
        if v1 <= v2 {
            Self(v1, v2)
        } else {
            Self(v2, v1)
        }
    }

    /// Both endpoints, smaller id first.
    #[must_use]
    pub const fn ids(&self) -> (VertexId, VertexId) {
        (self.0, self.1)
    }
}

/// Deduplicated face and edge sets of a reconstructed mesh.
///
/// Insertion order is preserved for deterministic output; duplicates are
/// dropped. Inserting a face also inserts its four boundary edges.
#[derive(Debug, Clone, Default)]
pub struct QuadMesh {
    faces: Vec<Face>,
    edges: Vec<Edge>,
    seen_faces: HashSet<Face>,
    seen_edges: HashSet<Edge>,
}

impl QuadMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quad; returns `false` if it was already present.
    pub fn insert_face(&mut self, ids: [VertexId; 4]) -> bool {
        let face = Face::new(ids);
        if !self.seen_faces.insert(face) {
            return false;
        }
        let [a, b, c, d] = *face.ids();
        self.faces.push(face);
        self.insert_edge(a, b);
        self.insert_edge(b, c);
        self.insert_edge(c, d);
        self.insert_edge(d, a);
        true
    }

    fn insert_edge(&mut self, v1: VertexId, v2: VertexId) {
        let edge = Edge::new(v1, v2);
        if self.seen_edges.insert(edge) {
            self.edges.push(edge);
        }
    }

    /// Faces in first-insertion order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Edges in first-insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of distinct faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn quad(a: u32, b: u32, c: u32, d: u32) -> [VertexId; 4] {
        [VertexId(a), VertexId(b), VertexId(c), VertexId(d)]
    }

    #[test]
    fn face_canonicalization_is_rotation_invariant() {
        let base = quad(5, 1, 8, 3);
        let canonical = Face::new(base);
        for shift in 0..4 {
            let rotated = [
                base[shift],
                base[(shift + 1) % 4],
                base[(shift + 2) % 4],
                base[(shift + 3) % 4],
            ];
            assert_eq!(Face::new(rotated), canonical);
        }
    }

    #[test]
    fn face_preserves_cyclic_order() {
        let face = Face::new(quad(5, 1, 8, 3));
        let ids: Vec<u32> = face.ids().iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![1, 8, 3, 5]);
    }

    #[test]
    fn edge_orders_endpoints() {
        assert_eq!(Edge::new(VertexId(4), VertexId(1)), Edge::new(VertexId(1), VertexId(4)));
        assert_eq!(Edge::new(VertexId(4), VertexId(1)).ids().0, VertexId(1));
    }

    #[test]
    fn quad_mesh_deduplicates_faces_and_edges() {
        let mut mesh = QuadMesh::new();
        assert!(mesh.insert_face(quad(0, 1, 2, 3)));
        assert!(!mesh.insert_face(quad(2, 3, 0, 1)));
        assert!(mesh.insert_face(quad(1, 0, 4, 5)));
        assert_eq!(mesh.face_count(), 2);
        // edge (0,1) is shared between the two quads
        assert_eq!(mesh.edge_count(), 7);
    }
}
