//! Face and edge reconstruction.
//!
//! No face or edge exists while refinement runs; the final topology is
//! recomputed wholesale from the vertex registry afterwards. Every active
//! vertex contributes one quadrilateral per star slot,
//! `(v, star[i], opposite[i], star[i+1])`, and the canonical face/edge
//! sets absorb the duplicates contributed by neighboring vertices.

use tiling_types::{QuadMesh, Vertex, VertexId};
use tracing::debug;

use crate::diamond::DiamondMesh;
use crate::error::RefineResult;
use crate::kite::KiteMesh;

fn add_ring(quads: &mut QuadMesh, id: VertexId, star: &[VertexId], opp: &[VertexId]) {
    let d = star.len();
    for i in 0..d {
        quads.insert_face([id, star[i], opp[i], star[(i + 1) % d]]);
    }
}

impl DiamondMesh {
    /// Derive the canonical face and edge sets of the refined mesh.
    ///
    /// Every vertex with degree > 0 contributes its ring of quads;
    /// boundary (kind 0) vertices contribute nothing of their own but
    /// still appear in faces of their interior neighbors.
    ///
    /// # Errors
    ///
    /// [`crate::RefineError::MissingAdjacency`] when a star or opposite
    /// lookup fails, which means the registry violates the topology
    /// invariants.
    pub fn reconstruct(&self) -> RefineResult<QuadMesh> {
        let mut quads = QuadMesh::new();
        for v in self.vertices() {
            if v.kind == 0 {
                continue;
            }
            let id = v.id();
            let star = self.star(id)?;
            let opp = self.opposites(id)?;
            add_ring(&mut quads, id, &star, &opp);
        }
        debug!(
            "diamond reconstruction: {} faces, {} edges",
            quads.face_count(),
            quads.edge_count()
        );
        Ok(quads)
    }
}

impl KiteMesh {
    /// Derive the canonical face and edge sets of the refined mesh.
    ///
    /// Only closed vertices (kinds above 40) carry faces; open and
    /// placeholder vertices are corners of their neighbors' quads.
    ///
    /// # Errors
    ///
    /// [`crate::RefineError::MissingAdjacency`] on a broken topology
    /// invariant.
    pub fn reconstruct(&self) -> RefineResult<QuadMesh> {
        let mut quads = QuadMesh::new();
        let closed: Vec<VertexId> = self
            .vertices()
            .iter()
            .filter(|v| v.kind > 40)
            .map(Vertex::id)
            .collect();
        for id in closed {
            let star = self.star(id)?;
            let opp = self.opposites(id)?;
            add_ring(&mut quads, id, &star, &opp);
        }
        debug!(
            "kite reconstruction: {} faces, {} edges",
            quads.face_count(),
            quads.edge_count()
        );
        Ok(quads)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::diamond::{hex_base_mesh, DiamondMesh};
    use crate::tables::diamond_tables;
    use tiling_types::LatticeValue;

    #[test]
    fn rim_hexagon_reconstructs_one_ring() {
        // a degree-6 vertex whose entire neighborhood is rim: only the
        // center contributes faces
        let mut mesh = DiamondMesh::new();
        let tables = diamond_tables();
        mesh.insert_vertex(LatticeValue::zero(), 6, 0, 0);
        for w in tables.star(6, 0).unwrap() {
            mesh.insert_vertex(LatticeValue::zero().offset(w, 0), 0, 0, 0);
        }
        for w in tables.opposites(6, 0).unwrap().iter().step_by(2) {
            mesh.insert_vertex(LatticeValue::zero().offset(w, 0), 0, 0, 0);
        }
        let quads = mesh.reconstruct().unwrap();
        // six quads around the center, adjacent ones sharing a spoke edge
        assert_eq!(quads.face_count(), 6);
        assert_eq!(quads.edge_count(), 18);
    }

    #[test]
    fn seed_grid_reconstruction_counts() {
        let mesh = hex_base_mesh(2);
        let quads = mesh.reconstruct().unwrap();
        assert_eq!(mesh.vertices().len(), 25);
        assert_eq!(quads.face_count(), 15);
        assert_eq!(quads.edge_count(), 39);
    }
}
