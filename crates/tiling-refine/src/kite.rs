//! Kite-fractal subdivision engine and round driver.
//!
//! Vertex kinds are two-digit type codes whose tens digit is the degree:
//! 20, 31, 32 are open (refinable), 41, 42, 43, 50, 60 are closed, and 0
//! marks a placeholder that has been placed but not yet classified. A
//! refinement promotes an open vertex (20→50, 31→41, 32→42), materializes
//! its full star and opposite ring, and retags specific neighbors. Sites
//! reachable from two directions are tagged twice: the second visit merges
//! the vertex into its doubly-shared kind (43 or 32), using the
//! orientation recorded by the first visit to disambiguate.

// Orientation arithmetic uses small indices
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use tiling_types::{LatticeValue, VertexId, VertexRegistry};
use tracing::debug;

use crate::error::{RefineError, RefineResult};
use crate::tables::{kite_degree, kite_tables, wrap12};

/// One kite-fractal mesh construction run.
#[derive(Debug, Clone, Default)]
pub struct KiteMesh {
    vertices: VertexRegistry,
}

impl KiteMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertex registry, in creation-id order.
    #[must_use]
    pub const fn vertices(&self) -> &VertexRegistry {
        &self.vertices
    }

    /// Insert a seed vertex; idempotent, existing records win.
    pub fn insert_vertex(&mut self, coord: LatticeValue, kind: u8, k: u8, n: u32) -> VertexId {
        self.vertices.insert(coord, kind, k, n).0
    }

    fn row(&self, id: VertexId, opposites: bool) -> RefineResult<&'static [LatticeValue]> {
        let v = &self.vertices[id];
        let tables = kite_tables();
        let row = if opposites {
            tables.opposites(v.kind, v.k)
        } else {
            tables.star(v.kind, v.k)
        };
        row.ok_or(RefineError::InvalidSubdivisionTarget {
            id,
            kind: self.vertices[id].kind,
        })
    }

    /// Star neighbor `i`; the neighbor must already exist.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] when the computed lattice point
    /// holds no vertex.
    pub fn adjacent(&self, id: VertexId, i: usize) -> RefineResult<VertexId> {
        let coord = self.offset_coord(id, i, false)?;
        self.vertices
            .id_of(&coord)
            .ok_or(RefineError::MissingAdjacency { id, index: i })
    }

    /// Opposite neighbor `i`; the neighbor must already exist.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] when the computed lattice point
    /// holds no vertex.
    pub fn opposite(&self, id: VertexId, i: usize) -> RefineResult<VertexId> {
        let coord = self.offset_coord(id, i, true)?;
        self.vertices
            .id_of(&coord)
            .ok_or(RefineError::MissingAdjacency { id, index: i })
    }

    fn offset_coord(&self, id: VertexId, i: usize, opposites: bool) -> RefineResult<LatticeValue> {
        let row = self.row(id, opposites)?;
        let v = &self.vertices[id];
        Ok(v.coord().offset(&row[i], v.n))
    }

    /// The ordered star of a vertex: all `kind/10` direct neighbors.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] if any neighbor is absent.
    pub fn star(&self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let degree = usize::from(kite_degree(self.vertices[id].kind));
        (0..degree).map(|i| self.adjacent(id, i)).collect()
    }

    /// The ordered opposites of a vertex.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] if any opposite is absent.
    pub fn opposites(&self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let len = self.row(id, true)?.len();
        (0..len).map(|i| self.opposite(id, i)).collect()
    }

    /// Materialize the full star, creating placeholders where absent.
    fn ensure_star(&mut self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        self.ensure(id, false)
    }

    /// Materialize the opposite ring, creating placeholders where absent.
    fn ensure_opposites(&mut self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        self.ensure(id, true)
    }

    fn ensure(&mut self, id: VertexId, opposites: bool) -> RefineResult<Vec<VertexId>> {
        let len = self.row(id, opposites)?.len();
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            let coord = self.offset_coord(id, i, opposites)?;
            out.push(self.vertices.insert(coord, 0, 0, 0).0);
        }
        Ok(out)
    }

    /// Refine one open vertex: promote, materialize, retag neighbors.
    ///
    /// Placeholders (kind 0) are skipped silently; they are classified by
    /// a later visit from one of their neighbors.
    ///
    /// # Errors
    ///
    /// [`RefineError::InvalidSubdivisionTarget`] when invoked on a closed
    /// kind; [`RefineError::MissingAdjacency`] if the tables and registry
    /// disagree after materialization.
    pub fn refine_vertex(&mut self, id: VertexId) -> RefineResult<()> {
        let promoted = match self.vertices[id].kind {
            0 => return Ok(()),
            20 => 50,
            31 => 41,
            32 => 42,
            kind => return Err(RefineError::InvalidSubdivisionTarget { id, kind }),
        };
        self.vertices[id].kind = promoted;
        self.ensure_star(id)?;
        self.ensure_opposites(id)?;

        let vk = i32::from(self.vertices[id].k);
        let vn = self.vertices[id].n;
        match promoted {
            // the mirrored partner across star slot 3 opens with the
            // complementary kind
            41 => {
                let wid = self.adjacent(id, 3)?;
                let w = &mut self.vertices[wid];
                w.kind = 32;
                w.k = wrap12(vk);
                w.n = vn + 2;
            }
            42 => {
                let wid = self.adjacent(id, 3)?;
                let w = &mut self.vertices[wid];
                w.kind = 31;
                w.k = wrap12(vk);
                w.n = vn;
            }
            50 => {
                for j in 2..=4usize {
                    let wid = self.adjacent(id, j)?;
                    let w = &mut self.vertices[wid];
                    let revisit = w.kind != 0;
                    w.kind = if revisit { 43 } else { 31 };
                    w.k = wrap12(vk + 2 * j as i32 - 6);
                    w.n = vn;
                }
                for j in 2..=3usize {
                    let wid = self.opposite(id, j)?;
                    let w = &mut self.vertices[wid];
                    let k1 = i32::from(w.k);
                    let revisit = w.kind != 0;
                    let k2 = wrap12(vk + 2 * j as i32 - 5);
                    if revisit {
                        // merge: keep whichever orientation the two
                        // visits agree on, advanced by one step
                        w.kind = 32;
                        w.k = if wrap12(k1 + 4) == k2 {
                            wrap12(k1 + 2)
                        } else {
                            wrap12(i32::from(k2) + 2)
                        };
                    } else {
                        w.kind = 20;
                        w.k = k2;
                    }
                    w.n = vn + 1;
                }
            }
            _ => unreachable!("promotion targets are 41, 42, 50"),
        }
        Ok(())
    }

    /// Run `rounds` refinement rounds.
    ///
    /// Each round scans, in creation order, exactly the vertices that
    /// existed when the round started and refines every open one; vertices
    /// created mid-round wait for the next round.
    ///
    /// # Errors
    ///
    /// Propagates the first engine error; the mesh must be discarded.
    pub fn refine(&mut self, rounds: u32) -> RefineResult<()> {
        for round in 0..rounds {
            let count = self.vertices.len();
            for idx in 0..count {
                let id = VertexId(idx as u32);
                if self.vertices[id].kind < 40 {
                    self.refine_vertex(id)?;
                }
            }
            debug!(
                "kite round {}: {} -> {} vertices",
                round,
                count,
                self.vertices.len()
            );
        }
        Ok(())
    }
}

/// Build the kite-fractal seed mesh.
///
/// One kind-60 root at the origin, its six star neighbors opened as kind
/// 31 (orientations 0, 2, …, 10 at level 0), and its six opposites as
/// kind 20 (orientations 1, 3, …, 11 at level 1).
///
/// # Errors
///
/// Never fails on the built-in tables; the `Result` covers the same
/// invariant errors as refinement.
pub fn kite_base_mesh() -> RefineResult<KiteMesh> {
    let mut mesh = KiteMesh::new();
    let root = mesh.insert_vertex(LatticeValue::zero(), 60, 0, 0);
    let star = mesh.ensure_star(root)?;
    for (i, wid) in star.into_iter().enumerate() {
        let w = &mut mesh.vertices[wid];
        w.kind = 31;
        w.k = wrap12(2 * i as i32);
        w.n = 0;
    }
    let opp = mesh.ensure_opposites(root)?;
    for (i, wid) in opp.into_iter().enumerate() {
        let w = &mut mesh.vertices[wid];
        w.kind = 20;
        w.k = wrap12(2 * i as i32 + 1);
        w.n = 1;
    }
    Ok(mesh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn base_mesh_layout() {
        let mesh = kite_base_mesh().unwrap();
        let kinds: Vec<(u8, u8, u32)> = mesh.vertices().iter().map(|v| (v.kind, v.k, v.n)).collect();
        assert_eq!(kinds.len(), 13);
        assert_eq!(kinds[0], (60, 0, 0));
        for i in 0..6 {
            assert_eq!(kinds[1 + i], (31, 2 * i as u8, 0));
            assert_eq!(kinds[7 + i], (20, 2 * i as u8 + 1, 1));
        }
    }

    #[test]
    fn closed_kinds_reject_refinement() {
        let mut mesh = kite_base_mesh().unwrap();
        let root = mesh.vertices().ids().next().unwrap();
        let err = mesh.refine_vertex(root).unwrap_err();
        assert!(matches!(
            err,
            RefineError::InvalidSubdivisionTarget { kind: 60, .. }
        ));
    }

    #[test]
    fn placeholders_are_skipped() {
        let mut mesh = KiteMesh::new();
        let id = mesh.insert_vertex(LatticeValue::zero(), 0, 0, 0);
        mesh.refine_vertex(id).unwrap();
        assert_eq!(mesh.vertices()[id].kind, 0);
    }

    #[test]
    fn one_round_promotes_every_seed_vertex() {
        let mut mesh = kite_base_mesh().unwrap();
        mesh.refine(1).unwrap();

        // the original thirteen are all closed now
        let first: Vec<u8> = mesh.vertices().iter().take(13).map(|v| v.kind).collect();
        assert_eq!(first[0], 60);
        for kind in &first[1..7] {
            assert_eq!(*kind, 41, "seed 31s promote to 41");
        }
        for kind in &first[7..13] {
            assert_eq!(*kind, 50, "seed 20s promote to 50");
        }
        assert!(!first.contains(&20));
        assert!(!first.contains(&31));
        assert_eq!(mesh.vertices().len(), 49);
    }

    #[test]
    fn rounds_leave_no_placeholders() {
        let mut mesh = kite_base_mesh().unwrap();
        mesh.refine(2).unwrap();
        assert_eq!(mesh.vertices().len(), 133);
        assert!(mesh.vertices().iter().all(|v| v.kind != 0));
    }

    #[test]
    fn two_rounds_match_known_kind_histogram() {
        let mut mesh = kite_base_mesh().unwrap();
        mesh.refine(2).unwrap();
        let mut counts = std::collections::BTreeMap::new();
        for v in mesh.vertices() {
            *counts.entry(v.kind).or_insert(0usize) += 1;
        }
        let expected: std::collections::BTreeMap<u8, usize> = [
            (20, 24),
            (31, 42),
            (32, 18),
            (41, 24),
            (42, 6),
            (50, 18),
            (60, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(counts, expected);
    }
}
