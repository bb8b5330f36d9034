//! Diamond-kite subdivision engine and refinement driver.
//!
//! Vertex kinds are plain degrees (0 for boundary, otherwise 3..=6). Only
//! degree-6 vertices subdivide; degree-4 and degree-5 vertices first force
//! specific neighbors to refine (the prerequisite closure), which raises
//! their own degree to 6 as a side effect of those neighboring
//! subdivisions. A single subdivision rewrites the center, creates six new
//! inner-star vertices, and advances the six old neighbors by one degree
//! each.

// Orientation and seed-grid arithmetic uses small indices
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashSet;
use std::collections::VecDeque;
use tiling_types::{directions, LatticeValue, Vertex, VertexId, VertexRegistry};
use tracing::debug;

use crate::error::{RefineError, RefineResult};
use crate::predicate::RefinePredicate;
use crate::tables::{diamond_tables, wrap12};

/// One diamond-kite mesh construction run.
///
/// Owns the vertex registry; all mutation during refinement flows through
/// this object, replacing the ambient module state of older
/// implementations of this tiling.
#[derive(Debug, Clone, Default)]
pub struct DiamondMesh {
    vertices: VertexRegistry,
}

/// Counters reported by a refinement run.
#[derive(Debug, Clone, Copy)]
pub struct RefineReport {
    /// Number of subdivision transitions applied.
    pub subdivisions: usize,
    /// Vertex count after refinement.
    pub final_vertices: usize,
}

impl DiamondMesh {
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
    pub fn insert_vertex(&mut self, coord: LatticeValue, degree: u8, k: u8, n: u32) -> VertexId {
        self.vertices.insert(coord, degree, k, n).0
    }

    fn star_row(&self, v: &Vertex) -> RefineResult<&'static [LatticeValue]> {
        diamond_tables()
            .star(v.kind, v.k)
            .ok_or(RefineError::InvalidSubdivisionTarget {
                id: v.id(),
                kind: v.kind,
            })
    }

    /// Lattice coordinate of star neighbor `i`, whether or not it exists.
    ///
    /// # Errors
    ///
    /// [`RefineError::InvalidSubdivisionTarget`] if the vertex's kind has
    /// no offset table.
    pub fn neighbor_coord(&self, id: VertexId, i: usize) -> RefineResult<LatticeValue> {
        let v = &self.vertices[id];
        let row = self.star_row(v)?;
        Ok(v.coord().offset(&row[i], v.n))
    }

    /// Star neighbor `i`; the neighbor must already exist.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] when the computed lattice point
    /// holds no vertex.
    pub fn adjacent(&self, id: VertexId, i: usize) -> RefineResult<VertexId> {
        let coord = self.neighbor_coord(id, i)?;
        self.vertices
            .id_of(&coord)
            .ok_or(RefineError::MissingAdjacency { id, index: i })
    }

    /// The ordered star of a vertex: all `degree` direct neighbors.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] if any neighbor is absent.
    pub fn star(&self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let degree = usize::from(self.vertices[id].kind);
        (0..degree).map(|i| self.adjacent(id, i)).collect()
    }

    /// The ordered opposites of a vertex, one per face around it.
    ///
    /// Each slot holds a primary/fallback offset pair; the fallback covers
    /// the mesh rim, where the primary candidate may never have been
    /// created.
    ///
    /// # Errors
    ///
    /// [`RefineError::MissingAdjacency`] when both candidates of a slot
    /// are absent.
    pub fn opposites(&self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let v = &self.vertices[id];
        let row = diamond_tables().opposites(v.kind, v.k).ok_or(
            RefineError::InvalidSubdivisionTarget {
                id,
                kind: v.kind,
            },
        )?;
        let mut out = Vec::with_capacity(row.len() / 2);
        for i in (0..row.len()).step_by(2) {
            let primary = v.coord().offset(&row[i], v.n);
            let found = self.vertices.id_of(&primary).or_else(|| {
                let fallback = v.coord().offset(&row[i + 1], v.n);
                self.vertices.id_of(&fallback)
            });
            out.push(found.ok_or(RefineError::MissingAdjacency { id, index: i })?);
        }
        Ok(out)
    }

    /// Create the six inner-star vertices of a freshly bumped center.
    ///
    /// Every target site must be vacant; an occupied site means the offset
    /// tables and the registry disagree about the lattice geometry.
    fn make_star(&mut self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let v = &self.vertices[id];
        let row = self.star_row(v)?;
        let coords: Vec<LatticeValue> = row.iter().map(|w| v.coord().offset(w, v.n)).collect();
        let mut out = Vec::with_capacity(coords.len());
        for (i, coord) in coords.into_iter().enumerate() {
            if self.vertices.contains(&coord) {
                return Err(RefineError::UnexpectedExistingVertex { id, index: i });
            }
            out.push(self.vertices.insert(coord, 0, 0, 0).0);
        }
        Ok(out)
    }

    /// Apply one subdivision transition to a degree-6 vertex.
    ///
    /// Snapshots the old star, bumps the center to the next orientation
    /// and level, creates the six new degree-3 inner vertices, then
    /// advances each old neighbor one degree (3→4, 4→5, 5→6; boundary
    /// vertices are left alone). Returns the old-star ids, whose records
    /// have already been advanced.
    ///
    /// # Errors
    ///
    /// [`RefineError::InvalidSubdivisionTarget`] if the vertex is not
    /// degree 6 or an old neighbor has an impossible degree;
    /// [`RefineError::MissingAdjacency`] /
    /// [`RefineError::UnexpectedExistingVertex`] on broken topology.
    pub fn subdivide(&mut self, id: VertexId) -> RefineResult<Vec<VertexId>> {
        let v = &self.vertices[id];
        if v.kind != 6 {
            return Err(RefineError::InvalidSubdivisionTarget { id, kind: v.kind });
        }
        let old_k = i32::from(v.k);
        let old_n = v.n;

        // the old star must be resolved before any mutation below
        let s0 = self.star(id)?;

        {
            let v = &mut self.vertices[id];
            v.k = wrap12(old_k + 1);
            v.n = old_n + 1;
        }

        let s1 = self.make_star(id)?;
        for (j, &wid) in s1.iter().enumerate() {
            let w = &mut self.vertices[wid];
            w.kind = 3;
            w.k = wrap12(6 + 2 * j as i32 + old_k + 1);
            w.n = old_n + 1;
        }

        for (j, &wid) in s0.iter().enumerate() {
            let kk = wrap12(6 + 2 * j as i32 + old_k);
            let w = &mut self.vertices[wid];
            match w.kind {
                0 => {}
                3 => {
                    w.kind = 4;
                    w.k = wrap12(i32::from(kk) + 4);
                }
                4 => {
                    w.kind = 5;
                    w.k = if w.k == kk {
                        wrap12(i32::from(kk) + 4)
                    } else {
                        wrap12(i32::from(kk) - 4)
                    };
                }
                5 => {
                    w.kind = 6;
                    w.k = wrap12(i32::from(kk) - 1);
                    w.n = old_n + 1;
                }
                kind => {
                    return Err(RefineError::InvalidSubdivisionTarget { id: wid, kind });
                }
            }
        }
        Ok(s0)
    }

    /// Refine one vertex, forcing its prerequisites first.
    ///
    /// A degree-4 vertex needs its neighbors at local indices 0 and 1
    /// refined before it can reach degree 6; a degree-5 vertex needs its
    /// neighbor at index 0. Both prerequisite ids are resolved before
    /// either recursion, because refining one can retag this vertex and
    /// shift its offset row. Recursion depth is bounded by `max_level`.
    ///
    /// Returns follow-up candidates for the driver queue: every vertex
    /// subdivided here plus old neighbors that are now degree 4.
    ///
    /// # Errors
    ///
    /// Propagates any engine error from the closure or the subdivisions.
    pub fn refine_vertex(
        &mut self,
        id: VertexId,
        max_level: u32,
    ) -> RefineResult<Vec<VertexId>> {
        let mut followups = Vec::new();
        match self.vertices[id].kind {
            4 => {
                let w0 = self.adjacent(id, 0)?;
                let w1 = self.adjacent(id, 1)?;
                followups.extend(self.refine_vertex(w0, max_level)?);
                followups.extend(self.refine_vertex(w1, max_level)?);
            }
            5 => {
                let w0 = self.adjacent(id, 0)?;
                followups.extend(self.refine_vertex(w0, max_level)?);
            }
            _ => {}
        }

        // near the seed-grid rim the closure can fail to reach degree 6
        let v = &self.vertices[id];
        if v.kind != 6 || v.n >= max_level {
            return Ok(followups);
        }

        let old = self.subdivide(id)?;
        followups.extend(old.into_iter().filter(|&w| self.vertices[w].kind == 4));
        followups.push(id);
        Ok(followups)
    }

    /// Queue-driven adaptive refinement.
    ///
    /// Seeds a FIFO queue with every degree-6 vertex, then pops, tests the
    /// predicate, and refines until the queue drains. Re-processing a
    /// vertex whose degree or level has since changed is a no-op, so stale
    /// queue entries are harmless.
    ///
    /// # Errors
    ///
    /// Propagates the first engine error; the mesh must be discarded.
    pub fn refine<P: RefinePredicate>(
        &mut self,
        predicate: &mut P,
        max_level: u32,
    ) -> RefineResult<RefineReport> {
        let mut queue: VecDeque<VertexId> = self
            .vertices
            .iter()
            .filter(|v| v.kind == 6)
            .map(Vertex::id)
            .collect();
        let mut queued: HashSet<VertexId> = queue.iter().copied().collect();

        let mut subdivisions = 0usize;
        while let Some(id) = queue.pop_front() {
            queued.remove(&id);
            if !predicate.needs_refinement(self, &self.vertices[id])? {
                continue;
            }
            let before = self.vertices.len();
            let followups = self.refine_vertex(id, max_level)?;
            subdivisions += (self.vertices.len() - before) / 6;
            for next in followups {
                if queued.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        debug!(
            "diamond refinement done: {} subdivisions, {} vertices",
            subdivisions,
            self.vertices.len()
        );
        Ok(RefineReport {
            subdivisions,
            final_vertices: self.vertices.len(),
        })
    }

    /// Recreate degree-3 vertices implied by their degree-6 neighbors.
    ///
    /// Snapshots elide these vertices as redundant; after reloading, every
    /// absent star neighbor of a degree-6 vertex is recreated at
    /// `k = (6 + 2i + v.k) mod 12` and the parent's level. Returns the
    /// number of vertices recreated.
    ///
    /// # Errors
    ///
    /// [`RefineError::InvalidSubdivisionTarget`] if a degree-6 vertex's
    /// offset row cannot be resolved.
    pub fn add_implied_neighbors(&mut self) -> RefineResult<usize> {
        let mut added = 0;
        let count = self.vertices.len();
        for idx in 0..count {
            let id = VertexId(idx as u32);
            if self.vertices[id].kind != 6 {
                continue;
            }
            let vk = i32::from(self.vertices[id].k);
            let vn = self.vertices[id].n;
            for i in 0..6 {
                let coord = self.neighbor_coord(id, i)?;
                if !self.vertices.contains(&coord) {
                    let k = wrap12(6 + 2 * i as i32 + vk);
                    self.vertices.insert(coord, 3, k, vn);
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    fn mark_boundary(&mut self) {
        let w = directions();
        let rim: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|v| {
                (0..12)
                    .step_by(2)
                    .any(|k| !self.vertices.contains(&v.coord().offset(&w[k], 0)))
            })
            .map(Vertex::id)
            .collect();
        for id in rim {
            let v = &mut self.vertices[id];
            v.kind = 0;
            v.k = 0;
            v.boundary = true;
        }
    }
}

/// Even-direction lattice steps as integer numerator pairs.
const EVEN_STEPS: [(i64, i64); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Build the `n × n` hexagonal seed grid.
///
/// Each cell places a degree-3 center, three degree-6 vertices on even
/// directions 0/4/8, three degree-3 vertices on even directions 2/6/10,
/// and (except on the last row and column) one interior degree-3 filler.
/// Shared ring vertices are deduplicated by the registry; vertices on the
/// outer rim are then demoted to boundary (kind 0).
///
/// # Example
///
/// ```
/// use tiling_refine::hex_base_mesh;
///
/// let mesh = hex_base_mesh(2);
/// assert!(mesh.vertices().iter().any(|v| v.kind == 6));
/// assert!(mesh.vertices().iter().any(|v| v.boundary));
/// ```
#[must_use]
pub fn hex_base_mesh(n: usize) -> DiamondMesh {
    let mut mesh = DiamondMesh::new();
    for i in 0..n as i64 {
        for j in 0..n as i64 {
            // cell origin: i·(W2 + W4) + j·3·W0
            let (ca, cb) = (3 * j - i, 2 * i);
            mesh.insert_vertex(LatticeValue::from_ints(ca, cb, 0), 3, 0, 0);
            for step in [0, 2, 4] {
                let (da, db) = EVEN_STEPS[step];
                mesh.insert_vertex(LatticeValue::from_ints(ca + da, cb + db, 0), 6, 0, 0);
            }
            for step in [1, 3, 5] {
                let (da, db) = EVEN_STEPS[step];
                mesh.insert_vertex(LatticeValue::from_ints(ca + da, cb + db, 0), 3, 2, 0);
            }
            if i < n as i64 - 1 && j < n as i64 - 1 {
                mesh.insert_vertex(LatticeValue::from_ints(ca + 1, cb + 1, 0), 3, 0, 0);
            }
        }
    }
    mesh.mark_boundary();
    debug!("hexagonal seed grid: {} vertices", mesh.vertices().len());
    mesh
}

/// An isolated degree-6 vertex with its full star and opposite ring, all
/// from the orientation-0 base tables. Shared test fixture.
#[cfg(test)]
pub(crate) fn isolated_hex() -> (DiamondMesh, VertexId) {
    let mut mesh = DiamondMesh::new();
    let center = mesh.insert_vertex(LatticeValue::zero(), 6, 0, 0);
    let tables = diamond_tables();
    let star_row = tables.star(6, 0).unwrap_or(&[]);
    for (i, w) in star_row.iter().enumerate() {
        let k = wrap12(6 + 2 * i as i32);
        mesh.insert_vertex(LatticeValue::zero().offset(w, 0), 3, k, 0);
    }
    let opp_row = tables.opposites(6, 0).unwrap_or(&[]);
    for w in opp_row.iter().step_by(2) {
        mesh.insert_vertex(LatticeValue::zero().offset(w, 0), 3, 0, 0);
    }
    (mesh, center)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tables::diamond_tables;

    #[test]
    fn subdivide_requires_degree_six() {
        let mut mesh = DiamondMesh::new();
        let id = mesh.insert_vertex(LatticeValue::zero(), 3, 0, 0);
        let err = mesh.subdivide(id).unwrap_err();
        assert!(matches!(
            err,
            RefineError::InvalidSubdivisionTarget { kind: 3, .. }
        ));
    }

    #[test]
    fn subdivide_bumps_center_and_creates_six() {
        let (mut mesh, center) = isolated_hex();
        let before = mesh.vertices().len();
        let old = mesh.subdivide(center).unwrap();

        let v = &mesh.vertices()[center];
        assert_eq!(v.kind, 6);
        assert_eq!(v.k, 1);
        assert_eq!(v.n, 1);

        assert_eq!(mesh.vertices().len(), before + 6);
        assert_eq!(old.len(), 6);

        // the new inner star sits at level 1 with degree 3
        for i in 0..6 {
            let wid = mesh.adjacent(center, i).unwrap();
            let w = &mesh.vertices()[wid];
            assert_eq!(w.kind, 3);
            assert_eq!(w.n, 1);
        }
    }

    #[test]
    fn subdivide_advances_old_neighbors() {
        let (mut mesh, center) = isolated_hex();
        let old = mesh.subdivide(center).unwrap();
        for (j, wid) in old.into_iter().enumerate() {
            let w = &mesh.vertices()[wid];
            assert_eq!(w.kind, 4, "old neighbor {j} should advance 3 -> 4");
            let kk = i32::from(wrap12(6 + 2 * j as i32));
            assert_eq!(w.k, wrap12(kk + 4));
        }
    }

    #[test]
    fn subdivide_twice_needs_prerequisites_resolved() {
        // after one subdivision the old ring is degree 4; subdividing the
        // center again must not touch them directly but go through the new
        // degree-3 ring
        let (mut mesh, center) = isolated_hex();
        mesh.subdivide(center).unwrap();
        let s = mesh.star(center).unwrap();
        for wid in s {
            assert_eq!(mesh.vertices()[wid].kind, 3);
        }
    }

    #[test]
    fn occupied_inner_star_site_is_reported() {
        let (mut mesh, center) = isolated_hex();
        // squat on one of the sites the subdivision is about to create:
        // the new star lies on the short directions at level 1
        mesh.insert_vertex(LatticeValue::from_ints(1, 1, 1), 3, 0, 0);
        let err = mesh.subdivide(center).unwrap_err();
        assert!(matches!(
            err,
            RefineError::UnexpectedExistingVertex { index: 0, .. }
        ));
    }

    #[test]
    fn missing_star_neighbor_is_reported() {
        let mut mesh = DiamondMesh::new();
        let lone = mesh.insert_vertex(LatticeValue::zero(), 6, 0, 0);
        let err = mesh.star(lone).unwrap_err();
        assert!(matches!(err, RefineError::MissingAdjacency { index: 0, .. }));
    }

    #[test]
    fn hex_base_mesh_marks_rim_as_boundary() {
        let mesh = hex_base_mesh(3);
        let boundary = mesh.vertices().iter().filter(|v| v.boundary).count();
        let interior = mesh.vertices().iter().filter(|v| !v.boundary).count();
        assert!(boundary > 0);
        assert!(interior > 0);
        for v in mesh.vertices() {
            if v.boundary {
                assert_eq!(v.kind, 0);
            } else {
                assert!(matches!(v.kind, 3 | 6));
            }
        }
    }

    #[test]
    fn implied_neighbors_are_recreated() {
        // a snapshot that kept only the center and its opposite ring
        let mut stripped = DiamondMesh::new();
        let root = stripped.insert_vertex(LatticeValue::zero(), 6, 0, 0);
        for w in diamond_tables().opposites(6, 0).unwrap().iter().step_by(2) {
            stripped.insert_vertex(LatticeValue::zero().offset(w, 0), 3, 0, 0);
        }
        let before = stripped.vertices().len();
        let added = stripped.add_implied_neighbors().unwrap();
        assert_eq!(added, 6);
        assert_eq!(stripped.vertices().len(), before + 6);
        // the star resolves again, with the orientations a seed mesh uses
        let star = stripped.star(root).unwrap();
        for (i, wid) in star.into_iter().enumerate() {
            let w = &stripped.vertices()[wid];
            assert_eq!(w.kind, 3);
            assert_eq!(w.k, wrap12(6 + 2 * i as i32));
        }
    }
}
