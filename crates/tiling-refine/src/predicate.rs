//! Refinement decision predicates.
//!
//! The diamond-kite driver asks a predicate, once per queue pop, whether a
//! vertex still needs refining. Predicates may read the vertex, its star,
//! and any externally supplied scalar field, but never mutate the
//! registry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiling_types::{Point2, Vertex};

use crate::diamond::DiamondMesh;
use crate::error::RefineResult;

/// Decides whether a vertex should be refined further.
pub trait RefinePredicate {
    /// `true` if `vertex` should be subdivided (or have its prerequisites
    /// forced) now.
    ///
    /// # Errors
    ///
    /// Star-reading predicates propagate [`crate::RefineError`] when the
    /// mesh topology is inconsistent.
    fn needs_refinement(&mut self, mesh: &DiamondMesh, vertex: &Vertex) -> RefineResult<bool>;
}

/// Refine everything to a uniform depth.
#[derive(Debug, Clone, Copy)]
pub struct UniformDepth {
    /// Target refinement level.
    pub max_level: u32,
}

impl UniformDepth {
    /// Refine until every vertex reaches `max_level`.
    #[must_use]
    pub const fn new(max_level: u32) -> Self {
        Self { max_level }
    }
}

impl RefinePredicate for UniformDepth {
    fn needs_refinement(&mut self, _mesh: &DiamondMesh, vertex: &Vertex) -> RefineResult<bool> {
        Ok(vertex.n < self.max_level)
    }
}

/// Refine each candidate with a fixed probability, up to a depth cap.
///
/// Seeded for reproducible meshes.
#[derive(Debug, Clone)]
pub struct RandomDepth {
    max_level: u32,
    probability: f64,
    rng: StdRng,
}

impl RandomDepth {
    /// Refine below `max_level` with the given probability.
    #[must_use]
    pub fn new(max_level: u32, probability: f64, seed: u64) -> Self {
        Self {
            max_level,
            probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RefinePredicate for RandomDepth {
    fn needs_refinement(&mut self, _mesh: &DiamondMesh, vertex: &Vertex) -> RefineResult<bool> {
        Ok(vertex.n < self.max_level && self.rng.gen::<f64>() < self.probability)
    }
}

/// Refine where a scalar field changes sign across a vertex's star.
///
/// Concentrates refinement along the implicit curve `field = 0`: a vertex
/// qualifies when `field(w)·field(v) ≤ 0` for any star neighbor `w`.
#[derive(Debug, Clone)]
pub struct CurveCrossing<F> {
    max_level: u32,
    field: F,
}

impl<F> CurveCrossing<F>
where
    F: Fn(Point2<f64>) -> f64,
{
    /// Track the zero set of `field` down to `max_level`.
    pub const fn new(max_level: u32, field: F) -> Self {
        Self { max_level, field }
    }
}

impl<F> RefinePredicate for CurveCrossing<F>
where
    F: Fn(Point2<f64>) -> f64,
{
    fn needs_refinement(&mut self, mesh: &DiamondMesh, vertex: &Vertex) -> RefineResult<bool> {
        if vertex.n >= self.max_level {
            return Ok(false);
        }
        let fv = (self.field)(vertex.point());
        let star = mesh.star(vertex.id())?;
        let crossing = star
            .into_iter()
            .any(|w| (self.field)(mesh.vertices()[w].point()) * fv <= 0.0);
        Ok(crossing)
    }
}

/// The Taubin (1994) quartic, positioned over the hexagonal seed grid.
///
/// A ready-made field for [`CurveCrossing`]; its zero set is a closed
/// curve sitting inside a `6 × 6` seed grid.
#[must_use]
pub fn taubin_field(p: Point2<f64>) -> f64 {
    let x = p.x - 8.0;
    let y = p.y - 4.0;
    0.004 + 0.110 * x - 0.177 * y - 0.174 * x * x + 0.224 * x * y - 0.303 * y * y
        - 0.168 * x * x * x
        + 0.327 * x * x * y
        - 0.087 * x * y * y
        - 0.013 * y * y * y
        + 0.235 * x * x * x * x
        - 0.667 * x * x * x * y
        + 0.745 * x * x * y * y
        - 0.029 * x * y * y * y
        + 0.072 * y * y * y * y
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::diamond::DiamondMesh;
    use tiling_types::LatticeValue;

    fn lone_vertex(n: u32) -> (DiamondMesh, Vertex) {
        let mut mesh = DiamondMesh::new();
        let id = mesh.insert_vertex(LatticeValue::zero(), 6, 0, n);
        let v = mesh.vertices()[id].clone();
        (mesh, v)
    }

    #[test]
    fn uniform_depth_caps_at_level() {
        let mut pred = UniformDepth::new(3);
        let (mesh, shallow) = lone_vertex(2);
        assert!(pred.needs_refinement(&mesh, &shallow).unwrap());
        let (mesh, deep) = lone_vertex(3);
        assert!(!pred.needs_refinement(&mesh, &deep).unwrap());
    }

    #[test]
    fn random_depth_is_reproducible() {
        let (mesh, v) = lone_vertex(0);
        let mut a = RandomDepth::new(4, 0.45, 7);
        let mut b = RandomDepth::new(4, 0.45, 7);
        for _ in 0..32 {
            assert_eq!(
                a.needs_refinement(&mesh, &v).unwrap(),
                b.needs_refinement(&mesh, &v).unwrap()
            );
        }
    }

    #[test]
    fn random_depth_never_exceeds_cap() {
        let (mesh, v) = lone_vertex(4);
        let mut pred = RandomDepth::new(4, 1.0, 0);
        assert!(!pred.needs_refinement(&mesh, &v).unwrap());
    }

    #[test]
    fn curve_crossing_respects_sign_change() {
        use crate::diamond::isolated_hex;
        let (mesh, center) = isolated_hex();
        let v = mesh.vertices()[center].clone();

        // field positive everywhere: no crossing
        let mut flat = CurveCrossing::new(4, |_| 1.0);
        assert!(!flat.needs_refinement(&mesh, &v).unwrap());

        // field negative at the center only: every star edge crosses
        let mut dip = CurveCrossing::new(4, |p: Point2<f64>| {
            if p.coords.norm() < 0.5 { -1.0 } else { 1.0 }
        });
        assert!(dip.needs_refinement(&mesh, &v).unwrap());
    }

    #[test]
    fn taubin_field_changes_sign() {
        // the zero set passes between these two sample points
        assert!(taubin_field(Point2::new(8.0, 5.0)) < 0.0);
        assert!(taubin_field(Point2::new(8.0, 4.0)) > 0.0);
        // and the field is positive far from the curve
        assert!(taubin_field(Point2::new(100.0, 100.0)) > 0.0);
    }
}
