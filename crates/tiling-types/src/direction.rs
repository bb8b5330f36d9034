//! The twelve basic lattice directions.
//!
//! Directions alternate between long steps (even indices, unit length at a
//! given level) and short steps (odd indices, shorter by the 3-adic
//! refinement factor). Index `i` points `i·30°` counterclockwise from the
//! positive real axis.

use crate::LatticeValue;
use std::sync::LazyLock;

static DIRECTIONS: LazyLock<[LatticeValue; 12]> = LazyLock::new(|| {
    let w2 = LatticeValue::from_ints(0, 1, 0);
    let mut w = vec![
        LatticeValue::one(),
        LatticeValue::from_ints(1, 1, 1),
        w2.clone(),
    ];
    for i in 3..12 {
        let next = w[i - 2].multiply(&w2);
        w.push(next);
    }
    match <[LatticeValue; 12]>::try_from(w) {
        Ok(dirs) => dirs,
        Err(_) => unreachable!("exactly twelve directions are generated"),
    }
});

/// The twelve basic direction vectors `W[0..12]`.
///
/// `W[0] = 1`, `W[1] = (1 + ω)/3`, `W[2] = ω`, and every further direction
/// is the one two steps back rotated by 60°: `W[i] = W[i−2]·W[2]`.
///
/// # Example
///
/// ```
/// use tiling_types::{directions, LatticeValue};
///
/// let w = directions();
/// assert_eq!(w[0], LatticeValue::one());
/// // W[6] points the opposite way from W[0]
/// assert_eq!(w[6], w[0].negate());
/// ```
#[must_use]
pub fn directions() -> &'static [LatticeValue; 12] {
    &DIRECTIONS
}

/// Multiply every entry of an offset row by `z`.
///
/// Rotating a row by `W[1]` turns orientation 0 into orientation 1;
/// rotating by `W[2]` advances an orientation by two. Topology tables are
/// generated from their hand-specified base rows with exactly these two
/// generators.
#[must_use]
pub fn rotate_row(row: &[LatticeValue], z: &LatticeValue) -> Vec<LatticeValue> {
    row.iter().map(|w| w.multiply(z)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn even_directions_form_a_hexagon() {
        let w = directions();
        assert_eq!(w[0], LatticeValue::from_ints(1, 0, 0));
        assert_eq!(w[2], LatticeValue::from_ints(0, 1, 0));
        assert_eq!(w[4], LatticeValue::from_ints(-1, 1, 0));
        assert_eq!(w[6], LatticeValue::from_ints(-1, 0, 0));
        assert_eq!(w[8], LatticeValue::from_ints(0, -1, 0));
        assert_eq!(w[10], LatticeValue::from_ints(1, -1, 0));
    }

    #[test]
    fn odd_directions_carry_the_short_scale() {
        let w = directions();
        for i in (1..12).step_by(2) {
            assert_eq!(w[i].m(), 1, "W[{i}] should have denominator 3");
        }
    }

    #[test]
    fn opposite_directions_negate() {
        let w = directions();
        for i in 0..6 {
            assert_eq!(w[i + 6], w[i].negate());
        }
    }

    #[test]
    fn rotation_by_w2_advances_two_steps() {
        let w = directions();
        for i in 0..10 {
            assert_eq!(w[i].multiply(&w[2]), w[i + 2]);
        }
    }

    #[test]
    fn rotate_row_rotates_every_entry() {
        let w = directions();
        let row = vec![w[0].clone(), w[4].clone(), w[8].clone()];
        let rotated = rotate_row(&row, &w[2]);
        assert_eq!(rotated, vec![w[2].clone(), w[6].clone(), w[10].clone()]);
    }
}
