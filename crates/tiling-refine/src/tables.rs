//! STAR and OPP topology tables.
//!
//! For each vertex kind, the STAR table lists the offsets to the vertex's
//! direct neighbors and the OPP table the offsets used to close
//! quadrilateral faces. Row 0 of every kind is hand-specified from the
//! governing tiling rule (the diamond-kite rows follow Eppstein,
//! "Diamond-kite adaptive quadrilateral meshing", 2014; the kite-fractal
//! rows follow Fathauer's kite prototile construction, 2001); row 1 is
//! row 0 rotated by `W[1]`, and row k is row k−2 rotated by `W[2]`.
//! Tables are built once, before any vertex exists, and shared read-only
//! for the rest of the process.

use std::sync::LazyLock;
use tiling_types::{directions, rotate_row, LatticeValue};

/// Orientation arithmetic modulo 12.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// rem_euclid(12) lands in 0..12, which always fits u8
pub(crate) fn wrap12(k: i32) -> u8 {
    k.rem_euclid(12) as u8
}

/// Offset rows of one vertex kind at all twelve orientations.
#[derive(Debug, Clone)]
pub struct OrientedOffsets {
    rows: [Vec<LatticeValue>; 12],
}

impl OrientedOffsets {
    fn from_base(base: Vec<LatticeValue>) -> Self {
        let w = directions();
        let mut rows = Vec::with_capacity(12);
        rows.push(base);
        rows.push(rotate_row(&rows[0], &w[1]));
        for k in 2..12 {
            rows.push(rotate_row(&rows[k - 2], &w[2]));
        }
        match <[Vec<LatticeValue>; 12]>::try_from(rows) {
            Ok(rows) => Self { rows },
            Err(_) => unreachable!("exactly twelve orientations are generated"),
        }
    }

    /// Offsets at orientation `k`.
    #[must_use]
    pub fn row(&self, k: u8) -> &[LatticeValue] {
        &self.rows[usize::from(k) % 12]
    }
}

/// Topology tables for the diamond-kite family, indexed by degree 3..=6.
#[derive(Debug)]
pub struct DiamondTables {
    star: [OrientedOffsets; 4],
    opp: [OrientedOffsets; 4],
}

impl DiamondTables {
    /// Star row for `degree` at orientation `k`; `None` for degrees
    /// without a table (0 and anything outside 3..=6).
    #[must_use]
    pub fn star(&self, degree: u8, k: u8) -> Option<&[LatticeValue]> {
        match degree {
            3..=6 => Some(self.star[usize::from(degree - 3)].row(k)),
            _ => None,
        }
    }

    /// Opposite row for `degree` at orientation `k` (length `2·degree`,
    /// primary/fallback pairs).
    #[must_use]
    pub fn opposites(&self, degree: u8, k: u8) -> Option<&[LatticeValue]> {
        match degree {
            3..=6 => Some(self.opp[usize::from(degree - 3)].row(k)),
            _ => None,
        }
    }

    fn build() -> Self {
        let w = directions();
        let v = LatticeValue::from_ints;

        let star3 = vec![w[0].clone(), w[4].clone(), w[8].clone()];
        let star4 = vec![w[0].clone(), w[4].clone(), w[7].clone(), w[9].clone()];
        let star5 = vec![
            w[0].clone(),
            w[3].clone(),
            w[5].clone(),
            w[7].clone(),
            w[9].clone(),
        ];
        let star6 = vec![
            w[0].clone(),
            w[2].clone(),
            w[4].clone(),
            w[6].clone(),
            w[8].clone(),
            w[10].clone(),
        ];

        // degree 3: two base pairs, the rest by 120-degree steps
        let mut opp3 = vec![v(0, 1, 0), v(0, 2, 0)];
        for i in 2..6 {
            opp3.push(opp3[i - 2].multiply(&w[4]));
        }

        let opp4 = vec![
            v(0, 1, 0),
            v(0, 2, 0),
            v(0, 1, 0).multiply(&w[4]),
            LatticeValue::zero(),
            v(2, 2, 1).multiply(&w[7]),
            v(1, 1, 0).multiply(&w[7]),
            v(1, -1, 0),
            LatticeValue::zero(),
        ];

        let opp5 = vec![
            v(0, 1, 0),
            LatticeValue::zero(),
            v(2, 2, 1).multiply(&w[3]),
            v(1, 1, 0).multiply(&w[3]),
            v(2, 2, 1).multiply(&w[5]),
            v(1, 1, 0).multiply(&w[5]),
            v(2, 2, 1).multiply(&w[7]),
            v(1, 1, 0).multiply(&w[7]),
            v(1, -1, 0),
            LatticeValue::zero(),
        ];

        let mut opp6 = vec![v(2, 2, 1), v(1, 1, 0)];
        for i in 2..12 {
            opp6.push(opp6[i - 2].multiply(&w[2]));
        }

        Self {
            star: [star3, star4, star5, star6].map(OrientedOffsets::from_base),
            opp: [opp3, opp4, opp5, opp6].map(OrientedOffsets::from_base),
        }
    }
}

static DIAMOND: LazyLock<DiamondTables> = LazyLock::new(DiamondTables::build);

/// The process-wide diamond-kite tables.
#[must_use]
pub fn diamond_tables() -> &'static DiamondTables {
    &DIAMOND
}

/// The eight kite-fractal type codes, in table order.
pub const KITE_KINDS: [u8; 8] = [20, 31, 32, 41, 42, 43, 50, 60];

/// Neighbor count of a kite-fractal kind: the tens digit of its code.
#[must_use]
pub const fn kite_degree(kind: u8) -> u8 {
    kind / 10
}

fn kite_index(kind: u8) -> Option<usize> {
    KITE_KINDS.iter().position(|&code| code == kind)
}

/// Topology tables for the kite-fractal family, indexed by type code.
#[derive(Debug)]
pub struct KiteTables {
    star: [OrientedOffsets; 8],
    opp: [OrientedOffsets; 8],
}

impl KiteTables {
    /// Star row for `kind` at orientation `k` (length `kind/10`).
    #[must_use]
    pub fn star(&self, kind: u8, k: u8) -> Option<&[LatticeValue]> {
        kite_index(kind).map(|i| self.star[i].row(k))
    }

    /// Opposite row for `kind` at orientation `k` (length `kind/10`,
    /// one less for codes below 40).
    #[must_use]
    pub fn opposites(&self, kind: u8, k: u8) -> Option<&[LatticeValue]> {
        kite_index(kind).map(|i| self.opp[i].row(k))
    }

    fn build() -> Self {
        let w = directions();
        let v = LatticeValue::from_ints;

        let star20 = vec![w[4].clone(), w[8].clone()];
        let star31 = vec![w[3].clone(), w[6].clone(), w[9].clone()];
        let star32 = vec![w[2].clone(), w[6].clone(), w[10].clone()];
        let star41 = vec![w[3].clone(), w[6].clone(), w[9].clone(), v(1, 0, 1)];
        let star42 = vec![w[2].clone(), w[6].clone(), w[10].clone(), w[0].clone()];
        let star43 = vec![w[3].clone(), w[6].clone(), w[9].clone(), w[0].clone()];
        let star50 = vec![
            w[4].clone(),
            w[8].clone(),
            w[10].clone(),
            w[0].clone(),
            w[2].clone(),
        ];
        let star60 = vec![
            w[0].clone(),
            w[2].clone(),
            w[4].clone(),
            w[6].clone(),
            w[8].clone(),
            w[10].clone(),
        ];

        let opp20 = vec![v(-2, 0, 0)];
        let opp31 = vec![v(-1, 1, 0), v(0, -1, 0)];
        let opp32 = vec![v(-2, 2, 0), v(0, -2, 0)];
        let opp41 = vec![v(-1, 1, 0), v(0, -1, 0), v(2, -1, 1), v(1, 1, 1)];
        let opp42 = vec![v(-2, 2, 0), v(0, -2, 0), v(4, -2, 1), v(2, 2, 1)];
        let opp43 = vec![v(-1, 1, 0), v(0, -1, 0), v(1, -1, 0), v(0, 1, 0)];
        let opp50 = vec![
            v(-2, 0, 0),
            v(2, 2, 1).multiply(&w[8]),
            v(2, 2, 1).multiply(&w[10]),
            v(2, 2, 1),
            v(2, 2, 1).multiply(&w[2]),
        ];
        let mut opp60 = vec![v(2, 2, 1)];
        for i in 1..6 {
            opp60.push(opp60[i - 1].multiply(&w[2]));
        }

        Self {
            star: [
                star20, star31, star32, star41, star42, star43, star50, star60,
            ]
            .map(OrientedOffsets::from_base),
            opp: [opp20, opp31, opp32, opp41, opp42, opp43, opp50, opp60]
                .map(OrientedOffsets::from_base),
        }
    }
}

static KITE: LazyLock<KiteTables> = LazyLock::new(KiteTables::build);

/// The process-wide kite-fractal tables.
#[must_use]
pub fn kite_tables() -> &'static KiteTables {
    &KITE
}
