//! Exact 3-adic lattice coordinates.
//!
//! Points live in the ring generated by `ω` with `ω² = ω − 1` (a rescaled
//! Eisenstein lattice). A [`LatticeValue`] `(a, b, m)` denotes the exact
//! rational point `(a + b·ω) / 3^m`. Refinement divides step lengths by
//! powers of three, so denominators stay pure powers of 3 and all
//! arithmetic remains exact.

use nalgebra::Point2;
use num_bigint::BigInt;
use num_traits::{Pow, ToPrimitive, Zero};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Real part of the primitive constant `ω` embedded in the plane.
const PRIMITIVE_RE: f64 = 0.5;

/// Imaginary part of the primitive constant `ω` embedded in the plane.
const PRIMITIVE_IM: f64 = 0.866_025_403_784_438_6;

/// An exact lattice point `(a + b·ω) / 3^m` with `ω² = ω − 1`.
///
/// Values are always held in normalized form: either `m == 0` or at least
/// one of `a`, `b` is not divisible by 3. Two values are equal iff their
/// normalized triples are equal, which makes `LatticeValue` usable as a
/// deduplication key.
///
/// Numerators are arbitrary-precision: at refinement depth `R` they grow
/// like `3^R`, which overflows any fixed-width integer long before useful
/// depths are reached.
///
/// # Example
///
/// ```
/// use tiling_types::LatticeValue;
///
/// // (3 + 6ω)/3 normalizes to 1 + 2ω
/// let v = LatticeValue::from_ints(3, 6, 1);
/// assert_eq!(v, LatticeValue::from_ints(1, 2, 0));
/// assert_eq!(v.m(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeValue {
    a: BigInt,
    b: BigInt,
    m: u32,
}

/// 3^m as a big integer.
fn pow3(m: u32) -> BigInt {
    BigInt::from(3).pow(m)
}

fn divisible_by_3(x: &BigInt) -> bool {
    (x % BigInt::from(3)).is_zero()
}

impl LatticeValue {
    /// Create a normalized lattice value from big-integer numerators.
    #[must_use]
    pub fn new(mut a: BigInt, mut b: BigInt, mut m: u32) -> Self {
        let three = BigInt::from(3);
        while m > 0 && divisible_by_3(&a) && divisible_by_3(&b) {
            a = &a / &three;
            b = &b / &three;
            m -= 1;
        }
        Self { a, b, m }
    }

    /// Create a normalized lattice value from machine integers.
    ///
    /// Convenience for table constants and seed meshes; refined
    /// coordinates are produced by [`offset`](Self::offset) and
    /// [`multiply`](Self::multiply) instead.
    #[must_use]
    pub fn from_ints(a: i64, b: i64, m: u32) -> Self {
        Self::new(BigInt::from(a), BigInt::from(b), m)
    }

    /// The origin, `0`.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_ints(0, 0, 0)
    }

    /// The multiplicative identity, `1`.
    #[must_use]
    pub fn one() -> Self {
        Self::from_ints(1, 0, 0)
    }

    /// Numerator of the rational part.
    #[must_use]
    pub const fn a(&self) -> &BigInt {
        &self.a
    }

    /// Numerator of the `ω` part.
    #[must_use]
    pub const fn b(&self) -> &BigInt {
        &self.b
    }

    /// Scale exponent: the denominator is `3^m`.
    #[must_use]
    pub const fn m(&self) -> u32 {
        self.m
    }

    /// Translate by a direction vector scaled to a refinement level.
    ///
    /// This is lattice addition with the 3-adic rescaling rule: the
    /// direction is divided by `3^(level/2)` (integer division — odd
    /// levels reuse the previous power because odd directions are already
    /// the shorter step), then both operands are brought to a common
    /// denominator and added.
    ///
    /// # Example
    ///
    /// ```
    /// use tiling_types::LatticeValue;
    ///
    /// let origin = LatticeValue::zero();
    /// let east = LatticeValue::one();
    /// assert_eq!(origin.offset(&east, 0), east);
    /// // two levels deeper, the same direction is a third as long
    /// assert_eq!(origin.offset(&east, 2), LatticeValue::from_ints(1, 0, 1));
    /// ```
    #[must_use]
    pub fn offset(&self, dir: &Self, level: u32) -> Self {
        let m2 = dir.m + level / 2;
        let d1 = pow3(self.m);
        let d2 = pow3(m2);
        let a = &d2 * &self.a + &d1 * &dir.a;
        let b = &d2 * &self.b + &d1 * &dir.b;
        Self::new(a, b, self.m + m2)
    }

    /// Ring multiplication under `ω² = ω − 1`.
    ///
    /// `(a₁ + b₁ω)(a₂ + b₂ω)` reduces to
    /// `(a₁a₂ − b₁b₂) + (a₂b₁ + a₁b₂ + b₁b₂)ω`; denominator exponents add.
    /// Commutative and associative, with [`one`](Self::one) as identity.
    ///
    /// # Example
    ///
    /// ```
    /// use tiling_types::LatticeValue;
    ///
    /// // ω · ω = ω − 1
    /// let w = LatticeValue::from_ints(0, 1, 0);
    /// assert_eq!(w.multiply(&w), LatticeValue::from_ints(-1, 1, 0));
    /// ```
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.a * &other.a - &self.b * &other.b;
        let b = &other.a * &self.b + &self.a * &other.b + &self.b * &other.b;
        Self::new(a, b, self.m + other.m)
    }

    /// Additive inverse.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            a: -&self.a,
            b: -&self.b,
            m: self.m,
        }
    }

    /// Embed into the plane via `ω ↦ 0.5 + 0.866…i`.
    ///
    /// The embedding is approximate (`f64`) and intended for display and
    /// scalar-field evaluation only; the exact triple remains the
    /// authoritative coordinate.
    #[must_use]
    pub fn to_point(&self) -> Point2<f64> {
        let scale = 3f64.powi(i32::try_from(self.m).unwrap_or(i32::MAX));
        let a = self.a.to_f64().unwrap_or(f64::NAN);
        let b = self.b.to_f64().unwrap_or(f64::NAN);
        Point2::new(b.mul_add(PRIMITIVE_RE, a) / scale, b * PRIMITIVE_IM / scale)
    }
}

impl fmt::Display for LatticeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.m == 0 {
            write!(f, "{}+{}w", self.a, self.b)
        } else {
            write!(f, "({}+{}w)/3^{}", self.a, self.b, self.m)
        }
    }
}
