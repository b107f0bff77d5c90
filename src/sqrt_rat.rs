//! Exact values of the form `c·√r` with rational `c` and `r`.

use num::rational::{BigRational, Ratio};
use num::{Integer, One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Mul, Neg};

/// A signed square root: `coef · √rad`, both exact rationals.
///
/// The engine produces these with `rad` square-free (numerator and
/// denominator in lowest terms contain no repeated prime factor), which
/// `Mul` preserves.  `rad` is never negative.  Zero is stored as
/// `0 · √1` so that equal values compare equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedSqrt {
    coef: BigRational,
    rad: BigRational,
}

impl SignedSqrt {
    pub fn new(coef: BigRational, rad: BigRational) -> Self {
        assert!(!rad.is_negative(), "radicand must be nonnegative");
        if coef.is_zero() || rad.is_zero() {
            return Self::zero();
        }
        SignedSqrt { coef, rad }
    }

    pub fn zero() -> Self {
        SignedSqrt {
            coef: BigRational::zero(),
            rad: BigRational::one(),
        }
    }

    pub fn one() -> Self {
        SignedSqrt {
            coef: BigRational::one(),
            rad: BigRational::one(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coef.is_zero()
    }

    /// The rational prefactor, which carries the sign.
    pub fn coef(&self) -> &BigRational {
        &self.coef
    }

    /// The radicand.
    pub fn rad(&self) -> &BigRational {
        &self.rad
    }

    pub fn signum(&self) -> i32 {
        if self.coef.is_negative() {
            -1
        } else if self.coef.is_zero() {
            0
        } else {
            1
        }
    }

    /// The exact square of the value: `coef² · rad`.
    pub fn squared(&self) -> BigRational {
        &self.coef * &self.coef * &self.rad
    }

    /// Nearest `f64`.  This is the only lossy operation on the type.
    pub fn to_f64(&self) -> f64 {
        self.signum() as f64 * ratio_to_f64(&self.squared().abs()).sqrt()
    }
}

impl Neg for SignedSqrt {
    type Output = Self;
    fn neg(self) -> Self {
        SignedSqrt {
            coef: -self.coef,
            rad: self.rad,
        }
    }
}

impl Mul for SignedSqrt {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        // For square-free a/b and c/d the products pair up as
        // ac = gcd(a,c)²·a'c' and bd = gcd(b,d)²·b'd' with coprime
        // square-free cofactors, so the radicand stays square-free and the
        // extracted squares move into the prefactor exactly.
        let n1 = self.rad.numer().clone();
        let d1 = self.rad.denom().clone();
        let n2 = other.rad.numer().clone();
        let d2 = other.rad.denom().clone();
        let gn = n1.gcd(&n2);
        let gd = d1.gcd(&d2);
        let rad = Ratio::new((&n1 / &gn) * (&n2 / &gn), (&d1 / &gd) * (&d2 / &gd));
        let coef = self.coef * other.coef * Ratio::new(gn, gd);
        SignedSqrt::new(coef, rad)
    }
}

impl Mul<BigRational> for SignedSqrt {
    type Output = Self;
    fn mul(self, other: BigRational) -> Self {
        SignedSqrt::new(self.coef * other, self.rad)
    }
}

impl fmt::Display for SignedSqrt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}·√({})", self.coef, self.rad)
    }
}

impl From<SignedSqrt> for f64 {
    fn from(s: SignedSqrt) -> f64 {
        s.to_f64()
    }
}

/// `f64` value of a big rational.  Oversized operands are shifted down in
/// lockstep until both fit, so the quotient survives even when numerator
/// and denominator individually overflow `f64`.
fn ratio_to_f64(r: &BigRational) -> f64 {
    let mut n = r.numer().clone();
    let mut d = r.denom().clone();
    loop {
        let nf = n.to_f64().unwrap_or(f64::INFINITY);
        let df = d.to_f64().unwrap_or(f64::INFINITY);
        if nf.is_finite() && df.is_finite() {
            return nf / df;
        }
        n = n >> 64;
        d = d >> 64;
    }
}
