//! Parameter structs for the coupling coefficients.
//!
//! All fields hold twice the logical value (`tj1 = 2·j1`), which keeps
//! half-integers exact in plain `i32`s; see [`Half`](../half/struct.Half.html).
//! `value()` panics on invalid magnitudes or projections, `try_value()`
//! reports them; a coupling that is merely forbidden (triangle or
//! projection-conservation failure) is an exact zero, not an error.

use super::engine::{self, Error};
use super::half::Half;
use super::parity::Parity;
use super::prime_fact::primefactorize;
use super::series;
use super::sqrt_rat::SignedSqrt;
use num::rational::Ratio;

/// `√n` for a positive integer, square part extracted exactly.
fn sqrt_unsigned(n: u32) -> SignedSqrt {
    let (square, free) = primefactorize(n).split_square();
    SignedSqrt::new(
        Ratio::from_integer(square.to_bigint()),
        Ratio::from_integer(free.to_bigint()),
    )
}

fn phase_parity(twice_exponent: i32) -> Parity {
    debug_assert_eq!(twice_exponent % 2, 0);
    Parity::of(twice_exponent / 2)
}

fn apply_phase(sign: Parity, value: SignedSqrt) -> SignedSqrt {
    if sign.is_odd() {
        -value
    } else {
        value
    }
}

/// Wigner 3-jm symbol `(j1 j2 j3; m1 m2 m3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wigner3jm {
    pub tj1: i32,
    pub tm1: i32,
    pub tj2: i32,
    pub tm2: i32,
    pub tj3: i32,
    pub tm3: i32,
}

impl Wigner3jm {
    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        engine::wigner_3jm(self.tj1, self.tm1, self.tj2, self.tm2, self.tj3, self.tm3)
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid 3-jm symbol arguments")
    }
}

/// Clebsch–Gordan coefficient `⟨j1 m1 j2 m2 | j12 m12⟩`.
///
/// Related to the 3-jm symbol by
/// `(−1)^(j1−j2+m12) √(2·j12+1) (j1 j2 j12; m1 m2 −m12)`
/// (Condon–Shortley convention).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClebschGordan {
    pub tj1: i32,
    pub tj2: i32,
    pub tj12: i32,
    pub tm1: i32,
    pub tm2: i32,
    pub tm12: i32,
}

impl ClebschGordan {
    /// The same coefficient with `m12` inferred from conservation.
    pub fn with_tm12_inferred(tj1: i32, tm1: i32, tj2: i32, tm2: i32, tj12: i32) -> Self {
        ClebschGordan {
            tj1,
            tj2,
            tj12,
            tm1,
            tm2,
            tm12: tm1 + tm2,
        }
    }

    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        let w3 = Wigner3jm {
            tj1: self.tj1,
            tm1: self.tm1,
            tj2: self.tj2,
            tm2: self.tm2,
            tj3: self.tj12,
            tm3: -self.tm12,
        }
        .try_value()?;
        if w3.is_zero() {
            return Ok(w3);
        }
        let sign = phase_parity(self.tj1 - self.tj2 + self.tm12);
        Ok(apply_phase(sign, w3 * sqrt_unsigned(self.tj12 as u32 + 1)))
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid Clebsch-Gordan arguments")
    }
}

/// Wigner 6-j symbol `{j1 j2 j3; j4 j5 j6}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wigner6j {
    pub tj1: i32,
    pub tj2: i32,
    pub tj3: i32,
    pub tj4: i32,
    pub tj5: i32,
    pub tj6: i32,
}

impl Wigner6j {
    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        engine::wigner_6j(self.tj1, self.tj2, self.tj3, self.tj4, self.tj5, self.tj6)
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid 6-j symbol arguments")
    }
}

/// Wigner 9-j symbol, parameters in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wigner9j {
    pub tj1: i32,
    pub tj2: i32,
    pub tj3: i32,
    pub tj4: i32,
    pub tj5: i32,
    pub tj6: i32,
    pub tj7: i32,
    pub tj8: i32,
    pub tj9: i32,
}

impl Wigner9j {
    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        engine::wigner_9j([
            self.tj1, self.tj2, self.tj3,
            self.tj4, self.tj5, self.tj6,
            self.tj7, self.tj8, self.tj9,
        ])
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid 9-j symbol arguments")
    }
}

/// Racah V coefficient `V(j1 j2 j3; m1 m2 m3)`:
/// `(−1)^(−j1+j2+j3) (j1 j2 j3; m1 m2 m3)` (Edmonds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RacahV {
    pub tj1: i32,
    pub tm1: i32,
    pub tj2: i32,
    pub tm2: i32,
    pub tj3: i32,
    pub tm3: i32,
}

impl RacahV {
    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        let w3 = Wigner3jm {
            tj1: self.tj1,
            tm1: self.tm1,
            tj2: self.tj2,
            tm2: self.tm2,
            tj3: self.tj3,
            tm3: self.tm3,
        }
        .try_value()?;
        if w3.is_zero() {
            return Ok(w3);
        }
        Ok(apply_phase(
            phase_parity(-self.tj1 + self.tj2 + self.tj3),
            w3,
        ))
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid Racah V arguments")
    }
}

/// Racah W coefficient `W(j1 j2 j3 j4; j5 j6)`:
/// `(−1)^(j1+j2+j3+j4) {j1 j2 j5; j4 j3 j6}` (Edmonds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RacahW {
    pub tj1: i32,
    pub tj2: i32,
    pub tj3: i32,
    pub tj4: i32,
    pub tj5: i32,
    pub tj6: i32,
}

impl RacahW {
    pub fn try_value(self) -> Result<SignedSqrt, Error> {
        let w6 = Wigner6j {
            tj1: self.tj1,
            tj2: self.tj2,
            tj3: self.tj5,
            tj4: self.tj4,
            tj5: self.tj3,
            tj6: self.tj6,
        }
        .try_value()?;
        if w6.is_zero() {
            return Ok(w6);
        }
        Ok(apply_phase(
            phase_parity(self.tj1 + self.tj2 + self.tj3 + self.tj4),
            w6,
        ))
    }

    pub fn value(self) -> SignedSqrt {
        self.try_value().expect("invalid Racah W arguments")
    }
}

/// Exact `Δ(j1, j2, j3) = √Δ²`: zero when the triangle condition fails,
/// an error when a magnitude is negative.
pub fn triangle_coefficient(tj1: i32, tj2: i32, tj3: i32) -> Result<SignedSqrt, Error> {
    if tj1 < 0 || tj2 < 0 || tj3 < 0 {
        return Err(Error::NegativeJ);
    }
    if !super::internal::triangle_condition(tj1, tj2, tj3) {
        return Ok(SignedSqrt::zero());
    }
    Ok(series::triangle_coefficient(Half(tj1), Half(tj2), Half(tj3)))
}
