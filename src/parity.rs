//! Parity data type.
use num::{BigInt, One, Zero};
use std::ops::{Add, Rem, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    #[inline]
    pub fn of<T: Rem<Output = T> + Zero + One>(i: T) -> Self {
        if (i % (T::one() + T::one())).is_zero() {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    #[inline]
    pub fn is_odd(self) -> bool {
        self == Parity::Odd
    }

    #[inline]
    pub fn sign_i32(self) -> i32 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }

    #[inline]
    pub fn sign_f64(self) -> f64 {
        match self {
            Parity::Even => 1.0,
            Parity::Odd => -1.0,
        }
    }

    pub fn sign_bigint(self) -> BigInt {
        BigInt::from(self.sign_i32())
    }
}

impl From<Parity> for i32 {
    #[inline]
    fn from(p: Parity) -> Self {
        match p {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

impl From<Parity> for u32 {
    #[inline]
    fn from(p: Parity) -> Self {
        match p {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

impl Add for Parity {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self::Output {
        let p1: i32 = self.into();
        let p2: i32 = other.into();
        Parity::of(p1 ^ p2)
    }
}

impl Sub for Parity {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        self + other
    }
}

impl Zero for Parity {
    #[inline]
    fn zero() -> Self {
        Parity::Even
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self == &Self::zero()
    }
}

#[inline]
pub fn sort2<T: Ord>(a: T, b: T) -> (Parity, T, T) {
    if b < a {
        (Parity::Odd, b, a)
    } else {
        (Parity::Even, a, b)
    }
}

#[inline]
pub fn sort3<T: Ord>(a: T, b: T, c: T) -> (Parity, T, T, T) {
    let (p, a, b) = sort2(a, b);
    if c < a {
        (p, c, a, b)
    } else if c < b {
        (p + Parity::Odd, a, c, b)
    } else {
        (p, a, b, c)
    }
}

#[inline]
pub fn sort4<T: Ord>(a: T, b: T, c: T, d: T) -> (Parity, T, T, T, T) {
    let (p, a, b, c) = sort3(a, b, c);
    if d < a {
        (p + Parity::Odd, d, a, b, c)
    } else if d < b {
        (p, a, d, b, c)
    } else if d < c {
        (p + Parity::Odd, a, b, d, c)
    } else {
        (p, a, b, c, d)
    }
}
