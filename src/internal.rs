//! Big-integer factorial helpers shared with downstream code.

use num::{BigInt, One};

/// Returns `(-1)^phi`.
#[inline]
pub fn phase(phi: i32) -> i32 {
    if phi % 2 == 0 {
        1
    } else {
        -1
    }
}

/// `n!` as a big integer.  Panics if `n` is negative.
pub fn factorial(n: i32) -> BigInt {
    assert!(n >= 0);
    let mut b = BigInt::one();
    for i in 2..=n {
        b = b * BigInt::from(i);
    }
    b
}

/// The falling factorial `n · (n−1) ⋯ (n−k+1)`, i.e. `n!/(n−k)!`.
pub fn falling_factorial(n: i32, k: i32) -> BigInt {
    assert!(0 <= k && k <= n);
    let mut b = BigInt::one();
    for i in (n - k + 1)..=n {
        b = b * BigInt::from(i);
    }
    b
}

/// The binomial coefficient `n` choose `k`.
pub fn binomial(n: i32, k: i32) -> BigInt {
    falling_factorial(n, k) / factorial(k)
}

/// Triangle condition on twice-value angular momenta: each of the three is
/// bounded by the sum of the other two, and the total is an integer.
#[inline]
pub fn triangle_condition(tj1: i32, tj2: i32, tj3: i32) -> bool {
    (tj1 - tj2).abs() <= tj3 && tj3 <= tj1 + tj2 && (tj1 + tj2 + tj3) % 2 == 0
}
