//! Exact finite-sum evaluation of the coefficient formulas.
//!
//! Every sum follows the same discipline: each term is built as a
//! factorized numerator/denominator pair, all terms are brought onto one
//! common denominator, the numerators are summed as big integers, and the
//! denominator is then reduced by trial division over its own prime set
//! only.  Nothing is ever rounded and no generic factorization of a big
//! integer is ever attempted.

use super::canon::{Key3jm, Key6j};
use super::half::Half;
use super::parity::Parity;
use super::prime_fact::{primebinomial, primefactorial, PrimeFactors};
use super::sqrt_rat::SignedSqrt;
use super::utils::cast;
use num::rational::Ratio;
use num::{BigInt, One, Zero};

struct Term {
    sign: Parity,
    num: PrimeFactors,
    den: PrimeFactors,
}

/// Sum exact terms over a common denominator.  Returns the reduced
/// numerator and denominator; the two are coprime on return.
fn sum_series(terms: Vec<Term>) -> (BigInt, BigInt) {
    let mut denom = PrimeFactors::one();
    for t in &terms {
        denom.lcm_assign(&t.den);
    }
    let mut total = BigInt::zero();
    for t in terms {
        let mut scale = denom.clone();
        scale.div_exact_assign(&t.den);
        scale.mul_assign(&t.num);
        total = total + t.sign.sign_bigint() * scale.to_bigint();
    }
    if total.is_zero() {
        return (total, BigInt::one());
    }
    let mut rest = BigInt::one();
    for (prime, mut exp) in denom.factors() {
        let p = BigInt::from(prime);
        while exp > 0 && (&total % &p).is_zero() {
            total = total / &p;
            exp -= 1;
        }
        if exp > 0 {
            rest = rest * num::pow(p, cast(exp));
        }
    }
    (total, rest)
}

/// `√(num/den)` with the perfect square moved into the rational prefactor.
/// `num` and `den` should already be coprime.
fn split_to_sqrt(num: PrimeFactors, den: PrimeFactors) -> SignedSqrt {
    let (sq_n, sf_n) = num.split_square();
    let (sq_d, sf_d) = den.split_square();
    SignedSqrt::new(
        Ratio::new(sq_n.to_bigint(), sq_d.to_bigint()),
        Ratio::new(sf_n.to_bigint(), sf_d.to_bigint()),
    )
}

/// Factorized `Δ²(a, b, c)`:
/// `(a+b−c)! (a−b+c)! (−a+b+c)! / (a+b+c+1)!`.
/// The arguments must satisfy the triangle condition.
fn triangle_parts(a: Half<i32>, b: Half<i32>, c: Half<i32>) -> (PrimeFactors, PrimeFactors) {
    let f = |x: Half<i32>| primefactorial(cast(x.unwrap()));
    let mut num = f(a + b - c);
    num.mul_assign(&f(a - b + c));
    num.mul_assign(&f(-a + b + c));
    let den = f(a + b + c + Half(2));
    (num, den)
}

/// Exact `Δ(a, b, c) = √Δ²` as a rational square root.
pub fn triangle_coefficient(a: Half<i32>, b: Half<i32>, c: Half<i32>) -> SignedSqrt {
    let (mut num, mut den) = triangle_parts(a, b, c);
    PrimeFactors::cancel(&mut num, &mut den);
    split_to_sqrt(num, den)
}

/// The 3-jm magnitude for a canonical key: `√(Δ²·∏(j±m)!) · Σ`, where the
/// sum runs over `k ∈ [max(0,a1,a2), min(b1,b2,b3)]` with terms
/// `(−1)^k / (k!(k−a1)!(k−a2)!(b1−k)!(b2−k)!(b3−k)!)`.  The definitional
/// phase of the symbol is left to the canonicalization sign.
pub fn compute_3jm(key: Key3jm) -> SignedSqrt {
    let b1 = key.b1 as i32;
    let b2 = key.b2 as i32;
    let b3 = key.b3 as i32;
    let (a1, a2) = (key.a1, key.a2);
    let f = |n: i32| primefactorial(cast(n));

    // Δ²(j1,j2,j3) · (j1+m1)!(j1−m1)!(j2+m2)!(j2−m2)!(j3+m3)!(j3−m3)!
    let mut num = f(b1);
    num.mul_assign(&f(b2 - a1));
    num.mul_assign(&f(b3 - a2));
    num.mul_assign(&f(b1 - a1));
    num.mul_assign(&f(b2));
    num.mul_assign(&f(b1 - a2));
    num.mul_assign(&f(b3));
    num.mul_assign(&f(b2 - a2));
    num.mul_assign(&f(b3 - a1));
    let mut den = f(b1 + b2 + b3 - a1 - a2 + 1);
    PrimeFactors::cancel(&mut num, &mut den);

    let kmin = 0.max(a1).max(a2);
    let kmax = b1.min(b2).min(b3);
    let mut terms = Vec::new();
    for k in kmin..=kmax {
        let mut d = f(k);
        d.mul_assign(&f(k - a1));
        d.mul_assign(&f(k - a2));
        d.mul_assign(&f(b1 - k));
        d.mul_assign(&f(b2 - k));
        d.mul_assign(&f(b3 - k));
        terms.push(Term {
            sign: Parity::of(k),
            num: PrimeFactors::one(),
            den: d,
        });
    }
    let (top, bottom) = sum_series(terms);
    split_to_sqrt(num, den) * Ratio::new(top, bottom)
}

/// The 6-j value for a canonical key: `√(∏ four Δ²) · Σ`, with
/// `∏ Δ² = ∏_{i,j} (bj−ai)! / ∏_i (ai+1)!` and terms
/// `(−1)^k (k+1)! / (∏(k−ai)! ∏(bj−k)!)` over
/// `k ∈ [max(a1..a4), min(b1,b2,b3)]`.
pub fn compute_6j(key: Key6j) -> SignedSqrt {
    let bs = [key.b1 as i32, key.b2 as i32, key.b3 as i32];
    let a4 = (key.b1 + key.b2 + key.b3 - key.a1 - key.a2 - key.a3) as i32;
    let al = [key.a1 as i32, key.a2 as i32, key.a3 as i32, a4];
    let f = |n: i32| primefactorial(cast(n));

    let mut num = PrimeFactors::one();
    let mut den = PrimeFactors::one();
    for &a in &al {
        for &b in &bs {
            num.mul_assign(&f(b - a));
        }
        den.mul_assign(&f(a + 1));
    }
    PrimeFactors::cancel(&mut num, &mut den);

    let kmin = *al.iter().max().unwrap();
    let kmax = *bs.iter().min().unwrap();
    let mut terms = Vec::new();
    for k in kmin..=kmax {
        let mut d = PrimeFactors::one();
        for &a in &al {
            d.mul_assign(&f(k - a));
        }
        for &b in &bs {
            d.mul_assign(&f(b - k));
        }
        terms.push(Term {
            sign: Parity::of(k),
            num: f(k + 1),
            den: d,
        });
    }
    let (top, bottom) = sum_series(terms);
    split_to_sqrt(num, den) * Ratio::new(top, bottom)
}

/// One factor of the 9-j outer sum: the single 6-j series with the Δ² of
/// its `(a, e, f)` triad absorbed.  The absorbed factorials telescope into
/// four binomial coefficients per term, so the whole bracket is an exact
/// integer:
/// `Σ_t (−1)^t C(t+1, α2+1) C(β1−α3, β1−t) C(β2−α4, β2−t) C(β3−α1, β3−t)`.
fn wei_bracket(
    a: Half<i32>,
    b: Half<i32>,
    c: Half<i32>,
    d: Half<i32>,
    e: Half<i32>,
    f: Half<i32>,
) -> BigInt {
    let a1 = (a + b + c).unwrap();
    let a2 = (a + e + f).unwrap();
    let a3 = (d + b + f).unwrap();
    let a4 = (d + e + c).unwrap();
    let b1 = (a + b + d + e).unwrap();
    let b2 = (a + c + d + f).unwrap();
    let b3 = (b + c + e + f).unwrap();
    let lo = a1.max(a2).max(a3).max(a4);
    let hi = b1.min(b2).min(b3);
    let mut total = BigInt::zero();
    for t in lo..=hi {
        let mut x = primebinomial(cast(t + 1), cast(a2 + 1));
        x.mul_assign(&primebinomial(cast(b1 - a3), cast(b1 - t)));
        x.mul_assign(&primebinomial(cast(b2 - a4), cast(b2 - t)));
        x.mul_assign(&primebinomial(cast(b3 - a1), cast(b3 - t)));
        total = total + Parity::of(t).sign_bigint() * x.to_bigint();
    }
    total
}

/// The 9-j value from its nine half-integer parameters (twice values),
/// assumed to satisfy all six row/column triangle conditions:
/// `√(∏ six Δ²) · Σ_k (−1)^(2k) (2k+1) B1(k) B2(k) B3(k)`
/// over the intersection of the (j1,j9), (j4,j8), (j2,j6) triangular
/// ranges.  The brackets come from the standard expansion into three 6-j
/// symbols, each relabeled so that its k-carrying triad is the absorbed
/// one.  An empty intersection yields an exact zero.
pub fn compute_9j(tjs: &[i32; 9]) -> SignedSqrt {
    let j: Vec<Half<i32>> = tjs.iter().map(|&t| Half(t)).collect();
    const TRIADS: [(usize, usize, usize); 6] = [
        (0, 1, 2),
        (3, 4, 5),
        (6, 7, 8),
        (0, 3, 6),
        (1, 4, 7),
        (2, 5, 8),
    ];
    let mut num = PrimeFactors::one();
    let mut den = PrimeFactors::one();
    for &(a, b, c) in &TRIADS {
        let (n, d) = triangle_parts(j[a], j[b], j[c]);
        num.mul_assign(&n);
        den.mul_assign(&d);
    }
    PrimeFactors::cancel(&mut num, &mut den);

    let range = j[0]
        .tri_range(j[8])
        .intersect(j[3].tri_range(j[7]))
        .intersect(j[1].tri_range(j[5]));
    let mut total = BigInt::zero();
    for k in range {
        let b1 = wei_bracket(j[0], j[3], j[6], j[7], j[8], k);
        let b2 = wei_bracket(j[7], j[1], j[4], j[5], j[3], k);
        let b3 = wei_bracket(k, j[0], j[8], j[2], j[5], j[1]);
        let weight = BigInt::from(k.twice() + 1) * b1 * b2 * b3;
        total = total + Parity::of(k.twice()).sign_bigint() * weight;
    }
    split_to_sqrt(num, den) * Ratio::from_integer(total)
}
