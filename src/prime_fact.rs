//! Exact arithmetic on prime-factorized integers.
//!
//! Factorial quotients in angular momentum coefficients are astronomically
//! large but share almost all of their prime content.  Keeping numbers as
//! exponent vectors over the prime sequence makes products, exact quotients,
//! and square splitting O(number of distinct primes), and big integers are
//! only materialized at the very end.

use super::utils::cast;
use num::{BigInt, One};
use std::ops::Mul;
use std::sync::Mutex;

lazy_static! {
    static ref TABLE: Mutex<FactorTable> = Mutex::new(FactorTable::new());
}

/// A positive integer stored as exponents over the prime sequence:
/// `pows[i]` is the exponent of the i-th prime.  Entries past the end are
/// zero; the last stored entry is kept nonzero so that equal values have
/// equal representations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimeFactors {
    pows: Vec<u32>,
}

impl PrimeFactors {
    #[inline]
    pub fn one() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.pows.is_empty()
    }

    fn trim(&mut self) {
        while self.pows.last() == Some(&0) {
            self.pows.pop();
        }
    }

    pub fn mul_assign(&mut self, other: &Self) {
        if self.pows.len() < other.pows.len() {
            self.pows.resize(other.pows.len(), 0);
        }
        for (i, &e) in other.pows.iter().enumerate() {
            self.pows[i] += e;
        }
    }

    /// Exact division.  Panics if `other` does not divide `self`; the
    /// callers only divide quantities that are divisible by construction,
    /// so hitting the panic means a broken invariant upstream.
    pub fn div_exact_assign(&mut self, other: &Self) {
        assert!(other.pows.len() <= self.pows.len(), "inexact division");
        for (i, &e) in other.pows.iter().enumerate() {
            assert!(self.pows[i] >= e, "inexact division");
            self.pows[i] -= e;
        }
        self.trim();
    }

    /// Remove the common factor of a numerator/denominator pair, leaving
    /// the two coprime.
    pub fn cancel(num: &mut Self, den: &mut Self) {
        let n = num.pows.len().min(den.pows.len());
        for i in 0..n {
            let g = num.pows[i].min(den.pows[i]);
            num.pows[i] -= g;
            den.pows[i] -= g;
        }
        num.trim();
        den.trim();
    }

    /// Least common multiple, used to build common denominators.
    pub fn lcm_assign(&mut self, other: &Self) {
        if self.pows.len() < other.pows.len() {
            self.pows.resize(other.pows.len(), 0);
        }
        for (i, &e) in other.pows.iter().enumerate() {
            self.pows[i] = self.pows[i].max(e);
        }
    }

    /// Split into a perfect square root and a square-free residue:
    /// `self == square² · free`, with every exponent of `free` equal to one.
    pub fn split_square(&self) -> (PrimeFactors, PrimeFactors) {
        let mut square = PrimeFactors {
            pows: self.pows.iter().map(|&e| e / 2).collect(),
        };
        let mut free = PrimeFactors {
            pows: self.pows.iter().map(|&e| e % 2).collect(),
        };
        square.trim();
        free.trim();
        (square, free)
    }

    /// Iterate over `(prime, exponent)` pairs with nonzero exponent.
    pub fn factors(&self) -> Vec<(u32, u32)> {
        let ps = primes(self.pows.len());
        self.pows
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e > 0)
            .map(|(i, &e)| (ps[i], e))
            .collect()
    }

    pub fn to_bigint(&self) -> BigInt {
        let mut b = BigInt::one();
        for (p, e) in self.factors() {
            b = b * num::pow(BigInt::from(p), cast(e));
        }
        b
    }
}

impl<'a> Mul for &'a PrimeFactors {
    type Output = PrimeFactors;
    fn mul(self, other: &'a PrimeFactors) -> PrimeFactors {
        let mut r = self.clone();
        r.mul_assign(other);
        r
    }
}

/// Append-only table of prime numbers and factorial factorizations.
/// Shared process-wide behind a single coarse lock; it only ever grows.
struct FactorTable {
    primes: Vec<u32>,
    facts: Vec<PrimeFactors>,
}

impl FactorTable {
    fn new() -> Self {
        FactorTable {
            primes: vec![2],
            facts: vec![PrimeFactors::one()],
        }
    }

    /// The i-th prime, extending the list as needed.  The list always
    /// contains every prime up to the square of its last entry, so trial
    /// division against the stored primes suffices for candidates.
    fn prime(&mut self, i: usize) -> u32 {
        while self.primes.len() <= i {
            let mut c = self.primes.last().unwrap() + 1;
            loop {
                let is_prime = self
                    .primes
                    .iter()
                    .take_while(|&&p| (p as u64) * (p as u64) <= c as u64)
                    .all(|&p| c % p != 0);
                if is_prime {
                    break;
                }
                c += 1;
            }
            self.primes.push(c);
        }
        self.primes[i]
    }

    fn factorize(&mut self, mut n: u32) -> PrimeFactors {
        let mut pows = Vec::new();
        let mut i = 0;
        while n > 1 {
            let p = self.prime(i);
            let mut e = 0;
            while n % p == 0 {
                n /= p;
                e += 1;
            }
            pows.push(e);
            i += 1;
        }
        let mut r = PrimeFactors { pows };
        r.trim();
        r
    }

    /// Factorization of `n!`, grown incrementally from `(n−1)!`.
    fn factorial(&mut self, n: u32) -> PrimeFactors {
        let n: usize = cast(n);
        while self.facts.len() <= n {
            let i: u32 = cast(self.facts.len());
            let f = self.factorize(i);
            let mut next = self.facts.last().unwrap().clone();
            next.mul_assign(&f);
            self.facts.push(next);
        }
        self.facts[n].clone()
    }
}

/// Factorization of `n!` from the global table.
pub fn primefactorial(n: u32) -> PrimeFactors {
    TABLE.lock().unwrap().factorial(n)
}

/// Factorization of a single positive integer.
pub fn primefactorize(n: u32) -> PrimeFactors {
    assert!(n > 0);
    TABLE.lock().unwrap().factorize(n)
}

/// Factorization of the binomial coefficient `n` choose `k`.
pub fn primebinomial(n: u32, k: u32) -> PrimeFactors {
    assert!(k <= n);
    let mut table = TABLE.lock().unwrap();
    let mut b = table.factorial(n);
    let fk = table.factorial(k);
    let fnk = table.factorial(n - k);
    b.div_exact_assign(&fk);
    b.div_exact_assign(&fnk);
    b
}

/// The first `len` primes.
pub fn primes(len: usize) -> Vec<u32> {
    let mut table = TABLE.lock().unwrap();
    if len > 0 {
        table.prime(len - 1);
    }
    table.primes[..len].to_vec()
}

#[cfg(test)]
mod tests {
    use super::super::internal::{binomial, factorial};
    use super::*;

    #[test]
    fn test_primes() {
        assert_eq!(primes(10), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_factorial_roundtrip() {
        for n in 0..30 {
            assert_eq!(
                primefactorial(n).to_bigint(),
                factorial(n as i32),
                "{}!",
                n
            );
        }
    }

    #[test]
    fn test_binomial() {
        for n in 0..20 {
            for k in 0..=n {
                assert_eq!(
                    primebinomial(n, k).to_bigint(),
                    binomial(n as i32, k as i32),
                    "C({}, {})",
                    n,
                    k
                );
            }
        }
    }

    #[test]
    fn test_cancel() {
        // 10! / 7! = 720
        let mut num = primefactorial(10);
        let mut den = primefactorial(7);
        PrimeFactors::cancel(&mut num, &mut den);
        assert!(den.is_one());
        assert_eq!(num.to_bigint(), BigInt::from(720));
    }

    #[test]
    fn test_split_square() {
        let f = primefactorial(12);
        let (square, free) = f.split_square();
        let s = square.to_bigint();
        let r = free.to_bigint();
        assert_eq!(&s * &s * &r, f.to_bigint());
        // square-free part has no repeated prime factor
        for (_, e) in free.factors() {
            assert_eq!(e, 1);
        }
    }

    #[test]
    fn test_eq_trimmed() {
        let mut a = primefactorial(6); // 2^4 · 3^2 · 5
        let b = a.clone();
        let five = {
            let mut x = primefactorial(5);
            let mut y = primefactorial(4);
            PrimeFactors::cancel(&mut x, &mut y);
            x
        };
        a.div_exact_assign(&five);
        a.mul_assign(&five);
        assert_eq!(a, b);
    }
}
