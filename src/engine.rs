//! Coefficient evaluation: validation, canonicalization, and caching.
//!
//! One bounded cache per symbol kind, shared process-wide behind coarse
//! locks.  Values are computed outside the locks; two threads racing on
//! the same miss both compute the same deterministic value and the second
//! insert is a harmless overwrite.

use super::canon::{self, Key3jm, Key6j, NINEJ_SYMMETRIES};
use super::half::Half;
use super::internal::triangle_condition;
use super::lru::LruCache;
use super::parity::Parity;
use super::series;
use super::sqrt_rat::SignedSqrt;
use std::hash::Hash;
use std::sync::Mutex;

quick_error! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Error {
        /// An angular momentum magnitude is negative.
        NegativeJ {}
        /// A projection exceeds its magnitude, or is not in the multiplet
        /// of its magnitude (`j + m` must be an integer).
        ProjectionOutOfRange {}
    }
}

/// Default bound on the number of entries in each symbol cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000_000;

lazy_static! {
    static ref CACHE_3JM: Mutex<LruCache<Key3jm, SignedSqrt>> =
        Mutex::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static ref CACHE_6J: Mutex<LruCache<Key6j, SignedSqrt>> =
        Mutex::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
    static ref CACHE_9J: Mutex<LruCache<[i32; 9], SignedSqrt>> =
        Mutex::new(LruCache::new(DEFAULT_CACHE_CAPACITY));
}

/// Selects one of the per-symbol caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Wigner3jm,
    Wigner6j,
    Wigner9j,
}

/// Bound the number of cached entries for one symbol kind, evicting
/// immediately.  A capacity of zero disables caching; every call then
/// recomputes, which is slower but still exact.
pub fn set_cache_capacity(kind: SymbolKind, max_entries: usize) {
    match kind {
        SymbolKind::Wigner3jm => CACHE_3JM.lock().unwrap().resize(max_entries),
        SymbolKind::Wigner6j => CACHE_6J.lock().unwrap().resize(max_entries),
        SymbolKind::Wigner9j => CACHE_9J.lock().unwrap().resize(max_entries),
    }
}

fn cached<K, F>(cache: &Mutex<LruCache<K, SignedSqrt>>, key: K, compute: F) -> SignedSqrt
where
    K: Hash + Eq + Clone,
    F: FnOnce(&K) -> SignedSqrt,
{
    if let Some(v) = cache.lock().unwrap().get(&key) {
        return v.clone();
    }
    let v = compute(&key);
    cache.lock().unwrap().insert(key, v.clone());
    v
}

fn apply_sign(sign: Parity, value: SignedSqrt) -> SignedSqrt {
    if sign.is_odd() {
        -value
    } else {
        value
    }
}

fn check_jm(tj: i32, tm: i32) -> Result<(), Error> {
    if tj < 0 {
        return Err(Error::NegativeJ);
    }
    if tm.abs() > tj || (tj + tm) % 2 != 0 {
        return Err(Error::ProjectionOutOfRange);
    }
    Ok(())
}

/// Exact Wigner 3-jm symbol `(j1 j2 j3; m1 m2 m3)` from twice-values.
/// Invalid magnitudes or projections are errors; a violated triangle
/// condition or non-conserving projections give an exact zero.
pub fn wigner_3jm(
    tj1: i32,
    tm1: i32,
    tj2: i32,
    tm2: i32,
    tj3: i32,
    tm3: i32,
) -> Result<SignedSqrt, Error> {
    check_jm(tj1, tm1)?;
    check_jm(tj2, tm2)?;
    check_jm(tj3, tm3)?;
    if tm1 + tm2 + tm3 != 0 || !triangle_condition(tj1, tj2, tj3) {
        return Ok(SignedSqrt::zero());
    }
    let (key, sign) = canon::canonical_3jm(
        [Half(tj1), Half(tj2), Half(tj3)],
        [Half(tm1), Half(tm2), Half(tm3)],
    );
    let value = cached(&CACHE_3JM, key, |&k| series::compute_3jm(k));
    Ok(apply_sign(sign, value))
}

/// Exact Wigner 6-j symbol `{j1 j2 j3; j4 j5 j6}` from twice-values.
/// Any of the four triads failing its triangle condition gives zero.
pub fn wigner_6j(
    tj1: i32,
    tj2: i32,
    tj3: i32,
    tj4: i32,
    tj5: i32,
    tj6: i32,
) -> Result<SignedSqrt, Error> {
    for &tj in &[tj1, tj2, tj3, tj4, tj5, tj6] {
        if tj < 0 {
            return Err(Error::NegativeJ);
        }
    }
    if !(triangle_condition(tj1, tj2, tj3)
        && triangle_condition(tj1, tj5, tj6)
        && triangle_condition(tj4, tj2, tj6)
        && triangle_condition(tj4, tj5, tj3))
    {
        return Ok(SignedSqrt::zero());
    }
    let key = canon::canonical_6j([
        Half(tj1), Half(tj2), Half(tj3),
        Half(tj4), Half(tj5), Half(tj6),
    ]);
    Ok(cached(&CACHE_6J, key, |&k| series::compute_6j(k)))
}

/// Exact Wigner 9-j symbol from the twice-values of its 3×3 parameter
/// array in row-major order.  Any of the six row/column triads failing
/// its triangle condition gives zero.
///
/// There is no cheap canonical form, so the cache is probed with all 72
/// symmetry images before computing; a hit through an odd image pays the
/// phase `(−1)^(Σ of all nine j)`.
pub fn wigner_9j(tjs: [i32; 9]) -> Result<SignedSqrt, Error> {
    for &tj in &tjs {
        if tj < 0 {
            return Err(Error::NegativeJ);
        }
    }
    let triad = |a: usize, b: usize, c: usize| triangle_condition(tjs[a], tjs[b], tjs[c]);
    if !(triad(0, 1, 2)
        && triad(3, 4, 5)
        && triad(6, 7, 8)
        && triad(0, 3, 6)
        && triad(1, 4, 7)
        && triad(2, 5, 8))
    {
        return Ok(SignedSqrt::zero());
    }
    let jsum = Parity::of(tjs.iter().sum::<i32>() / 2);
    {
        let mut cache = CACHE_9J.lock().unwrap();
        for sym in NINEJ_SYMMETRIES.iter() {
            let image = canon::apply_9j(&sym.perm, &tjs);
            if let Some(v) = cache.get(&image) {
                let sign = match sym.phase {
                    Parity::Even => Parity::Even,
                    Parity::Odd => jsum,
                };
                let v = v.clone();
                return Ok(apply_sign(sign, v));
            }
        }
    }
    let value = series::compute_9j(&tjs);
    CACHE_9J.lock().unwrap().insert(tjs, value.clone());
    Ok(value)
}
