extern crate num;
extern crate rand;
extern crate wigner_symbols;

use num::rational::{BigRational, Ratio};
use num::{BigInt, One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wigner_symbols::{
    set_cache_capacity, triangle_coefficient, triangle_condition, ClebschGordan, Error, RacahV,
    RacahW, SignedSqrt, SymbolKind, Wigner3jm, Wigner6j, Wigner9j, DEFAULT_CACHE_CAPACITY,
};

fn ratio(n: i64, d: i64) -> BigRational {
    Ratio::new(BigInt::from(n), BigInt::from(d))
}

fn exact(coef: BigRational, rad: BigRational) -> SignedSqrt {
    SignedSqrt::new(coef, rad)
}

fn w3(tj1: i32, tm1: i32, tj2: i32, tm2: i32, tj3: i32, tm3: i32) -> SignedSqrt {
    Wigner3jm { tj1, tm1, tj2, tm2, tj3, tm3 }.value()
}

fn w6(tj: [i32; 6]) -> SignedSqrt {
    Wigner6j {
        tj1: tj[0], tj2: tj[1], tj3: tj[2],
        tj4: tj[3], tj5: tj[4], tj6: tj[5],
    }
    .value()
}

fn w9(tj: [i32; 9]) -> SignedSqrt {
    Wigner9j {
        tj1: tj[0], tj2: tj[1], tj3: tj[2],
        tj4: tj[3], tj5: tj[4], tj6: tj[5],
        tj7: tj[6], tj8: tj[7], tj9: tj[8],
    }
    .value()
}

#[test]
fn test_3jm_values() {
    assert_eq!(w3(0, 0, 0, 0, 0, 0), SignedSqrt::one());
    // (1 1 2; 1 −1 0) = +√(1/30)
    let v = w3(2, 2, 2, -2, 4, 0);
    assert_eq!(v.squared(), ratio(1, 30));
    assert_eq!(v.signum(), 1);
    // (1/2 1/2 1/2 −1/2 1 0) = +√(1/6)
    let v = w3(1, 1, 1, -1, 2, 0);
    assert_eq!(v.squared(), ratio(1, 6));
    assert_eq!(v.signum(), 1);
}

#[test]
fn test_3jm_zero_cases() {
    // triangle violation: (1 1 5; 0 0 0)
    assert!(w3(2, 0, 2, 0, 10, 0).is_zero());
    // projections not conserved
    assert!(w3(2, 2, 2, 2, 4, 0).is_zero());
    // odd total j with all projections zero: (1 1 1; 0 0 0)
    assert!(w3(2, 0, 2, 0, 2, 0).is_zero());
}

#[test]
fn test_3jm_errors() {
    let bad = Wigner3jm { tj1: -2, tm1: 0, tj2: 2, tm2: 0, tj3: 2, tm3: 0 };
    assert_eq!(bad.try_value(), Err(Error::NegativeJ));
    // m out of range
    let bad = Wigner3jm { tj1: 2, tm1: 4, tj2: 2, tm2: -4, tj3: 2, tm3: 0 };
    assert_eq!(bad.try_value(), Err(Error::ProjectionOutOfRange));
    // m not in the multiplet of j: j = 1/2, m = 0
    let bad = Wigner3jm { tj1: 1, tm1: 0, tj2: 1, tm2: 0, tj3: 2, tm3: 0 };
    assert_eq!(bad.try_value(), Err(Error::ProjectionOutOfRange));
}

/// Random valid 3-jm parameter sets (twice values).
fn random_3jm(rng: &mut StdRng) -> Option<[i32; 6]> {
    let tj1: i32 = rng.gen_range(0..6);
    let tj2: i32 = rng.gen_range(0..6);
    let tj3 = rng.gen_range((tj1 - tj2).abs()..=tj1 + tj2);
    if (tj1 + tj2 + tj3) % 2 != 0 {
        return None;
    }
    let tm1 = rng.gen_range(0..=tj1) * 2 - tj1;
    let tm2 = rng.gen_range(0..=tj2) * 2 - tj2;
    let tm3 = -tm1 - tm2;
    if tm3.abs() > tj3 {
        return None;
    }
    Some([tj1, tm1, tj2, tm2, tj3, tm3])
}

#[test]
fn test_3jm_symmetries() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut checked = 0;
    while checked < 200 {
        let p = match random_3jm(&mut rng) {
            Some(p) => p,
            None => continue,
        };
        checked += 1;
        let [tj1, tm1, tj2, tm2, tj3, tm3] = p;
        let v = w3(tj1, tm1, tj2, tm2, tj3, tm3);
        // cyclic permutations leave the value unchanged
        assert_eq!(v, w3(tj2, tm2, tj3, tm3, tj1, tm1));
        assert_eq!(v, w3(tj3, tm3, tj1, tm1, tj2, tm2));
        // an odd permutation multiplies by (−1)^(j1+j2+j3)
        let swapped = w3(tj2, tm2, tj1, tm1, tj3, tm3);
        let flipped = w3(tj1, -tm1, tj2, -tm2, tj3, -tm3);
        if (tj1 + tj2 + tj3) % 4 == 0 {
            assert_eq!(swapped, v);
            assert_eq!(flipped, v);
        } else {
            assert_eq!(swapped, -v.clone());
            assert_eq!(flipped, -v);
        }
    }
}

#[test]
fn test_clebsch_gordan_values() {
    // ⟨1 1 1 −1 | 2 0⟩ = √(1/6)
    let cg = ClebschGordan {
        tj1: 2, tj2: 2, tj12: 4,
        tm1: 2, tm2: -2, tm12: 0,
    };
    assert_eq!(cg.value().squared(), ratio(1, 6));
    assert_eq!(cg.value().signum(), 1);
    // ⟨1/2 1/2 1/2 −1/2 | 0 0⟩ = √(1/2)
    let cg = ClebschGordan {
        tj1: 1, tj2: 1, tj12: 0,
        tm1: 1, tm2: -1, tm12: 0,
    };
    assert_eq!(cg.value().squared(), ratio(1, 2));
    assert_eq!(cg.value().signum(), 1);
    // inferred projection matches the explicit one
    assert_eq!(
        ClebschGordan::with_tm12_inferred(2, 2, 2, -2, 4),
        ClebschGordan { tj1: 2, tj2: 2, tj12: 4, tm1: 2, tm2: -2, tm12: 0 },
    );
}

#[test]
fn test_clebsch_gordan_orthogonality() {
    // Σ_{m1} ⟨j1 m1 j2 (M−m1) | J M⟩² = 1 for every valid (j1, j2, J, M)
    for &(tj1, tj2, tj12, tm12) in &[
        (2, 2, 4, 0),
        (2, 2, 2, 2),
        (1, 1, 2, 0),
        (3, 2, 5, 1),
        (4, 4, 4, -2),
        (3, 3, 0, 0),
    ] {
        let mut total = BigRational::zero();
        let mut tm1 = -tj1;
        while tm1 <= tj1 {
            let tm2: i32 = tm12 - tm1;
            if tm2.abs() <= tj2 {
                let cg = ClebschGordan { tj1, tj2, tj12, tm1, tm2, tm12 };
                total = total + cg.value().squared();
            }
            tm1 += 2;
        }
        assert_eq!(total, BigRational::one(), "({} {} {} {})", tj1, tj2, tj12, tm12);
    }
}

#[test]
fn test_6j_values() {
    // {1 1 1; 1 1 1} = 1/6
    assert_eq!(w6([2; 6]), exact(ratio(1, 6), ratio(1, 1)));
    // {1/2 1/2 1; 1/2 1/2 1} = 1/6
    assert_eq!(w6([1, 1, 2, 1, 1, 2]), exact(ratio(1, 6), ratio(1, 1)));
    // {j1 j2 j3; 0 j3 j2} = (−1)^(j1+j2+j3)/√((2j2+1)(2j3+1)):
    // {1 1 1; 0 1 1} = −1/3
    assert_eq!(w6([2, 2, 2, 0, 2, 2]), exact(ratio(-1, 3), ratio(1, 1)));
    // triangle violation gives zero
    assert!(w6([2, 2, 10, 2, 2, 2]).is_zero());
}

#[test]
fn test_6j_symmetries() {
    let mut rng = StdRng::seed_from_u64(0xca5e);
    let mut checked = 0;
    while checked < 100 {
        let tj1: i32 = rng.gen_range(0..6);
        let tj2: i32 = rng.gen_range(0..6);
        let tj3 = rng.gen_range((tj1 - tj2).abs()..=tj1 + tj2);
        let tj4: i32 = rng.gen_range(0..6);
        let tj5 = rng.gen_range((tj4 - tj3).abs()..=tj4 + tj3);
        let tj6 = rng.gen_range((tj1 - tj5).abs()..=tj1 + tj5);
        let p = [tj1, tj2, tj3, tj4, tj5, tj6];
        if (tj1 + tj2 + tj3) % 2 != 0
            || (tj1 + tj5 + tj6) % 2 != 0
            || (tj4 + tj2 + tj6) % 2 != 0
            || (tj4 + tj5 + tj3) % 2 != 0
        {
            continue;
        }
        checked += 1;
        let v = w6(p);
        // any column permutation leaves the value unchanged
        assert_eq!(v, w6([tj2, tj1, tj3, tj5, tj4, tj6]));
        assert_eq!(v, w6([tj3, tj2, tj1, tj6, tj5, tj4]));
        // exchanging upper and lower rows in two columns too
        assert_eq!(v, w6([tj4, tj5, tj3, tj1, tj2, tj6]));
        assert_eq!(v, w6([tj1, tj5, tj6, tj4, tj2, tj3]));
    }
}

#[test]
fn test_9j_values() {
    // {1/2 1/2 1; 1/2 1/2 1; 1 1 0} = −1/18
    assert_eq!(
        w9([1, 1, 2, 1, 1, 2, 2, 2, 0]),
        exact(ratio(-1, 18), ratio(1, 1))
    );
    // triangle violation in a column gives zero
    assert!(w9([2, 2, 2, 2, 2, 2, 10, 2, 2]).is_zero());
}

#[test]
fn test_9j_reduction_to_6j() {
    // {a b c; d e f; g h 0} = δ_{cf} δ_{gh}
    //     (−1)^(b+c+d+g) {a b c; e d g} / √((2c+1)(2g+1))
    for &(ta, tb, tc, td, te, tg) in &[
        (2, 4, 4, 4, 2, 4),
        (2, 4, 4, 4, 4, 4),
        (1, 1, 2, 1, 1, 2),
    ] {
        let lhs = w9([ta, tb, tc, td, te, tc, tg, tg, 0]);
        let w = w6([ta, tb, tc, te, td, tg]);
        let phase: i32 = if (tb + tc + td + tg) / 2 % 2 == 0 { 1 } else { -1 };
        let norm = (i64::from(tc) + 1) * (i64::from(tg) + 1);
        // compare squares and signs to sidestep radicand bookkeeping
        assert_eq!(lhs.squared() * ratio(norm, 1), w.squared());
        assert_eq!(lhs.signum(), phase * w.signum());
    }
}

#[test]
fn test_9j_consistency_with_6j_sum() {
    // Σ_k (−1)^(2k) (2k+1) {j1 j4 j7; j8 j9 k} {j2 j5 j8; j4 k j6}
    //     {j3 j6 j9; k j1 j2}
    // summed exactly: every nonzero term shares one radicand
    for &tj in &[
        [2, 2, 2, 2, 2, 2, 2, 2, 2],
        [1, 1, 2, 1, 1, 2, 2, 2, 2],
        [2, 4, 6, 4, 4, 4, 6, 4, 4],
        [1, 3, 4, 3, 1, 4, 4, 4, 0],
    ] {
        let lhs = w9(tj);
        let [tj1, tj2, tj3, tj4, tj5, tj6, tj7, tj8, tj9] = tj;
        let klo = *[(tj1 - tj9).abs(), (tj4 - tj8).abs(), (tj2 - tj6).abs()]
            .iter()
            .max()
            .unwrap();
        let khi = *[tj1 + tj9, tj4 + tj8, tj2 + tj6].iter().min().unwrap();
        let mut coef = BigRational::zero();
        let mut rad: Option<BigRational> = None;
        let mut tk = klo;
        while tk <= khi {
            let term = w6([tj1, tj4, tj7, tj8, tj9, tk])
                * w6([tj2, tj5, tj8, tj4, tk, tj6])
                * w6([tj3, tj6, tj9, tk, tj1, tj2]);
            if !term.is_zero() {
                match &rad {
                    None => rad = Some(term.rad().clone()),
                    Some(r) => assert_eq!(r, term.rad()),
                }
                let phase: i64 = if tk % 2 == 0 { 1 } else { -1 };
                coef = coef + term.coef() * ratio(phase * (i64::from(tk) + 1), 1);
            }
            tk += 2;
        }
        let rhs = match rad {
            None => SignedSqrt::zero(),
            Some(r) => SignedSqrt::new(coef, r),
        };
        assert_eq!(lhs, rhs, "{:?}", tj);
    }
}

#[test]
fn test_9j_symmetries() {
    // {1 2 2; 2 2 2; 2 2 0} reduces to {1 2 2; 2 2 2}/5 ≠ 0, and its
    // parameter sum 15 is odd, so odd permutations flip the sign
    let base = [2, 4, 4, 4, 4, 4, 4, 4, 0];
    let v = w9(base);
    assert!(!v.is_zero());
    // swapping the first two rows
    let swapped = [4, 4, 4, 2, 4, 4, 4, 4, 0];
    assert_eq!(w9(swapped), -v.clone());
    // swapping the first two columns
    let swapped = [4, 2, 4, 4, 4, 4, 4, 4, 0];
    assert_eq!(w9(swapped), -v.clone());
    // a cyclic row rotation is even
    let rotated = [4, 4, 4, 4, 4, 0, 2, 4, 4];
    assert_eq!(w9(rotated), v);

    // transpose invariance on an asymmetric array: {1 2 3; 3 3 2; 2 3 3}
    let base = [2, 4, 6, 6, 6, 4, 4, 6, 6];
    let t = [base[0], base[3], base[6], base[1], base[4], base[7], base[2], base[5], base[8]];
    assert_eq!(w9(base), w9(t));
}

#[test]
fn test_racah_coefficients() {
    // V(1 1 2; 1 −1 0) = (−1)^(−1+1+2) (1 1 2; 1 −1 0) = +√(1/30)
    let v = RacahV { tj1: 2, tm1: 2, tj2: 2, tm2: -2, tj3: 4, tm3: 0 }.value();
    assert_eq!(v, w3(2, 2, 2, -2, 4, 0));
    // W(1 1 1 1; 1 1) = (−1)^4 {1 1 1; 1 1 1} = 1/6
    let w = RacahW { tj1: 2, tj2: 2, tj3: 2, tj4: 2, tj5: 2, tj6: 2 }.value();
    assert_eq!(w, exact(ratio(1, 6), ratio(1, 1)));
    // Racah V of a forbidden coupling is zero, not an error
    let v = RacahV { tj1: 2, tm1: 0, tj2: 0, tm2: 0, tj3: 0, tm3: 0 }.value();
    assert!(v.is_zero());
}

#[test]
fn test_triangle_coefficient() {
    // Δ²(1, 1, 2) = 1/30
    let d = triangle_coefficient(2, 2, 4).unwrap();
    assert_eq!(d.squared(), ratio(1, 30));
    // zero exactly when the triangle condition fails
    for tj1 in 0..8 {
        for tj2 in 0..8 {
            for tj3 in 0..8 {
                let d = triangle_coefficient(tj1, tj2, tj3).unwrap();
                assert_eq!(
                    d.is_zero(),
                    !triangle_condition(tj1, tj2, tj3),
                    "({} {} {})",
                    tj1,
                    tj2,
                    tj3
                );
            }
        }
    }
    assert_eq!(triangle_coefficient(-2, 2, 4), Err(Error::NegativeJ));
}

#[test]
fn test_cache_transparency() {
    let p = [2, 4, 6, 6, 4, 2];
    let v1 = w6(p);
    let v2 = w6(p); // now a cache hit
    assert_eq!(v1, v2);
    // with caching disabled the recomputed value is bit-identical
    set_cache_capacity(SymbolKind::Wigner6j, 0);
    assert_eq!(w6(p), v1);
    set_cache_capacity(SymbolKind::Wigner6j, DEFAULT_CACHE_CAPACITY);
    assert_eq!(w6(p), v1);

    // same for a 9-j looked up through a symmetry image
    let base = [1, 1, 2, 1, 1, 2, 2, 2, 2];
    let v = w9(base);
    set_cache_capacity(SymbolKind::Wigner9j, 0);
    assert_eq!(w9(base), v);
    set_cache_capacity(SymbolKind::Wigner9j, DEFAULT_CACHE_CAPACITY);
    assert_eq!(w9(base), v);
}

#[test]
fn test_f64_conversion() {
    let v = w3(2, 2, 2, -2, 4, 0);
    assert!((f64::from(v) - (1.0 / 30.0f64).sqrt()).abs() < 1e-15);
    let w = w6([2; 6]);
    assert!((w.to_f64() - 1.0 / 6.0).abs() < 1e-15);
}
