//! Canonical cache keys and symmetry images.
//!
//! Physically equivalent parameter tuples must share cache entries.  The
//! 3-jm and 6-j symbols admit cheap canonical representatives; the 9-j
//! symbol does not, so its lookups enumerate the full 72-element symmetry
//! group instead.

use super::half::Half;
use super::parity::{self, Parity};
use super::utils::cast;

/// Reduced 3-jm parameters: `b1 = j1+j2−j3`, `b2 = j1−m1`, `b3 = j2+m2`,
/// `a1 = j2−m1−j3`, `a2 = j1+m2−j3`, for the reordered symbol.  These five
/// determine the symbol: the triangle differences come back as
/// `(b1, b2−a1, b3−a2)` and the projection factorials as
/// `(b1−a1, b2, b1−a2, b3, b2−a2, b3−a1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key3jm {
    pub b1: u32,
    pub b2: u32,
    pub b3: u32,
    pub a1: i32,
    pub a2: i32,
}

/// Reduced 6-j parameters: the three exchange sums `b1 ≥ b2 ≥ b3` and the
/// four triad perimeters in descending order with the smallest dropped
/// (it is `b1+b2+b3 − a1−a2−a3`).  Every exchange sum bounds every
/// perimeter from above, so the two sorted groups never interleave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key6j {
    pub b1: u32,
    pub b2: u32,
    pub b3: u32,
    pub a1: u32,
    pub a2: u32,
    pub a3: u32,
}

/// Map a valid 3-jm parameter set to its canonical key and the parity of
/// the net sign the caller must apply to the cached value.
///
/// Columns are reordered until `j1 ≥ j2 ≥ j3`, then all projections are
/// negated if `m1 < 0` (or `m1 = 0, m2 < 0`).  Each step is a symmetry of
/// the symbol up to `(−1)^(j1+j2+j3)`; one more `(−1)^(a1−a2)` accounts
/// for the definitional phase of the reordered symbol, which the cached
/// magnitude does not carry.
pub fn canonical_3jm(
    mut j: [Half<i32>; 3],
    mut m: [Half<i32>; 3],
) -> (Key3jm, Parity) {
    let mut flips = Parity::Even;
    loop {
        if j[0] < j[1] {
            j.swap(0, 1);
            m.swap(0, 1);
            flips = flips + Parity::Odd;
        } else if j[1] < j[2] {
            j.swap(1, 2);
            m.swap(1, 2);
            flips = flips + Parity::Odd;
        } else if m[0] < Half(0) || (m[0] == Half(0) && m[1] < Half(0)) {
            for x in m.iter_mut() {
                *x = -*x;
            }
            flips = flips + Parity::Odd;
        } else {
            break;
        }
    }
    let a1 = (j[1] - m[0] - j[2]).unwrap();
    let a2 = (j[0] + m[1] - j[2]).unwrap();
    let mut sign = Parity::of(a1 - a2);
    if flips.is_odd() {
        sign = sign + Parity::of((j[0] + j[1] + j[2]).unwrap());
    }
    let key = Key3jm {
        b1: cast((j[0] + j[1] - j[2]).unwrap()),
        b2: cast((j[0] - m[0]).unwrap()),
        b3: cast((j[1] + m[1]).unwrap()),
        a1,
        a2,
    };
    (key, sign)
}

/// Map a valid 6-j parameter set `{j1 j2 j3; j4 j5 j6}` to its canonical
/// key.  The symbol is invariant under its full symmetry group, which
/// permutes the triad perimeters and exchange sums independently, so
/// sorting both groups is canonical and no sign applies.
pub fn canonical_6j(j: [Half<i32>; 6]) -> Key6j {
    let peri = |x: Half<i32>, y: Half<i32>, z: Half<i32>| -> u32 {
        cast((x + y + z).unwrap())
    };
    let a1 = peri(j[0], j[1], j[2]);
    let a2 = peri(j[0], j[4], j[5]);
    let a3 = peri(j[3], j[1], j[5]);
    let a4 = peri(j[3], j[4], j[2]);
    let b1: u32 = cast((j[0] + j[1] + j[3] + j[4]).unwrap());
    let b2: u32 = cast((j[0] + j[2] + j[3] + j[5]).unwrap());
    let b3: u32 = cast((j[1] + j[2] + j[4] + j[5]).unwrap());
    let (_, _, a3, a2, a1) = parity::sort4(a1, a2, a3, a4);
    let (_, b3, b2, b1) = parity::sort3(b1, b2, b3);
    Key6j { b1, b2, b3, a1, a2, a3 }
}

/// One element of the 9-j symmetry group: `image[i] = original[perm[i]]`,
/// and `Odd` marks the images that pay the phase `(−1)^(Σ of all nine j)`.
#[derive(Clone, Copy, Debug)]
pub struct NineJSym {
    pub perm: [usize; 9],
    pub phase: Parity,
}

pub fn apply_9j(perm: &[usize; 9], tjs: &[i32; 9]) -> [i32; 9] {
    let mut out = [0; 9];
    for i in 0..9 {
        out[i] = tjs[perm[i]];
    }
    out
}

lazy_static! {
    /// All 72 images of the 3×3 parameter array: row permutations ×
    /// column permutations × optional transpose, each tagged with the
    /// parity of the permutation pair.  The identity comes first, so
    /// probing in order finds exact repeats immediately.
    pub static ref NINEJ_SYMMETRIES: Vec<NineJSym> = {
        const PERMS: [([usize; 3], Parity); 6] = [
            ([0, 1, 2], Parity::Even),
            ([1, 2, 0], Parity::Even),
            ([2, 0, 1], Parity::Even),
            ([0, 2, 1], Parity::Odd),
            ([1, 0, 2], Parity::Odd),
            ([2, 1, 0], Parity::Odd),
        ];
        let mut out = Vec::with_capacity(72);
        for &(rp, rs) in &PERMS {
            for &(cp, cs) in &PERMS {
                for &transpose in &[false, true] {
                    let mut perm = [0; 9];
                    for r in 0..3 {
                        for c in 0..3 {
                            let dst = if transpose { c * 3 + r } else { r * 3 + c };
                            perm[dst] = rp[r] * 3 + cp[c];
                        }
                    }
                    out.push(NineJSym { perm, phase: rs + cs });
                }
            }
        }
        out
    };
}
