//! Exact Wigner 3-jm, 6-j, and 9-j symbols, Clebsch–Gordan coefficients,
//! and Racah V/W coefficients.
//!
//! Every value is computed exactly as a rational times the square root of
//! a square-free rational ([`SignedSqrt`](sqrt_rat/struct.SignedSqrt.html)),
//! using prime-factorized factorial arithmetic throughout; conversion to
//! `f64` is the only lossy step and happens on request.  Physically
//! equivalent parameter sets share entries in bounded per-symbol caches.
//!
//! ```
//! extern crate wigner_symbols;
//!
//! use wigner_symbols::Wigner6j;
//!
//! fn main() {
//!     let w = Wigner6j { tj1: 2, tj2: 2, tj3: 2, tj4: 2, tj5: 2, tj6: 2 };
//!     // {1 1 1; 1 1 1} = 1/6
//!     assert!((f64::from(w.value()) - 1.0 / 6.0).abs() < 1e-15);
//! }
//! ```
extern crate conv;
extern crate fnv;
#[macro_use]
extern crate lazy_static;
extern crate num;
#[macro_use]
extern crate quick_error;

pub mod canon;
pub mod engine;
pub mod half;
pub mod internal;
pub mod lru;
pub mod parity;
pub mod prime_fact;
pub mod series;
pub mod sqrt_rat;
pub mod symbols;
pub mod utils;

pub use self::engine::{set_cache_capacity, Error, SymbolKind, DEFAULT_CACHE_CAPACITY};
pub use self::half::Half;
pub use self::internal::triangle_condition;
pub use self::sqrt_rat::SignedSqrt;
pub use self::symbols::{
    triangle_coefficient, ClebschGordan, RacahV, RacahW, Wigner3jm, Wigner6j, Wigner9j,
};
