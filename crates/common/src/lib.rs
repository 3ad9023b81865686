//! Shared vocabulary for the carousel workspace: vector math and scene identifiers.
//!
//! # Invariants
//! - Vector helpers are pure and return values; nothing is written through references.
//! - Normalizing a zero-length vector never produces NaN.

pub mod math;
pub mod types;

pub use math::MathError;
pub use types::{Animal, MeshId};

pub fn crate_info() -> &'static str {
    "carousel-common v0.1.0"
}
