//! Three-component vector helpers used to derive every procedural normal.

use glam::Vec3;

/// Errors from vector operations with geometric preconditions.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a vector of length {0}")]
    ZeroLength(f32),
}

/// Component-wise `a - b`.
pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Euclidean length `sqrt(x² + y² + z²)`.
pub fn magnitude(v: Vec3) -> f32 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

/// Scale `v` to unit length.
///
/// A zero-length (or non-finite) input yields `Vec3::ZERO` rather than NaN.
/// Use [`try_normalize`] when the caller needs to know.
pub fn normalize(v: Vec3) -> Vec3 {
    try_normalize(v).unwrap_or(Vec3::ZERO)
}

/// Scale `v` to unit length, failing on zero or non-finite length.
pub fn try_normalize(v: Vec3) -> Result<Vec3, MathError> {
    let len = magnitude(v);
    if len == 0.0 || !len.is_finite() {
        return Err(MathError::ZeroLength(len));
    }
    Ok(Vec3::new(v.x / len, v.y / len, v.z / len))
}

/// Right-handed cross product.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Unit normal of the triangle `(p1, p2, p3)`: `normalize((p1 - p2) × (p1 - p3))`.
///
/// Degenerate triangles give `Vec3::ZERO`.
pub fn triangle_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    normalize(cross(subtract(p1, p2), subtract(p1, p3)))
}
