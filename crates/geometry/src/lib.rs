//! Procedural geometry for the carousel: mesh buffers and the shape builders.
//!
//! # Invariants
//! - `positions.len() == normals.len()` for every mesh.
//! - Every index references a valid vertex; the index count is a multiple of 3.
//! - Procedural normals are computed from triangle geometry, never supplied by hand,
//!   except the pole panels which share the constant `(0, 0, 1)` normal.

mod builders;
mod mesh;

pub use builders::{
    HEX_RADIUS, POLE_HALF_WIDTH, POLE_HEIGHT, POLE_THICKNESS, build_ground, build_hex_disc,
    build_poles, build_roof, placeholder_cube,
};
pub use mesh::{Mesh, MeshError, accumulate_normals};

pub fn crate_info() -> &'static str {
    "carousel-geometry v0.1.0"
}
