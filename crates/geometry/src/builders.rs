use crate::mesh::Mesh;
use carousel_common::math::triangle_normal;
use glam::Vec3;
use std::f32::consts::TAU;

/// Radius of the roof and ground discs.
pub const HEX_RADIUS: f32 = 5.0;
/// Distance of each pole from the carousel axis.
pub const POLE_HALF_WIDTH: f32 = 4.0;
/// Half of a pole panel's width.
pub const POLE_THICKNESS: f32 = 0.025;
/// Poles run from the ground (y = 0) to this height.
pub const POLE_HEIGHT: f32 = 5.0;

const HEX_SIDES: usize = 6;

/// Flat-shaded hexagonal fan.
///
/// Six independent triangles `[apex, rim_i, rim_i+1]`: the apex sits at
/// `(0, height + center_height, 0)`, the rim points on a circle of radius
/// [`HEX_RADIUS`] at `y = height`. Each triangle gets its own three vertices and
/// one face normal copied to all three, so the mesh has 18 vertices and the
/// sequential indices `0..18`.
pub fn build_hex_disc(height: f32, center_height: f32) -> Mesh {
    let step = TAU / HEX_SIDES as f32;
    let apex = Vec3::new(0.0, height + center_height, 0.0);
    let rim = |i: usize| {
        let theta = i as f32 * step;
        Vec3::new(HEX_RADIUS * theta.cos(), height, HEX_RADIUS * theta.sin())
    };

    let mut positions = Vec::with_capacity(HEX_SIDES * 3);
    let mut normals = Vec::with_capacity(HEX_SIDES * 3);
    for i in 0..HEX_SIDES {
        let corners = [apex, rim(i), rim(i + 1)];
        let normal = triangle_normal(corners[0], corners[1], corners[2]);
        positions.extend(corners);
        normals.extend([normal; 3]);
    }
    let indices = (0..positions.len() as u32).collect();

    tracing::debug!(height, center_height, "built hex disc");
    Mesh::new(positions, normals, indices)
}

/// The raised roof: rim at y = 5, apex one unit higher.
pub fn build_roof() -> Mesh {
    build_hex_disc(5.0, 1.0)
}

/// The flat ground disc at y = 0.
pub fn build_ground() -> Mesh {
    build_hex_disc(0.0, 0.0)
}

/// Four thin vertical panels standing at the compass points of a square of
/// half-width [`POLE_HALF_WIDTH`], each two triangles over four vertices.
///
/// Every vertex carries the normal `(0, 0, 1)`.
pub fn build_poles() -> Mesh {
    let off = POLE_THICKNESS;
    let (w, h) = (POLE_HALF_WIDTH, POLE_HEIGHT);
    // Panel centres on the ground: back, front, left, right.
    let centres = [
        Vec3::new(0.0, 0.0, -w),
        Vec3::new(0.0, 0.0, w),
        Vec3::new(-w, 0.0, 0.0),
        Vec3::new(w, 0.0, 0.0),
    ];

    let mut positions = Vec::with_capacity(16);
    let mut indices = Vec::with_capacity(24);
    for c in centres {
        let base = positions.len() as u32;
        positions.extend([
            c + Vec3::new(-off, 0.0, 0.0),
            c + Vec3::new(off, 0.0, 0.0),
            c + Vec3::new(-off, h, 0.0),
            c + Vec3::new(off, h, 0.0),
        ]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    let normals = vec![Vec3::Z; positions.len()];

    Mesh::new(positions, normals, indices)
}

/// Axis-aligned box centred at the origin, standing in for a model that failed to load.
pub fn placeholder_cube(half_extent: f32) -> Mesh {
    let p = half_extent;
    #[rustfmt::skip]
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (Vec3::Z,     [Vec3::new(-p, -p,  p), Vec3::new( p, -p,  p), Vec3::new( p,  p,  p), Vec3::new(-p,  p,  p)]),
        (Vec3::NEG_Z, [Vec3::new( p, -p, -p), Vec3::new(-p, -p, -p), Vec3::new(-p,  p, -p), Vec3::new( p,  p, -p)]),
        (Vec3::X,     [Vec3::new( p, -p,  p), Vec3::new( p, -p, -p), Vec3::new( p,  p, -p), Vec3::new( p,  p,  p)]),
        (Vec3::NEG_X, [Vec3::new(-p, -p, -p), Vec3::new(-p, -p,  p), Vec3::new(-p,  p,  p), Vec3::new(-p,  p, -p)]),
        (Vec3::Y,     [Vec3::new(-p,  p,  p), Vec3::new( p,  p,  p), Vec3::new( p,  p, -p), Vec3::new(-p,  p, -p)]),
        (Vec3::NEG_Y, [Vec3::new(-p, -p, -p), Vec3::new( p, -p, -p), Vec3::new( p, -p,  p), Vec3::new(-p, -p,  p)]),
    ];

    let mut mesh = Mesh::default();
    for (normal, corners) in faces {
        let base = mesh.positions.len() as u32;
        mesh.positions.extend(corners);
        mesh.normals.extend([normal; 4]);
        mesh.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}
