use carousel_common::math::{magnitude, normalize, triangle_normal};
use glam::Vec3;

/// Errors from mesh validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("{positions} positions but {normals} normals")]
    LengthMismatch { positions: usize, normals: usize },
    #[error("index count {0} is not a multiple of 3")]
    RaggedIndices(usize),
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
    #[error("triangle {0} has zero area")]
    Degenerate(usize),
}

/// Vertex positions, parallel per-vertex normals, and triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Positions of each triangle's corners. Panics on out-of-range indices;
    /// call [`Mesh::validate`] first for untrusted data.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.triangles().map(|[a, b, c]| {
            [
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            ]
        })
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Check the buffer invariants and reject zero-area triangles.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() != self.normals.len() {
            return Err(MeshError::LengthMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertices: self.positions.len(),
            });
        }
        for (i, [p1, p2, p3]) in self.triangle_positions().enumerate() {
            if triangle_normal(p1, p2, p3) == Vec3::ZERO {
                return Err(MeshError::Degenerate(i));
            }
        }
        Ok(())
    }
}

/// Smooth per-vertex normals: each triangle's face normal, weighted by area,
/// summed into its corners and renormalized. Out-of-range triangles are skipped.
pub fn accumulate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (p1, p2, p3) = (positions[a], positions[b], positions[c]);
        let area_weighted = (p1 - p2).cross(p1 - p3);
        if magnitude(area_weighted) == 0.0 {
            continue;
        }
        for i in [a, b, c] {
            sums[i] += area_weighted;
        }
    }
    sums.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn valid_triangle_passes() {
        let mesh = unit_triangle();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut mesh = unit_triangle();
        mesh.normals.pop();
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::LengthMismatch {
                positions: 3,
                normals: 2
            })
        ));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut mesh = unit_triangle();
        mesh.indices[2] = 3;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                index: 3,
                vertices: 3
            })
        );
    }

    #[test]
    fn ragged_indices_rejected() {
        let mut mesh = unit_triangle();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshError::RaggedIndices(4)));
    }

    #[test]
    fn degenerate_triangle_rejected() {
        let mut mesh = unit_triangle();
        mesh.indices = vec![0, 1, 1];
        assert_eq!(mesh.validate(), Err(MeshError::Degenerate(0)));
    }

    #[test]
    fn bounds_cover_all_positions() {
        let (lo, hi) = unit_triangle().bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(1.0, 1.0, 0.0));
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn accumulated_normals_of_flat_quad_point_one_way() {
        let positions = vec![
            Vec3::ZERO,
            Vec3::Y,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
        ];
        let normals = accumulate_normals(&positions, &[0, 1, 2, 2, 1, 3]);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-5 || (n + Vec3::Z).length() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_zero_normal() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(9.0)];
        let normals = accumulate_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::ZERO);
    }
}
