use crate::AssetError;
use carousel_geometry::{Mesh, accumulate_normals};
use glam::Vec3;
use std::path::Path;

/// Every object in the file, triangulated and merged.
pub(crate) fn load(path: &Path) -> Result<Mesh, AssetError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut mesh = Mesh::default();
    for model in &models {
        let m = &model.mesh;
        let base = mesh.positions.len() as u32;
        let positions: Vec<Vec3> = m.positions.chunks_exact(3).map(Vec3::from_slice).collect();
        let normals = if m.normals.len() == m.positions.len() {
            m.normals.chunks_exact(3).map(Vec3::from_slice).collect()
        } else {
            accumulate_normals(&positions, &m.indices)
        };
        mesh.positions.extend(positions);
        mesh.normals.extend(normals);
        mesh.indices.extend(m.indices.iter().map(|i| i + base));
        tracing::debug!(
            name = %model.name,
            vertices = m.positions.len() / 3,
            triangles = m.indices.len() / 3,
            "obj object"
        );
    }
    Ok(mesh)
}
