use crate::AssetError;
use carousel_geometry::{Mesh, accumulate_normals};
use glam::Vec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn scalar(property: &Property) -> Option<f32> {
    Some(match property {
        Property::Char(v) => *v as f32,
        Property::UChar(v) => *v as f32,
        Property::Short(v) => *v as f32,
        Property::UShort(v) => *v as f32,
        Property::Int(v) => *v as f32,
        Property::UInt(v) => *v as f32,
        Property::Float(v) => *v,
        Property::Double(v) => *v as f32,
        _ => return None,
    })
}

fn index_list(property: &Property) -> Option<Vec<i64>> {
    Some(match property {
        Property::ListChar(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUChar(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListShort(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUShort(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListInt(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUInt(v) => v.iter().map(|&i| i as i64).collect(),
        _ => return None,
    })
}

/// Vertices and faces of an ASCII or binary PLY file. Polygons are split
/// into triangle fans around their first corner.
pub(crate) fn load(path: &Path) -> Result<Mesh, AssetError> {
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let ply = Parser::<DefaultElement>::new()
        .read_ply(&mut reader)
        .map_err(|source| AssetError::Ply {
            path: path.to_path_buf(),
            source,
        })?;

    let missing = |element: &'static str, property: &'static str| AssetError::MissingProperty {
        path: path.to_path_buf(),
        element,
        property,
    };
    let vertices = ply.payload.get("vertex").map_or(&[][..], Vec::as_slice);
    let faces = ply.payload.get("face").map_or(&[][..], Vec::as_slice);

    let mut positions = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        let coord = |key: &'static str| {
            vertex
                .get(key)
                .and_then(scalar)
                .ok_or_else(|| missing("vertex", key))
        };
        positions.push(Vec3::new(coord("x")?, coord("y")?, coord("z")?));
    }
    let file_normals: Option<Vec<Vec3>> = vertices
        .iter()
        .map(|v| {
            let n = |key: &str| v.get(key).and_then(scalar);
            Some(Vec3::new(n("nx")?, n("ny")?, n("nz")?))
        })
        .collect();

    let mut indices = Vec::with_capacity(faces.len() * 3);
    for (f, face) in faces.iter().enumerate() {
        let corners = face
            .get("vertex_indices")
            .or_else(|| face.get("vertex_index"))
            .and_then(index_list)
            .ok_or_else(|| missing("face", "vertex_indices"))?;
        let corners = corners
            .into_iter()
            .map(|i| {
                u32::try_from(i).map_err(|_| AssetError::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("face {f} has negative vertex index {i}"),
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        for k in 1..corners.len().saturating_sub(1) {
            indices.extend([corners[0], corners[k], corners[k + 1]]);
        }
    }

    let normals = match file_normals {
        Some(normals) if !normals.is_empty() => normals,
        _ => accumulate_normals(&positions, &indices),
    };
    tracing::debug!(
        vertices = positions.len(),
        faces = faces.len(),
        triangles = indices.len() / 3,
        "ply model"
    );
    Ok(Mesh::new(positions, normals, indices))
}
