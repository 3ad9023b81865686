//! Rider model loading.
//!
//! Models are PLY files (parsed by `ply-rs`) or OBJ files (parsed by `tobj`),
//! picked by extension and merged into one [`Mesh`] per rider. A rider whose
//! file is missing or broken is drawn as a placeholder cube so the ride still
//! runs.
//!
//! # Invariants
//! - Every loaded mesh passes [`Mesh::validate`] apart from degenerate triangles,
//!   which scanned models routinely contain.
//! - The library holds exactly one mesh per configured rider.

mod obj;
mod ply;

use carousel_common::Animal;
use carousel_geometry::{Mesh, MeshError, placeholder_cube};
use carousel_scene::{SceneConfig, pose_correction};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors from model loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PLY parse error in {path}: {source}")]
    Ply {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("OBJ load error in {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("{path}: {element} element lacks property `{property}`")]
    MissingProperty {
        path: PathBuf,
        element: &'static str,
        property: &'static str,
    },
    #[error("{path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
    #[error("{0}: unsupported model format (expected .ply or .obj)")]
    UnsupportedFormat(PathBuf),
    #[error("{0} contains no triangles")]
    Empty(PathBuf),
    #[error("invalid mesh in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Half-size, in scene units, of the cube drawn for a missing model.
const PLACEHOLDER_HALF_EXTENT: f32 = 0.5;

/// Load a model file into a single triangulated mesh.
///
/// `.ply` and `.obj` are accepted (case-insensitive). File normals are used
/// when every vertex has one; otherwise smooth normals are accumulated from
/// the faces.
pub fn load_model(path: impl AsRef<Path>) -> Result<Mesh, AssetError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let mesh = match extension.as_deref() {
        Some("ply") => ply::load(path)?,
        Some("obj") => obj::load(path)?,
        _ => return Err(AssetError::UnsupportedFormat(path.to_path_buf())),
    };

    if mesh.triangle_count() == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    match mesh.validate() {
        Ok(()) | Err(MeshError::Degenerate(_)) => {}
        Err(source) => {
            return Err(AssetError::Invalid {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    Ok(mesh)
}

/// Cube sized so it appears [`PLACEHOLDER_HALF_EXTENT`] big once the rider's
/// pose scale is applied.
pub fn placeholder_for(animal: Animal) -> Mesh {
    let scale = pose_correction(animal).matrix.x_axis.truncate().length();
    placeholder_cube(PLACEHOLDER_HALF_EXTENT / scale)
}

/// One mesh per configured rider.
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    meshes: BTreeMap<Animal, Mesh>,
    placeholders: Vec<Animal>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every rider's model, substituting a placeholder for any that fail.
    pub fn load(config: &SceneConfig) -> Self {
        let mut library = Self::new();
        for rider in &config.riders {
            let path = config.model_path(rider);
            match load_model(&path) {
                Ok(mesh) => {
                    tracing::info!(
                        animal = %rider.animal,
                        path = %path.display(),
                        vertices = mesh.vertex_count(),
                        "loaded model"
                    );
                    library.insert(rider.animal, mesh);
                }
                Err(e) => {
                    tracing::warn!(animal = %rider.animal, "{e}; using placeholder");
                    library.insert_placeholder(rider.animal);
                }
            }
        }
        library
    }

    pub fn insert(&mut self, animal: Animal, mesh: Mesh) {
        self.placeholders.retain(|a| *a != animal);
        self.meshes.insert(animal, mesh);
    }

    pub fn insert_placeholder(&mut self, animal: Animal) {
        self.meshes.insert(animal, placeholder_for(animal));
        if !self.placeholders.contains(&animal) {
            self.placeholders.push(animal);
        }
    }

    pub fn get(&self, animal: Animal) -> Option<&Mesh> {
        self.meshes.get(&animal)
    }

    pub fn is_placeholder(&self, animal: Animal) -> bool {
        self.placeholders.contains(&animal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Animal, &Mesh)> {
        self.meshes.iter().map(|(a, m)| (*a, m))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
