//! Scene settings. Every field has a default, so a YAML file only needs the
//! values it changes.

use carousel_common::Animal;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("rider {0} is listed more than once")]
    DuplicateRider(Animal),
    #[error("spin speed must be finite, got {0}")]
    BadSpinSpeed(f32),
    #[error("bad camera: {0}")]
    BadCamera(&'static str),
}

/// Top-level scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Spin rate in degrees per second.
    pub spin_speed: f32,
    /// Directory the rider model files are resolved against.
    pub models_dir: PathBuf,
    pub camera: CameraConfig,
    /// Riders in draw order.
    pub riders: Vec<RiderConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spin_speed: 45.0,
            models_dir: PathBuf::from("models/merry"),
            camera: CameraConfig::default(),
            riders: Animal::ALL.into_iter().map(RiderConfig::default_for).collect(),
        }
    }
}

impl SceneConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded scene config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spin_speed.is_finite() {
            return Err(ConfigError::BadSpinSpeed(self.spin_speed));
        }
        self.camera.validate()?;
        let mut seen = BTreeSet::new();
        for rider in &self.riders {
            if !seen.insert(rider.animal) {
                return Err(ConfigError::DuplicateRider(rider.animal));
            }
        }
        Ok(())
    }

    /// Full path of a rider's model file.
    pub fn model_path(&self, rider: &RiderConfig) -> PathBuf {
        self.models_dir.join(&rider.model)
    }
}

/// Fixed viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraConfig {
    /// Reject settings that give a NaN or degenerate view or projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.eye.is_finite() && self.target.is_finite() && self.up.is_finite()) {
            return Err(ConfigError::BadCamera("eye, target and up must be finite"));
        }
        if !(self.near > 0.0 && self.near.is_finite()) {
            return Err(ConfigError::BadCamera("near must be positive"));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::BadCamera("far must exceed near"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::BadCamera("fov must lie strictly between 0 and 180 degrees"));
        }
        let forward = self.target - self.eye;
        if forward.length_squared() == 0.0 {
            return Err(ConfigError::BadCamera("eye and target coincide"));
        }
        if forward.cross(self.up).length_squared() <= f32::EPSILON * forward.length_squared() {
            return Err(ConfigError::BadCamera("up is parallel to the view direction"));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// One rider: where it stands, its bob phase, and its model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderConfig {
    pub animal: Animal,
    pub position: Vec3,
    /// Phase offset in radians added to the clock before the bob sine.
    pub phase: f32,
    /// Model file name relative to [`SceneConfig::models_dir`].
    pub model: PathBuf,
}

impl RiderConfig {
    pub fn default_for(animal: Animal) -> Self {
        let (position, phase) = match animal {
            Animal::Cow => (Vec3::new(0.0, 0.0, 4.0), 3.6),
            Animal::Hippo => (Vec3::new(4.0, 0.0, 0.0), 1.2),
            Animal::Lion => (Vec3::new(-4.0, 0.0, 0.0), 3.6),
            Animal::Skeleton => (Vec3::new(0.0, 0.0, -4.0), 2.4),
        };
        Self {
            animal,
            position,
            phase,
            model: PathBuf::from(format!("{}.ply", animal.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_ride() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.spin_speed, 45.0);
        assert_eq!(cfg.riders.len(), 4);
        assert_eq!(cfg.riders[0].animal, Animal::Cow);
        assert_eq!(cfg.riders[0].phase, 3.6);
        assert_eq!(cfg.riders[3].position, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(cfg.camera.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(
            cfg.model_path(&cfg.riders[0]),
            PathBuf::from("models/merry/cow.ply")
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = SceneConfig::from_yaml_str("spin_speed: 90.0\n").unwrap();
        assert_eq!(cfg.spin_speed, 90.0);
        assert_eq!(cfg.riders, SceneConfig::default().riders);
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn yaml_riders_and_camera() {
        let yaml = r#"
camera:
  eye: [0.0, 3.0, 12.0]
riders:
  - animal: lion
    position: [1.0, 0.0, 2.0]
    phase: 0.5
    model: big_cat.obj
"#;
        let cfg = SceneConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.camera.eye, Vec3::new(0.0, 3.0, 12.0));
        assert_eq!(cfg.camera.fov_degrees, 60.0);
        assert_eq!(cfg.riders.len(), 1);
        assert_eq!(cfg.riders[0].animal, Animal::Lion);
        assert_eq!(
            cfg.model_path(&cfg.riders[0]),
            PathBuf::from("models/merry/big_cat.obj")
        );
    }

    #[test]
    fn duplicate_rider_rejected() {
        let yaml = r#"
riders:
  - { animal: cow, position: [0.0, 0.0, 4.0], phase: 0.0, model: a.obj }
  - { animal: cow, position: [0.0, 0.0, -4.0], phase: 1.0, model: b.obj }
"#;
        assert!(matches!(
            SceneConfig::from_yaml_str(yaml),
            Err(ConfigError::DuplicateRider(Animal::Cow))
        ));
    }

    #[test]
    fn degenerate_cameras_rejected() {
        let bad = [
            CameraConfig { near: 0.0, ..CameraConfig::default() },
            CameraConfig { near: -1.0, ..CameraConfig::default() },
            CameraConfig { far: 0.1, ..CameraConfig::default() },
            CameraConfig { fov_degrees: 180.0, ..CameraConfig::default() },
            CameraConfig { target: Vec3::new(0.0, 0.0, 10.0), ..CameraConfig::default() },
            CameraConfig { up: Vec3::Z, ..CameraConfig::default() },
            CameraConfig { up: Vec3::ZERO, ..CameraConfig::default() },
            CameraConfig { eye: Vec3::new(f32::NAN, 0.0, 0.0), ..CameraConfig::default() },
        ];
        for camera in bad {
            let cfg = SceneConfig { camera, ..SceneConfig::default() };
            assert!(
                matches!(cfg.validate(), Err(ConfigError::BadCamera(_))),
                "{camera:?}"
            );
        }
    }

    #[test]
    fn camera_error_surfaces_from_yaml() {
        let yaml = "camera:\n  near: 5.0\n  far: 1.0\n";
        assert!(matches!(
            SceneConfig::from_yaml_str(yaml),
            Err(ConfigError::BadCamera(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            SceneConfig::from_yaml_str("spin_speed: [fast]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "models_dir: /opt/models").unwrap();
        let cfg = SceneConfig::load(file.path()).unwrap();
        assert_eq!(cfg.models_dir, PathBuf::from("/opt/models"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SceneConfig::load(dir.path().join("nope.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
