use carousel_scene::CameraConfig;
use glam::{Mat4, Vec3};

/// Fixed camera looking from `eye` at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LookAtCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl LookAtCamera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            eye: cfg.eye,
            target: cfg.target,
            up: cfg.up,
            fov: cfg.fov_degrees.to_radians(),
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Set the aspect ratio from a pixel size, ignoring zero heights.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = LookAtCamera::default();
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = LookAtCamera::default();
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn aspect_tracks_viewport() {
        let mut cam = LookAtCamera::default();
        cam.set_viewport_size(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport_size(640, 0);
        assert_eq!(cam.aspect, 640.0);
    }
}
