use crate::config::RiderConfig;
use carousel_common::Animal;
use glam::{Mat4, Vec3};

/// Per-animal correction for how the model was authored: a constant extra
/// lift and a fixed rotation/scale applied before placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub lift: f32,
    pub matrix: Mat4,
}

/// The pose each model needs to stand upright and face the carousel axis.
pub fn pose_correction(animal: Animal) -> Pose {
    let deg = |d: f32| d.to_radians();
    match animal {
        Animal::Cow => Pose {
            lift: 0.0,
            matrix: Mat4::IDENTITY,
        },
        Animal::Hippo => Pose {
            lift: 0.0,
            matrix: Mat4::from_rotation_y(deg(90.0)),
        },
        Animal::Lion => Pose {
            lift: 0.0,
            matrix: Mat4::from_rotation_y(deg(-90.0)),
        },
        // Authored lying on its side, at roughly 30x scene scale.
        Animal::Skeleton => Pose {
            lift: 0.4,
            matrix: Mat4::from_rotation_x(deg(-90.0))
                * Mat4::from_scale(Vec3::splat(0.03))
                * Mat4::from_rotation_y(deg(-90.0)),
        },
    }
}

/// A rider placed on the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rider {
    pub animal: Animal,
    pub position: Vec3,
    pub phase: f32,
    pub pose: Pose,
}

impl Rider {
    pub fn new(animal: Animal, position: Vec3, phase: f32) -> Self {
        Self {
            animal,
            position,
            phase,
            pose: pose_correction(animal),
        }
    }
}

impl From<&RiderConfig> for Rider {
    fn from(cfg: &RiderConfig) -> Self {
        Self::new(cfg.animal, cfg.position, cfg.phase)
    }
}

/// `translate(position + (0, offset + lift, 0)) × pose`.
pub fn model_matrix(rider: &Rider, offset: f32) -> Mat4 {
    let lifted = rider.position + Vec3::new(0.0, offset + rider.pose.lift, 0.0);
    Mat4::from_translation(lifted) * rider.pose.matrix
}

/// `view × spin × model`: the model applies first, the view last.
pub fn model_view(view: Mat4, spin: Mat4, model: Mat4) -> Mat4 {
    view * spin * model
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn cow_is_only_translated() {
        let cow = Rider::new(Animal::Cow, Vec3::new(0.0, 0.0, 4.0), 3.6);
        let m = model_matrix(&cow, 0.25);
        assert_eq!(m, Mat4::from_translation(Vec3::new(0.0, 0.25, 4.0)));
    }

    #[test]
    fn hippo_and_lion_face_opposite_ways() {
        let hippo = Rider::new(Animal::Hippo, Vec3::new(4.0, 0.0, 0.0), 1.2);
        let lion = Rider::new(Animal::Lion, Vec3::new(-4.0, 0.0, 0.0), 3.6);
        let h = model_matrix(&hippo, 0.0).transform_vector3(Vec3::X);
        let l = model_matrix(&lion, 0.0).transform_vector3(Vec3::X);
        assert!(close(h, Vec3::NEG_Z), "{h:?}");
        assert!(close(l, Vec3::Z), "{l:?}");
    }

    #[test]
    fn skeleton_is_lifted_and_scaled() {
        let skel = Rider::new(Animal::Skeleton, Vec3::new(0.0, 0.0, -4.0), 2.4);
        let m = model_matrix(&skel, 0.5);
        assert!(close(m.w_axis.truncate(), Vec3::new(0.0, 0.9, -4.0)));
        for axis in [m.x_axis, m.y_axis, m.z_axis] {
            assert!((axis.truncate().length() - 0.03).abs() < EPS);
        }
        // The model's +X (its head) ends up along world +Y.
        let up = m.transform_vector3(Vec3::X).normalize();
        assert!(close(up, Vec3::Y), "{up:?}");
    }

    #[test]
    fn model_view_applies_model_first() {
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let spin = Mat4::from_rotation_y(90f32.to_radians());
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0));
        let p = model_view(view, spin, model).transform_point3(Vec3::ZERO);
        // (0,0,4) spun a quarter turn lands on (4,0,0), then the camera pushes it back.
        assert!(close(p, Vec3::new(4.0, 0.0, -10.0)), "{p:?}");
    }

    #[test]
    fn rider_from_config_picks_pose() {
        let cfg = RiderConfig::default_for(Animal::Skeleton);
        let rider = Rider::from(&cfg);
        assert_eq!(rider.pose.lift, 0.4);
        assert_eq!(rider.position, cfg.position);
    }
}
