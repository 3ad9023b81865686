use carousel_input::Action;
use glam::{Mat4, Vec3};

/// Which way the carousel turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinDirection {
    /// Positive rotation about `+Y`.
    #[default]
    Clockwise,
    /// Positive rotation about `-Y`.
    CounterClockwise,
}

impl SpinDirection {
    pub fn flipped(self) -> Self {
        match self {
            SpinDirection::Clockwise => SpinDirection::CounterClockwise,
            SpinDirection::CounterClockwise => SpinDirection::Clockwise,
        }
    }

    pub fn axis(self) -> Vec3 {
        match self {
            SpinDirection::Clockwise => Vec3::Y,
            SpinDirection::CounterClockwise => Vec3::NEG_Y,
        }
    }
}

/// The rotation the scene is currently displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    /// Degrees in `[0, 360)`.
    pub angle: f32,
    pub direction: SpinDirection,
}

impl Spin {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_axis_angle(self.direction.axis(), self.angle.to_radians())
    }
}

/// Time-driven scalars plus the three keyboard toggles.
///
/// When a motion is disabled its last computed value is held, not reset.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub direction: SpinDirection,
    pub rotation_enabled: bool,
    pub bob_enabled: bool,
    /// Degrees per second.
    speed: f32,
    spin: Spin,
    phases: Vec<f32>,
    offsets: Vec<f32>,
}

impl AnimationState {
    /// Fresh state: clockwise, both motions on, angle and offsets zero.
    pub fn new(speed: f32, phases: Vec<f32>) -> Self {
        let offsets = vec![0.0; phases.len()];
        Self {
            direction: SpinDirection::Clockwise,
            rotation_enabled: true,
            bob_enabled: true,
            speed,
            spin: Spin::default(),
            phases,
            offsets,
        }
    }

    /// Advance to `t` seconds since start.
    pub fn update(&mut self, t: f64) {
        if self.rotation_enabled {
            self.spin = Spin {
                angle: spin_angle(t, self.speed),
                direction: self.direction,
            };
        }
        if self.bob_enabled {
            for (offset, phase) in self.offsets.iter_mut().zip(&self.phases) {
                *offset = bob_offset(t, *phase);
            }
        }
    }

    /// Apply a toggle. Returns `false` for actions the scene does not handle.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ReverseRotation => {
                self.direction = self.direction.flipped();
                tracing::info!(direction = ?self.direction, "swapping rotation");
            }
            Action::ToggleBob => {
                self.bob_enabled = !self.bob_enabled;
                tracing::info!(enabled = self.bob_enabled, "toggling up/down motion");
            }
            Action::ToggleRotation => {
                self.rotation_enabled = !self.rotation_enabled;
                tracing::info!(enabled = self.rotation_enabled, "toggling rotation");
            }
            Action::Quit => return false,
        }
        true
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn spin_matrix(&self) -> Mat4 {
        self.spin.matrix()
    }

    /// Vertical offset of rider `index`, or 0 for an unknown index.
    pub fn offset(&self, index: usize) -> f32 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }
}

/// `(t · speed) mod 360`, in degrees, always within `[0, 360)`.
pub fn spin_angle(t: f64, speed: f32) -> f32 {
    let angle = (t * speed as f64).rem_euclid(360.0) as f32;
    // Just below 360 in f64 can round up to 360 in f32.
    if angle >= 360.0 { 0.0 } else { angle }
}

/// `(1 + sin(t + phase)) / 2`, always within `[0, 1]`.
pub fn bob_offset(t: f64, phase: f32) -> f32 {
    ((1.0 + (t + phase as f64).sin()) / 2.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [f32; 4] = [3.6, 1.2, 3.6, 2.4];

    fn state() -> AnimationState {
        AnimationState::new(45.0, PHASES.to_vec())
    }

    #[test]
    fn initial_state() {
        let s = state();
        assert_eq!(s.direction, SpinDirection::Clockwise);
        assert!(s.rotation_enabled && s.bob_enabled);
        assert_eq!(s.spin().angle, 0.0);
        assert_eq!(s.offsets(), &[0.0; 4]);
    }

    #[test]
    fn offsets_at_time_zero_follow_phase() {
        let mut s = state();
        s.update(0.0);
        for (i, phase) in PHASES.iter().enumerate() {
            let expected = (1.0 + phase.sin()) / 2.0;
            assert!((s.offset(i) - expected).abs() < 1e-6);
        }
        assert!((s.offset(0) - 0.2787).abs() < 1e-4);
    }

    #[test]
    fn offsets_stay_in_unit_range() {
        let mut s = state();
        for step in 0..500 {
            s.update(step as f64 * 0.037);
            assert!(s.offsets().iter().all(|o| (0.0..=1.0).contains(o)));
        }
    }

    #[test]
    fn angle_wraps_at_full_turn() {
        let mut s = state();
        s.update(8.0);
        assert_eq!(s.spin().angle, 0.0);
        s.update(2.0);
        assert_eq!(s.spin().angle, 90.0);
        s.update(9.0);
        assert_eq!(s.spin().angle, 45.0);
    }

    #[test]
    fn angle_never_reaches_full_turn() {
        let a = spin_angle((720.0 - 1e-9) / 45.0, 45.0);
        assert!((0.0..360.0).contains(&a), "{a}");
        for k in 1..=4 {
            let edge = k as f64 * 8.0;
            for t in [edge - 1e-10, edge, edge + 1e-10] {
                let a = spin_angle(t, 45.0);
                assert!((0.0..360.0).contains(&a), "t={t} -> {a}");
            }
        }
    }

    #[test]
    fn disabled_rotation_holds_angle() {
        let mut s = state();
        s.update(1.0);
        assert!(s.apply(Action::ToggleRotation));
        s.update(2.0);
        let held = s.spin().angle;
        s.update(3.5);
        assert_eq!(s.spin().angle, held);
        assert_eq!(held, 45.0);
    }

    #[test]
    fn disabled_bob_holds_offsets() {
        let mut s = state();
        s.update(0.5);
        let before = s.offsets().to_vec();
        s.apply(Action::ToggleBob);
        s.update(1.7);
        assert_eq!(s.offsets(), before.as_slice());
        s.apply(Action::ToggleBob);
        s.update(1.7);
        assert_ne!(s.offsets(), before.as_slice());
    }

    #[test]
    fn reversing_flips_axis_on_next_update() {
        let mut s = state();
        s.update(1.0);
        assert_eq!(s.spin().direction, SpinDirection::Clockwise);
        s.apply(Action::ReverseRotation);
        s.update(1.0);
        assert_eq!(s.spin().direction, SpinDirection::CounterClockwise);

        let p = s.spin_matrix().transform_point3(Vec3::X);
        let q = Mat4::from_rotation_y(-45f32.to_radians()).transform_point3(Vec3::X);
        assert!((p - q).length() < 1e-5);
    }

    #[test]
    fn reversing_while_frozen_keeps_display() {
        let mut s = state();
        s.update(1.0);
        s.apply(Action::ToggleRotation);
        s.apply(Action::ReverseRotation);
        s.update(4.0);
        assert_eq!(s.spin().direction, SpinDirection::Clockwise);
        assert_eq!(s.spin().angle, 45.0);
    }

    #[test]
    fn quit_is_not_a_scene_action() {
        let mut s = state();
        assert!(!s.apply(Action::Quit));
    }

    #[test]
    fn unknown_rider_offset_is_zero() {
        assert_eq!(state().offset(99), 0.0);
    }
}
