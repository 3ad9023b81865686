//! Carousel scene: riders, animation state, transform composition, draw lists.
//!
//! # Invariants
//! - All mutable scene state lives in [`AnimationState`]; nothing is global.
//! - State changes only through [`AnimationState::update`] (the clock) and
//!   [`AnimationState::apply`] (key toggles).
//! - A frame is an explicit ordered [`DrawList`]: roof, ground, poles, then the
//!   riders in configuration order.

pub mod animation;
mod carousel;
pub mod config;
pub mod draw;
pub mod transform;

pub use animation::{AnimationState, Spin, SpinDirection};
pub use carousel::Carousel;
pub use config::{CameraConfig, ConfigError, RiderConfig, SceneConfig};
pub use draw::{DrawItem, DrawList, compose_frame};
pub use transform::{Pose, Rider, model_matrix, model_view, pose_correction};

pub fn crate_info() -> &'static str {
    "carousel-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
