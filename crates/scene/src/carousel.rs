use crate::animation::AnimationState;
use crate::config::SceneConfig;
use crate::draw::{DrawList, compose_frame};
use crate::transform::Rider;
use carousel_input::Action;
use glam::Mat4;

/// The whole ride: riders from the config plus the animation state driving them.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: SceneConfig,
    riders: Vec<Rider>,
    state: AnimationState,
}

impl Carousel {
    pub fn new(config: SceneConfig) -> Self {
        let riders: Vec<Rider> = config.riders.iter().map(Rider::from).collect();
        let phases = riders.iter().map(|r| r.phase).collect();
        let state = AnimationState::new(config.spin_speed, phases);
        tracing::debug!(riders = riders.len(), speed = config.spin_speed, "carousel ready");
        Self {
            config,
            riders,
            state,
        }
    }

    /// Advance the clock to `t` seconds since start.
    pub fn update(&mut self, t: f64) {
        self.state.update(t);
    }

    /// Forward a toggle to the animation state.
    pub fn apply(&mut self, action: Action) -> bool {
        self.state.apply(action)
    }

    pub fn draw_list(&self, view: Mat4) -> DrawList {
        compose_frame(view, &self.state, &self.riders)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
