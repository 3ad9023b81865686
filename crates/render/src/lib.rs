//! Rendering adapter: renderer-agnostic frame interface.
//!
//! A frame is a list of [`ViewFrame`]s, one per viewport the [`Viewpoint`]
//! reports. Each carries the view's projection and the scene's draw list;
//! a [`Renderer`] folds over it in order.
//!
//! # Invariants
//! - Renderers never mutate scene state.
//! - Draw order is exactly the draw list's order.

mod camera;
mod renderer;
mod view;

pub use camera::LookAtCamera;
pub use renderer::{DebugTextRenderer, Renderer, ViewFrame, build_frame};
pub use view::{EyeView, MonoViewpoint, Viewpoint, Viewport};

pub fn crate_info() -> &'static str {
    "carousel-render v0.1.0"
}
