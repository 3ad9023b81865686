//! wgpu render backend for the carousel.
//!
//! Uploads each scene mesh once, then draws frames by walking the draw list:
//! every draw item gets its own slot in a dynamic-offset uniform buffer holding
//! the view's projection, the item's modelview and a flat colour.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Draw calls are issued in draw-list order, views in viewpoint order.

mod gpu;
mod shaders;

pub use gpu::{GpuTarget, WgpuRenderer, mesh_color};
