use crate::camera::LookAtCamera;
use glam::Mat4;
use serde::Serialize;

/// Pixel rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One rendered view: where it goes on screen and how it looks at the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeView {
    pub viewport: Viewport,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Enumerates the views to render each frame.
pub trait Viewpoint {
    fn views(&self, width: u32, height: u32) -> Vec<EyeView>;
}

/// A single full-window view through a fixed camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoViewpoint {
    pub camera: LookAtCamera,
}

impl MonoViewpoint {
    pub fn new(camera: LookAtCamera) -> Self {
        Self { camera }
    }
}

impl Viewpoint for MonoViewpoint {
    fn views(&self, width: u32, height: u32) -> Vec<EyeView> {
        let mut camera = self.camera;
        camera.set_viewport_size(width, height);
        vec![EyeView {
            viewport: Viewport {
                x: 0,
                y: 0,
                width,
                height,
            },
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_covers_whole_window() {
        let views = MonoViewpoint::default().views(800, 600);
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].viewport,
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn projection_follows_window_aspect() {
        let vp = MonoViewpoint::default();
        let wide = vp.views(1600, 400)[0].projection;
        let square = vp.views(400, 400)[0].projection;
        // x scale shrinks as the window widens.
        assert!(wide.x_axis.x < square.x_axis.x);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }
}
