use crate::view::{EyeView, Viewpoint};
use carousel_scene::{Carousel, DrawList};
use serde::Serialize;

/// Everything needed to draw one view of one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub eye: EyeView,
    pub draws: DrawList,
}

/// Compose the carousel's draw list for every view the viewpoint reports.
pub fn build_frame(
    viewpoint: &dyn Viewpoint,
    width: u32,
    height: u32,
    carousel: &Carousel,
) -> Vec<ViewFrame> {
    let frames: Vec<ViewFrame> = viewpoint
        .views(width, height)
        .into_iter()
        .map(|eye| ViewFrame {
            draws: carousel.draw_list(eye.view),
            eye,
        })
        .collect();
    tracing::trace!(views = frames.len(), width, height, "built frame");
    frames
}

/// Renderer-agnostic interface.
///
/// Per view a renderer clears its viewport, uploads the projection, then
/// walks the draw list in order uploading each modelview and drawing its mesh.
pub trait Renderer {
    type Output;

    fn render(&mut self, frames: &[ViewFrame]) -> Self::Output;
}

/// Produces a human-readable dump of a frame. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames_rendered: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frames: &[ViewFrame]) -> String {
        let mut lines = vec![format!(
            "=== Frame {} ({} view(s)) ===",
            self.frames_rendered,
            frames.len()
        )];
        for (i, frame) in frames.iter().enumerate() {
            let vp = frame.eye.viewport;
            lines.push(format!(
                "view {i}: viewport=({}, {}, {}x{}) draws={}",
                vp.x,
                vp.y,
                vp.width,
                vp.height,
                frame.draws.len()
            ));
            lines.extend(frame.draws.iter().map(|item| {
                let p = item.model_view.w_axis;
                format!(
                    "  {:<8} eye=({:.2}, {:.2}, {:.2})",
                    item.mesh.to_string(),
                    p.x,
                    p.y,
                    p.z
                )
            }));
        }
        self.frames_rendered += 1;

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MonoViewpoint;

    #[test]
    fn one_view_seven_draws() {
        let carousel = Carousel::default();
        let frames = build_frame(&MonoViewpoint::default(), 512, 512, &carousel);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].draws.len(), 7);
        assert_eq!(frames[0].eye.view, frames[0].draws.items()[0].model_view);
    }

    #[test]
    fn debug_dump_lists_meshes_in_order() {
        let mut carousel = Carousel::default();
        carousel.update(0.0);
        let frames = build_frame(&MonoViewpoint::default(), 512, 512, &carousel);

        let mut renderer = DebugTextRenderer::new();
        let out = renderer.render(&frames);
        assert!(out.contains("=== Frame 0 (1 view(s)) ==="));
        assert!(out.contains("viewport=(0, 0, 512x512) draws=7"));
        let order: Vec<usize> = ["roof", "ground", "poles", "cow", "hippo", "lion", "skeleton"]
            .iter()
            .map(|name| out.find(&format!("  {name}")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(out.contains("  roof     eye=("));
        // Static structure sits at the origin, ten units in front of the camera.
        let roof = frames[0].draws.items()[0].model_view.w_axis;
        assert!((roof - glam::Vec4::new(0.0, 0.0, -10.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn dump_has_one_line_per_draw() {
        let carousel = Carousel::default();
        let frames = build_frame(&MonoViewpoint::default(), 64, 64, &carousel);
        let out = DebugTextRenderer::new().render(&frames);
        // Header, view line, seven draws.
        assert_eq!(out.lines().count(), 9);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn frame_counter_advances() {
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&[]);
        let out = renderer.render(&[]);
        assert!(out.contains("Frame 1 (0 view(s))"));
        assert_eq!(renderer.frames_rendered(), 2);
    }
}
