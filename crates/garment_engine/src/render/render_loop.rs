//! # Render Loop Coordinator
//!
//! Decides when the host should draw. Interactions request a redraw that is
//! served on the next frame; a material pass forces an immediate one. Idle
//! frames draw nothing.

use super::camera::Camera;
use super::material::SurfaceMaterial;
use crate::config::ViewportConfig;
use crate::foundation::collections::MeshId;
use crate::foundation::math::Vec3;
use crate::scene::{MeshNode, StudioLighting};

/// What the host render surface can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCapabilities {
    /// Highest anisotropic filtering level, if the surface reports one
    pub max_anisotropy: Option<u16>,
}

/// One mesh to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// Mesh identity
    pub id: MeshId,
    /// Geometry and shadow flags
    pub mesh: &'a MeshNode,
    /// Material to draw with (customized, or authored before the first pass)
    pub material: &'a SurfaceMaterial,
    /// Asset translation
    pub offset: Vec3,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    /// Index of this frame, starting at 1
    pub frame_index: u64,
    /// Camera pose and projection
    pub camera: &'a Camera,
    /// Light rig
    pub lighting: &'a StudioLighting,
    /// Surface settings
    pub viewport: &'a ViewportConfig,
    /// Visible meshes in authoring order
    pub items: Vec<DrawItem<'a>>,
}

/// Render output supplied by the host
pub trait RenderSurface {
    /// Report surface capabilities once mounted
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::default()
    }

    /// Draw a frame
    fn render(&mut self, frame: &FrameView<'_>);

    /// Release GPU resources and detach from the page
    fn detach(&mut self);
}

/// Redraw bookkeeping
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    needs_redraw: bool,
    frames_rendered: u64,
    forced_redraws: u64,
    elapsed: f32,
}

impl RenderLoop {
    /// Create a loop that draws its first frame on demand
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame at the next tick
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Record a redraw that is performed immediately; any pending request is satisfied by it
    pub fn force_redraw(&mut self) {
        self.forced_redraws += 1;
        self.needs_redraw = false;
    }

    /// Whether a redraw is pending
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Advance time and decide whether this tick draws; consumes the pending request
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        std::mem::take(&mut self.needs_redraw)
    }

    /// Count a drawn frame and return its index
    pub fn record_frame(&mut self) -> u64 {
        self.frames_rendered += 1;
        self.frames_rendered
    }

    /// Frames drawn so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Redraws forced by material passes
    pub fn forced_redraws(&self) -> u64 {
        self.forced_redraws
    }

    /// Seconds of ticked time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
