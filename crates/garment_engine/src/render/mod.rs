//! Rendering-side state: materials, textures, camera and redraw scheduling
//!
//! Nothing here talks to a GPU. The host implements [`RenderSurface`] and
//! receives a [`FrameView`] describing what to draw.

pub mod camera;
pub mod material;
pub mod material_applicator;
pub mod render_loop;
pub mod texture;
pub mod texture_cache;
pub mod view_controller;

pub use camera::Camera;
pub use material::{MaterialSnapshot, SurfaceMaterial};
pub use material_applicator::{ApplyReport, HardwareFinish, MaterialApplicator, Treatment};
pub use render_loop::{DrawItem, FrameView, RenderLoop, RenderSurface, SurfaceCapabilities};
pub use texture::{FilterMode, MapType, SamplerSettings, Texture, TextureId, WrapMode};
pub use texture_cache::{PumpReport, TextureCache, TextureSet};
pub use view_controller::{ViewController, ViewPreset, ZoomDirection};
