//! # Garment Engine
//!
//! Mesh-to-material customization engine for a configurable hoodie viewer.
//!
//! ## Features
//!
//! - **Part Classification**: curated mesh-name table with keyword fallback
//! - **Fabric Textures**: exhaustive preloading with lining-to-main fallback
//! - **Material Customization**: copy-on-first-write, idempotent material passes
//! - **Framing**: bounds-driven camera distance with presets, zoom and orbit
//! - **Redraw Scheduling**: frames are only drawn when something changed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use garment_engine::prelude::*;
//!
//! struct Headless;
//!
//! impl RenderSurface for Headless {
//!     fn render(&mut self, frame: &FrameView<'_>) {
//!         println!("frame {} with {} meshes", frame.frame_index, frame.items.len());
//!     }
//!
//!     fn detach(&mut self) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewerConfig::load_validated("resources/config/viewer.toml")?;
//!     let mut viewer = Viewer::new(
//!         config,
//!         Box::new(ObjAssetSource::new("public")),
//!         Box::new(FileImageSource::new("public")),
//!     )?;
//!     viewer.mount(Box::new(Headless))?;
//!     viewer.load_model()?;
//!     viewer.select_fabric(MaterialSlot::Main, FabricId::Teddy);
//!     viewer.set_camera_view("3/4-front");
//!     viewer.frame(1.0 / 60.0);
//!     viewer.teardown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod catalog;
pub mod classify;
pub mod assets;
pub mod scene;
pub mod render;
pub mod input;

mod viewer;

pub use viewer::{LoadState, Viewer, ViewerError};

/// Common imports for viewer hosts
pub mod prelude {
    pub use crate::{
        Viewer, ViewerError, LoadState,
        foundation::math::{Vec3, Spherical},
        config::{Config, ConfigError, ViewerConfig},
        catalog::{Color, ColorSelection, FabricId, FabricSelection},
        classify::{MaterialSlot, PartCategory, PartClassifier},
        assets::{AssetError, FileImageSource, ImageData, ImageSource, ObjAssetSource},
        scene::{Aabb, AssetSource, GarmentAsset, MeshGeometry, MeshNode},
        render::{Camera, FrameView, RenderSurface, SurfaceCapabilities, SurfaceMaterial, ViewPreset, ZoomDirection},
        input::{KeyCode, MouseButton},
    };
}
