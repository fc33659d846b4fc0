//! # Viewer Configuration
//!
//! Everything the storefront viewer needs to know before mounting: the
//! fixed viewport, camera limits, the texture bundle layout, the garment
//! path and the curated part table of the shipped asset revision.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::assets::TextureLayout;
use crate::catalog::Color;
use crate::classify::PartTable;
use crate::foundation::math::constants;

/// # Viewport Configuration
///
/// Fixed render surface dimensions and renderer-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Background clear color
    pub clear_color: Color,
    /// Tone-mapping exposure
    pub exposure: f32,
    /// Whether shadow maps are rendered
    pub shadows: bool,
}

impl ViewportConfig {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the viewport
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Viewport must not be empty: {}x{}", self.width, self.height));
        }
        if self.exposure <= 0.0 {
            return Err("Exposure must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 774,
            height: 700,
            clear_color: Color::from_hex(0xc4c4c4),
            exposure: 1.2,
            shadows: true,
        }
    }
}

/// # Camera Configuration
///
/// Projection, distance bounds and interaction tuning of the orbit camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
    /// Reference distance as a fraction of the garment's bounding diagonal
    pub reference_scale: f32,
    /// Distance multiplier of the zoom-in button
    pub zoom_in_factor: f32,
    /// Distance multiplier of the zoom-out button
    pub zoom_out_factor: f32,
    /// Per-notch distance multiplier of the mouse wheel
    pub wheel_zoom_base: f32,
    /// Fraction of drag velocity removed each frame
    pub damping_factor: f32,
    /// Drag rotation speed multiplier
    pub rotate_speed: f32,
    /// Angular step per frame while a navigation key is held, in radians
    pub keyboard_step: f32,
    /// Polar margin keeping keyboard rotation away from the poles, in radians
    pub polar_margin: f32,
}

impl CameraConfig {
    /// Validate the camera settings
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0 < self.fov_degrees && self.fov_degrees < 180.0) {
            return Err(format!("Field of view out of range: {}", self.fov_degrees));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!("Invalid clip planes: near {} far {}", self.near, self.far));
        }
        if self.min_distance <= 0.0 || self.max_distance < self.min_distance {
            return Err(format!(
                "Invalid distance bounds: [{}, {}]",
                self.min_distance, self.max_distance
            ));
        }
        if self.reference_scale <= 0.0 {
            return Err("Reference scale must be positive".to_string());
        }
        if !(0.0 < self.zoom_in_factor && self.zoom_in_factor < 1.0) || self.zoom_out_factor <= 1.0 {
            return Err("Zoom factors must shrink (in) and grow (out) the distance".to_string());
        }
        if !(0.0 < self.wheel_zoom_base && self.wheel_zoom_base < 1.0) {
            return Err("Wheel zoom base must lie in (0, 1)".to_string());
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err("Damping factor must lie in [0, 1]".to_string());
        }
        if !(0.0..constants::HALF_PI).contains(&self.polar_margin) {
            return Err("Polar margin must lie in [0, PI/2)".to_string());
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 10.0,
            max_distance: 100.0,
            reference_scale: 1.0,
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
            wheel_zoom_base: 0.95,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            keyboard_step: constants::PI / 80.0,
            polar_margin: 0.1,
        }
    }
}

/// # Texture Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Anisotropy used when the render surface does not report its maximum
    pub max_anisotropy: u16,
    /// Image requests served per frame while preloading
    pub preload_budget_per_frame: usize,
    /// Naming convention of the fabric bundle
    pub layout: TextureLayout,
}

impl TextureConfig {
    /// Validate the texture settings
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        if self.preload_budget_per_frame == 0 {
            return Err("Preload budget must be at least 1 image per frame".to_string());
        }
        Ok(())
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            max_anisotropy: 16,
            preload_budget_per_frame: 6,
            layout: TextureLayout::default(),
        }
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Bundle path of the garment geometry
    pub model_path: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_path: "/models/hoodie.obj".to_string(),
        }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration handed to [`crate::Viewer::new`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Render surface settings
    pub viewport: ViewportConfig,
    /// Orbit camera settings
    pub camera: CameraConfig,
    /// Fabric texture settings
    pub textures: TextureConfig,
    /// Garment asset settings
    pub assets: AssetConfig,
    /// Curated part table of the shipped asset revision
    pub parts: PartTable,
}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.viewport.validate()?;
        self.camera.validate()?;
        self.textures.validate()?;
        if self.assets.model_path.is_empty() {
            return Err("Model path cannot be empty".to_string());
        }
        self.parts.validate()?;
        Ok(())
    }

    /// Load from a `.toml` or `.ron` file and validate
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

impl Config for ViewerConfig {}
