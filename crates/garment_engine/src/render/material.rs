//! PBR surface material as seen by the host renderer
//!
//! Mirrors the standard metallic-roughness workflow: a base color, scalar
//! metalness/roughness factors and optional image maps. Maps are shared
//! `Arc<Texture>` references owned by the texture cache.

use std::sync::Arc;

use super::texture::{same_texture, Texture};
use crate::catalog::Color;

/// Metallic-roughness surface material
#[derive(Debug, Clone)]
pub struct SurfaceMaterial {
    /// Optional name for debugging
    pub name: Option<String>,
    /// Base color, multiplied with the diffuse map when present
    pub color: Color,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Diffuse (base color) map
    pub map: Option<Arc<Texture>>,
    /// Normal map
    pub normal_map: Option<Arc<Texture>>,
    /// Metalness map
    pub metalness_map: Option<Arc<Texture>>,
    /// Roughness map
    pub roughness_map: Option<Arc<Texture>>,
    /// Displacement map
    pub displacement_map: Option<Arc<Texture>>,
    /// Normal map intensity
    pub normal_scale: f32,
    /// Displacement amplitude
    pub displacement_scale: f32,
    /// Displacement offset
    pub displacement_bias: f32,
    /// Alpha value
    pub opacity: f32,
    /// Whether alpha blending is enabled
    pub transparent: bool,
    /// Whether meshes using this material are drawn
    pub visible: bool,
    /// Set when the renderer must re-upload this material
    pub needs_update: bool,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            name: None,
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            map: None,
            normal_map: None,
            metalness_map: None,
            roughness_map: None,
            displacement_map: None,
            normal_scale: 1.0,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            opacity: 1.0,
            transparent: false,
            visible: true,
            needs_update: false,
        }
    }
}

impl SurfaceMaterial {
    /// Create a material with a base color and surface factors
    pub fn new(color: Color, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness: metalness.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a diffuse map
    pub fn with_map(mut self, texture: Arc<Texture>) -> Self {
        self.map = Some(texture);
        self
    }

    /// Detach every image map
    pub fn clear_maps(&mut self) {
        self.map = None;
        self.normal_map = None;
        self.metalness_map = None;
        self.roughness_map = None;
        self.displacement_map = None;
    }

    /// Flag the material for re-upload
    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    /// Whether two materials would render identically
    ///
    /// Maps are compared by identity, scalar factors exactly.
    pub fn same_appearance(&self, other: &SurfaceMaterial) -> bool {
        self.color == other.color
            && self.metalness == other.metalness
            && self.roughness == other.roughness
            && self.normal_scale == other.normal_scale
            && self.displacement_scale == other.displacement_scale
            && self.displacement_bias == other.displacement_bias
            && self.opacity == other.opacity
            && self.transparent == other.transparent
            && self.visible == other.visible
            && same_texture(&self.map, &other.map)
            && same_texture(&self.normal_map, &other.normal_map)
            && same_texture(&self.metalness_map, &other.metalness_map)
            && same_texture(&self.roughness_map, &other.roughness_map)
            && same_texture(&self.displacement_map, &other.displacement_map)
    }
}

/// As-authored values recorded before the first customization
#[derive(Debug, Clone)]
pub struct MaterialSnapshot {
    /// Authored base color
    pub color: Color,
    /// Authored metalness
    pub metalness: f32,
    /// Authored roughness
    pub roughness: f32,
    /// Authored diffuse map
    pub map: Option<Arc<Texture>>,
}

impl MaterialSnapshot {
    /// Record the restorable properties of a material
    pub fn capture(material: &SurfaceMaterial) -> Self {
        Self {
            color: material.color,
            metalness: material.metalness,
            roughness: material.roughness,
            map: material.map.clone(),
        }
    }
}
