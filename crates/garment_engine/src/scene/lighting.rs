//! Studio lighting rig for garment presentation
//!
//! The viewer does not shade anything itself; it describes the rig and the
//! host renderer realizes it.

use crate::catalog::Color;
use crate::foundation::math::{constants, Vec3};

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light shining from `position` towards the origin
    Directional,
    /// Spot light (like a flashlight)
    Spot,
}

/// Shadow map parameters of a shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Square shadow map resolution
    pub map_size: u32,
    /// Near plane of the shadow camera
    pub near: f32,
    /// Far plane of the shadow camera
    pub far: f32,
    /// Half extent of the orthographic shadow camera
    pub extent: f32,
    /// Depth bias
    pub bias: f32,
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position
    pub position: Vec3,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Light range (spot lights)
    pub range: f32,
    /// Cone angle in radians (spot lights)
    pub angle: f32,
    /// Soft edge fraction of the cone (spot lights)
    pub penumbra: f32,
    /// Shadow parameters, when the light casts shadows
    pub shadow: Option<ShadowSettings>,
}

impl Light {
    /// Create a directional light aimed at the origin
    pub fn directional(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            position,
            color,
            intensity,
            range: 0.0,
            angle: 0.0,
            penumbra: 0.0,
            shadow: None,
        }
    }

    /// Create a spot light
    pub fn spot(position: Vec3, color: Color, intensity: f32, range: f32, angle: f32, penumbra: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            position,
            color,
            intensity,
            range,
            angle,
            penumbra,
            shadow: None,
        }
    }

    /// Make the light cast shadows
    pub fn with_shadow(mut self, shadow: ShadowSettings) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Unit direction the light travels in
    pub fn direction(&self) -> Vec3 {
        (-self.position).try_normalize(f32::EPSILON).unwrap_or_else(|| -Vec3::y())
    }
}

/// Lighting environment for the garment viewer
#[derive(Debug, Clone, PartialEq)]
pub struct StudioLighting {
    /// Ambient light color
    pub ambient_color: Color,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Key, fill, back and accent lights
    pub lights: Vec<Light>,
}

impl StudioLighting {
    /// Key/fill/back/side rig tuned for fabric detail
    pub fn product_studio() -> Self {
        let white = Color::WHITE;
        let key = Light::directional(Vec3::new(8.0, 12.0, 6.0), white, 1.8).with_shadow(ShadowSettings {
            map_size: 4096,
            near: 0.1,
            far: 100.0,
            extent: 15.0,
            bias: -0.0001,
        });

        Self {
            ambient_color: white,
            ambient_intensity: 0.4,
            lights: vec![
                key,
                Light::directional(Vec3::new(-6.0, 8.0, 4.0), white, 0.8),
                Light::directional(Vec3::new(0.0, 6.0, -12.0), white, 1.2),
                Light::spot(Vec3::new(12.0, 8.0, 2.0), white, 0.6, 30.0, constants::PI * 0.15, 0.3),
            ],
        }
    }

    /// Lights that cast shadows
    pub fn shadow_casters(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter().filter(|l| l.shadow.is_some())
    }
}

impl Default for StudioLighting {
    fn default() -> Self {
        Self::product_studio()
    }
}
