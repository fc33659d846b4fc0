//! Texture file naming convention
//!
//! Fabric maps live at `{base}{fabric}_{map}_{suffix}.png`, where the suffix
//! identifies the UV tile of the material slot (`1001` for the main body).
//! Some combinations are deliberately not shipped; their paths resolve to an
//! inert placeholder instead of a failing file request.

use serde::{Deserialize, Serialize};

use crate::catalog::FabricId;
use crate::classify::MaterialSlot;
use crate::render::MapType;

/// Bundle paths of one fabric/slot texture trio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePaths {
    /// Diffuse map path
    pub diffuse: String,
    /// Normal map path
    pub normal: String,
    /// Metallic-roughness map path
    pub metallic_roughness: String,
}

impl TexturePaths {
    /// Path of one map of the trio
    pub fn get(&self, map: MapType) -> &str {
        match map {
            MapType::Diffuse => &self.diffuse,
            MapType::Normal => &self.normal,
            MapType::MetallicRoughness => &self.metallic_roughness,
        }
    }
}

/// Where a texture request should actually be served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// Load the file from the image source
    File(String),
    /// Known-absent asset: substitute the 1x1 transparent placeholder
    Placeholder,
}

/// Naming convention of the fabric texture bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureLayout {
    /// Directory prefix of every fabric map
    pub base_path: String,
    /// UV tile suffix of the main slot
    pub main_suffix: String,
    /// UV tile suffix of the lining slot
    pub lining_suffix: String,
    /// Suffixes whose files are deliberately not shipped
    pub excluded_suffixes: Vec<String>,
}

impl Default for TextureLayout {
    fn default() -> Self {
        Self {
            base_path: "/hoodie-materials/".to_string(),
            main_suffix: "1001".to_string(),
            lining_suffix: "999".to_string(),
            excluded_suffixes: vec!["999".to_string(), "981".to_string()],
        }
    }
}

impl TextureLayout {
    /// Suffix of a slot; `MaterialSlot::None` has no textures
    pub fn suffix(&self, slot: MaterialSlot) -> Option<&str> {
        match slot {
            MaterialSlot::Main => Some(&self.main_suffix),
            MaterialSlot::Lining => Some(&self.lining_suffix),
            MaterialSlot::None => None,
        }
    }

    /// Paths of the texture trio of a fabric/slot pair
    pub fn paths(&self, fabric: FabricId, slot: MaterialSlot) -> Option<TexturePaths> {
        let suffix = self.suffix(slot)?;
        let path = |map: MapType| {
            format!("{}{}_{}_{}.png", self.base_path, fabric.texture_prefix(), map.file_token(), suffix)
        };
        Some(TexturePaths {
            diffuse: path(MapType::Diffuse),
            normal: path(MapType::Normal),
            metallic_roughness: path(MapType::MetallicRoughness),
        })
    }

    /// Substitute the placeholder for deliberately absent files
    pub fn resolve(&self, path: &str) -> ResolvedPath {
        let excluded = self
            .excluded_suffixes
            .iter()
            .any(|suffix| path.ends_with(&format!("_{}.png", suffix)));
        if excluded {
            ResolvedPath::Placeholder
        } else {
            ResolvedPath::File(path.to_string())
        }
    }

    /// Check the layout is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.main_suffix.is_empty() {
            return Err("Main texture suffix cannot be empty".to_string());
        }
        if self.excluded_suffixes.contains(&self.main_suffix) {
            return Err(format!("Main texture suffix '{}' is excluded", self.main_suffix));
        }
        Ok(())
    }
}
