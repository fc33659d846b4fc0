//! Texture resources and sampling parameters

use std::sync::Arc;

use crate::assets::ImageData;

/// Handle identifying a texture within one viewer session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Role of an image map within a fabric's texture trio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapType {
    /// Base color/albedo map
    Diffuse,
    /// Tangent-space normal map
    Normal,
    /// Metallic-roughness map (metallic in B channel, roughness in G channel)
    MetallicRoughness,
}

impl MapType {
    /// Every map of a texture set, in load order
    pub const ALL: [MapType; 3] = [MapType::Diffuse, MapType::Normal, MapType::MetallicRoughness];

    /// Token used in texture file names
    pub fn file_token(self) -> &'static str {
        match self {
            MapType::Diffuse => "diffuse",
            MapType::Normal => "normal",
            MapType::MetallicRoughness => "metallicroughness",
        }
    }
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Sampler configuration handed to the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    /// Horizontal wrapping
    pub wrap_s: WrapMode,
    /// Vertical wrapping
    pub wrap_t: WrapMode,
    /// Whether the image is flipped vertically on upload
    pub flip_y: bool,
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Minification filter
    pub min_filter: FilterMode,
    /// Filter between mip levels; `None` disables mipmapping
    pub mipmap_filter: Option<FilterMode>,
    /// Anisotropic filtering level
    pub anisotropy: u16,
}

impl SamplerSettings {
    /// Settings for fabric maps: edge-clamped, unflipped (glTF UV convention),
    /// trilinear and at the host's maximum anisotropy
    pub fn fabric(max_anisotropy: u16) -> Self {
        Self {
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            flip_y: false,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: Some(FilterMode::Linear),
            anisotropy: max_anisotropy.max(1),
        }
    }
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            flip_y: true,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: None,
            anisotropy: 1,
        }
    }
}

/// A decoded image map together with how it is sampled
#[derive(Debug)]
pub struct Texture {
    /// Session-unique handle
    pub id: TextureId,
    /// Source path, for debugging
    pub label: String,
    /// Decoded RGBA pixels
    pub image: ImageData,
    /// Sampling parameters
    pub sampler: SamplerSettings,
    /// Whether this is the inert stand-in for a deliberately absent file
    pub placeholder: bool,
}

impl Texture {
    /// Wrap decoded pixels into a shareable texture
    pub fn new(id: TextureId, label: impl Into<String>, image: ImageData, sampler: SamplerSettings) -> Arc<Self> {
        Arc::new(Self {
            id,
            label: label.into(),
            image,
            sampler,
            placeholder: false,
        })
    }

    /// The 1x1 fully transparent stand-in
    pub fn placeholder(id: TextureId, label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id,
            label: label.into(),
            image: ImageData::solid_color(1, 1, [0, 0, 0, 0]),
            sampler: SamplerSettings::default(),
            placeholder: true,
        })
    }

    /// Texture dimensions (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }
}

/// Whether two optional texture references point at the same texture
pub fn same_texture(a: &Option<Arc<Texture>>, b: &Option<Arc<Texture>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabric_sampler_settings() {
        let sampler = SamplerSettings::fabric(16);
        assert_eq!(sampler.wrap_s, WrapMode::ClampToEdge);
        assert_eq!(sampler.wrap_t, WrapMode::ClampToEdge);
        assert!(!sampler.flip_y);
        assert_eq!(sampler.mipmap_filter, Some(FilterMode::Linear));
        assert_eq!(sampler.anisotropy, 16);
        assert_eq!(SamplerSettings::fabric(0).anisotropy, 1);
    }

    #[test]
    fn test_placeholder_is_transparent_pixel() {
        let texture = Texture::placeholder(TextureId(7), "cotton_diffuse_999.png");
        assert!(texture.placeholder);
        assert_eq!(texture.size(), (1, 1));
        assert_eq!(texture.image.data, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_same_texture_compares_identity() {
        let a = Some(Texture::placeholder(TextureId(1), "a"));
        let b = Some(Texture::placeholder(TextureId(1), "a"));
        assert!(same_texture(&a, &a.clone()));
        assert!(!same_texture(&a, &b));
        assert!(same_texture(&None, &None));
    }

    #[test]
    fn test_map_file_tokens() {
        assert_eq!(MapType::MetallicRoughness.file_token(), "metallicroughness");
    }
}
