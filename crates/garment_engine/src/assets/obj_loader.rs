//! OBJ/MTL garment loader
//!
//! Every named object (`o`) or group (`g`) of the OBJ file becomes one
//! paintable [`MeshNode`]; its name is what the part classifier sees.

use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use super::{resolve_bundle_path, AssetError};
use crate::catalog::Color;
use crate::foundation::math::Vec3;
use crate::render::SurfaceMaterial;
use crate::scene::{AssetSource, GarmentAsset, MeshGeometry, MeshNode};

/// Loads garment geometry from OBJ files in an unpacked asset bundle
#[derive(Debug, Clone)]
pub struct ObjAssetSource {
    root: PathBuf,
}

impl ObjAssetSource {
    /// Serve bundle paths from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Parse OBJ text held in memory; material libraries are not resolved
    pub fn parse_str(obj: &str) -> Result<GarmentAsset, AssetError> {
        let mut reader = BufReader::new(obj.as_bytes());
        let (models, _) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| AssetError::InvalidData(format!("Failed to parse OBJ: {}", e)))?;
        build_asset(models, Vec::new())
    }
}

impl AssetSource for ObjAssetSource {
    fn load_garment(&self, path: &str) -> Result<GarmentAsset, AssetError> {
        let file_path = resolve_bundle_path(&self.root, path);
        if !file_path.exists() {
            return Err(AssetError::NotFound(file_path.display().to_string()));
        }
        match file_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("obj") => {}
            _ => return Err(AssetError::UnsupportedFormat(path.to_string())),
        }

        let (models, materials) = tobj::load_obj(&file_path, &load_options())
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load {}: {}", file_path.display(), e)))?;

        let materials = materials.unwrap_or_else(|e| {
            log::warn!("Material library for {} unavailable ({}), using defaults", path, e);
            Vec::new()
        });

        build_asset(models, materials)
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

fn build_asset(models: Vec<tobj::Model>, materials: Vec<tobj::Material>) -> Result<GarmentAsset, AssetError> {
    let authored: Vec<Arc<SurfaceMaterial>> = materials.iter().map(|m| Arc::new(convert_material(m))).collect();
    let fallback = Arc::new(SurfaceMaterial::new(Color::DEFAULT_GREY, 0.0, 0.5).with_name("default"));

    let mut asset = GarmentAsset::new();
    for model in models {
        let mesh = model.mesh;
        if mesh.positions.is_empty() {
            log::debug!("Skipping empty OBJ object '{}'", model.name);
            continue;
        }

        let geometry = MeshGeometry {
            positions: mesh.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2])).collect(),
            normals: mesh.normals.chunks_exact(3).map(|n| Vec3::new(n[0], n[1], n[2])).collect(),
            tex_coords: mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect(),
            indices: mesh.indices,
        };

        let material = mesh
            .material_id
            .and_then(|id| authored.get(id).cloned())
            .unwrap_or_else(|| fallback.clone());

        asset.add_mesh(MeshNode::new(model.name, geometry, material));
    }

    if asset.is_empty() {
        return Err(AssetError::InvalidData("No meshes found in OBJ file".to_string()));
    }

    log::info!("Loaded garment with {} meshes", asset.mesh_count());
    Ok(asset)
}

fn convert_material(material: &tobj::Material) -> SurfaceMaterial {
    let color = material
        .diffuse
        .map_or(Color::DEFAULT_GREY, |[r, g, b]| Color::rgb(r, g, b));

    // Blinn-Phong exponent to perceptual roughness
    let roughness = material
        .shininess
        .map_or(0.5, |ns| (2.0 / (ns.max(0.0) + 2.0)).sqrt());

    let mut converted = SurfaceMaterial::new(color, 0.0, roughness).with_name(material.name.clone());
    if let Some(dissolve) = material.dissolve {
        converted.opacity = dissolve.clamp(0.0, 1.0);
        converted.transparent = dissolve < 1.0;
    }
    converted
}
