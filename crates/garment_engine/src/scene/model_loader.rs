//! Garment model loading and framing
//!
//! A single load attempt per call, no retry. On success every mesh takes
//! part in shadowing; on failure the error is returned and nothing is
//! handed to the scene.

use super::{Aabb, GarmentAsset};
use crate::assets::AssetError;

/// Asset-loading primitive supplied by the host
pub trait AssetSource {
    /// Fetch and parse the garment geometry at a bundle path
    fn load_garment(&self, path: &str) -> Result<GarmentAsset, AssetError>;
}

/// Loads the garment and prepares it for framing
pub struct ModelLoader {
    source: Box<dyn AssetSource>,
}

impl ModelLoader {
    /// Create a loader over a host asset source
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self { source }
    }

    /// Load the garment and flag every mesh as shadow caster and receiver
    pub fn load(&self, path: &str) -> Result<GarmentAsset, AssetError> {
        log::info!("Loading garment model from {}", path);

        let mut asset = self.source.load_garment(path).map_err(|e| {
            log::error!("Failed to load garment model {}: {}", path, e);
            e
        })?;

        asset.for_each_mesh_mut(|_, mesh| {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
        });

        Ok(asset)
    }

    /// World-space bounds of every mesh, including the asset offset
    pub fn compute_bounds(asset: &GarmentAsset) -> Aabb {
        asset
            .meshes()
            .map(|(_, mesh)| mesh.geometry.bounds())
            .fold(Aabb::empty(), |acc, b| acc.union(&b))
            .translated(&asset.offset)
    }

    /// Move the asset so the center of `bounds` sits at the world origin
    pub fn center_at_origin(asset: &mut GarmentAsset, bounds: &Aabb) {
        if bounds.is_empty() {
            log::warn!("Cannot center garment with empty bounds");
            return;
        }
        asset.offset -= bounds.center();
        log::debug!("Garment offset set to {:?}", asset.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::SurfaceMaterial;
    use crate::scene::{MeshGeometry, MeshNode};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    struct FixedSource(Option<GarmentAsset>);

    impl AssetSource for FixedSource {
        fn load_garment(&self, path: &str) -> Result<GarmentAsset, AssetError> {
            self.0.clone().ok_or_else(|| AssetError::NotFound(path.to_string()))
        }
    }

    fn box_asset(min: Vec3, max: Vec3) -> GarmentAsset {
        let mut asset = GarmentAsset::new();
        asset.add_mesh(MeshNode::new(
            "Main_fabric",
            MeshGeometry::new(vec![min, max], Vec::new()),
            Arc::new(SurfaceMaterial::default()),
        ));
        asset
    }

    #[test]
    fn test_load_enables_shadows() {
        let loader = ModelLoader::new(Box::new(FixedSource(Some(box_asset(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))))));
        let asset = loader.load("/hoodie.obj").unwrap();
        for (_, mesh) in asset.meshes() {
            assert!(mesh.cast_shadow);
            assert!(mesh.receive_shadow);
        }
    }

    #[test]
    fn test_load_failure_is_surfaced() {
        let loader = ModelLoader::new(Box::new(FixedSource(None)));
        assert!(matches!(loader.load("/hoodie.obj"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_center_at_origin() {
        let mut asset = box_asset(Vec3::new(2.0, 10.0, -4.0), Vec3::new(6.0, 16.0, 8.0));
        let bounds = ModelLoader::compute_bounds(&asset);
        assert_relative_eq!(bounds.diagonal_length(), 14.0, epsilon = 1e-5);

        ModelLoader::center_at_origin(&mut asset, &bounds);
        let centered = ModelLoader::compute_bounds(&asset);
        assert_relative_eq!(centered.center(), Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(centered.diagonal_length(), 14.0, epsilon = 1e-5);
    }
}
