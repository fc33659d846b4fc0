//! Asset loading: garment geometry, texture images and texture naming

pub mod image_loader;
pub mod obj_loader;
pub mod texture_paths;

pub use image_loader::{FileImageSource, ImageData, ImageSource};
pub use obj_loader::ObjAssetSource;
pub use texture_paths::{ResolvedPath, TextureLayout, TexturePaths};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Resolve a bundle path (`/hoodie-materials/x.png`) against an asset root
///
/// Bundle paths are URL-like and rooted at the static asset bundle, so a
/// leading slash is dropped before joining.
pub(crate) fn resolve_bundle_path(root: &Path, bundle_path: &str) -> PathBuf {
    root.join(bundle_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_paths_resolve_under_root() {
        let resolved = resolve_bundle_path(Path::new("/srv/bundle"), "/hoodie-materials/a.png");
        assert_eq!(resolved, PathBuf::from("/srv/bundle/hoodie-materials/a.png"));

        let relative = resolve_bundle_path(Path::new("assets"), "models/hoodie.obj");
        assert_eq!(relative, PathBuf::from("assets/models/hoodie.obj"));
    }
}
