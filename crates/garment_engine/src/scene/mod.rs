//! Scene content: the garment asset, its bounds, loading and lighting

pub mod bounds;
pub mod garment;
pub mod lighting;
pub mod model_loader;

pub use bounds::Aabb;
pub use garment::{GarmentAsset, MeshGeometry, MeshNode};
pub use lighting::{Light, LightType, StudioLighting};
pub use model_loader::{AssetSource, ModelLoader};
