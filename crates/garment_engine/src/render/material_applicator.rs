//! # Material Applicator
//!
//! Maps the shopper's color and fabric selections onto every paintable mesh
//! of the garment.
//!
//! The asset's authored materials are shared and never touched. The first
//! time a mesh is customized the applicator clones its authored material
//! and snapshots the restorable properties; both live in a map keyed by
//! [`MeshId`] and owned here. Every pass starts from a stripped material,
//! so running [`MaterialApplicator::apply_all`] twice with the same inputs
//! yields the same state.

use crate::catalog::{Color, ColorSelection, FabricSelection};
use crate::classify::{HardwareKind, MaterialSlot, PartCategory, PartClassifier};
use crate::foundation::collections::{MeshId, SecondaryMap};
use crate::scene::{GarmentAsset, MeshNode};

use super::material::{MaterialSnapshot, SurfaceMaterial};
use super::texture_cache::{TextureCache, TextureSet};

/// Roughness of textured and flat fabric
pub const FABRIC_ROUGHNESS: f32 = 0.8;
/// Metalness of fabric rendered without textures
pub const FLAT_FABRIC_METALNESS: f32 = 0.1;
/// Normal map intensity applied to fabric
pub const FABRIC_NORMAL_SCALE: f32 = 2.5;
/// Displacement amplitude of fabric (the normal map doubles as height map)
pub const FABRIC_DISPLACEMENT_SCALE: f32 = 0.05;
/// Displacement offset keeping the displaced surface centered
pub const FABRIC_DISPLACEMENT_BIAS: f32 = -0.025;
/// How far a textured fabric is tinted towards an override color
pub const FABRIC_TINT: f32 = 0.99;

/// Flat finish of a hardware family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareFinish {
    /// Default color when no override is selected
    pub color: Color,
    /// Metalness
    pub metalness: f32,
    /// Roughness
    pub roughness: f32,
}

impl HardwareFinish {
    /// Default finish of a hardware family
    pub fn for_kind(kind: HardwareKind) -> Self {
        match kind {
            HardwareKind::Cord => Self {
                color: Color::from_hex(0x2c2c2c),
                metalness: 0.0,
                roughness: 0.9,
            },
            HardwareKind::Piping => Self {
                color: Color::from_hex(0x3a3a3a),
                metalness: 0.1,
                roughness: 0.6,
            },
            HardwareKind::Rigid => Self {
                color: Color::from_hex(0x404040),
                metalness: 0.7,
                roughness: 0.2,
            },
        }
    }
}

/// Which rule a mesh was painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// Flat hardware finish
    Hardware(HardwareKind),
    /// Fabric texture set applied
    Textured,
    /// Fabric without textures (none usable yet, or failed to load)
    FlatFabric,
}

/// Summary of one full pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Meshes visited
    pub visited: usize,
    /// Meshes cloned during this pass
    pub cloned: usize,
    /// Meshes painted with a fabric texture set
    pub textured: usize,
    /// Fabric meshes painted flat
    pub flat_fabric: usize,
    /// Hardware meshes painted
    pub hardware: usize,
}

/// Private clone of a mesh's material plus its authored snapshot
#[derive(Debug, Clone)]
struct CustomizedMaterial {
    material: SurfaceMaterial,
    snapshot: MaterialSnapshot,
}

impl CustomizedMaterial {
    fn clone_from(mesh: &MeshNode) -> Self {
        let authored = mesh.authored_material.as_ref();
        Self {
            material: authored.clone(),
            snapshot: MaterialSnapshot::capture(authored),
        }
    }
}

/// Applies selections to the per-mesh customized materials
#[derive(Debug, Default)]
pub struct MaterialApplicator {
    classifier: PartClassifier,
    materials: SecondaryMap<MeshId, CustomizedMaterial>,
}

impl MaterialApplicator {
    /// Create an applicator using the given classifier
    pub fn new(classifier: PartClassifier) -> Self {
        Self {
            classifier,
            materials: SecondaryMap::new(),
        }
    }

    /// Classifier in use
    pub fn classifier(&self) -> &PartClassifier {
        &self.classifier
    }

    /// Visit every mesh and bring its material in line with the selections
    pub fn apply_all(
        &mut self,
        asset: &GarmentAsset,
        colors: &ColorSelection,
        fabrics: &FabricSelection,
        textures: &TextureCache,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (id, mesh) in asset.meshes() {
            let classification = self.classifier.classify(&mesh.name);

            if !self.materials.contains_key(id) {
                self.materials.insert(id, CustomizedMaterial::clone_from(mesh));
                report.cloned += 1;
            }
            let Some(state) = self.materials.get_mut(id) else {
                continue;
            };

            let override_color = colors.get(classification.category);
            let texture_set = fabrics
                .get(classification.slot)
                .and_then(|fabric| textures.get_with_fallback(fabric, classification.slot, MaterialSlot::Main));

            let treatment = paint(
                state,
                mesh,
                classification.category,
                override_color,
                texture_set,
            );
            log::trace!("Mesh '{}' ({:?}) painted as {:?}", mesh.name, classification.category, treatment);

            report.visited += 1;
            match treatment {
                Treatment::Hardware(_) => report.hardware += 1,
                Treatment::Textured => report.textured += 1,
                Treatment::FlatFabric => report.flat_fabric += 1,
            }
        }

        log::debug!(
            "Material pass: {} meshes ({} textured, {} flat fabric, {} hardware, {} newly cloned)",
            report.visited,
            report.textured,
            report.flat_fabric,
            report.hardware,
            report.cloned
        );
        report
    }

    /// Material a mesh is currently rendered with, once customized
    pub fn material_of(&self, id: MeshId) -> Option<&SurfaceMaterial> {
        self.materials.get(id).map(|state| &state.material)
    }

    /// Authored values recorded when the mesh was first customized
    pub fn snapshot_of(&self, id: MeshId) -> Option<&MaterialSnapshot> {
        self.materials.get(id).map(|state| &state.snapshot)
    }

    /// Number of meshes holding a private material
    pub fn customized_count(&self) -> usize {
        self.materials.len()
    }

    /// Meshes whose material changed since the renderer last acknowledged
    pub fn dirty_meshes(&self) -> Vec<MeshId> {
        self.materials
            .iter()
            .filter(|(_, state)| state.material.needs_update)
            .map(|(id, _)| id)
            .collect()
    }

    /// Clear the dirty flags once the renderer has uploaded the materials
    pub fn acknowledge_uploads(&mut self) {
        for (_, state) in self.materials.iter_mut() {
            state.material.needs_update = false;
        }
    }

    /// Drop every customized material; returns how many were released
    pub fn clear(&mut self) -> usize {
        let count = self.materials.len();
        self.materials.clear();
        count
    }
}

fn paint(
    state: &mut CustomizedMaterial,
    mesh: &MeshNode,
    category: PartCategory,
    override_color: Option<Color>,
    texture_set: Option<&TextureSet>,
) -> Treatment {
    let authored = mesh.authored_material.as_ref();
    let material = &mut state.material;

    material.clear_maps();
    material.normal_scale = authored.normal_scale;
    material.displacement_scale = authored.displacement_scale;
    material.displacement_bias = authored.displacement_bias;

    let treatment = match (category, texture_set) {
        (PartCategory::Hardware, _) => {
            let kind = HardwareKind::from_mesh_name(&mesh.name);
            let finish = HardwareFinish::for_kind(kind);
            material.color = override_color.unwrap_or(finish.color);
            material.metalness = finish.metalness;
            material.roughness = finish.roughness;
            Treatment::Hardware(kind)
        }
        (_, Some(set)) => {
            material.map = set.diffuse.clone();
            material.normal_map = set.normal.clone();
            material.roughness_map = set.metallic_roughness.clone();
            material.displacement_map = set.normal.clone();
            material.displacement_scale = FABRIC_DISPLACEMENT_SCALE;
            material.displacement_bias = FABRIC_DISPLACEMENT_BIAS;
            material.normal_scale = FABRIC_NORMAL_SCALE;
            material.metalness = 0.0;
            material.roughness = FABRIC_ROUGHNESS;
            material.color = match override_color {
                Some(color) => Color::WHITE.lerp(&color, FABRIC_TINT),
                None => Color::WHITE,
            };
            Treatment::Textured
        }
        (_, None) => {
            material.color = override_color.unwrap_or(state.snapshot.color);
            material.metalness = FLAT_FABRIC_METALNESS;
            material.roughness = FABRIC_ROUGHNESS;
            Treatment::FlatFabric
        }
    };

    material.mark_dirty();
    treatment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, ImageData, ImageSource, TextureLayout};
    use crate::catalog::FabricId;
    use crate::foundation::math::Vec3;
    use crate::render::texture::same_texture;
    use crate::scene::MeshGeometry;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    struct SolidSource;

    impl ImageSource for SolidSource {
        fn load_image(&self, _path: &str) -> Result<ImageData, AssetError> {
            Ok(ImageData::solid_color(2, 2, [180, 170, 160, 255]))
        }
    }

    struct NoImages;

    impl ImageSource for NoImages {
        fn load_image(&self, path: &str) -> Result<ImageData, AssetError> {
            Err(AssetError::NotFound(path.to_string()))
        }
    }

    fn loaded_cache() -> TextureCache {
        let mut cache = TextureCache::new(Box::new(SolidSource), TextureLayout::default(), 16);
        cache.preload(&FabricId::ALL, &MaterialSlot::FABRIC_SLOTS);
        cache.finish_preload();
        cache
    }

    fn empty_cache() -> TextureCache {
        TextureCache::new(Box::new(NoImages), TextureLayout::default(), 16)
    }

    const AUTHORED_BLUE: u32 = 0x335577;

    fn hoodie() -> GarmentAsset {
        let geometry = MeshGeometry::new(
            vec![Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        );
        // One authored material shared by every mesh
        let shared = Arc::new(SurfaceMaterial::new(Color::from_hex(AUTHORED_BLUE), 0.3, 0.4));
        let mut asset = GarmentAsset::new();
        for name in ["Body_Front", "Sleeves", "Hood_inside", "Zipper", "Straps_1", "Piping_27584630"] {
            asset.add_mesh(MeshNode::new(name, geometry.clone(), shared.clone()));
        }
        asset
    }

    fn material<'a>(applicator: &'a MaterialApplicator, asset: &GarmentAsset, name: &str) -> &'a SurfaceMaterial {
        applicator.material_of(asset.find(name).unwrap()).unwrap()
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let asset = hoodie();
        let cache = loaded_cache();
        let colors = ColorSelection::new()
            .with(PartCategory::Body, Color::from_hex(0x7a8471))
            .with(PartCategory::Hardware, Color::from_hex(0xcd7f32));
        let fabrics = FabricSelection::default();
        let mut applicator = MaterialApplicator::default();

        let first = applicator.apply_all(&asset, &colors, &fabrics, &cache);
        let before: Vec<SurfaceMaterial> = asset
            .meshes()
            .map(|(id, _)| applicator.material_of(id).unwrap().clone())
            .collect();

        let second = applicator.apply_all(&asset, &colors, &fabrics, &cache);
        assert_eq!(first.cloned, 6);
        assert_eq!(second.cloned, 0);

        for ((id, _), previous) in asset.meshes().zip(&before) {
            assert!(applicator.material_of(id).unwrap().same_appearance(previous));
        }
    }

    #[test]
    fn test_authored_material_is_never_mutated() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        let colors = ColorSelection::new().with(PartCategory::Body, Color::from_hex(0xe8dcc6));
        applicator.apply_all(&asset, &colors, &FabricSelection::default(), &loaded_cache());

        for (_, mesh) in asset.meshes() {
            assert_eq!(mesh.authored_material.color, Color::from_hex(AUTHORED_BLUE));
            assert!(mesh.authored_material.map.is_none());
        }
    }

    #[test]
    fn test_textured_body_rules() {
        let asset = hoodie();
        let cache = loaded_cache();
        let mut applicator = MaterialApplicator::default();
        applicator.apply_all(&asset, &ColorSelection::new(), &FabricSelection::default(), &cache);

        let body = material(&applicator, &asset, "Body_Front");
        let set = cache.get(FabricId::Cotton, MaterialSlot::Main).unwrap();
        assert!(same_texture(&body.map, &set.diffuse));
        assert!(same_texture(&body.normal_map, &set.normal));
        assert!(same_texture(&body.roughness_map, &set.metallic_roughness));
        assert!(body.metalness_map.is_none());
        assert_eq!(body.color, Color::WHITE);
        assert_relative_eq!(body.metalness, 0.0);
        assert_relative_eq!(body.roughness, FABRIC_ROUGHNESS);
        assert_relative_eq!(body.normal_scale, FABRIC_NORMAL_SCALE);
        assert!(body.needs_update);
    }

    #[test]
    fn test_override_tints_texture_strongly() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        let green = Color::from_hex(0x7a8471);
        let colors = ColorSelection::new().with(PartCategory::Body, green);
        applicator.apply_all(&asset, &colors, &FabricSelection::default(), &loaded_cache());

        let body = material(&applicator, &asset, "Sleeves");
        assert_relative_eq!(body.color.r, 1.0 + (green.r - 1.0) * FABRIC_TINT, epsilon = 1e-6);
        assert_relative_eq!(body.color.g, 1.0 + (green.g - 1.0) * FABRIC_TINT, epsilon = 1e-6);
        assert!(body.map.is_some());
    }

    #[test]
    fn test_lining_uses_main_textures_of_its_fabric() {
        let asset = hoodie();
        let cache = loaded_cache();
        let mut applicator = MaterialApplicator::default();
        let fabrics = FabricSelection {
            main: FabricId::Cotton,
            lining: FabricId::Teddy,
        };
        applicator.apply_all(&asset, &ColorSelection::new(), &fabrics, &cache);

        let lining = material(&applicator, &asset, "Hood_inside");
        let teddy = cache.get(FabricId::Teddy, MaterialSlot::Main).unwrap();
        assert!(same_texture(&lining.map, &teddy.diffuse));
    }

    #[test]
    fn test_fabric_switch_changes_body_not_hardware() {
        let asset = hoodie();
        let cache = loaded_cache();
        let mut applicator = MaterialApplicator::default();
        let colors = ColorSelection::new();
        let mut fabrics = FabricSelection::default();

        applicator.apply_all(&asset, &colors, &fabrics, &cache);
        let cotton_body = material(&applicator, &asset, "Body_Front").map.clone();
        let zipper_before = material(&applicator, &asset, "Zipper").clone();

        fabrics.set(MaterialSlot::Main, FabricId::Teddy);
        applicator.apply_all(&asset, &colors, &fabrics, &cache);

        for name in ["Body_Front", "Sleeves"] {
            let body = material(&applicator, &asset, name);
            assert!(!same_texture(&body.map, &cotton_body));
            assert!(same_texture(&body.map, &cache.get(FabricId::Teddy, MaterialSlot::Main).unwrap().diffuse));
        }
        let zipper = material(&applicator, &asset, "Zipper");
        assert_eq!(zipper.color, zipper_before.color);
        assert_eq!(zipper.metalness, zipper_before.metalness);
        assert!(zipper.map.is_none());
    }

    #[test]
    fn test_hardware_finishes_by_kind() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        applicator.apply_all(&asset, &ColorSelection::new(), &FabricSelection::default(), &loaded_cache());

        let zipper = material(&applicator, &asset, "Zipper");
        assert_eq!(zipper.color, Color::from_hex(0x404040));
        assert_relative_eq!(zipper.metalness, 0.7);
        assert_relative_eq!(zipper.roughness, 0.2);

        let strap = material(&applicator, &asset, "Straps_1");
        assert_relative_eq!(strap.metalness, 0.0);
        assert_relative_eq!(strap.roughness, 0.9);

        let piping = material(&applicator, &asset, "Piping_27584630");
        assert_relative_eq!(piping.metalness, 0.1);
        assert_relative_eq!(piping.roughness, 0.6);
        assert!(piping.map.is_none() && piping.normal_map.is_none());
    }

    #[test]
    fn test_flat_fallback_without_textures() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        let report = applicator.apply_all(&asset, &ColorSelection::new(), &FabricSelection::default(), &empty_cache());

        assert_eq!(report.textured, 0);
        assert_eq!(report.flat_fabric, 3);
        assert_eq!(report.hardware, 3);
        let body = material(&applicator, &asset, "Body_Front");
        assert_eq!(body.color, Color::from_hex(AUTHORED_BLUE));
        assert_relative_eq!(body.metalness, FLAT_FABRIC_METALNESS);
        assert_relative_eq!(body.roughness, FABRIC_ROUGHNESS);
        assert!(body.map.is_none());
    }

    #[test]
    fn test_clearing_override_restores_snapshot_color() {
        let asset = hoodie();
        let cache = empty_cache();
        let fabrics = FabricSelection::default();
        let mut applicator = MaterialApplicator::default();
        let mut colors = ColorSelection::new();

        applicator.apply_all(&asset, &colors, &fabrics, &cache);
        let id = asset.find("Body_Front").unwrap();
        let snapshot = applicator.snapshot_of(id).unwrap().color;

        colors.set(PartCategory::Body, Color::from_hex(0x1c1c1c));
        applicator.apply_all(&asset, &colors, &fabrics, &cache);
        assert_eq!(applicator.material_of(id).unwrap().color, Color::from_hex(0x1c1c1c));

        colors.clear(PartCategory::Body);
        applicator.apply_all(&asset, &colors, &fabrics, &cache);
        assert_eq!(applicator.material_of(id).unwrap().color, snapshot);
    }

    #[test]
    fn test_textures_arriving_later_replace_flat_fabric() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        let colors = ColorSelection::new();
        let fabrics = FabricSelection::default();

        applicator.apply_all(&asset, &colors, &fabrics, &empty_cache());
        assert!(material(&applicator, &asset, "Body_Front").map.is_none());

        let report = applicator.apply_all(&asset, &colors, &fabrics, &loaded_cache());
        assert_eq!(report.cloned, 0);
        assert_eq!(report.textured, 3);
        assert!(material(&applicator, &asset, "Body_Front").map.is_some());
    }

    #[test]
    fn test_acknowledge_clears_dirty_flags() {
        let asset = hoodie();
        let mut applicator = MaterialApplicator::default();
        applicator.apply_all(&asset, &ColorSelection::new(), &FabricSelection::default(), &empty_cache());
        assert_eq!(applicator.dirty_meshes().len(), 6);

        applicator.acknowledge_uploads();
        assert!(applicator.dirty_meshes().is_empty());
        assert_eq!(applicator.clear(), 6);
        assert_eq!(applicator.customized_count(), 0);
    }
}
