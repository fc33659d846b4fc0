//! The configuration shipped in `resources/` parses, validates and matches the defaults

use garment_engine::prelude::*;

fn shipped_config_path() -> String {
    format!("{}/../../resources/config/viewer.toml", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_shipped_config_is_valid() {
    let config = ViewerConfig::load_validated(&shipped_config_path()).unwrap();
    assert_eq!(config.parts, PartClassifier::default().table().clone());
    assert_eq!(config.textures.layout.main_suffix, "1001");
    assert_eq!(config.viewport.clear_color, Color::from_hex(0xc4c4c4));
}

#[test]
fn test_shipped_config_round_trips_through_ron() {
    let config = ViewerConfig::load_from_file(&shipped_config_path()).unwrap();
    let path = std::env::temp_dir().join("garment_engine_viewer_config.ron");
    let path = path.to_string_lossy().to_string();

    config.save_to_file(&path).unwrap();
    let reloaded = ViewerConfig::load_from_file(&path).unwrap();
    assert_eq!(reloaded, config);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_obj_bundle_on_disk() {
    let root = std::env::temp_dir().join("garment_engine_bundle");
    std::fs::create_dir_all(root.join("models")).unwrap();
    std::fs::write(
        root.join("models/hoodie.obj"),
        "o Sleeves\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no Straps_1\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
    )
    .unwrap();

    let source = ObjAssetSource::new(root.clone());
    let asset = source.load_garment("/models/hoodie.obj").unwrap();
    assert_eq!(asset.mesh_count(), 2);
    assert!(asset.find("Straps_1").is_some());

    assert!(matches!(
        source.load_garment("/models/missing.obj"),
        Err(AssetError::NotFound(_))
    ));
}
