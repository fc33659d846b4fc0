//! Showroom demo application
//!
//! Mounts a headless garment viewer over an unpacked asset bundle and
//! replays a short shopper session: fabric and color picks, view buttons,
//! zoom and a held arrow key. Every drawn frame is logged.
//!
//! Usage: `showroom [bundle-root] [config-file]`

use garment_engine::catalog::palette;
use garment_engine::prelude::*;
use thiserror::Error;

const DEFAULT_BUNDLE_ROOT: &str = "public";
const DEFAULT_CONFIG: &str = "resources/config/viewer.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Showroom errors
#[derive(Error, Debug)]
pub enum ShowroomError {
    /// Viewer failed
    #[error("Viewer error: {0}")]
    Viewer(#[from] ViewerError),

    /// Configuration failed to load
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Render surface that logs what a renderer would draw
struct LoggingSurface {
    frames: u64,
}

impl RenderSurface for LoggingSurface {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities { max_anisotropy: Some(16) }
    }

    fn render(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        let textured = frame.items.iter().filter(|item| item.material.map.is_some()).count();
        log::info!(
            "Frame {}: {} meshes ({} textured), camera at {:.2?}",
            frame.frame_index,
            frame.items.len(),
            textured,
            frame.camera.position.as_slice()
        );
        for item in &frame.items {
            log::debug!(
                "  {} color {} metalness {:.2} roughness {:.2}",
                item.mesh.name,
                item.material.color.to_hex_string(),
                item.material.metalness,
                item.material.roughness
            );
        }
    }

    fn detach(&mut self) {
        log::info!("Surface detached after {} frames", self.frames);
    }
}

/// Scripted shopper session
pub struct ShowroomApp {
    viewer: Viewer,
}

impl ShowroomApp {
    /// Build the viewer over the bundle root
    pub fn new(bundle_root: &str, config_path: &str) -> Result<Self, ShowroomError> {
        let config = if std::path::Path::new(config_path).exists() {
            ViewerConfig::load_validated(config_path)?
        } else {
            log::warn!("Config {} not found, using defaults", config_path);
            ViewerConfig::default()
        };

        let viewer = Viewer::new(
            config,
            Box::new(ObjAssetSource::new(bundle_root)),
            Box::new(FileImageSource::new(bundle_root)),
        )?;
        Ok(Self { viewer })
    }

    /// Replay the session
    pub fn run(&mut self) -> Result<(), ShowroomError> {
        self.viewer.mount(Box::new(LoggingSurface { frames: 0 }))?;
        self.viewer.load_model()?;

        let mut frames = 0;
        while self.viewer.textures().is_loading() {
            self.viewer.frame(FRAME_TIME);
            frames += 1;
        }
        log::info!("Fabric textures preloaded in {} frames", frames);

        for fabric in FabricId::ALL {
            log::info!("Main fabric: {} ({})", fabric.name(), fabric.display_price());
            self.viewer.select_fabric(MaterialSlot::Main, fabric);
        }
        self.viewer.select_fabric_by_id(MaterialSlot::Lining, "teddy");

        for category in PartCategory::ALL {
            if let Some(option) = palette(category).first() {
                log::info!("{:?} color: {} (#{:06X})", category, option.name, option.hex);
                self.viewer.select_color(category, option.color());
            }
        }
        self.viewer.clear_color(PartCategory::Lining);

        for preset in ViewPreset::ALL {
            self.viewer.show_view(preset);
            self.viewer.frame(FRAME_TIME);
        }
        self.viewer.zoom("in");
        self.viewer.zoom("out");
        self.viewer.frame(FRAME_TIME);

        self.viewer.key_down(KeyCode::ArrowRight);
        for _ in 0..10 {
            self.viewer.frame(FRAME_TIME);
        }
        self.viewer.key_up(KeyCode::ArrowRight);
        self.viewer.frame(FRAME_TIME);

        log::info!(
            "Session done: {} frames drawn, fabric surcharge +{}kr",
            self.viewer.frames_rendered(),
            self.viewer.fabric_cost()
        );
        self.viewer.teardown();
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let bundle_root = args.next().unwrap_or_else(|| DEFAULT_BUNDLE_ROOT.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    log::info!("Starting showroom over bundle {}", bundle_root);
    let mut app = ShowroomApp::new(&bundle_root, &config_path)?;

    match app.run() {
        Ok(()) => {
            log::info!("Showroom session completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Showroom session failed: {}", e);
            Err(e.into())
        }
    }
}
