//! # Viewer Session
//!
//! Owns every component of one mounted garment viewer. There is no shared
//! or global state; dropping or tearing down the viewer releases it all.
//!
//! Lifecycle:
//! 1. [`Viewer::new`] validates the configuration.
//! 2. [`Viewer::mount`] attaches the render surface and starts texture preloading.
//! 3. [`Viewer::load_model`] loads, centers and frames the garment, then runs the
//!    first material pass with the current selections.
//! 4. The host calls [`Viewer::frame`] once per display frame and forwards
//!    selection changes and input events.
//! 5. [`Viewer::teardown`] releases everything and may be called at any time.

use thiserror::Error;

use crate::assets::{AssetError, ImageSource};
use crate::catalog::{Color, ColorSelection, FabricId, FabricSelection};
use crate::classify::{MaterialSlot, PartCategory, PartClassifier};
use crate::config::ViewerConfig;
use crate::foundation::collections::MeshId;
use crate::input::{KeyCode, MouseButton};
use crate::render::{
    ApplyReport, Camera, DrawItem, FrameView, MaterialApplicator, RenderLoop, RenderSurface,
    SurfaceMaterial, TextureCache, ViewController, ViewPreset, ZoomDirection,
};
use crate::scene::{Aabb, AssetSource, GarmentAsset, ModelLoader, StudioLighting};

/// Errors crossing the viewer boundary
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The garment could not be loaded; the viewer shows no scene
    #[error("Garment failed to load: {0}")]
    AssetLoad(#[from] AssetError),

    /// The configuration failed validation
    #[error("Invalid viewer configuration: {0}")]
    InvalidConfig(String),

    /// The viewer has been torn down
    #[error("Viewer has been torn down")]
    TornDown,

    /// A garment is already loaded
    #[error("A garment is already loaded")]
    AlreadyLoaded,
}

/// Where the garment load stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted yet
    Pending,
    /// Garment loaded and painted
    Loaded,
    /// The single load attempt failed
    Failed(String),
    /// Viewer released
    TornDown,
}

/// A garment viewer session
pub struct Viewer {
    config: ViewerConfig,
    loader: ModelLoader,
    textures: TextureCache,
    applicator: MaterialApplicator,
    view: ViewController,
    render_loop: RenderLoop,
    lighting: StudioLighting,
    surface: Option<Box<dyn RenderSurface>>,
    asset: Option<GarmentAsset>,
    bounds: Option<Aabb>,
    colors: ColorSelection,
    fabrics: FabricSelection,
    state: LoadState,
}

impl Viewer {
    /// Create a viewer over host-supplied asset and image loaders
    pub fn new(
        config: ViewerConfig,
        assets: Box<dyn AssetSource>,
        images: Box<dyn ImageSource>,
    ) -> Result<Self, ViewerError> {
        config.validate().map_err(ViewerError::InvalidConfig)?;

        let textures = TextureCache::new(
            images,
            config.textures.layout.clone(),
            config.textures.max_anisotropy,
        );
        let applicator = MaterialApplicator::new(PartClassifier::new(config.parts.clone()));
        let view = ViewController::new(config.camera.clone(), &config.viewport);

        Ok(Self {
            loader: ModelLoader::new(assets),
            textures,
            applicator,
            view,
            render_loop: RenderLoop::new(),
            lighting: StudioLighting::product_studio(),
            surface: None,
            asset: None,
            bounds: None,
            colors: ColorSelection::new(),
            fabrics: FabricSelection::default(),
            state: LoadState::Pending,
            config,
        })
    }

    /// Attach the render surface and start preloading every fabric texture
    pub fn mount(&mut self, surface: Box<dyn RenderSurface>) -> Result<(), ViewerError> {
        self.ensure_alive()?;

        if let Some(anisotropy) = surface.capabilities().max_anisotropy {
            self.textures.set_max_anisotropy(anisotropy);
        }
        if let Some(mut previous) = self.surface.replace(surface) {
            log::warn!("Replacing an already mounted render surface");
            previous.detach();
        }

        self.textures.preload(&FabricId::ALL, &MaterialSlot::FABRIC_SLOTS);
        self.render_loop.request_redraw();
        log::info!(
            "Viewer mounted ({}x{})",
            self.config.viewport.width,
            self.config.viewport.height
        );
        Ok(())
    }

    /// Load the configured garment, frame it and paint it
    ///
    /// A single attempt: on failure no asset is attached and the viewer
    /// stays without a scene.
    pub fn load_model(&mut self) -> Result<(), ViewerError> {
        self.ensure_alive()?;
        if self.asset.is_some() {
            return Err(ViewerError::AlreadyLoaded);
        }

        let mut asset = match self.loader.load(&self.config.assets.model_path) {
            Ok(asset) => asset,
            Err(e) => {
                self.state = LoadState::Failed(e.to_string());
                return Err(e.into());
            }
        };

        let bounds = ModelLoader::compute_bounds(&asset);
        ModelLoader::center_at_origin(&mut asset, &bounds);
        let framed = ModelLoader::compute_bounds(&asset);
        self.view.frame_bounds(&framed);

        log::info!(
            "Garment ready: {} meshes, diagonal {:.3}",
            asset.mesh_count(),
            framed.diagonal_length()
        );
        self.bounds = Some(framed);
        self.asset = Some(asset);
        self.state = LoadState::Loaded;
        self.apply_materials();
        Ok(())
    }

    /// Replace the color selection snapshot
    pub fn set_color_selection(&mut self, colors: ColorSelection) {
        if self.is_torn_down() || colors == self.colors {
            return;
        }
        self.colors = colors;
        self.apply_materials();
    }

    /// Replace the fabric selection snapshot
    pub fn set_fabric_selection(&mut self, fabrics: FabricSelection) {
        if self.is_torn_down() || fabrics == self.fabrics {
            return;
        }
        self.fabrics = fabrics;
        self.apply_materials();
    }

    /// Override the color of one part category
    pub fn select_color(&mut self, category: PartCategory, color: Color) {
        let colors = self.colors.clone().with(category, color);
        self.set_color_selection(colors);
    }

    /// Return one part category to its default treatment
    pub fn clear_color(&mut self, category: PartCategory) {
        let mut colors = self.colors.clone();
        if colors.clear(category).is_some() {
            self.set_color_selection(colors);
        }
    }

    /// Select the fabric of one slot
    pub fn select_fabric(&mut self, slot: MaterialSlot, fabric: FabricId) {
        let mut fabrics = self.fabrics;
        fabrics.set(slot, fabric);
        self.set_fabric_selection(fabrics);
    }

    /// Select a fabric by catalog identifier; unknown identifiers are ignored
    pub fn select_fabric_by_id(&mut self, slot: MaterialSlot, fabric_id: &str) -> bool {
        match FabricId::parse(fabric_id) {
            Some(fabric) => {
                self.select_fabric(slot, fabric);
                true
            }
            None => {
                log::debug!("Ignoring unknown fabric '{}'", fabric_id);
                false
            }
        }
    }

    /// Back to the default fabrics and no color overrides
    pub fn reset_selections(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.colors = ColorSelection::new();
        self.fabrics = FabricSelection::default();
        self.apply_materials();
    }

    /// View button (`front`, `3/4-front`, `back`, `3/4-back`); unknown names are ignored
    pub fn set_camera_view(&mut self, name: &str) {
        if self.is_torn_down() {
            return;
        }
        if self.view.set_view_named(name) {
            self.render_loop.request_redraw();
        }
    }

    /// Show a preset view
    pub fn show_view(&mut self, preset: ViewPreset) {
        if !self.is_torn_down() && self.view.set_view(preset) {
            self.render_loop.request_redraw();
        }
    }

    /// Zoom button (`in`, `out`); unknown directions are ignored
    pub fn zoom(&mut self, direction: &str) {
        match ZoomDirection::parse(direction) {
            Some(direction) => self.zoom_towards(direction),
            None => log::debug!("Ignoring unknown zoom direction '{}'", direction),
        }
    }

    /// Zoom one step
    pub fn zoom_towards(&mut self, direction: ZoomDirection) {
        if !self.is_torn_down() && self.view.zoom(direction) {
            self.render_loop.request_redraw();
        }
    }

    /// Key pressed: arrows start nudging, `+`/`=`/`-` zoom
    pub fn key_down(&mut self, key: KeyCode) {
        if self.is_torn_down() {
            return;
        }
        match key {
            KeyCode::Plus | KeyCode::Equals => self.zoom_towards(ZoomDirection::In),
            KeyCode::Minus => self.zoom_towards(ZoomDirection::Out),
            _ => {
                if let Some(flag) = key.nudge() {
                    self.view.press(flag);
                }
            }
        }
    }

    /// Key released: arrows stop nudging
    pub fn key_up(&mut self, key: KeyCode) {
        if let Some(flag) = key.nudge() {
            self.view.release(flag);
        }
    }

    /// Pointer pressed; only the primary button orbits (panning is disabled)
    pub fn pointer_down(&mut self, button: MouseButton, x: f32, y: f32) {
        if self.is_torn_down() {
            return;
        }
        match button {
            MouseButton::Left => self.view.begin_drag(x, y),
            other => log::trace!("Ignoring {:?} pointer button", other),
        }
    }

    /// Pointer moved
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.view.drag_to(x, y);
    }

    /// Pointer released
    pub fn pointer_up(&mut self) {
        self.view.end_drag();
    }

    /// Mouse wheel
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.is_torn_down() && self.view.wheel(delta_y) {
            self.render_loop.request_redraw();
        }
    }

    /// Advance one display frame; returns whether a frame was drawn
    ///
    /// Serves a budget of queued texture loads, repainting the garment when
    /// a map of a selected fabric arrives, then advances keyboard nudging and drag
    /// inertia and draws if anything changed.
    pub fn frame(&mut self, dt: f32) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let drawn_before = self.render_loop.frames_rendered();

        if self.view.update() {
            self.render_loop.request_redraw();
        }

        if self.textures.is_loading() {
            let report = self.textures.pump(self.config.textures.preload_budget_per_frame);
            if self.asset.is_some() && report.touches(&self.fabrics) {
                log::debug!("Fabric textures arrived: {:?}", report.updated);
                self.apply_materials();
            }
        }

        if self.render_loop.tick(dt) {
            self.render_now();
        }
        self.render_loop.frames_rendered() > drawn_before
    }

    /// Release geometry, materials, textures and the surface; safe to repeat
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        let textures = self.textures.dispose();
        let materials = self.applicator.clear();
        let meshes = self.asset.as_mut().map_or(0, GarmentAsset::dispose);
        self.asset = None;
        if let Some(mut surface) = self.surface.take() {
            surface.detach();
        }
        self.state = LoadState::TornDown;
        log::info!(
            "Viewer torn down: {} meshes, {} materials, {} textures released",
            meshes,
            materials,
            textures
        );
    }

    /// Current camera
    pub fn camera(&self) -> &Camera {
        self.view.camera()
    }

    /// Camera controller
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Material a mesh is rendered with, looked up by mesh name
    pub fn material_of(&self, mesh_name: &str) -> Option<&SurfaceMaterial> {
        let id = self.asset.as_ref()?.find(mesh_name)?;
        self.applicator.material_of(id)
    }

    /// Material a mesh is rendered with, looked up by identity
    pub fn material_of_mesh(&self, id: MeshId) -> Option<&SurfaceMaterial> {
        self.applicator.material_of(id)
    }

    /// Bounds of the centered garment
    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    /// Load state
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Frames drawn so far
    pub fn frames_rendered(&self) -> u64 {
        self.render_loop.frames_rendered()
    }

    /// Redraws forced by material passes
    pub fn forced_redraws(&self) -> u64 {
        self.render_loop.forced_redraws()
    }

    /// Loaded garment
    pub fn asset(&self) -> Option<&GarmentAsset> {
        self.asset.as_ref()
    }

    /// Current color selection
    pub fn colors(&self) -> &ColorSelection {
        &self.colors
    }

    /// Current fabric selection
    pub fn fabrics(&self) -> &FabricSelection {
        &self.fabrics
    }

    /// Summed price delta of the selected fabrics
    pub fn fabric_cost(&self) -> u32 {
        self.fabrics.total_cost()
    }

    /// Texture cache
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Light rig handed to the renderer
    pub fn lighting(&self) -> &StudioLighting {
        &self.lighting
    }

    /// Configuration in use
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn is_torn_down(&self) -> bool {
        self.state == LoadState::TornDown
    }

    fn ensure_alive(&self) -> Result<(), ViewerError> {
        if self.is_torn_down() {
            Err(ViewerError::TornDown)
        } else {
            Ok(())
        }
    }

    /// Full material pass followed by exactly one forced redraw
    fn apply_materials(&mut self) -> Option<ApplyReport> {
        let asset = self.asset.as_ref()?;
        let report = self
            .applicator
            .apply_all(asset, &self.colors, &self.fabrics, &self.textures);
        if self.render_now() {
            self.render_loop.force_redraw();
        }
        Some(report)
    }

    /// Draw one frame; returns false when no surface is mounted
    fn render_now(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        let items = self.asset.as_ref().map_or_else(Vec::new, |asset| {
            asset
                .meshes()
                .filter(|(_, mesh)| mesh.visible)
                .map(|(id, mesh)| DrawItem {
                    id,
                    mesh,
                    material: self
                        .applicator
                        .material_of(id)
                        .unwrap_or_else(|| mesh.authored_material.as_ref()),
                    offset: asset.offset,
                })
                .collect()
        });

        let frame_index = self.render_loop.record_frame();
        let frame = FrameView {
            frame_index,
            camera: self.view.camera(),
            lighting: &self.lighting,
            viewport: &self.config.viewport,
            items,
        };
        surface.render(&frame);
        self.applicator.acknowledge_uploads();
        true
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.teardown();
    }
}
