//! Fabric texture cache
//!
//! Holds one [`TextureSet`] per (fabric, slot) pair for the lifetime of a
//! viewer session. Preloading covers the whole fabric × slot cross-product
//! up front so that switching fabrics never stalls on a load. Requests are
//! queued and served a few per frame by [`TextureCache::pump`]; a failed
//! image simply leaves its map absent.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::texture::{MapType, SamplerSettings, Texture, TextureId};
use crate::assets::{ImageSource, ResolvedPath, TextureLayout};
use crate::catalog::{FabricId, FabricSelection};
use crate::classify::MaterialSlot;

/// Diffuse, normal and metallic-roughness maps of one fabric/slot pair
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    /// Base color map
    pub diffuse: Option<Arc<Texture>>,
    /// Normal map
    pub normal: Option<Arc<Texture>>,
    /// Metallic-roughness map
    pub metallic_roughness: Option<Arc<Texture>>,
}

impl TextureSet {
    /// One map of the set
    pub fn get(&self, map: MapType) -> Option<&Arc<Texture>> {
        match map {
            MapType::Diffuse => self.diffuse.as_ref(),
            MapType::Normal => self.normal.as_ref(),
            MapType::MetallicRoughness => self.metallic_roughness.as_ref(),
        }
    }

    fn slot_mut(&mut self, map: MapType) -> &mut Option<Arc<Texture>> {
        match map {
            MapType::Diffuse => &mut self.diffuse,
            MapType::Normal => &mut self.normal,
            MapType::MetallicRoughness => &mut self.metallic_roughness,
        }
    }

    /// Whether the set can texture a mesh: a real (non-placeholder) diffuse map is loaded
    pub fn is_usable(&self) -> bool {
        self.diffuse.as_ref().is_some_and(|t| !t.placeholder)
    }

    /// Number of maps present, placeholders included
    pub fn loaded_count(&self) -> usize {
        MapType::ALL.iter().filter(|m| self.get(**m).is_some()).count()
    }

    fn release(&mut self) -> usize {
        let count = self.loaded_count();
        *self = Self::default();
        count
    }
}

/// One queued image request
#[derive(Debug, Clone)]
struct PendingLoad {
    fabric: FabricId,
    slot: MaterialSlot,
    map: MapType,
    path: String,
}

/// Outcome of serving queued requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Images decoded from the image source
    pub loaded: usize,
    /// Requests served by the transparent placeholder
    pub placeholders: usize,
    /// Images that failed to load and stay absent
    pub failed: usize,
    /// Pairs whose set became usable during this pump
    pub newly_usable: Vec<(FabricId, MaterialSlot)>,
    /// Usable pairs that gained any map during this pump, newly usable ones included
    pub updated: Vec<(FabricId, MaterialSlot)>,
    /// Requests still queued
    pub remaining: usize,
}

impl PumpReport {
    /// Whether any set became usable
    pub fn has_new_sets(&self) -> bool {
        !self.newly_usable.is_empty()
    }

    /// Whether a material pass over `fabrics` would now pick up new maps
    pub fn touches(&self, fabrics: &FabricSelection) -> bool {
        self.updated
            .iter()
            .any(|&(fabric, slot)| fabrics.uses_textures_of(fabric, slot))
    }
}

/// Session-owned cache of fabric texture sets
pub struct TextureCache {
    source: Box<dyn ImageSource>,
    layout: TextureLayout,
    sampler: SamplerSettings,
    sets: HashMap<(FabricId, MaterialSlot), TextureSet>,
    pending: VecDeque<PendingLoad>,
    next_id: u32,
    disposed: bool,
}

impl TextureCache {
    /// Create an empty cache over a host image source
    pub fn new(source: Box<dyn ImageSource>, layout: TextureLayout, max_anisotropy: u16) -> Self {
        Self {
            source,
            layout,
            sampler: SamplerSettings::fabric(max_anisotropy),
            sets: HashMap::new(),
            pending: VecDeque::new(),
            next_id: 1,
            disposed: false,
        }
    }

    /// Naming convention in use
    pub fn layout(&self) -> &TextureLayout {
        &self.layout
    }

    /// Sampler applied to images loaded from now on
    pub fn sampler(&self) -> SamplerSettings {
        self.sampler
    }

    /// Adopt the anisotropy level reported by the render surface
    pub fn set_max_anisotropy(&mut self, max_anisotropy: u16) {
        self.sampler = SamplerSettings::fabric(max_anisotropy);
    }

    /// Queue every map of every fabric × slot pair not already cached or queued
    ///
    /// Returns the number of requests added. `MaterialSlot::None` has no
    /// textures and is skipped.
    pub fn preload(&mut self, fabrics: &[FabricId], slots: &[MaterialSlot]) -> usize {
        if self.disposed {
            log::warn!("Ignoring texture preload on a disposed cache");
            return 0;
        }

        let mut queued = 0;
        for &fabric in fabrics {
            for &slot in slots {
                let Some(paths) = self.layout.paths(fabric, slot) else {
                    continue;
                };
                for map in MapType::ALL {
                    if self.is_cached_or_queued(fabric, slot, map) {
                        continue;
                    }
                    self.pending.push_back(PendingLoad {
                        fabric,
                        slot,
                        map,
                        path: paths.get(map).to_string(),
                    });
                    queued += 1;
                }
            }
        }

        log::debug!("Queued {} texture requests ({} pending)", queued, self.pending.len());
        queued
    }

    fn is_cached_or_queued(&self, fabric: FabricId, slot: MaterialSlot, map: MapType) -> bool {
        let cached = self.sets.get(&(fabric, slot)).is_some_and(|set| set.get(map).is_some());
        cached
            || self
                .pending
                .iter()
                .any(|p| p.fabric == fabric && p.slot == slot && p.map == map)
    }

    /// Serve up to `budget` queued requests
    pub fn pump(&mut self, budget: usize) -> PumpReport {
        let mut report = PumpReport::default();

        for _ in 0..budget {
            let Some(request) = self.pending.pop_front() else {
                break;
            };
            let key = (request.fabric, request.slot);
            let was_usable = self.sets.get(&key).is_some_and(TextureSet::is_usable);

            let texture = match self.layout.resolve(&request.path) {
                ResolvedPath::Placeholder => {
                    report.placeholders += 1;
                    Some(Texture::placeholder(self.allocate_id(), request.path.clone()))
                }
                ResolvedPath::File(path) => match self.source.load_image(&path) {
                    Ok(image) => {
                        report.loaded += 1;
                        log::trace!("Loaded texture {} ({}x{})", path, image.width, image.height);
                        Some(Texture::new(self.allocate_id(), path, image, self.sampler))
                    }
                    Err(e) => {
                        report.failed += 1;
                        log::warn!("Texture {} unavailable: {}", path, e);
                        None
                    }
                },
            };

            let set = self.sets.entry(key).or_default();
            let gained = texture.is_some();
            if let Some(texture) = texture {
                *set.slot_mut(request.map) = Some(texture);
            }
            if !set.is_usable() {
                continue;
            }
            if !was_usable {
                report.newly_usable.push(key);
            }
            if gained && !report.updated.contains(&key) {
                report.updated.push(key);
            }
        }

        report.remaining = self.pending.len();
        if report.loaded + report.placeholders + report.failed > 0 {
            log::debug!(
                "Texture pump: {} loaded, {} placeholders, {} failed, {} remaining",
                report.loaded,
                report.placeholders,
                report.failed,
                report.remaining
            );
        }
        report
    }

    /// Serve every queued request
    pub fn finish_preload(&mut self) -> PumpReport {
        self.pump(usize::MAX)
    }

    /// Whether requests are still queued
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of queued requests
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Usable texture set of a fabric/slot pair
    pub fn get(&self, fabric: FabricId, slot: MaterialSlot) -> Option<&TextureSet> {
        self.sets.get(&(fabric, slot)).filter(|set| set.is_usable())
    }

    /// Usable set of `slot`, else that of `fallback_slot` for the same fabric
    pub fn get_with_fallback(
        &self,
        fabric: FabricId,
        slot: MaterialSlot,
        fallback_slot: MaterialSlot,
    ) -> Option<&TextureSet> {
        self.get(fabric, slot).or_else(|| {
            let fallback = self.get(fabric, fallback_slot);
            if fallback.is_some() && slot != fallback_slot {
                log::trace!("No {:?} textures for {}, using {:?}", slot, fabric, fallback_slot);
            }
            fallback
        })
    }

    /// Number of textures held, placeholders included
    pub fn texture_count(&self) -> usize {
        self.sets.values().map(TextureSet::loaded_count).sum()
    }

    /// Release every texture and drop queued requests; safe to call repeatedly
    pub fn dispose(&mut self) -> usize {
        if self.disposed {
            return 0;
        }
        let released: usize = self.sets.values_mut().map(TextureSet::release).sum();
        self.sets.clear();
        self.pending.clear();
        self.disposed = true;
        log::debug!("Texture cache disposed, {} textures released", released);
        released
    }

    /// Whether [`TextureCache::dispose`] has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn allocate_id(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        id
    }
}
