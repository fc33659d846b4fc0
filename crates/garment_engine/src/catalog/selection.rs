//! Session-scoped shopper selections
//!
//! Both selections are owned by the page layer and handed to the viewer as
//! immutable snapshots on every change.

use std::collections::BTreeMap;

use super::{Color, FabricId};
use crate::classify::{MaterialSlot, PartCategory};

/// Fabric chosen for each fabric slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FabricSelection {
    /// Fabric of the main body
    pub main: FabricId,
    /// Fabric of the lining
    pub lining: FabricId,
}

impl Default for FabricSelection {
    fn default() -> Self {
        Self {
            main: FabricId::Cotton,
            lining: FabricId::Cotton,
        }
    }
}

impl FabricSelection {
    /// Fabric selected for a slot; `MaterialSlot::None` carries no fabric
    pub fn get(&self, slot: MaterialSlot) -> Option<FabricId> {
        match slot {
            MaterialSlot::Main => Some(self.main),
            MaterialSlot::Lining => Some(self.lining),
            MaterialSlot::None => None,
        }
    }

    /// Select a fabric for one slot; ignored for `MaterialSlot::None`
    pub fn set(&mut self, slot: MaterialSlot, fabric: FabricId) {
        match slot {
            MaterialSlot::Main => self.main = fabric,
            MaterialSlot::Lining => self.lining = fabric,
            MaterialSlot::None => {
                log::debug!("Ignoring fabric {} for slot without fabric", fabric);
            }
        }
    }

    /// Whether painting this selection can read the textures of `fabric` in `slot`
    ///
    /// Lining parts fall back to the main set of their fabric, so a `Main`
    /// pair is in use when either slot selects the fabric.
    pub fn uses_textures_of(&self, fabric: FabricId, slot: MaterialSlot) -> bool {
        match slot {
            MaterialSlot::Main => self.main == fabric || self.lining == fabric,
            MaterialSlot::Lining => self.lining == fabric,
            MaterialSlot::None => false,
        }
    }

    /// Summed price delta of the selected fabrics
    pub fn total_cost(&self) -> u32 {
        MaterialSlot::FABRIC_SLOTS
            .iter()
            .filter_map(|slot| self.get(*slot))
            .map(FabricId::price)
            .sum()
    }
}

/// Color override per part category; a missing key means "category default"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorSelection {
    colors: BTreeMap<PartCategory, Color>,
}

impl ColorSelection {
    /// Empty selection (every part uses its default treatment)
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the color of a category
    pub fn set(&mut self, category: PartCategory, color: Color) {
        self.colors.insert(category, color);
    }

    /// Builder-style override
    pub fn with(mut self, category: PartCategory, color: Color) -> Self {
        self.set(category, color);
        self
    }

    /// Remove the override of a category
    pub fn clear(&mut self, category: PartCategory) -> Option<Color> {
        self.colors.remove(&category)
    }

    /// Override for a category, if any
    pub fn get(&self, category: PartCategory) -> Option<Color> {
        self.colors.get(&category).copied()
    }

    /// Whether no category is overridden
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
