//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap, SecondaryMap};

new_key_type! {
    /// Stable identity of a mesh inside a loaded garment asset
    pub struct MeshId;
}

/// Handle-based map of meshes keyed by stable identity
pub type MeshMap<T> = SlotMap<MeshId, T>;
