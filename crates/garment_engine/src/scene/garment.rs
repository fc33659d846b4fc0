//! The loaded garment: a flat list of named, independently paintable meshes

use std::sync::Arc;

use super::bounds::Aabb;
use crate::foundation::collections::{MeshId, MeshMap};
use crate::foundation::math::Vec3;
use crate::render::SurfaceMaterial;

/// Triangle geometry of one sub-mesh
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    /// Vertex positions in asset space
    pub positions: Vec<Vec3>,
    /// Vertex normals (may be empty)
    pub normals: Vec<Vec3>,
    /// Texture coordinates (may be empty)
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Geometry from positions and triangle indices only
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            ..Default::default()
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of the vertex positions
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}

/// One named sub-mesh of the garment
#[derive(Debug, Clone)]
pub struct MeshNode {
    /// Identifier assigned by the authoring tool
    pub name: String,
    /// Triangle geometry
    pub geometry: MeshGeometry,
    /// As-authored material; may be shared by several meshes and is never mutated
    pub authored_material: Arc<SurfaceMaterial>,
    /// Whether the mesh casts shadows
    pub cast_shadow: bool,
    /// Whether the mesh receives shadows
    pub receive_shadow: bool,
    /// Whether the mesh is drawn
    pub visible: bool,
}

impl MeshNode {
    /// Create a visible mesh without shadow participation
    pub fn new(name: impl Into<String>, geometry: MeshGeometry, authored_material: Arc<SurfaceMaterial>) -> Self {
        Self {
            name: name.into(),
            geometry,
            authored_material,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
        }
    }
}

/// A loaded garment asset
///
/// Meshes are stored in a slot map so their identity stays stable for the
/// whole session; per-mesh customization state is keyed by [`MeshId`].
#[derive(Debug, Clone, Default)]
pub struct GarmentAsset {
    meshes: MeshMap<MeshNode>,
    order: Vec<MeshId>,
    /// Translation applied to the whole asset (used to center it)
    pub offset: Vec3,
}

impl GarmentAsset {
    /// Create an empty asset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh, returning its stable identity
    pub fn add_mesh(&mut self, mesh: MeshNode) -> MeshId {
        let id = self.meshes.insert(mesh);
        self.order.push(id);
        id
    }

    /// Look up a mesh
    pub fn mesh(&self, id: MeshId) -> Option<&MeshNode> {
        self.meshes.get(id)
    }

    /// Look up a mesh mutably
    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut MeshNode> {
        self.meshes.get_mut(id)
    }

    /// First mesh with the given name
    pub fn find(&self, name: &str) -> Option<MeshId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.meshes.get(*id).is_some_and(|m| m.name == name))
    }

    /// Visit meshes in authoring order
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshNode)> {
        self.order.iter().filter_map(|id| self.meshes.get(*id).map(|m| (*id, m)))
    }

    /// Visit meshes mutably in authoring order
    pub fn for_each_mesh_mut(&mut self, mut visit: impl FnMut(MeshId, &mut MeshNode)) {
        for id in &self.order {
            if let Some(mesh) = self.meshes.get_mut(*id) {
                visit(*id, mesh);
            }
        }
    }

    /// Number of meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the asset holds no meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Release all geometry; returns how many meshes were dropped
    pub fn dispose(&mut self) -> usize {
        let count = self.meshes.len();
        self.meshes.clear();
        self.order.clear();
        count
    }
}
