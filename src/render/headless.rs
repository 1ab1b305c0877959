//! In-memory render backend
//!
//! Records what the terrain uploads instead of drawing it. Used by the
//! flythrough binary, benches and tests.

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::math::{Aabb, Frustum};
use crate::mesh::MeshBuffers;
use super::{MeshId, RenderBackend};

/// Book-keeping for one headless mesh
#[derive(Clone, Debug, Default)]
pub struct HeadlessMesh {
    pub name: String,
    pub enabled: bool,
    pub vertex_count: usize,
    pub face_count: usize,
    /// Bounds of the uploaded positions, if any
    pub bounds: Option<Aabb>,
    pub uploads: u32,
}

/// Render backend that keeps mesh statistics in memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: HashMap<MeshId, HeadlessMesh>,
    next_id: u32,
    frustum: Option<Frustum>,
    disposed: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the culling frustum; `None` treats everything as visible
    pub fn set_frustum(&mut self, frustum: Option<Frustum>) {
        self.frustum = frustum;
    }

    pub fn mesh(&self, id: MeshId) -> Option<&HeadlessMesh> {
        self.meshes.get(&id)
    }

    /// Meshes created and not yet disposed
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn enabled_count(&self) -> usize {
        self.meshes.values().filter(|m| m.enabled).count()
    }

    /// Vertices across enabled meshes
    pub fn enabled_vertex_count(&self) -> usize {
        self.meshes.values().filter(|m| m.enabled).map(|m| m.vertex_count).sum()
    }

    pub fn disposed_count(&self) -> u32 {
        self.disposed
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_mesh(&mut self, name: &str) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.meshes.insert(id, HeadlessMesh { name: name.to_string(), ..Default::default() });
        id
    }

    fn upload(&mut self, mesh: MeshId, buffers: &MeshBuffers) {
        let Some(entry) = self.meshes.get_mut(&mesh) else {
            log::warn!("Upload to unknown mesh {:?}", mesh);
            return;
        };
        entry.vertex_count = buffers.vertex_count();
        entry.face_count = buffers.face_count();
        entry.bounds = Aabb::from_points(buffers.positions.iter().map(|p| Vec3::from_array(*p)));
        entry.uploads += 1;
    }

    fn set_enabled(&mut self, mesh: MeshId, enabled: bool) {
        if let Some(entry) = self.meshes.get_mut(&mesh) {
            entry.enabled = enabled;
        }
    }

    fn dispose(&mut self, mesh: MeshId) {
        if self.meshes.remove(&mesh).is_some() {
            self.disposed += 1;
        }
    }

    fn in_frustum(&self, mesh: MeshId) -> bool {
        let Some(entry) = self.meshes.get(&mesh) else {
            return false;
        };
        match (&self.frustum, &entry.bounds) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(frustum), Some(bounds)) => frustum.intersects_aabb(bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Mat4;
    use crate::mesh::Quad;
    use crate::voxel::face::Face;
    use crate::voxel::material::Material;

    fn quad_at(x: f32, z: f32) -> MeshBuffers {
        let mut buffers = MeshBuffers::new();
        let quad = Quad { face: Face::Top, origin: [0, 0, 0], main_len: 4, alt_len: 4, material: Material::Grass };
        buffers.push_quad(&quad, Vec3::new(x, 0.0, z), 1.0, [1.0; 4]);
        buffers
    }

    #[test]
    fn test_mesh_lifecycle() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_mesh("0.0[16]");
        let b = backend.create_mesh("16.0[16]");
        assert_ne!(a, b);
        assert_eq!(backend.mesh(a).map(|m| m.name.as_str()), Some("0.0[16]"));
        assert_eq!(backend.enabled_count(), 0);

        backend.upload(a, &quad_at(0.0, 0.0));
        backend.set_enabled(a, true);
        assert_eq!(backend.enabled_count(), 1);
        assert_eq!(backend.enabled_vertex_count(), 4);

        backend.set_enabled(a, false);
        assert_eq!(backend.enabled_count(), 0);

        backend.dispose(b);
        backend.dispose(b);
        assert_eq!(backend.mesh_count(), 1);
        assert_eq!(backend.disposed_count(), 1);
    }

    #[test]
    fn test_in_frustum() {
        let mut backend = HeadlessBackend::new();
        let ahead = backend.create_mesh("ahead");
        let behind = backend.create_mesh("behind");
        let empty = backend.create_mesh("empty");
        backend.upload(ahead, &quad_at(-2.0, -40.0));
        backend.upload(behind, &quad_at(-2.0, 40.0));

        assert!(backend.in_frustum(ahead));
        assert!(backend.in_frustum(behind));
        assert!(!backend.in_frustum(empty));

        let proj = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 500.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -1.0), Vec3::Y);
        backend.set_frustum(Some(Frustum::from_view_projection(&(proj * view))));
        assert!(backend.in_frustum(ahead));
        assert!(!backend.in_frustum(behind));
        assert!(!backend.in_frustum(MeshId(99)));
    }
}
