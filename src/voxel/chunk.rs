//! Pooled terrain chunk: column storage plus output geometry

use std::fmt;

use crate::core::types::{Vec2, Vec3};
use crate::math::{Aabb, Rect};
use crate::mesh::{naive, skirt, GreedyMesher, MeshBuffers, MeshMode};
use crate::render::MeshId;
use crate::streaming::lod::lod_tint;
use crate::terrain::{BiomeLevels, HeightSource};
use super::column::{ChunkDims, ColumnStore};
use super::iter::BoundaryPolicy;
use super::material::Material;

/// Identity of a quadtree leaf: footprint center and side length.
///
/// Displays as `"{x}.{z}[{size}]"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
    pub size: u32,
}

impl ChunkKey {
    /// Key for a square footprint with integral corners
    pub fn from_footprint(footprint: &Rect) -> Self {
        let size = footprint.size().x.round() as u32;
        Self {
            x: footprint.min.x.round() as i32 + (size / 2) as i32,
            z: footprint.min.y.round() as i32 + (size / 2) as i32,
            size,
        }
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}[{}]", self.x, self.z, self.size)
    }
}

/// Lifecycle of a pooled chunk slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChunkState {
    /// On the free list; mesh hidden
    #[default]
    Free,
    /// Tagged with a leaf, waiting for a rebuild
    Queued,
    /// Simulated, meshed and visible
    Built,
}

/// One reusable chunk.
///
/// Allocated once and retagged for new leaves; the column and geometry
/// buffers are overwritten in place by each rebuild.
#[derive(Debug)]
pub struct Chunk {
    pub key: ChunkKey,
    pub footprint: Rect,
    pub bounds: Aabb,
    pub center: Vec3,
    pub lod: u32,
    /// World units between neighbouring columns
    pub stride: f32,
    pub state: ChunkState,
    pub mesh: MeshId,
    columns: ColumnStore,
    geometry: MeshBuffers,
    skirt: MeshBuffers,
    quad_count: usize,
}

impl Chunk {
    pub fn new(dims: ChunkDims, mesh: MeshId) -> Self {
        Self {
            key: ChunkKey::default(),
            footprint: Rect::default(),
            bounds: Aabb::default(),
            center: Vec3::ZERO,
            lod: 1,
            stride: 1.0,
            state: ChunkState::Free,
            mesh,
            columns: ColumnStore::new(dims),
            geometry: MeshBuffers::new(),
            skirt: MeshBuffers::new(),
            quad_count: 0,
        }
    }

    /// Point this chunk at a new leaf footprint
    pub fn retag(&mut self, footprint: Rect, lod: u32) {
        let dims = self.columns.dims();
        self.key = ChunkKey::from_footprint(&footprint);
        self.footprint = footprint;
        self.bounds = Aabb::from_footprint(&footprint, dims.height as f32);
        self.center = self.bounds.center();
        self.lod = lod;
        self.stride = footprint.size().x / dims.width.max(1) as f32;
    }

    /// World-space minimum corner
    pub fn origin(&self) -> Vec3 {
        self.bounds.min
    }

    /// Regenerate every column from the height source
    pub fn simulate(&mut self, source: &dyn HeightSource, levels: &BiomeLevels) {
        let origin = Vec2::new(self.bounds.min.x, self.bounds.min.z);
        self.columns.fill_from_source(source, levels, origin, self.stride);
    }

    /// Rebuild surface geometry from the current columns
    pub fn mesh(&mut self, mesher: &mut GreedyMesher, policy: BoundaryPolicy, mode: MeshMode) {
        let origin = self.origin();
        let stride = self.stride;
        self.geometry.clear();
        match mode {
            MeshMode::Greedy => {
                let tint = lod_tint(self.lod);
                let quads = mesher.mesh(&self.columns, policy);
                for quad in quads {
                    self.geometry.push_quad(quad, origin, stride, tint);
                }
                self.quad_count = quads.len();
            }
            MeshMode::Naive => {
                let geometry = &mut self.geometry;
                let mut count = 0;
                naive::for_each_face(&self.columns, policy, |quad| {
                    geometry.push_quad(&quad, origin, stride, quad.material.color());
                    count += 1;
                });
                self.quad_count = count;
            }
        }
    }

    /// Rebuild the edge skirt from the current columns.
    ///
    /// Under [`BoundaryPolicy::Exposed`] the surface mesh already walls in
    /// every edge column down to the floor, so the skirt is left empty.
    pub fn build_skirt(&mut self, policy: BoundaryPolicy) {
        let origin = self.origin();
        let stride = self.stride;
        let tint = lod_tint(self.lod);
        let out = &mut self.skirt;
        out.clear();
        if policy == BoundaryPolicy::Exposed {
            return;
        }
        skirt::for_each_skirt_quad(&self.columns, |quad| out.push_quad(&quad, origin, stride, tint));
    }

    pub fn columns(&self) -> &ColumnStore {
        &self.columns
    }

    /// Surface geometry from the last [`Chunk::mesh`]
    pub fn geometry(&self) -> &MeshBuffers {
        &self.geometry
    }

    /// Skirt geometry from the last [`Chunk::build_skirt`]
    pub fn skirt(&self) -> &MeshBuffers {
        &self.skirt
    }

    /// Surface quads emitted by the last mesh pass (skirts excluded)
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count() + self.skirt.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.geometry.face_count() + self.skirt.face_count()
    }

    /// Material at a world position inside this chunk's footprint
    pub fn material_at(&self, x: f32, y: f32, z: f32) -> Option<Material> {
        if !self.bounds.contains_xz(x, z) || y < 0.0 {
            return None;
        }
        let last = self.columns.dims().width.saturating_sub(1) as i64;
        let cx = (((x - self.bounds.min.x) / self.stride).floor() as i64).min(last);
        let cz = (((z - self.bounds.min.z) / self.stride).floor() as i64).min(last);
        self.columns.get_voxel(cx, y.floor() as i64, cz)
    }
}
