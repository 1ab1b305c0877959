//! Terrain Manager - Drives the quadtree, chunk pool and rebuild stack
//!
//! Per frame the host calls [`TerrainManager::diff_chunks`] with the camera
//! position and then [`TerrainManager::exec_pending_task`] once. Diffing is
//! cheap (key comparison and retagging); the expensive simulate/mesh/upload
//! work is spread across frames, one chunk per call.

use std::collections::HashMap;
use std::time::Instant;

use crate::core::types::{Result, Vec2};
use crate::math::Rect;
use crate::mesh::{GreedyMesher, MeshBuffers};
use crate::render::RenderBackend;
use crate::terrain::{BiomeLevels, HeightSource};
use crate::voxel::chunk::{Chunk, ChunkKey, ChunkState};
use crate::voxel::column::ChunkDims;
use super::config::TerrainConfig;
use super::lod::lod_for_size;
use super::pool::{ChunkHandle, ChunkPool};
use super::quadtree::QuadTree;
use super::stats::{BuildTimings, DiffSummary, TerrainStats};

/// Owns every chunk and the renderer meshes bound to them
pub struct TerrainManager<R: RenderBackend> {
    config: TerrainConfig,
    dims: ChunkDims,
    levels: BiomeLevels,
    source: Box<dyn HeightSource>,
    renderer: R,
    quadtree: QuadTree,
    pool: ChunkPool,
    /// Current leaf set
    index: HashMap<ChunkKey, ChunkHandle>,
    /// Rebuild stack, most recent last
    tasks: Vec<ChunkHandle>,
    mesher: GreedyMesher,
    timings: BuildTimings,
    /// Surface plus skirt, reused for every upload
    upload: MeshBuffers,
}

impl<R: RenderBackend> TerrainManager<R> {
    /// Validate `config` and set up an empty terrain.
    ///
    /// Fails with [`crate::core::Error::Config`] before any chunk or mesh is
    /// allocated.
    pub fn new(config: TerrainConfig, source: Box<dyn HeightSource>, renderer: R) -> Result<Self> {
        config.validate()?;

        let dims = config.chunk_dims();
        let world = Rect::square(Vec2::ZERO, config.world_size as f32);
        log::info!(
            "Terrain: world {}, leaves {}..{}, chunk {}x{}x{}, view distance {}",
            config.world_size,
            config.min_node_size,
            config.world_size,
            dims.width,
            dims.height,
            dims.width,
            config.view_distance,
        );

        Ok(Self {
            dims,
            levels: BiomeLevels::for_height(config.chunk_height),
            source,
            renderer,
            quadtree: QuadTree::new(world, config.min_node_size as f32),
            pool: ChunkPool::new(),
            index: HashMap::new(),
            tasks: Vec::new(),
            mesher: GreedyMesher::new(),
            timings: BuildTimings::default(),
            upload: MeshBuffers::new(),
            config,
        })
    }

    /// Recompute the leaf set for a camera at `(camera_x, camera_z)`.
    ///
    /// Chunks whose leaf survives are untouched. Chunks whose leaf vanished
    /// are hidden and released to the pool; new leaves take a released slot
    /// (or a fresh allocation) and are pushed onto the rebuild stack,
    /// farthest first so the nearest builds first. Calling this again with
    /// an unchanged leaf set does nothing, and so does a non-finite camera.
    pub fn diff_chunks(&mut self, camera_x: f32, camera_z: f32) -> DiffSummary {
        if !camera_x.is_finite() || !camera_z.is_finite() {
            log::warn!("Ignoring diff for non-finite camera ({}, {})", camera_x, camera_z);
            return DiffSummary::default();
        }
        let camera = Vec2::new(camera_x, camera_z);
        self.quadtree.insert(camera);

        let mut summary = DiffSummary::default();
        let mut next = HashMap::with_capacity(self.index.len());
        let mut added: Vec<(ChunkKey, Rect, f32)> = Vec::new();

        for leaf in self.quadtree.leaves() {
            let distance = leaf.distance_to_point(camera);
            if distance > self.config.view_distance {
                summary.culled += 1;
                continue;
            }
            let key = ChunkKey::from_footprint(&leaf);
            match self.index.remove(&key) {
                Some(handle) => {
                    next.insert(key, handle);
                    summary.kept += 1;
                }
                None => added.push((key, leaf, distance)),
            }
        }

        // Release first so this diff's new leaves can reuse the slots
        for (key, handle) in self.index.drain() {
            if let Some(chunk) = self.pool.get(handle) {
                self.renderer.set_enabled(chunk.mesh, false);
            }
            self.pool.release(handle);
            summary.removed += 1;
            log::trace!("Released chunk {}", key);
        }

        added.sort_by(|a, b| b.2.total_cmp(&a.2));
        let min_size = self.config.min_node_size as f32;
        for (key, leaf, _) in added {
            let handle = match self.pool.recycle() {
                Some(handle) => handle,
                None => {
                    let mesh = self.renderer.create_mesh(&key.to_string());
                    self.pool.insert(Chunk::new(self.dims, mesh))
                }
            };
            if let Some(chunk) = self.pool.get_mut(handle) {
                chunk.retag(leaf, lod_for_size(leaf.size().x, min_size));
                chunk.state = ChunkState::Queued;
            }
            self.tasks.push(handle);
            next.insert(key, handle);
            summary.added += 1;
        }

        self.index = next;

        if !summary.is_unchanged() {
            log::debug!(
                "Diff at ({:.1}, {:.1}): +{} -{} ={} culled {} ({} tasks, {} allocated)",
                camera_x,
                camera_z,
                summary.added,
                summary.removed,
                summary.kept,
                summary.culled,
                self.tasks.len(),
                self.pool.allocated(),
            );
        }
        summary
    }

    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Pop one task off the rebuild stack and run it.
    ///
    /// Returns false when the stack was empty. A task whose chunk was
    /// released after queueing is still built but its mesh stays hidden.
    pub fn exec_pending_task(&mut self) -> bool {
        let Some(handle) = self.tasks.pop() else {
            return false;
        };
        let Some(chunk) = self.pool.get_mut(handle) else {
            log::warn!("Task for unknown chunk slot {}", handle.0);
            return true;
        };
        if chunk.state == ChunkState::Built {
            // Queued twice through a release and recycle; the newer task already ran
            log::trace!("Chunk {} already built", chunk.key);
            return true;
        }

        let start = Instant::now();
        chunk.simulate(self.source.as_ref(), &self.levels);
        let simulate_time = start.elapsed();

        let start = Instant::now();
        chunk.mesh(&mut self.mesher, self.config.boundary, self.config.mesh_mode);
        let mesh_time = start.elapsed();

        let start = Instant::now();
        chunk.build_skirt(self.config.boundary);
        let skirt_time = start.elapsed();

        self.timings.record(simulate_time, mesh_time, skirt_time);

        self.upload.clear();
        self.upload.extend_from(chunk.geometry());
        self.upload.extend_from(chunk.skirt());
        self.renderer.upload(chunk.mesh, &self.upload);

        if chunk.state == ChunkState::Free {
            self.timings.superseded_builds += 1;
            self.renderer.set_enabled(chunk.mesh, false);
            log::warn!("Built chunk {} after its leaf was dropped", chunk.key);
        } else {
            chunk.state = ChunkState::Built;
            self.renderer.set_enabled(chunk.mesh, true);
            log::debug!(
                "Built chunk {} lod {}: {} quads, {} vertices",
                chunk.key,
                chunk.lod,
                chunk.quad_count(),
                chunk.vertex_count(),
            );
        }
        true
    }

    /// Solidity at a world position.
    ///
    /// Anything outside the built terrain counts as solid: no live chunk
    /// under `(x, z)`, a chunk still waiting for its rebuild, or `y` outside
    /// the column.
    pub fn is_voxel_solid(&self, x: f32, y: f32, z: f32) -> bool {
        let Some(chunk) = self.live_chunks().find(|c| c.bounds.contains_xz(x, z)) else {
            return true;
        };
        if chunk.state != ChunkState::Built {
            return true;
        }
        chunk.material_at(x, y, z).is_none_or(|m| m.is_solid())
    }

    /// Built chunks the renderer reports inside its frustum
    pub fn visible_chunk_count(&self) -> usize {
        self.live_chunks()
            .filter(|c| c.state == ChunkState::Built && self.renderer.in_frustum(c.mesh))
            .count()
    }

    pub fn stats(&self) -> TerrainStats {
        let mut stats = TerrainStats {
            allocated_chunks: self.pool.allocated(),
            pending_tasks: self.tasks.len(),
            avg_simulate_time: self.timings.avg_simulate_time(),
            avg_mesh_time: self.timings.avg_mesh_time(),
            avg_skirt_time: self.timings.avg_skirt_time(),
            chunks_built: self.timings.chunks_built,
            superseded_builds: self.timings.superseded_builds,
            visible_chunks: self.visible_chunk_count(),
            ..Default::default()
        };
        for chunk in self.live_chunks() {
            stats.live_chunks += 1;
            if chunk.state == ChunkState::Built {
                stats.built_chunks += 1;
                stats.live_vertices += chunk.vertex_count();
                stats.live_faces += chunk.face_count();
            }
        }
        stats
    }

    /// Chunks tagged with a current leaf
    pub fn live_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.index.values().filter_map(|&h| self.pool.get(h))
    }

    pub fn chunk(&self, key: &ChunkKey) -> Option<&Chunk> {
        self.index.get(key).and_then(|&h| self.pool.get(h))
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Dispose every pooled mesh and hand the renderer back
    pub fn dispose(mut self) -> R {
        let mut disposed = 0;
        for chunk in self.pool.drain() {
            self.renderer.dispose(chunk.mesh);
            disposed += 1;
        }
        self.index.clear();
        self.tasks.clear();
        log::info!("Terrain disposed {} chunks", disposed);
        self.renderer
    }
}
