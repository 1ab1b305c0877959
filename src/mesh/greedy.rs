//! Greedy surface meshing over run-length encoded columns
//!
//! For each face direction the mesher walks every column, visits only the
//! voxels [`ColumnCursor::first_exposed_face`] reports, and grows the largest
//! rectangle of same-material, same-exposure voxels it can from each unvisited
//! seed. One [`Quad`] is emitted per rectangle. A 6-bit mask per voxel records
//! which directions have already been consumed.

use crate::voxel::column::{ChunkDims, ColumnStore};
use crate::voxel::face::{Face, FaceAxes};
use crate::voxel::iter::{BoundaryPolicy, ColumnCursor};
use crate::voxel::material::Material;
use super::buffers::Quad;

/// Reusable greedy meshing workspace.
///
/// Holds the visited mask and the quad list so meshing many chunks of the
/// same dimensions does not reallocate.
#[derive(Debug, Default)]
pub struct GreedyMesher {
    visited: Vec<u8>,
    quads: Vec<Quad>,
    dims: Option<ChunkDims>,
}

impl GreedyMesher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quads produced by the last call to [`GreedyMesher::mesh`]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Mesh every exposed face of `store` into merged quads
    pub fn mesh(&mut self, store: &ColumnStore, policy: BoundaryPolicy) -> &[Quad] {
        let dims = store.dims();
        self.reset(dims);

        let mut walker = ColumnCursor::new(store, policy, 0, 0);
        let mut probe = ColumnCursor::new(store, policy, 0, 0);

        for face in Face::ALL {
            let axes = face.axes();
            for x in 0..dims.width {
                for z in 0..dims.width {
                    walker.move_to(x, z);
                    let mut from = 0;
                    while let Some(y) = walker.first_exposed_face(from) {
                        from = y + 1;
                        if !walker.is_exposed(face) || self.is_visited([x, y as usize, z], face) {
                            continue;
                        }
                        let material = walker.voxel();
                        let quad = self.grow([x, y as usize, z], face, axes, material, &mut probe);
                        self.quads.push(quad);
                    }
                }
            }
        }

        log::trace!("Greedy mesh: {} quads for {:?}", self.quads.len(), dims);
        &self.quads
    }

    fn reset(&mut self, dims: ChunkDims) {
        self.quads.clear();
        if self.dims == Some(dims) {
            self.visited.fill(0);
        } else {
            self.visited.clear();
            self.visited.resize(dims.voxel_count(), 0);
            self.dims = Some(dims);
        }
    }

    #[inline]
    fn voxel_index(&self, pos: [usize; 3]) -> usize {
        let dims = self.dims.unwrap_or_default();
        (pos[0] * dims.width + pos[2]) * dims.height as usize + pos[1]
    }

    #[inline]
    fn is_visited(&self, pos: [usize; 3], face: Face) -> bool {
        self.visited[self.voxel_index(pos)] & face.bit() != 0
    }

    /// Whether `pos` can join a rectangle seeded with `material` facing `face`
    fn accepts(
        &self,
        pos: [usize; 3],
        face: Face,
        material: Material,
        probe: &mut ColumnCursor<'_>,
    ) -> bool {
        if self.is_visited(pos, face) {
            return false;
        }
        let (px, _, pz) = probe.position();
        if (px, pz) != (pos[0], pos[2]) {
            probe.move_to(pos[0], pos[2]);
        }
        probe.seek(pos[1] as u32) == material && probe.is_exposed(face)
    }

    /// Grow the maximal rectangle from `seed`, mark it visited and return it
    fn grow(
        &mut self,
        seed: [usize; 3],
        face: Face,
        axes: FaceAxes,
        material: Material,
        probe: &mut ColumnCursor<'_>,
    ) -> Quad {
        let dims = store_extent(self.dims.unwrap_or_default());

        let mut main_len = 1;
        while seed[axes.main] + main_len < dims[axes.main] {
            let mut pos = seed;
            pos[axes.main] += main_len;
            if !self.accepts(pos, face, material, probe) {
                break;
            }
            main_len += 1;
        }

        let mut alt_len = 1;
        'alt: while seed[axes.alt] + alt_len < dims[axes.alt] {
            for m in 0..main_len {
                let mut pos = seed;
                pos[axes.main] += m;
                pos[axes.alt] += alt_len;
                if !self.accepts(pos, face, material, probe) {
                    break 'alt;
                }
            }
            alt_len += 1;
        }

        for a in 0..alt_len {
            for m in 0..main_len {
                let mut pos = seed;
                pos[axes.main] += m;
                pos[axes.alt] += a;
                let index = self.voxel_index(pos);
                self.visited[index] |= face.bit();
            }
        }

        Quad {
            face,
            origin: seed.map(|v| v as u32),
            main_len: main_len as u32,
            alt_len: alt_len as u32,
            material,
        }
    }
}

fn store_extent(dims: ChunkDims) -> [usize; 3] {
    [dims.extent(0), dims.extent(1), dims.extent(2)]
}
