//! Per-chunk grid of run-length encoded columns

use crate::core::types::Vec2;
use crate::terrain::HeightSource;
use crate::terrain::biome::BiomeLevels;
use super::material::Material;
use super::run::VoxelRun;

/// Voxel dimensions of a chunk: `width x height x width`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkDims {
    /// Columns along X and along Z
    pub width: usize,
    /// Voxels per column
    pub height: u32,
}

impl ChunkDims {
    pub const fn new(width: usize, height: u32) -> Self {
        Self { width, height }
    }

    pub fn column_count(&self) -> usize {
        self.width * self.width
    }

    /// Total voxel count (`width * height * width`)
    pub fn voxel_count(&self) -> usize {
        self.column_count() * self.height as usize
    }

    /// Extent along axis 0 (x), 1 (y) or 2 (z)
    pub fn extent(&self, axis: usize) -> usize {
        if axis == 1 { self.height as usize } else { self.width }
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::new(16, 128)
    }
}

/// `width x width` columns, each a [`VoxelRun`] summing to `height`
#[derive(Clone, Debug)]
pub struct ColumnStore {
    dims: ChunkDims,
    columns: Vec<VoxelRun>,
}

impl ColumnStore {
    /// All-air store
    pub fn new(dims: ChunkDims) -> Self {
        Self {
            dims,
            columns: vec![VoxelRun::filled(Material::Air, dims.height); dims.column_count()],
        }
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        x * self.dims.width + z
    }

    pub fn column(&self, x: usize, z: usize) -> &VoxelRun {
        &self.columns[self.index(x, z)]
    }

    /// Column at signed local coordinates; `None` outside the chunk
    pub fn column_at(&self, x: i64, z: i64) -> Option<&VoxelRun> {
        let w = self.dims.width as i64;
        if x < 0 || z < 0 || x >= w || z >= w {
            return None;
        }
        Some(self.column(x as usize, z as usize))
    }

    /// Point query by linear scan of one column; `None` outside the chunk
    pub fn get_voxel(&self, x: i64, y: i64, z: i64) -> Option<Material> {
        if y < 0 || y >= self.dims.height as i64 {
            return None;
        }
        self.column_at(x, z)?.get_voxel(y as u32)
    }

    /// Rewrite every column through `f(x, z, run)`.
    ///
    /// Columns that do not sum to the chunk height afterwards are padded
    /// with air or rebuilt clipped, so the length invariant always holds.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize, &mut VoxelRun),
    {
        let width = self.dims.width;
        let height = self.dims.height;
        for x in 0..width {
            for z in 0..width {
                let run = &mut self.columns[x * width + z];
                f(x, z, run);
                normalize_length(run, height);
            }
        }
    }

    /// Sample `source` once per column and write surface columns.
    ///
    /// Column `(x, z)` samples world position `origin + (x, z) * stride`.
    pub fn fill_from_source(
        &mut self,
        source: &dyn HeightSource,
        levels: &BiomeLevels,
        origin: Vec2,
        stride: f32,
    ) {
        let height = self.dims.height;
        self.fill_with(|x, z, run| {
            let wx = (origin.x + x as f32 * stride) as f64;
            let wz = (origin.y + z as f32 * stride) as f64;
            let elevation = source.height_at(wx, wz);
            let surface = if elevation.is_finite() {
                elevation.clamp(0.0, height as f64) as u32
            } else {
                0
            };
            let material = levels.classify(surface as f64, source.moisture_at(wx, wz));
            run.set_surface(material, surface, height);
        });
    }

    /// True when every column sums to the chunk height
    pub fn lengths_valid(&self) -> bool {
        self.columns.iter().all(|c| c.total_length() == self.dims.height)
    }

    pub fn columns(&self) -> &[VoxelRun] {
        &self.columns
    }
}

fn normalize_length(run: &mut VoxelRun, height: u32) {
    let total = run.total_length();
    if total == height {
        return;
    }
    if total < height {
        run.push(Material::Air, height - total);
        return;
    }
    let intervals: Vec<_> = run.intervals().to_vec();
    run.clear();
    let mut remaining = height;
    for interval in intervals {
        let length = interval.length.min(remaining);
        run.push(interval.material, length);
        remaining -= length;
    }
}
