//! Run-length encoded voxel columns
//!
//! A column is stored bottom-up as a list of `(material, length)` intervals
//! instead of one entry per voxel. Lengths always sum to the chunk height.

use super::material::Material;

/// Length of the single interval in a null run. Covers every `y`.
pub const NULL_LENGTH: u32 = u32::MAX;

/// One run of identical voxels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelInterval {
    pub material: Material,
    pub length: u32,
}

impl VoxelInterval {
    pub const fn new(material: Material, length: u32) -> Self {
        Self { material, length }
    }
}

/// Null run resolving to air: off-chunk neighbours leave faces exposed
pub static NULL_RUN_OPEN: [VoxelInterval; 1] = [VoxelInterval::new(Material::Air, NULL_LENGTH)];

/// Null run resolving to solid: off-chunk neighbours occlude faces
pub static NULL_RUN_SOLID: [VoxelInterval; 1] = [VoxelInterval::new(Material::Unknown, NULL_LENGTH)];

/// Ordered list of intervals making up one vertical column
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelRun {
    intervals: Vec<VoxelInterval>,
}

impl VoxelRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column of `height` voxels of one material
    pub fn filled(material: Material, height: u32) -> Self {
        let mut run = Self::new();
        run.push(material, height);
        run
    }

    /// Build from `(material, length)` pairs, merging and dropping empty runs
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = (Material, u32)>,
    {
        let mut run = Self::new();
        for (material, length) in intervals {
            run.push(material, length);
        }
        run
    }

    /// Remove all intervals, keeping the allocation
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Append `length` voxels on top of the column.
    ///
    /// Zero-length runs are dropped and a run matching the current top
    /// material is merged into it, so the column stays minimal.
    pub fn push(&mut self, material: Material, length: u32) {
        if length == 0 {
            return;
        }
        match self.intervals.last_mut() {
            Some(last) if last.material == material => last.length += length,
            _ => self.intervals.push(VoxelInterval::new(material, length)),
        }
    }

    /// Overwrite with `height` solid voxels of `material` capped by air up to `column_height`
    pub fn set_surface(&mut self, material: Material, height: u32, column_height: u32) {
        let height = height.min(column_height);
        self.clear();
        self.push(material, height);
        self.push(Material::Air, column_height - height);
    }

    pub fn intervals(&self) -> &[VoxelInterval] {
        &self.intervals
    }

    /// Sum of all interval lengths
    pub fn total_length(&self) -> u32 {
        self.intervals.iter().map(|i| i.length).sum()
    }

    /// True when no two consecutive intervals share a material
    pub fn is_minimal(&self) -> bool {
        self.intervals.windows(2).all(|w| w[0].material != w[1].material)
    }

    /// Point query by linear scan. `None` when `y` lies above the column.
    pub fn get_voxel(&self, y: u32) -> Option<Material> {
        let mut bound = 0u32;
        for interval in &self.intervals {
            bound += interval.length;
            if y < bound {
                return Some(interval.material);
            }
        }
        None
    }
}
