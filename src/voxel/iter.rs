//! Cursors over run-length encoded columns
//!
//! [`RunIterator`] walks the intervals of one column and answers "which
//! material is at `y`" in amortized O(1) for monotonic scans.
//! [`ColumnCursor`] bundles the cursor for a column with cursors for its
//! four horizontal neighbours so face exposure can be read at any `y`.

use serde::{Deserialize, Serialize};

use super::column::ColumnStore;
use super::face::Face;
use super::material::Material;
use super::run::{VoxelInterval, NULL_RUN_OPEN, NULL_RUN_SOLID};

/// What lies beyond the edges of a chunk (horizontally and vertically)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Outside is air: chunks mesh as closed shells
    #[default]
    Exposed,
    /// Outside is solid: faces on the chunk boundary are culled
    Occluded,
}

impl BoundaryPolicy {
    /// Material assumed outside the chunk
    pub fn material(self) -> Material {
        match self {
            BoundaryPolicy::Exposed => Material::Air,
            BoundaryPolicy::Occluded => Material::Unknown,
        }
    }

    /// Sentinel run standing in for a missing neighbour column
    pub fn null_run(self) -> &'static [VoxelInterval] {
        match self {
            BoundaryPolicy::Exposed => &NULL_RUN_OPEN,
            BoundaryPolicy::Occluded => &NULL_RUN_SOLID,
        }
    }
}

/// Mutable cursor over the intervals of one column.
///
/// The cursor always sits on one interval `[start, end)`. `next_index` is the
/// index of the interval after it.
#[derive(Clone, Copy, Debug)]
pub struct RunIterator<'a> {
    run: &'a [VoxelInterval],
    start: u32,
    end: u32,
    material: Material,
    next_index: usize,
}

impl<'a> RunIterator<'a> {
    /// Cursor positioned on the first interval of `run`
    pub fn new(run: &'a [VoxelInterval]) -> Self {
        let mut it = Self {
            run,
            start: 0,
            end: 0,
            material: Material::Air,
            next_index: 0,
        };
        it.iter();
        it
    }

    /// Retarget to another column and rewind to its first interval
    pub fn reset(&mut self, run: &'a [VoxelInterval]) {
        *self = Self::new(run);
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Advance one interval. Returns false (cursor unchanged) on the last one.
    pub fn iter(&mut self) -> bool {
        let Some(next) = self.run.get(self.next_index) else {
            return false;
        };
        self.start = self.end;
        self.end = self.start.saturating_add(next.length);
        self.material = next.material;
        self.next_index += 1;
        true
    }

    /// Retreat one interval. Returns false (cursor unchanged) on the first one.
    pub fn iter_rev(&mut self) -> bool {
        if self.next_index < 2 {
            return false;
        }
        let prev = self.run[self.next_index - 2];
        self.end = self.start;
        self.start = self.end - prev.length;
        self.material = prev.material;
        self.next_index -= 1;
        true
    }

    /// Advance until the current interval contains `y` (or the column ends)
    pub fn forward_to(&mut self, y: u32) -> Material {
        while y >= self.end && self.iter() {}
        self.material
    }

    /// Retreat until the current interval contains `y` (or the column starts)
    pub fn reverse_to(&mut self, y: u32) -> Material {
        while y < self.start && self.iter_rev() {}
        self.material
    }

    /// Move in whichever direction reaches `y`
    pub fn seek(&mut self, y: u32) -> Material {
        if y < self.start {
            self.reverse_to(y)
        } else {
            self.forward_to(y)
        }
    }

    /// Material of the interval above the current one
    pub fn peek_above(&self) -> Option<Material> {
        self.run.get(self.next_index).map(|i| i.material)
    }

    /// Material of the interval below the current one
    pub fn peek_below(&self) -> Option<Material> {
        self.next_index
            .checked_sub(2)
            .and_then(|i| self.run.get(i))
            .map(|i| i.material)
    }

    /// Lowest air voxel at or above `y`, leaving the cursor on its interval
    pub fn first_air_from(&mut self, y: u32) -> Option<u32> {
        self.first_matching_from(y, Material::is_air)
    }

    /// Lowest solid voxel at or above `y`, leaving the cursor on its interval
    pub fn first_solid_from(&mut self, y: u32) -> Option<u32> {
        self.first_matching_from(y, Material::is_solid)
    }

    fn first_matching_from(&mut self, y: u32, pred: fn(Material) -> bool) -> Option<u32> {
        self.seek(y);
        loop {
            if pred(self.material) && self.end > y {
                return Some(self.start.max(y));
            }
            if !self.iter() {
                return None;
            }
        }
    }
}

/// A column plus its four horizontal neighbours, read at a shared `y`.
///
/// Neighbours outside the chunk are the policy's null run; above and below
/// the column the policy's boundary material applies.
#[derive(Clone, Debug)]
pub struct ColumnCursor<'a> {
    store: &'a ColumnStore,
    policy: BoundaryPolicy,
    x: usize,
    z: usize,
    y: u32,
    center: RunIterator<'a>,
    left: RunIterator<'a>,
    right: RunIterator<'a>,
    back: RunIterator<'a>,
    front: RunIterator<'a>,
}

impl<'a> ColumnCursor<'a> {
    pub fn new(store: &'a ColumnStore, policy: BoundaryPolicy, x: usize, z: usize) -> Self {
        let null = RunIterator::new(policy.null_run());
        let mut cursor = Self {
            store,
            policy,
            x,
            z,
            y: 0,
            center: null,
            left: null,
            right: null,
            back: null,
            front: null,
        };
        cursor.move_to(x, z);
        cursor
    }

    /// Retarget to column `(x, z)` and rewind to `y = 0`
    pub fn move_to(&mut self, x: usize, z: usize) {
        let (xi, zi) = (x as i64, z as i64);
        self.x = x;
        self.z = z;
        self.y = 0;
        self.center.reset(self.run_at(xi, zi));
        self.left.reset(self.run_at(xi - 1, zi));
        self.right.reset(self.run_at(xi + 1, zi));
        self.back.reset(self.run_at(xi, zi - 1));
        self.front.reset(self.run_at(xi, zi + 1));
    }

    fn run_at(&self, x: i64, z: i64) -> &'a [VoxelInterval] {
        let store: &'a ColumnStore = self.store;
        match store.column_at(x, z) {
            Some(run) => run.intervals(),
            None => self.policy.null_run(),
        }
    }

    #[inline]
    pub fn position(&self) -> (usize, u32, usize) {
        (self.x, self.y, self.z)
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Move all five cursors to `y`; returns the column's material there
    pub fn seek(&mut self, y: u32) -> Material {
        self.y = y;
        self.left.seek(y);
        self.right.seek(y);
        self.back.seek(y);
        self.front.seek(y);
        self.center.seek(y);
        self.voxel()
    }

    fn in_column(&self, y: u32) -> bool {
        y < self.store.dims().height
    }

    /// Material of the column at the current `y`
    pub fn voxel(&self) -> Material {
        if self.in_column(self.y) { self.center.material() } else { self.policy.material() }
    }

    pub fn top_voxel(&self) -> Material {
        let above = self.y.saturating_add(1);
        if !self.in_column(above) {
            return self.policy.material();
        }
        if above < self.center.end() {
            self.center.material()
        } else {
            self.center.peek_above().unwrap_or(self.policy.material())
        }
    }

    pub fn bottom_voxel(&self) -> Material {
        if self.y == 0 || !self.in_column(self.y - 1) {
            return self.policy.material();
        }
        if self.y > self.center.start() {
            self.center.material()
        } else {
            self.center.peek_below().unwrap_or(self.policy.material())
        }
    }

    pub fn left_voxel(&self) -> Material {
        self.side_voxel(&self.left)
    }

    pub fn right_voxel(&self) -> Material {
        self.side_voxel(&self.right)
    }

    pub fn back_voxel(&self) -> Material {
        self.side_voxel(&self.back)
    }

    pub fn front_voxel(&self) -> Material {
        self.side_voxel(&self.front)
    }

    fn side_voxel(&self, it: &RunIterator<'_>) -> Material {
        if self.in_column(self.y) { it.material() } else { self.policy.material() }
    }

    /// Neighbour material across `face`
    pub fn neighbor(&self, face: Face) -> Material {
        match face {
            Face::Left => self.left_voxel(),
            Face::Right => self.right_voxel(),
            Face::Bottom => self.bottom_voxel(),
            Face::Top => self.top_voxel(),
            Face::Back => self.back_voxel(),
            Face::Front => self.front_voxel(),
        }
    }

    /// Solid voxel at the current `y` whose neighbour across `face` is air
    pub fn is_exposed(&self, face: Face) -> bool {
        self.voxel().is_solid() && self.neighbor(face).is_air()
    }

    /// Lowest `y >= from` where a solid voxel of this column may show a face.
    ///
    /// Candidates are the bottom and top voxel of each solid interval and every
    /// height at which a horizontal neighbour is air. Voxels between candidates
    /// are buried on all six sides and are skipped. The cursor is left seeked to
    /// the returned `y`.
    pub fn first_exposed_face(&mut self, from: u32) -> Option<u32> {
        let height = self.store.dims().height;
        if from >= height {
            return None;
        }
        let start = self.center.first_solid_from(from)?;
        if start >= height {
            return None;
        }
        let run_start = self.center.start();
        let run_end = self.center.end().min(height);

        let mut lowest = if start == run_start { start } else { run_end - 1 };
        for it in [&mut self.left, &mut self.right, &mut self.back, &mut self.front] {
            if let Some(air) = it.first_air_from(start) {
                lowest = lowest.min(air);
            }
        }

        self.seek(lowest);
        Some(lowest)
    }
}
