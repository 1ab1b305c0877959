//! Chunk pool - arena of reusable chunks with a free list
//!
//! - Chunks are allocated on demand and never dropped while the pool lives
//! - Released slots go on a LIFO free list and are handed out first
//! - Handles are plain indices into the arena

use crate::voxel::chunk::{Chunk, ChunkState};

/// Index of a chunk in the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkHandle(pub u32);

impl ChunkHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Growable arena of chunks
#[derive(Debug, Default)]
pub struct ChunkPool {
    /// Every chunk ever allocated
    chunks: Vec<Chunk>,
    /// Released slots, most recent last
    free_slots: Vec<ChunkHandle>,
}

impl ChunkPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop a released slot, if any
    pub fn recycle(&mut self) -> Option<ChunkHandle> {
        let handle = self.free_slots.pop()?;
        log::trace!("Recycled chunk slot {}", handle.0);
        Some(handle)
    }

    /// Add a freshly allocated chunk to the arena
    pub fn insert(&mut self, chunk: Chunk) -> ChunkHandle {
        let handle = ChunkHandle(self.chunks.len() as u32);
        self.chunks.push(chunk);
        log::debug!("Allocated chunk slot {} ({} total)", handle.0, self.chunks.len());
        handle
    }

    /// Mark a slot free and put it on the free list.
    ///
    /// Releasing a slot that is already free is ignored.
    pub fn release(&mut self, handle: ChunkHandle) {
        let Some(chunk) = self.chunks.get_mut(handle.index()) else {
            log::warn!("Release of unknown chunk slot {}", handle.0);
            return;
        };
        if chunk.state == ChunkState::Free {
            return;
        }
        chunk.state = ChunkState::Free;
        self.free_slots.push(handle);
    }

    pub fn get(&self, handle: ChunkHandle) -> Option<&Chunk> {
        self.chunks.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: ChunkHandle) -> Option<&mut Chunk> {
        self.chunks.get_mut(handle.index())
    }

    /// Chunks ever allocated
    pub fn allocated(&self) -> usize {
        self.chunks.len()
    }

    /// Slots waiting on the free list
    pub fn free_count(&self) -> usize {
        self.free_slots.len()
    }

    /// Slots currently tagged with a leaf
    pub fn live_count(&self) -> usize {
        self.chunks.len() - self.free_slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Take every chunk out of the pool
    pub fn drain(&mut self) -> impl Iterator<Item = Chunk> + '_ {
        self.free_slots.clear();
        self.chunks.drain(..)
    }
}
