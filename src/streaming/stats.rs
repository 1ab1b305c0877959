//! Terrain diagnostics

use std::time::Duration;

/// Outcome of one `diff_chunks` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Leaves that needed a chunk and were queued
    pub added: usize,
    /// Chunks hidden and returned to the pool
    pub removed: usize,
    /// Leaves whose chunk was kept untouched
    pub kept: usize,
    /// Leaves skipped for lying beyond the view distance
    pub culled: usize,
}

impl DiffSummary {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Running totals over every chunk rebuild
#[derive(Clone, Debug, Default)]
pub struct BuildTimings {
    /// Chunks rebuilt
    pub chunks_built: u64,
    /// Rebuilds of slots that were already recycled when their task ran
    pub superseded_builds: u64,
    pub simulate_time: Duration,
    pub mesh_time: Duration,
    pub skirt_time: Duration,
}

impl BuildTimings {
    pub fn record(&mut self, simulate: Duration, mesh: Duration, skirt: Duration) {
        self.chunks_built += 1;
        self.simulate_time += simulate;
        self.mesh_time += mesh;
        self.skirt_time += skirt;
    }

    fn average(&self, total: Duration) -> Duration {
        match u32::try_from(self.chunks_built) {
            Ok(0) => Duration::ZERO,
            Ok(n) => total / n,
            Err(_) => Duration::from_secs_f64(total.as_secs_f64() / self.chunks_built as f64),
        }
    }

    pub fn avg_simulate_time(&self) -> Duration {
        self.average(self.simulate_time)
    }

    pub fn avg_mesh_time(&self) -> Duration {
        self.average(self.mesh_time)
    }

    pub fn avg_skirt_time(&self) -> Duration {
        self.average(self.skirt_time)
    }
}

/// Point-in-time snapshot of the terrain
#[derive(Clone, Debug, Default)]
pub struct TerrainStats {
    /// Vertices across built, live chunks (surface and skirt)
    pub live_vertices: usize,
    /// Triangles across built, live chunks
    pub live_faces: usize,
    /// Chunks tagged with a current leaf (queued or built)
    pub live_chunks: usize,
    /// Live chunks already built
    pub built_chunks: usize,
    /// Built chunks the renderer reports inside the frustum
    pub visible_chunks: usize,
    /// Chunks ever allocated by the pool
    pub allocated_chunks: usize,
    /// Tasks waiting on the rebuild stack
    pub pending_tasks: usize,
    pub avg_simulate_time: Duration,
    pub avg_mesh_time: Duration,
    pub avg_skirt_time: Duration,
    pub chunks_built: u64,
    pub superseded_builds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timings_average_zero() {
        let timings = BuildTimings::default();
        assert_eq!(timings.avg_simulate_time(), Duration::ZERO);
        assert_eq!(timings.avg_mesh_time(), Duration::ZERO);
    }

    #[test]
    fn test_timings_average() {
        let mut timings = BuildTimings::default();
        timings.record(Duration::from_millis(2), Duration::from_millis(4), Duration::from_millis(1));
        timings.record(Duration::from_millis(4), Duration::from_millis(8), Duration::from_millis(3));
        assert_eq!(timings.chunks_built, 2);
        assert_eq!(timings.avg_simulate_time(), Duration::from_millis(3));
        assert_eq!(timings.avg_mesh_time(), Duration::from_millis(6));
        assert_eq!(timings.avg_skirt_time(), Duration::from_millis(2));
    }

    #[test]
    fn test_diff_summary_unchanged() {
        assert!(DiffSummary { kept: 5, culled: 2, ..Default::default() }.is_unchanged());
        assert!(!DiffSummary { added: 1, ..Default::default() }.is_unchanged());
        assert!(!DiffSummary { removed: 1, ..Default::default() }.is_unchanged());
    }
}
