//! Pre-baked height sample grid

use crate::core::error::Error;
use crate::core::types::Result;
use super::HeightSource;

/// Immutable `width x depth` grid of height samples.
///
/// Samples are normalized by `max_sample` and scaled to `vertical_scale`
/// voxels. World position `(x, z)` maps to grid cell `(x, z) / cell_size`,
/// rounded to the nearest sample and clamped to the grid edges.
#[derive(Clone, Debug)]
pub struct HeightMap {
    width: usize,
    depth: usize,
    samples: Vec<f32>,
    max_sample: f32,
    cell_size: f64,
    vertical_scale: f64,
    moisture: f64,
}

impl HeightMap {
    /// Create from row-major samples (`samples[z * width + x]`)
    pub fn new(width: usize, depth: usize, samples: Vec<f32>, max_sample: f32) -> Result<Self> {
        if width == 0 || depth == 0 {
            return Err(Error::HeightMap(format!("empty grid {}x{}", width, depth)));
        }
        if samples.len() != width * depth {
            return Err(Error::HeightMap(format!(
                "expected {} samples for {}x{} grid, got {}",
                width * depth,
                width,
                depth,
                samples.len()
            )));
        }
        if !(max_sample > 0.0) || !max_sample.is_finite() {
            return Err(Error::HeightMap(format!("max sample must be positive, got {}", max_sample)));
        }
        Ok(Self {
            width,
            depth,
            samples,
            max_sample,
            cell_size: 1.0,
            vertical_scale: 128.0,
            moisture: 0.0,
        })
    }

    /// Build by evaluating `f(gx, gz)` for every cell
    pub fn from_fn<F>(width: usize, depth: usize, max_sample: f32, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut samples = Vec::with_capacity(width * depth);
        for gz in 0..depth {
            for gx in 0..width {
                samples.push(f(gx, gz));
            }
        }
        Self::new(width, depth, samples, max_sample)
    }

    /// World units covered by one sample
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Voxel height corresponding to `max_sample`
    pub fn with_vertical_scale(mut self, voxels: f64) -> Self {
        self.vertical_scale = voxels;
        self
    }

    /// Uniform moisture reported everywhere
    pub fn with_moisture(mut self, moisture: f64) -> Self {
        self.moisture = moisture;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_sample(&self) -> f32 {
        self.max_sample
    }

    /// Raw sample at a grid coordinate, clamped to the grid
    pub fn get_height(&self, gx: i64, gz: i64) -> f32 {
        let x = gx.clamp(0, self.width as i64 - 1) as usize;
        let z = gz.clamp(0, self.depth as i64 - 1) as usize;
        self.samples[z * self.width + x]
    }

    /// Sample at a grid coordinate as a fraction of `max_sample`
    pub fn height_fraction(&self, gx: i64, gz: i64) -> f64 {
        self.get_height(gx, gz) as f64 / self.max_sample as f64
    }

    fn grid_coord(&self, world: f64) -> i64 {
        let g = (world / self.cell_size).round();
        if g.is_finite() { g as i64 } else { 0 }
    }
}

impl HeightSource for HeightMap {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self.height_fraction(self.grid_coord(x), self.grid_coord(z)) * self.vertical_scale
    }

    fn moisture_at(&self, _x: f64, _z: f64) -> f64 {
        self.moisture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> HeightMap {
        HeightMap::from_fn(4, 3, 255.0, |gx, gz| (gx * 10 + gz) as f32).unwrap()
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(HeightMap::new(0, 4, vec![], 1.0), Err(Error::HeightMap(_))));
        assert!(matches!(HeightMap::new(2, 2, vec![0.0; 3], 1.0), Err(Error::HeightMap(_))));
        assert!(matches!(HeightMap::new(1, 1, vec![0.0], 0.0), Err(Error::HeightMap(_))));
        assert!(matches!(HeightMap::new(1, 1, vec![0.0], f32::NAN), Err(Error::HeightMap(_))));
    }

    #[test]
    fn test_get_height_row_major() {
        let map = ramp();
        assert_eq!(map.get_height(0, 0), 0.0);
        assert_eq!(map.get_height(3, 0), 30.0);
        assert_eq!(map.get_height(1, 2), 12.0);
    }

    #[test]
    fn test_get_height_clamps() {
        let map = ramp();
        assert_eq!(map.get_height(-5, -5), 0.0);
        assert_eq!(map.get_height(99, 99), 32.0);
    }

    #[test]
    fn test_height_fraction() {
        let map = HeightMap::new(2, 1, vec![0.0, 127.5], 255.0).unwrap();
        assert_eq!(map.height_fraction(0, 0), 0.0);
        assert_eq!(map.height_fraction(1, 0), 0.5);
    }

    #[test]
    fn test_height_source_nearest_lookup() {
        let map = HeightMap::new(2, 1, vec![0.0, 255.0], 255.0)
            .unwrap()
            .with_cell_size(10.0)
            .with_vertical_scale(64.0)
            .with_moisture(0.3);
        assert_eq!(map.height_at(4.9, 0.0), 0.0);
        assert_eq!(map.height_at(5.1, 0.0), 64.0);
        assert_eq!(map.height_at(1e6, 1e6), 64.0);
        assert_eq!(map.height_at(f64::NAN, 0.0), 0.0);
        assert_eq!(map.moisture_at(1.0, 2.0), 0.3);
    }
}
