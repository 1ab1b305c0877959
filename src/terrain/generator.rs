//! Noise-based height and moisture fields

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

use super::HeightSource;

/// `sign(value) * |value|^exponent`.
///
/// Raising a negative base to a fractional power is NaN, so the magnitude is
/// raised and the sign put back.
pub fn signed_pow(value: f64, exponent: f64) -> f64 {
    if value < 0.0 {
        -(value.abs().powf(exponent))
    } else {
        value.powf(exponent)
    }
}

/// Parameters for one fractal noise layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    pub scale: f64,          // Horizontal scale (larger = smoother)
    pub octaves: u32,        // Detail levels
    pub persistence: f64,    // Amplitude falloff per octave
    pub exponentiation: f64, // Signed power applied to the sum
    pub lacunarity: f64,     // Frequency growth per octave
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            scale: 200.0,
            octaves: 6,
            persistence: 0.4,
            exponentiation: 2.0,
            lacunarity: 2.0,
        }
    }
}

/// Fractional Brownian motion over a 2D noise function.
///
/// Sums `octaves` samples at frequency `lacunarity^i` and amplitude
/// `persistence^i`, divides by the total amplitude and applies
/// [`signed_pow`]. The result lies in `[-1, 1]` when `noise` does.
pub fn fractional_brownian_motion<N>(noise: &N, x: f64, z: f64, params: &FbmParams) -> f64
where
    N: NoiseFn<f64, 2> + ?Sized,
{
    let xs = x / params.scale;
    let zs = z / params.scale;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut normalization = 0.0;
    let mut total = 0.0;
    for _ in 0..params.octaves {
        total += noise.get([xs * frequency, zs * frequency]) * amplitude;
        normalization += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }
    if normalization == 0.0 {
        return 0.0;
    }
    signed_pow(total / normalization, params.exponentiation)
}

/// Parameters controlling terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub seed: u32,
    pub elevation: FbmParams,
    pub moisture: FbmParams,
    pub height_scale: f64,  // Voxels per unit of elevation noise
    pub height_offset: f64, // Added after scaling
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            elevation: FbmParams::default(),
            moisture: FbmParams {
                scale: 512.0,
                octaves: 4,
                persistence: 0.5,
                exponentiation: 4.0,
                lacunarity: 2.0,
            },
            height_scale: 128.0,
            height_offset: 50.0,
        }
    }
}

/// Procedural height source built from two seeded noise generators.
///
/// Stateless after construction; share it read-only between chunks.
pub struct NoiseField {
    params: TerrainParams,
    elevation: Simplex,
    moisture: Simplex,
}

impl NoiseField {
    pub fn new(params: TerrainParams) -> Self {
        let elevation = Simplex::new(params.seed);
        let moisture = Simplex::new(params.seed.wrapping_add(1));
        Self { params, elevation, moisture }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Raw elevation fBm in `[-1, 1]`
    pub fn elevation_at(&self, x: f64, z: f64) -> f64 {
        fractional_brownian_motion(&self.elevation, x, z, &self.params.elevation)
    }
}

impl HeightSource for NoiseField {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        let e = self.elevation_at(x, z);
        ((e * self.params.height_scale).trunc() + self.params.height_offset).abs()
    }

    fn moisture_at(&self, x: f64, z: f64) -> f64 {
        fractional_brownian_motion(&self.moisture, x, z, &self.params.moisture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl NoiseFn<f64, 2> for Constant {
        fn get(&self, _point: [f64; 2]) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_signed_pow() {
        assert_eq!(signed_pow(0.5, 2.0), 0.25);
        assert_eq!(signed_pow(-0.5, 2.0), -0.25);
        assert_eq!(signed_pow(-0.25, 0.5), -0.5);
        assert_eq!(signed_pow(0.0, 4.0), 0.0);
        assert!(!signed_pow(-0.3, 1.7).is_nan());
    }

    #[test]
    fn test_fbm_normalizes_amplitude() {
        let params = FbmParams { exponentiation: 1.0, ..Default::default() };
        let v = fractional_brownian_motion(&Constant(0.5), 10.0, 20.0, &params);
        assert!((v - 0.5).abs() < 1e-12);

        let params = FbmParams { exponentiation: 2.0, ..Default::default() };
        let v = fractional_brownian_motion(&Constant(-0.5), 10.0, 20.0, &params);
        assert!((v + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fbm_zero_octaves() {
        let params = FbmParams { octaves: 0, ..Default::default() };
        assert_eq!(fractional_brownian_motion(&Constant(1.0), 0.0, 0.0, &params), 0.0);
    }

    #[test]
    fn test_fbm_range() {
        let noise = Simplex::new(7);
        let params = FbmParams::default();
        for i in 0..200 {
            let (x, z) = (i as f64 * 13.7 - 900.0, i as f64 * -7.3 + 40.0);
            let v = fractional_brownian_motion(&noise, x, z, &params);
            assert!(v.is_finite() && v.abs() <= 1.5, "{} at ({}, {})", v, x, z);
        }
    }

    #[test]
    fn test_terrain_params_default() {
        let params = TerrainParams::default();
        assert_eq!(params.elevation.scale, 200.0);
        assert_eq!(params.elevation.octaves, 6);
        assert_eq!(params.elevation.persistence, 0.4);
        assert_eq!(params.moisture.scale, 512.0);
        assert_eq!(params.moisture.exponentiation, 4.0);
        assert_eq!(params.height_offset, 50.0);
    }

    #[test]
    fn test_height_at_consistency() {
        let field = NoiseField::new(TerrainParams::default());
        let positions = [(0.0, 0.0), (50.0, 50.0), (100.0, 100.0), (-50.0, -50.0)];

        for (x, z) in positions {
            let h1 = field.height_at(x, z);
            let h2 = field.height_at(x, z);
            assert_eq!(h1, h2, "Height should be consistent at ({}, {})", x, z);
            assert!(h1 >= 0.0 && h1.is_finite());
            assert_eq!(h1, h1.floor());
        }
    }

    #[test]
    fn test_height_truncates_toward_zero() {
        let params = TerrainParams { seed: 7, height_offset: 0.0, ..Default::default() };
        let field = NoiseField::new(params);
        let mut negatives = 0;
        for i in 0..400 {
            let (x, z) = ((i % 20) as f64 * 37.0, (i / 20) as f64 * 41.0);
            let e = field.elevation_at(x, z);
            // Truncation is symmetric about zero: |trunc(v)| == floor(|v|)
            assert_eq!(field.height_at(x, z), (e * 128.0).abs().floor());
            if e < 0.0 {
                negatives += 1;
            }
        }
        assert!(negatives > 0);
    }

    #[test]
    fn test_different_seeds() {
        let a = NoiseField::new(TerrainParams { seed: 1, ..Default::default() });
        let b = NoiseField::new(TerrainParams { seed: 2, ..Default::default() });
        let differs = (0..32).any(|i| {
            let p = i as f64 * 37.0;
            a.elevation_at(p, p * 0.5) != b.elevation_at(p, p * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_moisture_range() {
        let field = NoiseField::new(TerrainParams::default());
        for i in 0..100 {
            let m = field.moisture_at(i as f64 * 31.0, i as f64 * 17.0);
            assert!(m.is_finite() && m.abs() <= 1.5);
        }
    }
}
