//! Level of Detail (LOD) for quadtree leaves
//!
//! A leaf's side length fixes its LOD: the smallest allowed leaf is LOD 1
//! and every doubling adds one level. Every chunk holds the same number of
//! columns, so a coarser LOD spreads them further apart (the skip factor).

/// Flat vertex tint per LOD tier (linear RGBA). Tiers past the end reuse the last.
pub const LOD_TINTS: [[f32; 4]; 6] = [
    [0.45, 1.0, 0.45, 1.0],  // LOD 1
    [0.4, 0.85, 0.5, 1.0],   // LOD 2
    [0.55, 0.75, 0.4, 1.0],  // LOD 3
    [0.7, 0.7, 0.45, 1.0],   // LOD 4
    [0.8, 0.75, 0.6, 1.0],   // LOD 5
    [0.85, 0.85, 0.85, 1.0], // LOD 6+
];

/// Highest LOD with its own tint
pub const MAX_TINTED_LOD: u32 = LOD_TINTS.len() as u32;

/// Calculate LOD level from a leaf's side length
///
/// # Arguments
/// * `size` - Side length of the leaf
/// * `min_size` - Minimum quadtree node size
///
/// # Returns
/// `log2(size) - log2(min_size) + 1`, never below 1
///
/// # Examples
/// ```
/// use voxterra::streaming::lod::lod_for_size;
///
/// assert_eq!(lod_for_size(16.0, 16.0), 1);
/// assert_eq!(lod_for_size(32.0, 16.0), 2);
/// assert_eq!(lod_for_size(256.0, 16.0), 5);
/// assert_eq!(lod_for_size(8.0, 16.0), 1); // Clamped
/// ```
pub fn lod_for_size(size: f32, min_size: f32) -> u32 {
    let levels = (size.log2() - min_size.log2()).round();
    if levels.is_finite() && levels > 0.0 {
        levels as u32 + 1
    } else {
        1
    }
}

/// Column skip factor for a given LOD level
///
/// Each LOD level doubles the distance between sampled columns.
///
/// # Examples
/// ```
/// use voxterra::streaming::lod::skip_factor;
///
/// assert_eq!(skip_factor(1), 1);
/// assert_eq!(skip_factor(2), 2);
/// assert_eq!(skip_factor(5), 16);
/// ```
pub fn skip_factor(lod: u32) -> u32 {
    1u32.checked_shl(lod.saturating_sub(1)).unwrap_or(u32::MAX)
}

/// World distance between columns at a given LOD level
///
/// # Arguments
/// * `base_stride` - Column spacing at LOD 1 (`min_size / chunk_columns`)
/// * `lod` - LOD level
///
/// # Examples
/// ```
/// use voxterra::streaming::lod::column_stride;
///
/// assert_eq!(column_stride(1.0, 1), 1.0);
/// assert_eq!(column_stride(1.0, 3), 4.0);
/// assert_eq!(column_stride(0.5, 2), 1.0);
/// ```
pub fn column_stride(base_stride: f32, lod: u32) -> f32 {
    base_stride * skip_factor(lod) as f32
}

/// Vertex tint for a LOD tier
pub fn lod_tint(lod: u32) -> [f32; 4] {
    let index = lod.clamp(1, MAX_TINTED_LOD) as usize - 1;
    LOD_TINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lod_for_size() {
        assert_eq!(lod_for_size(16.0, 16.0), 1);
        assert_eq!(lod_for_size(32.0, 16.0), 2);
        assert_eq!(lod_for_size(64.0, 16.0), 3);
        assert_eq!(lod_for_size(4096.0, 16.0), 9);
        assert_eq!(lod_for_size(1.0, 1.0), 1);
    }

    #[test]
    fn test_lod_boundary_conditions() {
        assert_eq!(lod_for_size(0.0, 16.0), 1);
        assert_eq!(lod_for_size(-4.0, 16.0), 1);
        assert_eq!(lod_for_size(f32::NAN, 16.0), 1);
        assert_eq!(lod_for_size(15.0, 16.0), 1);
    }

    #[test]
    fn test_lod_monotonicity() {
        let min = 16.0;
        let mut prev_lod = 0;
        let mut prev_skip = 0;
        for depth in 0..12 {
            let size = min * (1u32 << depth) as f32;
            let lod = lod_for_size(size, min);
            assert!(lod > prev_lod, "lod must grow with size");
            assert!(skip_factor(lod) >= prev_skip, "skip must not shrink with lod");
            prev_lod = lod;
            prev_skip = skip_factor(lod);
        }
    }

    #[test]
    fn test_skip_factor_powers_of_two() {
        for lod in 1..=16 {
            assert!(skip_factor(lod).is_power_of_two());
            assert_eq!(skip_factor(lod + 1), skip_factor(lod) * 2);
        }
        assert_eq!(skip_factor(0), 1);
        assert_eq!(skip_factor(40), u32::MAX);
    }

    #[test]
    fn test_stride_matches_leaf_size() {
        // 16 columns per chunk, 16-unit minimum leaves
        let base = 16.0 / 16.0;
        for depth in 0..8 {
            let size = 16.0 * (1u32 << depth) as f32;
            let lod = lod_for_size(size, 16.0);
            assert_eq!(column_stride(base, lod) * 16.0, size);
        }
    }

    #[test]
    fn test_lod_tint() {
        assert_eq!(lod_tint(1), LOD_TINTS[0]);
        assert_eq!(lod_tint(0), LOD_TINTS[0]);
        assert_eq!(lod_tint(3), LOD_TINTS[2]);
        assert_eq!(lod_tint(100), LOD_TINTS[5]);
        assert_ne!(lod_tint(1), lod_tint(2));
    }
}
