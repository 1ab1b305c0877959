//! Voxel material type

use serde::{Deserialize, Serialize};

/// Material stored in a voxel run.
///
/// `Air` is the only empty value; everything else is solid for meshing.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Air = 0,
    Stone = 1,
    Grass = 2,
    Dirt = 3,
    Water = 4,
    Sand = 5,
    Snow = 6,
    /// Solid voxel of unknown type (off-chunk boundary under an occluding policy)
    Unknown = 7,
}

impl Material {
    pub const ALL: [Material; 8] = [
        Material::Air,
        Material::Stone,
        Material::Grass,
        Material::Dirt,
        Material::Water,
        Material::Sand,
        Material::Snow,
        Material::Unknown,
    ];

    #[inline]
    pub fn is_air(self) -> bool {
        self == Material::Air
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Linear RGBA debug colour for this material
    pub fn color(self) -> [f32; 4] {
        match self {
            Material::Grass => [0.45, 1.0, 0.45, 1.0],
            Material::Water => [0.3, 0.3, 1.0, 1.0],
            Material::Dirt => [0.55, 0.15, 0.08, 1.0],
            Material::Stone => [0.8, 0.8, 0.8, 1.0],
            Material::Snow => [1.0, 1.0, 1.0, 1.0],
            Material::Sand => [0.9, 0.87, 0.65, 1.0],
            Material::Air | Material::Unknown => [0.0, 1.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_air_is_empty() {
        for material in Material::ALL {
            assert_eq!(material.is_air(), material == Material::Air);
            assert_eq!(material.is_solid(), material != Material::Air);
        }
    }

    #[test]
    fn test_default_is_air() {
        assert_eq!(Material::default(), Material::Air);
    }

    #[test]
    fn test_colors_are_opaque() {
        for material in Material::ALL {
            assert_eq!(material.color()[3], 1.0);
        }
        assert_ne!(Material::Sand.color(), Material::Snow.color());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Material::Snow).unwrap();
        assert_eq!(json, "\"snow\"");
        let parsed: Material = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(parsed, Material::Unknown);
    }
}
