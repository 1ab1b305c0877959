//! CPU-side geometry buffers handed to the renderer

use crate::core::types::Vec3;
use crate::voxel::face::Face;
use crate::voxel::material::Material;

/// One merged rectangle of voxel faces in chunk-local voxel coordinates.
///
/// `origin` is the voxel at the rectangle's minimum corner; the rectangle
/// spans `main_len` voxels along the face's main axis and `alt_len` along
/// its alt axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quad {
    pub face: Face,
    pub origin: [u32; 3],
    pub main_len: u32,
    pub alt_len: u32,
    pub material: Material,
}

impl Quad {
    /// Area in voxel faces
    pub fn area(&self) -> u64 {
        self.main_len as u64 * self.alt_len as u64
    }

    /// Corner lattice points in voxel units, ordered c0, c0+main, c0+main+alt, c0+alt
    pub fn corners(&self) -> [[u32; 3]; 4] {
        let axes = self.face.axes();
        let mut base = self.origin;
        if axes.positive {
            base[axes.tertiary] += 1;
        }
        let mut c1 = base;
        c1[axes.main] += self.main_len;
        let mut c2 = c1;
        c2[axes.alt] += self.alt_len;
        let mut c3 = base;
        c3[axes.alt] += self.alt_len;
        [base, c1, c2, c3]
    }
}

/// Positions, triangle indices and per-vertex colours
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
    pub colors: Vec<[f32; 4]>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all buffers, keeping their allocations
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.colors.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangle count
    pub fn face_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a quad scaled into world space.
    ///
    /// Lattice point `p` maps to `origin + p * (stride, 1, stride)`. Triangles
    /// are wound counter-clockwise seen from outside the solid.
    pub fn push_quad(&mut self, quad: &Quad, origin: Vec3, stride: f32, color: [f32; 4]) {
        let scale = Vec3::new(stride, 1.0, stride);
        let base = self.positions.len() as u32;
        for corner in quad.corners() {
            let lattice = Vec3::new(corner[0] as f32, corner[1] as f32, corner[2] as f32);
            self.positions.push((origin + lattice * scale).to_array());
            self.colors.push(color);
        }
        if quad.face.axes().flips_winding() {
            self.indices.push([base, base + 2, base + 1]);
            self.indices.push([base, base + 3, base + 2]);
        } else {
            self.indices.push([base, base + 1, base + 2]);
            self.indices.push([base, base + 2, base + 3]);
        }
    }

    /// Append another buffer set, rebasing its indices
    pub fn extend_from(&mut self, other: &MeshBuffers) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
        self.indices
            .extend(other.indices.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));
    }

    /// Raw bytes of the position buffer for upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the index buffer for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Raw bytes of the colour buffer for upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Geometric normal of triangle `i` (unnormalized)
    pub fn triangle_normal(&self, i: usize) -> Vec3 {
        let [a, b, c] = self.indices[i].map(|v| Vec3::from_array(self.positions[v as usize]));
        (b - a).cross(c - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad(face: Face) -> Quad {
        Quad { face, origin: [2, 3, 4], main_len: 1, alt_len: 1, material: Material::Stone }
    }

    #[test]
    fn test_quad_area_and_corners() {
        let quad = Quad { face: Face::Top, origin: [0, 9, 0], main_len: 16, alt_len: 4, material: Material::Sand };
        assert_eq!(quad.area(), 64);
        // Top: main = z, alt = x, plane at y = 10
        assert_eq!(quad.corners(), [[0, 10, 0], [0, 10, 16], [4, 10, 16], [4, 10, 0]]);
    }

    #[test]
    fn test_push_quad_winding_faces_outward() {
        for face in Face::ALL {
            let mut buffers = MeshBuffers::new();
            buffers.push_quad(&unit_quad(face), Vec3::ZERO, 1.0, [1.0; 4]);
            assert_eq!(buffers.vertex_count(), 4);
            assert_eq!(buffers.face_count(), 2);

            let n = face.normal();
            let outward = Vec3::new(n[0] as f32, n[1] as f32, n[2] as f32);
            for i in 0..2 {
                assert!(buffers.triangle_normal(i).dot(outward) > 0.0, "{:?} triangle {}", face, i);
            }
        }
    }

    #[test]
    fn test_push_quad_applies_stride_and_origin() {
        let mut buffers = MeshBuffers::new();
        let quad = Quad { face: Face::Top, origin: [1, 0, 1], main_len: 1, alt_len: 1, material: Material::Grass };
        buffers.push_quad(&quad, Vec3::new(100.0, 0.0, 200.0), 4.0, [1.0; 4]);
        assert_eq!(buffers.positions[0], [104.0, 1.0, 204.0]);
        assert_eq!(buffers.positions[2], [108.0, 1.0, 208.0]);
    }

    #[test]
    fn test_extend_from_rebases_indices() {
        let mut a = MeshBuffers::new();
        a.push_quad(&unit_quad(Face::Top), Vec3::ZERO, 1.0, [1.0; 4]);
        let mut b = MeshBuffers::new();
        b.push_quad(&unit_quad(Face::Left), Vec3::ZERO, 1.0, [0.5; 4]);

        a.extend_from(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.face_count(), 4);
        assert!(a.indices[2..].iter().flatten().all(|&i| (4..8).contains(&i)));
        assert_eq!(a.colors.len(), a.positions.len());
    }

    #[test]
    fn test_byte_views() {
        let mut buffers = MeshBuffers::new();
        buffers.push_quad(&unit_quad(Face::Front), Vec3::ZERO, 1.0, [1.0; 4]);
        assert_eq!(buffers.position_bytes().len(), 4 * 12);
        assert_eq!(buffers.index_bytes().len(), 2 * 12);
        assert_eq!(buffers.color_bytes().len(), 4 * 16);

        buffers.clear();
        assert!(buffers.is_empty());
        assert_eq!(buffers.face_count(), 0);
    }
}
