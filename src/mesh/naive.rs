//! Per-voxel face culling without merging
//!
//! Emits one unit quad per exposed voxel face using point queries only.
//! Slow, but independent of the run cursors, so it doubles as an oracle
//! for the greedy mesher and as a material-coloured debug view.

use crate::voxel::column::ColumnStore;
use crate::voxel::face::Face;
use crate::voxel::iter::BoundaryPolicy;
use crate::voxel::material::Material;
use super::buffers::Quad;

fn neighbor(store: &ColumnStore, policy: BoundaryPolicy, pos: [i64; 3], face: Face) -> Material {
    let n = face.normal();
    store
        .get_voxel(pos[0] + n[0] as i64, pos[1] + n[1] as i64, pos[2] + n[2] as i64)
        .unwrap_or(policy.material())
}

/// Call `f` with a unit quad for every exposed face
pub fn for_each_face<F>(store: &ColumnStore, policy: BoundaryPolicy, mut f: F)
where
    F: FnMut(Quad),
{
    let dims = store.dims();
    let width = dims.width as i64;
    for x in 0..width {
        for z in 0..width {
            for y in 0..dims.height as i64 {
                let material = match store.get_voxel(x, y, z) {
                    Some(m) if m.is_solid() => m,
                    _ => continue,
                };
                for face in Face::ALL {
                    if neighbor(store, policy, [x, y, z], face).is_air() {
                        f(Quad {
                            face,
                            origin: [x as u32, y as u32, z as u32],
                            main_len: 1,
                            alt_len: 1,
                            material,
                        });
                    }
                }
            }
        }
    }
}

/// Exposed face count per direction, indexed by [`Face::index`]
pub fn exposed_face_area(store: &ColumnStore, policy: BoundaryPolicy) -> [u64; 6] {
    let mut area = [0u64; 6];
    for_each_face(store, policy, |quad| area[quad.face.index()] += 1);
    area
}
