//! Skirts along chunk edges
//!
//! Neighbouring chunks at different LOD sample the terrain at different
//! strides, so their edge heights disagree and leave cracks. A skirt is a
//! vertical quad on the chunk boundary covering each solid span of every
//! edge column, facing outward.

use crate::voxel::column::ColumnStore;
use crate::voxel::face::Face;
use crate::voxel::material::Material;
use super::buffers::Quad;

/// Call `f` with one quad per solid span of each boundary column.
///
/// Consecutive solid intervals of differing material form one span.
pub fn for_each_skirt_quad<F>(store: &ColumnStore, mut f: F)
where
    F: FnMut(Quad),
{
    let width = store.dims().width;
    if width == 0 {
        return;
    }
    let last = width - 1;
    for i in 0..=last {
        emit_column(store, Face::Left, [0, i], &mut f);
        emit_column(store, Face::Right, [last, i], &mut f);
        emit_column(store, Face::Back, [i, 0], &mut f);
        emit_column(store, Face::Front, [i, last], &mut f);
    }
}

fn emit_column<F>(store: &ColumnStore, face: Face, xz: [usize; 2], f: &mut F)
where
    F: FnMut(Quad),
{
    let run = store.column(xz[0], xz[1]);
    let mut y = 0u32;
    let mut span: Option<(u32, Material)> = None;
    for interval in run.intervals() {
        match (span, interval.material.is_solid()) {
            (None, true) => span = Some((y, interval.material)),
            (Some((start, material)), false) => {
                f(skirt_quad(face, xz, start, y, material));
                span = None;
            }
            _ => {}
        }
        y += interval.length;
    }
    if let Some((start, material)) = span {
        f(skirt_quad(face, xz, start, y, material));
    }
}

fn skirt_quad(face: Face, xz: [usize; 2], bottom: u32, top: u32, material: Material) -> Quad {
    // Side faces run main = y, alt = the horizontal edge axis.
    Quad {
        face,
        origin: [xz[0] as u32, bottom, xz[1] as u32],
        main_len: top - bottom,
        alt_len: 1,
        material,
    }
}
