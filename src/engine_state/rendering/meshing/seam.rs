//! Seam meshing between adjacent chunks.
//!
//! Chunk meshes hide or show their boundary faces without looking at the
//! neighbouring chunk. The seam mesh fills that gap. For each pair of cells
//! facing each other across the shared boundary, exactly one face is emitted
//! when one cell is solid and the other is air. No face is emitted when both
//! are solid or both are air.

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, CHUNK_DIMENSION},
};

use super::mesh::{Face, Mesh};

/// Maps `(u, v)` on a boundary layer to cell coordinates.
///
/// # Arguments
/// * `axis` - Axis perpendicular to the layer (0 = x, 1 = y, 2 = z)
/// * `layer` - Index of the layer along that axis
/// * `u`, `v` - Coordinates along the two remaining axes, in x, y, z order
fn layer_cell(axis: usize, layer: usize, u: usize, v: usize) -> (usize, usize, usize) {
    match axis {
        0 => (layer, u, v),
        1 => (u, layer, v),
        _ => (u, v, layer),
    }
}

/// Builds the seam mesh between `chunk` and `neighbor`.
///
/// # Arguments
/// * `chunk` - The first chunk
/// * `neighbor` - The chunk adjacent to `chunk` in the direction of `side`
/// * `side` - Side of `chunk` that faces `neighbor`
///
/// # Returns
/// A mesh with one face for every facing pair where exactly one cell is solid.
/// The face belongs to the solid cell and points toward the air cell. Each face
/// is placed with its own chunk's world origin.
pub fn mesh_seam(chunk: &Chunk, neighbor: &Chunk, side: BlockSide) -> Mesh {
    let axis = side.axis();
    let last = CHUNK_DIMENSION - 1;
    let (chunk_layer, neighbor_layer) = if side.is_positive() {
        (last, 0)
    } else {
        (0, last)
    };

    let mut mesh = Mesh::new();
    for u in 0..CHUNK_DIMENSION {
        for v in 0..CHUNK_DIMENSION {
            let (x, y, z) = layer_cell(axis, chunk_layer, u, v);
            let (nx, ny, nz) = layer_cell(axis, neighbor_layer, u, v);

            let chunk_solid = chunk.blocks.is_block_solid(x, y, z);
            let neighbor_solid = neighbor.blocks.is_block_solid(nx, ny, nz);

            match (chunk_solid, neighbor_solid) {
                (true, false) => mesh.push_face(&Face::new(x, y, z, side), chunk.origin),
                (false, true) => mesh.push_face(
                    &Face::new(nx, ny, nz, side.opposite()),
                    neighbor.origin,
                ),
                _ => {}
            }
        }
    }

    log::debug!(
        "Meshed seam {:?} -> {:?} ({:?}): {} faces",
        chunk.position,
        neighbor.position,
        side,
        mesh.face_count()
    );
    mesh
}
