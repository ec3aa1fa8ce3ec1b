//! Face visibility culling.
//!
//! A face of a solid cell is drawn when the cell next to it is air. Faces on
//! the outer layer of a chunk have no neighbour inside the grid, so a
//! per-face [`BoundaryPolicy`] decides whether they are drawn.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, AIR},
    chunk::BlockGrid,
};

/// What to do with a face that lies on the chunk boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// The face is not drawn
    #[default]
    Hidden,
    /// The face is drawn
    Visible,
}

/// Boundary policy for each of the six faces of a chunk, indexed by [`BlockSide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryFaces([BoundaryPolicy; 6]);

impl Default for BoundaryFaces {
    fn default() -> Self {
        Self::HIDDEN
    }
}

impl BoundaryFaces {
    /// Every boundary face hidden.
    pub const HIDDEN: BoundaryFaces = BoundaryFaces([BoundaryPolicy::Hidden; 6]);
    /// Every boundary face drawn.
    pub const VISIBLE: BoundaryFaces = BoundaryFaces([BoundaryPolicy::Visible; 6]);

    /// Policy for the given face.
    pub fn get(&self, side: BlockSide) -> BoundaryPolicy {
        self.0[side as usize]
    }

    /// Sets the policy for one face.
    pub fn set(&mut self, side: BlockSide, policy: BoundaryPolicy) {
        self.0[side as usize] = policy;
    }

    /// Returns a copy with one face's policy replaced.
    pub fn with(mut self, side: BlockSide, policy: BoundaryPolicy) -> Self {
        self.set(side, policy);
        self
    }
}

/// Decides whether one face of the cell at `(x, y, z)` is visible.
///
/// Air cells, and coordinates outside the grid, have no visible faces.
///
/// # Arguments
/// * `grid` - The chunk's block data
/// * `x`, `y`, `z` - Cell coordinates within the chunk
/// * `side` - The face to test
/// * `boundary` - Policy for faces on the chunk boundary
pub fn is_face_visible(
    grid: &BlockGrid,
    x: usize,
    y: usize,
    z: usize,
    side: BlockSide,
    boundary: &BoundaryFaces,
) -> bool {
    if !grid.is_block_solid(x, y, z) {
        return false;
    }

    match grid.neighbor(x, y, z, side) {
        Some(neighbor) => neighbor == AIR,
        None => boundary.get(side) == BoundaryPolicy::Visible,
    }
}

/// Visibility of all six faces of one cell, in [`BlockSide`] order.
pub fn visible_faces(
    grid: &BlockGrid,
    x: usize,
    y: usize,
    z: usize,
    boundary: &BoundaryFaces,
) -> [bool; 6] {
    let mut visibility = [false; 6];
    for side in BlockSide::all() {
        visibility[side as usize] = is_face_visible(grid, x, y, z, side, boundary);
    }
    visibility
}
