use cgmath::{EuclideanSpace, Point3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::{block::block_side::BlockSide, chunk::CHUNK_DIMENSION},
};

/// World-space side length of one block. A chunk spans one world unit.
pub const BLOCK_SCALE: f32 = 1.0 / CHUNK_DIMENSION as f32;

/// Vertices emitted per face: two triangles, with the shared corners repeated.
pub const VERTICES_PER_FACE: usize = 6;

/// Texture coordinates of the four logical corners: lower-left, lower-right,
/// upper-left, upper-right.
const CORNER_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Order the four corners are emitted in, forming two triangles.
const TRIANGLE_CORNERS: [usize; VERTICES_PER_FACE] = [0, 1, 2, 3, 1, 2];

/// Represents a single quad face of a voxel.
///
/// The four corners are lattice points in block units relative to the chunk.
/// A cell at `(i, j, k)` spans `i..i + 1` on x and likewise on y and z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<usize>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<usize>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<usize>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<usize>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the cell at `(i, j, k)`.
    pub fn new(i: usize, j: usize, k: usize, block_side: BlockSide) -> Self {
        match block_side {
            BlockSide::FRONT => Face {
                ll: Point3::new(i, j, k + 1),
                lr: Point3::new(i + 1, j, k + 1),
                ul: Point3::new(i, j + 1, k + 1),
                ur: Point3::new(i + 1, j + 1, k + 1),
                block_side,
            },

            BlockSide::BACK => Face {
                ll: Point3::new(i, j, k),
                lr: Point3::new(i + 1, j, k),
                ul: Point3::new(i, j + 1, k),
                ur: Point3::new(i + 1, j + 1, k),
                block_side,
            },

            BlockSide::BOTTOM => Face {
                ll: Point3::new(i, j, k + 1),
                lr: Point3::new(i + 1, j, k + 1),
                ul: Point3::new(i, j, k),
                ur: Point3::new(i + 1, j, k),
                block_side,
            },

            BlockSide::TOP => Face {
                ll: Point3::new(i, j + 1, k + 1),
                lr: Point3::new(i + 1, j + 1, k + 1),
                ul: Point3::new(i, j + 1, k),
                ur: Point3::new(i + 1, j + 1, k),
                block_side,
            },

            BlockSide::LEFT => Face {
                ll: Point3::new(i, j, k + 1),
                lr: Point3::new(i, j, k),
                ul: Point3::new(i, j + 1, k + 1),
                ur: Point3::new(i, j + 1, k),
                block_side,
            },

            BlockSide::RIGHT => Face {
                ll: Point3::new(i + 1, j, k + 1),
                lr: Point3::new(i + 1, j, k),
                ul: Point3::new(i + 1, j + 1, k + 1),
                ur: Point3::new(i + 1, j + 1, k),
                block_side,
            },
        }
    }

    /// The four corners in lower-left, lower-right, upper-left, upper-right order.
    pub fn corners(&self) -> [Point3<usize>; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }

    /// Generates the six vertices of this face.
    ///
    /// # Arguments
    /// * `origin` - World-space minimum corner of the chunk the face belongs to
    ///
    /// # Returns
    /// Two triangles: corners 0, 1, 2 and then 3, 1, 2.
    pub fn vertices(&self, origin: Point3<f32>) -> [Vertex; VERTICES_PER_FACE] {
        let corners = self.corners();
        TRIANGLE_CORNERS.map(|corner| {
            let lattice = corners[corner].map(|c| c as f32);
            let position = origin + lattice.to_vec() * BLOCK_SCALE;
            Vertex::new(position, CORNER_TEX_COORDS[corner])
        })
    }
}
