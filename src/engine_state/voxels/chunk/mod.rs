//! # Chunk Module
//!
//! This module provides the [`BlockGrid`] storage for an 8x8x8 cube of blocks
//! and the [`Chunk`] that places one grid in the world.
//!
//! ## Storage
//!
//! A grid is a dense array of `CHUNK_SIZE` block ids. The cell at `(x, y, z)`
//! lives at index `x + y * CHUNK_DIMENSION + z * CHUNK_PLANE_SIZE`.
//!
//! Every accessor checks each coordinate against `0..CHUNK_DIMENSION`
//! separately, so an out-of-range coordinate is reported instead of silently
//! landing on another cell.

use cgmath::Point3;

use crate::{
    engine_state::rendering::meshing::{BoundaryFaces, Mesh},
    error::GridError,
};

use super::block::{self, block_side::BlockSide, BlockId, AIR};

pub mod chunk_iteration;

use chunk_iteration::SolidBlockIterator;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = 8;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Dense cube of block ids for a single chunk.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockGrid {
    blocks: [BlockId; CHUNK_SIZE],
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlockGrid {
    /// Creates a grid where every cell is air.
    pub fn empty() -> Self {
        Self::solid(AIR)
    }

    /// Creates a grid where every cell holds `block`.
    ///
    /// # Arguments
    /// * `block` - The material id written to every cell
    pub fn solid(block: BlockId) -> Self {
        Self {
            blocks: [block; CHUNK_SIZE],
        }
    }

    /// Creates a grid where each cell is independently solid with the given
    /// probability.
    ///
    /// # Arguments
    /// * `block` - Material id for the solid cells
    /// * `density` - Probability in `[0, 1]` that a cell is solid
    /// * `rng` - Random source, seeded by the caller for reproducible output
    pub fn random(block: BlockId, density: f64, rng: &mut fastrand::Rng) -> Self {
        let mut grid = Self::empty();
        for cell in grid.blocks.iter_mut() {
            if rng.f64() < density {
                *cell = block;
            }
        }
        grid
    }

    /// Creates a grid from a height field. Column `(x, y)` is solid for
    /// `z < height(x, y)` and air above.
    ///
    /// # Arguments
    /// * `block` - Material id for the solid cells
    /// * `height` - Height of each column; values above `CHUNK_DIMENSION` are clamped
    pub fn from_heights(block: BlockId, mut height: impl FnMut(usize, usize) -> usize) -> Self {
        let mut grid = Self::empty();
        for x in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                let column_height = height(x, y).min(CHUNK_DIMENSION);
                for z in 0..column_height {
                    grid.blocks[Self::linear_index(x, y, z)] = block;
                }
            }
        }
        grid
    }

    #[inline]
    fn linear_index(x: usize, y: usize, z: usize) -> usize {
        x + y * CHUNK_DIMENSION + z * CHUNK_PLANE_SIZE
    }

    /// Returns the linear storage index of a cell, or `None` if any coordinate
    /// is out of range.
    pub fn index_of(x: usize, y: usize, z: usize) -> Option<usize> {
        if x < CHUNK_DIMENSION && y < CHUNK_DIMENSION && z < CHUNK_DIMENSION {
            Some(Self::linear_index(x, y, z))
        } else {
            None
        }
    }

    /// Gets the block id at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `Some(id)` for an in-bounds cell, `None` otherwise.
    pub fn get_block_at(&self, x: usize, y: usize, z: usize) -> Option<BlockId> {
        Self::index_of(x, y, z).map(|index| self.blocks[index])
    }

    /// Sets the block id at the specified chunk-relative coordinates.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] if any coordinate is outside the chunk.
    pub fn set_block_at(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        block: BlockId,
    ) -> Result<(), GridError> {
        let index = Self::index_of(x, y, z).ok_or(GridError::OutOfBounds { x, y, z })?;
        self.blocks[index] = block;
        Ok(())
    }

    /// Checks if the block at the specified coordinates is solid.
    ///
    /// # Returns
    /// `true` if the block is solid, `false` if it's air or out of bounds.
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.get_block_at(x, y, z).is_some_and(block::is_solid)
    }

    /// Looks up the cell next to `(x, y, z)` in the direction of `side`.
    ///
    /// # Returns
    /// `Some(id)` if the neighbour is inside this grid, `None` if it lies past
    /// the chunk boundary.
    pub fn neighbor(&self, x: usize, y: usize, z: usize, side: BlockSide) -> Option<BlockId> {
        let step = side.normal();
        let nx = x.checked_add_signed(step.x as isize)?;
        let ny = y.checked_add_signed(step.y as isize)?;
        let nz = z.checked_add_signed(step.z as isize)?;
        self.get_block_at(nx, ny, nz)
    }

    /// Overwrites every cell with `block`.
    pub fn fill(&mut self, block: BlockId) {
        self.blocks.fill(block);
    }

    /// Clears every cell to air.
    pub fn fill_air(&mut self) {
        self.fill(AIR);
    }

    /// Number of solid cells in the grid.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| block::is_solid(**b)).count()
    }

    /// The raw block ids in linear storage order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Iterates over every solid cell, x outermost and z innermost.
    pub fn solid_blocks(&self) -> SolidBlockIterator<'_> {
        SolidBlockIterator::new(self)
    }
}

/// A chunk of the world: one block grid placed at a lattice position.
///
/// A chunk spans one world unit along each axis, so a single block has side
/// `1 / CHUNK_DIMENSION`.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Position of this chunk on the world lattice, in chunk units.
    pub position: Point3<i32>,
    /// World-space position of the chunk's minimum corner.
    pub origin: Point3<f32>,
    /// The block data for this chunk.
    pub blocks: BlockGrid,
    /// How faces on each outer layer of the grid are treated.
    pub boundary: BoundaryFaces,
}

impl Chunk {
    /// Creates a chunk with every boundary face hidden.
    ///
    /// # Arguments
    /// * `position` - Lattice position of the chunk
    /// * `origin` - World-space minimum corner
    /// * `blocks` - The block data
    pub fn new(position: Point3<i32>, origin: Point3<f32>, blocks: BlockGrid) -> Self {
        Self {
            position,
            origin,
            blocks,
            boundary: BoundaryFaces::HIDDEN,
        }
    }

    /// Replaces the boundary face policy.
    pub fn with_boundary(mut self, boundary: BoundaryFaces) -> Self {
        self.boundary = boundary;
        self
    }

    /// Builds the visible-face mesh of this chunk.
    pub fn build_mesh(&self) -> Mesh {
        Mesh::build(&self.blocks, self.origin, &self.boundary)
    }
}
