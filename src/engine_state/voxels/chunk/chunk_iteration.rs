//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid cells of a [`BlockGrid`].
//!
//! Cells are visited with x as the outermost loop and z as the innermost, the
//! same order the mesh builder emits faces in. Air cells are skipped.

use cgmath::Point3;

use crate::engine_state::voxels::block::{self, BlockId};

use super::{BlockGrid, CHUNK_DIMENSION};

/// An iterator over all non-air blocks in a grid.
pub struct SolidBlockIterator<'a> {
    /// Reference to the grid being iterated over
    grid: &'a BlockGrid,
    /// Current X position within the chunk
    local_x: usize,
    /// Current Y position within the chunk
    local_y: usize,
    /// Current Z position within the chunk
    local_z: usize,
}

impl<'a> SolidBlockIterator<'a> {
    /// Creates a new iterator positioned before the first cell.
    ///
    /// # Arguments
    /// * `grid` - The grid to iterate over
    pub fn new(grid: &'a BlockGrid) -> Self {
        Self {
            grid,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// Moves to the next cell. `local_x` reaches `CHUNK_DIMENSION` once the
    /// whole grid has been visited.
    fn advance(&mut self) {
        self.local_z += 1;
        if self.local_z == CHUNK_DIMENSION {
            self.local_z = 0;
            self.local_y += 1;
            if self.local_y == CHUNK_DIMENSION {
                self.local_y = 0;
                self.local_x += 1;
            }
        }
    }
}

impl Iterator for SolidBlockIterator<'_> {
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        while self.local_x < CHUNK_DIMENSION {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            let block = self
                .grid
                .get_block_at(position.x, position.y, position.z);
            self.advance();

            match block {
                Some(id) if block::is_solid(id) => return Some((position, id)),
                _ => continue,
            }
        }
        None
    }
}
