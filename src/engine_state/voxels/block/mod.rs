//! # Block Module
//!
//! Block identifiers and block face handling for the voxel engine.
//!
//! A block is stored as a bare material id. Id `0` is air and every other
//! value is a solid material; the meshing code only distinguishes the two.

pub mod block_side;

/// The integer type used to store a block's material id.
pub type BlockId = u16;

/// Material id of an empty cell.
pub const AIR: BlockId = 0;

/// Default solid material used by terrain generation.
pub const STONE: BlockId = 1;

/// Returns `true` if the given id is a solid material.
///
/// # Arguments
/// * `block` - The material id to test
#[inline]
pub fn is_solid(block: BlockId) -> bool {
    block != AIR
}
