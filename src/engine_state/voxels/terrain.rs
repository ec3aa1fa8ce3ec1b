//! # Terrain Generation
//!
//! Deterministic generators that turn a chunk's lattice position into a
//! [`BlockGrid`].
//!
//! Height-field generators pick one height per `(x, y)` column and fill every
//! cell below it. The height is clamped to `[0, CHUNK_DIMENSION]`, so all cells
//! at or above it are air.
//!
//! Supported generators:
//! - [`SineHeightField`]: a fixed sine wave over the local x index
//! - [`PerlinHeightField`]: 2D Perlin noise sampled in world space
//! - [`RandomFill`]: independent random cells, seeded per chunk
//! - [`UniformFill`]: every cell the same block (solid or empty)

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use crate::config::{EngineConfig, TerrainKind};

use super::{
    block::{BlockId, AIR, STONE},
    chunk::{BlockGrid, CHUNK_DIMENSION},
};

/// Produces the block data of a chunk from its lattice position.
///
/// Implementations must be deterministic: the same position always yields the
/// same grid.
pub trait TerrainGenerator {
    /// Generates the grid for the chunk at `position`.
    ///
    /// # Arguments
    /// * `position` - Lattice position of the chunk, in chunk units
    fn generate(&self, position: Point3<i32>) -> BlockGrid;
}

/// Sine-wave terrain that depends only on the local x index of a column.
///
/// Column `(i, j)` has height `floor(4 * sin(2π + i) + 4)`, which gives
/// `[3, 7, 7, 4, 0, 0, 2, 6]` across a chunk. Every chunk is identical.
#[derive(Debug, Clone, Copy)]
pub struct SineHeightField {
    /// Material used for the solid cells
    pub block: BlockId,
}

impl Default for SineHeightField {
    fn default() -> Self {
        Self { block: STONE }
    }
}

impl SineHeightField {
    /// Height of every column whose local x index is `i`.
    pub fn column_height(i: usize) -> usize {
        let value = 4.0 * (2.0 * std::f64::consts::PI + i as f64).sin() + 4.0;
        (value.floor().max(0.0) as usize).min(CHUNK_DIMENSION)
    }
}

impl TerrainGenerator for SineHeightField {
    fn generate(&self, _position: Point3<i32>) -> BlockGrid {
        BlockGrid::from_heights(self.block, |x, _| Self::column_height(x))
    }
}

/// Scaling factor applied to world block coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.09;

/// Rolling hills sampled from 2D Perlin noise at world-space column positions,
/// so neighbouring chunks line up.
#[derive(Debug, Clone)]
pub struct PerlinHeightField {
    perlin: Perlin,
    /// Material used for the solid cells
    pub block: BlockId,
}

impl PerlinHeightField {
    /// Creates a generator with a fixed noise seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            block: STONE,
        }
    }

    /// Height of the column at local `(x, y)` in the chunk at `position`.
    pub fn column_height(&self, position: Point3<i32>, x: usize, y: usize) -> usize {
        let dimension = CHUNK_DIMENSION as i64;
        let world_x = position.x as i64 * dimension + x as i64;
        let world_y = position.y as i64 * dimension + y as i64;
        let sample = self.perlin.get([
            world_x as f64 * PERLIN_SCALE_FACTOR,
            world_y as f64 * PERLIN_SCALE_FACTOR,
        ]);
        let normalized = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
        ((normalized * CHUNK_DIMENSION as f64).floor() as usize).min(CHUNK_DIMENSION)
    }
}

impl TerrainGenerator for PerlinHeightField {
    fn generate(&self, position: Point3<i32>) -> BlockGrid {
        BlockGrid::from_heights(self.block, |x, y| self.column_height(position, x, y))
    }
}

/// Noise-free random fill. Each chunk seeds its own generator from the world
/// seed and its position, so regeneration is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct RandomFill {
    /// World seed
    pub seed: u64,
    /// Probability that a cell is solid
    pub density: f64,
    /// Material used for the solid cells
    pub block: BlockId,
}

impl RandomFill {
    fn chunk_seed(&self, position: Point3<i32>) -> u64 {
        let mut seed = self.seed;
        for coordinate in [position.x, position.y, position.z] {
            seed = seed
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .wrapping_add(coordinate as u32 as u64);
        }
        seed
    }
}

impl TerrainGenerator for RandomFill {
    fn generate(&self, position: Point3<i32>) -> BlockGrid {
        let mut rng = fastrand::Rng::with_seed(self.chunk_seed(position));
        BlockGrid::random(self.block, self.density, &mut rng)
    }
}

/// Fills every cell with the same block.
#[derive(Debug, Clone, Copy)]
pub struct UniformFill {
    /// The block written to every cell; [`AIR`] gives an empty chunk
    pub block: BlockId,
}

impl TerrainGenerator for UniformFill {
    fn generate(&self, _position: Point3<i32>) -> BlockGrid {
        BlockGrid::solid(self.block)
    }
}

/// Builds the generator selected by the configuration.
///
/// # Arguments
/// * `config` - Engine configuration; reads `terrain`, `terrain_seed` and `random_density`
pub fn from_config(config: &EngineConfig) -> Box<dyn TerrainGenerator> {
    match config.terrain {
        TerrainKind::Sine => Box::new(SineHeightField::default()),
        TerrainKind::Perlin => Box::new(PerlinHeightField::new(config.terrain_seed)),
        TerrainKind::Random => Box::new(RandomFill {
            seed: config.terrain_seed as u64,
            density: config.random_density,
            block: STONE,
        }),
        TerrainKind::Solid => Box::new(UniformFill { block: STONE }),
        TerrainKind::Empty => Box::new(UniformFill { block: AIR }),
    }
}
