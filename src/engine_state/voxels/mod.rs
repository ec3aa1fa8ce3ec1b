//! # Voxel Engine Core
//!
//! This module contains the voxel data of the renderer: block ids, the fixed
//! size chunk grid, terrain generators and the world lattice.
//!
//! ## Architecture
//!
//! * **Block**: Block ids and the six face directions
//! * **Chunk**: An `8 x 8 x 8` block grid placed in the world
//! * **Terrain**: Generators that fill a chunk's grid
//! * **World**: The square lattice of chunks and their adjacency
//!
//! ## Data Flow
//!
//! 1. The world asks the configured terrain generator for each chunk
//! 2. Each chunk is meshed on its own, and each adjacent pair gets a seam mesh
//! 3. The meshes are uploaded once and drawn every frame

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
