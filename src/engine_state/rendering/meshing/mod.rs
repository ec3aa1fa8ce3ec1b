//! Mesh generation and GPU resource management for voxel rendering.
//!
//! This module turns chunk block data into triangle meshes and keeps those
//! meshes on the GPU for drawing.
//!
//! # Architecture
//! - `culling`: Decides which faces of a solid cell are visible
//! - `mesh/`: Face geometry and the per-chunk [`Mesh`] builder
//! - `seam`: Meshes the faces between two adjacent chunks
//! - `resource`: The [`ChunkMeshResource`] buffer lifecycle
//! - `renderer`: The render pipeline that draws every resource
//!
//! A chunk mesh only ever looks inside its own grid. Whether its boundary
//! faces are emitted is decided by [`BoundaryFaces`]; when they are hidden,
//! the seam meshes fill the gap between neighbouring chunks.

pub mod culling;

/// Face geometry and mesh assembly.
///
/// Every visible face becomes two triangles; faces are never merged.
pub mod mesh;
pub mod resource;
pub mod seam;

mod renderer;

pub use culling::{is_face_visible, visible_faces, BoundaryFaces, BoundaryPolicy};
pub use mesh::*;
pub use renderer::*;
pub use resource::*;
pub use seam::mesh_seam;
