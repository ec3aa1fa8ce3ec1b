//! Mesh generation for voxel rendering.
//!
//! This module turns block grids into GPU-friendly triangle lists. Each
//! visible face becomes one quad of two triangles; faces are not merged.
//!
//! # Architecture
//! - [`Mesh`]: Vertex and index lists for one chunk or seam
//! - [`Face`]: One quad on one side of a cell, with its corner table
//!
//! # Usage
//! ```no_run
//! use cgmath::Point3;
//! use voxelize::{BlockGrid, BoundaryFaces, Mesh};
//!
//! let grid = BlockGrid::solid(1);
//! let mesh = Mesh::build(&grid, Point3::new(0.0, 0.0, 0.0), &BoundaryFaces::VISIBLE);
//! assert_eq!(mesh.face_count(), 6 * 8 * 8);
//! ```

mod face;
mod mesh;

pub use face::{Face, BLOCK_SCALE, VERTICES_PER_FACE};
pub use mesh::*;
