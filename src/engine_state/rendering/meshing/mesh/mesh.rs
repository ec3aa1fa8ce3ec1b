//! Mesh data structures and operations for voxel rendering.
//!
//! This module converts a chunk's block grid into the vertex and index lists
//! uploaded to the GPU.

use cgmath::Point3;

use crate::{
    engine_state::{
        rendering::{meshing::culling::{self, BoundaryFaces}, Vertex},
        voxels::{block::block_side::BlockSide, chunk::BlockGrid},
    },
    error::MeshError,
};

use super::face::{Face, VERTICES_PER_FACE};

/// Triangle geometry for one chunk or seam.
///
/// Every face contributes six vertices, and the index list is the identity
/// sequence `0..vertex_count`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// The vertex data for this mesh
    vertices: Vec<Vertex>,
    /// The index data for this mesh
    indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mesh of every visible face in a grid.
    ///
    /// Cells are visited with x outermost and z innermost. For each solid
    /// cell, each face that passes the culler is emitted.
    ///
    /// # Arguments
    /// * `grid` - The block data to mesh
    /// * `origin` - World-space minimum corner of the chunk
    /// * `boundary` - Policy for faces on the chunk boundary
    pub fn build(grid: &BlockGrid, origin: Point3<f32>, boundary: &BoundaryFaces) -> Self {
        let mut mesh = Mesh::new();

        for (position, _) in grid.solid_blocks() {
            for side in BlockSide::all() {
                if culling::is_face_visible(
                    grid, position.x, position.y, position.z, side, boundary,
                ) {
                    mesh.push_face(&Face::new(position.x, position.y, position.z, side), origin);
                }
            }
        }

        log::debug!(
            "Meshed chunk at {:?}: {} faces",
            origin,
            mesh.face_count()
        );
        mesh
    }

    /// Appends one face's vertices and the matching indices.
    ///
    /// # Arguments
    /// * `face` - The face to add
    /// * `origin` - World-space minimum corner of the chunk the face belongs to
    pub fn push_face(&mut self, face: &Face, origin: Point3<f32>) {
        let first_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices(origin));
        self.indices
            .extend(first_index..first_index + VERTICES_PER_FACE as u32);
    }

    /// The vertex data.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The index data.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Number of `f32` values in the packed vertex data.
    pub fn float_count(&self) -> usize {
        self.vertices.len() * Vertex::FLOATS
    }

    /// Returns `true` if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex data as a flat run of floats, five per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Checks that the mesh fits a buffer sized for `max_vertices` vertices.
    ///
    /// # Errors
    /// Returns [`MeshError::CapacityExceeded`] if it does not.
    pub fn check_capacity(&self, max_vertices: usize) -> Result<(), MeshError> {
        if self.vertices.len() > max_vertices {
            return Err(MeshError::CapacityExceeded {
                required: self.vertices.len(),
                capacity: max_vertices,
            });
        }
        Ok(())
    }
}
