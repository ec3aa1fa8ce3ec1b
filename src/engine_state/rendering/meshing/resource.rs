//! GPU buffer lifecycle for a single chunk or seam mesh.
//!
//! A [`ChunkMeshResource`] owns one vertex buffer and one index buffer and
//! moves through an explicit set of states:
//!
//! ```text
//! Unallocated -> Initialized -> Populated <-> Bound
//!                                   |
//!                                   v
//!                               Released
//! ```
//!
//! Calling an operation in the wrong state returns
//! [`ResourceError::InvalidState`] and changes nothing. The buffers are
//! released when the resource is dropped, so every exit path frees them.
//!
//! The GPU side is reached through two traits. [`MeshBufferDevice`] creates,
//! writes and destroys buffers. [`MeshDrawTarget`] binds them and issues draws.

use crate::{
    engine_state::{
        rendering::Vertex,
        voxels::chunk::{Chunk, CHUNK_PLANE_SIZE, CHUNK_SIZE},
    },
    error::{BufferError, ResourceError},
};

use super::mesh::{Mesh, VERTICES_PER_FACE};

/// Worst-case vertex count of one chunk: six faces of six vertices for every cell.
pub const MAX_MESH_VERTICES: usize = 6 * VERTICES_PER_FACE * CHUNK_SIZE;

/// Worst-case vertex count of one seam: a face for every cell pair on the shared plane.
pub const MAX_SEAM_VERTICES: usize = VERTICES_PER_FACE * CHUNK_PLANE_SIZE;

/// Bytes allocated for a chunk's vertex buffer.
pub const VERTEX_BUFFER_SIZE: u64 = vertex_buffer_size(MAX_MESH_VERTICES);

/// Bytes allocated for a chunk's index buffer.
pub const INDEX_BUFFER_SIZE: u64 = index_buffer_size(MAX_MESH_VERTICES);

/// Bytes of vertex data for `max_vertices` vertices.
pub const fn vertex_buffer_size(max_vertices: usize) -> u64 {
    (max_vertices * std::mem::size_of::<Vertex>()) as u64
}

/// Bytes of index data for `max_vertices` vertices.
pub const fn index_buffer_size(max_vertices: usize) -> u64 {
    (max_vertices * std::mem::size_of::<u32>()) as u64
}

/// What a mesh buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshBufferUsage {
    /// Packed [`Vertex`] data
    Vertex,
    /// `u32` indices
    Index,
}

/// Creates, fills and frees named GPU buffers.
pub trait MeshBufferDevice {
    /// Allocates a zeroed buffer of `size` bytes under `name`.
    fn create_buffer(&mut self, name: &str, size: u64, usage: MeshBufferUsage);

    /// Copies `data` into the named buffer at `offset`.
    fn write_buffer(&mut self, name: &str, offset: u64, data: &[u8]) -> Result<(), BufferError>;

    /// Frees the named buffer. Unknown names are ignored.
    fn destroy_buffer(&mut self, name: &str);
}

/// Binds mesh buffers and issues indexed draws.
pub trait MeshDrawTarget {
    /// Binds the named buffer as vertex input.
    fn set_vertex_buffer(&mut self, name: &str) -> Result<(), BufferError>;

    /// Binds the named buffer as `u32` index input.
    fn set_index_buffer(&mut self, name: &str) -> Result<(), BufferError>;

    /// Draws `index_count` indices as a triangle list.
    fn draw_indexed(&mut self, index_count: u32);
}

/// Lifecycle state of a [`ChunkMeshResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// No GPU buffers exist yet
    Unallocated,
    /// Buffers are allocated but hold no mesh
    Initialized,
    /// Buffers hold a mesh
    Populated,
    /// Buffers are bound to a draw target
    Bound,
    /// Buffers have been destroyed
    Released,
}

/// The GPU vertex and index buffers of one chunk or seam mesh.
pub struct ChunkMeshResource<D: MeshBufferDevice> {
    device: D,
    vertex_buffer_name: String,
    index_buffer_name: String,
    max_vertices: usize,
    state: ResourceState,
    index_count: u32,
}

impl<D: MeshBufferDevice> ChunkMeshResource<D> {
    /// Creates an unallocated resource sized for a whole chunk.
    ///
    /// # Arguments
    /// * `device` - Where the buffers are created
    /// * `label` - Unique prefix for the buffer names
    pub fn new(device: D, label: &str) -> Self {
        Self::with_capacity(device, label, MAX_MESH_VERTICES)
    }

    /// Creates an unallocated resource holding at most `max_vertices` vertices.
    ///
    /// Seams use [`MAX_SEAM_VERTICES`].
    pub fn with_capacity(device: D, label: &str, max_vertices: usize) -> Self {
        Self {
            device,
            vertex_buffer_name: format!("{label} Vertex Buffer"),
            index_buffer_name: format!("{label} Index Buffer"),
            max_vertices,
            state: ResourceState::Unallocated,
            index_count: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ResourceState {
        self.state
    }

    /// Number of indices the next draw will issue.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Name of the vertex buffer on the device.
    pub fn vertex_buffer_name(&self) -> &str {
        &self.vertex_buffer_name
    }

    /// Name of the index buffer on the device.
    pub fn index_buffer_name(&self) -> &str {
        &self.index_buffer_name
    }

    /// Vertex capacity of the buffers.
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    fn invalid_state(&self, operation: &'static str) -> ResourceError {
        if self.state == ResourceState::Released {
            ResourceError::Released
        } else {
            ResourceError::InvalidState {
                operation,
                state: self.state,
            }
        }
    }

    /// Allocates both buffers at the resource's vertex capacity.
    ///
    /// Calling this again once the buffers exist does nothing.
    ///
    /// # Errors
    /// Returns [`ResourceError::Released`] after the resource has been released.
    pub fn initialize(&mut self) -> Result<(), ResourceError> {
        match self.state {
            ResourceState::Unallocated => {
                self.device.create_buffer(
                    &self.vertex_buffer_name,
                    vertex_buffer_size(self.max_vertices),
                    MeshBufferUsage::Vertex,
                );
                self.device.create_buffer(
                    &self.index_buffer_name,
                    index_buffer_size(self.max_vertices),
                    MeshBufferUsage::Index,
                );
                self.state = ResourceState::Initialized;
                Ok(())
            }
            ResourceState::Released => Err(ResourceError::Released),
            _ => {
                log::warn!(
                    "'{}' is already initialized, skipping",
                    self.vertex_buffer_name
                );
                Ok(())
            }
        }
    }

    /// Copies a mesh into the buffers and drops the CPU copy.
    ///
    /// An empty mesh is accepted and draws nothing.
    ///
    /// # Errors
    /// - [`ResourceError::InvalidState`] unless the resource is initialized or populated
    /// - [`ResourceError::Mesh`] if the mesh exceeds the allocated capacity
    pub fn upload(&mut self, mesh: Mesh) -> Result<(), ResourceError> {
        if !matches!(
            self.state,
            ResourceState::Initialized | ResourceState::Populated
        ) {
            return Err(self.invalid_state("upload"));
        }

        mesh.check_capacity(self.max_vertices)?;

        if !mesh.is_empty() {
            self.device.write_buffer(
                &self.vertex_buffer_name,
                0,
                bytemuck::cast_slice(mesh.vertices()),
            )?;
            self.device.write_buffer(
                &self.index_buffer_name,
                0,
                bytemuck::cast_slice(mesh.indices()),
            )?;
        }

        self.index_count = mesh.indices().len() as u32;
        self.state = ResourceState::Populated;
        log::debug!(
            "Uploaded {} vertices to '{}'",
            mesh.vertex_count(),
            self.vertex_buffer_name
        );
        Ok(())
    }

    /// Meshes a chunk and uploads the result.
    pub fn upload_chunk(&mut self, chunk: &Chunk) -> Result<(), ResourceError> {
        self.upload(chunk.build_mesh())
    }

    /// Binds both buffers to the draw target.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidState`] unless the resource is populated.
    pub fn bind<T: MeshDrawTarget>(&mut self, target: &mut T) -> Result<(), ResourceError> {
        if self.state != ResourceState::Populated {
            return Err(self.invalid_state("bind"));
        }

        target.set_vertex_buffer(&self.vertex_buffer_name)?;
        target.set_index_buffer(&self.index_buffer_name)?;
        self.state = ResourceState::Bound;
        Ok(())
    }

    /// Draws the uploaded mesh. Nothing is issued for an empty mesh.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidState`] unless the resource is bound.
    pub fn draw<T: MeshDrawTarget>(&self, target: &mut T) -> Result<(), ResourceError> {
        if self.state != ResourceState::Bound {
            return Err(self.invalid_state("draw"));
        }

        if self.index_count > 0 {
            target.draw_indexed(self.index_count);
        }
        Ok(())
    }

    /// Returns a bound resource to the populated state.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidState`] unless the resource is bound.
    pub fn unbind(&mut self) -> Result<(), ResourceError> {
        if self.state != ResourceState::Bound {
            return Err(self.invalid_state("unbind"));
        }

        self.state = ResourceState::Populated;
        Ok(())
    }

    /// Destroys both buffers. Safe to call more than once.
    pub fn release(&mut self) {
        match self.state {
            ResourceState::Released => {}
            ResourceState::Unallocated => self.state = ResourceState::Released,
            _ => {
                self.device.destroy_buffer(&self.vertex_buffer_name);
                self.device.destroy_buffer(&self.index_buffer_name);
                self.index_count = 0;
                self.state = ResourceState::Released;
                log::debug!("Released '{}'", self.vertex_buffer_name);
            }
        }
    }
}

impl<D: MeshBufferDevice> Drop for ChunkMeshResource<D> {
    fn drop(&mut self) {
        self.release();
    }
}
