//! # Buffer State Module
//!
//! This module provides a centralized registry for the GPU buffers used by the
//! renderer: the camera uniform and the vertex and index buffers of every chunk
//! and seam mesh.
//!
//! ## Key Features
//!
//! * Named buffers, created and destroyed by name
//! * Bounds-checked writes that report errors instead of panicking
//! * Memory analytics (allocated vs. written bytes per buffer)
//!
//! Chunk mesh resources reach the registry through the
//! [`MeshBufferDevice`] implementation on `StSystem<BufferState>`.

use std::collections::HashMap;

use wgpu::{util::DeviceExt, Buffer, Device, Queue};

use crate::{
    core::StSystem,
    engine_state::rendering::meshing::{MeshBufferDevice, MeshBufferUsage},
    error::BufferError,
};

/// Analytics data for a GPU buffer
///
/// Tracks memory allocation, usage, and write operations for a buffer.
#[derive(Debug)]
struct BufferAnalytics {
    /// Total memory allocated for the buffer in bytes
    pub allocated_memory: u64,
    /// Actual memory used in the buffer in bytes (based on writes)
    pub used_memory: u64,
    /// Number of times the buffer has been written to
    pub times_written: u64,
}

/// Central manager for GPU buffers.
///
/// # Examples
///
/// ```ignore
/// let mut buffer_state = BufferState::new(device, queue);
///
/// buffer_state.create_buffer(
///     "chunk 0 Vertex Buffer",
///     wgpu::BufferDescriptor {
///         label: Some("chunk 0 Vertex Buffer"),
///         size: 1024,
///         usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
///         mapped_at_creation: false,
///     },
/// );
///
/// buffer_state.write_buffer("chunk 0 Vertex Buffer", 0, bytemuck::cast_slice(&vertices))?;
/// ```
pub struct BufferState {
    /// Reference to the GPU device
    pub device: StSystem<Device>,
    /// Reference to the GPU command queue
    pub queue: StSystem<Queue>,
    /// Map of buffer names to buffer objects
    buffers: HashMap<String, Buffer>,
    /// Analytics data for each buffer
    buffer_analytics: HashMap<String, BufferAnalytics>,
}

impl BufferState {
    /// Creates a new buffer state manager
    ///
    /// # Arguments
    ///
    /// * `device` - Reference to the GPU device
    /// * `queue` - Reference to the GPU command queue
    pub fn new(device: StSystem<Device>, queue: StSystem<Queue>) -> Self {
        Self {
            device,
            queue,
            buffers: HashMap::new(),
            buffer_analytics: HashMap::new(),
        }
    }

    /// Creates an empty buffer with the specified descriptor.
    ///
    /// An existing buffer with the same name is destroyed first.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Unique name for the buffer
    /// * `buffer_descriptor` - Buffer configuration descriptor
    pub fn create_buffer(
        &mut self,
        buffer_name: impl Into<String>,
        buffer_descriptor: wgpu::BufferDescriptor,
    ) {
        let buffer_name = buffer_name.into();
        let buffer_analytics = BufferAnalytics {
            allocated_memory: buffer_descriptor.size,
            used_memory: 0,
            times_written: 0,
        };
        let buffer = self.device.get().create_buffer(&buffer_descriptor);

        self.insert(buffer_name, buffer, buffer_analytics);
    }

    /// Creates a buffer and initializes it with data.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Unique name for the buffer
    /// * `init_descriptor` - Buffer initialization descriptor with data
    pub fn create_buffer_init(
        &mut self,
        buffer_name: impl Into<String>,
        init_descriptor: wgpu::util::BufferInitDescriptor,
    ) {
        let buffer_analytics = BufferAnalytics {
            allocated_memory: init_descriptor.contents.len() as u64,
            used_memory: init_descriptor.contents.len() as u64,
            times_written: 1,
        };
        let buffer = self.device.get().create_buffer_init(&init_descriptor);

        self.insert(buffer_name.into(), buffer, buffer_analytics);
    }

    fn insert(&mut self, buffer_name: String, buffer: Buffer, analytics: BufferAnalytics) {
        if let Some(previous) = self.buffers.insert(buffer_name.clone(), buffer) {
            log::warn!("Replacing existing buffer '{}'", buffer_name);
            previous.destroy();
        }
        self.buffer_analytics.insert(buffer_name, analytics);
    }

    /// Writes raw byte data to a buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Name of the buffer to write to
    /// * `offset` - Byte offset in the buffer to start writing
    /// * `data` - Raw byte data to write
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer does not exist or if the write would
    /// exceed the buffer's size. Nothing is written in either case.
    pub fn write_buffer(
        &mut self,
        buffer_name: &str,
        offset: wgpu::BufferAddress,
        data: &[u8],
    ) -> Result<(), BufferError> {
        let buffer = self
            .buffers
            .get(buffer_name)
            .ok_or_else(|| BufferError::Missing(buffer_name.to_string()))?;
        let buffer_analytics = self
            .buffer_analytics
            .get_mut(buffer_name)
            .ok_or_else(|| BufferError::Missing(buffer_name.to_string()))?;

        let buffer_size = buffer_analytics.allocated_memory;
        let data_size = data.len() as u64;

        if offset + data_size > buffer_size {
            return Err(BufferError::OutOfBounds {
                name: buffer_name.to_string(),
                offset,
                len: data_size,
                size: buffer_size,
            });
        }

        self.queue.get().write_buffer(buffer, offset, data);
        buffer_analytics.used_memory = buffer_analytics.used_memory.max(offset + data_size);
        buffer_analytics.times_written += 1;
        Ok(())
    }

    /// Destroys a buffer and forgets its analytics.
    ///
    /// # Returns
    ///
    /// `true` if a buffer with that name existed
    pub fn destroy_buffer(&mut self, buffer_name: &str) -> bool {
        self.buffer_analytics.remove(buffer_name);
        match self.buffers.remove(buffer_name) {
            Some(buffer) => {
                buffer.destroy();
                true
            }
            None => false,
        }
    }

    /// Gets a reference to a buffer by name
    pub fn get_buffer(&self, buffer_name: &str) -> Option<&Buffer> {
        self.buffers.get(buffer_name)
    }

    /// Gets a binding resource for the entire buffer
    pub fn get_entire_binding(&self, buffer_name: &str) -> Option<wgpu::BindingResource<'_>> {
        self.buffers
            .get(buffer_name)
            .map(|buffer| buffer.as_entire_binding())
    }

    /// Number of live buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Gets the total allocated memory across all buffers
    ///
    /// # Returns
    ///
    /// Total allocated memory in bytes
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffer_analytics
            .iter()
            .fold(0, |acc, (_, buffer_analytics)| {
                acc + buffer_analytics.allocated_memory
            })
    }

    /// Gets the total used memory across all buffers
    ///
    /// # Returns
    ///
    /// Total used memory in bytes
    pub fn get_total_used_memory(&self) -> u64 {
        self.buffer_analytics
            .iter()
            .fold(0, |acc, (_, buffer_analytics)| {
                acc + buffer_analytics.used_memory
            })
    }

    /// Gets the total number of writes across all buffers
    pub fn get_total_writes(&self) -> u64 {
        self.buffer_analytics
            .values()
            .map(|buffer_analytics| buffer_analytics.times_written)
            .sum()
    }
}

impl MeshBufferDevice for StSystem<BufferState> {
    fn create_buffer(&mut self, name: &str, size: u64, usage: MeshBufferUsage) {
        let usage = match usage {
            MeshBufferUsage::Vertex => wgpu::BufferUsages::VERTEX,
            MeshBufferUsage::Index => wgpu::BufferUsages::INDEX,
        } | wgpu::BufferUsages::COPY_DST;

        self.get_mut().create_buffer(
            name,
            wgpu::BufferDescriptor {
                label: Some(name),
                size,
                usage,
                mapped_at_creation: false,
            },
        );
    }

    fn write_buffer(&mut self, name: &str, offset: u64, data: &[u8]) -> Result<(), BufferError> {
        self.get_mut().write_buffer(name, offset, data)
    }

    fn destroy_buffer(&mut self, name: &str) {
        self.get_mut().destroy_buffer(name);
    }
}
