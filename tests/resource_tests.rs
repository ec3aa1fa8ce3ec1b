/// Integration tests for the chunk mesh resource lifecycle, driven through a
/// recording device instead of a GPU
use std::{cell::RefCell, rc::Rc};

use cgmath::Point3;
use voxelize::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(String, u64, MeshBufferUsage),
    Write(String, u64, usize),
    Destroy(String),
    SetVertex(String),
    SetIndex(String),
    Draw(u32),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Clone)]
struct RecordingDevice {
    calls: CallLog,
    fail_writes: bool,
}

impl MeshBufferDevice for RecordingDevice {
    fn create_buffer(&mut self, name: &str, size: u64, usage: MeshBufferUsage) {
        self.calls
            .borrow_mut()
            .push(Call::Create(name.to_string(), size, usage));
    }

    fn write_buffer(&mut self, name: &str, offset: u64, data: &[u8]) -> Result<(), BufferError> {
        if self.fail_writes {
            return Err(BufferError::Missing(name.to_string()));
        }
        self.calls
            .borrow_mut()
            .push(Call::Write(name.to_string(), offset, data.len()));
        Ok(())
    }

    fn destroy_buffer(&mut self, name: &str) {
        self.calls.borrow_mut().push(Call::Destroy(name.to_string()));
    }
}

struct RecordingTarget {
    calls: CallLog,
}

impl MeshDrawTarget for RecordingTarget {
    fn set_vertex_buffer(&mut self, name: &str) -> Result<(), BufferError> {
        self.calls.borrow_mut().push(Call::SetVertex(name.to_string()));
        Ok(())
    }

    fn set_index_buffer(&mut self, name: &str) -> Result<(), BufferError> {
        self.calls.borrow_mut().push(Call::SetIndex(name.to_string()));
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.calls.borrow_mut().push(Call::Draw(index_count));
    }
}

fn resource(label: &str) -> (ChunkMeshResource<RecordingDevice>, RecordingTarget, CallLog) {
    let calls = CallLog::default();
    let device = RecordingDevice {
        calls: calls.clone(),
        fail_writes: false,
    };
    let target = RecordingTarget {
        calls: calls.clone(),
    };
    (ChunkMeshResource::new(device, label), target, calls)
}

fn cube_mesh() -> Mesh {
    let mut grid = BlockGrid::empty();
    grid.set_block_at(0, 0, 0, STONE).unwrap();
    Mesh::build(&grid, Point3::new(0.0, 0.0, 0.0), &BoundaryFaces::VISIBLE)
}

#[test]
fn test_full_lifecycle_call_order() {
    let (mut resource, mut target, calls) = resource("Chunk 0");
    assert_eq!(resource.state(), ResourceState::Unallocated);

    resource.initialize().unwrap();
    assert_eq!(resource.state(), ResourceState::Initialized);

    resource.upload(cube_mesh()).unwrap();
    assert_eq!(resource.state(), ResourceState::Populated);
    assert_eq!(resource.index_count(), 36);

    resource.bind(&mut target).unwrap();
    assert_eq!(resource.state(), ResourceState::Bound);
    resource.draw(&mut target).unwrap();
    resource.unbind().unwrap();
    assert_eq!(resource.state(), ResourceState::Populated);

    resource.release();
    assert_eq!(resource.state(), ResourceState::Released);

    let vertex = "Chunk 0 Vertex Buffer".to_string();
    let index = "Chunk 0 Index Buffer".to_string();
    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Create(vertex.clone(), VERTEX_BUFFER_SIZE, MeshBufferUsage::Vertex),
            Call::Create(index.clone(), INDEX_BUFFER_SIZE, MeshBufferUsage::Index),
            Call::Write(vertex.clone(), 0, 36 * std::mem::size_of::<Vertex>()),
            Call::Write(index.clone(), 0, 36 * std::mem::size_of::<u32>()),
            Call::SetVertex(vertex.clone()),
            Call::SetIndex(index.clone()),
            Call::Draw(36),
            Call::Destroy(vertex),
            Call::Destroy(index),
        ]
    );
}

#[test]
fn test_buffers_are_sized_for_worst_case_chunk() {
    assert_eq!(MAX_MESH_VERTICES, 6 * 6 * CHUNK_SIZE);
    assert_eq!(VERTEX_BUFFER_SIZE, (MAX_MESH_VERTICES * 20) as u64);
    assert_eq!(INDEX_BUFFER_SIZE, (MAX_MESH_VERTICES * 4) as u64);
    assert_eq!(std::mem::size_of::<Vertex>(), 20);
}

#[test]
fn test_buffer_names_use_label() {
    let (resource, _, _) = resource("Seam 0-1");
    assert_eq!(resource.vertex_buffer_name(), "Seam 0-1 Vertex Buffer");
    assert_eq!(resource.index_buffer_name(), "Seam 0-1 Index Buffer");
}

#[test]
fn test_initialize_twice_allocates_once() {
    let (mut resource, _, calls) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.initialize().unwrap();
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_upload_before_initialize_is_rejected() {
    let (mut resource, _, calls) = resource("Chunk 0");
    assert_eq!(
        resource.upload(cube_mesh()),
        Err(ResourceError::InvalidState {
            operation: "upload",
            state: ResourceState::Unallocated
        })
    );
    assert_eq!(resource.state(), ResourceState::Unallocated);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_bind_and_draw_require_the_right_state() {
    let (mut resource, mut target, _) = resource("Chunk 0");
    resource.initialize().unwrap();

    assert_eq!(
        resource.bind(&mut target),
        Err(ResourceError::InvalidState {
            operation: "bind",
            state: ResourceState::Initialized
        })
    );

    resource.upload(cube_mesh()).unwrap();
    assert_eq!(
        resource.draw(&mut target),
        Err(ResourceError::InvalidState {
            operation: "draw",
            state: ResourceState::Populated
        })
    );
    assert_eq!(
        resource.unbind(),
        Err(ResourceError::InvalidState {
            operation: "unbind",
            state: ResourceState::Populated
        })
    );

    resource.bind(&mut target).unwrap();
    assert_eq!(
        resource.bind(&mut target),
        Err(ResourceError::InvalidState {
            operation: "bind",
            state: ResourceState::Bound
        }),
        "A bound resource must be unbound before binding again"
    );
}

#[test]
fn test_reupload_replaces_mesh() {
    let (mut resource, _, _) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.upload(cube_mesh()).unwrap();
    resource.upload(Mesh::new()).unwrap();
    assert_eq!(resource.index_count(), 0);
    assert_eq!(resource.state(), ResourceState::Populated);
}

#[test]
fn test_empty_mesh_draws_nothing() {
    let (mut resource, mut target, calls) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.upload(Mesh::new()).unwrap();
    resource.bind(&mut target).unwrap();
    resource.draw(&mut target).unwrap();

    let calls = calls.borrow();
    assert!(!calls.iter().any(|call| matches!(call, Call::Write(..))));
    assert!(!calls.iter().any(|call| matches!(call, Call::Draw(_))));
}

#[test]
fn test_oversized_mesh_is_rejected() {
    let (mut resource, _, _) = resource("Chunk 0");
    resource.initialize().unwrap();

    let mut mesh = Mesh::new();
    let face = Face::new(0, 0, 0, BlockSide::TOP);
    for _ in 0..(MAX_MESH_VERTICES / VERTICES_PER_FACE + 1) {
        mesh.push_face(&face, Point3::new(0.0, 0.0, 0.0));
    }

    assert_eq!(
        resource.upload(mesh),
        Err(ResourceError::Mesh(MeshError::CapacityExceeded {
            required: MAX_MESH_VERTICES + VERTICES_PER_FACE,
            capacity: MAX_MESH_VERTICES
        }))
    );
    assert_eq!(resource.state(), ResourceState::Initialized);
}

#[test]
fn test_write_failure_is_propagated() {
    let calls = CallLog::default();
    let device = RecordingDevice {
        calls: calls.clone(),
        fail_writes: true,
    };
    let mut resource = ChunkMeshResource::new(device, "Chunk 0");
    resource.initialize().unwrap();

    assert_eq!(
        resource.upload(cube_mesh()),
        Err(ResourceError::Buffer(BufferError::Missing(
            "Chunk 0 Vertex Buffer".to_string()
        )))
    );
    assert_eq!(resource.state(), ResourceState::Initialized);
}

#[test]
fn test_release_is_idempotent() {
    let (mut resource, _, calls) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.release();
    resource.release();

    let destroyed = calls
        .borrow()
        .iter()
        .filter(|call| matches!(call, Call::Destroy(_)))
        .count();
    assert_eq!(destroyed, 2, "Each buffer is destroyed exactly once");
}

#[test]
fn test_released_resource_rejects_operations() {
    let (mut resource, mut target, _) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.upload(cube_mesh()).unwrap();
    resource.release();

    assert_eq!(resource.initialize(), Err(ResourceError::Released));
    assert_eq!(resource.upload(cube_mesh()), Err(ResourceError::Released));
    assert_eq!(resource.bind(&mut target), Err(ResourceError::Released));
    assert_eq!(resource.draw(&mut target), Err(ResourceError::Released));
    assert_eq!(resource.unbind(), Err(ResourceError::Released));
    assert_eq!(resource.index_count(), 0);
}

#[test]
fn test_release_while_bound() {
    let (mut resource, mut target, calls) = resource("Chunk 0");
    resource.initialize().unwrap();
    resource.upload(cube_mesh()).unwrap();
    resource.bind(&mut target).unwrap();
    resource.release();

    assert_eq!(resource.state(), ResourceState::Released);
    assert_eq!(
        calls.borrow().last(),
        Some(&Call::Destroy("Chunk 0 Index Buffer".to_string()))
    );
}

#[test]
fn test_unallocated_release_destroys_nothing() {
    let (mut resource, _, calls) = resource("Chunk 0");
    resource.release();
    assert_eq!(resource.state(), ResourceState::Released);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_drop_releases_buffers() {
    let calls = {
        let (mut resource, _, calls) = resource("Chunk 0");
        resource.initialize().unwrap();
        resource.upload(cube_mesh()).unwrap();
        calls
    };

    let calls = calls.borrow();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[
            Call::Destroy("Chunk 0 Vertex Buffer".to_string()),
            Call::Destroy("Chunk 0 Index Buffer".to_string()),
        ]
    );
}

#[test]
fn test_upload_chunk_meshes_the_chunk() {
    let (mut resource, _, _) = resource("Chunk 0");
    let chunk = Chunk::new(
        Point3::new(0, 0, 0),
        Point3::new(0.0, 0.0, 0.0),
        BlockGrid::solid(STONE),
    )
    .with_boundary(BoundaryFaces::VISIBLE);

    resource.initialize().unwrap();
    resource.upload_chunk(&chunk).unwrap();
    assert_eq!(
        resource.index_count() as usize,
        6 * CHUNK_PLANE_SIZE * VERTICES_PER_FACE
    );
}

#[test]
fn test_seam_capacity_is_one_plane_of_faces() {
    assert_eq!(MAX_SEAM_VERTICES, CHUNK_PLANE_SIZE * VERTICES_PER_FACE);
    assert_eq!(
        vertex_buffer_size(MAX_SEAM_VERTICES) + index_buffer_size(MAX_SEAM_VERTICES),
        9216
    );

    let calls = CallLog::default();
    let device = RecordingDevice {
        calls: calls.clone(),
        fail_writes: false,
    };
    let mut seam = ChunkMeshResource::with_capacity(device, "Seam 0-1", MAX_SEAM_VERTICES);
    seam.initialize().unwrap();
    assert_eq!(seam.max_vertices(), MAX_SEAM_VERTICES);

    let mut mesh = Mesh::new();
    let face = Face::new(7, 0, 0, BlockSide::RIGHT);
    for _ in 0..CHUNK_PLANE_SIZE + 1 {
        mesh.push_face(&face, Point3::new(0.0, 0.0, 0.0));
    }
    assert_eq!(
        seam.upload(mesh),
        Err(ResourceError::Mesh(MeshError::CapacityExceeded {
            required: MAX_SEAM_VERTICES + VERTICES_PER_FACE,
            capacity: MAX_SEAM_VERTICES
        }))
    );
}

#[test]
fn test_world_upload_sizes_seams_for_one_plane() {
    let config = EngineConfig {
        world_width: 2,
        ..EngineConfig::default()
    };
    let world = World::generate(&config, &SineHeightField::default());
    let calls = CallLog::default();
    let device = RecordingDevice {
        calls: calls.clone(),
        fail_writes: false,
    };

    let resources = world.upload_meshes(&device).unwrap();

    // Four chunks and the two RIGHT seams. Sine chunks are identical, so the TOP seams are empty.
    assert_eq!(resources.len(), 6);
    for chunk in &resources[..4] {
        assert_eq!(chunk.max_vertices(), MAX_MESH_VERTICES);
        assert_eq!(chunk.state(), ResourceState::Populated);
    }
    for seam in &resources[4..] {
        assert!(seam.vertex_buffer_name().starts_with("Seam"));
        assert_eq!(seam.max_vertices(), MAX_SEAM_VERTICES);
        // Column 7 is 6 high and column 0 is 3 high: 3 faces in each of 8 rows
        assert_eq!(seam.index_count() as usize, 24 * VERTICES_PER_FACE);
    }

    let seam_sizes: Vec<u64> = calls
        .borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Create(name, size, _) if name.starts_with("Seam") => Some(*size),
            _ => None,
        })
        .collect();
    let vertex = vertex_buffer_size(MAX_SEAM_VERTICES);
    let index = index_buffer_size(MAX_SEAM_VERTICES);
    assert_eq!(seam_sizes, vec![vertex, index, vertex, index]);
}

#[test]
fn test_world_upload_without_seams_is_chunks_only() {
    let config = EngineConfig {
        world_width: 2,
        boundary_faces: BoundaryMode::Visible,
        ..EngineConfig::default()
    };
    let world = World::generate(&config, &SineHeightField::default());
    let device = RecordingDevice {
        calls: CallLog::default(),
        fail_writes: false,
    };

    let resources = world.upload_meshes(&device).unwrap();
    assert_eq!(resources.len(), 4);
    assert!(resources
        .iter()
        .all(|resource| resource.vertex_buffer_name().starts_with("Chunk")));
}
