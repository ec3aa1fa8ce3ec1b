/// Integration tests for seam meshes between adjacent chunks
use cgmath::Point3;
use voxelize::*;

fn chunk_at(i: i32, j: i32, blocks: BlockGrid) -> Chunk {
    Chunk::new(
        Point3::new(i, j, 0),
        Point3::new(i as f32, j as f32, 0.0),
        blocks,
    )
}

#[test]
fn test_solid_against_air_emits_one_face_per_cell() {
    let solid = chunk_at(0, 0, BlockGrid::solid(STONE));
    let air = chunk_at(1, 0, BlockGrid::empty());

    let mesh = mesh_seam(&solid, &air, BlockSide::RIGHT);
    assert_eq!(mesh.face_count(), CHUNK_PLANE_SIZE);

    for vertex in mesh.vertices() {
        assert_eq!(vertex.position()[0], 1.0, "Seam faces lie on the shared plane");
    }
}

#[test]
fn test_air_against_solid_uses_neighbour_cells() {
    let air = chunk_at(0, 0, BlockGrid::empty());
    let solid = chunk_at(1, 0, BlockGrid::solid(STONE));

    let mesh = mesh_seam(&air, &solid, BlockSide::RIGHT);
    assert_eq!(mesh.face_count(), CHUNK_PLANE_SIZE);

    for vertex in mesh.vertices() {
        assert_eq!(
            vertex.position()[0],
            1.0,
            "The neighbour's left faces sit at its own origin"
        );
    }
}

#[test]
fn test_matching_cells_emit_nothing() {
    let solid_a = chunk_at(0, 0, BlockGrid::solid(STONE));
    let solid_b = chunk_at(1, 0, BlockGrid::solid(STONE));
    assert!(mesh_seam(&solid_a, &solid_b, BlockSide::RIGHT).is_empty());

    let air_a = chunk_at(0, 0, BlockGrid::empty());
    let air_b = chunk_at(1, 0, BlockGrid::empty());
    assert!(mesh_seam(&air_a, &air_b, BlockSide::RIGHT).is_empty());
}

#[test]
fn test_seam_only_reads_facing_layers() {
    let mut blocks = BlockGrid::empty();
    // Interior cell, not on the top layer
    blocks.set_block_at(3, 6, 3, STONE).unwrap();
    // Top layer cell
    blocks.set_block_at(2, 7, 5, STONE).unwrap();

    let lower = chunk_at(0, 0, blocks);
    let upper = chunk_at(0, 1, BlockGrid::empty());

    let mesh = mesh_seam(&lower, &upper, BlockSide::TOP);
    assert_eq!(mesh.face_count(), 1);
    for vertex in mesh.vertices() {
        assert_eq!(vertex.position()[1], 1.0);
    }
}

#[test]
fn test_seam_is_symmetric() {
    let mut blocks = BlockGrid::empty();
    blocks.set_block_at(7, 0, 0, STONE).unwrap();
    blocks.set_block_at(7, 4, 2, STONE).unwrap();
    let left = chunk_at(0, 0, blocks);

    let mut blocks = BlockGrid::empty();
    blocks.set_block_at(0, 4, 2, STONE).unwrap();
    blocks.set_block_at(0, 6, 6, STONE).unwrap();
    let right = chunk_at(1, 0, blocks);

    let forward = mesh_seam(&left, &right, BlockSide::RIGHT);
    let backward = mesh_seam(&right, &left, BlockSide::LEFT);

    assert_eq!(forward.face_count(), 2, "The solid pair at (y 4, z 2) emits nothing");
    assert_eq!(forward.face_count(), backward.face_count());
}

#[test]
fn test_seam_closes_gap_left_by_hidden_boundaries() {
    let mut blocks = BlockGrid::empty();
    blocks.set_block_at(7, 3, 3, STONE).unwrap();

    let chunk = chunk_at(0, 0, blocks).with_boundary(BoundaryFaces::HIDDEN);
    let neighbour = chunk_at(1, 0, BlockGrid::empty()).with_boundary(BoundaryFaces::HIDDEN);

    let chunk_faces = chunk.build_mesh().face_count();
    let seam_faces = mesh_seam(&chunk, &neighbour, BlockSide::RIGHT).face_count();

    assert_eq!(chunk_faces, 5, "The right face is left to the seam");
    assert_eq!(chunk_faces + seam_faces, 6);
}
