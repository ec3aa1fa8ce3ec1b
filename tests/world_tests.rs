/// Integration tests for world assembly and chunk adjacency
use cgmath::Point3;
use voxelize::*;

fn world(width: usize, terrain: TerrainKind, boundary_faces: BoundaryMode, seams: bool) -> World {
    let config = EngineConfig {
        world_width: width,
        terrain,
        terrain_seed: 5,
        boundary_faces,
        seams,
        ..EngineConfig::default()
    };
    let generator = voxelize::engine_state::voxels::terrain::from_config(&config);
    World::generate(&config, generator.as_ref())
}

fn total_faces(world: &World) -> usize {
    let chunk_faces: usize = world
        .indices()
        .filter_map(|index| world.mesh_chunk(index))
        .map(|mesh| mesh.face_count())
        .sum();
    let seam_faces: usize = world
        .seam_pairs()
        .into_iter()
        .filter_map(|(a, _, side)| world.mesh_seam(a, side))
        .map(|mesh| mesh.face_count())
        .sum();
    chunk_faces + seam_faces
}

/// Counts exposed faces by treating the whole lattice as one grid.
fn exposed_faces(world: &World) -> usize {
    let extent = (world.width() * CHUNK_DIMENSION) as i64;
    let solid = |x: i64, y: i64, z: i64| {
        if x < 0 || y < 0 || z < 0 || x >= extent || y >= extent || z >= CHUNK_DIMENSION as i64 {
            return false;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        world
            .index_of(x / CHUNK_DIMENSION, y / CHUNK_DIMENSION)
            .and_then(|index| world.chunk(index))
            .is_some_and(|chunk| {
                chunk
                    .blocks
                    .is_block_solid(x % CHUNK_DIMENSION, y % CHUNK_DIMENSION, z)
            })
    };

    let mut count = 0;
    for x in 0..extent {
        for y in 0..extent {
            for z in 0..CHUNK_DIMENSION as i64 {
                if !solid(x, y, z) {
                    continue;
                }
                for side in BlockSide::all() {
                    let step = side.normal();
                    if !solid(x + step.x as i64, y + step.y as i64, z + step.z as i64) {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

/// Counts exposed faces of each chunk on its own, with everything outside it treated as air.
fn isolated_faces(world: &World) -> usize {
    world
        .chunks()
        .iter()
        .flat_map(|chunk| chunk.blocks.solid_blocks().map(move |(cell, _)| (chunk, cell)))
        .map(|(chunk, cell)| {
            BlockSide::all()
                .into_iter()
                .filter(|&side| {
                    chunk
                        .blocks
                        .neighbor(cell.x, cell.y, cell.z, side)
                        .map_or(true, |block| !is_solid(block))
                })
                .count()
        })
        .sum()
}

#[test]
fn test_world_has_width_squared_chunks() {
    let world = world(3, TerrainKind::Sine, BoundaryMode::Auto, true);
    assert_eq!(world.width(), 3);
    assert_eq!(world.len(), 9);
    assert!(!world.is_empty());
    assert_eq!(world.indices().count(), 9);
}

#[test]
fn test_chunk_origins_are_centred() {
    assert_eq!(World::chunk_origin(8, 0, 0), Point3::new(-4.0, -4.0, 0.0));
    assert_eq!(World::chunk_origin(8, 7, 7), Point3::new(3.0, 3.0, 0.0));
    assert_eq!(World::chunk_origin(8, 4, 2), Point3::new(0.0, -2.0, 0.0));

    let world = world(2, TerrainKind::Sine, BoundaryMode::Auto, true);
    let index = world.index_of(1, 0).unwrap();
    let chunk = world.chunk(index).unwrap();
    assert_eq!(chunk.position, Point3::new(1, 0, 0));
    assert_eq!(chunk.origin, Point3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_index_of_is_row_major() {
    let world = world(4, TerrainKind::Empty, BoundaryMode::Auto, true);
    assert_eq!(world.index_of(0, 0).map(ChunkIndex::get), Some(0));
    assert_eq!(world.index_of(3, 0).map(ChunkIndex::get), Some(3));
    assert_eq!(world.index_of(1, 2).map(ChunkIndex::get), Some(9));
    assert_eq!(world.index_of(4, 0), None);
}

#[test]
fn test_neighbours_follow_lattice() {
    let world = world(2, TerrainKind::Empty, BoundaryMode::Auto, true);
    let corner = world.index_of(0, 0).unwrap();

    assert_eq!(world.neighbour(corner, BlockSide::RIGHT), world.index_of(1, 0));
    assert_eq!(world.neighbour(corner, BlockSide::TOP), world.index_of(0, 1));
    assert_eq!(world.neighbour(corner, BlockSide::LEFT), None);
    assert_eq!(world.neighbour(corner, BlockSide::BOTTOM), None);
    assert_eq!(world.neighbour(corner, BlockSide::FRONT), None);
    assert_eq!(world.neighbour(corner, BlockSide::BACK), None);
}

#[test]
fn test_adjacent_pairs_cover_each_pair_once() {
    let world = world(3, TerrainKind::Empty, BoundaryMode::Auto, true);
    let pairs = world.adjacent_pairs();

    // 3 rows of 2 horizontal pairs and 3 columns of 2 vertical pairs
    assert_eq!(pairs.len(), 12);
    for (a, b, side) in &pairs {
        assert!(matches!(side, BlockSide::RIGHT | BlockSide::TOP));
        assert_eq!(world.neighbour(*a, *side), Some(*b));
    }
}

#[test]
fn test_single_chunk_world_has_no_pairs() {
    let world = world(1, TerrainKind::Solid, BoundaryMode::Auto, true);
    assert!(world.adjacent_pairs().is_empty());
    assert_eq!(
        world.chunk(world.index_of(0, 0).unwrap()).unwrap().boundary,
        BoundaryFaces::VISIBLE,
        "A lone chunk has no neighbours to hide faces behind"
    );
}

#[test]
fn test_auto_boundary_hides_only_shared_sides() {
    let world = world(2, TerrainKind::Sine, BoundaryMode::Auto, true);
    let boundary = world.chunk(world.index_of(0, 0).unwrap()).unwrap().boundary;

    assert_eq!(boundary.get(BlockSide::RIGHT), BoundaryPolicy::Hidden);
    assert_eq!(boundary.get(BlockSide::TOP), BoundaryPolicy::Hidden);
    assert_eq!(boundary.get(BlockSide::LEFT), BoundaryPolicy::Visible);
    assert_eq!(boundary.get(BlockSide::BOTTOM), BoundaryPolicy::Visible);
    assert_eq!(boundary.get(BlockSide::FRONT), BoundaryPolicy::Visible);
    assert_eq!(boundary.get(BlockSide::BACK), BoundaryPolicy::Visible);
}

#[test]
fn test_auto_boundary_without_seams_is_visible() {
    let world = world(2, TerrainKind::Sine, BoundaryMode::Auto, false);
    for chunk in world.chunks() {
        assert_eq!(chunk.boundary, BoundaryFaces::VISIBLE);
    }
}

#[test]
fn test_fixed_boundary_modes() {
    let hidden = world(2, TerrainKind::Sine, BoundaryMode::Hidden, true);
    assert!(hidden.chunks().iter().all(|c| c.boundary == BoundaryFaces::HIDDEN));

    let visible = world(2, TerrainKind::Sine, BoundaryMode::Visible, true);
    assert!(visible.chunks().iter().all(|c| c.boundary == BoundaryFaces::VISIBLE));
}

#[test]
fn test_seam_mesh_requires_neighbour() {
    let world = world(2, TerrainKind::Solid, BoundaryMode::Auto, true);
    let corner = world.index_of(1, 1).unwrap();
    assert!(world.mesh_seam(corner, BlockSide::RIGHT).is_none());
    assert!(world.mesh_seam(corner, BlockSide::FRONT).is_none());
    assert!(world.mesh_seam(corner, BlockSide::LEFT).is_some());
}

#[test]
fn test_solid_world_draws_outer_shell_once() {
    let world = world(2, TerrainKind::Solid, BoundaryMode::Auto, true);
    // 16 x 16 x 8 block: two 16x16 caps and four 16x8 walls
    assert_eq!(total_faces(&world), 2 * 256 + 4 * 128);
}

#[test]
fn test_chunks_and_seams_match_merged_grid() {
    let world = world(3, TerrainKind::Random, BoundaryMode::Auto, true);
    assert_eq!(
        total_faces(&world),
        exposed_faces(&world),
        "Chunk meshes plus seams should draw every exposed face exactly once"
    );
}

#[test]
fn test_sine_world_matches_merged_grid() {
    let world = world(2, TerrainKind::Sine, BoundaryMode::Auto, true);
    assert_eq!(total_faces(&world), exposed_faces(&world));
}

#[test]
fn test_generation_is_deterministic() {
    let a = world(2, TerrainKind::Perlin, BoundaryMode::Auto, true);
    let b = world(2, TerrainKind::Perlin, BoundaryMode::Auto, true);
    for (left, right) in a.chunks().iter().zip(b.chunks()) {
        assert_eq!(left.blocks, right.blocks);
    }
}

#[test]
fn test_auto_boundary_seams_every_pair() {
    let world = world(3, TerrainKind::Sine, BoundaryMode::Auto, true);
    assert_eq!(world.seam_pairs(), world.adjacent_pairs());
}

#[test]
fn test_visible_boundary_builds_no_seams() {
    let world = world(2, TerrainKind::Sine, BoundaryMode::Visible, true);
    assert!(
        world.seam_pairs().is_empty(),
        "Chunks that draw their own boundary faces must not also get seams"
    );
    assert_eq!(total_faces(&world), isolated_faces(&world));
}

#[test]
fn test_visible_random_world_draws_each_chunk_face_once() {
    let world = world(3, TerrainKind::Random, BoundaryMode::Visible, true);
    assert_eq!(total_faces(&world), isolated_faces(&world));
}

#[test]
fn test_hidden_boundary_without_seams_builds_none() {
    let unseamed = world(2, TerrainKind::Sine, BoundaryMode::Hidden, false);
    assert!(unseamed.seam_pairs().is_empty());

    let seamed = world(2, TerrainKind::Sine, BoundaryMode::Hidden, true);
    assert_eq!(seamed.seam_pairs().len(), 4);
}
