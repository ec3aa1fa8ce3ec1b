/// Integration tests for block grid storage and addressing
use voxelize::*;

#[test]
fn test_linear_index_layout() {
    assert_eq!(BlockGrid::index_of(0, 0, 0), Some(0));
    assert_eq!(BlockGrid::index_of(1, 0, 0), Some(1));
    assert_eq!(BlockGrid::index_of(0, 1, 0), Some(CHUNK_DIMENSION));
    assert_eq!(BlockGrid::index_of(0, 0, 1), Some(CHUNK_PLANE_SIZE));
    assert_eq!(
        BlockGrid::index_of(1, 2, 3),
        Some(1 + 2 * 8 + 3 * 64),
        "x varies fastest, then y, then z"
    );
    assert_eq!(BlockGrid::index_of(7, 7, 7), Some(CHUNK_SIZE - 1));
}

#[test]
fn test_each_coordinate_is_bounds_checked() {
    // (8, 0, 0) would alias (0, 1, 0) if only the linear index were checked
    assert_eq!(BlockGrid::index_of(8, 0, 0), None);
    assert_eq!(BlockGrid::index_of(0, 8, 0), None);
    assert_eq!(BlockGrid::index_of(0, 0, 8), None);

    let grid = BlockGrid::solid(STONE);
    assert_eq!(grid.get_block_at(8, 0, 0), None);
    assert!(!grid.is_block_solid(0, 8, 0), "Out of range cells are never solid");
}

#[test]
fn test_set_block_out_of_bounds_is_reported() {
    let mut grid = BlockGrid::empty();
    let result = grid.set_block_at(8, 0, 0, STONE);
    assert_eq!(result, Err(GridError::OutOfBounds { x: 8, y: 0, z: 0 }));
    assert_eq!(grid.solid_count(), 0, "A rejected write must not touch the grid");
}

#[test]
fn test_set_and_get_block() {
    let mut grid = BlockGrid::empty();
    grid.set_block_at(2, 5, 7, STONE).unwrap();

    assert_eq!(grid.get_block_at(2, 5, 7), Some(STONE));
    assert!(grid.is_block_solid(2, 5, 7));
    assert_eq!(grid.solid_count(), 1);
    assert_eq!(grid.blocks()[2 + 5 * 8 + 7 * 64], STONE);
}

#[test]
fn test_empty_and_solid_grids() {
    assert_eq!(BlockGrid::empty().solid_count(), 0);
    assert_eq!(BlockGrid::default(), BlockGrid::empty());
    assert_eq!(BlockGrid::solid(STONE).solid_count(), CHUNK_SIZE);
    assert!(!is_solid(AIR));
    assert!(is_solid(STONE));
}

#[test]
fn test_fill_and_clear() {
    let mut grid = BlockGrid::empty();
    grid.fill(STONE);
    assert_eq!(grid.solid_count(), CHUNK_SIZE);
    grid.fill_air();
    assert_eq!(grid.solid_count(), 0);
}

#[test]
fn test_from_heights_fills_below_height() {
    let grid = BlockGrid::from_heights(STONE, |x, _| x);

    for x in 0..CHUNK_DIMENSION {
        for y in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                assert_eq!(
                    grid.is_block_solid(x, y, z),
                    z < x,
                    "Cell ({x}, {y}, {z}) should be solid only below height {x}"
                );
            }
        }
    }
}

#[test]
fn test_from_heights_clamps_tall_columns() {
    let grid = BlockGrid::from_heights(STONE, |_, _| 100);
    assert_eq!(grid.solid_count(), CHUNK_SIZE);
}

#[test]
fn test_neighbor_lookup_stops_at_boundary() {
    let mut grid = BlockGrid::empty();
    grid.set_block_at(1, 0, 0, STONE).unwrap();

    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::RIGHT), Some(STONE));
    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::LEFT), None);
    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::BOTTOM), None);
    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::BACK), None);
    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::TOP), Some(AIR));
    assert_eq!(grid.neighbor(0, 0, 0, BlockSide::FRONT), Some(AIR));
    assert_eq!(grid.neighbor(7, 7, 7, BlockSide::RIGHT), None);
}

#[test]
fn test_solid_blocks_visits_x_outermost() {
    let mut grid = BlockGrid::empty();
    grid.set_block_at(1, 0, 0, STONE).unwrap();
    grid.set_block_at(0, 0, 5, STONE).unwrap();
    grid.set_block_at(0, 3, 1, STONE).unwrap();

    let visited: Vec<_> = grid
        .solid_blocks()
        .map(|(position, _)| (position.x, position.y, position.z))
        .collect();

    assert_eq!(visited, vec![(0, 0, 5), (0, 3, 1), (1, 0, 0)]);
}

#[test]
fn test_solid_blocks_skips_air() {
    assert_eq!(BlockGrid::empty().solid_blocks().count(), 0);
    assert_eq!(BlockGrid::solid(STONE).solid_blocks().count(), CHUNK_SIZE);
}

#[test]
fn test_block_side_geometry() {
    for side in BlockSide::all() {
        assert_eq!(side.opposite().opposite(), side);
        assert_eq!(side.normal(), -side.opposite().normal());
        assert_eq!(side.axis(), side.opposite().axis());
        assert_ne!(side.is_positive(), side.opposite().is_positive());
    }
    assert_eq!(BlockSide::FRONT as usize, 0);
    assert_eq!(BlockSide::RIGHT as usize, 5);
}

#[test]
fn test_every_cell_round_trips() {
    for value in [AIR, STONE, BlockId::MAX] {
        let mut grid = BlockGrid::solid(STONE);
        for x in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for z in 0..CHUNK_DIMENSION {
                    grid.set_block_at(x, y, z, value).unwrap();
                    assert_eq!(grid.get_block_at(x, y, z), Some(value), "({x}, {y}, {z})");
                }
            }
        }
        assert!(grid.blocks().iter().all(|&block| block == value));
    }
}

#[test]
fn test_cells_do_not_alias() {
    let mut grid = BlockGrid::empty();
    for (index, (x, y, z)) in cells().enumerate() {
        grid.set_block_at(x, y, z, BlockId::MAX - index as BlockId).unwrap();
    }
    for (index, (x, y, z)) in cells().enumerate() {
        assert_eq!(
            grid.get_block_at(x, y, z),
            Some(BlockId::MAX - index as BlockId),
            "Cell ({x}, {y}, {z}) was overwritten"
        );
    }
}

fn cells() -> impl Iterator<Item = (usize, usize, usize)> {
    (0..CHUNK_DIMENSION).flat_map(|z| {
        (0..CHUNK_DIMENSION).flat_map(move |y| (0..CHUNK_DIMENSION).map(move |x| (x, y, z)))
    })
}
