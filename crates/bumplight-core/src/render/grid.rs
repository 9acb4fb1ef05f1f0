//! The uniform tile layer covering the screen.

use heapless::Vec;

use crate::config::{GRID_COLUMNS, GRID_ROWS, LAYER_SIZE, LAYER_Z, TILE_SIZE};
use crate::render::{Material, Tile};

/// Fixed-capacity collection of tiles drawn each frame.
#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    tiles: Vec<Tile, LAYER_SIZE>,
}

impl TileGrid {
    /// Empty grid; fill with [`TileGrid::push`].
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Full layer: `GRID_COLUMNS x GRID_ROWS` tiles of `TILE_SIZE`, row-major
    /// from the top-left corner, every tile sharing `material`.
    pub fn layer(material: &Material) -> Self {
        let mut grid = Self::new();
        let size = TILE_SIZE as f32;
        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                let tile = Tile::new(
                    column as f32 * size,
                    row as f32 * size,
                    LAYER_Z,
                    size,
                    size,
                    *material,
                );
                // Capacity is exactly GRID_COLUMNS * GRID_ROWS.
                let pushed = grid.tiles.push(tile);
                debug_assert!(pushed.is_ok());
            }
        }
        grid
    }

    /// Append a tile. Returns the tile back when the grid is full.
    pub fn push(&mut self, tile: Tile) -> Result<(), Tile> {
        self.tiles.push(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Replace the material of every tile.
    pub fn set_material(&mut self, material: &Material) {
        for tile in self.tiles.iter_mut() {
            tile.material = *material;
        }
    }
}
