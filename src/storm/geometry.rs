//! Storm domain: partitioning the map grid into square blocks.

use bevy::math::{DVec2, UVec2};

use crate::core::GeneratorError;

/// Square map of `map_size` cells per side, cut into `block_size` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGrid {
    map_size: u32,
    block_size: u32,
}

impl MapGrid {
    pub fn new(map_size: u32, block_size: u32) -> Result<Self, GeneratorError> {
        if map_size == 0 {
            return Err(GeneratorError::invalid_geometry(
                "map size must be a positive integer",
            ));
        }
        if block_size == 0 {
            return Err(GeneratorError::invalid_geometry(
                "block size must be a positive integer",
            ));
        }
        Ok(Self {
            map_size,
            block_size,
        })
    }

    pub fn map_size(&self) -> u32 {
        self.map_size
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Geometric center of the map.
    pub fn center(&self) -> DVec2 {
        DVec2::splat(self.map_size as f64 / 2.0)
    }

    /// Number of blocks along one axis, counting a truncated last block.
    pub fn blocks_per_side(&self) -> u32 {
        self.map_size.div_ceil(self.block_size)
    }
}

/// Axis-aligned rectangle of whole cells. `x0`/`y0` are the first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRect {
    pub x0: u32,
    pub y0: u32,
    pub width: u32,
    pub height: u32,
}

impl BlockRect {
    /// Last cell column (inclusive).
    pub fn x1(&self) -> u32 {
        self.x0 + self.width - 1
    }

    /// Last cell row (inclusive).
    pub fn y1(&self) -> u32 {
        self.y0 + self.height - 1
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, cell: UVec2) -> bool {
        (self.x0..=self.x1()).contains(&cell.x) && (self.y0..=self.y1()).contains(&cell.y)
    }

    /// Every cell of the block, column by column.
    pub fn cells(&self) -> impl Iterator<Item = UVec2> + '_ {
        (self.x0..=self.x1())
            .flat_map(move |x| (self.y0..=self.y1()).map(move |y| UVec2::new(x, y)))
    }

    /// Midpoint of the cell extent, in cell-index space.
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            self.x0 as f64 + (self.width - 1) as f64 / 2.0,
            self.y0 as f64 + (self.height - 1) as f64 / 2.0,
        )
    }

    /// Unique name fragment for triggers built from this block.
    pub fn key(&self) -> String {
        format!("{}_{}", self.x0, self.y0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub rect: BlockRect,
    pub center: DVec2,
    pub distance_from_center: f64,
}

/// Cut the grid into blocks, x-major: the outer loop walks columns and the
/// inner loop walks rows. Blocks on the far edge are truncated when
/// `block_size` does not divide `map_size`.
pub fn partition(grid: &MapGrid) -> Vec<Block> {
    let map_size = grid.map_size();
    let step = grid.block_size() as usize;
    let map_center = grid.center();
    let per_side = grid.blocks_per_side() as usize;

    let mut blocks = Vec::with_capacity(per_side * per_side);
    for x0 in (0..map_size).step_by(step) {
        for y0 in (0..map_size).step_by(step) {
            let rect = BlockRect {
                x0,
                y0,
                width: grid.block_size().min(map_size - x0),
                height: grid.block_size().min(map_size - y0),
            };
            let center = rect.center();
            blocks.push(Block {
                rect,
                center,
                distance_from_center: center.distance(map_center),
            });
        }
    }
    blocks
}
