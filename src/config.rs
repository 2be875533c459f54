use error_chain::bail;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use tracing::debug;

use crate::errors::*;
use crate::grid::Grid;
use crate::heuristics::Heuristic;
use crate::units::{CellSize, ColumnsCount, Height, RowsCount, Width};

/// Settings for building a maze: an overall extent split into square cells, the A* heuristic
/// and an optional seed for reproducible mazes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeConfig {
    pub width: Width,
    pub height: Height,
    pub cell_size: CellSize,
    pub heuristic: Heuristic,
    /// None seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            width: Width(800),
            height: Height(400),
            cell_size: CellSize(40),
            heuristic: Heuristic::default(),
            seed: None,
        }
    }
}

impl MazeConfig {
    /// `height / cell_size`, rounded down.
    pub fn rows(&self) -> Result<RowsCount> {
        let (rows, _) = self.dimensions()?;
        Ok(rows)
    }

    /// `width / cell_size`, rounded down.
    pub fn columns(&self) -> Result<ColumnsCount> {
        let (_, columns) = self.dimensions()?;
        Ok(columns)
    }

    pub fn dimensions(&self) -> Result<(RowsCount, ColumnsCount)> {
        let CellSize(cell_size) = self.cell_size;
        if cell_size == 0 {
            bail!(ErrorKind::InvalidDimensions(0, 0));
        }
        let rows = self.height.0 / cell_size;
        let columns = self.width.0 / cell_size;
        if rows == 0 || columns == 0 {
            bail!(ErrorKind::InvalidDimensions(rows, columns));
        }
        Ok((RowsCount(rows), ColumnsCount(columns)))
    }

    /// A fully walled grid of the configured dimensions.
    pub fn grid(&self) -> Result<Grid> {
        let (rows, columns) = self.dimensions()?;
        debug!(rows = rows.0, columns = columns.0, "building grid");
        Grid::new(rows, columns)
    }

    pub fn rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        }
    }
}
