use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Grid;

/// Transport form of a [`Grid`]: dimensions, cell size and the linked coordinates of every
/// cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGrid {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: u16,
    pub cell_data: Vec<SerializedCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCell {
    pub row: usize,
    pub col: usize,
    /// `[row, col]` of every linked cell.
    pub links: Vec<[usize; 2]>,
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) links to ({link_row}, {link_col}), which is outside the {rows}x{cols} grid")]
    LinkOutOfBounds {
        row: usize,
        col: usize,
        link_row: usize,
        link_col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) links to ({link_row}, {link_col}), which is not adjacent")]
    LinkNotAdjacent {
        row: usize,
        col: usize,
        link_row: usize,
        link_col: usize,
    },
    #[error("a {rows}x{cols} grid exceeds the limit of {max} cells")]
    Dimensions {
        rows: usize,
        cols: usize,
        max: usize,
    },
    #[error("{cells} cell entries do not fit a {rows}x{cols} grid")]
    TooManyCells {
        cells: usize,
        rows: usize,
        cols: usize,
    },
    #[error("snapshot of a {rows}x{cols} grid carries {walls} wall entries")]
    SnapshotSize {
        rows: usize,
        cols: usize,
        walls: usize,
    },
    #[error("malformed grid data: {0}")]
    Json(#[from] serde_json::Error),
}

impl Grid {
    /// Captures the grid as plain data. Links are recorded from both ends, so the form does
    /// not depend on link symmetry having been restored.
    pub fn serialize(&self) -> SerializedGrid {
        let cell_data = self
            .cells()
            .iter()
            .map(|cell| SerializedCell {
                row: cell.row(),
                col: cell.col(),
                links: cell
                    .links()
                    .map(|other| {
                        let (row, col) = self[other].coord();
                        [row, col]
                    })
                    .collect(),
            })
            .collect();

        SerializedGrid {
            rows: self.rows(),
            cols: self.cols(),
            cell_size: self.cell_size(),
            cell_data,
        }
    }

    /// Rebuilds a grid from [`SerializedGrid`], replaying a link for every recorded pair on a
    /// freshly wired grid.
    ///
    /// Fails on the first coordinate that is out of range or link that is not between
    /// neighbors, rather than dropping it and leaving a half-linked maze behind.
    pub fn deserialize(data: &SerializedGrid) -> Result<Grid, GridError> {
        let size = data
            .rows
            .checked_mul(data.cols)
            .filter(|&size| size <= Grid::MAX_CELLS)
            .ok_or(GridError::Dimensions {
                rows: data.rows,
                cols: data.cols,
                max: Grid::MAX_CELLS,
            })?;
        if data.cell_data.len() > size {
            return Err(GridError::TooManyCells {
                cells: data.cell_data.len(),
                rows: data.rows,
                cols: data.cols,
            });
        }

        let mut grid = Grid::new(data.rows, data.cols, data.cell_size);

        for cell in &data.cell_data {
            let index =
                grid.index_of(cell.row, cell.col)
                    .ok_or(GridError::CellOutOfBounds {
                        row: cell.row,
                        col: cell.col,
                        rows: data.rows,
                        cols: data.cols,
                    })?;

            for &[link_row, link_col] in &cell.links {
                let other =
                    grid.index_of(link_row, link_col)
                        .ok_or(GridError::LinkOutOfBounds {
                            row: cell.row,
                            col: cell.col,
                            link_row,
                            link_col,
                            rows: data.rows,
                            cols: data.cols,
                        })?;
                if grid[index].direction_to(other).is_none() {
                    return Err(GridError::LinkNotAdjacent {
                        row: cell.row,
                        col: cell.col,
                        link_row,
                        link_col,
                    });
                }
                grid.link(index, other);
            }
        }

        Ok(grid)
    }

    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    pub fn from_json(json: &str) -> Result<Grid, GridError> {
        let data: SerializedGrid = serde_json::from_str(json)?;
        Grid::deserialize(&data)
    }
}
