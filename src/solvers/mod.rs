mod bfs;

pub use bfs::find_path;

use crate::maze::Grid;

/// Corner-to-corner routes to solve a finished maze for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Top-left to bottom-right.
    #[default]
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Diagonal, Route::AntiDiagonal];

    pub fn key(self) -> &'static str {
        match self {
            Route::Diagonal => "diagonal",
            Route::AntiDiagonal => "anti-diagonal",
        }
    }

    /// Start and end cell indices of this route on `grid`, or `None` for an empty grid.
    pub fn endpoints(self, grid: &Grid) -> Option<(usize, usize)> {
        if grid.is_empty() {
            return None;
        }
        let (last_row, last_col) = (grid.rows() - 1, grid.cols() - 1);
        let (start, end) = match self {
            Route::Diagonal => ((0, 0), (last_row, last_col)),
            Route::AntiDiagonal => ((last_row, 0), (0, last_col)),
        };
        Some((grid[start].index(), grid[end].index()))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Diagonal => write!(f, "Top-left to bottom-right"),
            Route::AntiDiagonal => write!(f, "Bottom-left to top-right"),
        }
    }
}

/// Solves `grid` along `route`. Returns the cell indices of the path, empty if there is none.
pub fn solve_maze(grid: &Grid, route: Route) -> Vec<usize> {
    match route.endpoints(grid) {
        Some((start, end)) => find_path(grid, start, end),
        None => Vec::new(),
    }
}
