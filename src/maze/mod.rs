pub mod cell;
pub mod grid;
mod ser;
pub mod snapshot;

pub use cell::{Cell, Direction};
pub use grid::Grid;
pub use ser::{GridError, SerializedCell, SerializedGrid};
pub use snapshot::{Snapshot, SnapshotRecorder, Walls};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Checks that the links of `grid` form a spanning tree: symmetric, exactly `size - 1` pairs,
/// and every cell reachable from the first one.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    if grid.is_empty() {
        return true;
    }
    if !grid.links_are_symmetric() || grid.link_count() != grid.size() - 1 {
        return false;
    }

    let mut seen = vec![false; grid.size()];
    let mut stack = vec![0];
    seen[0] = true;
    let mut reached = 1;
    while let Some(index) = stack.pop() {
        for other in grid[index].links() {
            if !seen[other] {
                seen[other] = true;
                reached += 1;
                stack.push(other);
            }
        }
    }
    reached == grid.size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_is_perfect() {
        assert!(is_perfect_maze(&Grid::new(1, 1, 10)));
    }

    #[test]
    fn test_cycle_is_not_perfect() {
        let mut grid = Grid::new(2, 2, 10);
        grid.link(0, 1);
        grid.link(1, 3);
        grid.link(3, 2);
        assert!(is_perfect_maze(&grid));
        grid.link(2, 0);
        assert!(!is_perfect_maze(&grid));
    }

    #[test]
    fn test_disconnected_is_not_perfect() {
        let mut grid = Grid::new(1, 4, 10);
        grid.link(0, 1);
        grid.link(2, 3);
        assert!(!is_perfect_maze(&grid));
    }
}
