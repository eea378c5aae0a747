use crate::{
    maze::{Grid, Orientation, SnapshotRecorder},
    random::RandomSource,
};

/// Starts from a grid with every neighbor linked and recursively splits it with walls that
/// each keep a single passage.
pub fn recursive_division<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    link_all(grid);

    // Start the recursive division
    let (rows, cols) = (grid.rows(), grid.cols());
    divide(grid, (0, 0), rows, cols, rng, recorder);
}

/// Removes every wall. Each pair is reached once from either side, so one-way links are
/// enough to end up symmetric.
fn link_all(grid: &mut Grid) {
    for index in 0..grid.size() {
        let neighbors = grid.neighbors(index).collect::<Vec<_>>();
        for neighbor in neighbors {
            grid.link_one_way(index, neighbor);
        }
    }
}

/// Splits the region of `height` rows and `width` columns whose top-left cell is `top_left`.
fn divide<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    top_left: (usize, usize),
    height: usize,
    width: usize,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    if height <= 1 && width <= 1 {
        return;
    }

    let (row, col) = top_left;
    let cols = grid.cols();

    let orientation = if height > width {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };

    match orientation {
        Orientation::Horizontal => {
            // The wall runs below row `row + diff`
            let diff = rng.pick_index(height - 1);
            let wall_row = row + diff;
            let passage = col + rng.pick_index(width);

            for c in (col..col + width).filter(|&c| c != passage) {
                let above = wall_row * cols + c;
                grid.unlink(above, above + cols);
                recorder.step(grid);
            }

            let upper_height = diff + 1;
            let lower_height = height - upper_height;

            // Recursively divide the regions above and below the wall
            divide(grid, (row, col), upper_height, width, rng, recorder);
            divide(grid, (wall_row + 1, col), lower_height, width, rng, recorder);
        }
        Orientation::Vertical => {
            // The wall runs right of column `col + diff`
            let diff = rng.pick_index(width - 1);
            let wall_col = col + diff;
            let passage = row + rng.pick_index(height);

            for r in (row..row + height).filter(|&r| r != passage) {
                let left = r * cols + wall_col;
                grid.unlink(left, left + 1);
                recorder.step(grid);
            }

            let left_width = diff + 1;
            let right_width = width - left_width;

            // Recursively divide the regions left and right of the wall
            divide(grid, (row, col), height, left_width, rng, recorder);
            divide(grid, (row, wall_col + 1), height, right_width, rng, recorder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;
    use crate::random::{get_rng, testing::ScriptedSource};

    #[test]
    fn test_link_all() {
        let mut grid = Grid::new(4, 4, 10);
        link_all(&mut grid);
        assert_eq!(grid.link_count(), 24);
        assert!(grid.links_are_symmetric());
    }

    #[test]
    fn test_4x4_starts_open_and_ends_as_tree() {
        let mut grid = Grid::new(4, 4, 10);
        let mut rng = get_rng(Some(17));
        let mut recorder = SnapshotRecorder::new(1);
        recursive_division(&mut grid, &mut rng, &mut recorder);

        // 24 open pairs, each unlink removes one
        assert_eq!(recorder.steps(), 24 - 15);
        let snapshots = recorder.finish(&grid);
        // the first unlink leaves 23 pairs open: at most one interior wall in the first frame
        // Each of the 4 east and 4 south boundary walls is counted once
        let interior_walls = |s: &crate::maze::Snapshot| {
            let walls: usize = s
                .walls()
                .iter()
                .map(|w| w.east as usize + w.south as usize)
                .sum();
            walls - 2 * 4
        };
        assert_eq!(interior_walls(&snapshots[0]), 1);
        assert_eq!(grid.link_count(), 15);
        assert!(is_perfect_maze(&grid));
    }

    #[test]
    fn test_scripted_wall_placement() {
        // 2x3: first wall right of column 0 with the passage in row 1
        let mut grid = Grid::new(2, 3, 10);
        let mut rng = ScriptedSource::new([0, 1]);
        recursive_division(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());

        assert!(!grid.has_link(0, 1));
        assert!(grid.has_link(3, 4));
        assert!(is_perfect_maze(&grid));
    }

    #[test]
    fn test_strips_stay_open() {
        let mut grid = Grid::new(1, 6, 10);
        let mut rng = get_rng(Some(2));
        recursive_division(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());
        assert_eq!(grid.link_count(), 5);
    }
}
