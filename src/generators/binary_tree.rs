use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Links every cell to either its north or its east neighbor.
pub fn binary_tree<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    for index in 0..grid.size() {
        let cell = &grid[index];
        let candidates = [cell.north(), cell.east()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        // Only the north-east corner has no candidate
        if let Some(&neighbor) = rng.choose(&candidates) {
            grid.link(index, neighbor);
            recorder.step(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;
    use crate::random::testing::ScriptedSource;

    #[test]
    fn test_first_choice_is_always_north() {
        // Always picking index 0 means north wherever it exists, east along the top row
        let mut grid = Grid::new(3, 3, 10);
        let mut rng = ScriptedSource::default();
        binary_tree(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());

        assert!(is_perfect_maze(&grid));
        assert!(grid.has_link(0, 1));
        assert!(grid.has_link(1, 2));
        for index in 3..9 {
            assert!(grid.has_link(index, index - 3));
        }
    }

    #[test]
    fn test_top_row_is_a_corridor() {
        let mut grid = Grid::new(6, 6, 10);
        let mut rng = crate::random::get_rng(Some(8));
        binary_tree(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());
        assert!((0..5).all(|col| grid.has_link(col, col + 1)));
        // and so is the eastern column
        assert!((0..5).all(|row| grid.has_link(row * 6 + 5, (row + 1) * 6 + 5)));
    }
}
