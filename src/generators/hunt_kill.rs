use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Random walk through unvisited cells. When the walk gets stuck, hunt for an unvisited cell
/// bordering the visited area, connect it, and walk on from there.
///
/// A cell counts as visited once it has any link.
pub fn hunt_and_kill<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    let mut current = grid.random_cell(rng);

    while let Some(cell) = current {
        let unvisited = grid
            .neighbors(cell)
            .filter(|&n| !grid.has_any_link(n))
            .collect::<Vec<_>>();

        current = match rng.choose(&unvisited) {
            Some(&neighbor) => {
                grid.link(cell, neighbor);
                recorder.step(grid);
                Some(neighbor)
            }
            None => hunt(grid, rng, recorder),
        };
    }
}

/// Scans the grid in random order for the first unvisited cell with a visited neighbor and
/// links the two. Returns the newly connected cell, or `None` once every cell is visited.
fn hunt<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) -> Option<usize> {
    let mut order = (0..grid.size()).collect::<Vec<_>>();
    rng.shuffle(&mut order);

    for cell in order {
        if grid.has_any_link(cell) {
            continue;
        }
        let visited = grid
            .neighbors(cell)
            .filter(|&n| grid.has_any_link(n))
            .collect::<Vec<_>>();
        if let Some(&neighbor) = rng.choose(&visited) {
            grid.link(cell, neighbor);
            recorder.step(grid);
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;
    use crate::random::testing::ScriptedSource;

    #[test]
    fn test_walk_then_hunt() {
        // 1x3 strip, start in the middle, walk west into the corner, then hunt picks up the
        // eastern cell
        let mut grid = Grid::new(1, 3, 10);
        let mut rng = ScriptedSource::new([1, 0]);
        hunt_and_kill(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());

        assert!(grid.has_link(1, 0));
        assert!(grid.has_link(2, 1));
        assert!(is_perfect_maze(&grid));
    }

    #[test]
    fn test_large_grid() {
        let mut grid = Grid::new(20, 30, 10);
        let mut rng = crate::random::get_rng(Some(4));
        hunt_and_kill(&mut grid, &mut rng, &mut SnapshotRecorder::default());
        assert!(is_perfect_maze(&grid));
    }
}
