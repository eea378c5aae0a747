use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Randomized depth-first search with an explicit stack.
pub fn recursive_backtrack<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    let Some(start) = grid.random_cell(rng) else {
        return;
    };

    // The stack holds the carved path back to the start
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = grid
            .neighbors(cell)
            .filter(|&n| !grid.has_any_link(n))
            .collect::<Vec<_>>();

        match rng.choose(&neighbors) {
            Some(&neighbor) => {
                grid.link(cell, neighbor);
                recorder.step(grid);
                // Carve on in that neighbor's direction
                stack.push(neighbor);
            }
            None => {
                stack.pop();
            }
        }
    }
}
