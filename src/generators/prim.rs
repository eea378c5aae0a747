use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Simplified Prim's: grow the maze from a random cell by repeatedly picking a random frontier
/// cell and linking it to one of its unvisited neighbors.
pub fn simplified_prim<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    let Some(start) = grid.random_cell(rng) else {
        return;
    };

    let mut frontiers = vec![start];
    while !frontiers.is_empty() {
        // Randomly select a cell from the frontiers
        let idx = rng.pick_index(frontiers.len());
        let cell = frontiers[idx];

        let unvisited = grid
            .neighbors(cell)
            .filter(|&n| !grid.has_any_link(n))
            .collect::<Vec<_>>();

        match rng.choose(&unvisited) {
            Some(&neighbor) => {
                grid.link(cell, neighbor);
                recorder.step(grid);
                frontiers.push(neighbor);
            }
            None => {
                // Nothing left to carve from here
                frontiers.swap_remove(idx);
            }
        }
    }
}
