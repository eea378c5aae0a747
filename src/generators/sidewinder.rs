use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Works row by row, growing a run of cells eastwards and closing it off by linking one random
/// member of the run to the north.
pub fn sidewinder<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) {
    let cols = grid.cols();
    let mut run = Vec::with_capacity(cols);

    for row in 0..grid.rows() {
        run.clear();
        for col in 0..cols {
            let index = row * cols + col;
            run.push(index);

            let cell = &grid[index];
            let east = cell.east();
            let at_eastern_boundary = east.is_none();
            let at_northern_boundary = cell.north().is_none();

            let should_close = at_eastern_boundary || (!at_northern_boundary && rng.coin_flip());

            if should_close {
                let member = run[rng.pick_index(run.len())];
                if let Some(north) = grid[member].north() {
                    grid.link(member, north);
                    recorder.step(grid);
                }
                run.clear();
            } else if let Some(east) = east {
                grid.link(index, east);
                recorder.step(grid);
            }
        }
    }
}
