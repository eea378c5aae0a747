use serde::{Deserialize, Serialize};

use super::GridError;

/// Which sides of a cell have a wall.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

impl Walls {
    /// A cell boxed in on every side.
    pub const CLOSED: Walls = Walls {
        north: true,
        south: true,
        west: true,
        east: true,
    };
}

/// Wall state of a whole grid at one point of a generation run.
///
/// Plain value data: it does not refer back to the grid it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    /// Row-major, one entry per cell.
    walls: Box<[Walls]>,
}

/// Unchecked wire form of a [`Snapshot`].
#[derive(Deserialize)]
struct RawSnapshot {
    rows: usize,
    cols: usize,
    walls: Box<[Walls]>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = GridError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.walls.len()) {
            return Err(GridError::SnapshotSize {
                rows: raw.rows,
                cols: raw.cols,
                walls: raw.walls.len(),
            });
        }
        Ok(Snapshot {
            rows: raw.rows,
            cols: raw.cols,
            walls: raw.walls,
        })
    }
}

impl Snapshot {
    pub(super) fn new(rows: usize, cols: usize, walls: Box<[Walls]>) -> Self {
        debug_assert_eq!(walls.len(), rows * cols);
        Snapshot { rows, cols, walls }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Walls of every cell in row-major order.
    pub fn walls(&self) -> &[Walls] {
        &self.walls
    }

    pub fn walls_at(&self, row: usize, col: usize) -> Option<Walls> {
        if row < self.rows && col < self.cols {
            self.walls.get(row * self.cols + col).copied()
        } else {
            None
        }
    }
}

/// Collects snapshots during a generation run.
///
/// A snapshot is taken on every `interval`-th link-mutating step, starting with the first one,
/// and always once more when the run is finished. An interval of 0 only keeps the final one.
#[derive(Debug)]
pub struct SnapshotRecorder {
    interval: usize,
    steps: usize,
    snapshots: Vec<Snapshot>,
}

impl SnapshotRecorder {
    /// Default number of steps between two recorded snapshots.
    pub const DEFAULT_INTERVAL: usize = 10;

    pub fn new(interval: usize) -> Self {
        SnapshotRecorder {
            interval,
            steps: 0,
            snapshots: Vec::new(),
        }
    }

    /// A recorder that only keeps the final state.
    pub fn final_only() -> Self {
        Self::new(0)
    }

    /// Number of link-mutating steps seen so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Marks one link-mutating step on `grid`, capturing it if it falls on the interval.
    pub fn step(&mut self, grid: &super::Grid) {
        if self.interval != 0 && self.steps % self.interval == 0 {
            self.snapshots.push(grid.create_snapshot());
        }
        self.steps += 1;
    }

    /// Captures the final state and hands back everything recorded. Never empty.
    pub fn finish(mut self, grid: &super::Grid) -> Vec<Snapshot> {
        self.snapshots.push(grid.create_snapshot());
        self.snapshots
    }
}

impl Default for SnapshotRecorder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
