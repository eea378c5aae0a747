use std::time::Instant;

use thiserror::Error;

mod binary_tree;
mod hunt_kill;
mod kruskal;
mod prim;
mod recur_backtrack;
mod recur_div;
mod sidewinder;

use binary_tree::binary_tree;
use hunt_kill::hunt_and_kill;
use kruskal::randomized_kruskal;
use prim::simplified_prim;
use recur_backtrack::recursive_backtrack;
use recur_div::recursive_division;
use sidewinder::sidewinder;

use crate::{
    maze::{Grid, Snapshot, SnapshotRecorder},
    random::{RandomSource, get_rng},
};

/// The maze generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    BinaryTree,
    Sidewinder,
    HuntAndKill,
    RecurBacktrack,
    Kruskal,
    Prim,
    RecurDiv,
}

#[derive(Debug, Error)]
#[error("unknown generator `{0}`")]
pub struct ParseGeneratorError(String);

impl Generator {
    /// Every generator, in menu order.
    pub const ALL: [Generator; 7] = [
        Generator::BinaryTree,
        Generator::Sidewinder,
        Generator::HuntAndKill,
        Generator::RecurBacktrack,
        Generator::Kruskal,
        Generator::Prim,
        Generator::RecurDiv,
    ];

    /// Stable key used to select a generator from the command line or a config.
    pub fn key(self) -> &'static str {
        match self {
            Generator::BinaryTree => "binary-tree",
            Generator::Sidewinder => "sidewinder",
            Generator::HuntAndKill => "hunt-and-kill",
            Generator::RecurBacktrack => "recursive-backtracker",
            Generator::Kruskal => "kruskal",
            Generator::Prim => "prim",
            Generator::RecurDiv => "recursive-division",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Generator::BinaryTree => "Binary Tree",
            Generator::Sidewinder => "Sidewinder",
            Generator::HuntAndKill => "Hunt and Kill",
            Generator::RecurBacktrack => "Recursive Backtracker",
            Generator::Kruskal => "Kruskal's Algorithm",
            Generator::Prim => "Simplified Prim's Algorithm",
            Generator::RecurDiv => "Recursive Division",
        }
    }

    /// A few paragraphs on how the algorithm works and what its mazes look like.
    pub fn info(self) -> &'static [&'static str] {
        match self {
            Generator::BinaryTree => &[
                "Binary Tree is possibly the simplest maze algorithm there is.",
                "For every cell it picks a passage either to the north or to the east.",
                "That restriction leaves an unbroken corridor along the northern and eastern walls.",
                "Paths are easy to follow, always running diagonally towards the north-east.",
            ],
            Generator::Sidewinder => &[
                "Sidewinder is a close relative of Binary Tree.",
                "Adjacent cells of a row are grouped into runs before one member of the run is connected to the row above.",
                "This leaves a single corridor running the whole length of the northern wall.",
                "Paths mostly run north-south, with some east-west wandering inside each run.",
            ],
            Generator::HuntAndKill => &[
                "Hunt and Kill performs a random walk, carving into unvisited cells until it paints itself into a corner.",
                "It then hunts for an unvisited cell next to the carved area, connects it, and walks again from there.",
                "Mazes have long, winding passages and few dead ends.",
            ],
            Generator::RecurBacktrack => &[
                "Recursive Backtracker is a randomized depth-first search.",
                "It carves into a random unvisited neighbor while it can, and backs up along its stack when it cannot.",
                "The result has long, twisty corridors and a low branching factor.",
            ],
            Generator::Kruskal => &[
                "Randomized Kruskal's algorithm treats every wall between two cells as a candidate edge.",
                "Edges are visited in random order, and a wall is removed only if the cells on either side are not yet connected.",
                "Mazes have many short dead ends and no directional bias.",
            ],
            Generator::Prim => &[
                "Simplified Prim's algorithm grows the maze outwards from a random cell.",
                "It repeatedly picks a random cell of the frontier and connects it to one of its unvisited neighbors.",
                "Mazes radiate from the starting point and have many short dead ends.",
            ],
            Generator::RecurDiv => &[
                "Recursive Division starts from an open field with no walls at all.",
                "It splits the field with a wall that has a single passage, then splits both halves the same way.",
                "Mazes show long straight walls and a visible rectangular structure.",
            ],
        }
    }

    /// Looks a generator up by its [`key`](Generator::key).
    pub fn from_key(key: &str) -> Option<Generator> {
        Generator::ALL.into_iter().find(|g| g.key() == key)
    }

    /// Carves `grid` into a perfect maze, drawing every random choice from `rng`.
    ///
    /// Returns the snapshots taken every `snapshot_interval` link-mutating steps, always ending
    /// with the finished maze. An interval of 0 only returns the finished maze.
    pub fn run<R: RandomSource + ?Sized>(
        self,
        grid: &mut Grid,
        rng: &mut R,
        snapshot_interval: usize,
    ) -> Vec<Snapshot> {
        let mut recorder = SnapshotRecorder::new(snapshot_interval);
        if !grid.is_empty() {
            match self {
                Generator::BinaryTree => binary_tree(grid, rng, &mut recorder),
                Generator::Sidewinder => sidewinder(grid, rng, &mut recorder),
                Generator::HuntAndKill => hunt_and_kill(grid, rng, &mut recorder),
                Generator::RecurBacktrack => recursive_backtrack(grid, rng, &mut recorder),
                Generator::Kruskal => {
                    randomized_kruskal(grid, rng, &mut recorder);
                }
                Generator::Prim => simplified_prim(grid, rng, &mut recorder),
                Generator::RecurDiv => recursive_division(grid, rng, &mut recorder),
            }
        }
        recorder.finish(grid)
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Generator {
    type Err = ParseGeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Generator::from_key(s).ok_or_else(|| ParseGeneratorError(s.to_string()))
    }
}

/// Generate a maze with the given generator, optionally seeded for reproducibility.
pub fn generate_maze(
    grid: &mut Grid,
    generator: Generator,
    seed: Option<u64>,
    snapshot_interval: usize,
) -> Vec<Snapshot> {
    let mut rng = get_rng(seed);
    let started = Instant::now();
    let snapshots = generator.run(grid, &mut rng, snapshot_interval);
    tracing::debug!(
        "[generate] {} on {}x{} grid: {} links, {} snapshots in {:?}",
        generator,
        grid.rows(),
        grid.cols(),
        grid.link_count(),
        snapshots.len(),
        started.elapsed()
    );
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;

    #[test]
    fn test_registry_keys_round_trip() {
        for generator in Generator::ALL {
            assert_eq!(Generator::from_key(generator.key()), Some(generator));
            assert_eq!(generator.key().parse::<Generator>().unwrap(), generator);
            assert!(!generator.info().is_empty());
            assert_eq!(generator.to_string(), generator.display_name());
        }
        assert!("labyrinth".parse::<Generator>().is_err());
    }

    #[test]
    fn test_every_generator_makes_a_spanning_tree() {
        for generator in Generator::ALL {
            for (rows, cols) in [(1, 1), (1, 7), (6, 1), (2, 2), (5, 8), (13, 9)] {
                for seed in 0..4 {
                    let mut grid = Grid::new(rows, cols, 10);
                    let snapshots = generate_maze(&mut grid, generator, Some(seed), 10);
                    assert!(
                        is_perfect_maze(&grid),
                        "{generator} did not produce a perfect {rows}x{cols} maze (seed {seed})"
                    );
                    assert_eq!(grid.link_count(), rows * cols - 1);
                    assert!(grid.links_are_symmetric());
                    assert_eq!(snapshots.last(), Some(&grid.create_snapshot()));
                }
            }
        }
    }

    #[test]
    fn test_single_cell_has_no_links() {
        for generator in Generator::ALL {
            let mut grid = Grid::new(1, 1, 10);
            let snapshots = generate_maze(&mut grid, generator, Some(1), 10);
            assert_eq!(grid.link_count(), 0);
            assert!(!snapshots.is_empty());
        }
    }

    #[test]
    fn test_empty_grid_is_a_no_op() {
        for generator in Generator::ALL {
            let mut grid = Grid::new(0, 5, 10);
            let snapshots = generate_maze(&mut grid, generator, Some(1), 10);
            assert_eq!(snapshots.len(), 1);
            assert!(snapshots[0].walls().is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        for generator in Generator::ALL {
            let mut a = Grid::new(9, 9, 10);
            let mut b = Grid::new(9, 9, 10);
            let snapshots_a = generate_maze(&mut a, generator, Some(99), 3);
            let snapshots_b = generate_maze(&mut b, generator, Some(99), 3);
            assert_eq!(a, b);
            assert_eq!(snapshots_a, snapshots_b);
        }
    }

    #[test]
    fn test_snapshot_interval_zero_keeps_only_final() {
        let mut grid = Grid::new(8, 8, 10);
        let snapshots = generate_maze(&mut grid, Generator::Kruskal, Some(5), 0);
        assert_eq!(snapshots, vec![grid.create_snapshot()]);
    }

    #[test]
    fn test_snapshots_sampled_every_interval() {
        // Recursive Backtracker links exactly size - 1 times: steps 0, 10, ..., 60 plus the final
        let mut grid = Grid::new(8, 8, 10);
        let snapshots = generate_maze(&mut grid, Generator::RecurBacktrack, Some(5), 10);
        assert_eq!(snapshots.len(), 7 + 1);
    }
}
