use std::collections::HashMap;

use crate::{
    maze::{Grid, SnapshotRecorder},
    random::RandomSource,
};

/// Disjoint sets of cells, tracked both ways: which set each cell is in, and which cells each
/// set holds.
#[derive(Debug)]
pub struct Partition {
    set_for_cell: Vec<usize>,
    cells_in_set: HashMap<usize, Vec<usize>>,
}

impl Partition {
    /// Every cell starts out in a set of its own, keyed by its index.
    pub fn new(size: usize) -> Self {
        Partition {
            set_for_cell: (0..size).collect(),
            cells_in_set: (0..size).map(|i| (i, vec![i])).collect(),
        }
    }

    pub fn find(&self, cell: usize) -> usize {
        self.set_for_cell[cell]
    }

    pub fn can_merge(&self, a: usize, b: usize) -> bool {
        self.find(a) != self.find(b)
    }

    /// Moves the members of the smaller of the two sets into the larger one and drops the
    /// emptied set. Returns `false` if both cells are already in the same set.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let (set_a, set_b) = (self.find(a), self.find(b));
        if set_a == set_b {
            return false;
        }

        // Every live set id is a key of `cells_in_set`
        let (len_a, len_b) = (self.cells_in_set[&set_a].len(), self.cells_in_set[&set_b].len());
        let (winner, loser) = if len_a >= len_b {
            (set_a, set_b)
        } else {
            (set_b, set_a)
        };

        for &cell in &self.cells_in_set[&loser] {
            self.set_for_cell[cell] = winner;
        }
        let (Some(moved), Some(members)) = (
            self.cells_in_set.remove(&loser),
            self.cells_in_set.get_mut(&winner),
        ) else {
            unreachable!("merged sets {} and {} must both be live", winner, loser)
        };
        members.extend(moved);
        true
    }

    /// Number of disjoint sets left.
    pub fn set_count(&self) -> usize {
        self.cells_in_set.len()
    }
}

/// Edge between a cell and its south or east neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    cell1: usize,
    cell2: usize,
}

/// Collects the south and east edges of every cell, in row-major order.
fn candidate_edges(grid: &Grid) -> Vec<Edge> {
    grid.cells()
        .iter()
        .flat_map(|cell| {
            [cell.south(), cell.east()]
                .into_iter()
                .flatten()
                .map(move |neighbor| Edge {
                    cell1: cell.index(),
                    cell2: neighbor,
                })
        })
        .collect()
}

/// Visits all edges in random order and links the ones that join two different sets.
///
/// Returns the final partition, which holds a single set once the maze is done.
pub fn randomized_kruskal<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    recorder: &mut SnapshotRecorder,
) -> Partition {
    let mut partition = Partition::new(grid.size());

    let mut edges = candidate_edges(grid);
    rng.shuffle(&mut edges);

    for Edge { cell1, cell2 } in edges {
        // If cells are not yet connected, remove the wall between them
        if partition.merge(cell1, cell2) {
            grid.link(cell1, cell2);
            recorder.step(grid);
        }
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;
    use crate::random::{get_rng, testing::ScriptedSource};

    #[test]
    fn test_candidate_edges() {
        let grid = Grid::new(2, 2, 10);
        let edges = candidate_edges(&grid)
            .into_iter()
            .map(|e| (e.cell1, e.cell2))
            .collect::<Vec<_>>();
        assert_eq!(edges, vec![(0, 2), (0, 1), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_edges_processed_in_shuffled_order() {
        // The scripted source leaves the order untouched
        let mut grid = Grid::new(2, 2, 10);
        let mut rng = ScriptedSource::default();
        let partition =
            randomized_kruskal(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());

        assert!(grid.has_link(0, 2));
        assert!(grid.has_link(0, 1));
        assert!(grid.has_link(1, 3));
        // (2, 3) would close a cycle
        assert!(!grid.has_link(2, 3));
        assert_eq!(partition.set_count(), 1);
    }

    #[test]
    fn test_partition_merges() {
        let mut partition = Partition::new(4);
        assert_eq!(partition.set_count(), 4);
        assert!(partition.merge(0, 1));
        assert!(!partition.merge(1, 0));
        assert!(partition.merge(2, 3));
        assert!(partition.can_merge(0, 3));
        // equal sizes keep the first set's id
        assert!(partition.merge(3, 0));
        assert_eq!(partition.set_count(), 1);
        let id = partition.find(0);
        assert!((0..4).all(|cell| partition.find(cell) == id));
    }

    #[test]
    fn test_smaller_set_moves() {
        let mut partition = Partition::new(3);
        partition.merge(1, 2);
        let big = partition.find(1);
        partition.merge(0, 1);
        assert_eq!(partition.find(0), big);
    }

    #[test]
    fn test_members_follow_their_set() {
        let mut partition = Partition::new(6);
        for (a, b) in [(0, 1), (2, 3), (4, 5), (1, 3), (5, 0)] {
            partition.merge(a, b);
        }
        let id = partition.find(0);
        let mut members = partition.cells_in_set[&id].clone();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(partition.cells_in_set.len(), 1);
    }

    #[test]
    fn test_seeded_single_partition() {
        let mut grid = Grid::new(12, 7, 10);
        let mut rng = get_rng(Some(3));
        let partition =
            randomized_kruskal(&mut grid, &mut rng, &mut SnapshotRecorder::final_only());
        assert_eq!(partition.set_count(), 1);
        assert!(is_perfect_maze(&grid));
    }
}
