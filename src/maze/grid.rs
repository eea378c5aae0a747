use super::{
    cell::{Cell, Direction},
    snapshot::{Snapshot, Walls},
};
use crate::random::RandomSource;

/// A `rows x cols` arena of cells with their neighbor relations wired up.
///
/// Neighbor relations are fixed at construction. Only links change afterwards, through
/// [`Grid::link`] and [`Grid::unlink`] and their one-way variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    cols: usize,
    /// Size of a cell when drawn, in renderer units. Carried along for renderers and transport.
    cell_size: u16,
}

impl Grid {
    /// Largest number of cells accepted from serialized data.
    pub const MAX_CELLS: usize = 1 << 24;

    pub fn new(rows: usize, cols: usize, cell_size: u16) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| Cell::new(row, col, row * cols + col))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let mut grid = Grid {
            cells,
            rows,
            cols,
            cell_size,
        };
        grid.configure_cells();
        grid
    }

    /// Wires every cell to its in-bounds neighbors. Edge cells get fewer neighbors, nothing
    /// wraps around.
    fn configure_cells(&mut self) {
        for index in 0..self.cells.len() {
            let (row, col) = self.cells[index].coord();
            for direction in Direction::ALL {
                let (dr, dc) = direction.offset();
                let neighbor = row
                    .checked_add_signed(dr)
                    .zip(col.checked_add_signed(dc))
                    .and_then(|(r, c)| self.index_of(r, c));
                self.cells[index].set_neighbor(direction, neighbor);
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    /// Number of cells in the grid.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Checks if the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Checks if `(row, col)` is within the bounds of the grid.
    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Arena index of `(row, col)`, or `None` if it is out of bounds.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        self.is_in_bounds(row, col).then(|| row * self.cols + col)
    }

    /// The cell at `(row, col)`, or `None` if it is out of bounds.
    pub fn at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).map(|index| &self.cells[index])
    }

    /// The cell with the given arena index, or `None` if there is no such cell.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// A uniformly random cell index, or `None` if the grid is empty.
    pub fn random_cell<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(rng.pick_index(self.cells.len()))
        }
    }

    /// Links `a` and `b` in both directions. Linking an existing pair is a no-op.
    ///
    /// Callers are expected to only link neighbors; this is not checked.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn link(&mut self, a: usize, b: usize) {
        self.link_one_way(a, b);
        self.link_one_way(b, a);
    }

    /// Adds `b` to the links of `a` only. Leaves the grid asymmetric until the reverse link is
    /// added as well.
    pub fn link_one_way(&mut self, a: usize, b: usize) {
        self.cells[a].add_link(b);
    }

    /// Removes the link between `a` and `b` in both directions.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn unlink(&mut self, a: usize, b: usize) {
        self.unlink_one_way(a, b);
        self.unlink_one_way(b, a);
    }

    /// Removes `b` from the links of `a` only.
    pub fn unlink_one_way(&mut self, a: usize, b: usize) {
        self.cells[a].remove_link(b);
    }

    /// Whether `a` has a link to `b`. Out of bounds indices are never linked.
    pub fn has_link(&self, a: usize, b: usize) -> bool {
        self.cells.get(a).is_some_and(|cell| cell.has_link(b))
    }

    /// Whether `index` is linked to anything. Unlinked cells are the "unvisited" ones for the
    /// carving generators.
    pub fn has_any_link(&self, index: usize) -> bool {
        self.cells[index].has_any_link()
    }

    /// Present neighbors of `index`, in the order north, south, west, east.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells[index].neighbors()
    }

    /// Number of linked pairs, each pair counted once.
    pub fn link_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|cell| cell.links().filter(move |&other| other > cell.index()))
            .count()
    }

    /// Checks that every link has its reverse.
    pub fn links_are_symmetric(&self) -> bool {
        self.cells.iter().all(|cell| {
            cell.links()
                .all(|other| self.has_link(other, cell.index()))
        })
    }

    /// Captures the wall state of every cell. A wall exists on a side when there is no
    /// neighbor there, or the neighbor is not linked.
    pub fn create_snapshot(&self) -> Snapshot {
        let walls = self
            .cells
            .iter()
            .map(|cell| Walls {
                north: !cell.is_linked_towards(Direction::North),
                south: !cell.is_linked_towards(Direction::South),
                west: !cell.is_linked_towards(Direction::West),
                east: !cell.is_linked_towards(Direction::East),
            })
            .collect();
        Snapshot::new(self.rows, self.cols, walls)
    }
}

impl std::ops::Index<usize> for Grid {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        assert!(
            self.is_in_bounds(row, col),
            "cell ({row}, {col}) is out of bounds for a {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::get_rng;

    #[test]
    fn test_grid_indexing() {
        let grid = Grid::new(3, 4, 10);
        assert_eq!(grid.size(), 12);
        assert_eq!(grid[(2, 3)].index(), 11);
        assert_eq!(grid[7].coord(), (1, 3));
        assert_eq!(grid.cells().len(), 12);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5, 10);
        assert!(grid.at(5, 5).is_none());
        assert!(grid.at(0, 5).is_none());
        assert!(grid.at(5, 0).is_none());
        assert_eq!(grid.at(4, 4).map(Cell::coord), Some((4, 4)));
    }

    #[test]
    fn test_neighbor_wiring() {
        let grid = Grid::new(3, 3, 10);
        let corner = &grid[(0, 0)];
        assert_eq!(corner.north(), None);
        assert_eq!(corner.west(), None);
        assert_eq!(corner.south(), Some(3));
        assert_eq!(corner.east(), Some(1));
        assert_eq!(grid.neighbors(4).collect::<Vec<_>>(), vec![1, 7, 3, 5]);

        // relations are symmetric
        for cell in grid.cells() {
            for direction in Direction::ALL {
                if let Some(neighbor) = cell.neighbor(direction) {
                    assert_eq!(grid[neighbor].neighbor(direction.opposite()), Some(cell.index()));
                }
            }
        }
    }

    #[test]
    fn test_no_wraparound() {
        let grid = Grid::new(2, 3, 10);
        assert_eq!(grid[(0, 2)].east(), None);
        assert_eq!(grid[(1, 0)].west(), None);
        assert_eq!(grid[(1, 1)].south(), None);
    }

    #[test]
    fn test_link_then_unlink() {
        let mut grid = Grid::new(2, 2, 10);
        grid.link(0, 1);
        assert!(grid.has_link(0, 1));
        assert!(grid.has_link(1, 0));
        // idempotent
        grid.link(0, 1);
        assert_eq!(grid.link_count(), 1);

        grid.unlink(0, 1);
        assert!(!grid.has_link(0, 1));
        assert!(!grid.has_link(1, 0));
        assert_eq!(grid.link_count(), 0);
    }

    #[test]
    fn test_one_way_link() {
        let mut grid = Grid::new(1, 2, 10);
        grid.link_one_way(0, 1);
        assert!(grid.has_link(0, 1));
        assert!(!grid.has_link(1, 0));
        assert!(!grid.links_are_symmetric());
        grid.link_one_way(1, 0);
        assert!(grid.links_are_symmetric());
        grid.unlink_one_way(0, 1);
        assert!(grid.has_link(1, 0));
        assert!(!grid.has_link(0, 1));
    }

    #[test]
    fn test_random_cell() {
        let mut rng = get_rng(Some(42));
        let grid = Grid::new(4, 4, 10);
        for _ in 0..100 {
            let index = grid.random_cell(&mut rng).unwrap();
            assert!(index < grid.size());
        }
        assert_eq!(Grid::new(0, 4, 10).random_cell(&mut rng), None);
    }

    #[test]
    fn test_snapshot_walls() {
        let mut grid = Grid::new(2, 2, 10);
        grid.link(0, 1);
        grid.link(1, 3);
        let snapshot = grid.create_snapshot();
        let top_left = snapshot.walls_at(0, 0).unwrap();
        assert!(top_left.north && top_left.west && top_left.south);
        assert!(!top_left.east);
        let top_right = snapshot.walls_at(0, 1).unwrap();
        assert!(!top_right.west && !top_right.south);
        assert!(top_right.north && top_right.east);
        let bottom_left = snapshot.walls_at(1, 0).unwrap();
        assert!(bottom_left.north && bottom_left.east);

        // later mutations do not leak into the captured value
        grid.unlink(0, 1);
        assert!(!snapshot.walls_at(0, 0).unwrap().east);
    }
}
