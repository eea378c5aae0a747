use std::collections::BTreeSet;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions, in the order neighbors are visited.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Row and column offset of the neighbor in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// A node of the maze graph.
///
/// Cells live in the arena owned by [`Grid`](super::Grid) and refer to each other by arena
/// index (`row * cols + col`). Two cells are the same cell iff they have the same index, so
/// there is no object identity to get wrong.
///
/// `neighbors` are wired once by the grid and never change. `links` are the neighbors this
/// cell has no wall with, and are mutated through the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    index: usize,
    neighbors: [Option<usize>; 4],
    links: BTreeSet<usize>,
}

impl Cell {
    pub(super) fn new(row: usize, col: usize, index: usize) -> Self {
        Cell {
            row,
            col,
            index,
            neighbors: [None; 4],
            links: BTreeSet::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// `(row, col)` of this cell.
    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Arena index of this cell in its grid.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn north(&self) -> Option<usize> {
        self.neighbor(Direction::North)
    }

    pub fn south(&self) -> Option<usize> {
        self.neighbor(Direction::South)
    }

    pub fn west(&self) -> Option<usize> {
        self.neighbor(Direction::West)
    }

    pub fn east(&self) -> Option<usize> {
        self.neighbor(Direction::East)
    }

    /// The neighbor in `direction`, or `None` at the grid boundary.
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        self.neighbors[direction.slot()]
    }

    pub(super) fn set_neighbor(&mut self, direction: Direction, neighbor: Option<usize>) {
        self.neighbors[direction.slot()] = neighbor;
    }

    /// Present neighbors in the order north, south, west, east.
    pub fn neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    /// The direction in which `other` lies, if it is a neighbor of this cell.
    pub fn direction_to(&self, other: usize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == Some(other))
    }

    /// Indices of the cells this cell is linked to, in ascending order.
    pub fn links(&self) -> impl Iterator<Item = usize> + '_ {
        self.links.iter().copied()
    }

    pub fn has_link(&self, other: usize) -> bool {
        self.links.contains(&other)
    }

    /// Whether the neighbor in `direction` exists and is linked to this cell.
    pub fn is_linked_towards(&self, direction: Direction) -> bool {
        self.neighbor(direction)
            .is_some_and(|neighbor| self.has_link(neighbor))
    }

    pub fn has_any_link(&self) -> bool {
        !self.links.is_empty()
    }

    /// Adds `other` to the link set. Returns `false` if it was already there.
    pub(super) fn add_link(&mut self, other: usize) -> bool {
        self.links.insert(other)
    }

    /// Removes `other` from the link set. Returns `false` if it was not there.
    pub(super) fn remove_link(&mut self, other: usize) -> bool {
        self.links.remove(&other)
    }
}
