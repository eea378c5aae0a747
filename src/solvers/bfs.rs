use std::collections::{HashMap, VecDeque};

use crate::maze::Grid;

/// Shortest path from `start` to `end` over linked cells only, by breadth-first search.
///
/// The path starts with `start` and ends with `end`, and every consecutive pair is linked. It
/// is empty when `end` cannot be reached from `start`, or either index is out of bounds.
pub fn find_path(grid: &Grid, start: usize, end: usize) -> Vec<usize> {
    if start >= grid.size() || end >= grid.size() {
        return Vec::new();
    }

    let mut queue = VecDeque::from([start]);
    // cell -> the cell it was reached from, `None` for the start
    let mut parent: HashMap<usize, Option<usize>> = HashMap::from([(start, None)]);
    let mut found = false;

    while let Some(current) = queue.pop_front() {
        if current == end {
            found = true;
            break;
        }

        let cell = &grid[current];
        for neighbor in cell.neighbors() {
            if cell.has_link(neighbor) && !parent.contains_key(&neighbor) {
                parent.insert(neighbor, Some(current));
                queue.push_back(neighbor);
            }
        }
    }

    if !found {
        tracing::debug!(
            "[bfs] cell {} is unreachable from cell {}, visited {} cells",
            end,
            start,
            parent.len()
        );
        return Vec::new();
    }

    // Unwind from the end back to the start
    let mut path = vec![end];
    let mut node = end;
    while let Some(&Some(previous)) = parent.get(&node) {
        path.push(previous);
        node = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};

    #[test]
    fn test_path_to_self() {
        let grid = Grid::new(1, 1, 10);
        assert_eq!(find_path(&grid, 0, 0), vec![0]);

        let mut grid = Grid::new(4, 4, 10);
        generate_maze(&mut grid, Generator::Prim, Some(1), 0);
        assert_eq!(find_path(&grid, 5, 5), vec![5]);
    }

    #[test]
    fn test_follows_links_not_adjacency() {
        // 2x2 U shape: (0,0) - (1,0) - (1,1) - (0,1), no link across the top
        let mut grid = Grid::new(2, 2, 10);
        grid.link(0, 2);
        grid.link(2, 3);
        grid.link(3, 1);
        assert_eq!(find_path(&grid, 0, 1), vec![0, 2, 3, 1]);
        assert_eq!(find_path(&grid, 1, 0), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_shortest_path_with_cycle() {
        // Open 2x2: both routes around are two steps, north/south/west/east order picks south first
        let mut grid = Grid::new(2, 2, 10);
        grid.link(0, 1);
        grid.link(0, 2);
        grid.link(1, 3);
        grid.link(2, 3);
        assert_eq!(find_path(&grid, 0, 3), vec![0, 2, 3]);
        assert_eq!(find_path(&grid, 0, 1), vec![0, 1]);
    }

    #[test]
    fn test_unreachable_is_empty() {
        let mut grid = Grid::new(1, 3, 10);
        grid.link(0, 1);
        assert!(find_path(&grid, 0, 2).is_empty());
        assert!(find_path(&grid, 0, 9).is_empty());
    }

    #[test]
    fn test_paths_in_generated_mazes() {
        for generator in Generator::ALL {
            let mut grid = Grid::new(9, 12, 10);
            generate_maze(&mut grid, generator, Some(6), 0);
            let end = grid.size() - 1;
            let path = find_path(&grid, 0, end);

            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&end));
            assert!(path.len() - 1 <= grid.size() - 1);
            assert!(path.windows(2).all(|pair| grid.has_link(pair[0], pair[1])));
        }
    }
}
