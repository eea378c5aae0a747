use crate::maze::Snapshot;

/// Playback position over the snapshots of a finished generation run.
pub struct SnapshotHistory {
    /// Snapshots in the order they were recorded. Never empty.
    snapshots: Vec<Snapshot>,
    /// Index of the snapshot currently on screen. Always between 0 and snapshots.len() - 1
    position: usize,
}

impl SnapshotHistory {
    /// Returns `None` if there is nothing to play back.
    pub fn new(snapshots: Vec<Snapshot>) -> Option<Self> {
        if snapshots.is_empty() {
            None
        } else {
            Some(SnapshotHistory {
                snapshots,
                position: 0,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn history_forward(&mut self) -> Option<&Snapshot> {
        if self.position + 1 >= self.snapshots.len() {
            None // Already at the final snapshot
        } else {
            self.position += 1;
            self.snapshots.get(self.position)
        }
    }

    pub fn history_backward(&mut self) -> Option<&Snapshot> {
        match self.position {
            0 => None,
            _ => {
                self.position -= 1;
                self.snapshots.get(self.position)
            }
        }
    }

    /// Jumps to the final snapshot.
    pub fn skip_to_end(&mut self) -> &Snapshot {
        self.position = self.snapshots.len() - 1;
        self.current()
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.position]
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 == self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Grid;

    fn history_of(len: usize) -> SnapshotHistory {
        let mut grid = Grid::new(1, len, 10);
        let mut snapshots = vec![grid.create_snapshot()];
        for i in 1..len {
            grid.link(i - 1, i);
            snapshots.push(grid.create_snapshot());
        }
        SnapshotHistory::new(snapshots).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert!(SnapshotHistory::new(Vec::new()).is_none());
    }

    #[test]
    fn test_browse() {
        let mut history = history_of(3);
        assert_eq!(history.len(), 3);
        assert!(history.history_backward().is_none());
        assert!(history.history_forward().is_some());
        assert!(history.history_forward().is_some());
        assert!(history.is_at_end());
        assert!(history.history_forward().is_none());
        assert_eq!(history.position(), 2);
        assert!(history.history_backward().is_some());
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_skip_to_end() {
        let mut history = history_of(4);
        let last = history.skip_to_end().clone();
        assert!(history.is_at_end());
        assert!(!last.walls_at(0, 0).unwrap().east);
    }
}
