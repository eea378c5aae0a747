use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crate::{
    generators::Generator,
    maze::{Grid, Snapshot},
    random::get_rng,
};

/// Everything needed to generate one maze off the interactive thread.
#[derive(Debug, Clone, Copy)]
pub struct GenerationJob {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: u16,
    pub generator: Generator,
    pub seed: Option<u64>,
    pub snapshot_interval: usize,
}

/// A finished maze and the snapshots recorded while carving it.
#[derive(Debug)]
pub struct GenerationResult {
    pub grid: Grid,
    pub snapshots: Vec<Snapshot>,
    pub elapsed: Duration,
}

impl GenerationJob {
    /// Runs the job on the current thread.
    pub fn run(self) -> GenerationResult {
        let mut grid = Grid::new(self.rows, self.cols, self.cell_size);
        let mut rng = get_rng(self.seed);
        let started = Instant::now();
        let snapshots = self
            .generator
            .run(&mut grid, &mut rng, self.snapshot_interval);
        GenerationResult {
            grid,
            snapshots,
            elapsed: started.elapsed(),
        }
    }

    /// Runs the job on a new thread. The result arrives through the returned handle.
    pub fn spawn(self) -> JobHandle {
        let (result_tx, result_rx) = mpsc::channel::<GenerationResult>();
        let handle = std::thread::spawn(move || {
            tracing::debug!(
                "[worker] generating {}x{} maze with {}",
                self.rows,
                self.cols,
                self.generator
            );
            let result = self.run();
            tracing::info!(
                "[worker] {} finished in {:?} with {} snapshots",
                self.generator,
                result.elapsed,
                result.snapshots.len()
            );
            if result_tx.send(result).is_err() {
                // Receiver has been dropped, the job was cancelled
                tracing::debug!("[worker] result discarded");
            }
        });
        JobHandle {
            result_rx,
            handle: Some(handle),
        }
    }
}

/// Handle to a generation job running in the background.
///
/// Generation cannot be interrupted halfway. Dropping the handle cancels the job in the only
/// way available: the result is thrown away when it arrives.
pub struct JobHandle {
    result_rx: Receiver<GenerationResult>,
    handle: Option<JoinHandle<()>>,
}

impl JobHandle {
    /// Blocks until the job is done. Returns `None` if the worker died without a result.
    pub fn wait(mut self) -> Option<GenerationResult> {
        let result = self.result_rx.recv().ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("[worker] generation thread panicked");
            }
        }
        result
    }

    /// Waits up to `timeout` for the result.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<GenerationResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }

    /// The result, if it has already arrived.
    pub fn try_result(&self) -> Option<GenerationResult> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Gives up on the job. The worker thread runs to completion and its result is dropped.
    pub fn cancel(self) {
        tracing::debug!("[worker] job cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;

    fn job(generator: Generator) -> GenerationJob {
        GenerationJob {
            rows: 12,
            cols: 9,
            cell_size: 10,
            generator,
            seed: Some(31),
            snapshot_interval: 10,
        }
    }

    #[test]
    fn test_background_job_delivers_result() {
        let result = job(Generator::Kruskal).spawn().wait().unwrap();
        assert!(is_perfect_maze(&result.grid));
        assert_eq!(result.snapshots.last(), Some(&result.grid.create_snapshot()));
    }

    #[test]
    fn test_background_matches_foreground() {
        let background = job(Generator::HuntAndKill).spawn().wait().unwrap();
        let foreground = job(Generator::HuntAndKill).run();
        assert_eq!(background.grid, foreground.grid);
        assert_eq!(background.snapshots, foreground.snapshots);
    }

    #[test]
    fn test_cancel_discards_result() {
        let mut handle = job(Generator::RecurDiv).spawn();
        let thread = handle.handle.take().unwrap();
        handle.cancel();
        // The worker finds the receiver gone and exits cleanly
        assert!(thread.join().is_ok());

        let next = job(Generator::RecurDiv).spawn().wait().unwrap();
        assert!(is_perfect_maze(&next.grid));
    }

    #[test]
    fn test_wait_timeout() {
        let handle = job(Generator::Prim).spawn();
        let result = handle.wait_timeout(Duration::from_secs(30)).unwrap();
        assert_eq!(result.grid.link_count(), 12 * 9 - 1);
        assert!(handle.try_result().is_none());
    }
}
