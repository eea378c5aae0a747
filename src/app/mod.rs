mod history;
mod renderer;
pub mod worker;

use std::{
    io::{Stdout, Write},
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{RecvTimeoutError, Sender},
    },
    time::Duration,
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

pub use history::SnapshotHistory;
pub use renderer::{Frame, Renderer, Tile};
pub use worker::{GenerationJob, GenerationResult, JobHandle};

use crate::{
    generators::Generator,
    maze::{Grid, SnapshotRecorder},
    solvers::{Route, solve_maze},
};

enum UserInputEvent {
    KeyPress(event::KeyEvent),
    Resize,
}

#[derive(Debug)]
enum UserActionEvent {
    /// Pause or resume the animation
    TogglePause,
    /// Step forward in history when paused
    Forward,
    /// Step backward in history when paused
    Backward,
    /// Jump to the finished maze
    SkipToEnd,
    /// Increase animation speed
    SpeedUp,
    /// Decrease animation speed
    SlowDown,
    /// Terminal resize
    Resize,
    /// Cancel playback
    Cancel,
}

/// How a playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Completed,
    Cancelled,
}

/// What to generate and solve.
#[derive(Debug, Clone, Copy)]
pub struct MazeRequest {
    pub rows: usize,
    pub cols: usize,
    /// Ask the user to pick one when `None`
    pub generator: Option<Generator>,
    pub seed: Option<u64>,
    pub route: Route,
}

pub struct App {
    /// Time between two frames of the generation animation
    pub frame_interval: Duration,
    /// Fastest the animation may go
    pub min_frame_interval: Duration,
    /// Slowest the animation may go
    pub max_frame_interval: Duration,
    /// Record a snapshot every this many link changes, 0 to only keep the finished maze
    pub snapshot_interval: usize,
    /// Cell size carried by generated grids
    pub cell_size: u16,
    /// How often the input thread checks whether it should exit
    pub user_input_event_poll_timeout: Duration,
    /// Directory the log file is written to
    pub log_dir: PathBuf,
    pub log_file_name: &'static str,
}

impl Default for App {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(1000 / 60),
            min_frame_interval: Duration::from_millis(1),
            max_frame_interval: Duration::from_millis(500),
            snapshot_interval: SnapshotRecorder::DEFAULT_INTERVAL,
            cell_size: 10,
            user_input_event_poll_timeout: Duration::from_millis(100),
            log_dir: PathBuf::from("logs"),
            log_file_name: "mazeweave.log",
        }
    }
}

impl App {
    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn job(&self, request: &MazeRequest, generator: Generator) -> GenerationJob {
        GenerationJob {
            rows: request.rows,
            cols: request.cols,
            cell_size: self.cell_size,
            generator,
            seed: request.seed,
            snapshot_interval: self.snapshot_interval,
        }
    }

    /// Generates and solves a maze without touching the terminal.
    /// Returns the finished grid and the path along `request.route` as `(row, col)` cells.
    pub fn compute(
        &self,
        request: &MazeRequest,
        generator: Generator,
    ) -> Option<(Grid, Vec<(usize, usize)>)> {
        let result = self.job(request, generator).spawn().wait()?;
        let path = App::path_coords(&result.grid, request.route);
        Some((result.grid, path))
    }

    fn path_coords(grid: &Grid, route: Route) -> Vec<(usize, usize)> {
        solve_maze(grid, route)
            .into_iter()
            .map(|index| grid[index].coord())
            .collect()
    }

    /// Main interactive loop: pick a generator if needed, generate in the background,
    /// play the snapshots back and finally show the solved route.
    pub fn run(&self, stdout: &mut Stdout, request: MazeRequest) -> std::io::Result<()> {
        let generator = match request.generator {
            Some(generator) => generator,
            None => match App::select_generator(stdout)? {
                Some(generator) => generator,
                None => return Ok(()),
            },
        };
        tracing::info!(
            "[app] Generating {}x{} maze with {} (seed {:?})",
            request.rows,
            request.cols,
            generator,
            request.seed
        );

        let (width, height) = (request.cols * 2 + 1, request.rows * 2 + 1);
        let mut renderer = Renderer::new();
        if !Renderer::fits_terminal(width, height)? {
            renderer.draw_too_small(width, height)?;
            App::wait_for_esc()?;
            return Ok(());
        }

        stdout.execute(style::PrintStyledContent(
            format!("Generating maze with {}...\r\n", generator)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;
        let Some(result) = self.job(&request, generator).spawn().wait() else {
            tracing::error!("[app] generation worker exited without a result");
            return Ok(());
        };

        let Some(history) = SnapshotHistory::new(result.snapshots) else {
            return Ok(());
        };

        if let PlaybackStatus::Cancelled = self.play(&mut renderer, history)? {
            tracing::info!("[app] Playback was cancelled by user.");
            return Ok(());
        }

        let path = App::path_coords(&result.grid, request.route);
        let frame = Frame::new(&result.grid.create_snapshot(), &path);
        let status = match path.len() {
            0 => "No path found. Press Esc to exit...".to_string(),
            n => format!(
                "{}: path of {} steps. Press Esc to exit...",
                request.route,
                n - 1
            ),
        };
        renderer.draw(&frame, &status)?;

        App::wait_for_esc()?;
        Ok(())
    }

    /// Plays back `history` until the final snapshot has been shown or the user cancels.
    fn play(
        &self,
        renderer: &mut Renderer,
        mut history: SnapshotHistory,
    ) -> std::io::Result<PlaybackStatus> {
        // Flag to indicate playback is done. Set by this thread when it finishes.
        let playback_done = Arc::new(AtomicBool::new(false));

        let (user_input_event_tx, user_input_event_rx) =
            std::sync::mpsc::channel::<UserInputEvent>();
        let poll_timeout = self.user_input_event_poll_timeout;
        let done_for_input = playback_done.clone();
        // Spawn a thread to listen for user input
        let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            App::listen_to_user_input(user_input_event_tx, poll_timeout, &done_for_input)
        });

        renderer.clear()?;
        let mut frame_interval = self.frame_interval;
        let mut is_paused = false;
        let mut status = PlaybackStatus::Completed;

        App::draw_history(renderer, &history, is_paused)?;
        loop {
            let action = match user_input_event_rx.recv_timeout(frame_interval) {
                Ok(event) => App::map_user_input(event, is_paused),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    // Input thread has exited, keep playing without controls
                    std::thread::sleep(frame_interval);
                    None
                }
            };

            match action {
                Some(UserActionEvent::Cancel) => {
                    tracing::debug!("[playback] Esc key pressed, cancelling");
                    status = PlaybackStatus::Cancelled;
                    break;
                }
                Some(UserActionEvent::TogglePause) => {
                    is_paused = !is_paused;
                    App::draw_history(renderer, &history, is_paused)?;
                }
                Some(UserActionEvent::Forward) => {
                    if history.history_forward().is_some() {
                        App::draw_history(renderer, &history, is_paused)?;
                    }
                }
                Some(UserActionEvent::Backward) => {
                    if history.history_backward().is_some() {
                        App::draw_history(renderer, &history, is_paused)?;
                    }
                }
                Some(UserActionEvent::SkipToEnd) => {
                    history.skip_to_end();
                    App::draw_history(renderer, &history, is_paused)?;
                }
                Some(UserActionEvent::SpeedUp) => {
                    frame_interval = (frame_interval / 2).max(self.min_frame_interval);
                    tracing::debug!("[playback] frame interval now {:?}", frame_interval);
                }
                Some(UserActionEvent::SlowDown) => {
                    frame_interval = (frame_interval * 2).min(self.max_frame_interval);
                    tracing::debug!("[playback] frame interval now {:?}", frame_interval);
                }
                Some(UserActionEvent::Resize) => {
                    renderer.clear()?;
                    App::draw_history(renderer, &history, is_paused)?;
                }
                None if !is_paused => {
                    if history.history_forward().is_some() {
                        App::draw_history(renderer, &history, is_paused)?;
                    }
                }
                None => {}
            }

            if history.is_at_end() && !is_paused {
                break;
            }
        }

        // Signal the input thread to exit
        playback_done.store(true, Ordering::Relaxed);
        drop(user_input_event_rx);
        let _ = input_thread_handle.join();
        Ok(status)
    }

    fn draw_history(
        renderer: &mut Renderer,
        history: &SnapshotHistory,
        is_paused: bool,
    ) -> std::io::Result<()> {
        let frame = Frame::new(history.current(), &[]);
        let status = format!(
            "Step {}/{}{}  Space: pause  ←/→: step  ↑/↓: speed  End: skip  Esc: quit",
            history.position() + 1,
            history.len(),
            if is_paused { " (paused)" } else { "" }
        );
        renderer.draw(&frame, &status)
    }

    fn map_user_input(event: UserInputEvent, is_paused: bool) -> Option<UserActionEvent> {
        match event {
            UserInputEvent::KeyPress(key_event) => match key_event.code {
                KeyCode::Esc => Some(UserActionEvent::Cancel),
                KeyCode::Char(' ') | KeyCode::Enter => Some(UserActionEvent::TogglePause),
                KeyCode::Left if is_paused => Some(UserActionEvent::Backward),
                KeyCode::Right if is_paused => Some(UserActionEvent::Forward),
                KeyCode::End => Some(UserActionEvent::SkipToEnd),
                KeyCode::Up => Some(UserActionEvent::SpeedUp),
                KeyCode::Down => Some(UserActionEvent::SlowDown),
                _ => None,
            },
            UserInputEvent::Resize => Some(UserActionEvent::Resize),
        }
    }

    /// Listen for user input events (key presses and resize)
    /// This function runs in a separate thread, and is the only place where user input is read
    fn listen_to_user_input(
        user_input_event_tx: Sender<UserInputEvent>,
        event_poll_timeout: Duration,
        done: &AtomicBool,
    ) -> std::io::Result<()> {
        loop {
            if done.load(Ordering::Relaxed) {
                return Ok(());
            }

            // Poll for events with a timeout
            if !event::poll(event_poll_timeout)? {
                continue;
            }

            let input_event = match event::read()? {
                event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                    UserInputEvent::KeyPress(key_event)
                }
                event::Event::Resize(_, _) => UserInputEvent::Resize,
                _ => continue,
            };

            // Should exit input thread on Esc key
            let should_exit = matches!(
                input_event,
                UserInputEvent::KeyPress(event::KeyEvent {
                    code: KeyCode::Esc,
                    ..
                })
            );

            if user_input_event_tx.send(input_event).is_err() {
                // Receiver has been dropped, exit the thread
                return Ok(());
            }

            if should_exit {
                tracing::debug!("[input loop] Esc key pressed, exiting");
                return Ok(());
            }
        }
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Menu of all generators, with the info text of the highlighted one below it
    fn select_generator(stdout: &mut Stdout) -> std::io::Result<Option<Generator>> {
        App::select_from_menu(
            stdout,
            "Select maze generation algorithm (use arrow keys and Enter, or Esc to exit):",
            &Generator::ALL,
            |generator| generator.info(),
        )
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T, F>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
        describe: F,
    ) -> std::io::Result<Option<T>>
    where
        T: std::fmt::Display + Copy,
        F: Fn(T) -> &'static [&'static str],
    {
        if options.is_empty() {
            return Ok(None);
        }

        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            let (term_width, _) = terminal::size()?;

            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            // Print prompt
            stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

            // Print options
            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{}", option)))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n\r\n"))?;

            // Describe the highlighted option, one line per paragraph
            for line in describe(options[selected]) {
                let (line, _) = line.unicode_truncate(term_width as usize);
                stdout.queue(style::PrintStyledContent(
                    format!("{}\r\n", line).with(Color::DarkGrey),
                ))?;
            }

            stdout.flush()?;

            // Wait for key event
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    // Only handle key press events
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_perfect_maze;

    fn key(code: KeyCode) -> UserInputEvent {
        UserInputEvent::KeyPress(event::KeyEvent::new(code, event::KeyModifiers::NONE))
    }

    #[test]
    fn test_compute_solves_route() {
        let app = App::default();
        let request = MazeRequest {
            rows: 7,
            cols: 11,
            generator: None,
            seed: Some(8),
            route: Route::AntiDiagonal,
        };
        let (grid, path) = app.compute(&request, Generator::Sidewinder).unwrap();
        assert!(is_perfect_maze(&grid));
        assert_eq!(path.first(), Some(&(6, 0)));
        assert_eq!(path.last(), Some(&(0, 10)));
        assert_eq!(grid.cell_size(), app.cell_size);
    }

    #[test]
    fn test_stepping_only_while_paused() {
        assert!(App::map_user_input(key(KeyCode::Left), false).is_none());
        assert!(matches!(
            App::map_user_input(key(KeyCode::Left), true),
            Some(UserActionEvent::Backward)
        ));
        assert!(matches!(
            App::map_user_input(key(KeyCode::Right), true),
            Some(UserActionEvent::Forward)
        ));
        assert!(matches!(
            App::map_user_input(key(KeyCode::Esc), false),
            Some(UserActionEvent::Cancel)
        ));
        assert!(matches!(
            App::map_user_input(key(KeyCode::Char(' ')), false),
            Some(UserActionEvent::TogglePause)
        ));
    }
}
