use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::Snapshot;

/// One character cell of a drawn maze. A maze of `rows x cols` cells is drawn as
/// `(2 * rows + 1) x (2 * cols + 1)` tiles: cells at odd coordinates, walls and corners between
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Route,
    Start,
    Goal,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    /// Single-character form used for plain text output.
    pub fn as_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => ' ',
            Tile::Route => '.',
            Tile::Start => 'S',
            Tile::Goal => 'G',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Route => "🟨".with(Color::Yellow),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Tiles of a snapshot, optionally with a path drawn over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Frame {
    /// Lays out the walls of `snapshot`, then draws `path` (as `(row, col)` cells) on top.
    pub fn new(snapshot: &Snapshot, path: &[(usize, usize)]) -> Self {
        let width = snapshot.cols() * 2 + 1;
        let height = snapshot.rows() * 2 + 1;
        let mut frame = Frame {
            tiles: vec![Tile::Empty; width * height],
            width,
            height,
        };

        // Corners between cells are always walls
        for y in (0..height).step_by(2) {
            for x in (0..width).step_by(2) {
                frame.set((x, y), Tile::Wall);
            }
        }

        for row in 0..snapshot.rows() {
            for col in 0..snapshot.cols() {
                let Some(walls) = snapshot.walls_at(row, col) else {
                    continue;
                };
                let (x, y) = (col * 2 + 1, row * 2 + 1);
                if walls.north {
                    frame.set((x, y - 1), Tile::Wall);
                }
                if walls.south {
                    frame.set((x, y + 1), Tile::Wall);
                }
                if walls.west {
                    frame.set((x - 1, y), Tile::Wall);
                }
                if walls.east {
                    frame.set((x + 1, y), Tile::Wall);
                }
            }
        }

        frame.draw_path(path);
        frame
    }

    fn draw_path(&mut self, path: &[(usize, usize)]) {
        let to_tile = |(row, col): (usize, usize)| (col * 2 + 1, row * 2 + 1);

        for pair in path.windows(2) {
            let (ax, ay) = to_tile(pair[0]);
            let (bx, by) = to_tile(pair[1]);
            self.set((ax, ay), Tile::Route);
            // The tile between two cells of the route
            self.set(((ax + bx) / 2, (ay + by) / 2), Tile::Route);
        }
        if let Some(&last) = path.last() {
            self.set(to_tile(last), Tile::Goal);
        }
        if let Some(&first) = path.first() {
            self.set(to_tile(first), Tile::Start);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn set(&mut self, coord: (usize, usize), tile: Tile) {
        let (x, y) = coord;
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        (x < self.width && y < self.height).then(|| self.tiles[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    /// The frame as plain text, one line per tile row.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            text.extend(row.iter().map(|tile| tile.as_char()));
            text.push('\n');
        }
        text
    }
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
}

impl Renderer {
    /// Rows kept free below the maze for the status line and key help.
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
        }
    }

    /// Checks if the terminal can show a frame of the given tile dimensions.
    pub fn fits_terminal(width: usize, height: usize) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(width * Tile::WIDTH as usize <= term_width as usize
            && height + Renderer::NUM_STATUS_ROWS as usize <= term_height as usize)
    }

    /// Prints a warning that the terminal is too small for the maze.
    pub fn draw_too_small(&mut self, width: usize, height: usize) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let msg = format!(
            "Terminal size ({}x{}) is too small for the maze ({}x{}) to display. Please resize the terminal or pick a smaller maze.\r\n",
            term_width,
            term_height,
            width * Tile::WIDTH as usize,
            height + Renderer::NUM_STATUS_ROWS as usize,
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()
    }

    /// Draws `frame` at the top-left corner with `status` on the line below it.
    pub fn draw(&mut self, frame: &Frame, status: &str) -> std::io::Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for row in frame.rows() {
            for tile in row {
                self.stdout.queue(style::Print(tile))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        queue!(
            self.stdout,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(Color::Cyan).attribute(Attribute::Bold)),
        )?;
        self.stdout.flush()
    }

    /// Clears the screen.
    pub fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        self.stdout.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
