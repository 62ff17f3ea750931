use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{HEIGHT, WIDTH};

/// Number of aligned tiles needed to win
pub const CONNECT: usize = 4;

// (row step, column step) for horizontal, vertical, diagonal \ and diagonal /
const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'R',
            Cell::PlayerTwo => 'Y',
            Cell::Empty => '.',
        }
    }

    fn color(&self) -> Color {
        match self {
            Cell::PlayerOne => Color::Red,
            Cell::PlayerTwo => Color::Yellow,
            Cell::Empty => Color::DarkBlue,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// A 6x7 grid of tiles where row 0 is the bottom row
///
/// Tiles only ever enter a column at its lowest empty row, so every column
/// is a run of occupied tiles followed by a run of empty ones.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Returns the tile at `row` (0 = bottom) and `column` (0 = left)
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    /// Number of tiles stacked in a column
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The row a tile dropped in `column` would land on, if the column has room
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if self.playable(column) {
            Some(self.heights[column])
        } else {
            None
        }
    }

    pub fn num_tiles(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.playable(column))
    }

    /// Drops a tile for `player` into a column and returns the row it landed on
    ///
    /// The caller must ensure the column is playable.
    pub(crate) fn place(&mut self, column: usize, player: Player) -> usize {
        let row = self.heights[column];
        self.cells[column + WIDTH * row] = player.cell();
        self.heights[column] += 1;
        row
    }

    /// Copy of the board with a tile for `player` dropped in `column`, along
    /// with the row it landed on
    pub fn with_tile(&self, column: usize, player: Player) -> Option<(Board, usize)> {
        if !self.playable(column) {
            return None;
        }
        let mut next = *self;
        let row = next.place(column, player);
        Some((next, row))
    }

    /// Checks whether dropping a tile for `player` in `column` would win
    pub fn is_winning_drop(&self, column: usize, player: Player) -> bool {
        match self.with_tile(column, player) {
            Some((next, row)) => has_win_at(&next, row, column),
            None => false,
        }
    }

    /// Draws the board in colour at the cursor, bottom row just above the
    /// column numbers
    ///
    /// Fails if the terminal reports no cursor position or is too short to
    /// hold the board.
    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        // make room for the grid, then draw over it
        for _ in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        let (origin_x, below) = crossterm::cursor::position()?;

        let lines = (0..HEIGHT)
            .map(|row| screen_line(below, row))
            .collect::<Option<Vec<u16>>>()
            .ok_or_else(|| anyhow!("terminal too short to draw {} rows", HEIGHT))?;

        for (row, &line) in lines.iter().enumerate() {
            for column in 0..WIDTH {
                stdout.queue(MoveTo(origin_x + column as u16, line))?.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(self.get(row, column).color()),
                ))?;
            }
        }

        let footer: String = (0..WIDTH).map(|column| column.to_string()).collect();
        stdout
            .queue(MoveTo(origin_x, below))?
            .queue(PrintStyledContent(style(footer + "\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

// screen line of board `row` when `below` is the line right under the grid
fn screen_line(below: u16, row: usize) -> Option<u16> {
    below.checked_sub(row as u16 + 1)
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    // top row first, so the text reads the way the board stands
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            write!(f, "{}|", row)?;
            for column in 0..WIDTH {
                write!(f, " {}", self.get(row, column).symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for column in 0..WIDTH {
            write!(f, " {}", column)?;
        }
        Ok(())
    }
}

/// Checks whether the tile at (`row`, `column`) is part of an alignment of
/// [`CONNECT`] tiles of the same player
///
/// Meant to be called right after the tile was placed. An empty tile never wins.
pub fn has_win_at(board: &Board, row: usize, column: usize) -> bool {
    let player = board.get(row, column);
    if player.is_empty() {
        return false;
    }

    for &(dy, dx) in AXES.iter() {
        let mut run = 1;
        for &sign in [-1i32, 1].iter() {
            let mut y = row as i32 + sign * dy;
            let mut x = column as i32 + sign * dx;
            while y >= 0
                && y < HEIGHT as i32
                && x >= 0
                && x < WIDTH as i32
                && board.get(y as usize, x as usize) == player
            {
                run += 1;
                y += sign * dy;
                x += sign * dx;
            }
        }
        if run >= CONNECT {
            return true;
        }
    }

    false
}
