use anyhow::{anyhow, Result};

use crate::board::{has_win_at, Board, Player};
use crate::error::IllegalMove;
use crate::{MAX_MOVES, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    InProgress,
    WonBy(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// A snapshot of a game: the grid, whose turn it is and how the game stands
///
/// States are values. Every transition returns a fresh state, so a search can
/// branch many futures off the same ancestor.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Outcome,
    moves_played: usize,
}

impl GameState {
    /// An empty board with player one to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::One,
            outcome: Outcome::InProgress,
            moves_played: 0,
        }
    }

    /// Replays a sequence of 0-indexed column digits from the start of a game
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut state = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column < WIDTH => {
                    state = state.apply_move(column).map_err(|err| {
                        anyhow!("invalid move '{}' after {} moves: {}", column_char, state.moves_played, err)
                    })?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Columns with room for another tile, in ascending order
    ///
    /// Only the grid is consulted, so a won game still lists its open columns;
    /// [`GameState::apply_move`] is what refuses moves once the game is over.
    /// The order doubles as the tie-break order of every search.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.board.playable(column)).collect()
    }

    /// Drops the current player's tile into `column` and returns the resulting state
    pub fn apply_move(&self, column: usize) -> Result<Self, IllegalMove> {
        if self.is_terminal() {
            return Err(IllegalMove::GameOver);
        }
        if column >= WIDTH {
            return Err(IllegalMove::ColumnOutOfRange { column });
        }
        if !self.board.playable(column) {
            return Err(IllegalMove::ColumnFull { column });
        }

        let mut next = *self;
        let row = next.board.place(column, self.current_player);
        next.moves_played += 1;

        if has_win_at(&next.board, row, column) {
            next.outcome = Outcome::WonBy(self.current_player);
        } else if next.moves_played == MAX_MOVES {
            next.outcome = Outcome::Draw;
        } else {
            next.current_player = self.current_player.other();
        }
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
