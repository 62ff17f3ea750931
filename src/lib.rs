//! A game-state engine and classical tree search agents for the board game 'Connect 4'
//!
//! Positions are immutable [`GameState`] values. The [`search`] module picks
//! moves with depth-bounded minimax, alpha-beta or expectiminimax, while the
//! [`threat`] module scans one ply ahead for forced wins and blocks.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{game::GameState, search::{best_move, Algorithm}, threat::winning_moves};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three tiles on the bottom row
//! let state = GameState::from_moves("041526")?;
//!
//! assert!(winning_moves(&state).contains(&3));
//! assert_eq!(best_move(&state, Algorithm::AlphaBeta, 2), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod game;

pub mod search;

pub mod threat;

pub mod strategy;

pub mod arena;

pub mod config;

mod test;

pub use board::{has_win_at, Board, Cell, Player};
pub use error::IllegalMove;
pub use game::{GameState, Outcome};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of moves after which a full board is a draw
pub const MAX_MOVES: usize = WIDTH * HEIGHT;

// an alignment of four must fit both across and up the board
const_assert!(WIDTH >= board::CONNECT && HEIGHT >= board::CONNECT);
// columns are parsed from single digits
const_assert!(WIDTH <= 10);

/// A fresh game: empty board, player one to move
pub fn new_game() -> GameState {
    GameState::new()
}
