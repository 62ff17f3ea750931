//! One-ply threat detection
//!
//! Looks only at the current legal moves, without recursion, to find columns
//! that win on the spot or must be played to stop the opponent from winning.

use tracing::{debug, trace};

use std::collections::BTreeSet;

use crate::board::{Board, Player};
use crate::game::GameState;
use crate::{HEIGHT, WIDTH};

/// A column that has to be played right now
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ForcedMove {
    /// Playing the column wins the game
    Win(usize),
    /// Playing the column stops a threat from the opponent
    Block(usize),
}

impl ForcedMove {
    pub fn column(&self) -> usize {
        match *self {
            ForcedMove::Win(column) | ForcedMove::Block(column) => column,
        }
    }
}

// legal columns where a tile for `player` would complete an alignment
fn completing_columns(state: &GameState, player: Player) -> BTreeSet<usize> {
    let board = state.board();
    state
        .legal_moves()
        .into_iter()
        .filter(|&column| board.is_winning_drop(column, player))
        .collect()
}

/// Columns where the player to move wins immediately
pub fn winning_moves(state: &GameState) -> BTreeSet<usize> {
    let moves = completing_columns(state, state.current_player());
    if !moves.is_empty() {
        debug!(player = %state.current_player(), ?moves, "winning moves found");
    }
    moves
}

/// Columns where the opponent would win with their next tile
pub fn immediate_blocks(state: &GameState) -> BTreeSet<usize> {
    completing_columns(state, state.current_player().other())
}

/// Columns the player to move should take away from the opponent
///
/// Contains every column of [`immediate_blocks`], plus a best-effort pick
/// against open twos on a row: an empty tile, two opponent tiles and an
/// empty tile. An open two gets one of its flanks if that flank can be
/// dropped into right now and there is further space beside the pattern. This second part is a heuristic and can both miss
/// and overstate real threats.
pub fn blocking_moves(state: &GameState) -> BTreeSet<usize> {
    let opponent = state.current_player().other();
    let mut moves = immediate_blocks(state);

    let legal = state.legal_moves();
    for (row, left, right) in open_twos(state.board(), opponent) {
        let board = state.board();
        let droppable = |column: usize| legal.contains(&column) && lands_on(board, row, column);
        let left_space = left > 0 && board.get(row, left - 1).is_empty();
        let right_space = right + 1 < WIDTH && board.get(row, right + 1).is_empty();
        trace!(row, left, right, left_space, right_space, "open two found");

        if !(left_space || right_space) {
            continue;
        }
        if droppable(left) {
            moves.insert(left);
        } else if droppable(right) {
            moves.insert(right);
        }
    }

    if !moves.is_empty() {
        debug!(player = %state.current_player(), ?moves, "blocking moves found");
    }
    moves
}

/// Picks the move the player to move cannot avoid: a win if there is one,
/// otherwise the lowest blocking column
///
/// A block against an immediate win always beats an open-two pick, whatever
/// their columns. A finished game has no forced move.
pub fn forced_move(state: &GameState) -> Option<ForcedMove> {
    if state.is_terminal() {
        return None;
    }
    if let Some(&column) = winning_moves(state).iter().next() {
        return Some(ForcedMove::Win(column));
    }
    let column = match immediate_blocks(state).iter().next() {
        Some(&column) => Some(column),
        None => blocking_moves(state).iter().next().cloned(),
    };
    column.map(ForcedMove::Block)
}

// a tile dropped in `column` comes to rest on `row`
fn lands_on(board: &Board, row: usize, column: usize) -> bool {
    board.drop_row(column) == Some(row)
}

// (row, left flank, right flank) of every `. X X .` pattern for `player`,
// scanning rows from the top down
fn open_twos(board: &Board, player: Player) -> Vec<(usize, usize, usize)> {
    let tile = player.cell();
    let mut found = Vec::new();
    for row in (0..HEIGHT).rev() {
        for left in 0..=WIDTH - 4 {
            let right = left + 3;
            if board.get(row, left).is_empty()
                && board.get(row, left + 1) == tile
                && board.get(row, left + 2) == tile
                && board.get(row, right).is_empty()
            {
                found.push((row, left, right));
            }
        }
    }
    found
}
