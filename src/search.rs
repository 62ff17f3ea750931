//! Depth-bounded game tree search
//!
//! Three interchangeable algorithms score positions from the point of view of
//! a fixed root player: plain minimax, minimax with alpha-beta pruning, and
//! expectiminimax, where the opponent is modelled as picking uniformly at random.

use anyhow::{anyhow, Error};
use tracing::{debug, trace};

use std::fmt;
use std::str::FromStr;

use crate::board::Player;
use crate::game::{GameState, Outcome};

/// Score of a position won by the root player
pub const WIN_SCORE: i32 = 1000;
/// Score of a position lost by the root player
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// Score of a drawn position, or of any unfinished position at the search horizon
pub const DRAW_SCORE: i32 = 0;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Expectiminimax,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Minimax,
        Algorithm::AlphaBeta,
        Algorithm::Expectiminimax,
    ];
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            "expectiminimax" => Ok(Algorithm::Expectiminimax),
            _ => Err(anyhow!("unknown search algorithm '{}'", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alphabeta"),
            Algorithm::Expectiminimax => write!(f, "expectiminimax"),
        }
    }
}

/// Role of a node in an expectiminimax tree
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NodeKind {
    /// The root player picks the best child
    Max,
    /// The opponent picks the worst child for the root player
    ///
    /// Only ever an entry kind: the recursion below a max node always uses
    /// chance nodes, so a min node is searched only when a caller asks for one.
    Min,
    /// The opponent picks uniformly at random, children are averaged
    Chance,
}

/// Scores a position for `root` using only its outcome
///
/// There is no positional heuristic: unfinished positions score as a draw.
pub fn evaluate(state: &GameState, root: Player) -> i32 {
    match state.outcome() {
        Outcome::WonBy(winner) if winner == root => WIN_SCORE,
        Outcome::WonBy(_) => LOSS_SCORE,
        Outcome::Draw | Outcome::InProgress => DRAW_SCORE,
    }
}

// every state reachable in one move, in ascending column order
fn children(state: &GameState) -> impl Iterator<Item = (usize, GameState)> + '_ {
    state
        .legal_moves()
        .into_iter()
        .filter_map(move |column| state.apply_move(column).ok().map(|next| (column, next)))
}

/// Searches the game tree below a position on behalf of the player to move
///
/// The root player is captured at construction and stays fixed through every
/// level of recursion; only the maximising/minimising role alternates.
#[derive(Clone)]
pub struct Searcher {
    state: GameState,
    root: Player,

    /// The number of nodes visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` for the player to move in `state`
    pub fn new(state: GameState) -> Self {
        Self {
            root: state.current_player(),
            state,
            node_count: 0,
        }
    }

    /// The player whose score is maximised
    pub fn root_player(&self) -> Player {
        self.root
    }

    /// Plain minimax value of `state` searched `depth` plies deep
    pub fn minimax(&mut self, state: &GameState, depth: usize, maximizing: bool) -> i32 {
        self.node_count += 1;

        if state.is_terminal() || depth == 0 {
            return evaluate(state, self.root);
        }

        let mut best = None;
        for (_, next) in children(state) {
            let score = self.minimax(&next, depth - 1, !maximizing);
            best = Some(match best {
                None => score,
                Some(best) if maximizing => score.max(best),
                Some(best) => score.min(best),
            });
        }
        best.unwrap_or_else(|| evaluate(state, self.root))
    }

    /// Minimax value of `state` with alpha-beta pruning
    ///
    /// Siblings are skipped once `beta <= alpha`, which never changes the
    /// value of a node searched with a window containing it.
    pub fn alphabeta(
        &mut self,
        state: &GameState,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        if state.is_terminal() || depth == 0 {
            return evaluate(state, self.root);
        }

        let mut best = None;
        for (_, next) in children(state) {
            let score = self.alphabeta(&next, depth - 1, alpha, beta, !maximizing);
            if maximizing {
                best = Some(best.map_or(score, |best: i32| best.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |best: i32| best.min(score)));
                beta = beta.min(score);
            }
            if beta <= alpha {
                // prune the remaining siblings
                break;
            }
        }
        best.unwrap_or_else(|| evaluate(state, self.root))
    }

    /// Expectiminimax value of `state` for a node of the given kind
    ///
    /// Max nodes are followed by chance nodes, min and chance nodes by max nodes.
    pub fn expectiminimax(&mut self, state: &GameState, depth: usize, kind: NodeKind) -> f64 {
        self.node_count += 1;

        if state.is_terminal() || depth == 0 {
            return evaluate(state, self.root) as f64;
        }

        let next_kind = match kind {
            NodeKind::Max => NodeKind::Chance,
            NodeKind::Min | NodeKind::Chance => NodeKind::Max,
        };
        let scores: Vec<f64> = children(state)
            .map(|(_, next)| self.expectiminimax(&next, depth - 1, next_kind))
            .collect();

        if scores.is_empty() {
            return evaluate(state, self.root) as f64;
        }
        match kind {
            NodeKind::Max => scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            NodeKind::Min => scores.iter().cloned().fold(f64::INFINITY, f64::min),
            NodeKind::Chance => scores.iter().sum::<f64>() / scores.len() as f64,
        }
    }

    /// Finds the best move for the root player, along with its score
    ///
    /// Each legal move is scored one ply deeper with the opponent's role. The
    /// first column reaching the best score wins ties. Returns `None` if the
    /// game is over or there are no legal moves.
    pub fn best_move_with_score(&mut self, algorithm: Algorithm, depth: usize) -> Option<(usize, f64)> {
        let state = self.state;
        if state.is_terminal() {
            debug!(%algorithm, depth, outcome = ?state.outcome(), "game already over");
            return None;
        }
        let child_depth = depth.saturating_sub(1);

        let mut best: Option<(usize, f64)> = None;
        let mut alpha = i32::MIN;
        for (column, next) in children(&state) {
            let score = match algorithm {
                Algorithm::Minimax => self.minimax(&next, child_depth, false) as f64,
                Algorithm::AlphaBeta => {
                    let score = self.alphabeta(&next, child_depth, alpha, i32::MAX, false);
                    alpha = alpha.max(score);
                    score as f64
                }
                Algorithm::Expectiminimax => {
                    self.expectiminimax(&next, child_depth, NodeKind::Chance)
                }
            };
            trace!(%algorithm, column, score, "scored root move");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }

        match best {
            Some((column, score)) => debug!(
                %algorithm,
                depth,
                column,
                score,
                nodes = self.node_count,
                "best move found"
            ),
            None => debug!(%algorithm, depth, "no legal moves"),
        }
        best
    }

    /// Finds the best column for the root player, or `None` if it cannot move
    pub fn best_move(&mut self, algorithm: Algorithm, depth: usize) -> Option<usize> {
        self.best_move_with_score(algorithm, depth)
            .map(|(column, _)| column)
    }
}

impl std::ops::Deref for Searcher {
    type Target = GameState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

/// Picks the best column for the player to move in `state`
///
/// `None` means the player cannot move, and is never a column.
pub fn best_move(state: &GameState, algorithm: Algorithm, depth: usize) -> Option<usize> {
    Searcher::new(*state).best_move(algorithm, depth)
}
