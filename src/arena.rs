//! Matches between two strategies, played in parallel

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::board::Player;
use crate::config::ArenaConfig;
use crate::game::{GameState, Outcome};
use crate::strategy::Strategy;

/// Tally of a match, from the point of view of the first configured strategy
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct MatchResult {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl MatchResult {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }
}

/// Plays one game to the end, `players[0]` moving first
///
/// The first `opening_plies` moves are uniformly random so that deterministic
/// strategies do not replay the same game every time.
pub fn play_game<R: Rng + ?Sized>(
    players: [Strategy; 2],
    opening_plies: usize,
    rng: &mut R,
) -> Result<GameState> {
    let mut state = GameState::new();

    while state.moves_played() < opening_plies && !state.is_terminal() {
        match state.legal_moves().choose(rng) {
            Some(&column) => state = state.apply_move(column)?,
            None => break,
        }
    }

    while !state.is_terminal() {
        let strategy = match state.current_player() {
            Player::One => players[0],
            Player::Two => players[1],
        };
        match strategy.choose(&state, rng) {
            Some(column) => state = state.apply_move(column)?,
            None => break,
        }
    }
    Ok(state)
}

/// Plays every game of a match, swapping who moves first after each game
pub fn run_match(config: &ArenaConfig) -> Result<MatchResult> {
    let [first, second] = config.strategies;

    let progress = ProgressBar::new(config.games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing {msg}: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    progress.set_message(&format!("{} vs {}", first, second));

    // per game: whether the first strategy won, None on a draw
    let outcomes = (0..config.games)
        .into_par_iter()
        .map(|game| -> Result<Option<bool>> {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(game as u64));
            let first_moves_first = game % 2 == 0;
            let players = if first_moves_first {
                [first, second]
            } else {
                [second, first]
            };

            let state = play_game(players, config.opening_plies, &mut rng)?;
            progress.inc(1);

            let first_won = match state.outcome() {
                Outcome::WonBy(Player::One) => Some(first_moves_first),
                Outcome::WonBy(Player::Two) => Some(!first_moves_first),
                Outcome::Draw | Outcome::InProgress => None,
            };
            debug!(game, moves = state.moves_played(), ?first_won, "game finished");
            Ok(first_won)
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();

    let mut result = MatchResult::default();
    for first_won in outcomes {
        match first_won {
            Some(true) => result.first_wins += 1,
            Some(false) => result.second_wins += 1,
            None => result.draws += 1,
        }
    }
    Ok(result)
}
