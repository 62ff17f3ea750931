//! Command line configuration and its validation

use anyhow::Error;
use clap::{Args, Parser, Subcommand};

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::strategy::Strategy;
use crate::MAX_MOVES;

/// Search depth used when a strategy does not name one
pub const DEFAULT_DEPTH: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "connect4", version, about = "Play Connect 4 against tree search agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Pit two strategies against each other over many games
    Arena(ArenaArgs),
}

/// Who makes the moves for one side of the board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Seat {
    Human,
    Engine(Strategy),
}

impl FromStr for Seat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            Ok(Seat::Human)
        } else {
            Ok(Seat::Engine(s.parse()?))
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => write!(f, "human"),
            Seat::Engine(strategy) => write!(f, "{}", strategy),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// `human`, `threat`, `random` or `<minimax|alphabeta|expectiminimax>[:depth]`
    #[arg(long, env = "CONNECT4_PLAYER_ONE", default_value = "human")]
    pub player_one: Seat,

    /// Same choices as --player-one
    #[arg(long, env = "CONNECT4_PLAYER_TWO", default_value = "alphabeta:4")]
    pub player_two: Seat,

    /// Column digits (0-6) replayed before the game starts
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Pause between moves when both seats are engines, in milliseconds
    #[arg(long, env = "CONNECT4_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ArenaArgs {
    /// Strategy moving first in even games
    #[arg(long, env = "CONNECT4_FIRST", default_value = "alphabeta:4")]
    pub first: Strategy,

    /// Strategy moving first in odd games
    #[arg(long, env = "CONNECT4_SECOND", default_value = "threat")]
    pub second: Strategy,

    /// Number of games to play
    #[arg(long, short, default_value_t = 20)]
    pub games: usize,

    /// Random moves played at the start of every game so games differ
    #[arg(long, default_value_t = 2)]
    pub opening_plies: usize,

    /// Seed for the opening moves and random strategies
    #[arg(long, env = "CONNECT4_SEED", default_value_t = 0)]
    pub seed: u64,
}

/// Checked settings for a terminal game
#[derive(Clone, Debug)]
pub struct PlayConfig {
    pub seats: [Seat; 2],
    pub moves: String,
    pub delay_ms: u64,
}

/// Checked settings for an arena match
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub strategies: [Strategy; 2],
    pub games: usize,
    pub opening_plies: usize,
    pub seed: u64,
}

fn validate_strategy(strategy: &Strategy) -> Result<(), ConfigError> {
    match *strategy {
        Strategy::Search { depth, .. } if depth == 0 || depth > MAX_MOVES => {
            Err(ConfigError::Depth(depth))
        }
        _ => Ok(()),
    }
}

impl PlayArgs {
    pub fn validate(self) -> Result<PlayConfig, ConfigError> {
        for seat in [self.player_one, self.player_two].iter() {
            if let Seat::Engine(strategy) = seat {
                validate_strategy(strategy)?;
            }
        }
        Ok(PlayConfig {
            seats: [self.player_one, self.player_two],
            moves: self.moves,
            delay_ms: self.delay_ms,
        })
    }
}

impl ArenaArgs {
    pub fn validate(self) -> Result<ArenaConfig, ConfigError> {
        validate_strategy(&self.first)?;
        validate_strategy(&self.second)?;
        if self.games == 0 {
            return Err(ConfigError::NoGames);
        }
        if self.opening_plies >= MAX_MOVES {
            return Err(ConfigError::OpeningPlies(self.opening_plies));
        }
        Ok(ArenaConfig {
            strategies: [self.first, self.second],
            games: self.games,
            opening_plies: self.opening_plies,
            seed: self.seed,
        })
    }
}
