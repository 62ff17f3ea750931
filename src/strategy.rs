//! The closed set of move-picking policies an engine player can use

use anyhow::{anyhow, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use std::fmt;
use std::str::FromStr;

use crate::game::GameState;
use crate::search::{Algorithm, Searcher};
use crate::threat::forced_move;

/// Columns from the middle outwards, as the middle columns are often better moves
pub const CENTER_PREFERENCE: [usize; crate::WIDTH] = [3, 2, 4, 1, 5, 0, 6];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// Tree search with one of the search algorithms
    Search { algorithm: Algorithm, depth: usize },
    /// Forced win or block when there is one, otherwise the most central column
    Threat,
    /// A uniformly random legal column
    Random,
}

impl Strategy {
    /// Picks a column for the player to move, or `None` if it cannot move
    pub fn choose<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        match *self {
            Strategy::Search { algorithm, depth } => {
                Searcher::new(*state).best_move(algorithm, depth)
            }
            Strategy::Threat => match forced_move(state) {
                Some(forced) => {
                    debug!(?forced, "playing forced move");
                    Some(forced.column())
                }
                None => center_preference(state),
            },
            Strategy::Random => state.legal_moves().choose(rng).cloned(),
        }
    }
}

/// The most central legal column
pub fn center_preference(state: &GameState) -> Option<usize> {
    let legal = state.legal_moves();
    CENTER_PREFERENCE
        .iter()
        .find(|column| legal.contains(column))
        .cloned()
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses `threat`, `random`, or `<algorithm>[:<depth>]` with a default depth of 4
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threat" => Ok(Strategy::Threat),
            "random" => Ok(Strategy::Random),
            other => {
                let mut parts = other.splitn(2, ':');
                let algorithm = parts.next().unwrap_or_default().parse()?;
                let depth = match parts.next() {
                    Some(depth) => depth
                        .parse()
                        .map_err(|_| anyhow!("could not parse '{}' as a search depth", depth))?,
                    None => crate::config::DEFAULT_DEPTH,
                };
                Ok(Strategy::Search { algorithm, depth })
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Search { algorithm, depth } => write!(f, "{}:{}", algorithm, depth),
            Strategy::Threat => write!(f, "threat"),
            Strategy::Random => write!(f, "random"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn center_preference_skips_full_columns() -> Result<()> {
        assert_eq!(center_preference(&GameState::new()), Some(3));
        let state = GameState::from_moves("333333")?;
        assert_eq!(center_preference(&state), Some(2));
        Ok(())
    }

    #[test]
    fn threat_strategy_prefers_forced_moves() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let win = GameState::from_moves("001122")?;
        assert_eq!(Strategy::Threat.choose(&win, &mut rng), Some(3));

        let block = GameState::from_moves("6263")?;
        assert_eq!(Strategy::Threat.choose(&block, &mut rng), Some(1));

        assert_eq!(Strategy::Threat.choose(&GameState::new(), &mut rng), Some(3));

        // the open-two flank on column 0 must not hide the block on column 5
        let both = GameState::from_moves("6162152515")?;
        assert_eq!(Strategy::Threat.choose(&both, &mut rng), Some(5));
        Ok(())
    }

    #[test]
    fn random_strategy_plays_legal_columns() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let state = GameState::from_moves("000000")?;
        for _ in 0..50 {
            let column = Strategy::Random.choose(&state, &mut rng);
            assert!(matches!(column, Some(1..=6)));
        }
        Ok(())
    }

    #[test]
    fn finished_games_have_no_choice() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let won = GameState::from_moves("0101010")?;
        for strategy in [
            Strategy::Threat,
            Strategy::Random,
            Strategy::Search { algorithm: Algorithm::Minimax, depth: 2 },
        ]
        .iter()
        {
            assert_eq!(strategy.choose(&won, &mut rng), None, "{}", strategy);
        }
        Ok(())
    }

    #[test]
    fn parses_strategies() -> Result<()> {
        assert_eq!("threat".parse::<Strategy>()?, Strategy::Threat);
        assert_eq!(
            "minimax:2".parse::<Strategy>()?,
            Strategy::Search { algorithm: Algorithm::Minimax, depth: 2 }
        );
        assert_eq!(
            "alphabeta".parse::<Strategy>()?,
            Strategy::Search { algorithm: Algorithm::AlphaBeta, depth: 4 }
        );
        assert!("alphabeta:deep".parse::<Strategy>().is_err());
        assert!("gemini".parse::<Strategy>().is_err());

        let strategy = Strategy::Search { algorithm: Algorithm::Expectiminimax, depth: 3 };
        assert_eq!(strategy.to_string().parse::<Strategy>()?, strategy);
        Ok(())
    }
}
