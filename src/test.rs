#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use proptest::prelude::*;

    use std::collections::BTreeSet;

    use crate::search::{best_move, Algorithm};
    use crate::threat::{blocking_moves, winning_moves};
    use crate::{new_game, GameState, Outcome, Player, HEIGHT, MAX_MOVES, WIDTH};

    // a game that fills the board without either player aligning four
    const DRAWN_GAME: &str = "131111135230432552606400042630542244655663";

    // replays columns from a fresh game, skipping illegal ones and stopping at the end of the game
    fn replay(columns: &[usize]) -> (GameState, usize) {
        let mut state = new_game();
        let mut applied = 0;
        for &column in columns {
            if state.is_terminal() {
                break;
            }
            if let Ok(next) = state.apply_move(column) {
                state = next;
                applied += 1;
            }
        }
        (state, applied)
    }

    #[test]
    pub fn empty_board_search_ties_to_leftmost_column() {
        // no game can end within four plies of the opening and only finished
        // games score, so every column ties and the left-most one is kept
        let state = new_game();
        for &algorithm in Algorithm::ALL.iter() {
            assert_eq!(best_move(&state, algorithm, 4), Some(0), "{}", algorithm);
        }
    }

    #[test]
    pub fn three_in_a_row_is_completed() -> Result<()> {
        // player one on columns 0, 1, 2 of the bottom row, column 3 empty
        let state = GameState::from_moves("001122")?;
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(winning_moves(&state), [3].iter().cloned().collect::<BTreeSet<_>>());

        for &algorithm in Algorithm::ALL.iter() {
            for depth in 1..=3 {
                assert_eq!(best_move(&state, algorithm, depth), Some(3));
            }
        }
        Ok(())
    }

    #[test]
    pub fn three_in_a_row_is_blocked() -> Result<()> {
        // player two on columns 0, 1, 2 of the bottom row, player one to move
        let state = GameState::from_moves("606152")?;
        assert_eq!(state.current_player(), Player::One);
        assert!(blocking_moves(&state).contains(&3));
        Ok(())
    }

    #[test]
    pub fn full_board_is_a_draw() -> Result<()> {
        let state = GameState::from_moves(DRAWN_GAME)?;
        assert_eq!(state.outcome(), Outcome::Draw);
        assert_eq!(state.moves_played(), MAX_MOVES);
        assert!(state.board().is_full());
        assert!(state.legal_moves().is_empty());
        for &algorithm in Algorithm::ALL.iter() {
            assert_eq!(best_move(&state, algorithm, 3), None);
        }
        assert!(winning_moves(&state).is_empty());
        assert!(blocking_moves(&state).is_empty());
        Ok(())
    }

    #[test]
    pub fn last_move_draws() -> Result<()> {
        let state = GameState::from_moves(&DRAWN_GAME[..MAX_MOVES - 1])?;
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert_eq!(state.legal_moves().len(), 1);
        let column = state.legal_moves()[0];
        assert_eq!(best_move(&state, Algorithm::Expectiminimax, 4), Some(column));
        assert_eq!(state.apply_move(column)?.outcome(), Outcome::Draw);
        Ok(())
    }

    #[test]
    pub fn first_of_several_wins_is_taken() -> Result<()> {
        // player one holds 1, 2 and 3 on the bottom row, player two stacks column 6
        let state = GameState::from_moves("162636")?;
        assert_eq!(winning_moves(&state), [0, 4].iter().cloned().collect::<BTreeSet<_>>());
        assert_eq!(best_move(&state, Algorithm::Minimax, 3), Some(0));
        Ok(())
    }

    proptest! {
        #[test]
        fn legal_moves_are_open_columns(columns in prop::collection::vec(0..WIDTH, 0..40)) {
            let (state, applied) = replay(&columns);

            prop_assert_eq!(state.moves_played(), applied);
            prop_assert_eq!(state.board().num_tiles(), applied);

            // finished games included: only the grid decides which columns are open
            let legal = state.legal_moves();
            prop_assert!(legal.windows(2).all(|pair| pair[0] < pair[1]));
            let full = (0..WIDTH).filter(|&c| state.board().height(c) == HEIGHT).count();
            prop_assert_eq!(legal.len(), WIDTH - full);
            for &column in legal.iter() {
                prop_assert!(state.board().get(HEIGHT - 1, column).is_empty());
            }
        }

        #[test]
        fn gravity_holds(columns in prop::collection::vec(0..WIDTH, 0..42)) {
            let (state, _) = replay(&columns);
            for column in 0..WIDTH {
                let height = state.board().height(column);
                for row in 0..HEIGHT {
                    prop_assert_eq!(state.board().get(row, column).is_empty(), row >= height);
                }
            }
        }

        #[test]
        fn alphabeta_picks_the_minimax_move(
            columns in prop::collection::vec(0..WIDTH, 0..24),
            depth in 1usize..=4,
        ) {
            let (state, _) = replay(&columns);
            prop_assert_eq!(
                best_move(&state, Algorithm::AlphaBeta, depth),
                best_move(&state, Algorithm::Minimax, depth)
            );
        }

        #[test]
        fn search_returns_a_legal_column(
            columns in prop::collection::vec(0..WIDTH, 0..42),
            depth in 1usize..=3,
        ) {
            let (state, _) = replay(&columns);
            for &algorithm in Algorithm::ALL.iter() {
                match best_move(&state, algorithm, depth) {
                    Some(column) => {
                        prop_assert!(state.legal_moves().contains(&column))
                    }
                    None => {
                        prop_assert!(state.is_terminal())
                    }
                }
            }
        }

        #[test]
        fn winning_moves_end_the_game(columns in prop::collection::vec(0..WIDTH, 0..42)) {
            let (state, _) = replay(&columns);
            if state.is_terminal() {
                return Ok(());
            }
            for column in state.legal_moves() {
                let next = state.apply_move(column).expect("legal move");
                let wins = next.outcome() == Outcome::WonBy(state.current_player());
                prop_assert_eq!(winning_moves(&state).contains(&column), wins);
            }
        }
    }
}
