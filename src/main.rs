use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use connect4_engine::{
    arena::run_match,
    config::{ArenaConfig, Cli, Command, PlayConfig, Seat},
    *,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play(args) => play(args.validate()?),
        Command::Arena(args) => arena(args.validate()?),
    }
}

fn arena(config: ArenaConfig) -> Result<()> {
    let [first, second] = config.strategies;
    println!("{} vs {}, {} games\n", first, second, config.games);

    let result = run_match(&config)?;

    println!("{} wins: {}", first, result.first_wins);
    println!("{} wins: {}", second, result.second_wins);
    println!("Draws: {}", result.draws);
    Ok(())
}

fn play(config: PlayConfig) -> Result<()> {
    let mut state = GameState::from_moves(&config.moves)?;
    let mut rng = rand::thread_rng();
    let stdin = stdin();

    let both_engines = config
        .seats
        .iter()
        .all(|seat| matches!(seat, Seat::Engine(_)));

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        // terminals without cursor support get the plain text board
        if state.board().display().is_err() {
            println!("{}\n", state.board());
        }

        match state.outcome() {
            Outcome::InProgress => {
                let player = state.current_player();
                let seat = match player {
                    Player::One => config.seats[0],
                    Player::Two => config.seats[1],
                };

                let next_move = match seat {
                    Seat::Engine(strategy) => {
                        println!("{} ({}) is thinking...", player, strategy);
                        stdout().flush()?;

                        // slow down play if both players are engines
                        if both_engines {
                            std::thread::sleep(std::time::Duration::from_millis(config.delay_ms));
                        }

                        match strategy.choose(&state, &mut rng) {
                            Some(column) => {
                                println!("Best move: {}", column);
                                column
                            }
                            None => {
                                println!("{} cannot move", player);
                                break;
                            }
                        }
                    }
                    Seat::Human => {
                        print!("{} move input > ", player);
                        stdout().flush()?;
                        let mut input_str = String::new();
                        if stdin.read_line(&mut input_str)? == 0 {
                            // end of input
                            break;
                        }

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                match state.apply_move(next_move) {
                    Ok(next) => state = next,
                    Err(err) => {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
            }

            // end states
            Outcome::WonBy(winner) => {
                println!("{} wins!", winner);
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
