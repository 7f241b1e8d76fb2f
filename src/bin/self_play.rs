//! Self-play runner.
//!
//! Plays the negamax engine (light) against a selectable opponent (dark) from
//! the standard start position through the game controller and logs every
//! move.
//!
//! Usage:
//! `SZACHY_DEPTH=3 SZACHY_PLIES=80 RUST_LOG=info cargo run --release --bin self_play`
//!
//! `SZACHY_OPPONENT=random` swaps the dark negamax engine for the random one;
//! `SZACHY_SEED` makes its choices reproducible.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use szachy::controller::game_controller::GameController;
use szachy::engines::engine_negamax::NegamaxEngine;
use szachy::engines::engine_random::RandomEngine;
use szachy::engines::engine_trait::Engine;
use szachy::errors::{ChessError, ChessResult};
use szachy::game_state::chess_types::Team;

const DEFAULT_DEPTH: u8 = 3;
const DEFAULT_PLIES: u32 = 200;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(%name, %raw, "unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn build_opponent() -> Box<dyn Engine> {
    let choice = env::var("SZACHY_OPPONENT").unwrap_or_default();
    match choice.trim().to_ascii_lowercase().as_str() {
        "random" => match env::var("SZACHY_SEED").ok().and_then(|raw| raw.trim().parse().ok()) {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
        "" | "negamax" => Box::new(NegamaxEngine::default()),
        other => {
            warn!(opponent = other, "unknown opponent, using negamax");
            Box::new(NegamaxEngine::default())
        }
    }
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let depth = env_or("SZACHY_DEPTH", DEFAULT_DEPTH);
    let max_plies = env_or("SZACHY_PLIES", DEFAULT_PLIES);
    let mut opponent = build_opponent();
    info!(depth, max_plies, opponent = opponent.name(), "starting self-play");

    let mut controller = GameController::new();

    for ply in 0..max_plies {
        let request = match controller.game_state().side_to_move() {
            Team::Light => controller.request_ai_move(depth)?,
            Team::Dark => controller.request_move_from(opponent.as_mut(), depth)?,
        };
        let Some((mover, to)) = request else {
            info!(ply, "side to move has no legal move");
            break;
        };
        let Some(from) = controller
            .game_state()
            .board()
            .piece(mover)
            .map(|piece| piece.position)
        else {
            return Err(ChessError::InvariantViolation(format!(
                "engine chose unknown piece {}",
                mover.index()
            )));
        };

        match controller.commit_move(from, to) {
            Ok(true) => {}
            Ok(false) => return Err(ChessError::IllegalMove { from, to }),
            Err(ChessError::KingCaptured { winner }) => {
                info!(%winner, "king captured");
                break;
            }
            Err(err) => return Err(err),
        }

        if controller.status().is_some() {
            break;
        }
    }

    info!(
        outcome = ?controller.status(),
        plies = controller.game_state().history().len(),
        "self-play finished\n{}",
        controller.game_state()
    );
    Ok(())
}
