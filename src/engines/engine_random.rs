//! Random-move engine.
//!
//! Selects uniformly from legal moves and is used as a baseline opponent and
//! for randomized playout tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{generate_moves, MoveLegality};
use crate::moves::piece_capability::PieceCapability;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "szachy random"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        capability: &dyn PieceCapability,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let legal_moves = generate_moves(game_state, capability, MoveLegality::Strict);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("random_engine requested_depth {depth} ignored"));
        }

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::chess_types::{PieceKind, Square, Team};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::{generate_moves, MoveLegality};
    use crate::moves::piece_capability::StandardPieceCapability;

    #[test]
    fn picks_a_legal_move() {
        let mut game = GameState::new_game();
        let legal = generate_moves(&game, &StandardPieceCapability, MoveLegality::Strict);
        let mut engine = RandomEngine::new();
        let out = engine
            .choose_move(&mut game, &StandardPieceCapability, &GoParams::default())
            .expect("engine should run");
        let picked = out.best_move.expect("start position has moves");
        assert!(legal.contains(&picked));
    }

    #[test]
    fn same_seed_same_choices() {
        let mut game = GameState::new_game();
        let mut first = RandomEngine::with_seed(7);
        let mut second = RandomEngine::with_seed(7);
        for _ in 0..5 {
            let a = first
                .choose_move(&mut game, &StandardPieceCapability, &GoParams::default())
                .expect("engine should run");
            let b = second
                .choose_move(&mut game, &StandardPieceCapability, &GoParams::default())
                .expect("engine should run");
            assert_eq!(a.best_move, b.best_move);
        }
    }

    #[test]
    fn no_moves_yields_none() {
        // Stalemate: dark king h8, light queen g6, light king f7.
        let sq = |file, rank| Square::new(file, rank).expect("test square on board");
        let mut game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(5, 6)),
                (PieceKind::Queen, Team::Light, sq(6, 5)),
                (PieceKind::King, Team::Dark, sq(7, 7)),
            ],
            Team::Dark,
        )
        .expect("fixture");
        let out = RandomEngine::with_seed(1)
            .choose_move(&mut game, &StandardPieceCapability, &GoParams::default())
            .expect("engine should run");
        assert_eq!(out.best_move, None);
    }
}
