//! Engine abstraction used by the controller and the self-play binary.
//!
//! Defines the request parameters and the output payload so different move
//! selection strategies can be swapped behind a single trait object.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::piece_capability::PieceCapability;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Search depth in plies. Engines fall back to their own default.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<GeneratedMove>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Picks a move for the side to move. The state may be walked in place but
    /// must be handed back unchanged.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        capability: &dyn PieceCapability,
        params: &GoParams,
    ) -> ChessResult<EngineOutput>;
}
