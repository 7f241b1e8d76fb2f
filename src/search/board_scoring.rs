//! Pluggable static evaluation.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Plain material count. No mobility, no positional terms, no history.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 999,
        }
    }

    /// Light material minus dark material over the pieces on the board.
    pub fn material_balance(game_state: &GameState) -> i32 {
        game_state
            .board()
            .pieces_on_board()
            .map(|(_, piece)| piece.team.sign() * Self::piece_value(piece.kind))
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        game_state.side_to_move().sign() * Self::material_balance(game_state)
    }
}
