//! Whole-side move enumeration used by search and perft.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_filter::filter_legal;
use crate::moves::piece_capability::PieceCapability;

/// Which candidate moves a generator lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveLegality {
    /// Only moves that survive the legality filter.
    #[default]
    Strict,
    /// Every pattern-valid move, including ones that leave the own king attacked.
    PseudoLegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub mover: PieceId,
    pub mv: ChessMove,
    pub special: SpecialMoveKind,
}

/// Every move for the side to move, piece by piece in square order and
/// destinations in capability order.
pub fn generate_moves<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    legality: MoveLegality,
) -> Vec<GeneratedMove> {
    let side = game_state.side_to_move();
    let mut out = Vec::with_capacity(64);

    for (mover, piece) in game_state.board().pieces_of(side) {
        let from = piece.position;
        let mut candidates = capability.candidate_moves(game_state, from);
        if legality == MoveLegality::Strict {
            candidates = filter_legal(game_state, capability, mover, candidates);
        }
        out.extend(candidates.into_iter().map(|to| GeneratedMove {
            mover,
            mv: ChessMove::new(from, to),
            special: capability.classify_special_move(game_state, from, to),
        }));
    }

    out
}
