//! Attack coverage, check, checkmate, and stalemate detection.
//!
//! Coverage is the union of every pseudo-legal destination of the attacking
//! side as reported by the piece capability.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_filter::filter_legal;
use crate::moves::piece_capability::PieceCapability;

/// Union of the pseudo-legal destinations of every `attacker` piece.
pub fn attacked_squares<C: PieceCapability + ?Sized>(
    board: &Board,
    capability: &C,
    attacker: Team,
) -> u64 {
    board
        .pieces_of(attacker)
        .flat_map(|(_, piece)| capability.pseudo_legal_moves(board, piece.position))
        .fold(0u64, |acc, square| acc | square.bit())
}

#[inline]
pub fn is_square_attacked<C: PieceCapability + ?Sized>(
    board: &Board,
    capability: &C,
    square: Square,
    attacker: Team,
) -> bool {
    attacked_squares(board, capability, attacker) & square.bit() != 0
}

/// False when `team` has no king on the board.
pub fn is_king_in_check<C: PieceCapability + ?Sized>(
    board: &Board,
    capability: &C,
    team: Team,
) -> bool {
    let Some(king_sq) = board.king_square(team) else {
        return false;
    };
    is_square_attacked(board, capability, king_sq, team.opposite())
}

/// Legal destinations of the piece on `from`, special moves included.
pub fn legal_moves_from<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    from: Square,
) -> Vec<Square> {
    let Some(id) = game_state.board().piece_id_at(from) else {
        return Vec::new();
    };
    let candidates = capability.candidate_moves(game_state, from);
    filter_legal(game_state, capability, id, candidates)
}

/// True when at least one piece of `team` has a legal destination.
pub fn has_any_legal_move<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    team: Team,
) -> bool {
    game_state
        .board()
        .pieces_of(team)
        .any(|(_, piece)| !legal_moves_from(game_state, capability, piece.position).is_empty())
}

/// True when the opponent of `last_mover` is in check with no legal reply.
///
/// A side with no legal move that is not in check is stalemated, which this
/// function reports as `false`; see `is_stalemate`.
pub fn is_checkmate<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    last_mover: Team,
) -> bool {
    let defender = last_mover.opposite();
    if !is_king_in_check(game_state.board(), capability, defender) {
        return false;
    }
    !has_any_legal_move(game_state, capability, defender)
}

/// True when `side` is not in check and has no legal move.
pub fn is_stalemate<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    side: Team,
) -> bool {
    if game_state.board().king_square(side).is_none()
        || is_king_in_check(game_state.board(), capability, side)
    {
        return false;
    }
    !has_any_legal_move(game_state, capability, side)
}
