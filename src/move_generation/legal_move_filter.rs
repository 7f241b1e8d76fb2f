//! Legality filter: drops candidate destinations that leave the mover's own
//! king attacked.
//!
//! Each candidate is simulated on a scratch copy of the board, never on the
//! live one, and the opposing coverage is recomputed from scratch for every
//! candidate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::en_passant_victim;
use crate::moves::piece_capability::PieceCapability;

/// Returns the subset of `candidates` the piece `mover` may legally move to,
/// in their original order.
///
/// If `mover`'s team has no king on the board nothing can be exposed and the
/// candidates come back unchanged.
pub fn filter_legal<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    mover: PieceId,
    candidates: Vec<Square>,
) -> Vec<Square> {
    let board = game_state.board();
    let Some(piece) = board.piece(mover).filter(|piece| piece.is_on_board()) else {
        return Vec::new();
    };
    let king_square = board.king_square(piece.team);
    if piece.kind != PieceKind::King && king_square.is_none() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|&to| {
            let king_after = if piece.kind == PieceKind::King {
                Some(to)
            } else {
                king_square
            };
            match (simulate(game_state, capability, mover, piece, to), king_after) {
                (Some(scratch), Some(king)) => {
                    !is_square_attacked(&scratch, capability, king, piece.team.opposite())
                }
                _ => false,
            }
        })
        .collect()
}

/// Scratch board with `mover` relocated to `to` and whatever it captures
/// removed. `None` when the move cannot be carried out at all.
fn simulate<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    mover: PieceId,
    piece: &Piece,
    to: Square,
) -> Option<Board> {
    let mut scratch = game_state.board().clone();

    if let Some(occupant) = scratch.piece_at(to) {
        if occupant.team == piece.team {
            return None;
        }
        let occupant_id = scratch.piece_id_at(to)?;
        scratch.take_off(occupant_id, PieceStatus::Captured).ok()?;
    }

    let special = capability.classify_special_move(game_state, piece.position, to);
    if special == SpecialMoveKind::EnPassant {
        let victim = en_passant_victim(game_state, piece.position, to)?;
        scratch.take_off(victim, PieceStatus::Captured).ok()?;
    }

    scratch.relocate(mover, to).ok()?;
    Some(scratch)
}
