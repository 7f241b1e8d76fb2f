//! Move executor.
//!
//! Applies one move to the live game state in place and pushes the record
//! `legal_move_undo::undo_last_move` needs to reverse it exactly. Legality is
//! the caller's responsibility; this only refuses requests it cannot carry
//! out, before touching any state.

use tracing::error;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::castling_rook_squares;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::move_generation::legal_move_shared::en_passant_victim;

pub fn apply_move(
    game_state: &mut GameState,
    mover: PieceId,
    to: Square,
    special: SpecialMoveKind,
) -> ChessResult<MoveRecord> {
    let piece = *game_state
        .board
        .piece(mover)
        .filter(|piece| piece.is_on_board())
        .ok_or_else(|| {
            ChessError::InvariantViolation(format!("piece {} is not on the board", mover.index()))
        })?;
    let from = piece.position;
    let illegal = ChessError::IllegalMove { from, to };

    if piece.team != game_state.side_to_move {
        return Err(ChessError::WrongSide {
            expected: game_state.side_to_move,
            found: piece.team,
        });
    }
    if from == to || game_state.board.is_occupied_by(to, piece.team) {
        return Err(illegal);
    }

    let passed_pawn = match special {
        SpecialMoveKind::EnPassant => {
            Some(en_passant_victim(game_state, from, to).ok_or_else(|| illegal.clone())?)
        }
        _ => None,
    };
    let rook_shift = match special {
        SpecialMoveKind::Castling => {
            Some(castling_rook(game_state, &piece, to).ok_or_else(|| illegal.clone())?)
        }
        _ => None,
    };
    if special == SpecialMoveKind::Promotion
        && (piece.kind != PieceKind::Pawn || to.rank() != piece.team.promotion_rank())
    {
        return Err(illegal);
    }

    let mut captured = None;

    // 1. Ordinary capture on the destination.
    if let Some(victim) = game_state.board.piece_id_at(to) {
        capture(game_state, victim)?;
        captured = Some(victim);
    }

    // 2. Relocate the mover.
    game_state.board.relocate(mover, to)?;

    // 3. En passant removes the pawn beside the origin instead.
    if let Some(victim) = passed_pawn {
        capture(game_state, victim)?;
        captured = Some(victim);
    }

    // 4. Promotion retires the pawn in favour of a new queen.
    let mut promoted = None;
    if special == SpecialMoveKind::Promotion {
        game_state.board.take_off(mover, PieceStatus::Retired)?;
        promoted = Some(game_state.board.spawn(PieceKind::Queen, piece.team, to)?);
    }

    // 5. Castling brings the rook across the king.
    if let Some((rook, rook_to)) = rook_shift {
        game_state.board.relocate(rook, rook_to)?;
    }

    game_state.side_to_move = game_state.side_to_move.opposite();

    let record = MoveRecord {
        mv: ChessMove::new(from, to),
        mover,
        captured,
        special,
        promoted,
    };
    game_state.history.push(record);

    if let Err(err) = game_state.verify_invariants() {
        error!(%err, mv = %record.mv, "state inconsistent after apply");
        return Err(err);
    }

    Ok(record)
}

fn capture(game_state: &mut GameState, victim: PieceId) -> ChessResult<()> {
    game_state.board.take_off(victim, PieceStatus::Captured)?;
    let team = game_state
        .board
        .piece(victim)
        .map(|piece| piece.team)
        .ok_or_else(|| {
            ChessError::InvariantViolation(format!("unknown piece {}", victim.index()))
        })?;
    game_state.captured[team.index()].push(victim);
    Ok(())
}

/// Rook handle and destination for a castling king move to `to`.
fn castling_rook(game_state: &GameState, king: &Piece, to: Square) -> Option<(PieceId, Square)> {
    if king.kind != PieceKind::King {
        return None;
    }
    let (rook_from, rook_to) = castling_rook_squares(king.position, to)?;
    let rook_id = game_state.board.piece_id_at(rook_from)?;
    let rook = game_state.board.piece(rook_id)?;
    let usable = rook.kind == PieceKind::Rook
        && rook.team == king.team
        && game_state.board.is_empty_square(rook_to)
        && game_state.board.is_empty_square(to);
    usable.then_some((rook_id, rook_to))
}
