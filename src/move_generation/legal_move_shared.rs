//! Rule queries shared by the piece capability, the legality filter, and the
//! executor.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// The pawn an en passant capture from `from` to `to` would remove.
///
/// Requires the previous move to be an opposing pawn's double push that
/// landed beside the capturing pawn, on the destination file.
pub fn en_passant_victim(game_state: &GameState, from: Square, to: Square) -> Option<PieceId> {
    let board = game_state.board();
    let pawn = board.piece_at(from)?;
    if pawn.kind != PieceKind::Pawn {
        return None;
    }
    let diagonal_step = to.file().abs_diff(from.file()) == 1
        && from.offset(0, pawn.team.forward())?.rank() == to.rank();
    if !diagonal_step {
        return None;
    }
    if !board.is_empty_square(to) {
        return None;
    }

    let last = game_state.last_record()?;
    if !last.is_double_pawn_push(board) {
        return None;
    }
    let bypassed = Square::new(to.file(), from.rank())?;
    let victim = board.piece_at(bypassed)?;
    let victim_id = board.piece_id_at(bypassed)?;
    (victim_id == last.mover && victim.team != pawn.team).then_some(victim_id)
}
