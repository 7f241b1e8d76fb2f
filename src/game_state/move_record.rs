use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Single history entry for `apply_move` / `undo_last_move`.
///
/// Everything undo needs travels together, so the stack can only ever be
/// pushed and popped as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: ChessMove,
    pub mover: PieceId,
    pub captured: Option<PieceId>,
    pub special: SpecialMoveKind,
    /// Queen created by a promotion. The pawn itself is `mover`.
    pub promoted: Option<PieceId>,
}

impl MoveRecord {
    /// Team that wins because this move took the opposing king.
    pub fn king_capture_winner(&self, board: &Board) -> Option<Team> {
        let captured = board.piece(self.captured?)?;
        (captured.kind == PieceKind::King).then(|| captured.team.opposite())
    }

    /// True for a pawn advancing two ranks, the move that enables en passant.
    pub fn is_double_pawn_push(&self, board: &Board) -> bool {
        board
            .piece(self.mover)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn)
            && self.mv.from.file() == self.mv.to.file()
            && self.mv.from.rank().abs_diff(self.mv.to.rank()) == 2
    }
}
