//! Piece movement patterns behind a pluggable trait.
//!
//! The rules core never looks at piece patterns directly. It asks a
//! `PieceCapability` for pseudo-legal destinations (pattern-valid, ignoring
//! whether the mover's king ends up attacked), for the history-dependent
//! extras, and for the special-move kind of a concrete move.
//! `StandardPieceCapability` implements orthodox chess with queen-only
//! promotion.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    castling_rook_squares, KINGSIDE_ROOK_FILE, KING_START_FILE, QUEENSIDE_ROOK_FILE,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_filter::filter_legal;
use crate::move_generation::legal_move_shared::en_passant_victim;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::{pawn_attacks, pawn_pushes};
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

pub trait PieceCapability: Send + Sync {
    /// Pattern destinations for the piece on `from`. Empty for an empty square.
    fn pseudo_legal_moves(&self, board: &Board, from: Square) -> Vec<Square>;

    /// Appends destinations that depend on move history, such as en passant
    /// captures and castling.
    fn special_moves(&self, game_state: &GameState, from: Square, candidates: &mut Vec<Square>);

    /// Side effects the move `from -> to` carries when executed.
    fn classify_special_move(
        &self,
        game_state: &GameState,
        from: Square,
        to: Square,
    ) -> SpecialMoveKind;

    /// Pseudo-legal destinations plus history-dependent extras.
    fn candidate_moves(&self, game_state: &GameState, from: Square) -> Vec<Square> {
        let mut candidates = self.pseudo_legal_moves(game_state.board(), from);
        self.special_moves(game_state, from, &mut candidates);
        candidates
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPieceCapability;

impl StandardPieceCapability {
    fn destination_mask(board: &Board, piece: &Piece) -> u64 {
        let from = piece.position;
        let own = board.occupancy_of(piece.team);
        let enemy = board.occupancy_of(piece.team.opposite());
        let occupancy = own | enemy;

        match piece.kind {
            PieceKind::Pawn => {
                pawn_pushes(piece.team, from, occupancy) | (pawn_attacks(piece.team, from) & enemy)
            }
            PieceKind::Knight => knight_attacks(from) & !own,
            PieceKind::Bishop => bishop_attacks(from, occupancy) & !own,
            PieceKind::Rook => rook_attacks(from, occupancy) & !own,
            PieceKind::Queen => queen_attacks(from, occupancy) & !own,
            PieceKind::King => king_attacks(from) & !own,
        }
    }

    fn castling_moves(
        &self,
        game_state: &GameState,
        king_id: PieceId,
        king: &Piece,
    ) -> Vec<Square> {
        let board = game_state.board();
        let back = king.team.back_rank();
        let mut out = Vec::new();

        if king.position.rank() != back
            || king.position.file() != KING_START_FILE
            || game_state.has_moved(king_id)
            || is_king_in_check(board, self, king.team)
        {
            return out;
        }

        for (rook_file, step) in [(KINGSIDE_ROOK_FILE, 1i8), (QUEENSIDE_ROOK_FILE, -1i8)] {
            let Some(rook_square) = Square::new(rook_file, back) else {
                continue;
            };
            let Some(rook_id) = board.piece_id_at(rook_square) else {
                continue;
            };
            let rook_ok = board.piece(rook_id).is_some_and(|rook| {
                rook.kind == PieceKind::Rook && rook.team == king.team
            }) && !game_state.has_moved(rook_id);
            if !rook_ok {
                continue;
            }

            let (low, high) = if step > 0 {
                (KING_START_FILE + 1, rook_file)
            } else {
                (rook_file + 1, KING_START_FILE)
            };
            let path_clear = (low..high)
                .filter_map(|file| Square::new(file, back))
                .all(|square| board.is_empty_square(square));
            if !path_clear {
                continue;
            }

            let (Some(transit), Some(target)) =
                (king.position.offset(step, 0), king.position.offset(2 * step, 0))
            else {
                continue;
            };
            if castling_rook_squares(king.position, target).is_none() {
                continue;
            }
            // The king may not pass through an attacked square.
            if filter_legal(game_state, self, king_id, vec![transit]).is_empty() {
                continue;
            }
            out.push(target);
        }

        out
    }
}

impl PieceCapability for StandardPieceCapability {
    fn pseudo_legal_moves(&self, board: &Board, from: Square) -> Vec<Square> {
        match board.piece_at(from) {
            Some(piece) => squares_in(Self::destination_mask(board, piece)).collect(),
            None => Vec::new(),
        }
    }

    fn special_moves(&self, game_state: &GameState, from: Square, candidates: &mut Vec<Square>) {
        let board = game_state.board();
        let (Some(id), Some(piece)) = (board.piece_id_at(from), board.piece_at(from)) else {
            return;
        };

        match piece.kind {
            PieceKind::Pawn => {
                for file_step in [-1i8, 1i8] {
                    let Some(to) = from.offset(file_step, piece.team.forward()) else {
                        continue;
                    };
                    let capturable = en_passant_victim(game_state, from, to).is_some();
                    if capturable && !candidates.contains(&to) {
                        candidates.push(to);
                    }
                }
            }
            PieceKind::King => {
                for to in self.castling_moves(game_state, id, piece) {
                    if !candidates.contains(&to) {
                        candidates.push(to);
                    }
                }
            }
            _ => {}
        }
    }

    fn classify_special_move(
        &self,
        game_state: &GameState,
        from: Square,
        to: Square,
    ) -> SpecialMoveKind {
        let Some(piece) = game_state.board().piece_at(from) else {
            return SpecialMoveKind::None;
        };

        match piece.kind {
            PieceKind::Pawn if to.rank() == piece.team.promotion_rank() => {
                SpecialMoveKind::Promotion
            }
            PieceKind::Pawn if en_passant_victim(game_state, from, to).is_some() => {
                SpecialMoveKind::EnPassant
            }
            PieceKind::King if from.file().abs_diff(to.file()) == 2 && from.rank() == to.rank() => {
                SpecialMoveKind::Castling
            }
            _ => SpecialMoveKind::None,
        }
    }
}
