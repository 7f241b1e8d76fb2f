//! Canonical chess-rule constants.
//!
//! Board dimensions, the standard starting placement, and the back-rank files
//! castling depends on.

use crate::game_state::chess_types::{PieceKind, Square, Team};

pub const BOARD_WIDTH: u8 = 8;
pub const BOARD_HEIGHT: u8 = 8;

/// Back-rank order from file 0 to file 7.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_START_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = BOARD_WIDTH - 1;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

/// Standard starting position as `(kind, team, square)` placements.
pub fn standard_placements() -> Vec<(PieceKind, Team, Square)> {
    let mut out = Vec::with_capacity(32);
    for team in [Team::Light, Team::Dark] {
        let back = team.back_rank();
        let pawn_rank = if team == Team::Light {
            back + 1
        } else {
            back - 1
        };
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            out.extend(Square::new(file, back).map(|sq| (kind, team, sq)));
        }
        for file in 0..BOARD_WIDTH {
            out.extend(Square::new(file, pawn_rank).map(|sq| (PieceKind::Pawn, team, sq)));
        }
    }
    out
}

/// Rook origin and destination for a king moving two files along its back rank.
pub fn castling_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    if king_from.rank() != king_to.rank() {
        return None;
    }
    let rank = king_from.rank();
    match i16::from(king_to.file()) - i16::from(king_from.file()) {
        2 => Some((
            Square::new(KINGSIDE_ROOK_FILE, rank)?,
            Square::new(king_from.file() + 1, rank)?,
        )),
        -2 => Some((
            Square::new(QUEENSIDE_ROOK_FILE, rank)?,
            Square::new(king_from.file() - 1, rank)?,
        )),
        _ => None,
    }
}
