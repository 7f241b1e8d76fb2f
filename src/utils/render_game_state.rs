//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and the
//! self-play log. Files and ranks are labelled with the same 0-based indices
//! `Square` prints.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Render the board to a Unicode string, rank 7 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    let board = game_state.board();
    let mut out = String::new();

    push_file_labels(&mut out);
    out.push('\n');

    for rank in (0..BOARD_HEIGHT).rev() {
        out.push(char::from(b'0' + rank));
        out.push(' ');

        for file in 0..BOARD_WIDTH {
            let glyph = Square::new(file, rank)
                .and_then(|square| board.piece_at(square))
                .map_or('·', |piece| piece_to_unicode(piece.team, piece.kind));
            out.push(glyph);

            if file + 1 < BOARD_WIDTH {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + rank));
        out.push('\n');
    }

    push_file_labels(&mut out);

    for team in [Team::Light, Team::Dark] {
        let lost = captured_glyphs(board, game_state.captured(team));
        if !lost.is_empty() {
            out.push_str(&format!("\n{team} lost: {lost}"));
        }
    }

    out
}

fn push_file_labels(out: &mut String) {
    out.push_str("  ");
    for file in 0..BOARD_WIDTH {
        out.push(char::from(b'0' + file));
        if file + 1 < BOARD_WIDTH {
            out.push(' ');
        }
    }
}

fn captured_glyphs(board: &Board, captured: &[PieceId]) -> String {
    captured
        .iter()
        .filter_map(|&id| board.piece(id))
        .map(|piece| piece_to_unicode(piece.team, piece.kind))
        .collect()
}

fn piece_to_unicode(team: Team, piece: PieceKind) -> char {
    match (team, piece) {
        (Team::Light, PieceKind::Pawn) => '♙',
        (Team::Light, PieceKind::Knight) => '♘',
        (Team::Light, PieceKind::Bishop) => '♗',
        (Team::Light, PieceKind::Rook) => '♖',
        (Team::Light, PieceKind::Queen) => '♕',
        (Team::Light, PieceKind::King) => '♔',
        (Team::Dark, PieceKind::Pawn) => '♟',
        (Team::Dark, PieceKind::Knight) => '♞',
        (Team::Dark, PieceKind::Bishop) => '♝',
        (Team::Dark, PieceKind::Rook) => '♜',
        (Team::Dark, PieceKind::Queen) => '♛',
        (Team::Dark, PieceKind::King) => '♚',
    }
}
