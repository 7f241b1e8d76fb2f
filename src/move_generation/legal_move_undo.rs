//! Move undoer: the exact inverse of `legal_move_apply::apply_move`.

use tracing::error;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::castling_rook_squares;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;

/// Pops the newest record and restores the state it was applied to.
///
/// Returns `EmptyHistory` when nothing has been played; callers that treat
/// that as a no-op can ignore the error.
pub fn undo_last_move(game_state: &mut GameState) -> ChessResult<MoveRecord> {
    let record = game_state.history.pop().ok_or(ChessError::EmptyHistory)?;

    if let Err(err) = restore(game_state, &record) {
        error!(%err, mv = %record.mv, "state inconsistent during undo");
        return Err(err);
    }

    game_state.side_to_move = game_state.side_to_move.opposite();

    if let Err(err) = game_state.verify_invariants() {
        error!(%err, mv = %record.mv, "state inconsistent after undo");
        return Err(err);
    }

    Ok(record)
}

fn restore(game_state: &mut GameState, record: &MoveRecord) -> ChessResult<()> {
    let ChessMove { from, to } = record.mv;
    let board = &mut game_state.board;

    match record.promoted {
        Some(queen) => {
            board.take_off(queen, PieceStatus::Retired)?;
            board.discard_newest(queen)?;
            board.put_on(record.mover, from)?;
        }
        None => board.relocate(record.mover, from)?,
    }

    if record.special == SpecialMoveKind::Castling {
        let (rook_from, rook_to) = castling_rook_squares(from, to).ok_or_else(|| {
            ChessError::InvariantViolation(format!(
                "castling record {} has no rook squares",
                record.mv
            ))
        })?;
        let rook = board.piece_id_at(rook_to).ok_or_else(|| {
            ChessError::InvariantViolation(format!("castled rook missing from {rook_to}"))
        })?;
        board.relocate(rook, rook_from)?;
    }

    if let Some(victim) = record.captured {
        let team = board
            .piece(victim)
            .map(|piece| piece.team)
            .ok_or_else(|| {
                ChessError::InvariantViolation(format!("unknown piece {}", victim.index()))
            })?;
        let popped = game_state.captured[team.index()].pop();
        if popped != Some(victim) {
            return Err(ChessError::InvariantViolation(format!(
                "captured stack of {team} out of order: expected piece {}, found {:?}",
                victim.index(),
                popped.map(PieceId::index)
            )));
        }
        let square = if record.special == SpecialMoveKind::EnPassant {
            Square::new(to.file(), from.rank()).ok_or_else(|| {
                ChessError::InvariantViolation(format!("no bypassed square for {}", record.mv))
            })?
        } else {
            to
        };
        game_state.board.put_on(victim, square)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::prelude::IndexedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::undo_last_move;
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{PieceKind, SpecialMoveKind, Square, Team};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_checks::legal_moves_from;
    use crate::moves::piece_capability::{PieceCapability, StandardPieceCapability};

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("test square on board")
    }

    fn assert_round_trip(game: &mut GameState, from: Square, to: Square) {
        let before = game.clone();
        let mover = game.board().piece_id_at(from).expect("mover on board");
        let special = StandardPieceCapability.classify_special_move(game, from, to);
        apply_move(game, mover, to, special).expect("apply");
        undo_last_move(game).expect("undo");
        assert_eq!(*game, before, "round trip of {from} -> {to} ({special:?})");
    }

    #[test]
    fn undo_on_fresh_game_reports_empty_history() {
        let mut game = GameState::new_game();
        assert_eq!(undo_last_move(&mut game), Err(ChessError::EmptyHistory));
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn every_opening_move_round_trips() {
        let mut game = GameState::new_game();
        let squares: Vec<_> = game
            .board()
            .pieces_of(Team::Light)
            .map(|(_, piece)| piece.position)
            .collect();
        for from in squares {
            for to in legal_moves_from(&game, &StandardPieceCapability, from) {
                assert_round_trip(&mut game, from, to);
            }
        }
    }

    #[test]
    fn capture_round_trips_and_restores_the_victim() {
        let mut game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(4, 0)),
                (PieceKind::Bishop, Team::Light, sq(2, 0)),
                (PieceKind::Rook, Team::Dark, sq(6, 4)),
                (PieceKind::King, Team::Dark, sq(4, 7)),
            ],
            Team::Light,
        )
        .expect("fixture");
        assert_round_trip(&mut game, sq(2, 0), sq(6, 4));
    }

    #[test]
    fn promotion_round_trips_back_to_the_original_pawn() {
        let mut game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(4, 0)),
                (PieceKind::Pawn, Team::Light, sq(1, 6)),
                (PieceKind::Rook, Team::Dark, sq(0, 7)),
                (PieceKind::King, Team::Dark, sq(7, 7)),
            ],
            Team::Light,
        )
        .expect("fixture");
        assert_round_trip(&mut game, sq(1, 6), sq(1, 7));
        assert_round_trip(&mut game, sq(1, 6), sq(0, 7));
    }

    #[test]
    fn en_passant_round_trips_to_the_bypassed_square() {
        let mut game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(4, 0)),
                (PieceKind::Pawn, Team::Light, sq(4, 4)),
                (PieceKind::Pawn, Team::Dark, sq(5, 6)),
                (PieceKind::King, Team::Dark, sq(4, 7)),
            ],
            Team::Dark,
        )
        .expect("fixture");
        let dark_pawn = game.board().piece_id_at(sq(5, 6)).expect("dark pawn");
        apply_move(&mut game, dark_pawn, sq(5, 4), SpecialMoveKind::None).expect("double push");

        assert_eq!(
            StandardPieceCapability.classify_special_move(&game, sq(4, 4), sq(5, 5)),
            SpecialMoveKind::EnPassant
        );
        let light_pawn = game.board().piece_id_at(sq(4, 4)).expect("light pawn");
        let before = game.clone();
        let record = apply_move(&mut game, light_pawn, sq(5, 5), SpecialMoveKind::EnPassant)
            .expect("en passant");
        assert_eq!(record.captured, Some(dark_pawn));
        assert!(game.board().is_empty_square(sq(5, 4)));

        undo_last_move(&mut game).expect("undo");
        assert_eq!(game, before);
        assert_eq!(game.board().piece_id_at(sq(5, 4)), Some(dark_pawn));
    }

    #[test]
    fn castling_round_trips_both_pieces() {
        let mut game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Dark, sq(4, 7)),
                (PieceKind::Rook, Team::Dark, sq(0, 7)),
                (PieceKind::King, Team::Light, sq(4, 0)),
            ],
            Team::Dark,
        )
        .expect("fixture");
        assert_round_trip(&mut game, sq(4, 7), sq(2, 7));
    }

    #[test]
    fn random_playouts_round_trip_at_every_ply() {
        let cap = StandardPieceCapability;
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = GameState::new_game();
            let mut snapshots = vec![game.clone()];

            for _ in 0..60 {
                let side = game.side_to_move();
                let moves: Vec<(Square, Square)> = game
                    .board()
                    .pieces_of(side)
                    .flat_map(|(_, piece)| {
                        legal_moves_from(&game, &cap, piece.position)
                            .into_iter()
                            .map(move |to| (piece.position, to))
                    })
                    .collect();
                let Some(&(from, to)) = moves.choose(&mut rng) else {
                    break;
                };
                assert_round_trip(&mut game, from, to);

                let mover = game.board().piece_id_at(from).expect("mover");
                let special = cap.classify_special_move(&game, from, to);
                apply_move(&mut game, mover, to, special).expect("apply");
                snapshots.push(game.clone());
            }

            // Unwind the whole game and compare against every snapshot.
            snapshots.pop();
            while let Some(expected) = snapshots.pop() {
                undo_last_move(&mut game).expect("undo");
                assert_eq!(game, expected, "seed {seed}");
            }
            assert_eq!(undo_last_move(&mut game), Err(ChessError::EmptyHistory));
        }
    }
}
