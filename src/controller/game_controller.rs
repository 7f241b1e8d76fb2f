//! UI-facing game controller.
//!
//! Owns the live game, the piece capability, and the engine used for
//! automated moves. A UI asks for the legal destinations of a square, commits
//! moves, takes them back, and is told through the game-over listener when a
//! commit ends the game.

use tracing::{debug, info, warn};

use crate::engines::engine_negamax::NegamaxEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceId, Square, Team};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_checkmate, is_stalemate, legal_moves_from};
use crate::move_generation::legal_move_undo;
use crate::moves::piece_capability::{PieceCapability, StandardPieceCapability};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Team },
    Stalemate,
    KingCaptured { winner: Team },
}

type GameOverListener = Box<dyn FnMut(GameOutcome) + Send>;

pub struct GameController {
    game_state: GameState,
    capability: Box<dyn PieceCapability>,
    engine: Box<dyn Engine>,
    listener: Option<GameOverListener>,
    outcome: Option<GameOutcome>,
}

impl GameController {
    /// Standard rules, standard start position, default negamax engine.
    pub fn new() -> Self {
        Self::from_parts(
            GameState::new_game(),
            Box::new(StandardPieceCapability),
            Box::new(NegamaxEngine::default()),
        )
    }

    pub fn from_parts(
        game_state: GameState,
        capability: Box<dyn PieceCapability>,
        engine: Box<dyn Engine>,
    ) -> Self {
        Self {
            game_state,
            capability,
            engine,
            listener: None,
            outcome: None,
        }
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// How the game ended, or `None` while it is in progress.
    #[inline]
    pub fn status(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn set_game_over_listener<F>(&mut self, listener: F)
    where
        F: FnMut(GameOutcome) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Legal destinations of the piece on `square`. Empty for an empty
    /// square, a piece of the side not on move, or a finished game.
    pub fn request_moves(&self, square: Square) -> Vec<Square> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        match self.game_state.piece_at(square) {
            Some(piece) if piece.team == self.game_state.side_to_move() => {
                legal_moves_from(&self.game_state, self.capability.as_ref(), square)
            }
            _ => Vec::new(),
        }
    }

    /// Commits `from -> to` when it is legal.
    ///
    /// Returns `Ok(false)` and leaves the game untouched when the destination
    /// is not a legal move of the piece. A move that takes the opposing king
    /// is applied and then reported as `ChessError::KingCaptured`.
    pub fn commit_move(&mut self, from: Square, to: Square) -> ChessResult<bool> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        let side = self.game_state.side_to_move();
        let board = self.game_state.board();
        let (mover, piece) = board
            .piece_id_at(from)
            .and_then(|id| Some((id, *board.piece(id)?)))
            .ok_or(ChessError::NoPieceAtSquare(from))?;
        if piece.team != side {
            return Err(ChessError::WrongSide {
                expected: side,
                found: piece.team,
            });
        }

        let legal = legal_moves_from(&self.game_state, self.capability.as_ref(), from);
        if !legal.contains(&to) {
            debug!(%from, %to, "rejected move outside the legal set");
            return Ok(false);
        }

        let special = self
            .capability
            .classify_special_move(&self.game_state, from, to);
        let record = apply_move(&mut self.game_state, mover, to, special)?;
        info!(team = %side, mv = %record.mv, ?special, "move committed");

        if let Some(winner) = record.king_capture_winner(self.game_state.board()) {
            self.finish(GameOutcome::KingCaptured { winner });
            return Err(ChessError::KingCaptured { winner });
        }

        let capability = self.capability.as_ref();
        let outcome = if is_checkmate(&self.game_state, capability, side) {
            Some(GameOutcome::Checkmate { winner: side })
        } else if is_stalemate(&self.game_state, capability, side.opposite()) {
            Some(GameOutcome::Stalemate)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(true)
    }

    /// Takes back the last committed move and reopens a finished game.
    pub fn undo_last_move(&mut self) -> ChessResult<MoveRecord> {
        let record = legal_move_undo::undo_last_move(&mut self.game_state)?;
        if self.outcome.take().is_some() {
            debug!("game reopened by takeback");
        }
        info!(mv = %record.mv, "move taken back");
        Ok(record)
    }

    pub fn reset_game(&mut self) {
        self.game_state = GameState::new_game();
        self.outcome = None;
        self.engine.new_game();
        info!("game reset");
    }

    /// Asks the engine for a move for the side to move without committing it.
    ///
    /// `Ok(None)` when the side to move has no legal move.
    pub fn request_ai_move(&mut self, depth: u8) -> ChessResult<Option<(PieceId, Square)>> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        consult_engine(
            self.engine.as_mut(),
            &mut self.game_state,
            self.capability.as_ref(),
            depth,
        )
    }

    /// Like `request_ai_move`, but asks `engine` instead of the controller's
    /// own, so two different engines can share one game.
    pub fn request_move_from(
        &mut self,
        engine: &mut dyn Engine,
        depth: u8,
    ) -> ChessResult<Option<(PieceId, Square)>> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        consult_engine(engine, &mut self.game_state, self.capability.as_ref(), depth)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        info!(?outcome, "game over");
        self.outcome = Some(outcome);
        if let Some(listener) = self.listener.as_mut() {
            listener(outcome);
        }
    }
}

fn consult_engine(
    engine: &mut dyn Engine,
    game_state: &mut GameState,
    capability: &dyn PieceCapability,
    depth: u8,
) -> ChessResult<Option<(PieceId, Square)>> {
    let params = GoParams { depth: Some(depth) };
    let output = engine.choose_move(game_state, capability, &params)?;
    for line in &output.info_lines {
        debug!(engine = engine.name(), "{line}");
    }

    match output.best_move {
        Some(chosen) => {
            info!(
                engine = engine.name(),
                mv = %chosen.mv,
                score = ?output.score,
                "engine move chosen"
            );
            Ok(Some((chosen.mover, chosen.mv.to)))
        }
        None => {
            warn!(team = %game_state.side_to_move(), "engine found no move");
            Ok(None)
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{GameController, GameOutcome};
    use crate::engines::engine_negamax::NegamaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{PieceKind, Square, Team};
    use crate::game_state::game_state::GameState;
    use crate::moves::piece_capability::StandardPieceCapability;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("test square on board")
    }

    fn controller_for(game: GameState) -> GameController {
        GameController::from_parts(
            game,
            Box::new(StandardPieceCapability),
            Box::new(NegamaxEngine::default()),
        )
    }

    fn recording_listener(controller: &mut GameController) -> Arc<Mutex<Vec<GameOutcome>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.set_game_over_listener(move |outcome| {
            sink.lock().expect("listener lock").push(outcome);
        });
        seen
    }

    fn play(controller: &mut GameController, moves: &[((u8, u8), (u8, u8))]) {
        for &((ff, fr), (tf, tr)) in moves {
            let committed = controller
                .commit_move(sq(ff, fr), sq(tf, tr))
                .expect("commit should succeed");
            assert!(committed, "move ({ff}, {fr}) -> ({tf}, {tr}) should be legal");
        }
    }

    const FOOLS_MATE: [((u8, u8), (u8, u8)); 4] = [
        ((5, 1), (5, 2)),
        ((4, 6), (4, 4)),
        ((6, 1), (6, 3)),
        ((3, 7), (7, 3)),
    ];

    #[test]
    fn request_moves_only_for_side_to_move() {
        let controller = GameController::new();
        assert_eq!(controller.request_moves(sq(4, 1)), vec![sq(4, 2), sq(4, 3)]);
        assert!(controller.request_moves(sq(4, 6)).is_empty());
        assert!(controller.request_moves(sq(4, 4)).is_empty());
    }

    #[test]
    fn illegal_commit_returns_false_and_changes_nothing() {
        let mut controller = GameController::new();
        let before = controller.game_state().clone();
        assert_eq!(controller.commit_move(sq(4, 1), sq(4, 4)), Ok(false));
        assert_eq!(controller.game_state(), &before);
    }

    #[test]
    fn commit_rejects_empty_square_and_wrong_side() {
        let mut controller = GameController::new();
        assert_eq!(
            controller.commit_move(sq(4, 4), sq(4, 5)),
            Err(ChessError::NoPieceAtSquare(sq(4, 4)))
        );
        assert!(matches!(
            controller.commit_move(sq(4, 6), sq(4, 4)),
            Err(ChessError::WrongSide { .. })
        ));
    }

    #[test]
    fn fools_mate_fires_listener_once() {
        let mut controller = GameController::new();
        let seen = recording_listener(&mut controller);
        play(&mut controller, &FOOLS_MATE);

        let expected = GameOutcome::Checkmate { winner: Team::Dark };
        assert_eq!(controller.status(), Some(expected));
        assert_eq!(*seen.lock().expect("listener lock"), vec![expected]);
        assert_eq!(
            controller.commit_move(sq(4, 1), sq(4, 2)),
            Err(ChessError::GameOver)
        );
    }

    #[test]
    fn undo_reopens_a_finished_game() {
        let mut controller = GameController::new();
        play(&mut controller, &FOOLS_MATE);
        controller.undo_last_move().expect("undo should succeed");
        assert_eq!(controller.status(), None);
        assert_eq!(controller.game_state().side_to_move(), Team::Dark);
        assert!(!controller.request_moves(sq(3, 7)).is_empty());
    }

    #[test]
    fn undo_with_no_history_is_an_error() {
        let mut controller = GameController::new();
        assert_eq!(controller.undo_last_move(), Err(ChessError::EmptyHistory));
    }

    #[test]
    fn reset_restores_start_position() {
        let mut controller = GameController::new();
        play(&mut controller, &FOOLS_MATE);
        controller.reset_game();
        assert_eq!(controller.status(), None);
        assert_eq!(controller.game_state(), &GameState::new_game());
    }

    #[test]
    fn stalemating_move_ends_the_game() {
        let game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(5, 6)),
                (PieceKind::Queen, Team::Light, sq(6, 3)),
                (PieceKind::King, Team::Dark, sq(7, 7)),
            ],
            Team::Light,
        )
        .expect("fixture");
        let mut controller = controller_for(game);
        let seen = recording_listener(&mut controller);
        assert_eq!(controller.commit_move(sq(6, 3), sq(6, 5)), Ok(true));
        assert_eq!(controller.status(), Some(GameOutcome::Stalemate));
        assert_eq!(*seen.lock().expect("listener lock"), vec![GameOutcome::Stalemate]);
    }

    #[test]
    fn taking_the_king_is_reported_after_the_move_is_applied() {
        // Dark left its king en prise to the light rook.
        let game = GameState::from_placements(
            &[
                (PieceKind::King, Team::Light, sq(0, 0)),
                (PieceKind::Rook, Team::Light, sq(4, 0)),
                (PieceKind::King, Team::Dark, sq(4, 7)),
            ],
            Team::Light,
        )
        .expect("fixture");
        let mut controller = controller_for(game);
        let seen = recording_listener(&mut controller);

        assert_eq!(
            controller.commit_move(sq(4, 0), sq(4, 7)),
            Err(ChessError::KingCaptured { winner: Team::Light })
        );
        assert_eq!(controller.game_state().history().len(), 1);
        assert_eq!(
            *seen.lock().expect("listener lock"),
            vec![GameOutcome::KingCaptured { winner: Team::Light }]
        );

        controller.undo_last_move().expect("undo should succeed");
        assert!(controller.game_state().board().king_square(Team::Dark).is_some());
    }

    #[test]
    fn ai_move_is_legal_and_not_committed() {
        let mut controller = GameController::new();
        let (mover, to) = controller
            .request_ai_move(2)
            .expect("engine should run")
            .expect("start position has moves");
        assert!(controller.game_state().history().is_empty());

        let from = controller
            .game_state()
            .board()
            .piece(mover)
            .map(|piece| piece.position)
            .expect("mover on board");
        assert!(controller.request_moves(from).contains(&to));
        assert_eq!(controller.commit_move(from, to), Ok(true));
    }

    #[test]
    fn outside_engine_can_move_for_either_side() {
        let mut controller = GameController::new();
        let mut random = RandomEngine::with_seed(3);
        for _ in 0..4 {
            let (mover, to) = controller
                .request_move_from(&mut random, 1)
                .expect("engine should run")
                .expect("opening has moves");
            let from = controller
                .game_state()
                .board()
                .piece(mover)
                .map(|piece| piece.position)
                .expect("mover on board");
            assert_eq!(controller.commit_move(from, to), Ok(true));
        }
        assert_eq!(controller.game_state().history().len(), 4);
    }
}
