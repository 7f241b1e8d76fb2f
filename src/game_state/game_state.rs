//! Authoritative game state.
//!
//! `GameState` owns the board, the side to move, one captured-piece stack per
//! team, and the move-record stack used by apply/undo. After construction it
//! is only mutated through `legal_move_apply::apply_move` and
//! `legal_move_undo::undo_last_move`.

use std::fmt;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::standard_placements;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveRecord;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Team,
    // Indexed by `Team::index`; last element is the most recent capture.
    pub(crate) captured: [Vec<PieceId>; 2],
    pub(crate) history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Team::Light,
            captured: [Vec::new(), Vec::new()],
            history: Vec::new(),
        }
    }
}

impl GameState {
    /// A board with no pieces and `side_to_move` on move.
    #[inline]
    pub fn empty(side_to_move: Team) -> Self {
        Self {
            side_to_move,
            ..Self::default()
        }
    }

    /// The standard starting position with light to move.
    pub fn new_game() -> Self {
        let mut game = Self::default();
        for (kind, team, square) in standard_placements() {
            game.board
                .spawn(kind, team, square)
                .expect("standard placements should never collide");
        }
        game
    }

    /// Builds a custom position for fixtures and analysis.
    ///
    /// At most one king per team. A team without a king is accepted, which
    /// only makes sense for move-pattern fixtures.
    pub fn from_placements(
        placements: &[(PieceKind, Team, Square)],
        side_to_move: Team,
    ) -> ChessResult<Self> {
        for team in [Team::Light, Team::Dark] {
            let kings = placements
                .iter()
                .filter(|&&(kind, owner, _)| kind == PieceKind::King && owner == team)
                .count();
            if kings > 1 {
                return Err(ChessError::InvariantViolation(format!("{team} has {kings} kings")));
            }
        }

        let mut game = Self::empty(side_to_move);
        for &(kind, team, square) in placements {
            game.board.spawn(kind, team, square)?;
        }
        Ok(game)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Team {
        self.side_to_move
    }

    /// Pieces `team` has lost, oldest first.
    #[inline]
    pub fn captured(&self, team: Team) -> &[PieceId] {
        &self.captured[team.index()]
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_record(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.piece_at(square)
    }

    /// True when `piece` has been the mover of any record still on the stack.
    pub fn has_moved(&self, piece: PieceId) -> bool {
        self.history.iter().any(|record| record.mover == piece)
    }

    /// Full consistency check of board, captured stacks, and history.
    pub fn verify_invariants(&self) -> ChessResult<()> {
        self.board.verify()?;

        for team in [Team::Light, Team::Dark] {
            for &id in self.captured(team) {
                let piece = self.board.piece(id).ok_or_else(|| {
                    ChessError::InvariantViolation(format!("captured piece {} unknown", id.index()))
                })?;
                if piece.status != PieceStatus::Captured || piece.team != team {
                    return Err(ChessError::InvariantViolation(format!(
                        "captured stack of {team} holds piece {} ({:?}, {})",
                        id.index(),
                        piece.status,
                        piece.team
                    )));
                }
            }
        }

        let recorded_captures = self
            .history
            .iter()
            .filter(|record| record.captured.is_some())
            .count();
        let stacked_captures = self.captured[0].len() + self.captured[1].len();
        if recorded_captures != stacked_captures {
            return Err(ChessError::InvariantViolation(format!(
                "history records {recorded_captures} captures, stacks hold {stacked_captures}"
            )));
        }

        Ok(())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_game_state(self))?;
        write!(f, "{} to move", self.side_to_move)
    }
}
