use thiserror::Error;

use crate::game_state::chess_types::{Square, Team};

/// Errors reported by the rules engine, the executor/undoer, and the search.
///
/// An ordinary illegal request from a UI is not an error: the controller
/// reports it as `Ok(false)`. `IllegalMove` is only returned by the lower
/// level executor for requests it cannot carry out at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The destination is not reachable for the moving piece.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Undo was requested with no applied moves.
    #[error("no moves to undo")]
    EmptyHistory,

    /// Board bookkeeping disagrees with itself. Always a bug.
    #[error("board invariant violated: {0}")]
    InvariantViolation(String),

    /// The committed move captured the opposing king. The move is applied and
    /// stays in history.
    #[error("king captured, {winner} wins")]
    KingCaptured { winner: Team },

    /// No piece stands on the requested square.
    #[error("no piece on square {0}")]
    NoPieceAtSquare(Square),

    /// The piece or search request belongs to the side not on move.
    #[error("{found} is not on move, expected {expected}")]
    WrongSide { expected: Team, found: Team },

    /// The game already ended; reset or undo before moving again.
    #[error("the game is over")]
    GameOver,
}

pub type ChessResult<T> = Result<T, ChessError>;
