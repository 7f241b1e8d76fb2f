//! Core value types shared by the board, move generation, and search.
//!
//! Squares are `(file, rank)` pairs on an 8x8 grid, pieces are stored in an
//! arena owned by the board and referred to by `PieceId` handles, and every
//! applied move leaves exactly one `MoveRecord` on the history stack.

use std::fmt;

use crate::game_state::chess_rules::{BOARD_HEIGHT, BOARD_WIDTH};

/// Side to move. `Light` is team 0 and starts on ranks 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Light,
    Dark,
}

impl Team {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Team::Light => 0,
            Team::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Team::Light => Team::Dark,
            Team::Dark => Team::Light,
        }
    }

    /// Rank direction pawns of this team advance in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Team::Light => 1,
            Team::Dark => -1,
        }
    }

    /// Rank holding this team's rooks and king at the start of a game.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Team::Light => 0,
            Team::Dark => BOARD_HEIGHT - 1,
        }
    }

    /// Rank a pawn of this team promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Team::Light => BOARD_HEIGHT - 1,
            Team::Dark => 0,
        }
    }

    /// Sign applied to light-minus-dark scores to view them from this team.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Team::Light => 1,
            Team::Dark => -1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Light => write!(f, "light"),
            Team::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A board coordinate. Always within the 8x8 grid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_WIDTH && rank < BOARD_HEIGHT {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// The square `file_step`/`rank_step` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, file_step: i8, rank_step: i8) -> Option<Self> {
        let file = self.file as i16 + file_step as i16;
        let rank = self.rank as i16 + rank_step as i16;
        if file < 0 || rank < 0 || file >= BOARD_WIDTH as i16 || rank >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Iterates every square, rank-major from `(0, 0)`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_HEIGHT).flat_map(|rank| (0..BOARD_WIDTH).map(move |file| Square { file, rank }))
    }

    /// Bit index in a 64-bit square mask, `0 == (0, 0)`, `63 == (7, 7)`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.rank * BOARD_WIDTH + self.file
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        Self::new(index % BOARD_WIDTH, index / BOARD_WIDTH)
    }

    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

/// Squares whose bits are set in `mask`, lowest index first.
pub fn squares_in(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        while mask != 0 {
            let index = mask.trailing_zeros() as u8;
            mask &= mask - 1;
            if let Some(square) = Square::from_index(index) {
                return Some(square);
            }
        }
        None
    })
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// Handle into the piece arena owned by `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceStatus {
    OnBoard,
    Captured,
    /// A pawn replaced by its promotion piece. Kept so the promotion can be undone.
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub position: Square,
    pub status: PieceStatus,
}

impl Piece {
    #[inline]
    pub const fn is_on_board(&self) -> bool {
        matches!(self.status, PieceStatus::OnBoard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Side effects a move carries beyond relocating its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialMoveKind {
    #[default]
    None,
    EnPassant,
    Castling,
    Promotion,
}
