//! Square grid plus the piece arena it indexes into.
//!
//! The grid stores `PieceId` handles; the arena stores the pieces themselves,
//! including captured and retired ones so that undo can bring them back.
//! Every `OnBoard` piece's `position` must name the slot that holds it.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game_state::chess_types::{
    squares_in, Piece, PieceId, PieceKind, PieceStatus, Square, Team,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [rank][file]
    grid: [[Option<PieceId>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pieces: Vec<Piece>,
    // Per-team occupied squares, indexed by `Team::index`.
    occupancy: [u64; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            pieces: Vec::with_capacity(32),
            occupancy: [0; 2],
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    /// The piece standing on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_id_at(square).and_then(|id| self.piece(id))
    }

    /// Any arena entry, whether on the board, captured, or retired.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.piece_id_at(square).is_none()
    }

    /// True when `square` holds a piece of `team`.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, team: Team) -> bool {
        self.piece_at(square).is_some_and(|piece| piece.team == team)
    }

    /// Pieces currently on the board, in square order.
    pub fn pieces_on_board(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces_in(self.occupancy())
    }

    /// Pieces of `team` currently on the board, in square order.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces_in(self.occupancy_of(team))
    }

    fn pieces_in(&self, mask: u64) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        squares_in(mask).filter_map(move |square| {
            let id = self.piece_id_at(square)?;
            Some((id, self.piece(id)?))
        })
    }

    /// Mask of every occupied square.
    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.occupancy[0] | self.occupancy[1]
    }

    #[inline]
    pub fn occupancy_of(&self, team: Team) -> u64 {
        self.occupancy[team.index()]
    }

    pub fn king_square(&self, team: Team) -> Option<Square> {
        self.pieces_of(team)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(_, piece)| piece.position)
    }

    #[inline]
    pub fn arena_len(&self) -> usize {
        self.pieces.len()
    }

    /// Creates a new piece on an empty square.
    pub(crate) fn spawn(
        &mut self,
        kind: PieceKind,
        team: Team,
        square: Square,
    ) -> ChessResult<PieceId> {
        if let Some(existing) = self.piece_id_at(square) {
            return Err(ChessError::InvariantViolation(format!(
                "cannot spawn on {square}, occupied by piece {}",
                existing.index()
            )));
        }
        let raw = u16::try_from(self.pieces.len())
            .map_err(|_| ChessError::InvariantViolation("piece arena exhausted".to_owned()))?;
        let id = PieceId(raw);
        self.pieces.push(Piece {
            kind,
            team,
            position: square,
            status: PieceStatus::OnBoard,
        });
        self.grid[square.rank() as usize][square.file() as usize] = Some(id);
        self.occupancy[team.index()] |= square.bit();
        Ok(id)
    }

    /// Drops the newest arena entry. Only valid for a piece already off the grid.
    pub(crate) fn discard_newest(&mut self, id: PieceId) -> ChessResult<()> {
        if id.index() + 1 != self.pieces.len() {
            return Err(ChessError::InvariantViolation(format!(
                "piece {} is not the newest arena entry",
                id.index()
            )));
        }
        if self.pieces[id.index()].is_on_board() {
            return Err(ChessError::InvariantViolation(format!(
                "piece {} is still on the board",
                id.index()
            )));
        }
        self.pieces.pop();
        Ok(())
    }

    /// Takes an on-board piece off the grid and gives it `status`.
    pub(crate) fn take_off(&mut self, id: PieceId, status: PieceStatus) -> ChessResult<Square> {
        let piece = self.piece_mut(id)?;
        if !piece.is_on_board() {
            return Err(ChessError::InvariantViolation(format!(
                "piece {} is not on the board",
                id.index()
            )));
        }
        let square = piece.position;
        if self.piece_id_at(square) != Some(id) {
            return Err(ChessError::InvariantViolation(format!(
                "piece {} claims {square} but the slot disagrees",
                id.index()
            )));
        }
        self.grid[square.rank() as usize][square.file() as usize] = None;
        let piece = self.piece_mut(id)?;
        piece.status = status;
        let team = piece.team;
        self.occupancy[team.index()] &= !square.bit();
        Ok(square)
    }

    /// Puts an off-grid piece back onto an empty square.
    pub(crate) fn put_on(&mut self, id: PieceId, square: Square) -> ChessResult<()> {
        if let Some(existing) = self.piece_id_at(square) {
            return Err(ChessError::InvariantViolation(format!(
                "cannot place piece {} on {square}, occupied by piece {}",
                id.index(),
                existing.index()
            )));
        }
        let piece = self.piece_mut(id)?;
        piece.position = square;
        piece.status = PieceStatus::OnBoard;
        let team = piece.team;
        self.grid[square.rank() as usize][square.file() as usize] = Some(id);
        self.occupancy[team.index()] |= square.bit();
        Ok(())
    }

    /// Moves an on-board piece to an empty square.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) -> ChessResult<()> {
        self.take_off(id, PieceStatus::OnBoard)?;
        self.put_on(id, to)
    }

    fn piece_mut(&mut self, id: PieceId) -> ChessResult<&mut Piece> {
        self.pieces
            .get_mut(id.index())
            .ok_or_else(|| ChessError::InvariantViolation(format!("unknown piece {}", id.index())))
    }

    /// Checks that grid slots and piece positions agree in both directions.
    pub fn verify(&self) -> ChessResult<()> {
        for square in Square::all() {
            let Some(id) = self.piece_id_at(square) else {
                continue;
            };
            let piece = self.piece(id).ok_or_else(|| {
                ChessError::InvariantViolation(format!("slot {square} refers to unknown piece"))
            })?;
            if !piece.is_on_board() || piece.position != square {
                return Err(ChessError::InvariantViolation(format!(
                    "slot {square} holds piece {} recorded at {} ({:?})",
                    id.index(),
                    piece.position,
                    piece.status
                )));
            }
        }
        let mut expected = [0u64; 2];
        for (index, piece) in self.pieces.iter().enumerate() {
            if piece.is_on_board() {
                expected[piece.team.index()] |= piece.position.bit();
            }
            if piece.is_on_board()
                && self.piece_id_at(piece.position).map(PieceId::index) != Some(index)
            {
                return Err(ChessError::InvariantViolation(format!(
                    "piece {index} is on the board at {} but the slot disagrees",
                    piece.position
                )));
            }
        }
        if expected != self.occupancy {
            return Err(ChessError::InvariantViolation(
                "occupancy masks disagree with piece positions".to_owned(),
            ));
        }
        Ok(())
    }
}
