//! King step tables. Castling destinations are added by the piece capability,
//! not here, because they depend on history and attacked squares.

use crate::game_state::chess_types::Square;
use crate::moves::knight_moves::leaper_table;

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}
