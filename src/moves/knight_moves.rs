//! Knight jump tables, plus the table builder the other leapers share.

use crate::game_state::chess_types::Square;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_STEPS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

/// For every square, the mask of squares one of `steps` away that stay on
/// the board.
pub(crate) const fn leaper_table(steps: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut index = 0u8;

    while index < 64 {
        if let Some(square) = Square::from_index(index) {
            let mut step = 0;
            while step < steps.len() {
                let (file_step, rank_step) = steps[step];
                if let Some(target) = square.offset(file_step, rank_step) {
                    table[index as usize] |= target.bit();
                }
                step += 1;
            }
        }
        index += 1;
    }

    table
}
