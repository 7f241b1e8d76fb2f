//! Rook sliding attacks. Rays stop on the first occupied square, which is
//! included so captures fall out of the same mask.

use crate::game_state::chess_types::Square;

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    attacks |= trace_ray(square, 0, 1, occupancy);
    attacks |= trace_ray(square, 0, -1, occupancy);
    attacks |= trace_ray(square, 1, 0, occupancy);
    attacks |= trace_ray(square, -1, 0, occupancy);

    attacks
}

/// Walks from `square` in one direction until the board edge or a blocker.
pub(crate) fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut cursor = square.offset(file_step, rank_step);

    while let Some(target) = cursor {
        let bit = target.bit();
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        cursor = target.offset(file_step, rank_step);
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn rook_on_empty_board_from_d4_has_fourteen_squares() {
        let d4 = Square::new(3, 3).expect("d4");
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = Square::new(0, 0).expect("a1");
        let a4 = Square::new(0, 3).expect("a4");
        let a5 = Square::new(0, 4).expect("a5");
        let attacks = rook_attacks(a1, a4.bit());

        assert_ne!(attacks & a4.bit(), 0);
        assert_eq!(attacks & a5.bit(), 0);
    }
}
