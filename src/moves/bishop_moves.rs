//! Bishop sliding attacks.

use crate::game_state::chess_types::Square;
use crate::moves::rook_moves::trace_ray;

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    attacks |= trace_ray(square, 1, 1, occupancy);
    attacks |= trace_ray(square, -1, 1, occupancy);
    attacks |= trace_ray(square, 1, -1, occupancy);
    attacks |= trace_ray(square, -1, -1, occupancy);

    attacks
}

#[cfg(test)]
mod tests {
    use super::bishop_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn bishop_on_empty_board_from_d4_has_thirteen_squares() {
        let d4 = Square::new(3, 3).expect("d4");
        assert_eq!(bishop_attacks(d4, 0).count_ones(), 13);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let c1 = Square::new(2, 0).expect("c1");
        let e3 = Square::new(4, 2).expect("e3");
        let f4 = Square::new(5, 3).expect("f4");
        let attacks = bishop_attacks(c1, e3.bit());

        assert_ne!(attacks & e3.bit(), 0);
        assert_eq!(attacks & f4.bit(), 0);
    }
}
