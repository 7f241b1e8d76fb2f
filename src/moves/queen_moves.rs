use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::queen_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn queen_on_empty_board_from_d4_has_twenty_seven_squares() {
        let d4 = Square::new(3, 3).expect("d4");
        assert_eq!(queen_attacks(d4, 0).count_ones(), 27);
    }

    #[test]
    fn queen_attacks_stop_at_blockers() {
        let d4 = Square::new(3, 3).expect("d4");
        let d6 = Square::new(3, 5).expect("d6");
        let g4 = Square::new(6, 3).expect("g4");
        let attacks = queen_attacks(d4, d6.bit() | g4.bit());

        assert_ne!(attacks & d6.bit(), 0);
        assert_ne!(attacks & g4.bit(), 0);
        assert_eq!(attacks & Square::new(3, 6).expect("d7").bit(), 0);
        assert_eq!(attacks & Square::new(7, 3).expect("h4").bit(), 0);
    }
}
