//! Pawn capture tables and push generation.

use crate::game_state::chess_types::{Square, Team};
use crate::moves::knight_moves::leaper_table;

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, 1), (1, 1)]);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, -1), (1, -1)]);

#[inline]
pub const fn pawn_attacks(team: Team, square: Square) -> u64 {
    match team {
        Team::Light => LIGHT_PAWN_ATTACKS[square.index() as usize],
        Team::Dark => DARK_PAWN_ATTACKS[square.index() as usize],
    }
}

/// Forward destinations: one step onto an empty square, two from the
/// starting rank when both squares are empty.
pub fn pawn_pushes(team: Team, square: Square, occupancy: u64) -> u64 {
    let forward = team.forward();
    let Some(one_step) = square.offset(0, forward) else {
        return 0;
    };
    if occupancy & one_step.bit() != 0 {
        return 0;
    }

    let mut pushes = one_step.bit();
    let start_rank = if team == Team::Light {
        team.back_rank() + 1
    } else {
        team.back_rank() - 1
    };
    if square.rank() == start_rank {
        if let Some(two_step) = one_step.offset(0, forward) {
            if occupancy & two_step.bit() == 0 {
                pushes |= two_step.bit();
            }
        }
    }
    pushes
}

#[cfg(test)]
mod tests {
    use super::{pawn_attacks, pawn_pushes};
    use crate::game_state::chess_types::{Square, Team};

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("test square on board")
    }

    #[test]
    fn light_pawn_attacks_from_e2() {
        let expected = sq(3, 2).bit() | sq(5, 2).bit();
        assert_eq!(pawn_attacks(Team::Light, sq(4, 1)), expected);
    }

    #[test]
    fn dark_pawn_attacks_from_e7() {
        let expected = sq(3, 5).bit() | sq(5, 5).bit();
        assert_eq!(pawn_attacks(Team::Dark, sq(4, 6)), expected);
    }

    #[test]
    fn edge_pawn_attacks_one_square() {
        assert_eq!(pawn_attacks(Team::Light, sq(0, 1)).count_ones(), 1);
    }

    #[test]
    fn double_push_only_from_start_rank() {
        assert_eq!(
            pawn_pushes(Team::Light, sq(4, 1), 0),
            sq(4, 2).bit() | sq(4, 3).bit()
        );
        assert_eq!(pawn_pushes(Team::Light, sq(4, 2), 0), sq(4, 3).bit());
        assert_eq!(
            pawn_pushes(Team::Dark, sq(4, 6), 0),
            sq(4, 5).bit() | sq(4, 4).bit()
        );
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        assert_eq!(pawn_pushes(Team::Light, sq(4, 1), sq(4, 2).bit()), 0);
        assert_eq!(
            pawn_pushes(Team::Light, sq(4, 1), sq(4, 3).bit()),
            sq(4, 2).bit()
        );
    }
}
