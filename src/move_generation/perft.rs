//! Perft node counting over apply/undo, used to validate move generation.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_undo::undo_last_move;
use crate::move_generation::move_generator::{generate_moves, MoveLegality};
use crate::moves::piece_capability::PieceCapability;

/// Number of leaf positions `depth` plies below `game_state`.
///
/// The state is walked in place and is identical to the input on return.
pub fn perft<C: PieceCapability + ?Sized>(
    game_state: &mut GameState,
    capability: &C,
    depth: u8,
) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_moves(game_state, capability, MoveLegality::Strict);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for generated in moves {
        apply_move(game_state, generated.mover, generated.mv.to, generated.special)?;
        let sub = perft(game_state, capability, depth - 1);
        undo_last_move(game_state)?;
        nodes += sub?;
    }

    Ok(nodes)
}
