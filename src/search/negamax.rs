//! Depth-limited negamax search with alpha-beta pruning.
//!
//! The search walks the live game state in place: every move is applied,
//! searched, and undone before the next sibling is tried, so the state handed
//! in is identical to the state handed back. Scores are fail-hard and always
//! from the perspective of the side to move.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Team;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_undo::undo_last_move;
use crate::move_generation::move_generator::{generate_moves, GeneratedMove, MoveLegality};
use crate::moves::piece_capability::PieceCapability;
use crate::search::board_scoring::BoardScorer;

/// Score of being mated at the root; mates further away score closer to zero.
pub const MATE_SCORE: i32 = 100_000;
pub const SCORE_INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub legality: MoveLegality,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            legality: MoveLegality::Strict,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<GeneratedMove>,
    pub best_score: i32,
    pub nodes: u64,
}

/// Searches `config.max_depth` plies for `team`, which must be on move.
pub fn search<C, S>(
    game_state: &mut GameState,
    capability: &C,
    scorer: &S,
    team: Team,
    config: SearchConfig,
) -> ChessResult<SearchResult>
where
    C: PieceCapability + ?Sized,
    S: BoardScorer + ?Sized,
{
    if team != game_state.side_to_move() {
        return Err(ChessError::WrongSide {
            expected: game_state.side_to_move(),
            found: team,
        });
    }

    let mut negamax = Negamax {
        capability,
        scorer,
        legality: config.legality,
        nodes: 0,
        best_move: None,
    };
    let best_score = negamax.node(
        game_state,
        config.max_depth,
        -SCORE_INFINITY,
        SCORE_INFINITY,
        0,
    )?;

    debug!(
        %team,
        depth = config.max_depth,
        nodes = negamax.nodes,
        score = best_score,
        best = ?negamax.best_move.map(|m| m.mv),
        "search finished"
    );

    Ok(SearchResult {
        best_move: negamax.best_move,
        best_score,
        nodes: negamax.nodes,
    })
}

struct Negamax<'a, C: ?Sized, S: ?Sized> {
    capability: &'a C,
    scorer: &'a S,
    legality: MoveLegality,
    nodes: u64,
    best_move: Option<GeneratedMove>,
}

impl<C, S> Negamax<'_, C, S>
where
    C: PieceCapability + ?Sized,
    S: BoardScorer + ?Sized,
{
    fn node(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> ChessResult<i32> {
        self.nodes += 1;

        let side = game_state.side_to_move();
        if game_state.board().king_square(side).is_none() {
            return Ok(-MATE_SCORE + ply);
        }
        if depth == 0 {
            return Ok(self.scorer.score(game_state));
        }

        let moves = generate_moves(game_state, self.capability, self.legality);
        if moves.is_empty() {
            return Ok(terminal_score(game_state, self.capability, ply));
        }

        for generated in moves {
            apply_move(game_state, generated.mover, generated.mv.to, generated.special)?;
            let child = self.node(game_state, depth - 1, -beta, -alpha, ply + 1);
            undo_last_move(game_state)?;
            let score = -child?;

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
                if ply == 0 {
                    self.best_move = Some(generated);
                }
            }
        }

        Ok(alpha)
    }
}

fn terminal_score<C: PieceCapability + ?Sized>(
    game_state: &GameState,
    capability: &C,
    ply: i32,
) -> i32 {
    if is_king_in_check(game_state.board(), capability, game_state.side_to_move()) {
        -MATE_SCORE + ply
    } else {
        0
    }
}
