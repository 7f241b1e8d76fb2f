use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::piece_capability::PieceCapability;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::negamax::{search, SearchConfig};

/// Fixed-depth negamax engine. `GoParams::depth` overrides the configured depth.
pub struct NegamaxEngine {
    config: SearchConfig,
    scorer: Box<dyn BoardScorer>,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, Box::new(MaterialScorer))
    }

    pub fn with_scorer(config: SearchConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "szachy negamax"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        capability: &dyn PieceCapability,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let config = SearchConfig {
            max_depth: params.depth.unwrap_or(self.config.max_depth),
            ..self.config
        };
        let team = game_state.side_to_move();

        let result = search(game_state, capability, self.scorer.as_ref(), team, config)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "depth {} score {} nodes {}",
            config.max_depth, result.best_score, result.nodes
        ));
        if params.depth.is_some() {
            out.info_lines.push(format!(
                "negamax_engine configured_depth {} overridden",
                self.config.max_depth
            ));
        }

        Ok(out)
    }
}
