//! Enemy decision pipeline
//!
//! Each living enemy unit gets its actions from a `DecisionProvider`:
//! either the external inference service or the local heuristic. Providers
//! only propose; every proposed action is pushed through the same
//! validator/executor path as human input, so a confused model can never
//! break the rules, only waste its turn.

pub mod heuristic;
pub mod llm_provider;
pub mod parser;
pub mod pipeline;
pub mod prompt;

pub use heuristic::HeuristicProvider;
pub use llm_provider::LlmProvider;
pub use pipeline::run_enemy_phase;

use crate::battle::state::BattleState;
use crate::core::error::Result;
use crate::journal::EventSink;

/// Source of a unit's intended actions for this turn
///
/// Returns the raw action objects in the crate's wire format; the pipeline
/// converts and validates each one independently. An `Err` means the whole
/// turn is skipped for this unit ("no command"), while a malformed element
/// inside an `Ok` list only costs that one action.
pub trait DecisionProvider {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Propose actions for the unit at roster index `unit`
    fn decide(
        &mut self,
        state: &BattleState,
        unit: usize,
        journal: &mut dyn EventSink,
    ) -> Result<Vec<serde_json::Value>>;
}
