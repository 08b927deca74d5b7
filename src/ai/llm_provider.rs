//! Decision provider backed by the inference service
//!
//! Builds the battlefield prompt, blocks on the chat call, and runs the
//! reply through sanitize/parse. The simulation loop is synchronous, so
//! the provider owns its own tokio runtime and completes each request
//! before the unit's actions are applied - a timeout or transport failure
//! surfaces as an error and the unit simply skips its turn.

use serde_json::Value;

use crate::ai::parser::{parse_action_values, sanitize};
use crate::ai::prompt::build_prompt;
use crate::ai::DecisionProvider;
use crate::battle::state::BattleState;
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::journal::{EventSink, GameEvent};
use crate::llm::client::OllamaClient;

pub struct LlmProvider {
    client: OllamaClient,
    runtime: tokio::runtime::Runtime,
}

impl LlmProvider {
    pub fn new(client: OllamaClient) -> Result<Self> {
        Ok(Self {
            client,
            runtime: tokio::runtime::Runtime::new()?,
        })
    }

    pub fn from_config(config: &BattleConfig) -> Result<Self> {
        Self::new(OllamaClient::from_config(config)?)
    }
}

impl DecisionProvider for LlmProvider {
    fn name(&self) -> &'static str {
        "llm"
    }

    fn decide(
        &mut self,
        state: &BattleState,
        unit: usize,
        journal: &mut dyn EventSink,
    ) -> Result<Vec<Value>> {
        let unit_name = state.units[unit].name.clone();
        let prompt = build_prompt(state, unit);
        journal.record(GameEvent::Prompt {
            unit: unit_name.clone(),
            text: prompt.clone(),
        });

        tracing::debug!(unit = %unit_name, model = %self.client.model(), "requesting decision");
        let raw = self.runtime.block_on(self.client.chat(&prompt))?;
        journal.record(GameEvent::RawResponse {
            unit: unit_name.clone(),
            text: raw.clone(),
        });

        let sanitized = sanitize(&raw);
        journal.record(GameEvent::SanitizedResponse {
            unit: unit_name.clone(),
            text: sanitized.clone(),
        });
        tracing::debug!(unit = %unit_name, response = %sanitized, "decision received");

        parse_action_values(&sanitized)
    }
}
