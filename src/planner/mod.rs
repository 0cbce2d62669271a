// Query → prompt → one model call → structured decode or raw fallback.

pub mod decode;
pub mod prompt;
pub mod types;

pub use types::{PlanOutcome, Query, TravelOption};

use crate::config::Config;
use crate::credential::Credential;
use crate::error::Result;
use crate::llm::LlmClient;
use std::time::Duration;
use tracing::info;

pub struct Planner {
    llm: LlmClient,
    format_instructions: bool,
}

impl Planner {
    pub fn new(llm: LlmClient, format_instructions: bool) -> Self {
        Self {
            llm,
            format_instructions,
        }
    }

    pub fn from_config(config: &Config, credential: &Credential) -> Result<Self> {
        let llm = LlmClient::new(
            config.llm.provider.clone(),
            credential.expose().to_string(),
            config.llm.model(),
            config.llm.max_tokens,
            config.llm.base_url.clone(),
        )?
        .with_timeout(Duration::from_secs(config.llm.timeout_secs))?;
        Ok(Self::new(llm, config.planner.format_instructions))
    }

    pub fn llm(&self) -> &LlmClient {
        &self.llm
    }

    /// Issue exactly one completion for `query`. Call failures propagate;
    /// output that does not decode comes back as [`PlanOutcome::Raw`].
    pub async fn plan(&self, query: &Query) -> Result<PlanOutcome> {
        info!(
            source = query.source(),
            destination = query.destination(),
            "requesting travel options"
        );

        let prompt = prompt::format_prompt(query, self.format_instructions);
        let text = self.llm.complete(&prompt).await?;
        let outcome = decode::decode(&text);

        match &outcome {
            PlanOutcome::Options { options } => info!(count = options.len(), "decoded options"),
            PlanOutcome::Raw { text } => {
                info!(bytes = text.len(), "falling back to raw model output")
            }
        }
        Ok(outcome)
    }
}
