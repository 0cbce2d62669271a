pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod llm;
pub mod output;
pub mod planner;
pub mod web;

/// CLI override for LLM provider/model.
pub struct LlmOverride {
    pub provider: Option<llm::Provider>,
    pub model: Option<String>,
}

impl LlmOverride {
    pub fn from_args(provider: Option<String>, model: Option<String>) -> Option<Self> {
        if provider.is_none() && model.is_none() {
            return None;
        }
        Some(Self {
            provider: provider.as_deref().map(llm::Provider::from_name),
            model,
        })
    }

    /// Apply on top of the file config. A provider switch without an explicit
    /// model resets the model to that provider's default.
    pub fn apply(self, llm: &mut config::LlmConfig) {
        if let Some(provider) = self.provider {
            if provider != llm.provider {
                llm.model = None;
            }
            llm.provider = provider;
        }
        if let Some(model) = self.model {
            llm.model = Some(model);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_no_override() {
        assert!(LlmOverride::from_args(None, None).is_none());
    }

    #[test]
    fn provider_switch_resets_model() {
        let mut llm = config::LlmConfig {
            model: Some("gemini-1.5-pro".into()),
            ..Default::default()
        };
        LlmOverride::from_args(Some("anthropic".into()), None)
            .unwrap()
            .apply(&mut llm);
        assert_eq!(llm.provider, llm::Provider::Anthropic);
        assert_eq!(llm.model(), llm::Provider::Anthropic.default_model());
    }

    #[test]
    fn model_override_keeps_provider() {
        let mut llm = config::LlmConfig::default();
        LlmOverride::from_args(None, Some("gemini-2.0-flash".into()))
            .unwrap()
            .apply(&mut llm);
        assert_eq!(llm.provider, llm::Provider::Gemini);
        assert_eq!(llm.model(), "gemini-2.0-flash");
    }
}
