//! Provider endpoint configuration (`[providers]` section).

use council_domain::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base URLs per provider family. The defaults point at the public
/// APIs; self-hosted or proxy deployments override them here. Extra
/// OpenAI-compatible endpoints are keyed by the provider name used in
/// the participant entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    pub openai: String,
    pub deepseek: String,
    pub mistral: String,
    pub anthropic: String,
    pub compatible: BTreeMap<String, String>,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com/v1".to_string(),
            deepseek: "https://api.deepseek.com/v1".to_string(),
            mistral: "https://api.mistral.ai/v1".to_string(),
            anthropic: "https://api.anthropic.com/v1".to_string(),
            compatible: BTreeMap::new(),
        }
    }
}

impl ProvidersSection {
    /// Base URL for a provider family, if one is configured.
    pub fn base_url(&self, provider: &Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => Some(&self.openai),
            Provider::DeepSeek => Some(&self.deepseek),
            Provider::Mistral => Some(&self.mistral),
            Provider::Anthropic => Some(&self.anthropic),
            Provider::Compatible(name) => self.compatible.get(name).map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_known_families() {
        let section = ProvidersSection::default();
        assert!(section.base_url(&Provider::DeepSeek).unwrap().contains("deepseek"));
        assert!(section.base_url(&Provider::Anthropic).unwrap().contains("anthropic"));
    }

    #[test]
    fn compatible_endpoints_resolve_by_name() {
        let config: ProvidersSection = toml::from_str(
            r#"
[compatible]
groq = "https://api.groq.com/openai/v1"
"#,
        )
        .unwrap();

        let provider = Provider::Compatible("groq".to_string());
        assert_eq!(
            config.base_url(&provider),
            Some("https://api.groq.com/openai/v1")
        );
        assert_eq!(
            config.base_url(&Provider::Compatible("unknown".to_string())),
            None
        );
    }
}
