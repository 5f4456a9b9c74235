// Relay configuration, resolved from the environment at startup

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Prompt-length ceiling in characters. Zero disables the check.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 6000;
pub const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(ProviderKind::Gemini),
            "openai" | "openai_compatible" => Some(ProviderKind::OpenAi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn key_env_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }
}

/// Everything the generate handler needs, shared read-only across requests.
///
/// The API key is carried as-is even when unset: a missing key is a
/// per-request `ServerMisconfigured` answer, not a startup crash.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub max_prompt_chars: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            provider: ProviderKind::Gemini,
            model: ProviderKind::Gemini.default_model().to_string(),
            api_key: String::new(),
            base_url: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        let provider = env::var("RELAY_PROVIDER")
            .ok()
            .and_then(|s| ProviderKind::parse(&s))
            .unwrap_or(ProviderKind::Gemini);

        let model = env::var("RELAY_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        ProxyConfig {
            provider,
            model,
            api_key: env::var(provider.key_env_var()).unwrap_or_default(),
            base_url: env::var("RELAY_BASE_URL").ok().filter(|s| !s.trim().is_empty()),
            max_output_tokens: env::var("RELAY_MAX_OUTPUT_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            temperature: env::var("RELAY_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TEMPERATURE),
            max_prompt_chars: env::var("RELAY_MAX_PROMPT_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_PROMPT_CHARS),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Preferred listen port, `RELAY_HTTP_PORT` or the default.
pub fn http_port() -> u16 {
    env::var("RELAY_HTTP_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HTTP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("Google"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("openai_compatible"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("cohere"), None);
    }

    #[test]
    fn test_default_config_is_gemini_with_bounded_generation() {
        let config = ProxyConfig::default();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert!(!config.has_api_key());
        assert_eq!(config.max_output_tokens, 1024);
        assert_eq!(config.max_prompt_chars, 6000);
    }

    #[test]
    fn test_key_env_var_follows_provider() {
        assert_eq!(ProviderKind::Gemini.key_env_var(), "GEMINI_API_KEY");
        assert_eq!(ProviderKind::OpenAi.key_env_var(), "OPENAI_API_KEY");
    }
}
