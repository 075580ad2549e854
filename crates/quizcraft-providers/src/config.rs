//! Provider configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizcraft_core::traits::QuizProvider;

use crate::anthropic::AnthropicProvider;
use crate::gateway::QuizGateway;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single LLM provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Anthropic {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Anthropic {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Anthropic")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Top-level quizcraft configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizcraftConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Default provider to use.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Default model to use.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Sampling temperature for quiz generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Max tokens per generation call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Path of the JSON score ledger file.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
}

fn default_provider() -> String {
    "anthropic".to_string()
}
fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_ledger_path() -> PathBuf {
    PathBuf::from("./quizcraft-scores.json")
}

impl Default for QuizcraftConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            ledger_path: default_ledger_path(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    resolve_vars_with(s, |name| std::env::var(name).ok())
}

/// Substitute `${VAR}` references using the given lookup. Unknown variables
/// resolve to the empty string.
fn resolve_vars_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = lookup(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        ProviderConfig::Anthropic { api_key, base_url } => ProviderConfig::Anthropic {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizcraft.toml` in the current directory
/// 2. `~/.config/quizcraft/config.toml`
///
/// Environment variable overrides: `QUIZCRAFT_ANTHROPIC_KEY`,
/// `QUIZCRAFT_OPENAI_KEY`.
pub fn load_config() -> Result<QuizcraftConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizcraftConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizcraft.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizcraftConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizcraftConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("QUIZCRAFT_ANTHROPIC_KEY") {
        config
            .providers
            .entry("anthropic".into())
            .or_insert(ProviderConfig::Anthropic {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Anthropic { api_key, .. }) =
            config.providers.get_mut("anthropic")
        {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("QUIZCRAFT_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizcraft"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn QuizProvider> {
    match config {
        ProviderConfig::Anthropic { api_key, base_url } => {
            Arc::new(AnthropicProvider::new(api_key, base_url.clone()))
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Arc::new(OpenAiProvider::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
        )),
        ProviderConfig::Ollama { base_url } => Arc::new(OllamaProvider::new(base_url)),
    }
}

/// Build the generation gateway for a named provider (or the default).
pub fn create_gateway(config: &QuizcraftConfig, provider_name: Option<&str>) -> Result<QuizGateway> {
    let name = provider_name.unwrap_or(&config.default_provider);
    let provider_config = config.providers.get(name).with_context(|| {
        format!(
            "provider '{name}' not found in config. Available: {:?}",
            config.providers.keys().collect::<Vec<_>>()
        )
    })?;

    let provider = create_provider(provider_config);
    Ok(QuizGateway::new(
        provider,
        config.default_model.clone(),
        config.max_tokens,
        config.temperature,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests use the pure lookup variant; process env is never mutated.
    #[test]
    fn resolve_vars_basic() {
        let lookup = |name: &str| (name == "MY_KEY").then(|| "hello".to_string());
        assert_eq!(resolve_vars_with("${MY_KEY}", lookup), "hello");
        assert_eq!(
            resolve_vars_with("prefix_${MY_KEY}_suffix", lookup),
            "prefix_hello_suffix"
        );
        // Unknown variables resolve to empty, unterminated refs pass through.
        assert_eq!(resolve_vars_with("${OTHER}", lookup), "");
        assert_eq!(resolve_vars_with("${MY_KEY", lookup), "${MY_KEY");
    }

    #[test]
    fn default_config() {
        let config = QuizcraftConfig::default();
        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.ledger_path, PathBuf::from("./quizcraft-scores.json"));
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "anthropic"
default_model = "claude-sonnet-4-20250514"
ledger_path = "/tmp/scores.json"

[providers.anthropic]
type = "anthropic"
api_key = "sk-test"

[providers.openai]
type = "openai"
api_key = "sk-openai"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;
        let config: QuizcraftConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert!(matches!(
            config.providers.get("anthropic"),
            Some(ProviderConfig::Anthropic { .. })
        ));
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/scores.json"));
    }

    #[test]
    fn top_level_keys_after_a_table_are_not_top_level() {
        // TOML assigns keys following a table header to that table, so a
        // config written in this order loses its top-level settings. The
        // internally-tagged provider enum ignores the strays and the
        // top-level fields fall back to defaults.
        let toml_str = r#"
[providers.ollama]
type = "ollama"
ledger_path = "/tmp/misplaced.json"
"#;
        let config: QuizcraftConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ledger_path, default_ledger_path());
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::Anthropic {
            api_key: "sk-secret".into(),
            base_url: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn create_gateway_requires_known_provider() {
        let config = QuizcraftConfig::default();
        assert!(create_gateway(&config, Some("nope")).is_err());
        // Default config has no providers configured either.
        assert!(create_gateway(&config, None).is_err());
    }
}
