// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier: "google" | "mock"
    pub provider: String,
    /// Model name forwarded to the provider API (discussion turns)
    pub name: String,
    /// Model used for the single-shot topic analysis. Falls back to `name`.
    /// Analysis benefits from a stronger model than quick follow-up turns.
    pub analysis_name: Option<String>,
    /// Environment variable that holds the API key (read at runtime)
    pub api_key_env: Option<String>,
    /// Explicit API key; prefer api_key_env in config files to avoid secrets
    /// in version-controlled files
    pub api_key: Option<String>,
    /// Base URL override. Useful for local proxies.
    pub base_url: Option<String>,
    /// Maximum tokens to request in a single completion
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0–2.0)
    pub temperature: Option<f32>,
    /// Path to a YAML-free line-per-reply mock file (used when provider = "mock").
    /// Supports `~` expansion.
    pub mock_responses: Option<String>,
}

impl ModelConfig {
    /// Model name to use for the single-shot analysis call.
    pub fn analysis_model(&self) -> &str {
        self.analysis_name.as_deref().unwrap_or(&self.name)
    }

    /// The mock-responses path with `~` expanded.
    pub fn mock_responses_path(&self) -> Option<String> {
        self.mock_responses
            .as_ref()
            .map(|p| shellexpand::tilde(p).into_owned())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "google".into(),
            name: "gemini-2.5-flash".into(),
            analysis_name: Some("gemini-2.5-pro".into()),
            // The google driver registry knows its canonical env var
            // (GEMINI_API_KEY); leaving this None lets that default apply.
            api_key_env: None,
            api_key: None,
            base_url: None,
            max_tokens: Some(8192),
            temperature: Some(0.2),
            mock_responses: None,
        }
    }
}

/// Prompt templating knobs for the analysis and discussion system prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Persona line injected into both prompts, e.g.
    /// "an expert in classical rhetoric".
    pub persona: String,
    /// Extra free-form instructions appended to the analysis prompt.
    pub extra_instructions: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            persona: "a meticulous subject-matter expert".into(),
            extra_instructions: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Use ASCII glyphs instead of Unicode bullets.
    #[serde(default)]
    pub ascii: bool,
    /// Wrap width override; 0 means "use the pane width".
    #[serde(default)]
    pub wrap_width: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { ascii: false, wrap_width: 0 }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_google() {
        let cfg = Config::default();
        assert_eq!(cfg.model.provider, "google");
        assert_eq!(cfg.model.name, "gemini-2.5-flash");
    }

    #[test]
    fn analysis_model_falls_back_to_name() {
        let cfg = ModelConfig { analysis_name: None, ..ModelConfig::default() };
        assert_eq!(cfg.analysis_model(), "gemini-2.5-flash");
    }

    #[test]
    fn analysis_model_prefers_explicit_override() {
        let cfg = ModelConfig::default();
        assert_eq!(cfg.analysis_model(), "gemini-2.5-pro");
    }

    #[test]
    fn mock_responses_path_expands_tilde() {
        let cfg = ModelConfig {
            mock_responses: Some("~/replies.txt".into()),
            ..ModelConfig::default()
        };
        let path = cfg.mock_responses_path().unwrap();
        assert!(!path.starts_with('~'), "tilde not expanded: {path}");
        assert!(path.ends_with("replies.txt"));
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let cfg: Config = toml::from_str(
            r#"[model]
provider = "mock"
name = "mock-model""#,
        )
        .unwrap();
        assert_eq!(cfg.model.provider, "mock");
        assert_eq!(cfg.prompt.persona, PromptConfig::default().persona);
        assert!(!cfg.tui.ascii);
    }
}
