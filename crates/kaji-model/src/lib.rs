// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod types;
mod provider;
mod google;
mod mock;

pub use types::*;
pub use provider::ModelProvider;
pub use google::{GoogleApiError, GoogleProvider};
pub use mock::{MockProvider, ScriptedMockProvider};

use anyhow::{bail, Context};
use kaji_config::ModelConfig;

/// Construct a boxed [`ModelProvider`] from configuration.
///
/// Provider selection:
/// - `"google"` → [`GoogleProvider`]
/// - `"mock"` → [`ScriptedMockProvider`] if a replies file is configured,
///   otherwise [`MockProvider`] (echo-back)
///
/// Credential validation happens here: a missing API key fails at
/// construction, not at the first request.
pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Box<dyn ModelProvider>> {
    match cfg.provider.as_str() {
        "google" => {
            let key = resolve_api_key(cfg).context(
                "no API key: set GEMINI_API_KEY (or model.api_key / model.api_key_env in config)",
            )?;
            Ok(Box::new(GoogleProvider::new(
                cfg.name.clone(),
                key,
                cfg.base_url.clone(),
                cfg.max_tokens,
                cfg.temperature,
            )))
        }
        "mock" => {
            if let Some(path) = cfg.mock_responses_path() {
                Ok(Box::new(ScriptedMockProvider::from_file(std::path::Path::new(&path))?))
            } else {
                Ok(Box::new(MockProvider))
            }
        }
        other => bail!("unknown model provider: {other}"),
    }
}

fn resolve_api_key(cfg: &ModelConfig) -> Option<String> {
    if let Some(k) = &cfg.api_key {
        return Some(k.clone());
    }
    let env = cfg.api_key_env.as_deref().unwrap_or("GEMINI_API_KEY");
    std::env::var(env).ok()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(provider: &str) -> ModelConfig {
        ModelConfig {
            provider: provider.into(),
            ..ModelConfig::default()
        }
    }

    #[test]
    fn mock_provider_needs_no_credentials() {
        let p = from_config(&cfg("mock")).unwrap();
        assert_eq!(p.name(), "mock");
    }

    #[test]
    fn google_with_explicit_key_constructs() {
        let mut c = cfg("google");
        c.api_key = Some("test-key".into());
        let p = from_config(&c).unwrap();
        assert_eq!(p.name(), "google");
    }

    #[test]
    fn google_without_any_key_fails_fast() {
        let mut c = cfg("google");
        c.api_key = None;
        // Point at an env var that cannot exist so the ambient environment
        // does not leak into the test.
        c.api_key_env = Some("KAJI_TEST_NO_SUCH_KEY_VAR".into());
        let err = from_config(&c).err().unwrap();
        assert!(err.to_string().contains("no API key"), "got: {err}");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = from_config(&cfg("openai")).err().unwrap();
        assert!(err.to_string().contains("unknown model provider"));
    }
}
