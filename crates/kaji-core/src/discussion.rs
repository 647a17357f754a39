// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use anyhow::Context;
use kaji_config::PromptConfig;
use kaji_model::{ChatMessage, ChatRequest, ModelProvider};
use tracing::debug;

/// Run the single-shot topic analysis.
pub async fn analyze(
    provider: &dyn ModelProvider,
    prompt_cfg: &PromptConfig,
    topic: &str,
) -> anyhow::Result<String> {
    let prompt = crate::analysis_prompt(
        &prompt_cfg.persona,
        topic,
        prompt_cfg.extra_instructions.as_deref(),
    );
    debug!(model = %provider.model_name(), "requesting topic analysis");
    provider
        .complete(ChatRequest::single(prompt))
        .await
        .context("the model failed to produce an analysis for this topic")
}

/// A follow-up discussion grounded in a completed analysis.
///
/// Owns the system instruction and the append-only message history. The
/// Gemini REST API is stateless, so "provider-side" session state lives here
/// and the full history is resent on every turn.
pub struct Discussion {
    system: String,
    history: Vec<ChatMessage>,
}

impl Discussion {
    pub fn new(prompt_cfg: &PromptConfig, topic: &str, analysis: &str) -> Self {
        Self {
            system: crate::discussion_system(&prompt_cfg.persona, topic, analysis),
            history: Vec::new(),
        }
    }

    /// The conversation so far, in display order.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send a follow-up message and append the model's reply.
    ///
    /// The user message is appended before the provider call and RETAINED if
    /// the call fails — the caller surfaces the error separately, and the
    /// user's text stays available for the next attempt.
    pub async fn send(
        &mut self,
        provider: &dyn ModelProvider,
        text: &str,
    ) -> anyhow::Result<String> {
        self.history.push(ChatMessage::user(text));

        let req = ChatRequest::with_system(self.system.clone(), self.history.clone());
        debug!(turns = self.history.len(), "sending follow-up message");

        let reply = provider
            .complete(req)
            .await
            .context("the model failed to respond")?;

        self.history.push(ChatMessage::model(reply.clone()));
        Ok(reply)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
