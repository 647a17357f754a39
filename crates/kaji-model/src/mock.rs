// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;

use crate::ChatRequest;

/// Deterministic mock provider for tests. Echoes the last user message
/// back as the reply.
#[derive(Default)]
pub struct MockProvider;

#[async_trait]
impl crate::ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }
    fn model_name(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, req: ChatRequest) -> anyhow::Result<String> {
        let reply = req.last_user_text().unwrap_or("[no input]");
        Ok(format!("MOCK: {reply}"))
    }
}

/// A pre-scripted mock provider. Each call to `complete` pops the next
/// reply from the front of the queue, so tests can specify exact
/// conversations without network access.
pub struct ScriptedMockProvider {
    replies: Mutex<Vec<String>>,
    /// The last `ChatRequest` seen by this provider.
    /// Written on each `complete()` call so tests can inspect what was sent.
    pub last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedMockProvider {
    /// Build a provider from an ordered list of replies.
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies),
            last_request: Mutex::new(None),
        }
    }

    /// Convenience: provider that always returns the same reply first.
    pub fn always_text(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }

    /// Load replies from a file. Replies are separated by lines containing
    /// only `---`, so a single reply may span multiple lines.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading mock replies from {}", path.display()))?;
        let replies: Vec<String> = text
            .split("\n---\n")
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect();
        Ok(Self::new(replies))
    }
}

#[async_trait]
impl crate::ModelProvider for ScriptedMockProvider {
    fn name(&self) -> &str {
        "scripted-mock"
    }
    fn model_name(&self) -> &str {
        "scripted-mock-model"
    }

    async fn complete(&self, req: ChatRequest) -> anyhow::Result<String> {
        *self.last_request.lock().unwrap() = Some(req);
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default fallback when all replies are consumed
            Ok("[no more replies]".into())
        } else {
            Ok(replies.remove(0))
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
