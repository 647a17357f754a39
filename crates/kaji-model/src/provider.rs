// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;

use crate::ChatRequest;

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Human-readable provider name for status display.
    fn name(&self) -> &str;

    /// Model identifier as reported to users.
    fn model_name(&self) -> &str;

    /// Send a chat request and return the model's full reply text.
    ///
    /// One request, one reply: providers answer with the complete text
    /// rather than a token stream.
    async fn complete(&self, req: ChatRequest) -> anyhow::Result<String>;
}
