// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Google Gemini driver — native Generative Language API.
//!
//! Uses the non-streaming `generateContent` endpoint.
//!
//! # Auth
//! API key via `?key=...` query param, validated at construction time.
//!
//! # Endpoint pattern
//! `POST https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent`

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{ChatRequest, Role};

/// Errors specific to the Gemini HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum GoogleApiError {
    #[error("Gemini API error {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("Gemini response contained no candidate text")]
    EmptyResponse,
}

pub struct GoogleProvider {
    model: String,
    api_key: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://generativelanguage.googleapis.com".into()),
            max_tokens: max_tokens.unwrap_or(8192),
            temperature: temperature.unwrap_or(0.2),
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, req: &ChatRequest) -> Value {
        let contents: Vec<Value> = req
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Model => "model",
                };
                json!({ "role": role, "parts": [{ "text": m.content }] })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.max_tokens,
                "temperature": self.temperature,
            }
        });
        if let Some(system) = &req.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        body
    }
}

#[async_trait]
impl crate::ModelProvider for GoogleProvider {
    fn name(&self) -> &str { "google" }
    fn model_name(&self) -> &str { &self.model }

    async fn complete(&self, req: ChatRequest) -> anyhow::Result<String> {
        let body = self.request_body(&req);
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        debug!(model = %self.model, turns = req.messages.len(), "sending Gemini request");

        let resp = self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GoogleApiError::Status { status, body }.into());
        }

        let v: Value = resp.json().await.context("decoding Gemini response")?;
        extract_text(&v)
    }
}

/// Pull the reply text out of a `generateContent` response body.
///
/// Joins all text parts of the first candidate; a body without any is an
/// [`GoogleApiError::EmptyResponse`] (blocked prompts and empty candidates
/// arrive this way).
fn extract_text(v: &Value) -> anyhow::Result<String> {
    let parts = v["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or(GoogleApiError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(GoogleApiError::EmptyResponse.into());
    }
    Ok(text)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
