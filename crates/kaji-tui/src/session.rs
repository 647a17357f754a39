// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Background session task and request/event channel types.
//!
//! The task owns the model providers and the [`Discussion`] state; the TUI
//! talks to it over mpsc channels and never blocks on the network. Requests
//! are processed one at a time, so at most one provider call is in flight.
//! The TUI additionally latches its input while waiting.

use std::sync::Arc;

use kaji_config::Config;
use kaji_core::Discussion;
use tokio::sync::mpsc;
use tracing::debug;

/// Request sent from the TUI to the background session task.
#[derive(Debug)]
pub enum SessionRequest {
    /// Run the single-shot topic analysis and open a discussion on it.
    Analyze(String),
    /// Send a follow-up message in the open discussion.
    Follow(String),
}

/// Event sent from the session task back to the TUI.
#[derive(Debug)]
pub enum SessionEvent {
    /// The topic analysis finished; the discussion is now open.
    Analysis(String),
    /// The model answered a follow-up message.
    Reply(String),
    /// A provider call failed. The conversation history keeps the user's
    /// message; this event is display-only.
    Error(String),
}

/// Background task that owns the providers and forwards events to the TUI.
pub async fn session_task(
    config: Arc<Config>,
    mut rx: mpsc::Receiver<SessionRequest>,
    tx: mpsc::Sender<SessionEvent>,
) {
    // Discussion turns use the configured chat model; the analysis may use a
    // stronger one. Both are validated (API key present) up front.
    let chat_provider = match kaji_model::from_config(&config.model) {
        Ok(p) => p,
        Err(e) => {
            let _ = tx.send(SessionEvent::Error(format!("model init: {e:#}"))).await;
            return;
        }
    };
    let analysis_provider = {
        let mut cfg = config.model.clone();
        cfg.name = config.model.analysis_model().to_string();
        match kaji_model::from_config(&cfg) {
            Ok(p) => p,
            Err(e) => {
                let _ = tx.send(SessionEvent::Error(format!("model init: {e:#}"))).await;
                return;
            }
        }
    };

    let mut discussion: Option<Discussion> = None;

    while let Some(req) = rx.recv().await {
        match req {
            SessionRequest::Analyze(topic) => {
                debug!(topic_len = topic.len(), "session task received topic");
                match kaji_core::analyze(analysis_provider.as_ref(), &config.prompt, &topic).await
                {
                    Ok(analysis) => {
                        discussion = Some(Discussion::new(&config.prompt, &topic, &analysis));
                        let _ = tx.send(SessionEvent::Analysis(analysis)).await;
                    }
                    Err(e) => {
                        // Nothing was appended anywhere; a retry starts clean.
                        let _ = tx.send(SessionEvent::Error(format!("{e:#}"))).await;
                    }
                }
            }
            SessionRequest::Follow(text) => {
                debug!(msg_len = text.len(), "session task received follow-up");
                match discussion.as_mut() {
                    None => {
                        let _ = tx
                            .send(SessionEvent::Error(
                                "analyse a topic before asking follow-up questions".into(),
                            ))
                            .await;
                    }
                    Some(d) => match d.send(chat_provider.as_ref(), &text).await {
                        Ok(reply) => {
                            let _ = tx.send(SessionEvent::Reply(reply)).await;
                        }
                        Err(e) => {
                            let _ = tx.send(SessionEvent::Error(format!("{e:#}"))).await;
                        }
                    },
                }
            }
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use kaji_config::ModelConfig;

    use super::*;

    fn mock_config(replies_file: Option<&str>) -> Arc<Config> {
        let mut config = Config::default();
        config.model = ModelConfig {
            provider: "mock".into(),
            name: "mock-model".into(),
            analysis_name: None,
            mock_responses: replies_file.map(String::from),
            ..ModelConfig::default()
        };
        Arc::new(config)
    }

    async fn run_session(
        config: Arc<Config>,
        requests: Vec<SessionRequest>,
    ) -> Vec<SessionEvent> {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (ev_tx, mut ev_rx) = mpsc::channel(8);
        let task = tokio::spawn(session_task(config, req_rx, ev_tx));

        for r in requests {
            // The task exits early on init failure; a closed channel is fine.
            let _ = req_tx.send(r).await;
        }
        drop(req_tx);
        task.await.unwrap();

        let mut events = Vec::new();
        while let Ok(ev) = ev_rx.try_recv() {
            events.push(ev);
        }
        events
    }

    #[tokio::test]
    async fn analyze_then_follow_produces_analysis_and_reply() {
        let events = run_session(
            mock_config(None),
            vec![
                SessionRequest::Analyze("tides".into()),
                SessionRequest::Follow("why?".into()),
            ],
        )
        .await;

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], SessionEvent::Analysis(t) if t.contains("tides")));
        assert!(matches!(&events[1], SessionEvent::Reply(t) if t == "MOCK: why?"));
    }

    #[tokio::test]
    async fn follow_without_analysis_is_an_error() {
        let events = run_session(
            mock_config(None),
            vec![SessionRequest::Follow("early".into())],
        )
        .await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], SessionEvent::Error(e) if e.contains("analyse a topic")));
    }

    #[tokio::test]
    async fn bad_mock_replies_path_fails_at_startup() {
        let events = run_session(
            mock_config(Some("/nonexistent/kaji-replies.txt")),
            vec![SessionRequest::Analyze("t".into())],
        )
        .await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], SessionEvent::Error(e) if e.contains("model init")));
    }
}
