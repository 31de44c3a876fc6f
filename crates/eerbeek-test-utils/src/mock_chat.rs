// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use eerbeek_core::{AdapterType, ChatAdapter, EerbeekError, HealthStatus, PluginAdapter};

/// A chat adapter that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// `"mock reply"` is returned. Every prompt is recorded.
#[derive(Clone, Default)]
pub struct MockChat {
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    /// A chat adapter whose every call fails like an unreachable upstream.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Prompts received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockChat {
    fn name(&self) -> &str {
        "mock-chat"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Chat
    }

    async fn health_check(&self) -> Result<HealthStatus, EerbeekError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), EerbeekError> {
        Ok(())
    }
}

#[async_trait]
impl ChatAdapter for MockChat {
    async fn send(&self, text: &str) -> Result<String, EerbeekError> {
        self.prompts.lock().await.push(text.to_string());
        if self.fail {
            return Err(EerbeekError::Provider {
                message: "simulated upstream failure".into(),
                source: None,
            });
        }
        Ok(self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }
}
