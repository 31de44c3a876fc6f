// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini chat relay.
//!
//! Implements [`ChatAdapter`] as a thin pass-through: the visitor's text is
//! sent as a single user turn and the first text part of the first
//! candidate comes back as the reply.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use eerbeek_config::model::GeminiConfig;
use eerbeek_core::{AdapterType, ChatAdapter, EerbeekError, HealthStatus, PluginAdapter};
use secrecy::SecretString;
use tracing::info;

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Reply used when Gemini returns no candidate text.
pub const EMPTY_REPLY: &str = "No response from AI.";

/// Environment variable consulted when `gemini.api_key` is not configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini-backed chat relay implementing [`ChatAdapter`].
pub struct GeminiChat {
    client: GeminiClient,
}

impl GeminiChat {
    /// Creates the relay from configuration.
    ///
    /// Returns `Ok(None)` when the relay is disabled or no API key can be
    /// resolved; the site then runs without `/chat`.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>, EerbeekError> {
        if !config.enabled {
            return Ok(None);
        }
        let Some(api_key) = resolve_api_key(&config.api_key) else {
            return Ok(None);
        };

        let client = GeminiClient::new(
            &api_key,
            config.model.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(model = %config.model, "Gemini chat relay initialized");
        Ok(Some(Self { client }))
    }

    /// Creates the relay around an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

/// API key resolution: config value, then the `GEMINI_API_KEY` env var.
/// Blank values count as absent.
fn resolve_api_key(configured: &Option<String>) -> Option<SecretString> {
    resolve_api_key_with(configured, || std::env::var(API_KEY_ENV).ok())
}

fn resolve_api_key_with(
    configured: &Option<String>,
    env: impl FnOnce() -> Option<String>,
) -> Option<SecretString> {
    let non_blank = |key: &String| !key.trim().is_empty();
    configured
        .clone()
        .filter(non_blank)
        .or_else(|| env().filter(non_blank))
        .map(SecretString::from)
}

#[async_trait]
impl PluginAdapter for GeminiChat {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Chat
    }

    async fn health_check(&self) -> Result<HealthStatus, EerbeekError> {
        // Probing would spend quota; configuration is all that is known locally.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), EerbeekError> {
        Ok(())
    }
}

#[async_trait]
impl ChatAdapter for GeminiChat {
    async fn send(&self, text: &str) -> Result<String, EerbeekError> {
        let response = self
            .client
            .generate(&GenerateContentRequest::user_text(text))
            .await?;
        Ok(response
            .first_text()
            .map(str::to_string)
            .unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            enabled: true,
            api_key: Some("test-api-key".to_string()),
            model: "gemini-test".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn disabled_config_builds_nothing() {
        let mut config = config_for("http://localhost");
        config.enabled = false;
        assert!(GeminiChat::from_config(&config).unwrap().is_none());
    }

    fn env(value: Option<&str>) -> impl FnOnce() -> Option<String> {
        move || value.map(str::to_string)
    }

    #[test]
    fn configured_key_wins() {
        let key =
            resolve_api_key_with(&Some("from-config".to_string()), env(Some("from-env"))).unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&key), "from-config");
    }

    #[test]
    fn blank_configured_key_falls_back_to_env() {
        let key = resolve_api_key_with(&Some("   ".to_string()), env(Some("from-env"))).unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&key), "from-env");
    }

    #[test]
    fn blank_configured_key_counts_as_absent() {
        assert!(resolve_api_key_with(&Some("   ".to_string()), env(None)).is_none());
        assert!(resolve_api_key_with(&None, env(Some(" "))).is_none());
        assert!(resolve_api_key_with(&None, env(None)).is_none());
    }

    #[tokio::test]
    async fn send_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Wij helpen graag!"}]}}]
            })))
            .mount(&server)
            .await;

        let chat = GeminiChat::from_config(&config_for(&server.uri()))
            .unwrap()
            .unwrap();
        assert_eq!(chat.name(), "gemini");
        assert_eq!(chat.adapter_type(), AdapterType::Chat);
        assert_eq!(chat.send("Kunnen jullie helpen?").await.unwrap(), "Wij helpen graag!");
    }

    #[tokio::test]
    async fn send_without_candidates_uses_fallback_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let chat = GeminiChat::from_config(&config_for(&server.uri()))
            .unwrap()
            .unwrap();
        assert_eq!(chat.send("Hallo").await.unwrap(), EMPTY_REPLY);
    }

    #[tokio::test]
    async fn upstream_failure_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let chat = GeminiChat::from_config(&config_for(&server.uri()))
            .unwrap()
            .unwrap();
        let err = chat.send("Hallo").await.unwrap_err();
        assert!(matches!(err, EerbeekError::Provider { .. }));
    }
}
