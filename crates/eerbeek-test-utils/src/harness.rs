// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end router testing.
//!
//! `TestHarness` assembles the full site router with either a temp SQLite
//! store or a [`MockStorage`], and an optional [`MockChat`]. Requests are
//! driven in-process through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eerbeek_config::model::{ServerConfig, StorageConfig};
use eerbeek_core::{ChatAdapter, EerbeekError, StorageAdapter};
use eerbeek_storage::SqliteStorage;
use eerbeek_web::{PageRenderer, WebState, router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::mock_chat::MockChat;
use crate::mock_storage::MockStorage;

/// Builder for creating test environments with configurable options.
#[derive(Default)]
pub struct TestHarnessBuilder {
    mock_storage: Option<MockStorage>,
    chat: Option<MockChat>,
    max_body_bytes: Option<usize>,
}

impl TestHarnessBuilder {
    /// Use the given in-memory store instead of a temp SQLite database.
    pub fn with_mock_storage(mut self, storage: MockStorage) -> Self {
        self.mock_storage = Some(storage);
        self
    }

    /// Enable `/chat` with the given adapter.
    pub fn with_chat(mut self, chat: MockChat) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// Build the harness, initializing the store.
    pub async fn build(self) -> Result<TestHarness, EerbeekError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| EerbeekError::Storage { source: e.into() })?;

        let storage: Arc<dyn StorageAdapter> = match self.mock_storage {
            Some(mock) => Arc::new(mock),
            None => {
                let db_path = temp_dir.path().join("test.db");
                Arc::new(SqliteStorage::new(StorageConfig {
                    database_path: db_path.to_string_lossy().to_string(),
                    wal_mode: true,
                }))
            }
        };
        storage.initialize().await?;

        let chat = self.chat.map(|c| Arc::new(c) as Arc<dyn ChatAdapter>);
        let state = WebState::new(
            storage.clone(),
            chat,
            Arc::new(PageRenderer::new("ICT Eerbeek")?),
        );

        let mut config = ServerConfig {
            static_dir: temp_dir.path().join("static").to_string_lossy().to_string(),
            ..ServerConfig::default()
        };
        if let Some(limit) = self.max_body_bytes {
            config.max_body_bytes = limit;
        }

        Ok(TestHarness {
            app: router(state, &config),
            storage,
            _temp_dir: temp_dir,
        })
    }
}

/// The site router plus a handle on its store.
pub struct TestHarness {
    app: Router,
    storage: Arc<dyn StorageAdapter>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Harness with a temp SQLite store and chat disabled.
    pub async fn new() -> Result<Self, EerbeekError> {
        Self::builder().build().await
    }

    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    /// Number of stored submissions.
    pub async fn contact_count(&self) -> Result<i64, EerbeekError> {
        self.storage.count_contacts().await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), EerbeekError> {
        let (status, text) = self.post_raw(uri, body.to_string()).await?;
        let json = serde_json::from_str(&text)
            .map_err(|e| EerbeekError::Internal(format!("response is not JSON ({e}): {text}")))?;
        Ok((status, json))
    }

    /// POST an arbitrary body labelled as JSON.
    pub async fn post_raw(
        &self,
        uri: &str,
        body: impl Into<Body>,
    ) -> Result<(StatusCode, String), EerbeekError> {
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .map_err(|e| EerbeekError::Internal(e.to_string()))?;
        self.send(req).await
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, String), EerbeekError> {
        let req = Request::get(uri)
            .body(Body::empty())
            .map_err(|e| EerbeekError::Internal(e.to_string()))?;
        self.send(req).await
    }

    /// Submit the contact form.
    pub async fn submit_contact(
        &self,
        form: &serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), EerbeekError> {
        self.post_json("/contact", form).await
    }

    async fn send(&self, req: Request<Body>) -> Result<(StatusCode, String), EerbeekError> {
        let resp = self
            .app
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| EerbeekError::Internal(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| EerbeekError::Internal(e.to_string()))?
            .to_bytes();
        Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
    }
}
