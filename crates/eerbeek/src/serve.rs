// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `eerbeek serve` command implementation.
//!
//! Initializes the store, the optional chat relay and the page renderer,
//! then serves HTTP until SIGINT/SIGTERM.

use std::sync::Arc;

use eerbeek_config::model::EerbeekConfig;
use eerbeek_core::{ChatAdapter, EerbeekError, PluginAdapter, StorageAdapter};
use eerbeek_gemini::GeminiChat;
use eerbeek_storage::SqliteStorage;
use eerbeek_web::{PageRenderer, WebState};
use tracing::{info, warn};

use crate::shutdown;

/// Run the `eerbeek serve` command.
pub async fn run_serve(config: EerbeekConfig) -> Result<(), EerbeekError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let chat: Option<Arc<dyn ChatAdapter>> = match GeminiChat::from_config(&config.gemini)? {
        Some(chat) => Some(Arc::new(chat)),
        None => {
            if config.gemini.enabled {
                warn!("no Gemini API key configured, /chat is disabled");
            } else {
                info!("chat relay disabled by configuration");
            }
            None
        }
    };

    let pages = Arc::new(PageRenderer::new(config.site.name.clone())?);
    let state = WebState::new(storage.clone(), chat.clone(), pages);

    let cancel = shutdown::install_signal_handler();
    let result = eerbeek_web::start_server(&config.server, state, async move {
        cancel.cancelled().await;
    })
    .await;

    if let Some(chat) = chat
        && let Err(e) = chat.shutdown().await
    {
        warn!(error = %e, "chat adapter shutdown failed");
    }
    // The store is closed even if the server failed, so the WAL is checkpointed.
    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    info!("eerbeek stopped");

    result
}
