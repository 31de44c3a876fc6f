// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat adapter trait for the optional AI chat relay.

use async_trait::async_trait;

use crate::error::EerbeekError;
use crate::traits::adapter::PluginAdapter;

/// Pass-through to an external generative-AI service.
#[async_trait]
pub trait ChatAdapter: PluginAdapter {
    /// Sends a user message and returns the reply text.
    ///
    /// Upstream failures surface as [`EerbeekError::Provider`].
    async fn send(&self, text: &str) -> Result<String, EerbeekError>;
}
