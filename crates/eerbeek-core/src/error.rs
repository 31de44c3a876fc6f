// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the ICT Eerbeek website.

use thiserror::Error;

use crate::validation::ValidationError;

/// The primary error type used across all adapter traits and request handling.
#[derive(Debug, Error)]
pub enum EerbeekError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A contact submission was rejected before reaching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors (database connection, query failure, schema mismatch).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream chat provider errors (API failure, unexpected response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EerbeekError {
    /// Returns true when the error was caused by the client's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EerbeekError::Validation(_))
    }
}
