// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the contact submission store.

use async_trait::async_trait;

use crate::error::EerbeekError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContactSubmission, NewContact, SubmissionId};

/// Adapter for the append-only submission store.
///
/// There is no update or delete: a submission is written once and never
/// touched again by this system.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Opens the backend and creates or migrates the schema. Idempotent with
    /// respect to the schema; calling it twice on one instance is an error.
    async fn initialize(&self) -> Result<(), EerbeekError>;

    /// Flushes pending writes and releases the backend.
    async fn close(&self) -> Result<(), EerbeekError>;

    /// Appends a validated submission and returns it with its fresh id.
    ///
    /// A successful return means the row is durably recorded.
    async fn insert_contact(&self, contact: NewContact) -> Result<ContactSubmission, EerbeekError>;

    /// Fetches a single submission by id.
    async fn get_contact(&self, id: SubmissionId)
    -> Result<Option<ContactSubmission>, EerbeekError>;

    /// Number of stored submissions.
    async fn count_contacts(&self) -> Result<i64, EerbeekError>;
}
