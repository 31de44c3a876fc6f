// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter for deterministic testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use eerbeek_core::{
    AdapterType, ContactSubmission, EerbeekError, HealthStatus, NewContact, PluginAdapter,
    StorageAdapter, SubmissionId,
};

/// A contact store kept in memory.
///
/// Ids start at 1 and increase by one per insert. [`MockStorage::set_failing`]
/// simulates an outage: every operation then returns a storage error and
/// nothing is recorded.
#[derive(Clone, Default)]
pub struct MockStorage {
    rows: Arc<Mutex<Vec<ContactSubmission>>>,
    failing: Arc<AtomicBool>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that fails from the start.
    pub fn failing() -> Self {
        let storage = Self::new();
        storage.set_failing(true);
        storage
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all stored submissions in insertion order.
    pub async fn submissions(&self) -> Vec<ContactSubmission> {
        self.rows.lock().await.clone()
    }

    fn check(&self) -> Result<(), EerbeekError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EerbeekError::Storage {
                source: "simulated storage outage".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MockStorage {
    fn name(&self) -> &str {
        "mock-storage"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, EerbeekError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("simulated storage outage".into()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), EerbeekError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MockStorage {
    async fn initialize(&self) -> Result<(), EerbeekError> {
        self.check()
    }

    async fn close(&self) -> Result<(), EerbeekError> {
        Ok(())
    }

    async fn insert_contact(&self, contact: NewContact) -> Result<ContactSubmission, EerbeekError> {
        self.check()?;
        let mut rows = self.rows.lock().await;
        let id = SubmissionId(rows.len() as i64 + 1);
        let saved = contact.with_id(id);
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn get_contact(
        &self,
        id: SubmissionId,
    ) -> Result<Option<ContactSubmission>, EerbeekError> {
        self.check()?;
        Ok(self.rows.lock().await.iter().find(|c| c.id == id).cloned())
    }

    async fn count_contacts(&self) -> Result<i64, EerbeekError> {
        self.check()?;
        Ok(self.rows.lock().await.len() as i64)
    }
}
