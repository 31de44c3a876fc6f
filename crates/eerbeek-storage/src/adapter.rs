// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use eerbeek_config::model::StorageConfig;
use eerbeek_core::{
    AdapterType, ContactSubmission, EerbeekError, HealthStatus, NewContact, PluginAdapter,
    StorageAdapter, SubmissionId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed submission store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened by [`StorageAdapter::initialize`], not by `new`.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &str {
        &self.config.database_path
    }

    fn db(&self) -> Result<&Database, EerbeekError> {
        self.db.get().ok_or_else(|| EerbeekError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, EerbeekError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), EerbeekError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), EerbeekError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| EerbeekError::Storage {
            source: "storage already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), EerbeekError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn insert_contact(&self, contact: NewContact) -> Result<ContactSubmission, EerbeekError> {
        queries::contacts::insert_contact(self.db()?, contact).await
    }

    async fn get_contact(
        &self,
        id: SubmissionId,
    ) -> Result<Option<ContactSubmission>, EerbeekError> {
        queries::contacts::get_contact(self.db()?, id).await
    }

    async fn count_contacts(&self) -> Result<i64, EerbeekError> {
        queries::contacts::count_contacts(self.db()?).await
    }
}
