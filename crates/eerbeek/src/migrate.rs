// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `eerbeek migrate` command: create or upgrade the schema, then exit.

use eerbeek_config::model::StorageConfig;
use eerbeek_core::{EerbeekError, StorageAdapter};
use eerbeek_storage::SqliteStorage;

/// Apply pending migrations and return the number of stored submissions.
pub async fn run_migrate(config: &StorageConfig) -> Result<i64, EerbeekError> {
    let storage = SqliteStorage::new(config.clone());
    storage.initialize().await?;
    let count = storage.count_contacts().await?;
    storage.close().await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_creates_database_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("nested/site.db").to_str().unwrap().to_string(),
            wal_mode: true,
        };

        assert_eq!(run_migrate(&config).await.unwrap(), 0);
        assert_eq!(run_migrate(&config).await.unwrap(), 0);
        assert!(dir.path().join("nested/site.db").exists());
    }
}
