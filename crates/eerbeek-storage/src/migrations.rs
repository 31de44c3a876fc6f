// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use eerbeek_core::EerbeekError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table, so running this on every start is idempotent.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), EerbeekError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| EerbeekError::Storage {
            source: e.to_string().into(),
        })?;
    for migration in report.applied_migrations() {
        tracing::info!(migration = %migration, "applied schema migration");
    }
    Ok(())
}
