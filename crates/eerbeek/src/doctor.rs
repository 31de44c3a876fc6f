// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `eerbeek doctor` command implementation.
//!
//! Runs diagnostic checks against the deployment: configuration, database,
//! static assets, chat relay settings and allocator statistics.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use eerbeek_config::model::{EerbeekConfig, GeminiConfig};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `eerbeek doctor` command. Returns the number of failed checks.
pub async fn run_doctor(config: &EerbeekConfig, plain: bool) -> usize {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_database(&config.storage.database_path).await,
        check_static_dir(&config.server.static_dir),
        check_chat(&config.gemini),
        check_memory_baseline(),
    ];

    println!();
    println!("  eerbeek doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", format_line(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<20} {} ({duration_ms}ms)", result.name, result.message)
    }
}

/// The configuration already passed validation by the time doctor runs.
fn check_config(config: &EerbeekConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!(
            "valid (site.name={}, listen {}:{})",
            config.site.name, config.server.host, config.server.port
        ),
        start,
    )
}

/// Check the database file opens, passes `quick_check` and has the schema.
async fn check_database(db_path: &str) -> CheckResult {
    let start = Instant::now();

    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (created by `eerbeek migrate` or on first serve)"),
            start,
        );
    }

    let conn = match tokio_rusqlite::Connection::open(db_path).await {
        Ok(conn) => conn,
        Err(e) => {
            return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };

    let checked = conn
        .call(|conn| -> Result<(String, i64), rusqlite::Error> {
            let integrity: String = conn.query_row("PRAGMA quick_check", [], |row| row.get(0))?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM contact_submissions", [], |row| row.get(0))?;
            Ok((integrity, count))
        })
        .await;

    match checked {
        Ok((integrity, count)) if integrity == "ok" => CheckResult::new(
            "Database",
            CheckStatus::Pass,
            format!("ok, {count} submission(s) stored"),
            start,
        ),
        Ok((integrity, _)) => CheckResult::new(
            "Database",
            CheckStatus::Fail,
            format!("integrity check failed: {integrity}"),
            start,
        ),
        Err(e) => CheckResult::new(
            "Database",
            CheckStatus::Fail,
            format!("query failed: {e} (run `eerbeek migrate`?)"),
            start,
        ),
    }
}

fn check_static_dir(static_dir: &str) -> CheckResult {
    let start = Instant::now();
    let dir = Path::new(static_dir);
    if !dir.is_dir() {
        return CheckResult::new(
            "Static assets",
            CheckStatus::Warn,
            format!("directory not found: {static_dir}"),
            start,
        );
    }
    if !dir.join("css/style.css").is_file() {
        return CheckResult::new(
            "Static assets",
            CheckStatus::Warn,
            format!("{static_dir}/css/style.css is missing"),
            start,
        );
    }
    CheckResult::new("Static assets", CheckStatus::Pass, static_dir.to_string(), start)
}

fn check_chat(config: &GeminiConfig) -> CheckResult {
    let start = Instant::now();
    if !config.enabled {
        return CheckResult::new("Chat relay", CheckStatus::Pass, "disabled", start);
    }

    let has_key = config.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
        || std::env::var(eerbeek_gemini::API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty());
    if has_key {
        CheckResult::new(
            "Chat relay",
            CheckStatus::Pass,
            format!("configured (model {})", config.model),
            start,
        )
    } else {
        CheckResult::new(
            "Chat relay",
            CheckStatus::Warn,
            format!("enabled but no API key (set gemini.api_key or {})", eerbeek_gemini::API_KEY_ENV),
            start,
        )
    }
}

/// Memory baseline via jemalloc.
fn check_memory_baseline() -> CheckResult {
    let start = Instant::now();

    #[cfg(not(target_env = "msvc"))]
    {
        let _ = tikv_jemalloc_ctl::epoch::advance();
        let allocated = tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0);
        let resident = tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0);
        let allocated_mb = allocated as f64 / (1024.0 * 1024.0);
        let resident_mb = resident as f64 / (1024.0 * 1024.0);

        CheckResult::new(
            "Memory baseline",
            CheckStatus::Pass,
            format!("allocated {allocated_mb:.1} MB, resident {resident_mb:.1} MB"),
            start,
        )
    }

    #[cfg(target_env = "msvc")]
    {
        CheckResult::new(
            "Memory baseline",
            CheckStatus::Warn,
            "jemalloc not available on MSVC",
            start,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn check_database_missing_warns() {
        let result = check_database("/tmp/nonexistent-eerbeek-test-xyz.db").await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("not found"));
    }

    #[tokio::test]
    async fn check_database_after_migrate_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doctor.db");
        let config = eerbeek_config::model::StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
            wal_mode: true,
        };
        crate::migrate::run_migrate(&config).await.unwrap();

        let result = check_database(path.to_str().unwrap()).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
        assert!(result.message.contains("0 submission"));
    }

    #[tokio::test]
    async fn check_database_without_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        std::fs::write(&path, b"").unwrap();

        let result = check_database(path.to_str().unwrap()).await;
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn static_dir_checks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        assert_eq!(check_static_dir(root).status, CheckStatus::Warn);

        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/style.css"), "").unwrap();
        assert_eq!(check_static_dir(root).status, CheckStatus::Pass);

        assert_eq!(
            check_static_dir("/tmp/nonexistent-eerbeek-static").status,
            CheckStatus::Warn
        );
    }

    #[test]
    fn disabled_chat_passes() {
        let config = GeminiConfig {
            enabled: false,
            ..GeminiConfig::default()
        };
        assert_eq!(check_chat(&config).status, CheckStatus::Pass);
    }

    #[test]
    fn configured_chat_key_passes() {
        let config = GeminiConfig {
            api_key: Some("key".into()),
            ..GeminiConfig::default()
        };
        assert_eq!(check_chat(&config).status, CheckStatus::Pass);
    }

    #[test]
    fn plain_output_uses_tags() {
        let result = CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Fail,
            message: "open failed".to_string(),
            duration: Duration::from_millis(3),
        };
        let line = format_line(&result, false);
        assert!(line.contains("[FAIL]"));
        assert!(line.contains("open failed (3ms)"));
    }

    #[test]
    fn check_memory_baseline_reports() {
        let result = check_memory_baseline();
        assert!(result.status == CheckStatus::Pass || result.status == CheckStatus::Warn);
    }
}
