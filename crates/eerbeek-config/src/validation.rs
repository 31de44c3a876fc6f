// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths and positive limits.

use crate::diagnostic::ConfigError;
use crate::model::EerbeekConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &EerbeekConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.max_body_bytes == 0 {
        fail("server.max_body_bytes must be greater than zero".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.site.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "site.log_level `{}` must be one of: {}",
            config.site.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.gemini.enabled {
        if config.gemini.model.trim().is_empty() {
            fail("gemini.model must not be empty when gemini.enabled = true".to_string());
        }
        if config.gemini.timeout_secs == 0 {
            fail("gemini.timeout_secs must be greater than zero".to_string());
        }
        if !config.gemini.base_url.starts_with("http://")
            && !config.gemini.base_url.starts_with("https://")
        {
            fail(format!(
                "gemini.base_url `{}` must start with http:// or https://",
                config.gemini.base_url
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
