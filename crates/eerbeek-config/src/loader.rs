// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./eerbeek.toml` > `~/.config/eerbeek/eerbeek.toml` > `/etc/eerbeek/eerbeek.toml`
//! with environment variable overrides via `EERBEEK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EerbeekConfig;

/// Config sections that environment variables may address.
const SECTIONS: &[&str] = &["site", "server", "storage", "gemini"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/eerbeek/eerbeek.toml` (system-wide)
/// 3. `~/.config/eerbeek/eerbeek.toml` (user XDG config)
/// 4. `./eerbeek.toml` (local directory)
/// 5. `EERBEEK_*` environment variables
pub fn load_config() -> Result<EerbeekConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<EerbeekConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EerbeekConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EerbeekConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EerbeekConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EerbeekConfig::default()))
        .merge(Toml::file("/etc/eerbeek/eerbeek.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("eerbeek/eerbeek.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("eerbeek.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `EERBEEK_STORAGE_DATABASE_PATH`
/// must map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("EERBEEK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name onto a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
