// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./folio.toml` > `~/.config/folio/folio.toml` > `/etc/folio/folio.toml`
//! with environment variable overrides via `FOLIO_` prefix and the conventional `PORT`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FolioConfig;

/// Top-level sections, used to map `FOLIO_<SECTION>_<KEY>` onto `section.key`.
const SECTIONS: &[&str] = &[
    "server", "admin", "storage", "bucket", "mail", "intake", "uploads",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/folio/folio.toml` (system-wide)
/// 3. `~/.config/folio/folio.toml` (user XDG config)
/// 4. `./folio.toml` (local directory)
/// 5. `FOLIO_*` environment variables
/// 6. `PORT` environment variable
pub fn load_config() -> Result<FolioConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<FolioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FolioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(port_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::file("/etc/folio/folio.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("folio/folio.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("folio.toml"))
        .merge(env_provider())
        .merge(port_provider())
}

/// Map a lowercased, prefix-stripped env key onto its dotted config path.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `mail_smtp_password` maps to `mail.smtp_password`, not `mail.smtp.password`.
pub fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

/// Create the environment variable provider with explicit section mapping.
fn env_provider() -> Env {
    Env::prefixed("FOLIO_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Honour the conventional `PORT` variable set by hosting platforms.
///
/// Pairs with the all-interfaces default for `server.host`.
fn port_provider() -> Env {
    Env::raw().only(&["port"]).map(|_| "server.port".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_after_section() {
        assert_eq!(map_env_key("mail_smtp_password"), "mail.smtp_password");
        assert_eq!(map_env_key("bucket_public_base_url"), "bucket.public_base_url");
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(map_env_key("uploads_max_bytes"), "uploads.max_bytes");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("something_else"), "something_else");
    }

    #[test]
    fn section_prefix_must_be_followed_by_underscore() {
        // "mailbox" is not the "mail" section.
        assert_eq!(map_env_key("mailbox"), "mailbox");
    }
}
