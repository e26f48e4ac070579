// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Folio configuration system.

use folio_config::diagnostic::ConfigError;
use folio_config::model::FolioConfig;
use folio_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_folio_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[admin]
bearer_token = "s3cret"

[storage]
database_path = "/tmp/folio-test.db"

[bucket]
project_id = "my-portfolio"
access_token = "ya29.token"

[mail]
enabled = true
smtp_username = "bot@example.com"
smtp_password = "app-password"
operator_address = "owner@example.com"

[intake]
require_fields = false
default_project_type = "Other"

[uploads]
max_bytes = 1048576
allowed_mime_types = ["video/mp4"]
unique_suffix = true
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.admin.bearer_token.as_deref(), Some("s3cret"));
    assert_eq!(config.storage.database_path, "/tmp/folio-test.db");
    assert_eq!(
        config.bucket.resolved_name().as_deref(),
        Some("my-portfolio.firebasestorage.app")
    );
    assert!(config.mail.enabled);
    assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
    assert!(!config.intake.require_fields);
    assert_eq!(config.intake.default_project_type, "Other");
    assert_eq!(config.uploads.max_bytes, 1_048_576);
    assert_eq!(config.uploads.allowed_mime_types, vec!["video/mp4"]);
    assert!(config.uploads.unique_suffix);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty config should load");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.admin.bearer_token.is_none());
    assert!(!config.mail.enabled);
    assert!(config.intake.require_fields);
    assert_eq!(config.intake.default_project_type, "General");
    assert_eq!(config.bucket.api_base_url, "https://storage.googleapis.com");
}

#[test]
fn unknown_key_in_mail_is_reported_with_suggestion() {
    let toml = "[mail]\nsmtp_hots = \"relay.example.com\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "smtp_hots");
            assert_eq!(suggestion.as_deref(), Some("smtp_host"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "telemetry"))
    );
}

#[test]
fn invalid_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }))
    );
}

#[test]
fn validation_errors_are_returned_after_successful_parse() {
    let errors = load_and_validate_str("[uploads]\nmax_bytes = 0\n").unwrap_err();
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("max_bytes"))
    ));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let errors = load_and_validate_str("[server]\nprot = 80\n").unwrap_err();
    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = &errors[0];
    handler
        .render_report(&mut buf, diagnostic)
        .expect("rendering should succeed");
    assert!(buf.contains("prot"));
    assert!(buf.contains("port"));
}

#[test]
fn serialized_defaults_round_trip_through_figment() {
    use figment::{Figment, providers::Serialized};

    let config: FolioConfig = Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .extract()
        .expect("defaults should extract");
    assert_eq!(config.uploads.allowed_mime_types.len(), 7);
}

#[test]
fn env_overrides_map_onto_sections() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("folio.toml", "[server]\nport = 7000\n")?;
        jail.set_env("FOLIO_MAIL_SMTP_HOST", "relay.example.com");
        jail.set_env("FOLIO_ADMIN_BEARER_TOKEN", "from-env");

        let config = load_and_validate_path(std::path::Path::new("folio.toml"))
            .expect("config should load");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.mail.smtp_host, "relay.example.com");
        assert_eq!(config.admin.bearer_token.as_deref(), Some("from-env"));
        Ok(())
    });
}

#[test]
fn port_variable_overrides_file_port() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("folio.toml", "[server]\nport = 7000\n")?;
        jail.set_env("PORT", "9123");

        let config = load_and_validate_path(std::path::Path::new("folio.toml"))
            .expect("config should load");
        assert_eq!(config.server.port, 9123);
        Ok(())
    });
}

#[test]
fn rendered_defaults_load_back() {
    let mut config = FolioConfig::default();
    config.server.port = 8088;
    config.uploads.allowed_mime_types = vec!["image/png".into()];
    let rendered = toml::to_string(&config).expect("config should render as TOML");

    let loaded = load_config_from_str(&rendered).expect("rendered config should load");
    assert_eq!(loaded.server.port, 8088);
    assert_eq!(loaded.server.host, "0.0.0.0");
    assert_eq!(loaded.uploads.allowed_mime_types, vec!["image/png"]);
    assert_eq!(loaded.storage.database_path, config.storage.database_path);
}
