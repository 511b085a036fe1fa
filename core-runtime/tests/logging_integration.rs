//! Integration tests for logging system

use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_initialization_only_once() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    assert!(init_logging(config.clone()).is_ok());
    // A global subscriber is already installed for this process.
    assert!(init_logging(config).is_err());
}

#[test]
fn test_pii_redaction_tokens() {
    assert_eq!(redact_if_sensitive("access_token", "EAAB..."), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("client_secret", "s"), "[REDACTED]");
}

#[test]
fn test_pii_redaction_emails() {
    let redacted = redact_if_sensitive("username", "user@example.com");

    assert!(redacted.starts_with('u'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_pii_redaction_non_ascii_emails() {
    let redacted = redact_if_sensitive("username", "élise@exemple.fr");
    assert_eq!(redacted, "é***@[REDACTED]");

    let redacted = redact_if_sensitive("username", "渡辺@example.jp");
    assert_eq!(redacted, "渡***@[REDACTED]");

    assert_eq!(
        redact_if_sensitive("username", "@example.com"),
        "***@[REDACTED]"
    );
}

#[test]
fn test_pii_redaction_normal_values() {
    assert_eq!(redact_if_sensitive("item_id", "10150146071791729"), "10150146071791729");
    assert_eq!(redact_if_sensitive("directory", "root"), "root");
    assert_eq!(redact_if_sensitive("provider", "facebook"), "facebook");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LogFormat::default(), LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LogFormat::default(), LogFormat::Json);
}
