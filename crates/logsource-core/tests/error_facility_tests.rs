#![allow(clippy::unwrap_used, clippy::expect_used)]

use logsource_core::errors::{backend_error, empty_name};
use logsource_core::{
    BackendRegistry, ErrorKind, LogHandle, LogSourceError, Severity, SourceConfig,
};
use std::path::Path;

#[test]
fn test_empty_name_verifiable_by_kind() {
    let err = empty_name("name");

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.code(), "ERR_INVALID_ARGUMENT");
    assert!(err.to_string().contains("'name'"));
}

#[test]
fn test_used_after_release_distinct_from_invalid_argument() {
    let registry = BackendRegistry::new();
    let mut log = LogHandle::from_registry(&registry, "errors.released").unwrap();
    log.dispose().unwrap();

    let err = log.emit(Severity::Error, "late").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UsedAfterRelease);
    assert_eq!(err.code(), "ERR_USED_AFTER_RELEASE");
    assert_ne!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("errors.released"));
}

#[test]
fn test_backend_error_keeps_reason() {
    let err = backend_error("file-sink", "disk full");

    assert_eq!(err.kind(), ErrorKind::Backend);
    assert_eq!(err.code(), "ERR_BACKEND");
    assert_eq!(
        err,
        LogSourceError::Backend {
            name: "file-sink".to_string(),
            reason: "disk full".to_string(),
        }
    );
}

#[test]
fn test_format_error_converts() {
    let err: LogSourceError = std::fmt::Error.into();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.code(), "ERR_FORMAT");
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = SourceConfig::load(Path::new("/nonexistent/logsource.toml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.code(), "ERR_IO");
}

#[test]
fn test_malformed_config_is_config_error() {
    let err = SourceConfig::from_toml_str("default_level = \"loud\"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.code(), "ERR_CONFIG");
}
