// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::config::Config;
use recommender_core::error::CoreError;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config_is_valid() {
    // Arrange
    let config = Config::default();

    // Act
    let result = config.validate();

    // Assert
    assert!(result.is_ok());
    assert_eq!(config.score_threshold, 4.0);
    assert_eq!(config.max_users_per_partition, 1000);
    assert_eq!(config.top_k, 10);
    assert_eq!(config.worker_timeout(), Some(Duration::from_millis(30_000)));
}

#[test]
fn test_load_fills_optional_fields_with_defaults() {
    // Arrange
    let file = config_file(
        r#"{"dataset_path": "reviews.csv", "num_partitions": 2, "max_clients": 3}"#,
    );

    // Act
    let config = Config::load(file.path()).unwrap();

    // Assert
    assert_eq!(config.dataset_path, "reviews.csv");
    assert_eq!(config.num_partitions, 2);
    assert_eq!(config.max_clients, 3);
    assert_eq!(config.bind_address, Config::default().bind_address);
    assert_eq!(config.score_threshold, 4.0);
}

#[test]
fn test_load_rejects_zero_partitions() {
    // Arrange
    let file = config_file(
        r#"{"dataset_path": "reviews.csv", "num_partitions": 0, "max_clients": 3}"#,
    );

    // Act
    let result = Config::load(file.path());

    // Assert
    assert!(matches!(result, Err(CoreError::ZeroPartitions)));
}

#[test]
fn test_load_missing_file_is_io_error() {
    // Act
    let result = Config::load("/nonexistent/recommender/config.json");

    // Assert
    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn test_validate_rejects_zero_clients_and_top_k() {
    // Arrange
    let no_clients = Config {
        max_clients: 0,
        ..Config::default()
    };
    let no_top_k = Config {
        top_k: 0,
        ..Config::default()
    };

    // Act & Assert
    assert!(matches!(no_clients.validate(), Err(CoreError::InvalidConfig(_))));
    assert!(matches!(no_top_k.validate(), Err(CoreError::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_zero_frame_limit() {
    // Arrange
    let config = Config {
        max_message_bytes: 0,
        ..Config::default()
    };

    // Act
    let result = config.validate();

    // Assert
    assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn test_load_rejects_zero_frame_limit() {
    // Arrange
    let file = config_file(
        r#"{"dataset_path": "reviews.csv", "num_partitions": 2, "max_clients": 2, "max_message_bytes": 0}"#,
    );

    // Act
    let result = Config::load(file.path());

    // Assert
    assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn test_zero_timeout_disables_deadline() {
    // Arrange
    let config = Config {
        worker_timeout_ms: 0,
        ..Config::default()
    };

    // Act
    let timeout = config.worker_timeout();

    // Assert
    assert_eq!(timeout, None);
}
