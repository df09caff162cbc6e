//! End-to-end tests for the JSON backend

use daylog::{Level, Logger, LoggerExt, fields};
use daylog_json::JsonLogger;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn records_land_in_the_daily_file() {
    let tmp = TempDir::new().unwrap();
    let logger = JsonLogger::with_dir(tmp.path(), "debug").unwrap();

    logger.info("hello json", fields!["port", 8080]);
    logger.shutdown().await;

    let content = fs::read_to_string(logger.current_path()).unwrap();
    assert!(content.contains("\"message\":\"hello json\""));
    assert!(content.contains("\"level\":\"info\""));
    assert!(content.contains("\"port\":8080"));
    assert!(content.contains("json_logger.rs"));
}

#[tokio::test]
async fn duplicate_field_names_are_retained_in_order() {
    let tmp = TempDir::new().unwrap();
    let logger = JsonLogger::with_dir(tmp.path(), "debug").unwrap();

    logger.info("dupes", fields!["k", 1, "k", 2]);
    logger.shutdown().await;

    let content = fs::read_to_string(logger.current_path()).unwrap();
    assert_eq!(content.matches("\"k\":").count(), 2);
    assert!(content.find("\"k\":1").unwrap() < content.find("\"k\":2").unwrap());
}

#[tokio::test]
async fn records_below_the_active_level_are_suppressed() {
    let tmp = TempDir::new().unwrap();
    let logger = JsonLogger::with_dir(tmp.path(), "warn").unwrap();

    logger.debug("too quiet", fields!());
    logger.error("loud enough", fields!());
    logger.shutdown().await;

    let content = fs::read_to_string(logger.current_path()).unwrap();
    assert!(!content.contains("too quiet"));
    assert!(content.contains("loud enough"));
}

#[tokio::test]
async fn level_can_change_at_runtime() {
    let tmp = TempDir::new().unwrap();
    let logger = JsonLogger::with_dir(tmp.path(), "error").unwrap();

    logger.info("dropped", fields!());
    logger.set_min_level(Level::Debug);
    logger.info("kept", fields!());
    logger.shutdown().await;

    let content = fs::read_to_string(logger.current_path()).unwrap();
    assert!(!content.contains("dropped"));
    assert!(content.contains("kept"));
}

#[tokio::test]
async fn unknown_level_string_defaults_to_info() {
    let tmp = TempDir::new().unwrap();
    let logger = JsonLogger::with_dir(tmp.path(), "extremely-loud").unwrap();
    assert_eq!(logger.min_level(), Level::Info);
    logger.shutdown().await;
}

#[tokio::test]
async fn construction_fails_when_the_directory_is_unusable() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, b"file, not dir").unwrap();

    assert!(JsonLogger::with_dir(blocker.join("logs"), "info").is_err());
}
