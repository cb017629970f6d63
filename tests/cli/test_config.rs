//! Tests for the show-config CLI command

use crate::common::create_test_services;
use nodeindex::cli::commands::config::{execute, ConfigArgs};
use nodeindex::cli::OutputFormat;

#[tokio::test]
async fn test_show_config_human() {
    let services = create_test_services();
    let result = execute(ConfigArgs { all: false }, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "show-config should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_show_config_json_all() {
    let services = create_test_services();
    let result = execute(ConfigArgs { all: true }, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "show-config should succeed: {:?}", result.err());
}
