//! End-to-end tests for `lazykarabiner validate` command.

use lazykarabiner::config::Config;
use std::process::Command;

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_builtin_keymap() {
    let (config_path, _temp_dir) = create_temp_config_file(&Config::default());

    let output = Command::new(lazykarabiner_bin())
        .args(["validate", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Built-in keymap should validate. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"), "stdout: {stdout}");
    assert!(stdout.contains("Ordering:  passed"));
}

#[test]
fn test_validate_json() {
    let (config_path, _temp_dir) = create_temp_config_file(&Config::default());

    let output = Command::new(lazykarabiner_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["valid"], true, "Should be valid");
    assert_eq!(result["rules"], default_document().len());
    assert!(result["errors"].is_array(), "Should have errors array");
    assert_eq!(
        result["errors"].as_array().unwrap().len(),
        0,
        "Should have no errors"
    );
    assert_eq!(result["checks"]["keycodes"], "passed");
    assert_eq!(result["checks"]["ordering"], "passed");
    assert_eq!(result["checks"]["variables"], "passed");
}

#[test]
fn test_validate_strict_passes_without_warnings() {
    let (config_path, _temp_dir) = create_temp_config_file(&Config::default());

    let output = Command::new(lazykarabiner_bin())
        .args(["validate", "--strict", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Built-in keymap should have no warnings. stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_validate_invalid_config() {
    let (config_path, _temp_dir) = create_raw_config_file("[output]\ntitle = \"   \"\n");

    let output = Command::new(lazykarabiner_bin())
        .args(["validate", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("title"), "stderr: {stderr}");
}
