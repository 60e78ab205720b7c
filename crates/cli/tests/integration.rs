//! Integration tests for s3cp against a real bucket
//!
//! These tests require an S3 or S3-compatible endpoint and a writable bucket.
//!
//! Run with:
//! ```bash
//! export TEST_S3_BUCKET=my-scratch-bucket
//! export TEST_S3_ACCESS_KEY=...
//! export TEST_S3_SECRET_KEY=...
//! # Optional, for S3-compatible services
//! export TEST_S3_ENDPOINT=http://localhost:9000
//!
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

struct TestConfig {
    bucket: String,
    access_key: String,
    secret_key: String,
    endpoint: Option<String>,
}

/// Get S3 test configuration from environment
fn get_test_config() -> Option<TestConfig> {
    Some(TestConfig {
        bucket: std::env::var("TEST_S3_BUCKET").ok()?,
        access_key: std::env::var("TEST_S3_ACCESS_KEY").ok()?,
        secret_key: std::env::var("TEST_S3_SECRET_KEY").ok()?,
        endpoint: std::env::var("TEST_S3_ENDPOINT").ok(),
    })
}

/// Unique prefix so concurrent runs don't collide
fn unique_prefix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("s3cp-test-{nanos}")
}

fn run_s3cp(config: &TestConfig, args: &[&str], home: &std::path::Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_s3cp"));
    cmd.args([
        "-v",
        "--access-key",
        &config.access_key,
        "--secret-key",
        &config.secret_key,
    ]);
    if let Some(endpoint) = &config.endpoint {
        cmd.args(["--endpoint-url", endpoint]);
    }
    cmd.args(args).env("HOME", home).env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute s3cp")
}

#[test]
fn test_upload_and_download_round_trip() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping: TEST_S3_BUCKET / TEST_S3_ACCESS_KEY / TEST_S3_SECRET_KEY not set");
        return;
    };

    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let back = TempDir::new().unwrap();

    let data: Vec<u8> = (0..256 * 1024).map(|i| (i * 31 % 256) as u8).collect();
    std::fs::write(src.path().join("blob.bin"), &data).unwrap();
    std::fs::write(src.path().join("notes.txt"), "round trip").unwrap();

    let remote_dir = format!("s3://{}/{}/", config.bucket, unique_prefix());
    let blob = src.path().join("blob.bin").display().to_string();
    let notes = src.path().join("notes.txt").display().to_string();

    let output = run_s3cp(&config, &[&blob, &notes, &remote_dir], home.path());
    assert!(
        output.status.success(),
        "upload failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    let remote_blob = format!("{remote_dir}blob.bin");
    let remote_notes = format!("{remote_dir}notes.txt");
    let local_dir = format!("{}/", back.path().display());

    let output = run_s3cp(
        &config,
        &[&remote_blob, &remote_notes, &local_dir],
        home.path(),
    );
    assert!(
        output.status.success(),
        "download failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    assert_eq!(std::fs::read(back.path().join("blob.bin")).unwrap(), data);
    assert_eq!(
        std::fs::read_to_string(back.path().join("notes.txt")).unwrap(),
        "round trip"
    );
}

#[test]
fn test_missing_remote_object_fails() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping: TEST_S3_BUCKET / TEST_S3_ACCESS_KEY / TEST_S3_SECRET_KEY not set");
        return;
    };

    let home = TempDir::new().unwrap();
    let back = TempDir::new().unwrap();

    let missing = format!("s3://{}/{}/missing.txt", config.bucket, unique_prefix());
    let local_dir = format!("{}/", back.path().display());

    let output = run_s3cp(&config, &[&missing, &local_dir], home.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Failed to copy"));
}
