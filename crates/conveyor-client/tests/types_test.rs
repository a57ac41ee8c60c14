// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Type conversion and builder tests for conveyor-client.

use std::time::Duration;

use conveyor_client::{
    ExecutionStatus, HistoryOptions, PollOptions, StartExecutionOptions,
};

#[test]
fn test_execution_status_from_str() {
    assert_eq!(ExecutionStatus::from("WAITING"), ExecutionStatus::Waiting);
    assert_eq!(ExecutionStatus::from("RUNNING"), ExecutionStatus::Running);
    assert_eq!(ExecutionStatus::from("SUCCEEDED"), ExecutionStatus::Succeeded);
    assert_eq!(ExecutionStatus::from("FAILED"), ExecutionStatus::Failed);
    assert_eq!(ExecutionStatus::from("TIMED_OUT"), ExecutionStatus::TimedOut);
    assert_eq!(ExecutionStatus::from("ABORTED"), ExecutionStatus::Aborted);
    assert_eq!(
        ExecutionStatus::from("PENDING_REDRIVE"),
        ExecutionStatus::Unknown
    );
}

#[test]
fn test_execution_status_is_concluded() {
    assert!(!ExecutionStatus::Waiting.is_concluded());
    assert!(!ExecutionStatus::Running.is_concluded());
    assert!(ExecutionStatus::Succeeded.is_concluded());
    assert!(ExecutionStatus::Failed.is_concluded());
    assert!(ExecutionStatus::TimedOut.is_concluded());
    assert!(ExecutionStatus::Aborted.is_concluded());
    // Anything outside the in-flight set counts as concluded.
    assert!(ExecutionStatus::Unknown.is_concluded());
}

#[test]
fn test_execution_status_display_uses_wire_names() {
    assert_eq!(ExecutionStatus::TimedOut.to_string(), "TIMED_OUT");
    assert_eq!(ExecutionStatus::Succeeded.to_string(), "SUCCEEDED");
}

#[test]
fn test_execution_status_serde_names() {
    let json = serde_json::to_string(&ExecutionStatus::TimedOut).unwrap();
    assert_eq!(json, r#""TIMED_OUT""#);

    let status: ExecutionStatus = serde_json::from_str(r#""ABORTED""#).unwrap();
    assert_eq!(status, ExecutionStatus::Aborted);

    // Unrecognized wire values deserialize to Unknown instead of failing.
    let status: ExecutionStatus = serde_json::from_str(r#""SOMETHING_NEW""#).unwrap();
    assert_eq!(status, ExecutionStatus::Unknown);
}

#[test]
fn test_start_execution_options_builder() {
    let options = StartExecutionOptions::new("machine-1")
        .with_input(serde_json::json!({"key": "value"}))
        .with_name("nightly-run");

    assert_eq!(options.state_machine_id, "machine-1");
    assert_eq!(options.input, Some(serde_json::json!({"key": "value"})));
    assert_eq!(options.name.as_deref(), Some("nightly-run"));
}

#[test]
fn test_history_options_defaults() {
    let options = HistoryOptions::default();
    assert_eq!(options.max_results, 5);
    assert!(options.newest_first);
}

#[test]
fn test_history_options_builder() {
    let options = HistoryOptions::new()
        .with_max_results(50)
        .with_newest_first(false);
    assert_eq!(options.max_results, 50);
    assert!(!options.newest_first);
}

#[test]
fn test_poll_options_builder() {
    let options = PollOptions::new()
        .with_timeout(Duration::from_secs(60))
        .with_max_attempts(10);
    let debug = format!("{:?}", options);
    assert!(debug.contains("60"));
    assert!(debug.contains("10"));
}

#[test]
fn test_poll_options_without_timeout() {
    let options = PollOptions::new().without_timeout();
    let debug = format!("{:?}", options);
    assert!(debug.contains("timeout: None"));
}
