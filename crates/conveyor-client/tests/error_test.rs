// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error type tests for conveyor-client.

use std::time::Duration;

use conveyor_client::{ClientError, ErrorKind, PollError};

#[test]
fn test_config_error_display() {
    let err = ClientError::Config("missing endpoint".to_string());
    assert!(err.to_string().contains("configuration error"));
    assert!(err.to_string().contains("missing endpoint"));
}

#[test]
fn test_server_error_display() {
    let err = ClientError::Server {
        code: "500".to_string(),
        message: "internal error".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("server error"));
    assert!(display.contains("500"));
    assert!(display.contains("internal error"));
}

#[test]
fn test_not_found_displays_carry_the_identifier() {
    assert!(
        ClientError::ExecutionNotFound("exec-1".to_string())
            .to_string()
            .contains("exec-1")
    );
    assert!(
        ClientError::SecretNotFound("db-password".to_string())
            .to_string()
            .contains("db-password")
    );
    assert!(
        ClientError::ParameterNotFound("region".to_string())
            .to_string()
            .contains("region")
    );
}

#[test]
fn test_poll_limit_displays_carry_the_budget_spent() {
    let err = ClientError::PollAttemptLimit(7);
    assert!(err.to_string().contains("attempt limit"));
    assert!(err.to_string().contains('7'));

    let err = ClientError::PollTimeLimit(Duration::from_secs(300));
    assert!(err.to_string().contains("time limit"));
}

#[test]
fn test_error_kinds() {
    assert_eq!(
        ClientError::Transport("reset".to_string()).kind(),
        ErrorKind::Transport
    );
    assert_eq!(
        ClientError::Timeout("deadline".to_string()).kind(),
        ErrorKind::Timeout
    );
    assert_eq!(
        ClientError::Server {
            code: "X".to_string(),
            message: "y".to_string()
        }
        .kind(),
        ErrorKind::Server
    );
    assert_eq!(ClientError::PollCancelled.kind(), ErrorKind::Cancelled);
    assert_eq!(ClientError::PollAttemptLimit(1).kind(), ErrorKind::AttemptLimit);
    assert_eq!(
        ClientError::PollTimeLimit(Duration::from_secs(1)).kind(),
        ErrorKind::TimeLimit
    );
}

#[test]
fn test_every_not_found_shares_one_kind() {
    assert_eq!(
        ClientError::ExecutionNotFound(String::new()).kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        ClientError::SecretNotFound(String::new()).kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        ClientError::ParameterNotFound(String::new()).kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<()>("not json").unwrap_err();
    let err: ClientError = json_err.into();
    assert!(matches!(err, ClientError::Serialization(_)));
}

#[test]
fn test_poll_limit_errors_map_to_their_variants() {
    let err: ClientError = PollError::<ClientError>::AttemptLimitReached { attempts: 3 }.into();
    assert!(matches!(err, ClientError::PollAttemptLimit(3)));

    let err: ClientError = PollError::<ClientError>::TimeLimitReached {
        elapsed: Duration::from_secs(42),
    }
    .into();
    assert!(matches!(
        err,
        ClientError::PollTimeLimit(elapsed) if elapsed == Duration::from_secs(42)
    ));

    let err: ClientError = PollError::<ClientError>::Cancelled.into();
    assert!(matches!(err, ClientError::PollCancelled));
}

#[test]
fn test_probe_errors_pass_through_unchanged() {
    let original = ClientError::Server {
        code: "THROTTLED".to_string(),
        message: "slow down".to_string(),
    };
    let err: ClientError = PollError::Probe(original).into();
    match err {
        ClientError::Server { code, .. } => assert_eq!(code, "THROTTLED"),
        other => panic!("expected Server, got {other:?}"),
    }
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientError>();
    assert_send_sync::<ErrorKind>();
}
