// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for conveyor-client.

use std::time::Duration;

use thiserror::Error;

use conveyor_polling::PollError;

/// Result type using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Server returned an error response.
    #[error("server error [{code}]: {message}")]
    Server { code: String, message: String },

    /// Unexpected response from server.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Execution not found.
    #[error("execution not found: {0}")]
    ExecutionNotFound(String),

    /// Secret not found.
    #[error("secret not found: {0}")]
    SecretNotFound(String),

    /// Parameter not found.
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    /// Invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Gave up polling: the attempt budget ran out before conclusion.
    #[error("poll attempt limit reached after {0} attempts")]
    PollAttemptLimit(u32),

    /// Gave up polling: the wall-clock budget ran out before conclusion.
    #[error("poll time limit reached after {0:?}")]
    PollTimeLimit(Duration),

    /// The poll was cancelled before conclusion.
    #[error("poll cancelled")]
    PollCancelled,
}

/// Coarse error category, the currency of poll ignore sets.
///
/// Matching is by category, never by message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Transport,
    Timeout,
    Server,
    UnexpectedResponse,
    NotFound,
    InvalidInput,
    Serialization,
    AttemptLimit,
    TimeLimit,
    Cancelled,
}

impl ClientError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Config(_) => ErrorKind::Config,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
            ClientError::ExecutionNotFound(_)
            | ClientError::SecretNotFound(_)
            | ClientError::ParameterNotFound(_) => ErrorKind::NotFound,
            ClientError::InvalidInput(_) => ErrorKind::InvalidInput,
            ClientError::Serialization(_) => ErrorKind::Serialization,
            ClientError::PollAttemptLimit(_) => ErrorKind::AttemptLimit,
            ClientError::PollTimeLimit(_) => ErrorKind::TimeLimit,
            ClientError::PollCancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

/// Limit outcomes become their own variants; a probe error passes through
/// unchanged so callers see the original failure.
impl From<PollError<ClientError>> for ClientError {
    fn from(err: PollError<ClientError>) -> Self {
        match err {
            PollError::AttemptLimitReached { attempts } => ClientError::PollAttemptLimit(attempts),
            PollError::TimeLimitReached { elapsed } => ClientError::PollTimeLimit(elapsed),
            PollError::Cancelled => ClientError::PollCancelled,
            PollError::Probe(err) => err,
        }
    }
}
