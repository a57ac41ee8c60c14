// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! High-level types for the client.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use conveyor_polling::{ExponentialBackoff, StepStrategy};

use crate::error::ErrorKind;

/// Execution status reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Queued, not yet picked up by a worker.
    Waiting,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Exceeded its execution time limit.
    TimedOut,
    /// Stopped by an operator.
    Aborted,
    /// A status string this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl ExecutionStatus {
    /// True once the execution is done, though not necessarily succeeded.
    ///
    /// Anything outside the in-flight states counts as concluded, including
    /// statuses this client does not know.
    pub fn is_concluded(&self) -> bool {
        !matches!(self, ExecutionStatus::Waiting | ExecutionStatus::Running)
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Waiting => "WAITING",
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Succeeded => "SUCCEEDED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::TimedOut => "TIMED_OUT",
            ExecutionStatus::Aborted => "ABORTED",
            ExecutionStatus::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for ExecutionStatus {
    fn from(value: &str) -> Self {
        match value {
            "WAITING" => ExecutionStatus::Waiting,
            "RUNNING" => ExecutionStatus::Running,
            "SUCCEEDED" => ExecutionStatus::Succeeded,
            "FAILED" => ExecutionStatus::Failed,
            "TIMED_OUT" => ExecutionStatus::TimedOut,
            "ABORTED" => ExecutionStatus::Aborted,
            _ => ExecutionStatus::Unknown,
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One status snapshot of an execution, as returned by a probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSnapshot {
    /// Execution ID.
    pub execution_id: String,
    /// State machine this execution was started from.
    pub state_machine_id: String,
    /// Execution name (caller-supplied or generated at start).
    pub name: String,
    /// Current status.
    pub status: ExecutionStatus,
    /// When the execution started.
    pub started_at: DateTime<Utc>,
    /// When the execution stopped (if concluded).
    pub stopped_at: Option<DateTime<Utc>>,
    /// Input supplied at start.
    pub input: Option<serde_json::Value>,
    /// Output produced by the execution (if succeeded).
    pub output: Option<serde_json::Value>,
    /// Error code (if failed).
    pub error: Option<String>,
    /// Human-readable failure cause (if failed).
    pub cause: Option<String>,
}

/// Options for starting an execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartExecutionOptions {
    /// State machine to execute.
    pub state_machine_id: String,
    /// Input data (JSON).
    pub input: Option<serde_json::Value>,
    /// Execution name. A UUID is generated when unset.
    pub name: Option<String>,
}

impl StartExecutionOptions {
    pub fn new(state_machine_id: impl Into<String>) -> Self {
        Self {
            state_machine_id: state_machine_id.into(),
            input: None,
            name: None,
        }
    }

    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One record from an execution's event history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Event ID, increasing in execution order.
    pub id: i64,
    /// Event type, e.g. "ExecutionStarted" or "StateEntered".
    pub event_type: String,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Event payload (JSON), if any.
    pub payload: Option<serde_json::Value>,
}

/// Options for reading execution history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOptions {
    /// Number of events to retrieve.
    pub max_results: u32,
    /// Return the most recent events first.
    pub newest_first: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            newest_first: true,
        }
    }
}

impl HistoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_newest_first(mut self, newest_first: bool) -> Self {
        self.newest_first = newest_first;
        self
    }
}

/// Health status of the Conveyor service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Uptime in milliseconds.
    pub uptime_ms: i64,
}

/// Options for [`poll_execution`](crate::ConveyorClient::poll_execution).
///
/// Defaults: exponential backoff, 300s timeout, unlimited attempts, empty
/// ignore set, no cancellation token.
pub struct PollOptions {
    pub(crate) step: Box<dyn StepStrategy>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) max_attempts: Option<u32>,
    pub(crate) ignore_kinds: Vec<ErrorKind>,
    pub(crate) cancel: Option<CancellationToken>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            step: Box::new(ExponentialBackoff::default()),
            timeout: Some(Duration::from_secs(300)),
            max_attempts: None,
            ignore_kinds: Vec::new(),
            cancel: None,
        }
    }
}

impl PollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the step strategy.
    pub fn with_step(mut self, step: impl StepStrategy + 'static) -> Self {
        self.step = Box::new(step);
        self
    }

    /// Set the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Poll with no wall-clock budget.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Cap the number of status checks.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Retry through probe errors of this kind instead of failing.
    pub fn ignore(mut self, kind: ErrorKind) -> Self {
        self.ignore_kinds.push(kind);
        self
    }

    /// Abort the poll when the token fires.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl fmt::Debug for PollOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollOptions")
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("ignore_kinds", &self.ignore_kinds)
            .finish_non_exhaustive()
    }
}
