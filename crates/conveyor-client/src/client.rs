// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! ConveyorClient for interacting with the Conveyor execution service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use conveyor_polling::Poller;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    ExecutionSnapshot, ExecutionStatus, HealthStatus, HistoryEvent, HistoryOptions, PollOptions,
    StartExecutionOptions,
};
use crate::wire::{
    DescribeExecutionRequest, DescribeExecutionResponse, GetExecutionHistoryRequest,
    GetParameterRequest, GetSecretValueRequest, HealthCheckRequest, Request, Response,
    StartExecutionRequest,
};

/// High-level client for the Conveyor execution service.
///
/// Wraps the wire protocol with ergonomic methods for starting state-machine
/// executions, polling them to conclusion, reading event history, and
/// fetching secrets and configuration parameters.
///
/// The client is an explicitly constructed collaborator: build one per
/// target service and pass it where it is needed. Clones share the
/// underlying transport. Every operation is a single call with no implicit
/// retries; only [`poll_execution`](ConveyorClient::poll_execution) loops,
/// and only under the limits the caller configures.
#[derive(Clone)]
pub struct ConveyorClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl ConveyorClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self { transport, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client for localhost development.
    pub fn localhost() -> Result<Self> {
        Self::new(ClientConfig::localhost())
    }

    /// Build a client over a caller-supplied transport.
    ///
    /// This is the seam tests use to substitute a scripted transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and receive a response.
    async fn send_request(&self, request: Request) -> Result<Response> {
        match self.transport.call(request).await? {
            Response::Error(err) => Err(ClientError::Server {
                code: err.code,
                message: err.message,
            }),
            response => Ok(response),
        }
    }

    // =========================================================================
    // Executions
    // =========================================================================

    /// Start a new execution of a state machine.
    ///
    /// A UUID execution name is generated when the caller does not supply
    /// one, so two nameless launches never collide. The call is not retried;
    /// failures propagate to the caller.
    #[instrument(skip(self, options), fields(state_machine_id = %options.state_machine_id))]
    pub async fn start_execution(&self, options: StartExecutionOptions) -> Result<String> {
        if options.state_machine_id.is_empty() {
            return Err(ClientError::InvalidInput(
                "state_machine_id is required".to_string(),
            ));
        }

        let name = options.name.unwrap_or_else(|| Uuid::new_v4().to_string());
        info!(name = %name, "starting execution");

        let response = self
            .send_request(Request::StartExecution(StartExecutionRequest {
                state_machine_id: options.state_machine_id,
                name,
                input: options.input,
            }))
            .await?;

        match response {
            Response::StartExecution(resp) => {
                info!(execution_id = %resp.execution_id, "execution started");
                Ok(resp.execution_id)
            }
            _ => Err(ClientError::UnexpectedResponse(
                "expected StartExecutionResponse".to_string(),
            )),
        }
    }

    /// Fetch one status snapshot of an execution.
    #[instrument(skip(self), fields(execution_id = %execution_id))]
    pub async fn describe_execution(&self, execution_id: &str) -> Result<ExecutionSnapshot> {
        debug!("describing execution");

        let response = self
            .send_request(Request::DescribeExecution(DescribeExecutionRequest {
                execution_id: execution_id.to_string(),
            }))
            .await?;

        match response {
            Response::DescribeExecution(resp) => {
                if !resp.found {
                    return Err(ClientError::ExecutionNotFound(execution_id.to_string()));
                }
                Ok(snapshot_from_wire(resp))
            }
            _ => Err(ClientError::UnexpectedResponse(
                "expected DescribeExecutionResponse".to_string(),
            )),
        }
    }

    /// Poll an execution until it concludes.
    ///
    /// Drives [`describe_execution`](ConveyorClient::describe_execution)
    /// under the configured step strategy until the status is concluded,
    /// a budget runs out, or the status check fails with an error outside
    /// the ignore set. Budget exhaustion surfaces as
    /// [`ClientError::PollAttemptLimit`] or [`ClientError::PollTimeLimit`];
    /// probe errors pass through unchanged.
    #[instrument(skip(self, options), fields(execution_id = %execution_id))]
    pub async fn poll_execution(
        &self,
        execution_id: &str,
        options: PollOptions,
    ) -> Result<ExecutionSnapshot> {
        let PollOptions {
            step,
            timeout,
            max_attempts,
            ignore_kinds,
            cancel,
        } = options;

        let mut poller = Poller::new(step);
        if let Some(timeout) = timeout {
            poller = poller.with_timeout(timeout);
        }
        if let Some(max_attempts) = max_attempts {
            poller = poller.with_max_attempts(max_attempts);
        }
        if let Some(token) = cancel {
            poller = poller.with_cancel_token(token);
        }

        let snapshot = poller
            .run_tolerant(
                || self.describe_execution(execution_id),
                |snapshot: &ExecutionSnapshot| snapshot.status.is_concluded(),
                |err: &ClientError| ignore_kinds.contains(&err.kind()),
            )
            .await?;

        info!(status = %snapshot.status, "execution concluded");
        Ok(snapshot)
    }

    /// Start an execution and poll it to conclusion.
    pub async fn run_execution(
        &self,
        options: StartExecutionOptions,
        poll_options: PollOptions,
    ) -> Result<ExecutionSnapshot> {
        let execution_id = self.start_execution(options).await?;
        self.poll_execution(&execution_id, poll_options).await
    }

    /// Retrieve the event history of an execution.
    ///
    /// A bounded, ordered read with no retry or backoff semantics.
    #[instrument(skip(self, options), fields(execution_id = %execution_id))]
    pub async fn execution_history(
        &self,
        execution_id: &str,
        options: HistoryOptions,
    ) -> Result<Vec<HistoryEvent>> {
        debug!(
            max_results = options.max_results,
            newest_first = options.newest_first,
            "fetching execution history"
        );

        let response = self
            .send_request(Request::GetExecutionHistory(GetExecutionHistoryRequest {
                execution_id: execution_id.to_string(),
                max_results: options.max_results,
                newest_first: options.newest_first,
            }))
            .await?;

        match response {
            Response::GetExecutionHistory(resp) => {
                let events = resp
                    .events
                    .into_iter()
                    .map(|ev| HistoryEvent {
                        id: ev.id,
                        event_type: ev.event_type,
                        timestamp: Utc
                            .timestamp_millis_opt(ev.timestamp_ms)
                            .single()
                            .unwrap_or_else(Utc::now),
                        payload: ev.payload,
                    })
                    .collect();
                Ok(events)
            }
            _ => Err(ClientError::UnexpectedResponse(
                "expected GetExecutionHistoryResponse".to_string(),
            )),
        }
    }

    // =========================================================================
    // Secrets & Parameters
    // =========================================================================

    /// Fetch the value of a managed secret.
    ///
    /// The value is never logged.
    #[instrument(skip(self), fields(secret_id = %secret_id))]
    pub async fn get_secret_value(&self, secret_id: &str) -> Result<String> {
        debug!("getting secret");

        let response = self
            .send_request(Request::GetSecretValue(GetSecretValueRequest {
                secret_id: secret_id.to_string(),
            }))
            .await?;

        match response {
            Response::GetSecretValue(resp) => {
                if !resp.found {
                    return Err(ClientError::SecretNotFound(secret_id.to_string()));
                }
                debug!("secret value: <redacted>");
                Ok(resp.value)
            }
            _ => Err(ClientError::UnexpectedResponse(
                "expected GetSecretValueResponse".to_string(),
            )),
        }
    }

    /// Fetch the value of a configuration parameter.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn get_parameter(&self, name: &str) -> Result<String> {
        debug!("getting parameter");

        let response = self
            .send_request(Request::GetParameter(GetParameterRequest {
                name: name.to_string(),
            }))
            .await?;

        match response {
            Response::GetParameter(resp) => {
                if !resp.found {
                    return Err(ClientError::ParameterNotFound(name.to_string()));
                }
                debug!(value = %resp.value, "parameter value");
                Ok(resp.value)
            }
            _ => Err(ClientError::UnexpectedResponse(
                "expected GetParameterResponse".to_string(),
            )),
        }
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check health of the Conveyor service.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<HealthStatus> {
        debug!("performing health check");

        let response = self
            .send_request(Request::HealthCheck(HealthCheckRequest {}))
            .await?;

        match response {
            Response::HealthCheck(resp) => Ok(HealthStatus {
                healthy: resp.healthy,
                version: resp.version,
                uptime_ms: resp.uptime_ms,
            }),
            _ => Err(ClientError::UnexpectedResponse(
                "expected HealthCheckResponse".to_string(),
            )),
        }
    }
}

/// Convert a wire snapshot into the API type.
fn snapshot_from_wire(resp: DescribeExecutionResponse) -> ExecutionSnapshot {
    ExecutionSnapshot {
        execution_id: resp.execution_id,
        state_machine_id: resp.state_machine_id,
        name: resp.name,
        status: ExecutionStatus::from(resp.status.as_str()),
        started_at: Utc
            .timestamp_millis_opt(resp.started_at_ms)
            .single()
            .unwrap_or_else(Utc::now),
        stopped_at: resp
            .stopped_at_ms
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        input: resp.input,
        output: resp.output,
        error: resp.error,
        cause: resp.cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_wire_maps_status_and_timestamps() {
        let snapshot = snapshot_from_wire(DescribeExecutionResponse {
            found: true,
            execution_id: "exec-1".to_string(),
            state_machine_id: "machine-1".to_string(),
            name: "run-1".to_string(),
            status: "TIMED_OUT".to_string(),
            started_at_ms: 1_700_000_000_000,
            stopped_at_ms: Some(1_700_000_060_000),
            input: None,
            output: None,
            error: Some("States.Timeout".to_string()),
            cause: None,
        });

        assert_eq!(snapshot.status, ExecutionStatus::TimedOut);
        assert_eq!(snapshot.started_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(
            snapshot.stopped_at.unwrap().timestamp_millis(),
            1_700_000_060_000
        );
        assert_eq!(snapshot.error.as_deref(), Some("States.Timeout"));
    }

    #[test]
    fn test_snapshot_from_wire_unrecognized_status_is_unknown() {
        let snapshot = snapshot_from_wire(DescribeExecutionResponse {
            found: true,
            execution_id: String::new(),
            state_machine_id: String::new(),
            name: String::new(),
            status: "PENDING_REDRIVE".to_string(),
            started_at_ms: 0,
            stopped_at_ms: None,
            input: None,
            output: None,
            error: None,
            cause: None,
        });
        assert_eq!(snapshot.status, ExecutionStatus::Unknown);
        assert!(snapshot.status.is_concluded());
    }
}
