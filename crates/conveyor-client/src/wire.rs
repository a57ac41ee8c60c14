// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire protocol messages exchanged with the Conveyor API.
//!
//! Requests and responses are tagged JSON envelopes, one variant per
//! operation. Timestamps travel as millisecond epochs; point lookups carry
//! an explicit `found` flag so "missing" is distinguishable from an error.

use serde::{Deserialize, Serialize};

/// Request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Request {
    StartExecution(StartExecutionRequest),
    DescribeExecution(DescribeExecutionRequest),
    GetExecutionHistory(GetExecutionHistoryRequest),
    GetSecretValue(GetSecretValueRequest),
    GetParameter(GetParameterRequest),
    HealthCheck(HealthCheckRequest),
}

/// Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Response {
    StartExecution(StartExecutionResponse),
    DescribeExecution(DescribeExecutionResponse),
    GetExecutionHistory(GetExecutionHistoryResponse),
    GetSecretValue(GetSecretValueResponse),
    GetParameter(GetParameterResponse),
    HealthCheck(HealthCheckResponse),
    Error(ErrorResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartExecutionRequest {
    pub state_machine_id: String,
    pub name: String,
    pub input: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartExecutionResponse {
    pub execution_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeExecutionRequest {
    pub execution_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeExecutionResponse {
    pub found: bool,
    pub execution_id: String,
    pub state_machine_id: String,
    pub name: String,
    pub status: String,
    pub started_at_ms: i64,
    pub stopped_at_ms: Option<i64>,
    pub input: Option<serde_json::Value>,
    pub output: Option<serde_json::Value>,
    pub error: Option<String>,
    pub cause: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetExecutionHistoryRequest {
    pub execution_id: String,
    pub max_results: u32,
    pub newest_first: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetExecutionHistoryResponse {
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub timestamp_ms: i64,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSecretValueRequest {
    pub secret_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSecretValueResponse {
    pub found: bool,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetParameterRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetParameterResponse {
    pub found: bool,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub healthy: bool,
    pub version: String,
    pub uptime_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_shape() {
        let request = Request::DescribeExecution(DescribeExecutionRequest {
            execution_id: "exec-1".to_string(),
        });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "describe_execution");
        assert_eq!(json["body"]["execution_id"], "exec-1");
    }

    #[test]
    fn test_error_response_parses() {
        let raw = r#"{"type":"error","body":{"code":"NOT_FOUND","message":"no such execution"}}"#;
        let response: Response = serde_json::from_str(raw).unwrap();
        match response {
            Response::Error(err) => {
                assert_eq!(err.code, "NOT_FOUND");
                assert_eq!(err.message, "no such execution");
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }
}
