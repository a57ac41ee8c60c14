// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the client.

use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Result};

/// Configuration for the ConveyorClient.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Conveyor API.
    pub endpoint: Url,
    /// Bearer token sent with every request, if set.
    pub auth_token: Option<String>,
    /// Skip TLS certificate verification (development only).
    pub accept_invalid_certs: bool,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8002".parse().unwrap(),
            auth_token: None,
            accept_invalid_certs: false,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for localhost development.
    ///
    /// This enables certificate verification skipping.
    pub fn localhost() -> Self {
        Self {
            accept_invalid_certs: true,
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CONVEYOR_ENDPOINT`: Base API URL (default: "http://127.0.0.1:8002")
    /// - `CONVEYOR_TOKEN`: Bearer token (default: unset)
    /// - `CONVEYOR_ACCEPT_INVALID_CERTS`: Skip TLS verification (default: "false")
    /// - `CONVEYOR_CONNECT_TIMEOUT_MS`: Connection timeout in milliseconds (default: 10000)
    /// - `CONVEYOR_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("CONVEYOR_ENDPOINT")
            .unwrap_or_else(|_| "http://127.0.0.1:8002".to_string())
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid CONVEYOR_ENDPOINT: {}", e)))?;

        let auth_token = std::env::var("CONVEYOR_TOKEN").ok();

        let accept_invalid_certs = std::env::var("CONVEYOR_ACCEPT_INVALID_CERTS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let connect_timeout_ms: u64 = std::env::var("CONVEYOR_CONNECT_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|e| {
                ClientError::Config(format!("invalid CONVEYOR_CONNECT_TIMEOUT_MS: {}", e))
            })?;

        let request_timeout_ms: u64 = std::env::var("CONVEYOR_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| {
                ClientError::Config(format!("invalid CONVEYOR_REQUEST_TIMEOUT_MS: {}", e))
            })?;

        Ok(Self {
            endpoint,
            auth_token,
            accept_invalid_certs,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }

    /// Set the API endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Enable or disable certificate verification skipping.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
