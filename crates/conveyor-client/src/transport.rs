// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Transport layer for the Conveyor API.

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::wire::{Request, Response};

/// Carries one request to the service and returns its response.
///
/// The client only ever talks through this trait, so tests substitute a
/// scripted transport for the HTTP one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: Request) -> Result<Response>;
}

/// JSON-over-HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    http: reqwest::Client,
    url: reqwest::Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let url = config
            .endpoint
            .join("api/v1/rpc")
            .map_err(|e| ClientError::Config(format!("invalid endpoint: {}", e)))?;

        Ok(Self {
            http,
            url,
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: Request) -> Result<Response> {
        debug!(url = %self.url, "sending request");

        let mut builder = self.http.post(self.url.clone()).json(&request);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                code: status.as_str().to_string(),
                message,
            });
        }

        response
            .json::<Response>()
            .await
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))
    }
}
