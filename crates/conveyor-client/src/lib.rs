// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Conveyor Client SDK
//!
//! High-level client for the Conveyor execution service.
//!
//! This crate wraps the Conveyor wire protocol with ergonomic methods for
//! starting state-machine executions, polling them to conclusion, reading
//! their event history, and fetching managed secrets and configuration
//! parameters.
//!
//! The only piece with real machinery is [`ConveyorClient::poll_execution`],
//! which drives the status probe with a configurable step strategy, timeout,
//! attempt cap and ignore set (see the `conveyor-polling` crate). Everything
//! else is a single request/response call with error translation.
//!
//! # Example
//!
//! ```no_run
//! use conveyor_client::{ConveyorClient, PollOptions, StartExecutionOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client for local development
//! let client = ConveyorClient::localhost()?;
//!
//! // Start an execution; the name is generated when not supplied
//! let options = StartExecutionOptions::new("machine-orders")
//!     .with_input(serde_json::json!({"order_id": 42}));
//! let execution_id = client.start_execution(options).await?;
//!
//! // Poll until the execution concludes
//! let snapshot = client
//!     .poll_execution(&execution_id, PollOptions::default())
//!     .await?;
//! println!("Concluded with status: {:?}", snapshot.status);
//!
//! // Read the last five events, newest first
//! let events = client
//!     .execution_history(&execution_id, Default::default())
//!     .await?;
//! println!("{} events", events.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod transport;
mod types;
pub mod wire;

pub use client::ConveyorClient;
pub use config::ClientConfig;
pub use conveyor_polling::{Constant, ExponentialBackoff, PollError, Poller, StepStrategy};
pub use error::{ClientError, ErrorKind, Result};
pub use transport::{HttpTransport, Transport};
pub use types::{
    ExecutionSnapshot, ExecutionStatus, HealthStatus, HistoryEvent, HistoryOptions, PollOptions,
    StartExecutionOptions,
};
