// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Conveyor Polling
//!
//! Drives an asynchronous status probe to conclusion.
//!
//! The [`Poller`] repeatedly invokes a probe function, waiting between
//! attempts according to a pluggable [`StepStrategy`], until a caller-supplied
//! predicate accepts a probe result or a limit ends the loop. Limits are
//! opt-in: a wall-clock timeout, an attempt cap, and a cancellation token.
//! Callers can also enumerate probe errors to tolerate, turning them into
//! ordinary retries instead of loop failures.
//!
//! This crate knows nothing about any particular service. The probe is just
//! an async closure, so the same loop waits on remote executions, resource
//! readiness, or anything else that exposes a status call.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use conveyor_polling::{ExponentialBackoff, PollError, Poller};
//!
//! # struct Job { done: bool }
//! # async fn fetch_job() -> Result<Job, std::io::Error> { Ok(Job { done: true }) }
//! # async fn example() -> Result<(), PollError<std::io::Error>> {
//! let poller = Poller::new(ExponentialBackoff::default().with_max_delay(Duration::from_secs(30)))
//!     .with_timeout(Duration::from_secs(300));
//!
//! let job = poller.run(|| fetch_job(), |job| job.done).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod poll;
mod step;

pub use error::PollError;
pub use poll::Poller;
pub use step::{Constant, ExponentialBackoff, StepStrategy};
