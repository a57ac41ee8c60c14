// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The poll loop.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::PollError;
use crate::step::StepStrategy;

/// Drives an async probe function to conclusion.
///
/// One [`run`](Poller::run) call owns its own attempt counter and clock;
/// concurrent runs share no state. Probes are strictly sequential: each one
/// completes (or is ignored) before the next delay begins.
///
/// Without a timeout or attempt cap the loop runs until the success
/// predicate accepts a result or the probe fails with an unignored error.
#[derive(Debug, Clone)]
pub struct Poller<S> {
    step: S,
    timeout: Option<Duration>,
    max_attempts: Option<u32>,
    cancel: Option<CancellationToken>,
}

impl<S: StepStrategy> Poller<S> {
    /// Create a poller with the given step strategy and no limits.
    pub fn new(step: S) -> Self {
        Self {
            step,
            timeout: None,
            max_attempts: None,
            cancel: None,
        }
    }

    /// Give up with [`PollError::TimeLimitReached`] once this much wall
    /// clock has elapsed since the loop started.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Give up with [`PollError::AttemptLimitReached`] after this many
    /// probe calls. Zero means the probe is never invoked.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Abort with [`PollError::Cancelled`] when the token fires, whether
    /// the loop is probing or sleeping at that moment.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Poll until `concluded` accepts a probe result.
    ///
    /// Every probe error is fatal; use [`run_tolerant`](Poller::run_tolerant)
    /// to enumerate errors worth retrying through.
    pub async fn run<T, E, F, Fut>(
        &self,
        probe: F,
        concluded: impl FnMut(&T) -> bool,
    ) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_tolerant(probe, concluded, |_: &E| false).await
    }

    /// Poll until `concluded` accepts a probe result, retrying through
    /// probe errors that `ignore` accepts.
    ///
    /// An ignored error consumes one attempt and skips the success check;
    /// any other probe error ends the loop immediately. Limit checks happen
    /// before each probe, and the first probe has no prior delay.
    pub async fn run_tolerant<T, E, F, Fut>(
        &self,
        mut probe: F,
        mut concluded: impl FnMut(&T) -> bool,
        mut ignore: impl FnMut(&E) -> bool,
    ) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if let Some(max_attempts) = self.max_attempts {
                if attempts >= max_attempts {
                    return Err(PollError::AttemptLimitReached { attempts });
                }
            }
            if let Some(timeout) = self.timeout {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    return Err(PollError::TimeLimitReached { elapsed });
                }
            }

            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(PollError::Cancelled);
                }
            }

            let Some(outcome) = self.race_cancel(probe()).await else {
                return Err(PollError::Cancelled);
            };

            match outcome {
                Ok(snapshot) => {
                    attempts += 1;
                    if concluded(&snapshot) {
                        debug!(attempts, "poll concluded");
                        return Ok(snapshot);
                    }
                }
                Err(err) if ignore(&err) => {
                    attempts += 1;
                    warn!(attempts, "ignoring probe error; will retry");
                }
                Err(err) => return Err(PollError::Probe(err)),
            }

            let delay = self.step.delay(attempts);
            debug!(attempts, ?delay, "not concluded; sleeping until next probe");
            if self.race_cancel(sleep(delay)).await.is_none() {
                return Err(PollError::Cancelled);
            }
        }
    }

    /// Race a future against the cancellation token, if one is configured.
    /// `None` means the token fired first.
    async fn race_cancel<O>(&self, fut: impl Future<Output = O>) -> Option<O> {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => None,
                out = fut => Some(out),
            },
            None => Some(fut.await),
        }
    }
}
