// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for conveyor-polling.

use std::time::Duration;

use thiserror::Error;

/// Errors that end a poll loop without a concluded result.
///
/// The limit variants are distinct from [`PollError::Probe`] so callers can
/// tell "gave up waiting" apart from "the status check itself failed". A
/// probe error outside the ignore set is carried unchanged in `Probe`.
#[derive(Debug, Error)]
pub enum PollError<E> {
    /// The configured attempt budget ran out before conclusion.
    #[error("poll attempt limit reached after {attempts} attempts")]
    AttemptLimitReached {
        /// Probe calls consumed, including ignored-error attempts.
        attempts: u32,
    },

    /// The configured wall-clock budget ran out before conclusion.
    #[error("poll time limit reached after {elapsed:?}")]
    TimeLimitReached {
        /// Time elapsed since the loop started.
        elapsed: Duration,
    },

    /// The cancellation token fired during a probe or an inter-attempt sleep.
    #[error("poll cancelled")]
    Cancelled,

    /// The probe failed with an error outside the ignore set.
    #[error("probe failed: {0}")]
    Probe(E),
}
