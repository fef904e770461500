// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{ConfigError, StageError};

/// Failure of a whole test run, as opposed to the per-tuple failures it reports.
#[derive(Debug, Error)]
pub enum TestRunError {
    #[error("Test case could not be loaded: {0}")]
    Fixture(#[from] ConfigError),

    #[error("Stage instance {worker} failed to start: {source}")]
    StageStartup {
        worker: usize,
        #[source]
        source: StageError,
    },

    #[error("Stage worker {worker} panicked or was cancelled: {reason}")]
    Worker { worker: usize, reason: String },
}
