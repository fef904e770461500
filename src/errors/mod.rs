// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod stage;
mod testrun;

pub use stage::{ConfigError, InitError, LoadError, ProcessingError, RoutingError, StageError};
pub use testrun::TestRunError;

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;
