// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for test runs that feed fixture records through a stage.

use crate::observability::messages::{millis, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Test run started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TestRunStarted<'a> {
    pub test_case: &'a str,
    pub stage: &'a str,
    pub tuple_count: usize,
    pub parallelism: usize,
}

impl Display for TestRunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Test case '{}' started on stage '{}': {} tuples across {} instances",
            self.test_case, self.stage, self.tuple_count, self.parallelism
        )
    }
}

impl StructuredLog for TestRunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            test_case = self.test_case,
            stage = self.stage,
            tuple_count = self.tuple_count,
            parallelism = self.parallelism,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "test_run",
            span_name = name,
            test_case = self.test_case,
            stage = self.stage,
        )
    }
}

/// Test run finished, successfully or not.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TestRunCompleted<'a> {
    pub test_case: &'a str,
    pub emitted: usize,
    pub acked: usize,
    pub failed: usize,
    pub duration: std::time::Duration,
}

impl Display for TestRunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Test case '{}' completed in {:?}: {} emitted, {} acked, {} failed",
            self.test_case, self.duration, self.emitted, self.acked, self.failed
        )
    }
}

impl StructuredLog for TestRunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            test_case = self.test_case,
            emitted = self.emitted,
            acked = self.acked,
            failed = self.failed,
            duration_ms = millis(self.duration),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "test_run_completed",
            span_name = name,
            test_case = self.test_case,
        )
    }
}
