// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for built-in processor execution.

use crate::observability::messages::{micros, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A processor finished handling one event.
///
/// # Log Level
/// `debug!` - Per-event detail
pub struct ProcessorExecutionCompleted<'a> {
    pub processor_id: &'a str,
    pub event_id: &'a str,
    pub result_count: usize,
    pub duration: std::time::Duration,
}

impl Display for ProcessorExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' handled event {} in {:?}: {} result(s)",
            self.processor_id, self.event_id, self.duration, self.result_count
        )
    }
}

impl StructuredLog for ProcessorExecutionCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            event_id = self.event_id,
            result_count = self.result_count,
            duration_us = micros(self.duration),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_execution",
            span_name = name,
            processor_id = self.processor_id,
            event_id = self.event_id,
        )
    }
}

/// A processor dropped an event without producing any result.
///
/// # Log Level
/// `debug!` - Expected filtering, not an error
pub struct EventFiltered<'a> {
    pub processor_id: &'a str,
    pub event_id: &'a str,
    pub reason: &'a str,
}

impl Display for EventFiltered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' filtered event {}: {}",
            self.processor_id, self.event_id, self.reason
        )
    }
}

impl StructuredLog for EventFiltered<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            event_id = self.event_id,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "event_filtered",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}
