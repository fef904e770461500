// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stage lifecycle and per-event events.
//!
//! This module contains message types for logging events related to:
//! * Stage preparation (success and failure)
//! * Per-event acks and processing failures
//! * Stage shutdown

use crate::observability::messages::{micros, StructuredLog};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Stage finished its setup and can accept input.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use custom_processor_stage::observability::messages::stage::StagePrepared;
///
/// let msg = StagePrepared {
///     stage: "severity-router",
///     identifier: "field_router",
///     stream_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct StagePrepared<'a> {
    pub stage: &'a str,
    pub identifier: &'a str,
    pub stream_count: usize,
}

impl Display for StagePrepared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' prepared with custom processor '{}' and {} output streams",
            self.stage, self.identifier, self.stream_count
        )
    }
}

impl StructuredLog for StagePrepared<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            identifier = self.identifier,
            stream_count = self.stream_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stage",
            span_name = name,
            stage = self.stage,
            identifier = self.identifier,
        )
    }
}

/// Stage could not be prepared.
///
/// # Log Level
/// `error!` - The stage will never run
pub struct StagePrepareFailed<'a> {
    pub stage: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StagePrepareFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' failed to prepare: {}", self.stage, self.error)
    }
}

impl StructuredLog for StagePrepareFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "stage_prepare_failed",
            span_name = name,
            stage = self.stage,
            error = %self.error,
        )
    }
}

/// One input event was handled and acked.
///
/// # Log Level
/// `trace!` - Per-event detail
pub struct EventAcked<'a> {
    pub stage: &'a str,
    pub message_id: u64,
    pub duration: Duration,
}

impl Display for EventAcked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' acked message {} in {:?}",
            self.stage, self.message_id, self.duration
        )
    }
}

impl StructuredLog for EventAcked<'_> {
    fn log(&self) {
        tracing::trace!(
            stage = self.stage,
            message_id = self.message_id,
            duration_us = micros(self.duration),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "event_acked",
            span_name = name,
            stage = self.stage,
            message_id = self.message_id,
        )
    }
}

/// One input event could not be handled.
///
/// # Log Level
/// `error!` - The host will fail the input
pub struct EventFailed<'a> {
    pub stage: &'a str,
    pub event_id: &'a str,
    pub message_id: u64,
    pub error: &'a dyn std::error::Error,
}

impl Display for EventFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' failed event '{}' (message {}): {}",
            self.stage, self.event_id, self.message_id, self.error
        )
    }
}

impl StructuredLog for EventFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            event_id = self.event_id,
            message_id = self.message_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "event_failed",
            span_name = name,
            stage = self.stage,
            event_id = self.event_id,
            message_id = self.message_id,
        )
    }
}

/// Stage was closed by its host.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StageClosed<'a> {
    pub stage: &'a str,
    pub processed: u64,
    pub failed: u64,
}

impl Display for StageClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' closed after {} events ({} failed)",
            self.stage, self.processed, self.failed
        )
    }
}

impl StructuredLog for StageClosed<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            processed = self.processed,
            failed = self.failed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stage_closed",
            span_name = name,
            stage = self.stage,
        )
    }
}
