// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for output stream declaration and dispatch.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Output streams were declared to the host.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StreamsDeclared<'a> {
    pub stage: &'a str,
    pub streams: &'a [String],
}

impl Display for StreamsDeclared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' declared output streams: {}",
            self.stage,
            self.streams.join(", ")
        )
    }
}

impl StructuredLog for StreamsDeclared<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            streams = self.streams.join(","),
            stream_count = self.streams.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "streams_declared",
            span_name = name,
            stage = self.stage,
            stream_count = self.streams.len(),
        )
    }
}

/// A processor result named a stream that was never declared.
///
/// # Log Level
/// `error!` - Processor bug; the result is not emitted
///
/// # Example
/// ```
/// use custom_processor_stage::observability::messages::routing::UndeclaredStream;
///
/// let msg = UndeclaredStream {
///     stage: "severity-router",
///     stream: "nowhere",
///     event_count: 2,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct UndeclaredStream<'a> {
    pub stage: &'a str,
    pub stream: &'a str,
    pub event_count: usize,
}

impl Display for UndeclaredStream<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' got {} event(s) for undeclared stream '{}'",
            self.stage, self.event_count, self.stream
        )
    }
}

impl StructuredLog for UndeclaredStream<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            stream = self.stream,
            event_count = self.event_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "undeclared_stream",
            span_name = name,
            stage = self.stage,
            stream = self.stream,
        )
    }
}

/// Results for one input were emitted.
///
/// # Log Level
/// `trace!` - Per-event detail
pub struct EventsDispatched<'a> {
    pub stage: &'a str,
    pub anchor: u64,
    pub result_count: usize,
    pub emitted: usize,
}

impl Display for EventsDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' emitted {} event(s) from {} result(s) anchored to message {}",
            self.stage, self.emitted, self.result_count, self.anchor
        )
    }
}

impl StructuredLog for EventsDispatched<'_> {
    fn log(&self) {
        tracing::trace!(
            stage = self.stage,
            anchor = self.anchor,
            result_count = self.result_count,
            emitted = self.emitted,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "events_dispatched",
            span_name = name,
            stage = self.stage,
            anchor = self.anchor,
        )
    }
}
