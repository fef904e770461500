// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::Event;

/// Events a processor wants emitted on one output stream.
///
/// A single `process` call may return any number of these, each with any
/// number of events (including none).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorResult {
    pub stream: String,
    pub events: Vec<Event>,
}

impl ProcessorResult {
    pub fn new(stream: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            stream: stream.into(),
            events,
        }
    }

    pub fn single(stream: impl Into<String>, event: Event) -> Self {
        Self::new(stream, vec![event])
    }
}
