// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use super::Event;

/// One input delivered by the host runtime.
///
/// `source_stream` is the stream the tuple physically arrived on, which can differ
/// from the `source_stream` recorded inside the carried event. `message_id` is what
/// the host tracks for acknowledgement, so output emitted against this tuple is
/// anchored to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuple {
    pub message_id: u64,
    pub source_component: String,
    pub source_stream: String,
    pub event: Event,
}

impl Tuple {
    pub fn new(
        message_id: u64,
        source_component: impl Into<String>,
        source_stream: impl Into<String>,
        event: Event,
    ) -> Self {
        Self {
            message_id,
            source_component: source_component.into(),
            source_stream: source_stream.into(),
            event,
        }
    }
}
