// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::sync::Mutex;

use crate::events::{Event, Tuple};
use crate::traits::OutputCollector;

/// One event emitted by a stage, with the input it is anchored to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emission {
    pub stream: String,
    pub anchor: u64,
    pub event: Event,
}

/// Output collector that keeps everything a stage emits, acks and fails.
///
/// Safe to share between stage instances running on different threads.
#[derive(Debug, Default)]
pub struct RecordingCollector {
    emissions: Mutex<Vec<Emission>>,
    acked: Mutex<Vec<u64>>,
    failed: Mutex<Vec<u64>>,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emissions in the order they were recorded.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .expect("recording collector poisoned")
            .clone()
    }

    /// Message ids of acked tuples, in ack order.
    pub fn acked(&self) -> Vec<u64> {
        self.acked.lock().expect("recording collector poisoned").clone()
    }

    /// Message ids of failed tuples, in fail order.
    pub fn failed(&self) -> Vec<u64> {
        self.failed.lock().expect("recording collector poisoned").clone()
    }
}

impl OutputCollector for RecordingCollector {
    fn emit(&self, stream: &str, anchor: &Tuple, event: Event) {
        self.emissions
            .lock()
            .expect("recording collector poisoned")
            .push(Emission {
                stream: stream.to_string(),
                anchor: anchor.message_id,
                event,
            });
    }

    fn ack(&self, tuple: &Tuple) {
        self.acked
            .lock()
            .expect("recording collector poisoned")
            .push(tuple.message_id);
    }

    fn fail(&self, tuple: &Tuple) {
        self.failed
            .lock()
            .expect("recording collector poisoned")
            .push(tuple.message_id);
    }
}
