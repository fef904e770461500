// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Maps processor results onto the output streams a stage declared.
//!
//! Each output schema key becomes one host stream. Every stream carries a single
//! field, [`EVENT_FIELD`], holding the whole event, so downstream stages can
//! subscribe to a channel by name without knowing its payload shape.

use std::collections::BTreeSet;

use crate::config::consts::EVENT_FIELD;
use crate::config::OutputSchemas;
use crate::errors::{ConfigError, RoutingError};
use crate::events::{ProcessorResult, Tuple};
use crate::observability::messages::routing::{EventsDispatched, StreamsDeclared, UndeclaredStream};
use crate::observability::messages::StructuredLog;
use crate::traits::{OutputCollector, StreamDeclaration};

#[derive(Debug, Clone, Default)]
pub struct OutputRouter {
    stage: String,
    channels: BTreeSet<String>,
}

impl OutputRouter {
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            channels: BTreeSet::new(),
        }
    }

    /// Declare one stream per output schema key, replacing any earlier declaration.
    ///
    /// # Errors
    /// `ConfigError::NoOutputStreams` when `schemas` is empty.
    pub fn declare_channels(
        &mut self,
        schemas: &OutputSchemas,
    ) -> Result<Vec<StreamDeclaration>, ConfigError> {
        if schemas.is_empty() {
            return Err(ConfigError::NoOutputStreams);
        }

        self.channels = schemas.keys().cloned().collect();
        let names: Vec<String> = self.channels.iter().cloned().collect();
        StreamsDeclared {
            stage: &self.stage,
            streams: &names,
        }
        .log();

        Ok(self.declarations())
    }

    /// Declarations for the currently declared channels, sorted by name.
    pub fn declarations(&self) -> Vec<StreamDeclaration> {
        self.channels
            .iter()
            .map(|channel| StreamDeclaration {
                stream: channel.clone(),
                fields: vec![EVENT_FIELD.to_string()],
            })
            .collect()
    }

    pub fn is_declared(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = &String> {
        self.channels.iter()
    }

    /// Emit every event of every result, anchored to `anchor`, in result order.
    ///
    /// Results for undeclared channels emit nothing. They do not stop the
    /// remaining results; all of them are reported together afterwards.
    /// Returns the number of events emitted.
    pub fn dispatch(
        &self,
        anchor: &Tuple,
        results: Vec<ProcessorResult>,
        collector: &dyn OutputCollector,
    ) -> Result<usize, RoutingError> {
        let result_count = results.len();
        let mut emitted = 0;
        let mut undeclared: Vec<String> = Vec::new();
        let mut dropped_events = 0;

        for result in results {
            if !self.is_declared(&result.stream) {
                UndeclaredStream {
                    stage: &self.stage,
                    stream: &result.stream,
                    event_count: result.events.len(),
                }
                .log();
                dropped_events += result.events.len();
                if !undeclared.contains(&result.stream) {
                    undeclared.push(result.stream);
                }
                continue;
            }

            for event in result.events {
                collector.emit(&result.stream, anchor, event);
                emitted += 1;
            }
        }

        EventsDispatched {
            stage: &self.stage,
            anchor: anchor.message_id,
            result_count,
            emitted,
        }
        .log();

        if undeclared.is_empty() {
            Ok(emitted)
        } else {
            Err(RoutingError {
                channels: undeclared,
                dropped_events,
            })
        }
    }
}
