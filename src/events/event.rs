// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::consts::DEFAULT_STREAM_ID;

/// An event flowing between stages.
///
/// The stage never looks inside `fields`; only the identity and routing metadata
/// (`id`, `data_source_id`, `source_stream`, `header`) are meaningful to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub data_source_id: String,
    pub source_stream: String,
    #[serde(default)]
    pub header: Map<String, Value>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// Create an event with a freshly generated id on the default stream.
    pub fn new(fields: Map<String, Value>, data_source_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            data_source_id: data_source_id.into(),
            source_stream: DEFAULT_STREAM_ID.to_string(),
            header: Map::new(),
            fields,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_source_stream(mut self, source_stream: impl Into<String>) -> Self {
        self.source_stream = source_stream.into();
        self
    }

    pub fn with_header(mut self, header: Map<String, Value>) -> Self {
        self.header = header;
        self
    }

    /// Rebind an event to the stream it physically arrived on.
    ///
    /// Identity (id, data source, header) and payload are kept; only the
    /// originating stream is replaced.
    pub fn arrived_on(event: &Event, source_stream: &str) -> Self {
        Self {
            id: event.id.clone(),
            data_source_id: event.data_source_id.clone(),
            source_stream: source_stream.to_string(),
            header: event.header.clone(),
            fields: event.fields.clone(),
        }
    }

    /// Build a new output event that keeps this event's provenance.
    ///
    /// The derived event gets a new id but shares the data source id and header.
    pub fn derive(&self, fields: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            data_source_id: self.data_source_id.clone(),
            source_stream: self.source_stream.clone(),
            header: self.header.clone(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
