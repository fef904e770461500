// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use serde_json::Map;

use super::{required_str, required_str_list};
use crate::config::ProcessorConfig;
use crate::errors::{InitError, ProcessingError};
use crate::events::{Event, ProcessorResult};
use crate::observability::messages::{processor::ProcessorExecutionCompleted, StructuredLog};
use crate::traits::CustomProcessor;

/// Field Projector processor - keeps only the configured payload fields
///
/// Each input produces a derived event (new id, same data source and header)
/// whose payload holds the listed fields that were present, in list order.
#[derive(Default)]
pub struct FieldProjectorProcessor {
    output_stream: String,
    fields: Vec<String>,
}

impl FieldProjectorProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomProcessor for FieldProjectorProcessor {
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError> {
        self.output_stream = required_str(config, self.name(), "output_stream")?;
        self.fields = required_str_list(config, self.name(), "fields")?;
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        let start_time = Instant::now();

        let mut projected = Map::new();
        for name in &self.fields {
            if let Some(value) = event.field(name) {
                projected.insert(name.clone(), value.clone());
            }
        }
        let results = vec![ProcessorResult::single(
            &self.output_stream,
            event.derive(projected),
        )];

        ProcessorExecutionCompleted {
            processor_id: self.name(),
            event_id: &event.id,
            result_count: results.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "field_projector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projector(fields: serde_json::Value) -> FieldProjectorProcessor {
        let mut processor = FieldProjectorProcessor::new();
        processor
            .initialize(
                &ProcessorConfig::new()
                    .with("output_stream", json!("slim"))
                    .with("fields", fields),
            )
            .unwrap();
        processor
    }

    #[test]
    fn test_keeps_only_listed_fields() {
        let processor = projector(json!(["host", "level", "absent"]));

        let mut fields = Map::new();
        fields.insert("level".to_string(), json!("error"));
        fields.insert("message".to_string(), json!("disk full"));
        fields.insert("host".to_string(), json!("db-1"));
        let event = Event::new(fields, "syslog");

        let results = processor.process(&event).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stream, "slim");

        let out = &results[0].events[0];
        let keys: Vec<&String> = out.fields.keys().collect();
        assert_eq!(keys, vec!["host", "level"]);
        assert_ne!(out.id, event.id);
        assert_eq!(out.data_source_id, event.data_source_id);
    }

    #[test]
    fn test_initialize_requires_fields() {
        let mut processor = FieldProjectorProcessor::new();
        let err = processor
            .initialize(&ProcessorConfig::new().with("output_stream", json!("slim")))
            .unwrap_err();
        assert!(err.reason.contains("fields"));
    }
}
