// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use super::required_str;
use crate::config::ProcessorConfig;
use crate::errors::{InitError, ProcessingError};
use crate::events::{Event, ProcessorResult};
use crate::observability::messages::{processor::ProcessorExecutionCompleted, StructuredLog};
use crate::traits::CustomProcessor;

/// Pass Through processor - forwards every event unchanged to `output_stream`
#[derive(Default)]
pub struct PassThroughProcessor {
    output_stream: String,
}

impl PassThroughProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomProcessor for PassThroughProcessor {
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError> {
        self.output_stream = required_str(config, self.name(), "output_stream")?;
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        let start_time = Instant::now();
        let results = vec![ProcessorResult::single(&self.output_stream, event.clone())];

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
        "pass_through"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_forwards_event_unchanged() {
        let mut processor = PassThroughProcessor::new();
        processor
            .initialize(&ProcessorConfig::new().with("output_stream", json!("all")))
            .unwrap();

        let mut fields = Map::new();
        fields.insert("level".to_string(), json!("warn"));
        let event = Event::new(fields, "syslog");

        let results = processor.process(&event).unwrap();
        assert_eq!(results, vec![ProcessorResult::single("all", event)]);
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let test_cases = vec![
            ("missing", ProcessorConfig::new()),
            ("blank", ProcessorConfig::new().with("output_stream", json!("  "))),
            ("not a string", ProcessorConfig::new().with("output_stream", json!(3))),
        ];

        for (label, config) in test_cases {
            let mut processor = PassThroughProcessor::new();
            let err = processor.initialize(&config).unwrap_err();
            assert_eq!(err.processor, "pass_through", "case: {}", label);
        }
    }
}
