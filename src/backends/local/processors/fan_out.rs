// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use super::required_str_list;
use crate::config::ProcessorConfig;
use crate::errors::{InitError, ProcessingError};
use crate::events::{Event, ProcessorResult};
use crate::observability::messages::{processor::ProcessorExecutionCompleted, StructuredLog};
use crate::traits::CustomProcessor;

/// Fan Out processor - copies every event to each configured stream, in list order
#[derive(Default)]
pub struct FanOutProcessor {
    streams: Vec<String>,
}

impl FanOutProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomProcessor for FanOutProcessor {
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError> {
        let streams = required_str_list(config, self.name(), "streams")?;
        if let Some(blank) = streams.iter().find(|s| s.trim().is_empty()) {
            return Err(InitError::new(
                self.name(),
                format!("stream names must not be blank (got '{}')", blank),
            ));
        }
        self.streams = streams;
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        let start_time = Instant::now();
        let results: Vec<ProcessorResult> = self
            .streams
            .iter()
            .map(|stream| ProcessorResult::single(stream, event.clone()))
            .collect();

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
        "fan_out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_copies_to_every_stream_in_order() {
        let mut processor = FanOutProcessor::new();
        processor
            .initialize(&ProcessorConfig::new().with("streams", json!(["audit", "archive", "live"])))
            .unwrap();

        let event = Event::new(Map::new(), "app");
        let results = processor.process(&event).unwrap();

        let streams: Vec<&str> = results.iter().map(|r| r.stream.as_str()).collect();
        assert_eq!(streams, vec!["audit", "archive", "live"]);
        assert!(results.iter().all(|r| r.events == vec![event.clone()]));
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let test_cases = vec![
            ("missing", ProcessorConfig::new()),
            ("empty", ProcessorConfig::new().with("streams", json!([]))),
            ("non-string entry", ProcessorConfig::new().with("streams", json!(["a", 1]))),
            ("blank entry", ProcessorConfig::new().with("streams", json!(["a", ""]))),
        ];

        for (label, config) in test_cases {
            let mut processor = FanOutProcessor::new();
            assert!(processor.initialize(&config).is_err(), "case: {}", label);
        }
    }
}
