// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::time::Instant;

use serde_json::Value;

use super::required_str;
use crate::config::ProcessorConfig;
use crate::errors::{InitError, ProcessingError};
use crate::events::{Event, ProcessorResult};
use crate::observability::messages::processor::{EventFiltered, ProcessorExecutionCompleted};
use crate::observability::messages::StructuredLog;
use crate::traits::CustomProcessor;

/// Field Router processor - routes each event by the value of one payload field
///
/// Config:
/// - `field`: payload field to inspect
/// - `routes`: object mapping field values to stream names
/// - `default_stream` (optional): stream for values with no route
///
/// String values match as-is; other scalars match on their JSON text (`true`, `42`).
/// Events with no matching route and no default stream are filtered out.
#[derive(Default)]
pub struct FieldRouterProcessor {
    field: String,
    routes: HashMap<String, String>,
    default_stream: Option<String>,
}

impl FieldRouterProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn route_key(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
            _ => None,
        }
    }

    fn stream_for(&self, event: &Event) -> Option<&str> {
        event
            .field(&self.field)
            .and_then(Self::route_key)
            .and_then(|key| self.routes.get(&key))
            .or(self.default_stream.as_ref())
            .map(String::as_str)
    }
}

impl CustomProcessor for FieldRouterProcessor {
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError> {
        self.field = required_str(config, self.name(), "field")?;

        let routes = config.get_object("routes").ok_or_else(|| {
            InitError::new(self.name(), "missing required object option 'routes'")
        })?;
        self.routes = routes
            .iter()
            .map(|(value, stream)| match stream.as_str() {
                Some(stream) if !stream.trim().is_empty() => {
                    Ok((value.clone(), stream.to_string()))
                }
                _ => Err(InitError::new(
                    self.name(),
                    format!("route for '{}' must name a stream", value),
                )),
            })
            .collect::<Result<_, _>>()?;

        self.default_stream = match config.get("default_stream") {
            None | Some(Value::Null) => None,
            Some(_) => Some(required_str(config, self.name(), "default_stream")?),
        };
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        let start_time = Instant::now();

        let results = match self.stream_for(event) {
            Some(stream) => vec![ProcessorResult::single(stream, event.clone())],
            None => {
                EventFiltered {
                    processor_id: self.name(),
                    event_id: &event.id,
                    reason: "no route matched and no default stream",
                }
                .log();
                Vec::new()
            }
        };

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
        "field_router"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn router(default_stream: Option<&str>) -> FieldRouterProcessor {
        let mut config = ProcessorConfig::new()
            .with("field", json!("level"))
            .with("routes", json!({"error": "alerts", "warn": "alerts", "500": "server"}));
        if let Some(stream) = default_stream {
            config.insert("default_stream", json!(stream));
        }

        let mut processor = FieldRouterProcessor::new();
        processor.initialize(&config).unwrap();
        processor
    }

    fn event_with_level(level: Value) -> Event {
        let mut fields = Map::new();
        fields.insert("level".to_string(), level);
        Event::new(fields, "app")
    }

    #[test]
    fn test_routing_table() {
        let test_cases = vec![
            (json!("error"), Some("alerts"), Some("alerts")),
            (json!("warn"), None, Some("alerts")),
            (json!(500), None, Some("server")),
            (json!("info"), Some("rest"), Some("rest")),
            (json!("info"), None, None),
            (json!({"nested": true}), Some("rest"), Some("rest")),
        ];

        for (level, default_stream, expected) in test_cases {
            let processor = router(default_stream);
            let event = event_with_level(level.clone());
            let results = processor.process(&event).unwrap();

            match expected {
                Some(stream) => {
                    assert_eq!(results, vec![ProcessorResult::single(stream, event)]);
                }
                None => assert!(results.is_empty(), "level {} should be filtered", level),
            }
        }
    }

    #[test]
    fn test_missing_field_uses_default() {
        let processor = router(Some("rest"));
        let event = Event::new(Map::new(), "app");

        let results = processor.process(&event).unwrap();
        assert_eq!(results[0].stream, "rest");
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let test_cases = vec![
            ("missing field", ProcessorConfig::new().with("routes", json!({}))),
            ("missing routes", ProcessorConfig::new().with("field", json!("level"))),
            (
                "routes not an object",
                ProcessorConfig::new()
                    .with("field", json!("level"))
                    .with("routes", json!(["a"])),
            ),
            (
                "route to non-string",
                ProcessorConfig::new()
                    .with("field", json!("level"))
                    .with("routes", json!({"error": 1})),
            ),
            (
                "blank default",
                ProcessorConfig::new()
                    .with("field", json!("level"))
                    .with("routes", json!({}))
                    .with("default_stream", json!("")),
            ),
        ];

        for (label, config) in test_cases {
            let mut processor = FieldRouterProcessor::new();
            assert!(processor.initialize(&config).is_err(), "case: {}", label);
        }
    }
}
