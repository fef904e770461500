// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::load_yaml;
use crate::errors::ConfigError;
use crate::events::{Event, Tuple};

/// Fixture records produced by one test source, keyed by the stream they arrive on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunSource {
    pub id: String,
    #[serde(default)]
    pub records: BTreeMap<String, Vec<Map<String, Value>>>,
}

/// A named set of test sources to feed through a stage.
///
/// # Example
/// ```yaml
/// name: severity-smoke
/// sources:
///   - id: syslog
///     records:
///       default:
///         - { severity: high, message: "disk full" }
///         - { severity: low, message: "login" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunCase {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<TestRunSource>,
}

impl TestRunCase {
    /// Turn every fixture record into a host tuple.
    ///
    /// Message ids are assigned from 1 in source order, then stream order, then
    /// record order. Each event gets a fresh id, the source id as its data source
    /// and the record's stream as both its own and the tuple's source stream.
    pub fn to_tuples(&self) -> Vec<Tuple> {
        let mut tuples = Vec::new();
        for source in &self.sources {
            for (stream, records) in &source.records {
                for record in records {
                    let message_id = tuples.len() as u64 + 1;
                    let event =
                        Event::new(record.clone(), source.id.clone()).with_source_stream(stream.clone());
                    tuples.push(Tuple::new(message_id, source.id.clone(), stream.clone(), event));
                }
            }
        }
        tuples
    }

    pub fn record_count(&self) -> usize {
        self.sources
            .iter()
            .flat_map(|source| source.records.values())
            .map(Vec::len)
            .sum()
    }
}

/// Load a test case from a YAML file.
pub fn load_test_case<P: AsRef<Path>>(path: P) -> Result<TestRunCase, ConfigError> {
    let case: TestRunCase = load_yaml(path)?;
    if case.name.trim().is_empty() {
        return Err(ConfigError::Invalid("test case name must not be empty".to_string()));
    }
    if case.sources.iter().any(|s| s.id.trim().is_empty()) {
        return Err(ConfigError::Invalid(format!(
            "test case '{}' has a source without an id",
            case.name
        )));
    }
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_case(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_convert() {
        let file = write_case(
            r#"
name: smoke
sources:
  - id: syslog
    records:
      default:
        - { severity: high }
        - { severity: low }
      audit:
        - { user: root }
  - id: metrics
    records:
      default:
        - { cpu: 93 }
"#,
        );

        let case = load_test_case(file.path()).unwrap();
        assert_eq!(case.record_count(), 4);

        let tuples = case.to_tuples();
        let summary: Vec<(u64, &str, &str)> = tuples
            .iter()
            .map(|t| (t.message_id, t.source_component.as_str(), t.source_stream.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "syslog", "audit"),
                (2, "syslog", "default"),
                (3, "syslog", "default"),
                (4, "metrics", "default"),
            ]
        );
        assert_eq!(tuples[0].event.data_source_id, "syslog");
        assert_eq!(tuples[0].event.source_stream, "audit");
        assert_eq!(tuples[1].event.field("severity"), Some(&Value::from("high")));
        assert_ne!(tuples[1].event.id, tuples[2].event.id);
    }

    #[test]
    fn test_load_rejects_invalid_cases() {
        let test_cases = vec![
            ("blank name", "name: ' '\nsources: []\n"),
            ("blank source id", "name: x\nsources:\n  - id: ''\n"),
            ("not yaml", "name: [unclosed\n"),
        ];

        for (label, yaml) in test_cases {
            let file = write_case(yaml);
            assert!(load_test_case(file.path()).is_err(), "case: {}", label);
        }
    }
}
