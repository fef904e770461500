// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Static validation of stage definitions.
//!
//! Every check runs and all failures are reported together, so a broken
//! definition can be fixed in one pass instead of one error at a time.

use crate::config::consts::MAX_PARALLELISM;
use crate::config::StageDefinition;
use crate::errors::ConfigError;

/// Validate a stage definition, returning every problem found.
pub fn validate_stage_definition(definition: &StageDefinition) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if definition.name.trim().is_empty() {
        errors.push(ConfigError::Invalid("stage name must not be empty".to_string()));
    }

    if definition.processor.trim().is_empty() {
        errors.push(ConfigError::MissingProcessor);
    }

    if definition.output_schemas.is_empty() {
        errors.push(ConfigError::NoOutputStreams);
    }

    if let Some(empty) = definition.output_schemas.keys().find(|k| k.trim().is_empty()) {
        errors.push(ConfigError::Invalid(format!(
            "output stream name '{}' must not be blank",
            empty
        )));
    }

    if definition.parallelism == 0 || definition.parallelism > MAX_PARALLELISM {
        errors.push(ConfigError::Invalid(format!(
            "parallelism must be between 1 and {}, got {}",
            MAX_PARALLELISM, definition.parallelism
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputSchemas, ProcessorConfig, Schema};

    fn definition(processor: &str, outputs: &[&str], parallelism: usize) -> StageDefinition {
        let mut output_schemas = OutputSchemas::new();
        for name in outputs {
            output_schemas.insert(name.to_string(), Schema::default());
        }
        StageDefinition {
            name: "stage".to_string(),
            processor: processor.to_string(),
            config: ProcessorConfig::new(),
            input_schema: None,
            output_schemas,
            parallelism,
        }
    }

    #[test]
    fn test_validate_table_driven() {
        struct TestCase {
            name: &'static str,
            definition: StageDefinition,
            expected_errors: Vec<ConfigError>,
        }

        let test_cases = vec![
            TestCase {
                name: "valid",
                definition: definition("pass_through", &["out"], 1),
                expected_errors: vec![],
            },
            TestCase {
                name: "missing processor",
                definition: definition("  ", &["out"], 1),
                expected_errors: vec![ConfigError::MissingProcessor],
            },
            TestCase {
                name: "no outputs",
                definition: definition("pass_through", &[], 1),
                expected_errors: vec![ConfigError::NoOutputStreams],
            },
            TestCase {
                name: "blank output name",
                definition: definition("pass_through", &[" "], 1),
                expected_errors: vec![ConfigError::Invalid(
                    "output stream name ' ' must not be blank".to_string(),
                )],
            },
            TestCase {
                name: "parallelism too high",
                definition: definition("pass_through", &["out"], MAX_PARALLELISM + 1),
                expected_errors: vec![ConfigError::Invalid(format!(
                    "parallelism must be between 1 and {}, got {}",
                    MAX_PARALLELISM,
                    MAX_PARALLELISM + 1
                ))],
            },
            TestCase {
                name: "everything wrong",
                definition: definition("", &[], 0),
                expected_errors: vec![
                    ConfigError::MissingProcessor,
                    ConfigError::NoOutputStreams,
                    ConfigError::Invalid(format!(
                        "parallelism must be between 1 and {}, got 0",
                        MAX_PARALLELISM
                    )),
                ],
            },
        ];

        for test_case in test_cases {
            let result = validate_stage_definition(&test_case.definition);
            let errors = result.err().unwrap_or_default();
            assert_eq!(
                errors, test_case.expected_errors,
                "Test case '{}'",
                test_case.name
            );
        }
    }
}
