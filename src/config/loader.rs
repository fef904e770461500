// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::consts::DEFAULT_PARALLELISM;
use crate::config::{OutputSchemas, ProcessorConfig, Schema};
use crate::errors::ConfigError;

/// Stage definition as stored in the topology catalog.
///
/// Everything the stage adapter needs to be configured: which processor to host,
/// the configuration to initialize it with, and the schemas of its input and outputs.
/// It is typically loaded from a YAML file.
///
/// # Fields
/// * `name` - Stage name used in logs and reports
/// * `processor` - Identifier the processor implementation is registered under
/// * `config` - Ordered configuration passed to the processor's `initialize`
/// * `input_schema` - Expected input shape (informational)
/// * `output_schemas` - Output stream name to schema; at least one is required
/// * `parallelism` - Stage instances a test run spreads input across (optional, defaults to 1)
///
/// # Example
/// ```yaml
/// name: severity-router
/// processor: field_router
/// parallelism: 2
/// config:
///   field: severity
///   routes:
///     high: alerts
///     low: audit
/// output_schemas:
///   alerts:
///     fields:
///       - name: severity
///         type: STRING
///   audit:
///     fields: []
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub name: String,
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub config: ProcessorConfig,
    #[serde(default)]
    pub input_schema: Option<Schema>,
    #[serde(default)]
    pub output_schemas: OutputSchemas,
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_parallelism() -> usize {
    DEFAULT_PARALLELISM
}

/// Read and deserialize any YAML document.
pub fn load_yaml<T, P>(path: P) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load a stage definition from a YAML file
pub fn load_stage_definition<P: AsRef<Path>>(path: P) -> Result<StageDefinition, ConfigError> {
    load_yaml(path)
}

/// Load and validate a stage definition from a YAML file
///
/// Validation catches what would otherwise only surface when the stage is
/// prepared: a missing processor identifier, no output streams, or an
/// unusable parallelism.
pub fn load_and_validate_stage_definition<P: AsRef<Path>>(
    path: P,
) -> Result<StageDefinition, ConfigError> {
    let definition = load_stage_definition(path)?;

    if let Err(validation_errors) = crate::config::validate_stage_definition(&definition) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        return Err(ConfigError::Invalid(error_messages.join("; ")));
    }

    Ok(definition)
}
