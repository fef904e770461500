// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod processor_config;
mod schema;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_stage_definition, load_stage_definition, load_yaml, StageDefinition,
};
pub use processor_config::ProcessorConfig;
pub use schema::{parse_output_schemas, Field, FieldType, OutputSchemas, Schema};
pub use validation::validate_stage_definition;
