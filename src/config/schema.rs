// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural schemas describing event shapes.
//!
//! Schemas are carried for tooling and for declaring output streams. The stage does
//! not validate events against them at runtime.
//!
//! # Example
//! ```json
//! {
//!   "fields": [
//!     { "name": "severity", "type": "STRING" },
//!     { "name": "count", "type": "LONG", "optional": true }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ConfigError;

/// Output stream name to the schema of events emitted on it.
pub type OutputSchemas = BTreeMap<String, Schema>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub optional: bool,
    /// Child fields for `NESTED` and `ARRAY` types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Binary,
    Nested,
    Array,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: false,
            fields: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
            what: "input schema",
            reason: e.to_string(),
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Parse the catalog's output-schema blob: a JSON object of stream name to schema.
pub fn parse_output_schemas(json: &str) -> Result<OutputSchemas, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
        what: "output schema",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_json() {
        let schema = Schema::from_json(
            r#"{"fields": [
                {"name": "severity", "type": "STRING"},
                {"name": "count", "type": "LONG", "optional": true},
                {"name": "tags", "type": "ARRAY", "fields": [{"name": "tag", "type": "STRING"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.field("severity").unwrap().field_type, FieldType::String);
        assert!(schema.field("count").unwrap().optional);
        assert_eq!(schema.field("tags").unwrap().fields.len(), 1);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_schema_rejects_unknown_type() {
        let result = Schema::from_json(r#"{"fields": [{"name": "x", "type": "DECIMAL"}]}"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidJson { what: "input schema", .. })
        ));
    }

    #[test]
    fn test_parse_output_schemas() {
        let schemas = parse_output_schemas(
            r#"{
                "alerts": {"fields": [{"name": "severity", "type": "STRING"}]},
                "audit": {"fields": []}
            }"#,
        )
        .unwrap();

        let names: Vec<&String> = schemas.keys().collect();
        assert_eq!(names, vec!["alerts", "audit"]);
    }

    #[test]
    fn test_parse_output_schemas_empty_object_is_not_an_error() {
        // Emptiness is rejected when channels are declared, not when parsing.
        let schemas = parse_output_schemas("{}").unwrap();
        assert!(schemas.is_empty());
    }

    #[test]
    fn test_parse_output_schemas_malformed() {
        let result = parse_output_schemas(r#"{"alerts": "#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidJson { what: "output schema", .. })
        ));
    }

    #[test]
    fn test_field_serializes_upper_case_type() {
        let json = serde_json::to_string(&Field::new("n", FieldType::Double).optional()).unwrap();
        assert!(json.contains(r#""type":"DOUBLE""#));
        assert!(json.contains(r#""optional":true"#));
        assert!(!json.contains("fields"));
    }
}
