// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error taxonomy for the custom processor stage.
//!
//! Startup failures (`ConfigError`, `LoadError`, `InitError`) halt the stage before it
//! accepts input and are never retried. Per-event failures (`ProcessingError`,
//! `RoutingError`) are fatal only to the event being processed; the stage keeps running
//! and the host's replay policy decides whether the input is redelivered.

use thiserror::Error;

/// Missing or invalid static configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Custom processor implementation not specified")]
    MissingProcessor,

    #[error("Custom processor config must have at least one output stream and associated schema")]
    NoOutputStreams,

    #[error("Invalid {what} JSON: {reason}")]
    InvalidJson { what: &'static str, reason: String },

    #[error("Failed to read stage definition '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid stage definition: {0}")]
    Invalid(String),
}

/// The processor implementation could not be located or constructed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("No custom processor registered under '{0}'")]
    NotRegistered(String),

    #[error("Failed to load custom processor '{identifier}': {reason}")]
    ConstructionFailed { identifier: String, reason: String },
}

/// Failure reported by a processor from `initialize`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Custom processor '{processor}' failed to initialize: {reason}")]
pub struct InitError {
    pub processor: String,
    pub reason: String,
}

impl InitError {
    pub fn new(processor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            reason: reason.into(),
        }
    }
}

/// Recoverable failure for one specific event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Custom processor failed to process event '{event_id}': {reason}")]
pub struct ProcessingError {
    pub event_id: String,
    pub reason: String,
}

impl ProcessingError {
    pub fn new(event_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            reason: reason.into(),
        }
    }
}

/// One or more results named a channel that was never declared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Results routed to undeclared stream(s) [{}] ({} event(s) not emitted)", .channels.join(", "), .dropped_events)]
pub struct RoutingError {
    pub channels: Vec<String>,
    pub dropped_events: usize,
}

/// Top-level error surfaced by the stage adapter to its host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Stage '{stage}' cannot {operation} while {state}")]
    InvalidState {
        stage: String,
        operation: &'static str,
        state: String,
    },
}

impl StageError {
    /// Whether this error prevents the stage from starting at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StageError::Config(_) | StageError::Load(_) | StageError::Init(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        struct TestCase {
            name: &'static str,
            error: StageError,
            fatal: bool,
        }

        let test_cases = vec![
            TestCase {
                name: "missing processor",
                error: ConfigError::MissingProcessor.into(),
                fatal: true,
            },
            TestCase {
                name: "not registered",
                error: LoadError::NotRegistered("x".to_string()).into(),
                fatal: true,
            },
            TestCase {
                name: "init failure",
                error: InitError::new("x", "bad").into(),
                fatal: true,
            },
            TestCase {
                name: "processing failure",
                error: ProcessingError::new("e1", "boom").into(),
                fatal: false,
            },
            TestCase {
                name: "routing failure",
                error: RoutingError {
                    channels: vec!["nowhere".to_string()],
                    dropped_events: 1,
                }
                .into(),
                fatal: false,
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                test_case.error.is_fatal(),
                test_case.fatal,
                "Test case '{}'",
                test_case.name
            );
        }
    }

    #[test]
    fn test_routing_error_lists_channels() {
        let error = RoutingError {
            channels: vec!["a".to_string(), "b".to_string()],
            dropped_events: 3,
        };
        let message = error.to_string();
        assert!(message.contains("[a, b]"));
        assert!(message.contains("3 event(s)"));
    }

    #[test]
    fn test_transparent_messages() {
        let error: StageError = ConfigError::NoOutputStreams.into();
        assert_eq!(
            error.to_string(),
            "Custom processor config must have at least one output stream and associated schema"
        );
    }
}
