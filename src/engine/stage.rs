// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host-facing stage that runs a custom processor.
//!
//! The stage is configured with a processor identifier, the processor's config and
//! the stage's input and output schemas. On `prepare` it resolves the shared
//! processor instance from the registry and declares one output stream per output
//! schema. Each input tuple is then handed to the processor and its results are
//! emitted on the matching streams, anchored to the input.
//!
//! # Lifecycle
//!
//! ```text
//! Unconfigured -> Configured -> Prepared -> Running -> Closed
//! ```
//!
//! Startup failures leave the stage where it was; the host is expected to give up
//! on it. Per-event failures fail the input tuple and leave the stage `Running`.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{
    parse_output_schemas, OutputSchemas, ProcessorConfig, Schema, StageDefinition,
};
use crate::engine::OutputRouter;
use crate::errors::{ConfigError, StageError, StageResult};
use crate::events::{Event, Tuple};
use crate::observability::messages::stage::{
    EventAcked, EventFailed, StageClosed, StagePrepareFailed, StagePrepared,
};
use crate::observability::messages::StructuredLog;
use crate::registry::{self, ProcessorInstance, ProcessorRegistry};
use crate::traits::{HostStage, OutputCollector, StreamDeclaration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Unconfigured,
    Configured,
    Prepared,
    Running,
    Closed,
}

impl Display for StageState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            StageState::Unconfigured => "unconfigured",
            StageState::Configured => "configured",
            StageState::Prepared => "prepared",
            StageState::Running => "running",
            StageState::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

pub struct CustomProcessorStage {
    name: String,
    identifier: Option<String>,
    config: ProcessorConfig,
    input_schema: Option<Schema>,
    output_schemas: OutputSchemas,
    registry: Arc<ProcessorRegistry>,
    state: StageState,
    instance: Option<Arc<ProcessorInstance>>,
    router: OutputRouter,
    collector: Option<Arc<dyn OutputCollector>>,
    processed: u64,
    failed: u64,
}

impl CustomProcessorStage {
    /// Create an unconfigured stage bound to the global registry.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            router: OutputRouter::new(name.clone()),
            name,
            identifier: None,
            config: ProcessorConfig::new(),
            input_schema: None,
            output_schemas: OutputSchemas::new(),
            registry: Arc::clone(registry::global()),
            state: StageState::Unconfigured,
            instance: None,
            collector: None,
            processed: 0,
            failed: 0,
        }
    }

    /// Create a configured stage from a catalog definition.
    pub fn from_definition(definition: &StageDefinition) -> Self {
        let mut stage = Self::new(definition.name.clone())
            .custom_processor_impl(definition.processor.clone())
            .config(definition.config.clone())
            .output_schemas(definition.output_schemas.clone());
        if let Some(schema) = &definition.input_schema {
            stage = stage.input_schema(schema.clone());
        }
        stage
    }

    /// Resolve processors from `registry` instead of the global one.
    pub fn with_registry(mut self, registry: Arc<ProcessorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn custom_processor_impl(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self.mark_configured();
        self
    }

    pub fn config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self.mark_configured();
        self
    }

    /// Set the processor config from a JSON object.
    pub fn config_json(self, json: &str) -> Result<Self, ConfigError> {
        Ok(self.config(ProcessorConfig::from_json(json)?))
    }

    pub fn input_schema(mut self, schema: Schema) -> Self {
        self.input_schema = Some(schema);
        self.mark_configured();
        self
    }

    pub fn input_schema_json(self, json: &str) -> Result<Self, ConfigError> {
        Ok(self.input_schema(Schema::from_json(json)?))
    }

    pub fn output_schemas(mut self, schemas: OutputSchemas) -> Self {
        self.output_schemas = schemas;
        self.mark_configured();
        self
    }

    /// Set the output schemas from a JSON object of stream name to schema.
    pub fn output_schemas_json(self, json: &str) -> Result<Self, ConfigError> {
        Ok(self.output_schemas(parse_output_schemas(json)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn input_schema_ref(&self) -> Option<&Schema> {
        self.input_schema.as_ref()
    }

    /// The shared processor instance, once prepared.
    pub fn instance(&self) -> Option<&Arc<ProcessorInstance>> {
        self.instance.as_ref()
    }

    /// Inputs handled so far, failed ones included.
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    pub fn failed_count(&self) -> u64 {
        self.failed
    }

    fn mark_configured(&mut self) {
        if self.state == StageState::Unconfigured {
            self.state = StageState::Configured;
        }
    }

    fn invalid_state(&self, operation: &'static str) -> StageError {
        StageError::InvalidState {
            stage: self.name.clone(),
            operation,
            state: self.state.to_string(),
        }
    }

    fn try_prepare(&mut self) -> Result<Arc<ProcessorInstance>, StageError> {
        let identifier = match self.identifier.as_deref() {
            Some(identifier) if !identifier.trim().is_empty() => identifier,
            _ => return Err(ConfigError::MissingProcessor.into()),
        };

        let instance = self.registry.resolve(identifier, &self.config)?;

        if let Err(error) = self.router.declare_channels(&self.output_schemas) {
            self.registry.release(&instance);
            return Err(error.into());
        }

        Ok(instance)
    }

    fn fail_event(
        &mut self,
        tuple: &Tuple,
        collector: &dyn OutputCollector,
        error: StageError,
    ) -> StageError {
        self.failed += 1;
        EventFailed {
            stage: &self.name,
            event_id: &tuple.event.id,
            message_id: tuple.message_id,
            error: &error,
        }
        .log();
        collector.fail(tuple);
        error
    }
}

impl HostStage for CustomProcessorStage {
    /// Resolve the processor and declare the output streams.
    ///
    /// Preparing an already prepared or running stage does nothing.
    fn prepare(&mut self, collector: Arc<dyn OutputCollector>) -> StageResult<()> {
        match self.state {
            StageState::Prepared | StageState::Running => return Ok(()),
            StageState::Closed => return Err(self.invalid_state("prepare")),
            StageState::Unconfigured | StageState::Configured => {}
        }

        match self.try_prepare() {
            Ok(instance) => {
                StagePrepared {
                    stage: &self.name,
                    identifier: instance.identifier(),
                    stream_count: self.output_schemas.len(),
                }
                .log();
                self.instance = Some(instance);
                self.collector = Some(collector);
                self.state = StageState::Prepared;
                Ok(())
            }
            Err(error) => {
                StagePrepareFailed {
                    stage: &self.name,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    fn declare_outputs(&self) -> StageResult<Vec<StreamDeclaration>> {
        match self.state {
            StageState::Prepared | StageState::Running => Ok(self.router.declarations()),
            _ => Err(self.invalid_state("declare outputs")),
        }
    }

    fn execute(&mut self, tuple: &Tuple) -> StageResult<()> {
        let (instance, collector) = match (&self.state, &self.instance, &self.collector) {
            (StageState::Prepared | StageState::Running, Some(instance), Some(collector)) => {
                (Arc::clone(instance), Arc::clone(collector))
            }
            _ => return Err(self.invalid_state("execute")),
        };
        self.state = StageState::Running;
        self.processed += 1;

        let started = Instant::now();
        let event = Event::arrived_on(&tuple.event, &tuple.source_stream);

        let results = match instance.process(&event) {
            Ok(results) => results,
            Err(error) => return Err(self.fail_event(tuple, collector.as_ref(), error.into())),
        };

        if let Err(error) = self.router.dispatch(tuple, results, collector.as_ref()) {
            return Err(self.fail_event(tuple, collector.as_ref(), error.into()));
        }

        collector.ack(tuple);
        EventAcked {
            stage: &self.name,
            message_id: tuple.message_id,
            duration: started.elapsed(),
        }
        .log();
        Ok(())
    }

    /// Release the processor instance and close the stage. Safe to call repeatedly.
    fn cleanup(&mut self) {
        if self.state == StageState::Closed {
            return;
        }
        if let Some(instance) = self.instance.take() {
            self.registry.release(&instance);
        }
        self.collector = None;
        self.state = StageState::Closed;

        StageClosed {
            stage: &self.name,
            processed: self.processed,
            failed: self.failed,
        }
        .log();
    }
}

/// A stage dropped while still holding its processor gives up its ownership.
impl Drop for CustomProcessorStage {
    fn drop(&mut self) {
        if self.instance.is_some() {
            HostStage::cleanup(self);
        }
    }
}
