// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ProcessorConfig;
use crate::errors::ProcessingError;
use crate::events::{Event, ProcessorResult};
use crate::traits::CustomProcessor;

/// A constructed and initialized processor, shared by every stage that resolved
/// the same identifier.
///
/// Instances are only ever handed out behind an `Arc`; they are never copied.
pub struct ProcessorInstance {
    identifier: String,
    processor: Box<dyn CustomProcessor>,
    init_config: ProcessorConfig,
    cleaned_up: AtomicBool,
}

impl ProcessorInstance {
    pub(crate) fn new(
        identifier: &str,
        processor: Box<dyn CustomProcessor>,
        init_config: ProcessorConfig,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            processor,
            init_config,
            cleaned_up: AtomicBool::new(false),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &'static str {
        self.processor.name()
    }

    /// The config this instance was initialized with.
    pub fn init_config(&self) -> &ProcessorConfig {
        &self.init_config
    }

    pub fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        self.processor.process(event)
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up.load(Ordering::Acquire)
    }

    /// Run the processor's cleanup at most once.
    pub(crate) fn cleanup(&self) -> bool {
        if self.cleaned_up.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.processor.cleanup();
        true
    }
}

impl fmt::Debug for ProcessorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorInstance")
            .field("identifier", &self.identifier)
            .field("processor", &self.processor.name())
            .field("cleaned_up", &self.is_cleaned_up())
            .finish()
    }
}
