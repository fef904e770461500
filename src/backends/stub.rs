// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::ProcessorConfig;
use crate::errors::{InitError, LoadError, ProcessingError};
use crate::events::{Event, ProcessorResult};
use crate::traits::CustomProcessor;

/// Lifecycle call counts shared between a test and the processors it constructs.
#[derive(Debug, Default)]
pub struct LifecycleCounters {
    pub constructed: AtomicUsize,
    pub initialized: AtomicUsize,
    pub processed: AtomicUsize,
    pub cleaned_up: AtomicUsize,
}

impl LifecycleCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn cleaned_up(&self) -> usize {
        self.cleaned_up.load(Ordering::SeqCst)
    }
}

/// Echoes every event to the stream named by `output_stream` (default `out`).
///
/// Events whose payload has `"fail": true` produce a `ProcessingError` instead.
pub struct EchoProcessor {
    counters: Arc<LifecycleCounters>,
    output_stream: String,
}

impl EchoProcessor {
    pub fn new(counters: Arc<LifecycleCounters>) -> Self {
        Self {
            counters,
            output_stream: "out".to_string(),
        }
    }
}

impl CustomProcessor for EchoProcessor {
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError> {
        self.counters.initialized.fetch_add(1, Ordering::SeqCst);
        if let Some(stream) = config.get_str("output_stream") {
            self.output_stream = stream.to_string();
        }
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        self.counters.processed.fetch_add(1, Ordering::SeqCst);
        if event.field("fail").and_then(|v| v.as_bool()) == Some(true) {
            return Err(ProcessingError::new(&event.id, "event asked to fail"));
        }
        Ok(vec![ProcessorResult::single(
            self.output_stream.clone(),
            event.clone(),
        )])
    }

    fn cleanup(&self) {
        self.counters.cleaned_up.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Factory producing `EchoProcessor`s that report into `counters`.
pub fn echo_factory(
    counters: Arc<LifecycleCounters>,
) -> impl Fn() -> Result<Box<dyn CustomProcessor>, LoadError> + Send + Sync + 'static {
    move || {
        counters.constructed.fetch_add(1, Ordering::SeqCst);
        let processor: Box<dyn CustomProcessor> = Box::new(EchoProcessor::new(counters.clone()));
        Ok(processor)
    }
}

/// Returns a fixed set of results for every event and remembers what it saw.
pub struct ScriptedProcessor {
    results: Vec<ProcessorResult>,
    seen: Arc<Mutex<Vec<Event>>>,
}

impl ScriptedProcessor {
    pub fn new(results: Vec<ProcessorResult>, seen: Arc<Mutex<Vec<Event>>>) -> Self {
        Self { results, seen }
    }
}

impl CustomProcessor for ScriptedProcessor {
    fn initialize(&mut self, _config: &ProcessorConfig) -> Result<(), InitError> {
        Ok(())
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        self.seen
            .lock()
            .expect("scripted processor poisoned")
            .push(event.clone());
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A processor whose `initialize` always fails.
pub struct FailingInitProcessor;

impl CustomProcessor for FailingInitProcessor {
    fn initialize(&mut self, _config: &ProcessorConfig) -> Result<(), InitError> {
        Err(InitError::new("failing_init", "simulated initialization failure"))
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        Err(ProcessingError::new(&event.id, "never initialized"))
    }

    fn name(&self) -> &'static str {
        "failing_init"
    }
}

pub fn failing_init_factory() -> Result<Box<dyn CustomProcessor>, LoadError> {
    Ok(Box::new(FailingInitProcessor))
}

/// A processor whose `initialize` panics.
pub struct PanickingInitProcessor;

impl CustomProcessor for PanickingInitProcessor {
    fn initialize(&mut self, _config: &ProcessorConfig) -> Result<(), InitError> {
        panic!("simulated initialization panic")
    }

    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError> {
        Err(ProcessingError::new(&event.id, "never initialized"))
    }

    fn name(&self) -> &'static str {
        "panicking_init"
    }
}

pub fn panicking_init_factory() -> Result<Box<dyn CustomProcessor>, LoadError> {
    Ok(Box::new(PanickingInitProcessor))
}
