// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs fixture records through a stage the way a host would.
//!
//! The runner prepares `parallelism` stage instances from one definition before
//! any input flows, all resolving their processor from the same registry. Input
//! tuples are dealt out round-robin; every instance handles its share strictly in
//! order on its own blocking task. Everything the instances emit, ack and fail lands in one shared
//! [`RecordingCollector`], which the report is built from once all instances
//! have closed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::consts::MAX_PARALLELISM;
use crate::config::StageDefinition;
use crate::engine::CustomProcessorStage;
use crate::errors::TestRunError;
use crate::events::{Event, Tuple};
use crate::observability::messages::testrun::{TestRunCompleted, TestRunStarted};
use crate::observability::messages::StructuredLog;
use crate::registry::{self, ProcessorRegistry};
use crate::testrun::{RecordingCollector, TestRunCase};
use crate::traits::HostStage;

/// A tuple the stage failed, with the reason it gave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleFailure {
    pub message_id: u64,
    pub event_id: String,
    pub error: String,
}

/// Outcome of one test run.
#[derive(Debug, Clone, Serialize)]
pub struct TestRunReport {
    pub test_case: String,
    pub stage: String,
    pub processor: String,
    pub parallelism: usize,
    pub input_count: usize,
    pub acked: usize,
    pub failed: usize,
    /// Emitted events per output stream, ordered by the input they are anchored to.
    pub emissions: BTreeMap<String, Vec<Event>>,
    pub failures: Vec<TupleFailure>,
}

impl TestRunReport {
    pub fn emitted(&self) -> usize {
        self.emissions.values().map(Vec::len).sum()
    }

    pub fn stream(&self, name: &str) -> &[Event] {
        self.emissions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub struct TestRunner {
    definition: StageDefinition,
    registry: Arc<ProcessorRegistry>,
}

impl TestRunner {
    pub fn new(definition: StageDefinition) -> Self {
        Self {
            definition,
            registry: Arc::clone(registry::global()),
        }
    }

    pub fn with_registry(mut self, registry: Arc<ProcessorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Number of stage instances a run starts.
    pub fn parallelism(&self) -> usize {
        self.definition.parallelism.clamp(1, MAX_PARALLELISM)
    }

    /// Feed every record of `case` through the stage and collect the outcome.
    ///
    /// Per-tuple failures are part of the report. The run itself only fails when a
    /// stage instance cannot start or its worker dies; every other instance is still
    /// closed before the error is returned.
    pub async fn run(&self, case: &TestRunCase) -> Result<TestRunReport, TestRunError> {
        let started = Instant::now();
        let tuples = case.to_tuples();
        let input_count = tuples.len();
        let parallelism = self.parallelism();

        TestRunStarted {
            test_case: &case.name,
            stage: &self.definition.name,
            tuple_count: input_count,
            parallelism,
        }
        .log();

        let collector = Arc::new(RecordingCollector::new());
        let stages = {
            let definition = self.definition.clone();
            let registry = Arc::clone(&self.registry);
            let collector = Arc::clone(&collector);
            tokio::task::spawn_blocking(move || {
                prepare_instances(&definition, registry, collector, parallelism)
            })
            .await
            .map_err(|join_error| TestRunError::Worker {
                worker: 0,
                reason: join_error.to_string(),
            })??
        };

        let handles: Vec<_> = stages
            .into_iter()
            .zip(partition(tuples, parallelism))
            .map(|(stage, tuples)| tokio::task::spawn_blocking(move || run_worker(stage, tuples)))
            .collect();

        let mut failures = Vec::new();
        let mut first_error = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(mut worker_failures) => failures.append(&mut worker_failures),
                Err(join_error) => {
                    first_error.get_or_insert(TestRunError::Worker {
                        worker,
                        reason: join_error.to_string(),
                    });
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }
        failures.sort_by_key(|failure| failure.message_id);

        let mut recorded = collector.emissions();
        recorded.sort_by_key(|emission| emission.anchor);
        let mut emissions: BTreeMap<String, Vec<Event>> = BTreeMap::new();
        for emission in recorded {
            emissions.entry(emission.stream).or_default().push(emission.event);
        }

        let report = TestRunReport {
            test_case: case.name.clone(),
            stage: self.definition.name.clone(),
            processor: self.definition.processor.clone(),
            parallelism,
            input_count,
            acked: collector.acked().len(),
            failed: collector.failed().len(),
            emissions,
            failures,
        };

        TestRunCompleted {
            test_case: &case.name,
            emitted: report.emitted(),
            acked: report.acked,
            failed: report.failed,
            duration: started.elapsed(),
        }
        .log();

        Ok(report)
    }
}

/// Deal tuples out round-robin into `workers` partitions.
fn partition(tuples: Vec<Tuple>, workers: usize) -> Vec<Vec<Tuple>> {
    let mut partitions: Vec<Vec<Tuple>> = (0..workers).map(|_| Vec::new()).collect();
    for (index, tuple) in tuples.into_iter().enumerate() {
        partitions[index % workers].push(tuple);
    }
    partitions
}

/// Start `count` stage instances up front so they all share one processor.
///
/// If any instance fails to start, the ones already prepared are closed again.
fn prepare_instances(
    definition: &StageDefinition,
    registry: Arc<ProcessorRegistry>,
    collector: Arc<RecordingCollector>,
    count: usize,
) -> Result<Vec<CustomProcessorStage>, TestRunError> {
    let mut stages = Vec::with_capacity(count);
    for worker in 0..count {
        let mut stage =
            CustomProcessorStage::from_definition(definition).with_registry(Arc::clone(&registry));
        if let Err(source) = stage.prepare(collector.clone()) {
            for prepared in &mut stages {
                HostStage::cleanup(prepared);
            }
            return Err(TestRunError::StageStartup { worker, source });
        }
        stages.push(stage);
    }
    Ok(stages)
}

fn run_worker(mut stage: CustomProcessorStage, tuples: Vec<Tuple>) -> Vec<TupleFailure> {
    let failures: Vec<TupleFailure> = tuples
        .iter()
        .filter_map(|tuple| {
            stage.execute(tuple).err().map(|error| TupleFailure {
                message_id: tuple.message_id,
                event_id: tuple.event.id.clone(),
                error: error.to_string(),
            })
        })
        .collect();

    stage.cleanup();
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{echo_factory, LifecycleCounters};
    use crate::config::Schema;
    use crate::errors::{LoadError, StageError};
    use crate::testrun::TestRunSource;
    use serde_json::{json, Map, Value};

    fn definition(processor: &str, parallelism: usize, streams: &[&str]) -> StageDefinition {
        StageDefinition {
            name: "under-test".to_string(),
            processor: processor.to_string(),
            config: Default::default(),
            input_schema: None,
            output_schemas: streams
                .iter()
                .map(|s| (s.to_string(), Schema::default()))
                .collect(),
            parallelism,
        }
    }

    fn case(records: Vec<Value>) -> TestRunCase {
        let records: Vec<Map<String, Value>> = records
            .into_iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect();
        TestRunCase {
            name: "case".to_string(),
            sources: vec![TestRunSource {
                id: "src".to_string(),
                records: BTreeMap::from([("default".to_string(), records)]),
            }],
        }
    }

    fn echo_registry() -> (Arc<ProcessorRegistry>, Arc<LifecycleCounters>) {
        let registry = Arc::new(ProcessorRegistry::new());
        let counters = LifecycleCounters::new();
        registry.register("echo", echo_factory(counters.clone()));
        (registry, counters)
    }

    #[test]
    fn test_partition_round_robin() {
        let tuples = case(vec![json!({}), json!({}), json!({}), json!({}), json!({})]).to_tuples();
        let partitions = partition(tuples, 2);

        let ids: Vec<Vec<u64>> = partitions
            .iter()
            .map(|p| p.iter().map(|t| t.message_id).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 3, 5], vec![2, 4]]);
    }

    #[tokio::test]
    async fn test_parallel_instances_share_one_processor() {
        let (registry, counters) = echo_registry();
        let records = (0..20).map(|n| json!({ "n": n })).collect();

        let report = TestRunner::new(definition("echo", 4, &["out"]))
            .with_registry(Arc::clone(&registry))
            .run(&case(records))
            .await
            .unwrap();

        assert_eq!(report.parallelism, 4);
        assert_eq!(report.input_count, 20);
        assert_eq!(report.acked, 20);
        assert_eq!(report.failed, 0);
        assert_eq!(counters.constructed(), 1);
        assert_eq!(counters.initialized(), 1);
        assert_eq!(counters.cleaned_up(), 1);
        assert!(registry.cached_identifiers().is_empty());

        let order: Vec<i64> = report
            .stream("out")
            .iter()
            .map(|e| e.field("n").and_then(Value::as_i64).unwrap())
            .collect();
        assert_eq!(order, (0..20).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_failures_are_reported_per_tuple() {
        let (registry, _counters) = echo_registry();
        let records = vec![json!({"n": 1}), json!({"fail": true}), json!({"n": 3})];

        let report = TestRunner::new(definition("echo", 1, &["out"]))
            .with_registry(registry)
            .run(&case(records))
            .await
            .unwrap();

        assert_eq!(report.acked, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.emitted(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].message_id, 2);
        assert!(report.failures[0].error.contains("event asked to fail"));
    }

    #[tokio::test]
    async fn test_startup_failure_fails_the_run() {
        let registry = Arc::new(ProcessorRegistry::new());

        let result = TestRunner::new(definition("com.example.Missing", 2, &["out"]))
            .with_registry(registry)
            .run(&case(vec![json!({})]))
            .await;

        match result {
            Err(TestRunError::StageStartup { source, .. }) => assert_eq!(
                source,
                StageError::Load(LoadError::NotRegistered("com.example.Missing".to_string()))
            ),
            other => panic!("expected startup failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_case_runs_cleanly() {
        let (registry, counters) = echo_registry();

        let report = TestRunner::new(definition("echo", 3, &["out"]))
            .with_registry(registry)
            .run(&case(vec![]))
            .await
            .unwrap();

        assert_eq!(report.input_count, 0);
        assert_eq!(report.emitted(), 0);
        assert_eq!(counters.cleaned_up(), 1);
    }
}
