// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::StageResult;
use crate::events::{Event, Tuple};

/// Output stream declared to the host: a name plus the fields each emission carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDeclaration {
    pub stream: String,
    pub fields: Vec<String>,
}

/// Emission primitive provided by the host runtime.
///
/// Emissions anchored to an input tuple keep that tuple pending until every
/// anchored output is acknowledged downstream; the host replays the tuple from its
/// origin when that does not happen in time.
pub trait OutputCollector: Send + Sync {
    fn emit(&self, stream: &str, anchor: &Tuple, event: Event);

    /// Mark an input as fully handled by this stage.
    fn ack(&self, tuple: &Tuple);

    /// Mark an input as failed so the host's replay policy can apply.
    fn fail(&self, tuple: &Tuple);
}

/// Lifecycle hooks the host runtime drives on every stage instance.
pub trait HostStage: Send {
    fn prepare(&mut self, collector: Arc<dyn OutputCollector>) -> StageResult<()>;

    fn declare_outputs(&self) -> StageResult<Vec<StreamDeclaration>>;

    /// Handle one input. Never called concurrently on the same instance.
    fn execute(&mut self, tuple: &Tuple) -> StageResult<()>;

    fn cleanup(&mut self);
}
