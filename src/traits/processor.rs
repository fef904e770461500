// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::ProcessorConfig;
use crate::errors::{InitError, ProcessingError};
use crate::events::{Event, ProcessorResult};

/// Capability every pluggable processor implements.
///
/// A processor instance is constructed once per identifier and then shared by every
/// stage that resolves that identifier, so `process` and `cleanup` take `&self` and
/// may be called from several threads at once.
pub trait CustomProcessor: Send + Sync {
    /// Called exactly once, before the first `process`, with the configuration of
    /// the stage whose resolution constructed this instance.
    fn initialize(&mut self, config: &ProcessorConfig) -> Result<(), InitError>;

    /// Transform one input event into zero or more per-stream results.
    ///
    /// Must not emit anything itself; the stage routes the returned results.
    fn process(&self, event: &Event) -> Result<Vec<ProcessorResult>, ProcessingError>;

    /// Best-effort teardown, called once when the last owning stage closes.
    fn cleanup(&self) {}

    fn name(&self) -> &'static str;
}
