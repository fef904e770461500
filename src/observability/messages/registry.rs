// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor registry events.
//!
//! This module contains message types for logging events related to:
//! * Factory registration
//! * Processor construction and initialization
//! * Shared instance reuse and release
//! * Processor cleanup

use crate::observability::messages::{millis, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A processor factory was registered.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct FactoryRegistered<'a> {
    pub identifier: &'a str,
    pub replaced: bool,
}

impl Display for FactoryRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.replaced {
            write!(f, "Replaced custom processor factory '{}'", self.identifier)
        } else {
            write!(f, "Registered custom processor factory '{}'", self.identifier)
        }
    }
}

impl StructuredLog for FactoryRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier = self.identifier,
            replaced = self.replaced,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "factory_registered",
            span_name = name,
            identifier = self.identifier,
        )
    }
}

/// A processor instance was constructed and initialized.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use custom_processor_stage::observability::messages::registry::ProcessorConstructed;
/// use std::time::Duration;
///
/// let msg = ProcessorConstructed {
///     identifier: "field_router",
///     processor_name: "field_router",
///     duration: Duration::from_millis(3),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ProcessorConstructed<'a> {
    pub identifier: &'a str,
    pub processor_name: &'a str,
    pub duration: std::time::Duration,
}

impl Display for ProcessorConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Constructed custom processor '{}' ({}) in {:?}",
            self.identifier, self.processor_name, self.duration
        )
    }
}

impl StructuredLog for ProcessorConstructed<'_> {
    fn log(&self) {
        tracing::info!(
            identifier = self.identifier,
            processor_name = self.processor_name,
            duration_ms = millis(self.duration),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_constructed",
            span_name = name,
            identifier = self.identifier,
            processor_name = self.processor_name,
        )
    }
}

/// Resolving a processor failed during construction or initialization.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ProcessorResolutionFailed<'a> {
    pub identifier: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorResolutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to resolve custom processor '{}': {}",
            self.identifier, self.error
        )
    }
}

impl StructuredLog for ProcessorResolutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            identifier = self.identifier,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_resolution_failed",
            span_name = name,
            identifier = self.identifier,
            error = %self.error,
        )
    }
}

/// An already constructed instance was handed to another owner.
///
/// # Log Level
/// `debug!` - Routine cache hit
pub struct ProcessorReused<'a> {
    pub identifier: &'a str,
    pub owners: usize,
}

impl Display for ProcessorReused<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reusing custom processor '{}' ({} owners)",
            self.identifier, self.owners
        )
    }
}

impl StructuredLog for ProcessorReused<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier = self.identifier,
            owners = self.owners,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_reused",
            span_name = name,
            identifier = self.identifier,
            owners = self.owners,
        )
    }
}

/// A sharer supplied a config that differs from the one the instance was initialized with.
///
/// # Log Level
/// `warn!` - The later config is ignored
pub struct ProcessorConfigIgnored<'a> {
    pub identifier: &'a str,
}

impl Display for ProcessorConfigIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Custom processor '{}' is already initialized with a different config; the new config is ignored",
            self.identifier
        )
    }
}

impl StructuredLog for ProcessorConfigIgnored<'_> {
    fn log(&self) {
        tracing::warn!(identifier = self.identifier, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_config_ignored",
            span_name = name,
            identifier = self.identifier,
        )
    }
}

/// An owner released its instance.
///
/// # Log Level
/// `debug!` - Routine lifecycle event
pub struct ProcessorReleased<'a> {
    pub identifier: &'a str,
    pub remaining_owners: usize,
}

impl Display for ProcessorReleased<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Released custom processor '{}' ({} owners remaining)",
            self.identifier, self.remaining_owners
        )
    }
}

impl StructuredLog for ProcessorReleased<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier = self.identifier,
            remaining_owners = self.remaining_owners,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_released",
            span_name = name,
            identifier = self.identifier,
            remaining_owners = self.remaining_owners,
        )
    }
}

/// A processor instance was cleaned up and evicted.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProcessorCleanedUp<'a> {
    pub identifier: &'a str,
    pub processor_name: &'a str,
}

impl Display for ProcessorCleanedUp<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cleaned up custom processor '{}' ({})",
            self.identifier, self.processor_name
        )
    }
}

impl StructuredLog for ProcessorCleanedUp<'_> {
    fn log(&self) {
        tracing::info!(
            identifier = self.identifier,
            processor_name = self.processor_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_cleaned_up",
            span_name = name,
            identifier = self.identifier,
        )
    }
}
