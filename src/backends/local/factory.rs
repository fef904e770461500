// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::LoadError;
use crate::registry::ProcessorRegistry;
use crate::traits::CustomProcessor;
use super::processors::*;

/// Factory for the built-in (in-process) processor implementations
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Construct an uninitialized processor by implementation identifier
    ///
    /// - "pass_through" -> PassThroughProcessor
    /// - "field_router" -> FieldRouterProcessor
    /// - "fan_out" -> FanOutProcessor
    /// - "field_projector" -> FieldProjectorProcessor
    pub fn create_processor(identifier: &str) -> Result<Box<dyn CustomProcessor>, LoadError> {
        match identifier {
            "pass_through" => Ok(Box::new(PassThroughProcessor::new())),
            "field_router" => Ok(Box::new(FieldRouterProcessor::new())),
            "fan_out" => Ok(Box::new(FanOutProcessor::new())),
            "field_projector" => Ok(Box::new(FieldProjectorProcessor::new())),
            _ => Err(LoadError::NotRegistered(identifier.to_string())),
        }
    }

    /// Register every built-in implementation with `registry`
    pub fn register_all(registry: &ProcessorRegistry) {
        for identifier in Self::list_available_implementations() {
            registry.register(identifier, move || Self::create_processor(identifier));
        }
    }

    /// List all built-in processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["pass_through", "field_router", "fan_out", "field_projector"]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(identifier: &str) -> bool {
        Self::list_available_implementations().contains(&identifier)
    }
}
