// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolution of processor identifiers to shared, initialized instances.

mod instance;
mod processor_registry;

pub use instance::ProcessorInstance;
pub use processor_registry::{global, ProcessorFactory, ProcessorRegistry};
