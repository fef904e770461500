// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // custom processor implementations
pub mod config;        // stage definitions, processor config, schemas
pub mod engine;        // stage adapter + output routing
pub mod errors;        // error handling
pub mod events;        // events, tuples, processor results
pub mod observability;
pub mod registry;      // identifier -> shared processor instance
pub mod testrun;       // fixture-driven test runs
pub mod traits;        // processor and host contracts

pub use engine::{CustomProcessorStage, StageState};
pub use errors::{StageError, StageResult};
pub use registry::ProcessorRegistry;
pub use traits::{CustomProcessor, HostStage, OutputCollector};
