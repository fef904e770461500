// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod host;
pub mod processor;

pub use host::{HostStage, OutputCollector, StreamDeclaration};
pub use processor::CustomProcessor;
