// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Custom processor implementations available to stages.
//!
//! # Local Backend
//! Built-in, in-process processors registered in the global registry at startup:
//! - **pass_through**: forward every event to one stream
//! - **field_router**: pick a stream from the value of a payload field
//! - **fan_out**: copy every event to several streams
//! - **field_projector**: keep a subset of payload fields
//!
//! # Stub Backend (Test-Only)
//! Processors that count their lifecycle calls, return scripted results or fail
//! on purpose. Only compiled for tests.
//!
//! # Example
//! ```rust
//! use custom_processor_stage::backends::local::LocalProcessorFactory;
//! use custom_processor_stage::config::ProcessorConfig;
//! use custom_processor_stage::traits::CustomProcessor;
//! use serde_json::json;
//!
//! let mut processor = LocalProcessorFactory::create_processor("fan_out")?;
//! processor.initialize(&ProcessorConfig::new().with("streams", json!(["a", "b"])))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
