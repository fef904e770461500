// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test runs: feed fixture records through a stage and report what came out.

mod collector;
mod fixtures;
mod runner;


pub use collector::{Emission, RecordingCollector};
pub use fixtures::{load_test_case, TestRunCase, TestRunSource};
pub use runner::{TestRunReport, TestRunner, TupleFailure};
