// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability for the custom processor stage.
//!
//! Log lines are defined as message types in [`messages`] and emitted through
//! `tracing`. Binaries call [`init_tracing`] once at startup; library code never
//! installs a subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::consts::DEFAULT_LOG_FILTER;

pub mod messages;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to `info`.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
