// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for a human-readable line and
//! `StructuredLog` to emit the same event with its fields attached, so log
//! text lives in one place instead of being scattered through the code.
//!
//! # Organization
//!
//! * `processor` - Built-in processor execution
//! * `registry` - Processor construction, sharing, release and cleanup
//! * `routing` - Output stream declaration and dispatch
//! * `stage` - Stage lifecycle, per-event acks and failures
//! * `testrun` - Test run progress
//!
//! # Usage Pattern
//!
//! ```rust
//! use custom_processor_stage::observability::messages::StructuredLog;
//! use custom_processor_stage::observability::messages::stage::StageClosed;
//!
//! let msg = StageClosed {
//!     stage: "severity-router",
//!     processed: 10,
//!     failed: 1,
//! };
//!
//! msg.log();
//! ```

use std::time::Duration;
use tracing::Span;

pub mod processor;
pub mod registry;
pub mod routing;
pub mod stage;
pub mod testrun;

/// A log message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields.
    fn log(&self);

    /// Open a span carrying the message's identifying fields.
    fn span(&self, name: &str) -> Span;
}

/// Whole microseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_fields_saturate() {
        let cases = [
            (Duration::from_micros(1_500), 1_500, 1),
            (Duration::ZERO, 0, 0),
            (Duration::MAX, u64::MAX, u64::MAX),
        ];

        for (duration, expected_micros, expected_millis) in cases {
            assert_eq!(micros(duration), expected_micros, "{:?}", duration);
            assert_eq!(millis(duration), expected_millis, "{:?}", duration);
        }
    }
}
