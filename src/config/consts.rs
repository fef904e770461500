/// Stream assigned to events that were never bound to a specific stream
pub const DEFAULT_STREAM_ID: &str = "default";
/// Name of the single field every declared output stream carries
pub const EVENT_FIELD: &str = "streamline-event";
/// Number of stage instances a test run uses when the definition does not say
pub const DEFAULT_PARALLELISM: usize = 1;
/// Upper bound on stage instances per test run
pub const MAX_PARALLELISM: usize = 64;
/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
