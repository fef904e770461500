// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod fan_out;
pub mod field_projector;
pub mod field_router;
pub mod pass_through;

pub use fan_out::*;
pub use field_projector::*;
pub use field_router::*;
pub use pass_through::*;

use crate::config::ProcessorConfig;
use crate::errors::InitError;

/// Read a required, non-blank string option.
pub(crate) fn required_str(
    config: &ProcessorConfig,
    processor: &str,
    key: &str,
) -> Result<String, InitError> {
    match config.get_str(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        Some(_) => Err(InitError::new(processor, format!("'{}' must not be blank", key))),
        None => Err(InitError::new(
            processor,
            format!("missing required string option '{}'", key),
        )),
    }
}

/// Read a required, non-empty list of strings.
pub(crate) fn required_str_list(
    config: &ProcessorConfig,
    processor: &str,
    key: &str,
) -> Result<Vec<String>, InitError> {
    let values = config.get_str_list(key).ok_or_else(|| {
        InitError::new(
            processor,
            format!("missing required string list option '{}'", key),
        )
    })?;
    if values.is_empty() {
        return Err(InitError::new(
            processor,
            format!("'{}' must list at least one entry", key),
        ));
    }
    Ok(values)
}
