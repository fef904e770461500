// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Event types exchanged between the host runtime, the stage and its processor.

mod event;
mod result;
mod tuple;

pub use event::Event;
pub use result::ProcessorResult;
pub use tuple::Tuple;
