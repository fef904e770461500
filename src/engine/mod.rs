// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod router;
pub mod stage;

pub use router::OutputRouter;
pub use stage::{CustomProcessorStage, StageState};
