//! Orchestration of the translate → complete → translate → synthesize →
//! transcode chain behind the voice endpoints

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod orchestrator;

pub use error::{ChainError, Result};
pub use orchestrator::{Audio, ChainPlan, Orchestrator, Stage};
