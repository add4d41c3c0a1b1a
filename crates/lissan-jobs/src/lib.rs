//! Client for vendor APIs that run work as asynchronous jobs
//!
//! Every job follows the same protocol: submit a payload and receive a
//! `task_id`, poll a status endpoint until the job reports `SUCCESS` (with a
//! `run_id`) or `ERROR`, then fetch the result by `run_id`. The translation
//! and speech vendors are both built on [`JobClient`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod client;
mod error;
mod http_client;
mod poll;
mod speech;
mod translate;
mod types;

pub use client::{JobClient, JobEndpoints};
pub use error::{JobError, Result};
pub use http_client::http_client;
pub use poll::{PollPolicy, poll_until_terminal};
pub use speech::{SpeechClient, Synthesizer};
pub use translate::{TranslateClient, Translator};
pub use types::{JobState, JobStatus, RunId, TaskId};
