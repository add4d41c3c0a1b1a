use std::fmt;

use serde::Deserialize;

/// Opaque handle returned when a job is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId(pub String);

/// Opaque handle of a finished job's result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status reported by a vendor job
///
/// Only `SUCCESS` and `ERROR` are terminal. Every other value the vendor
/// reports, including ones we have never seen, counts as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Success,
    Error,
}

impl JobStatus {
    pub fn from_wire(value: &str) -> Self {
        if value.eq_ignore_ascii_case("success") {
            Self::Success
        } else if value.eq_ignore_ascii_case("error") {
            Self::Error
        } else {
            Self::Pending
        }
    }
}

/// One observation of a job's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobState {
    pub status: JobStatus,
    /// Present only once the job succeeded
    pub run_id: Option<RunId>,
}

/// Wire body of the create-job endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Wire body of the job status endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub run_id: Option<String>,
}

impl From<StatusResponse> for JobState {
    fn from(response: StatusResponse) -> Self {
        let status = JobStatus::from_wire(&response.status);
        let run_id = match status {
            JobStatus::Success => response.run_id.filter(|id| !id.is_empty()).map(RunId),
            _ => None,
        };

        Self { status, run_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!(JobStatus::from_wire("SUCCESS"), JobStatus::Success);
        assert_eq!(JobStatus::from_wire("success"), JobStatus::Success);
        assert_eq!(JobStatus::from_wire("Error"), JobStatus::Error);
    }

    #[test]
    fn unknown_status_is_pending() {
        assert_eq!(JobStatus::from_wire("PENDING"), JobStatus::Pending);
        assert_eq!(JobStatus::from_wire("RUNNING"), JobStatus::Pending);
        assert_eq!(JobStatus::from_wire(""), JobStatus::Pending);
    }

    #[test]
    fn run_id_is_dropped_unless_successful() {
        let state = JobState::from(StatusResponse {
            status: "PENDING".to_string(),
            run_id: Some("early".to_string()),
        });
        assert_eq!(state.run_id, None);

        let state = JobState::from(StatusResponse {
            status: "SUCCESS".to_string(),
            run_id: Some("run-1".to_string()),
        });
        assert_eq!(state.run_id, Some(RunId("run-1".to_string())));
    }

    #[test]
    fn status_body_without_run_id_parses() {
        let body: StatusResponse = serde_json::from_str(r#"{"status":"PENDING","progress":40}"#).unwrap();

        assert_eq!(JobState::from(body).status, JobStatus::Pending);
    }

    #[test]
    fn display_uses_vendor_spelling() {
        assert_eq!(JobStatus::Success.to_string(), "SUCCESS");
    }
}
