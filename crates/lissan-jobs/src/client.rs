use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    error::{JobError, Result},
    poll::{PollPolicy, poll_until_terminal},
    types::{JobState, RunId, StatusResponse, SubmitResponse, TaskId},
};

/// Paths of one vendor job family, relative to the vendor base URL
///
/// `status` and `result` get the task or run identifier appended as a final
/// path segment.
#[derive(Debug, Clone, Copy)]
pub struct JobEndpoints {
    pub submit: &'static str,
    pub status: &'static str,
    pub result: &'static str,
}

/// HTTP client for one family of asynchronous vendor jobs
#[derive(Debug, Clone)]
pub struct JobClient {
    client: Client,
    service: &'static str,
    base_url: Url,
    api_key: Option<SecretString>,
    endpoints: JobEndpoints,
    policy: PollPolicy,
}

impl JobClient {
    pub fn new(
        client: Client,
        service: &'static str,
        base_url: Url,
        api_key: Option<SecretString>,
        endpoints: JobEndpoints,
        policy: PollPolicy,
    ) -> Self {
        Self {
            client,
            service,
            base_url,
            api_key,
            endpoints,
            policy,
        }
    }

    /// Create a job and return its task identifier
    pub async fn submit<P: Serialize + ?Sized + Sync>(&self, payload: &P) -> Result<TaskId> {
        let url = self.endpoint_url(self.endpoints.submit, None)?;

        let response = self
            .authorized(self.client.post(url))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.connection_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("{} job submission rejected ({status}): {error_text}", self.service);
            return Err(JobError::Submission(format!("{} rejected the job with status {status}", self.service)));
        }

        let body: SubmitResponse = response.json().await.map_err(|e| {
            tracing::error!("{} submission response is not valid JSON: {e}", self.service);
            JobError::Submission(format!("{} returned an unreadable submission response", self.service))
        })?;

        let task_id = body
            .task_id
            .filter(|id| !id.trim().is_empty())
            .map(TaskId)
            .ok_or_else(|| JobError::Submission(format!("{} response did not include a task_id", self.service)))?;

        tracing::debug!(service = self.service, %task_id, "job submitted");

        Ok(task_id)
    }

    /// Query the current state of a job once
    pub async fn status(&self, task_id: &TaskId) -> Result<JobState> {
        let url = self.endpoint_url(self.endpoints.status, Some(&task_id.0))?;

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| self.connection_error(&e))?;

        let response = self.check_status(response).await?;

        let body: StatusResponse = response.json().await.map_err(|e| {
            JobError::UpstreamFormat(format!("{} status response for {task_id} is malformed: {e}", self.service))
        })?;

        Ok(JobState::from(body))
    }

    /// Poll a job until it finishes, returning the handle of its result
    pub async fn wait(&self, task_id: &TaskId, cancel: &CancellationToken) -> Result<RunId> {
        poll_until_terminal(task_id, &self.policy, cancel, || self.status(task_id)).await
    }

    /// Fetch the raw result of a finished job
    pub async fn fetch_result(&self, run_id: &RunId) -> Result<Response> {
        let url = self.endpoint_url(self.endpoints.result, Some(&run_id.0))?;

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| self.connection_error(&e))?;

        self.check_status(response).await
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!("{} API error ({status}): {message}", self.service);

        Err(JobError::ProviderApiError {
            status: status.as_u16(),
            message,
        })
    }

    fn connection_error(&self, error: &reqwest::Error) -> JobError {
        tracing::error!("{} request failed: {error}", self.service);
        JobError::Connection(format!("failed to reach {}: {error}", self.service))
    }

    /// Join `path` (and an optional identifier segment) onto the base URL
    fn endpoint_url(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| JobError::Config(format!("{} base URL cannot be a base", self.service)))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }

        Ok(url)
    }
}
