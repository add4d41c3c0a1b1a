use async_trait::async_trait;
use lissan_config::TranslateConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
    client::{JobClient, JobEndpoints},
    error::{JobError, Result},
    poll::PollPolicy,
};

const ENDPOINTS: JobEndpoints = JobEndpoints {
    submit: "translate",
    status: "translate/status",
    result: "translate/result",
};

/// Translates text between two vendor language codes
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, from: u32, to: u32, cancel: &CancellationToken) -> Result<String>;
}

/// Translation vendor driven through its asynchronous job API
pub struct TranslateClient {
    jobs: JobClient,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_language: u32,
    target_language: u32,
}

#[derive(Deserialize)]
struct TranslateResult {
    #[serde(default)]
    text: Option<String>,
}

impl TranslateClient {
    pub const fn new(jobs: JobClient) -> Self {
        Self { jobs }
    }

    pub fn from_config(client: Client, config: &TranslateConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| JobError::Config("translate.base_url is not set".to_string()))?;

        Ok(Self::new(JobClient::new(
            client,
            "translate",
            base_url,
            config.api_key.clone(),
            ENDPOINTS,
            PollPolicy::from(&config.polling),
        )))
    }
}

#[async_trait]
impl Translator for TranslateClient {
    async fn translate(&self, text: &str, from: u32, to: u32, cancel: &CancellationToken) -> Result<String> {
        tracing::debug!("Translation request: {from} -> {to}, input_len={}", text.len());

        let request = TranslateRequest {
            text,
            source_language: from,
            target_language: to,
        };

        let task_id = self.jobs.submit(&request).await?;
        let run_id = self.jobs.wait(&task_id, cancel).await?;
        let response = self.jobs.fetch_result(&run_id).await?;

        let result: TranslateResult = response
            .json()
            .await
            .map_err(|e| JobError::UpstreamFormat(format!("translation result for {run_id} is malformed: {e}")))?;

        let translated = result
            .text
            .ok_or_else(|| JobError::UpstreamFormat(format!("translation result for {run_id} has no text")))?;

        tracing::debug!("Translation complete, output_len={}", translated.len());

        Ok(translated)
    }
}
