use async_trait::async_trait;
use lissan_config::TtsConfig;
use reqwest::Client;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    client::{JobClient, JobEndpoints},
    error::{JobError, Result},
    poll::PollPolicy,
};

const ENDPOINTS: JobEndpoints = JobEndpoints {
    submit: "tts",
    status: "tts/status",
    result: "tts/result",
};

/// Synthesizes speech for a piece of text, returning WAV bytes
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, cancel: &CancellationToken) -> Result<Vec<u8>>;
}

/// Text-to-speech vendor driven through its asynchronous job API
pub struct SpeechClient {
    jobs: JobClient,
    voice_id: String,
    language: u32,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    language: u32,
}

impl SpeechClient {
    pub const fn new(jobs: JobClient, voice_id: String, language: u32) -> Self {
        Self {
            jobs,
            voice_id,
            language,
        }
    }

    pub fn from_config(client: Client, config: &TtsConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| JobError::Config("tts.base_url is not set".to_string()))?;

        let jobs = JobClient::new(
            client,
            "tts",
            base_url,
            config.api_key.clone(),
            ENDPOINTS,
            PollPolicy::from(&config.polling),
        );

        Ok(Self::new(jobs, config.voice_id.clone(), config.language))
    }
}

#[async_trait]
impl Synthesizer for SpeechClient {
    async fn synthesize(&self, text: &str, cancel: &CancellationToken) -> Result<Vec<u8>> {
        tracing::debug!(
            "Speech request: voice={}, language={}, input_len={}",
            self.voice_id,
            self.language,
            text.len(),
        );

        let request = SpeechRequest {
            text,
            voice_id: &self.voice_id,
            language: self.language,
        };

        let task_id = self.jobs.submit(&request).await?;
        let run_id = self.jobs.wait(&task_id, cancel).await?;
        let response = self.jobs.fetch_result(&run_id).await?;

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        if !is_audio_content_type(content_type.as_deref()) {
            tracing::error!("Speech result for {run_id} is not audio: {content_type:?}");
            return Err(JobError::UpstreamFormat(format!(
                "speech result for {run_id} has content type {}",
                content_type.as_deref().unwrap_or_default()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read speech result body: {e}");
            JobError::Connection(format!("failed to read speech result: {e}"))
        })?;

        if bytes.is_empty() {
            return Err(JobError::UpstreamFormat(format!("speech result for {run_id} is empty")));
        }

        tracing::debug!("Speech synthesis complete, {} bytes", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// Whether a result body may hold audio
///
/// A missing header is trusted. Vendors that fail after reporting `SUCCESS`
/// answer with a JSON or text document instead.
fn is_audio_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };

    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence.starts_with("audio/") || essence == "application/octet-stream"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_content_types_are_accepted() {
        assert!(is_audio_content_type(None));
        assert!(is_audio_content_type(Some("audio/wav")));
        assert!(is_audio_content_type(Some("Audio/X-WAV; codecs=1")));
        assert!(is_audio_content_type(Some("application/octet-stream")));
    }

    #[test]
    fn error_documents_are_rejected() {
        assert!(!is_audio_content_type(Some("application/json")));
        assert!(!is_audio_content_type(Some("text/plain; charset=utf-8")));
        assert!(!is_audio_content_type(Some("")));
    }
}
