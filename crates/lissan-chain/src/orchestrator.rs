use std::{future::Future, sync::Arc, time::Instant};

use lissan_audio::{FfmpegTranscoder, MPEG_CONTENT_TYPE, Transcoder};
use lissan_config::{Config, TranslateConfig};
use lissan_jobs::{SpeechClient, Synthesizer, TranslateClient, Translator};
use lissan_llm::{Completer, CompletionClient, Prompt};
use lissan_telemetry::{KeyValue, metrics};
use tokio_util::sync::CancellationToken;

use crate::error::{ChainError, Result};

/// Stages of the chain, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Caller's language to the model's language
    TranslateIn,
    Complete,
    /// Model's answer back to the caller's language
    TranslateOut,
    Synthesize,
    Transcode,
}

/// Language pair every chain uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainPlan {
    pub source_language: u32,
    pub intermediate_language: u32,
}

impl From<&TranslateConfig> for ChainPlan {
    fn from(config: &TranslateConfig) -> Self {
        Self {
            source_language: config.source_language,
            intermediate_language: config.intermediate_language,
        }
    }
}

/// Encoded audio ready to be sent as a response body
#[derive(Debug, Clone)]
pub struct Audio {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Runs chains of vendor calls, one stage after another
///
/// Holds no per-request state: every call starts a fresh chain and the
/// first failing stage aborts the rest.
pub struct Orchestrator {
    translator: Arc<dyn Translator>,
    completer: Arc<dyn Completer>,
    synthesizer: Arc<dyn Synthesizer>,
    transcoder: Arc<dyn Transcoder>,
    plan: ChainPlan,
}

impl Orchestrator {
    pub fn new(
        translator: Arc<dyn Translator>,
        completer: Arc<dyn Completer>,
        synthesizer: Arc<dyn Synthesizer>,
        transcoder: Arc<dyn Transcoder>,
        plan: ChainPlan,
    ) -> Self {
        Self {
            translator,
            completer,
            synthesizer,
            transcoder,
            plan,
        }
    }

    /// Build an orchestrator backed by the configured vendors
    pub fn from_config(config: &Config, client: &reqwest::Client) -> anyhow::Result<Self> {
        let translator = TranslateClient::from_config(client.clone(), &config.translate)
            .map_err(|e| anyhow::anyhow!("failed to initialize translation client: {e}"))?;
        let synthesizer = SpeechClient::from_config(client.clone(), &config.tts)
            .map_err(|e| anyhow::anyhow!("failed to initialize speech client: {e}"))?;
        let completer = CompletionClient::new(client.clone(), &config.llm)
            .map_err(|e| anyhow::anyhow!("failed to initialize completion client: {e}"))?;
        let transcoder = FfmpegTranscoder::new(&config.transcode);

        tracing::debug!(
            source_language = config.translate.source_language,
            intermediate_language = config.translate.intermediate_language,
            voice = %config.tts.voice_id,
            "chain orchestrator initialized"
        );

        Ok(Self::new(
            Arc::new(translator),
            Arc::new(completer),
            Arc::new(synthesizer),
            Arc::new(transcoder),
            ChainPlan::from(&config.translate),
        ))
    }

    /// Single completion without translation
    pub async fn complete(&self, prompt: &Prompt, cancel: &CancellationToken) -> Result<String> {
        run_stage(Stage::Complete, cancel, async {
            self.completer
                .complete(prompt)
                .await
                .map_err(|source| ChainError::Completion {
                    stage: Stage::Complete,
                    source,
                })
        })
        .await
    }

    /// Translate, complete and translate back
    pub async fn answer_text(&self, text: &str, cancel: &CancellationToken) -> Result<String> {
        let ChainPlan {
            source_language,
            intermediate_language,
        } = self.plan;

        let question = self
            .translate(Stage::TranslateIn, text, source_language, intermediate_language, cancel)
            .await?;

        let answer = self.complete(&Prompt::user(question), cancel).await?;

        self.translate(Stage::TranslateOut, &answer, intermediate_language, source_language, cancel)
            .await
    }

    /// The full chain: translated answer, spoken and transcoded
    pub async fn answer_audio(&self, text: &str, cancel: &CancellationToken) -> Result<Audio> {
        let answer = self.answer_text(text, cancel).await?;
        self.speak(&answer, cancel).await
    }

    /// Synthesize and transcode text as-is
    pub async fn speak(&self, text: &str, cancel: &CancellationToken) -> Result<Audio> {
        let speech = run_stage(Stage::Synthesize, cancel, async {
            self.synthesizer
                .synthesize(text, cancel)
                .await
                .map_err(|source| ChainError::Job {
                    stage: Stage::Synthesize,
                    source,
                })
        })
        .await?;

        let bytes = run_stage(Stage::Transcode, cancel, async {
            self.transcoder
                .transcode(&speech)
                .await
                .map_err(|source| ChainError::Transcode {
                    stage: Stage::Transcode,
                    source,
                })
        })
        .await?;

        Ok(Audio {
            bytes,
            content_type: MPEG_CONTENT_TYPE,
        })
    }

    async fn translate(
        &self,
        stage: Stage,
        text: &str,
        from: u32,
        to: u32,
        cancel: &CancellationToken,
    ) -> Result<String> {
        run_stage(stage, cancel, async {
            self.translator
                .translate(text, from, to, cancel)
                .await
                .map_err(|source| ChainError::Job { stage, source })
        })
        .await
    }
}

/// Run one stage, stopping early on cancellation and recording its duration
async fn run_stage<T>(
    stage: Stage,
    cancel: &CancellationToken,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    let start = Instant::now();

    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ChainError::Cancelled { stage }),
        result = work => result,
    };

    let stage_name: &'static str = stage.into();
    let label = if outcome.is_ok() { "ok" } else { "error" };
    metrics::record_duration(
        metrics::chain_stage_duration(),
        start,
        &[KeyValue::new("stage", stage_name), KeyValue::new("outcome", label)],
    );

    match &outcome {
        Ok(_) => tracing::debug!(%stage, elapsed_ms = start.elapsed().as_millis(), "chain stage complete"),
        Err(e) => tracing::error!(%stage, "chain stage failed: {e}"),
    }

    outcome
}
