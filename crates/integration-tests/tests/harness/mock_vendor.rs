//! Mock vendor server for integration tests
//!
//! Serves the chat completion API together with the translation and speech
//! job APIs. Job statuses follow a per-service script and every endpoint
//! counts its calls.

use std::{
    collections::HashMap,
    io::Cursor,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing,
};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Mock of every vendor the gateway talks to
pub struct MockVendor {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

/// Per-service knobs applied when the mock starts
pub struct MockVendorBuilder {
    completion: Option<String>,
    translate_statuses: Vec<&'static str>,
    tts_statuses: Vec<&'static str>,
    tts_content_type: &'static str,
}

#[derive(Default)]
struct Counters {
    submits: AtomicU32,
    polls: AtomicU32,
    results: AtomicU32,
}

impl Counters {
    fn get(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::Relaxed)
    }
}

struct Job {
    text: String,
    target_language: Option<u32>,
    polls: usize,
}

struct JobService {
    statuses: Vec<&'static str>,
    jobs: Mutex<HashMap<String, Job>>,
    counters: Counters,
}

impl JobService {
    fn new(statuses: Vec<&'static str>) -> Self {
        Self {
            statuses,
            jobs: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    fn submit(&self, prefix: &str, text: String, target_language: Option<u32>) -> String {
        let n = self.counters.submits.fetch_add(1, Ordering::Relaxed) + 1;
        let task_id = format!("{prefix}-{n}");
        self.jobs.lock().unwrap().insert(
            task_id.clone(),
            Job {
                text,
                target_language,
                polls: 0,
            },
        );
        task_id
    }

    /// Next scripted status for `task_id`, repeating the last entry
    fn poll(&self, task_id: &str) -> Option<&'static str> {
        self.counters.polls.fetch_add(1, Ordering::Relaxed);
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs.get_mut(task_id)?;
        let status = self.statuses[job.polls.min(self.statuses.len() - 1)];
        job.polls += 1;
        Some(status)
    }

    fn polls_for(&self, task_id: &str) -> usize {
        self.jobs.lock().unwrap().get(task_id).map_or(0, |job| job.polls)
    }

    fn take_result(&self, run_id: &str) -> Option<(String, Option<u32>)> {
        self.counters.results.fetch_add(1, Ordering::Relaxed);
        let task_id = run_id.strip_prefix("run-")?;
        let jobs = self.jobs.lock().unwrap();
        jobs.get(task_id).map(|job| (job.text.clone(), job.target_language))
    }
}

struct MockState {
    completion: Option<String>,
    completion_count: AtomicU32,
    last_messages: Mutex<Option<serde_json::Value>>,
    translate: JobService,
    tts: JobService,
    tts_content_type: &'static str,
}

impl MockVendor {
    pub fn builder() -> MockVendorBuilder {
        MockVendorBuilder {
            completion: Some("The answer".to_owned()),
            translate_statuses: vec!["SUCCESS"],
            tts_statuses: vec!["SUCCESS"],
            tts_content_type: "audio/wav",
        }
    }

    /// Start a mock where every job succeeds on its first poll
    pub async fn start() -> anyhow::Result<Self> {
        Self::builder().start().await
    }

    /// Base URL of the completion API, including `/v1`
    pub fn llm_base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Base URL of the job APIs
    pub fn jobs_base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// `messages` array of the last completion request
    pub fn last_messages(&self) -> Option<serde_json::Value> {
        self.state.last_messages.lock().unwrap().clone()
    }

    pub fn translate_submits(&self) -> u32 {
        Counters::get(&self.state.translate.counters.submits)
    }

    pub fn translate_polls(&self) -> u32 {
        Counters::get(&self.state.translate.counters.polls)
    }

    /// Status polls made for one translation task
    pub fn translate_polls_for(&self, task_id: &str) -> usize {
        self.state.translate.polls_for(task_id)
    }

    pub fn translate_results(&self) -> u32 {
        Counters::get(&self.state.translate.counters.results)
    }

    pub fn tts_submits(&self) -> u32 {
        Counters::get(&self.state.tts.counters.submits)
    }

    pub fn tts_polls(&self) -> u32 {
        Counters::get(&self.state.tts.counters.polls)
    }

    pub fn tts_results(&self) -> u32 {
        Counters::get(&self.state.tts.counters.results)
    }

    /// Total calls across every endpoint
    pub fn total_calls(&self) -> u32 {
        self.completion_count()
            + self.translate_submits()
            + self.translate_polls()
            + self.translate_results()
            + self.tts_submits()
            + self.tts_polls()
            + self.tts_results()
    }
}

impl MockVendorBuilder {
    /// Completion text, or `None` to answer without `choices`
    pub fn completion(mut self, content: Option<&str>) -> Self {
        self.completion = content.map(str::to_owned);
        self
    }

    pub fn translate_statuses(mut self, statuses: &[&'static str]) -> Self {
        self.translate_statuses = statuses.to_vec();
        self
    }

    pub fn tts_statuses(mut self, statuses: &[&'static str]) -> Self {
        self.tts_statuses = statuses.to_vec();
        self
    }

    /// Content type of speech results, which still carry the WAV fixture
    pub fn tts_content_type(mut self, content_type: &'static str) -> Self {
        self.tts_content_type = content_type;
        self
    }

    pub async fn start(self) -> anyhow::Result<MockVendor> {
        let state = Arc::new(MockState {
            completion: self.completion,
            completion_count: AtomicU32::new(0),
            last_messages: Mutex::new(None),
            translate: JobService::new(self.translate_statuses),
            tts: JobService::new(self.tts_statuses),
            tts_content_type: self.tts_content_type,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/translate", routing::post(handle_translate_submit))
            .route("/translate/status/{task_id}", routing::get(handle_translate_status))
            .route("/translate/result/{run_id}", routing::get(handle_translate_result))
            .route("/tts", routing::post(handle_tts_submit))
            .route("/tts/status/{task_id}", routing::get(handle_tts_status))
            .route("/tts/result/{run_id}", routing::get(handle_tts_result))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockVendor { addr, shutdown, state })
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Short mono sine tone, as the speech vendor would return
pub fn wav_fixture() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec).unwrap();
        for n in 0..4_000_u32 {
            let t = n as f32 / 16_000.0;
            let sample = ((t * 440.0 * std::f32::consts::TAU).sin() * 8_000.0) as i16;
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    buffer
}

// -- Handlers --

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    *state.last_messages.lock().unwrap() = body.get("messages").cloned();

    match &state.completion {
        Some(content) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })),
        None => Json(json!({ "id": "chatcmpl-mock", "object": "chat.completion" })),
    }
}

#[derive(Deserialize)]
struct TranslateBody {
    text: String,
    #[allow(dead_code)]
    source_language: u32,
    target_language: u32,
}

#[derive(Deserialize)]
struct TtsBody {
    text: String,
    #[allow(dead_code)]
    voice_id: String,
    #[allow(dead_code)]
    language: u32,
}

async fn handle_translate_submit(
    State(state): State<Arc<MockState>>,
    Json(body): Json<TranslateBody>,
) -> Json<serde_json::Value> {
    let task_id = state.translate.submit("tr", body.text, Some(body.target_language));
    Json(json!({ "task_id": task_id }))
}

async fn handle_translate_status(State(state): State<Arc<MockState>>, Path(task_id): Path<String>) -> Response {
    status_response(&state.translate, &task_id)
}

/// Echo the submitted text tagged with its target language
async fn handle_translate_result(State(state): State<Arc<MockState>>, Path(run_id): Path<String>) -> Response {
    match state.translate.take_result(&run_id) {
        Some((text, target)) => Json(json!({ "text": format!("{text} [{}]", target.unwrap_or_default()) })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_tts_submit(State(state): State<Arc<MockState>>, Json(body): Json<TtsBody>) -> Json<serde_json::Value> {
    let task_id = state.tts.submit("tts", body.text, None);
    Json(json!({ "task_id": task_id }))
}

async fn handle_tts_status(State(state): State<Arc<MockState>>, Path(task_id): Path<String>) -> Response {
    status_response(&state.tts, &task_id)
}

async fn handle_tts_result(State(state): State<Arc<MockState>>, Path(run_id): Path<String>) -> Response {
    match state.tts.take_result(&run_id) {
        Some(_) => ([(header::CONTENT_TYPE, state.tts_content_type)], wav_fixture()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn status_response(service: &JobService, task_id: &str) -> Response {
    match service.poll(task_id) {
        Some(status) if status.eq_ignore_ascii_case("success") => {
            Json(json!({ "status": status, "run_id": format!("run-{task_id}") })).into_response()
        }
        Some(status) => Json(json!({ "status": status })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
