//! Remote text generation for interviewer lines.
//!
//! One concern: turn "say something to the candidate" into an HTTP call
//! against hosted text-generation models, with per-model retries, a model
//! chain that falls over when a model misbehaves, and a guaranteed local
//! fallback. The caller always ends up with a usable line; remote failures
//! are logged and never surfaced to the conversation.
//!
//! # Model chain
//!
//! Models are tried in order. A model is skipped when it fails its HTTP
//! budget (see [`retry`]) or when its completion fails the quality gates:
//! the raw generation must exceed [`MIN_RAW_COMPLETION_CHARS`] and the
//! cleaned text must still exceed [`MIN_CLEANED_COMPLETION_CHARS`] after
//! the dialogue scaffolding is stripped.

pub mod retry;

use std::sync::OnceLock;
use std::time::Duration;

use coach_types::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::retry::{RetryConfig, RetryOutcome, send_with_retry};

/// Hosted inference endpoint; the model name completes the path.
pub const DEFAULT_INFERENCE_BASE_URL: &str =
    "https://api-inference.huggingface.co/pipeline/text-generation";

/// Models tried in order. Small models answer fastest on the free tier.
pub const DEFAULT_MODEL_CHAIN: &[&str] =
    &["facebook/opt-350m", "gpt2", "EleutherAI/gpt-neo-125M"];

/// Raw completions at or under this length are treated as a miss.
pub const MIN_RAW_COMPLETION_CHARS: usize = 20;
/// Cleanup must leave more than this behind or the completion is a miss.
pub const MIN_CLEANED_COMPLETION_CHARS: usize = 15;

const MAX_NEW_TOKENS: u32 = 50;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 100;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client: {e}. Attempting minimal fallback.");
            reqwest::Client::builder()
                .build()
                .expect("Minimal HTTP client must build")
        })
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
}

// ============================================================================
// Credentials
// ============================================================================

/// Bearer token for the inference API.
///
/// `Debug` output is redacted; the raw value only leaves through
/// [`ApiToken::expose_secret`].
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerationConfigError {
    #[error("model chain must contain at least one model")]
    EmptyModelChain,
}

/// Client configuration: endpoint, credentials, model chain, budgets.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    base_url: String,
    token: Option<ApiToken>,
    models: Vec<String>,
    timeout: Duration,
    retry: RetryConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            token: None,
            models: DEFAULT_MODEL_CHAIN.iter().map(|m| (*m).to_string()).collect(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Replace the model chain. The chain must not be empty; an empty chain
    /// would make every generation a silent no-op.
    pub fn with_models(mut self, models: Vec<String>) -> Result<Self, GenerationConfigError> {
        if models.is_empty() {
            return Err(GenerationConfigError::EmptyModelChain);
        }
        self.models = models;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why one model in the chain failed to produce a usable line.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("model {model} returned HTTP {status}")]
    Http {
        model: String,
        status: reqwest::StatusCode,
    },
    #[error("request to {model} failed after {attempts} attempts: {source}")]
    Connection {
        model: String,
        attempts: u32,
        source: reqwest::Error,
    },
    #[error("request to {model} failed: {source}")]
    Transport {
        model: String,
        source: reqwest::Error,
    },
    #[error("model {model} returned an unparseable body: {source}")]
    Body {
        model: String,
        source: reqwest::Error,
    },
    #[error("model {model} returned an unusable completion")]
    UnusableCompletion { model: String },
    #[error("model chain is empty")]
    EmptyChain,
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    do_sample: bool,
    top_p: f64,
    return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
            do_sample: true,
            top_p: TOP_P,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Completion {
    generated_text: String,
}

/// Completion endpoints answer with either a one-element array or a bare
/// object depending on the model backend.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompletionBody {
    Many(Vec<Completion>),
    One(Completion),
}

impl CompletionBody {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Many(list) => list.into_iter().next().map(|c| c.generated_text),
            Self::One(completion) => Some(completion.generated_text),
        }
    }
}

// ============================================================================
// Completion cleanup
// ============================================================================

/// Frame the coach line as a dialogue turn so small completion models
/// continue it in character.
fn dialogue_prompt(prompt: &str) -> String {
    format!("Interviewer: {prompt}\nCandidate:")
}

/// Byte-oriented case-insensitive search.
///
/// The needle must be ASCII, which keeps every reported position on a char
/// boundary: a window starting inside a multi-byte char begins with a
/// continuation byte and can never match an ASCII needle.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    debug_assert!(needle.is_ascii());
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Strip the dialogue scaffolding a completion tends to echo back.
///
/// First the whole `Interviewer: ... Candidate:` span is removed, then one
/// remaining bare `Candidate:` marker, then the ends are trimmed.
fn clean_completion(raw: &str) -> String {
    const CANDIDATE_AFTER_BREAK: &str = "\ncandidate:";
    const CANDIDATE: &str = "candidate:";

    let mut text = raw.to_string();

    if let Some(start) = find_ascii_ci(&text, "interviewer:")
        && let Some(offset) = find_ascii_ci(&text[start..], CANDIDATE_AFTER_BREAK)
    {
        text.replace_range(start..start + offset + CANDIDATE_AFTER_BREAK.len(), "");
    }

    if let Some(start) = find_ascii_ci(&text, CANDIDATE) {
        text.replace_range(start..start + CANDIDATE.len(), "");
    }

    text.trim().to_string()
}

/// Apply the quality gates to a raw completion.
fn accept_completion(raw: &str) -> Option<NonEmptyString> {
    if raw.chars().count() <= MIN_RAW_COMPLETION_CHARS {
        return None;
    }
    let cleaned = clean_completion(raw);
    if cleaned.chars().count() <= MIN_CLEANED_COMPLETION_CHARS {
        return None;
    }
    NonEmptyString::new(cleaned).ok()
}

// ============================================================================
// Client
// ============================================================================

/// Text-generation client over a model chain.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    config: GenerationConfig,
}

impl GenerationClient {
    #[must_use]
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    fn request(&self, model: &str, prompt: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.config.base_url, model);
        let body = GenerationRequest {
            inputs: dialogue_prompt(prompt),
            parameters: GenerationParameters::default(),
        };

        let mut builder = http_client()
            .post(&url)
            .timeout(self.config.timeout)
            .json(&body);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    async fn try_model(&self, model: &str, prompt: &str) -> Result<NonEmptyString, GenerationError> {
        let outcome = send_with_retry(|| self.request(model, prompt), &self.config.retry).await;

        let response = match outcome {
            RetryOutcome::Success(response) => response,
            RetryOutcome::HttpError(response) => {
                return Err(GenerationError::Http {
                    model: model.to_string(),
                    status: response.status(),
                });
            }
            RetryOutcome::ConnectionError { attempts, source } => {
                return Err(GenerationError::Connection {
                    model: model.to_string(),
                    attempts,
                    source,
                });
            }
            RetryOutcome::NonRetryable(source) => {
                return Err(GenerationError::Transport {
                    model: model.to_string(),
                    source,
                });
            }
        };

        let body: CompletionBody =
            response
                .json()
                .await
                .map_err(|source| GenerationError::Body {
                    model: model.to_string(),
                    source,
                })?;

        body.into_text()
            .as_deref()
            .and_then(accept_completion)
            .ok_or_else(|| GenerationError::UnusableCompletion {
                model: model.to_string(),
            })
    }

    /// Generate one interviewer line, walking the model chain in order.
    ///
    /// Returns the first completion that passes the quality gates. On
    /// failure the error describes why the last model gave up; earlier
    /// failures are logged as they happen.
    pub async fn generate(&self, prompt: &str) -> Result<NonEmptyString, GenerationError> {
        let mut last_error = None;
        for model in self.config.models() {
            match self.try_model(model, prompt).await {
                Ok(text) => {
                    tracing::debug!(model, "Remote completion accepted");
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!(model, %error, "Model failed, trying next in chain");
                    last_error = Some(error);
                }
            }
        }
        Err(last_error.unwrap_or(GenerationError::EmptyChain))
    }

    /// Generate one interviewer line, falling back to the supplied local
    /// line when the whole chain fails. Failures are logged, never
    /// surfaced.
    pub async fn generate_or(&self, prompt: &str, fallback: NonEmptyString) -> NonEmptyString {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(%error, "All models failed, using local reply");
                fallback
            }
        }
    }

    /// One full generation round against the chain, as a connectivity
    /// check.
    pub async fn probe(&self) -> bool {
        self.generate("Test connection").await.is_ok()
    }
}
