//! Gemini `embedContent` client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Embedder, TaskType};
use crate::config::Config;
use crate::errors::Error;

/// Default Gemini embedding model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-embedding-001";

/// Output dimensionality requested from Gemini unless configured otherwise.
pub const DEFAULT_GEMINI_DIMENSIONS: usize = 768;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
    output_dimensionality: usize,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

fn gemini_task_type(task: TaskType) -> &'static str {
    match task {
        TaskType::Document => "RETRIEVAL_DOCUMENT",
        TaskType::Query => "RETRIEVAL_QUERY",
    }
}

/// Remote embedder calling the Gemini API.
///
/// One blocking HTTP request per call, bounded by a global timeout. No retry:
/// the caller decides what to do with a failure.
pub struct GeminiEmbedder {
    api_key: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    base_url: String,
}

impl std::fmt::Debug for GeminiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiEmbedder")
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiEmbedder {
    pub fn new(api_key: &str, model: &str, dimensions: usize, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            dimensions,
            timeout,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = config
            .google_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Gemini embeddings need an API key (google_api_key or GOOGLE_API_KEY)"
                        .to_string(),
                )
            })?;
        Ok(Self::new(
            api_key,
            &config.gemini_model,
            config.gemini_dimensions,
            Duration::from_secs(config.embedding_timeout_secs),
        ))
    }

    /// Point the client at another endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:embedContent", self.base_url, self.model)
    }

    fn request_body<'a>(&self, text: &'a str, task: TaskType) -> EmbedContentRequest<'a> {
        EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: [Part { text }],
            },
            task_type: gemini_task_type(task),
            output_dimensionality: self.dimensions,
        }
    }

    fn check_response(&self, response: EmbedContentResponse) -> Result<Vec<f32>, Error> {
        let values = response.embedding.values;
        if values.len() != self.dimensions {
            return Err(Error::Embedding(format!(
                "Gemini returned {} dimensions, expected {}",
                values.len(),
                self.dimensions
            )));
        }
        Ok(values)
    }

    fn request(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        let body = self.request_body(text, task);
        let mut response = ureq::post(&self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .config()
            .timeout_global(Some(self.timeout))
            .build()
            .send_json(&body)?;
        let parsed: EmbedContentResponse = response.body_mut().read_json()?;
        self.check_response(parsed)
    }
}

impl Embedder for GeminiEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        let result = self.request(text, task);
        if let Err(e) = &result {
            tracing::error!(error = %e, model = %self.model, %task, "Gemini embedding failed");
        }
        result
    }
}
