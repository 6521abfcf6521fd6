//! Text-to-vector embedders.
//!
//! The memory store only sees the [`Embedder`] trait. Two providers ship with
//! the crate: a local ONNX model ([`OnnxEmbedder`]) and the Gemini embedding
//! API ([`GeminiEmbedder`]). [`FnEmbedder`] adapts any closure.

mod gemini;
mod onnx;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{Config, EmbeddingProvider};
use crate::errors::Error;

pub use gemini::{DEFAULT_GEMINI_DIMENSIONS, DEFAULT_GEMINI_MODEL, GeminiEmbedder};
pub use onnx::{DEFAULT_LOCAL_MODEL, LOCAL_EMBEDDING_DIMS, OnnxEmbedder};

/// Role of the text being embedded.
///
/// Retrieval models produce asymmetric vectors: stored facts and the
/// questions used to find them are embedded differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Text that will be stored and matched against later.
    Document,
    /// Text used to search stored documents.
    Query,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Document => write!(f, "document"),
            TaskType::Query => write!(f, "query"),
        }
    }
}

/// Maps text to a fixed-length vector.
///
/// Implementations must return exactly [`Embedder::dimensions`] values for
/// every successful call. Failures are returned as-is; the store never
/// retries.
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder produces.
    fn dimensions(&self) -> usize;

    /// Embed `text` for the given role.
    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error>;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        (**self).embed(text, task)
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        (**self).embed(text, task)
    }
}

/// Embedder backed by a plain function or closure.
pub struct FnEmbedder<F> {
    dimensions: usize,
    embed_fn: F,
}

impl<F> FnEmbedder<F>
where
    F: Fn(&str, TaskType) -> Result<Vec<f32>, Error> + Send + Sync,
{
    pub fn new(dimensions: usize, embed_fn: F) -> Self {
        Self {
            dimensions,
            embed_fn,
        }
    }
}

impl<F> fmt::Debug for FnEmbedder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEmbedder")
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

impl<F> Embedder for FnEmbedder<F>
where
    F: Fn(&str, TaskType) -> Result<Vec<f32>, Error> + Send + Sync,
{
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        (self.embed_fn)(text, task)
    }
}

/// Build the embedder selected by `config.embedding_provider`.
///
/// # Errors
///
/// Returns error if the local model cannot be loaded or the Gemini provider
/// has no API key.
pub fn from_config(config: &Config) -> Result<Box<dyn Embedder>, Error> {
    match config.embedding_provider {
        EmbeddingProvider::Local => Ok(Box::new(OnnxEmbedder::new(
            &config.embedding_model,
            &config.model_cache,
        )?)),
        EmbeddingProvider::Gemini => Ok(Box::new(GeminiEmbedder::from_config(config)?)),
    }
}

/// Vector length the configured provider produces, known without building it.
pub fn configured_dimensions(config: &Config) -> usize {
    match config.embedding_provider {
        EmbeddingProvider::Local => LOCAL_EMBEDDING_DIMS,
        EmbeddingProvider::Gemini => config.gemini_dimensions,
    }
}

pub(crate) fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|&x| x * x).sum::<f32>().sqrt();
    let norm = norm.max(1e-9);

    vec.iter().map(|&x| x / norm).collect()
}
