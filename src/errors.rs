//! Error types for homelab-memory.

use thiserror::Error;

/// Main error type for memory operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage failure, including the underlying SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] crate::sqlite::Error),

    /// Embedding provider returned an unusable result.
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// HTTP failure talking to a remote embedding provider.
    #[error("Embedding request failed: {0}")]
    Http(#[from] ureq::Error),

    /// ONNX inference error.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Tokenization error.
    #[error("Tokenization error: {0}")]
    Tokenization(#[from] tokenizers::Error),

    /// ONNX session error.
    #[error("ONNX session error: {0}")]
    Onnx(#[from] ort::Error),

    /// HuggingFace Hub error.
    #[error("HuggingFace Hub error: {0}")]
    HfHub(#[from] hf_hub::api::sync::ApiError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or whitespace-only text where content is required.
    #[error("Input cannot be empty")]
    EmptyInput,

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Memory not found (CLI lookups; the store reports absence as false/None).
    #[error("Memory not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True when the embedding provider, not storage or input, failed.
    pub fn is_embedding_failure(&self) -> bool {
        matches!(
            self,
            Error::Embedding(_)
                | Error::Http(_)
                | Error::Inference(_)
                | Error::Tokenization(_)
                | Error::Onnx(_)
                | Error::HfHub(_)
        )
    }
}
