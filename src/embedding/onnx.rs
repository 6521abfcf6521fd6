//! Local ONNX embedding engine.
//!
//! Uses bge-small-en-v1.5 (384 dimensions) with mean pooling and L2
//! normalization. Model files come from the HuggingFace hub and are cached
//! under the configured model cache directory.

use std::path::Path;
use std::sync::Mutex;

use hf_hub::api::sync::ApiBuilder;
use ort::inputs;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};

use super::{Embedder, TaskType, l2_normalize};
use crate::errors::Error;

/// Embedding dimensions for bge-small-en-v1.5.
pub const LOCAL_EMBEDDING_DIMS: usize = 384;

/// Default HuggingFace model for local embeddings.
pub const DEFAULT_LOCAL_MODEL: &str = "BAAI/bge-small-en-v1.5";

/// Instruction bge models expect in front of retrieval queries.
const QUERY_INSTRUCTION: &str = "Represent this sentence for searching relevant passages: ";

const MAX_TOKENS: usize = 512;

/// ONNX embedding engine.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex
/// and concurrent callers embed one at a time.
pub struct OnnxEmbedder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    requires_token_type_ids: bool,
}

impl std::fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbedder")
            .field("requires_token_type_ids", &self.requires_token_type_ids)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbedder {
    /// Load model from cache or download on first use.
    ///
    /// Uses the blocking `hf_hub` API; files are only downloaded once.
    pub fn new(model_id: &str, cache_dir: &Path) -> Result<Self, Error> {
        let api = ApiBuilder::new()
            .with_cache_dir(cache_dir.to_path_buf())
            .build()?;
        let repo = api.model(model_id.to_string());

        let model_path = repo
            .get("onnx/model.onnx")
            .or_else(|_| repo.get("model.onnx"))?;
        let tokenizer_path = repo.get("tokenizer.json")?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(ort::Error::from)?
            .commit_from_file(&model_path)?;

        let requires_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        tracing::info!(model_id, "local embedding model loaded");

        Ok(OnnxEmbedder {
            session: Mutex::new(session),
            tokenizer,
            requires_token_type_ids,
        })
    }

    fn run(&self, text: &str) -> Result<Vec<f32>, Error> {
        let encoding = self.tokenizer.encode(text, true)?;
        let input_ids = encoding.get_ids();
        let attention_mask = encoding.get_attention_mask();

        if input_ids.is_empty() {
            return Err(Error::Inference("Tokenizer produced no tokens".to_string()));
        }

        let seq_len = input_ids.len();

        let input_ids_vec: Vec<i64> = input_ids.iter().map(|&id| i64::from(id)).collect();
        let attention_mask_vec: Vec<i64> = attention_mask.iter().map(|&m| i64::from(m)).collect();

        let input_ids_tensor = Tensor::from_array(([1usize, seq_len], input_ids_vec))?;
        let attention_mask_tensor = Tensor::from_array(([1usize, seq_len], attention_mask_vec))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Inference("ONNX session lock poisoned".to_string()))?;

        let outputs = if self.requires_token_type_ids {
            let token_type_ids_tensor =
                Tensor::from_array(([1usize, seq_len], vec![0i64; seq_len]))?;
            session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])?
        } else {
            session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])?
        };

        let (shape, data) = outputs
            .get("last_hidden_state")
            .or_else(|| outputs.get("token_embeddings"))
            .ok_or_else(|| {
                Error::Inference(
                    "Output tensor 'last_hidden_state' or 'token_embeddings' not found".to_string(),
                )
            })?
            .try_extract_tensor::<f32>()?;

        if shape.len() != 3 {
            return Err(Error::Inference(format!(
                "Expected 3D output (batch, seq_len, hidden), got {:?}",
                shape
            )));
        }

        let batch_size = shape[0] as usize;
        let hidden_dim = shape[2] as usize;

        if batch_size != 1 || hidden_dim != LOCAL_EMBEDDING_DIMS {
            return Err(Error::Inference(format!(
                "Unexpected output shape: {:?}, batch=1, hidden={} expected",
                shape, LOCAL_EMBEDDING_DIMS
            )));
        }

        Ok(l2_normalize(&mean_pool(data, attention_mask, hidden_dim)))
    }
}

/// Average token vectors, weighting each by its attention mask value.
fn mean_pool(data: &[f32], attention_mask: &[u32], hidden_dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden_dim];

    for (chunk, &mask) in data.chunks(hidden_dim).zip(attention_mask.iter()) {
        let mask_value = mask as f32;
        for (pooled_value, &value) in pooled.iter_mut().zip(chunk.iter()) {
            *pooled_value += value * mask_value;
        }
    }

    let mask_sum: f32 = attention_mask
        .iter()
        .map(|&m| m as f32)
        .sum::<f32>()
        .max(1e-9);

    for value in pooled.iter_mut() {
        *value /= mask_sum;
    }
    pooled
}

impl Embedder for OnnxEmbedder {
    fn dimensions(&self) -> usize {
        LOCAL_EMBEDDING_DIMS
    }

    /// Texts exceeding 512 tokens are silently truncated.
    fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        let result = match task {
            TaskType::Document => self.run(text),
            TaskType::Query => self.run(&format!("{QUERY_INSTRUCTION}{text}")),
        };
        if let Err(e) = &result {
            tracing::error!(error = %e, %task, "local embedding failed");
        }
        result
    }
}
