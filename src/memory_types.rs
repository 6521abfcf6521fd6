//! Memory store data types.

use serde::Serialize;

use crate::sqlite::Memory;

/// One semantic recall result.
///
/// Returned by `MemoryStore::recall()`, best match first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecallHit {
    /// The matching memory.
    #[serde(flatten)]
    pub memory: Memory,
    /// Cosine similarity between the query and the memory (-1.0 to 1.0).
    pub similarity: f64,
}

/// Defaults applied when a recall leaves limit or threshold unspecified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallOptions {
    /// Number of hits returned when the caller gives no limit.
    pub limit: usize,
    /// Similarity floor used when the caller gives none.
    pub min_similarity: f64,
    /// Most recently updated memories scored per recall.
    pub scan_limit: usize,
}
