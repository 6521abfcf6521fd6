//! Search operations for the memory store (semantic and substring).

use crate::embedding::TaskType;
use crate::errors::Error;
use crate::memory_types::RecallHit;
use crate::sqlite::Memory;
use crate::sqlite::search::validate_limit;

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or results may be lost"]
    /// Recall memories of `user_id` semantically related to `query`.
    ///
    /// Embeds the query, scores the user's memories by cosine similarity and
    /// keeps those at or above `min_similarity`, best first. Equal scores
    /// keep insertion order.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum hits (1 to 10,000); `None` uses the store default
    /// * `min_similarity` - Threshold in -1.0..=1.0; `None` uses the store default
    ///
    /// Only the `scan_limit` most recently updated memories are scored.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query is empty
    /// - Limit or threshold is out of range
    /// - Embedding generation fails
    /// - Database operations fail
    pub fn recall(
        &self,
        user_id: &str,
        query: &str,
        limit: Option<usize>,
        min_similarity: Option<f64>,
    ) -> Result<Vec<RecallHit>, Error> {
        let limit = limit.unwrap_or(self.options.limit);
        let min_similarity = min_similarity.unwrap_or(self.options.min_similarity);

        // Validate before paying for an embedding call
        validate_limit(limit)?;
        Self::validate_min_similarity(min_similarity)?;
        Self::validate_text(query)?;

        let embedding = self.embed(query, TaskType::Query)?;
        let hits = self.db.search(
            user_id,
            &embedding,
            limit,
            min_similarity,
            self.options.scan_limit,
        )?;
        tracing::debug!(user_id, hits = hits.len(), "recall finished");

        Ok(hits
            .into_iter()
            .map(|(memory, similarity)| RecallHit { memory, similarity })
            .collect())
    }

    #[must_use = "handle the error or results may be lost"]
    /// Case-insensitive substring search over memory content.
    ///
    /// No embedding is computed. Results are most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns error if the query is empty or the limit is out of range.
    pub fn search_by_text(
        &self,
        user_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Memory>, Error> {
        Self::validate_text(query)?;
        Ok(self.db.search_text(user_id, query, limit)?)
    }
}
