//! CRUD operations for the memory store.

use crate::embedding::TaskType;
use crate::errors::Error;
use crate::sqlite::Memory;

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or results may be lost"]
    /// Store a new memory for `user_id`.
    ///
    /// Embeds `content` as a document, then inserts one row with a fresh
    /// UUID and `created_at == updated_at`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content is empty or whitespace-only
    /// - `user_id` is empty
    /// - Embedding generation fails or returns the wrong dimension
    /// - Database operations fail
    ///
    /// No row is written when any of these happen.
    pub fn remember(&self, user_id: &str, content: &str, tags: &[String]) -> Result<Memory, Error> {
        Self::validate_user(user_id)?;
        Self::validate_text(content)?;

        let embedding = self.embed(content, TaskType::Document)?;
        let memory = self.db.insert(user_id, content, tags, &embedding)?;
        tracing::info!(user_id, id = %memory.id, tags = memory.tags.len(), "memory stored");
        Ok(memory)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Get one memory of `user_id` by ID.
    ///
    /// Returns `None` if the memory doesn't exist or belongs to another user.
    pub fn get(&self, user_id: &str, memory_id: &str) -> Result<Option<Memory>, Error> {
        Ok(self.db.get(user_id, memory_id)?)
    }

    #[must_use = "handle the error or results may be lost"]
    /// List memories of `user_id`, most recently updated first.
    ///
    /// # Arguments
    ///
    /// * `tags` - When given and non-empty, keep only memories carrying at
    ///   least one of these tags. Filtering happens before pagination.
    /// * `limit` - Page size (1 to 10,000)
    /// * `offset` - Matching memories to skip
    pub fn list_memories(
        &self,
        user_id: &str,
        tags: Option<&[String]>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Memory>, Error> {
        Ok(self.db.list(user_id, tags, limit, offset)?)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Replace the tags of a memory and refresh its `updated_at`.
    ///
    /// The embedding is left untouched.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the memory was updated
    /// - `Ok(false)` if no such memory exists for `user_id`
    pub fn update_memory_tags(
        &self,
        user_id: &str,
        memory_id: &str,
        tags: &[String],
    ) -> Result<bool, Error> {
        let updated = self.db.update_tags(user_id, memory_id, tags)?;
        if updated {
            tracing::info!(user_id, id = memory_id, "memory tags updated");
        }
        Ok(updated)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Delete a memory.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the memory was deleted
    /// - `Ok(false)` if it didn't exist or belongs to another user
    pub fn forget(&self, user_id: &str, memory_id: &str) -> Result<bool, Error> {
        let deleted = self.db.delete(user_id, memory_id)?;
        if deleted {
            tracing::info!(user_id, id = memory_id, "memory deleted");
        }
        Ok(deleted)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Delete every memory of `user_id`, returning how many were removed.
    pub fn forget_all(&self, user_id: &str) -> Result<usize, Error> {
        let deleted = self.db.delete_all(user_id)?;
        tracing::info!(user_id, deleted, "memories cleared");
        Ok(deleted)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Number of memories stored for `user_id`.
    pub fn get_memory_count(&self, user_id: &str) -> Result<usize, Error> {
        Ok(self.db.count(user_id)?)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Every user with at least one memory, sorted ascending.
    pub fn get_all_users(&self) -> Result<Vec<String>, Error> {
        Ok(self.db.users()?)
    }
}
