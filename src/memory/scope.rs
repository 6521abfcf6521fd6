//! Request-scoped access to one user's memories.

use crate::errors::Error;
use crate::memory_types::RecallHit;
use crate::sqlite::Memory;

use super::store::MemoryStore;

/// A [`MemoryStore`] bound to one user.
///
/// Callers that act on behalf of a single user (a chat turn, a CLI
/// invocation) pass this handle around instead of threading `user_id`
/// through every call. It is cheap to create and copy.
#[derive(Debug, Clone, Copy)]
pub struct UserMemory<'a> {
    store: &'a MemoryStore,
    user_id: &'a str,
}

impl MemoryStore {
    /// Scope the store to `user_id`.
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> UserMemory<'a> {
        UserMemory {
            store: self,
            user_id,
        }
    }
}

impl<'a> UserMemory<'a> {
    /// The user every operation acts on.
    pub fn user_id(&self) -> &'a str {
        self.user_id
    }

    /// The underlying store.
    pub fn store(&self) -> &'a MemoryStore {
        self.store
    }

    pub fn remember(&self, content: &str, tags: &[String]) -> Result<Memory, Error> {
        self.store.remember(self.user_id, content, tags)
    }

    pub fn recall(
        &self,
        query: &str,
        limit: Option<usize>,
        min_similarity: Option<f64>,
    ) -> Result<Vec<RecallHit>, Error> {
        self.store.recall(self.user_id, query, limit, min_similarity)
    }

    pub fn get(&self, memory_id: &str) -> Result<Option<Memory>, Error> {
        self.store.get(self.user_id, memory_id)
    }

    pub fn list_memories(
        &self,
        tags: Option<&[String]>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Memory>, Error> {
        self.store.list_memories(self.user_id, tags, limit, offset)
    }

    pub fn search_by_text(&self, query: &str, limit: usize) -> Result<Vec<Memory>, Error> {
        self.store.search_by_text(self.user_id, query, limit)
    }

    pub fn update_memory_tags(&self, memory_id: &str, tags: &[String]) -> Result<bool, Error> {
        self.store.update_memory_tags(self.user_id, memory_id, tags)
    }

    pub fn forget(&self, memory_id: &str) -> Result<bool, Error> {
        self.store.forget(self.user_id, memory_id)
    }

    pub fn forget_all(&self) -> Result<usize, Error> {
        self.store.forget_all(self.user_id)
    }

    pub fn get_memory_count(&self) -> Result<usize, Error> {
        self.store.get_memory_count(self.user_id)
    }
}
