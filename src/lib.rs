//! homelab-memory - Per-user semantic memory for a homelab assistant.
//!
//! This crate stores short text memories per user in SQLite, with an
//! embedding for each, and recalls them by cosine similarity, substring
//! match, or tag. All operations are synchronous and take `&self`.
//!
//! # Example
//!
//! ```no_run
//! use homelab_memory::{Config, MemoryStore};
//!
//! let config = Config::load().expect("invalid configuration");
//! let store = MemoryStore::from_config(&config).expect("failed to open store");
//!
//! let alice = store.for_user("alice");
//! alice
//!     .remember("Likes dark roast coffee", &["preference".to_string()])
//!     .expect("failed to store");
//!
//! for hit in alice.recall("What coffee do I like?", None, None).unwrap() {
//!     println!("{:.2}: {}", hit.similarity, hit.memory.content);
//! }
//! ```
//!
//! Any [`Embedder`] can back the store; tests and embedding services outside
//! this crate can plug in a closure through [`FnEmbedder`].

pub mod config;
pub mod embedding;
pub mod errors;
pub mod identity;
pub mod memory;
pub mod memory_types;
mod sqlite;
pub mod tracing_init;

// Re-export public API
pub use config::{Config, EmbeddingProvider};
pub use embedding::{Embedder, FnEmbedder, GeminiEmbedder, OnnxEmbedder, TaskType};
pub use errors::Error;
pub use memory::store::{
    DEFAULT_LIST_LIMIT, DEFAULT_MIN_SIMILARITY, DEFAULT_RECALL_LIMIT, DEFAULT_SCAN_LIMIT,
    DEFAULT_TEXT_SEARCH_LIMIT, EmbedderFactory, MAX_SEARCH_LIMIT,
};
pub use memory::{MemoryStore, UserMemory};
pub use memory_types::{RecallHit, RecallOptions};
pub use sqlite::{Error as StorageError, Memory, cosine_similarity};
