//! Core memory store orchestrating embedding and SQLite operations.
//!
//! Provides a high-level, per-user API for storing, recalling, and managing
//! memories with embeddings produced by an injected [`Embedder`].
//!
//! [`Embedder`]: crate::embedding::Embedder

mod crud;
mod scope;
mod search;

// pub(crate): module internals hidden; public items re-exported explicitly via lib.rs
pub(crate) mod store;

pub use scope::UserMemory;
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
