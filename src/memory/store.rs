//! Core memory store struct combining embedding generation and persistence.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::config::Config;
use crate::embedding::{self, Embedder, TaskType};
use crate::errors::Error;
use crate::memory_types::RecallOptions;
use crate::sqlite::Database;

pub use crate::sqlite::search::MAX_SEARCH_LIMIT;

/// Hits returned by a recall without an explicit limit.
pub const DEFAULT_RECALL_LIMIT: usize = 5;
/// Similarity floor for a recall without an explicit threshold.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;
/// Most recently updated memories scored by one recall.
pub const DEFAULT_SCAN_LIMIT: usize = 10_000;
/// Page size for listing.
pub const DEFAULT_LIST_LIMIT: usize = 100;
/// Result cap for substring search.
pub const DEFAULT_TEXT_SEARCH_LIMIT: usize = 10;

impl Default for RecallOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECALL_LIMIT,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

/// Builds the embedder the first time a store operation needs one.
pub type EmbedderFactory = Box<dyn Fn() -> Result<Box<dyn Embedder>, Error> + Send + Sync>;

/// Per-user memory store combining embedding generation and persistence.
///
/// Wraps a SQLite database and an [`Embedder`]. Every operation takes
/// `&self`; the store is `Send + Sync` and can be shared between threads
/// behind an `Arc`. Embedding happens before the database lock is taken, so
/// a slow or failing embedder never holds up readers and never leaves a
/// partial row behind.
///
/// Only `remember` and `recall` touch the embedder. A store opened with
/// [`MemoryStore::open_lazy`] builds it on first use, so listing, text
/// search and deletion work without a model or network.
pub struct MemoryStore {
    pub(crate) db: Database,
    embedder: OnceLock<Box<dyn Embedder>>,
    factory: Option<EmbedderFactory>,
    init: Mutex<()>,
    pub(crate) options: RecallOptions,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("dimensions", &self.db.dimensions())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Open (or create) a store at `db_path` using `embedder`.
    ///
    /// The database dimension is taken from `embedder.dimensions()`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database path contains path traversal sequences (e.g., "../")
    /// - The parent directory cannot be created
    /// - Database cannot be opened
    pub fn open<E>(db_path: &Path, embedder: E) -> Result<Self, Error>
    where
        E: Embedder + 'static,
    {
        let db = Self::open_database(db_path, embedder.dimensions())?;
        let boxed: Box<dyn Embedder> = Box::new(embedder);
        Ok(MemoryStore {
            db,
            embedder: OnceLock::from(boxed),
            factory: None,
            init: Mutex::new(()),
            options: RecallOptions::default(),
        })
    }

    /// Open (or create) a store whose embedder is built by `factory` on the
    /// first `remember` or `recall`.
    ///
    /// `dimensions` fixes the stored vector length up front. A factory error
    /// is returned by the operation that needed the embedder and retried on
    /// the next one.
    ///
    /// # Errors
    ///
    /// Same as [`MemoryStore::open`]; the factory is not called here.
    pub fn open_lazy<F>(db_path: &Path, dimensions: usize, factory: F) -> Result<Self, Error>
    where
        F: Fn() -> Result<Box<dyn Embedder>, Error> + Send + Sync + 'static,
    {
        let db = Self::open_database(db_path, dimensions)?;
        Ok(MemoryStore {
            db,
            embedder: OnceLock::new(),
            factory: Some(Box::new(factory)),
            init: Mutex::new(()),
            options: RecallOptions::default(),
        })
    }

    fn open_database(db_path: &Path, dimensions: usize) -> Result<Database, Error> {
        use std::path::Component;

        // Reject parent directory components (works on all platforms)
        if db_path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(Error::Config(
                "Invalid database path: contains '..' which may escape the intended directory"
                    .to_string(),
            ));
        }

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Invalid database path: cannot create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Database::open(db_path, dimensions)?)
    }

    /// Open the store described by `config`.
    ///
    /// The configured embedder is built lazily, so a missing model or API
    /// key only fails `remember` and `recall`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let embedder_config = config.clone();
        let store = Self::open_lazy(
            &config.database_path,
            embedding::configured_dimensions(config),
            move || embedding::from_config(&embedder_config),
        )?;
        Ok(store.with_recall_options(RecallOptions {
            limit: config.recall_limit,
            min_similarity: config.min_similarity,
            scan_limit: config.recall_scan_limit,
        }))
    }

    /// Replace the recall defaults.
    #[must_use]
    pub fn with_recall_options(mut self, options: RecallOptions) -> Self {
        self.options = options;
        self
    }

    /// Recall defaults in effect.
    pub fn recall_options(&self) -> RecallOptions {
        self.options
    }

    /// Vector length stored by this store.
    pub fn dimensions(&self) -> usize {
        self.db.dimensions()
    }

    /// The embedder, building it on first use.
    pub(crate) fn embedder(&self) -> Result<&dyn Embedder, Error> {
        if let Some(embedder) = self.embedder.get() {
            return Ok(&**embedder);
        }

        let _guard = self
            .init
            .lock()
            .map_err(|_| Error::Embedding("embedder initialization poisoned".to_string()))?;
        if let Some(embedder) = self.embedder.get() {
            return Ok(&**embedder);
        }

        let factory = self
            .factory
            .as_ref()
            .ok_or_else(|| Error::Embedding("no embedder configured".to_string()))?;
        let built = factory()?;
        if built.dimensions() != self.dimensions() {
            return Err(Error::Config(format!(
                "Embedder produces {} dimensions but the store expects {}",
                built.dimensions(),
                self.dimensions()
            )));
        }
        tracing::debug!(dimensions = built.dimensions(), "embedder initialized");

        Ok(&**self.embedder.get_or_init(|| built))
    }

    /// Embed `text`, checking the vector length against the store.
    ///
    /// A wrong length is an embedding failure, not a storage one.
    pub(crate) fn embed(&self, text: &str, task: TaskType) -> Result<Vec<f32>, Error> {
        let embedding = self.embedder()?.embed(text, task)?;
        if embedding.len() != self.dimensions() {
            return Err(Error::Embedding(format!(
                "embedder returned {} dimensions, expected {}",
                embedding.len(),
                self.dimensions()
            )));
        }
        Ok(embedding)
    }

    /// Reject empty and whitespace-only text.
    pub(crate) fn validate_text(text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(())
    }

    pub(crate) fn validate_user(user_id: &str) -> Result<(), Error> {
        if user_id.trim().is_empty() {
            return Err(Error::InvalidInput("user_id cannot be empty".to_string()));
        }
        Ok(())
    }

    pub(crate) fn validate_min_similarity(min_similarity: f64) -> Result<(), Error> {
        if !min_similarity.is_finite() || !(-1.0..=1.0).contains(&min_similarity) {
            return Err(Error::InvalidInput(format!(
                "min_similarity must be between -1.0 and 1.0, got {min_similarity}"
            )));
        }
        Ok(())
    }
}
