//! Semantic and substring search over a user's memories.

use rusqlite::params;

use super::{Database, Error, MEMORY_COLUMNS, Memory, embedding, finish_memory, raw_memory};

pub type Result<T> = std::result::Result<T, Error>;

/// Largest `limit` accepted by any read.
pub const MAX_SEARCH_LIMIT: usize = 10_000;

/// Validate search limit is within acceptable bounds.
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidLimit(
            "Limit must be greater than 0".to_string(),
        ));
    }
    if limit > MAX_SEARCH_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "Limit {} exceeds maximum allowed ({})",
            limit, MAX_SEARCH_LIMIT
        )));
    }
    Ok(())
}

impl Database {
    /// Rank a user's memories by cosine similarity to `query_embedding`.
    ///
    /// Brute-force scan: every candidate is decoded and scored. At most
    /// `scan_limit` candidates are considered, taken from the most recently
    /// updated rows; rows without an embedding are never candidates.
    ///
    /// Results have `similarity >= min_similarity`, are sorted highest first,
    /// and ties keep insertion order (older memory first).
    ///
    /// # Errors
    ///
    /// Returns error if the limit is invalid, a stored BLOB is corrupt, or the
    /// query fails.
    pub fn search(
        &self,
        user_id: &str,
        query_embedding: &[f32],
        limit: usize,
        min_similarity: f64,
        scan_limit: usize,
    ) -> Result<Vec<(Memory, f64)>> {
        validate_limit(limit)?;

        let mut candidates = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare(&format!(
                r#"
                SELECT {MEMORY_COLUMNS}, embedding, rowid
                FROM memories
                WHERE user_id = ?1 AND embedding IS NOT NULL
                ORDER BY updated_at DESC, rowid DESC
                LIMIT ?2
                "#
            ))?;
            let rows = stmt
                .query_map(
                    params![user_id, scan_limit.saturating_add(1) as i64],
                    |row| {
                        Ok((
                            raw_memory(row)?,
                            row.get::<_, Vec<u8>>(6)?,
                            row.get::<_, i64>(7)?,
                        ))
                    },
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        if candidates.len() > scan_limit {
            candidates.truncate(scan_limit);
            tracing::warn!(
                user_id,
                scan_limit,
                "semantic recall limited to the most recently updated memories"
            );
        }

        candidates.sort_by_key(|(_, _, rowid)| *rowid);

        let mut scored = Vec::new();
        for (raw, blob, _) in candidates {
            let stored = embedding::blob_to_vec(&blob)?;
            let similarity = embedding::cosine_similarity(query_embedding, &stored);
            if similarity >= min_similarity {
                scored.push((finish_memory(raw)?, similarity));
            }
        }

        // Stable: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);
        Ok(scored)
    }

    /// Case-insensitive substring search over `content`, most recently
    /// updated first. No embeddings are involved.
    ///
    /// Matching uses Unicode lowercase folding, so it also covers non-ASCII
    /// text that SQLite's `LIKE` would treat case-sensitively.
    pub fn search_text(&self, user_id: &str, needle: &str, limit: usize) -> Result<Vec<Memory>> {
        validate_limit(limit)?;
        let needle = needle.to_lowercase();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {MEMORY_COLUMNS}
            FROM memories
            WHERE user_id = ?1
            ORDER BY updated_at DESC, rowid DESC
            "#
        ))?;
        let mut rows = stmt.query([user_id])?;

        let mut matches = Vec::new();
        while let Some(row) = rows.next()? {
            let content: String = row.get(2)?;
            if !content.to_lowercase().contains(&needle) {
                continue;
            }
            matches.push(finish_memory(raw_memory(row)?)?);
            if matches.len() == limit {
                break;
            }
        }
        Ok(matches)
    }
}
