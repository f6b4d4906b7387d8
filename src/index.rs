//! Durable nearest-neighbor store over chunk embeddings.
//!
//! Entries are keyed by chunk id and persisted in SQLite: text and
//! metadata in `entries`, the embedding vector as a little-endian f32
//! BLOB in `entry_vectors`. The embedding model is injected as an
//! [`Embedder`], so the store never talks to a vendor API directly.
//!
//! Writes happen in independently committed batches: a failure mid-run
//! loses at most one batch, never the whole ingestion. Queries scan the
//! stored vectors and rank by cosine similarity in process.

use std::sync::Arc;

use sqlx::{Row, SqlitePool};

use crate::embedding::{blob_to_vec, cosine_similarity, vec_to_blob, Embedder};
use crate::error::IndexError;
use crate::models::{Chunk, ScoredEntry};

#[derive(Clone)]
pub struct VectorIndex {
    pool: SqlitePool,
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
}

impl VectorIndex {
    /// Wrap an open store with the embedder used for both writes and queries.
    pub fn new(pool: SqlitePool, embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        Self {
            pool,
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of stored entries.
    pub async fn count(&self) -> Result<i64, IndexError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Entry counts grouped by source document, sorted by source.
    pub async fn source_counts(&self) -> Result<Vec<(String, i64)>, IndexError> {
        let rows = sqlx::query(
            "SELECT source, COUNT(*) AS n FROM entries GROUP BY source ORDER BY source",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("source"), row.get("n")))
            .collect())
    }

    /// Embed and upsert chunks, committing one transaction per batch.
    ///
    /// Returns the number of entries written. Existing entries are only
    /// ever appended to, never mutated from here; an id collision
    /// replaces the row (upsert), which only happens when the caller
    /// reuses ids deliberately.
    ///
    /// # Errors
    ///
    /// [`IndexError::Embedding`] if the embedder fails for a batch,
    /// [`IndexError::Storage`] if a batch fails to persist. Batches
    /// before the failing one remain committed.
    pub async fn add(&self, chunks: &[Chunk]) -> Result<u64, IndexError> {
        let mut written = 0u64;

        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self
                .embedder
                .embed(&texts)
                .await
                .map_err(IndexError::Embedding)?;

            let now = chrono::Utc::now().timestamp();
            let mut tx = self.pool.begin().await?;

            for (chunk, vector) in batch.iter().zip(vectors.iter()) {
                sqlx::query(
                    r#"
                    INSERT INTO entries (id, source, page, chunk_index, text, created_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        source = excluded.source,
                        page = excluded.page,
                        chunk_index = excluded.chunk_index,
                        text = excluded.text,
                        created_at = excluded.created_at
                    "#,
                )
                .bind(&chunk.id)
                .bind(&chunk.source)
                .bind(chunk.page as i64)
                .bind(chunk.chunk_index)
                .bind(&chunk.text)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    r#"
                    INSERT INTO entry_vectors (entry_id, embedding)
                    VALUES (?, ?)
                    ON CONFLICT(entry_id) DO UPDATE SET embedding = excluded.embedding
                    "#,
                )
                .bind(&chunk.id)
                .bind(vec_to_blob(vector))
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            written += batch.len() as u64;
        }

        Ok(written)
    }

    /// Return the `top_k` stored entries nearest to `text`, ranked by
    /// descending cosine similarity.
    ///
    /// Returns fewer than `top_k` when the index holds fewer entries,
    /// and an empty list — without touching the embedder — when the
    /// index is empty.
    pub async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredEntry>, IndexError> {
        if top_k == 0 || self.count().await? == 0 {
            return Ok(Vec::new());
        }

        let query_vecs = self
            .embedder
            .embed(&[text.to_string()])
            .await
            .map_err(IndexError::Embedding)?;
        let query_vec = query_vecs
            .into_iter()
            .next()
            .ok_or_else(|| IndexError::Embedding(anyhow::anyhow!("Empty embedding response")))?;

        let rows = sqlx::query(
            r#"
            SELECT e.id, e.source, e.page, e.chunk_index, e.text, v.embedding
            FROM entries e
            JOIN entry_vectors v ON v.entry_id = e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut scored: Vec<ScoredEntry> = rows
            .iter()
            .map(|row| {
                let blob: Vec<u8> = row.get("embedding");
                let vector = blob_to_vec(&blob);
                let page: i64 = row.get("page");
                ScoredEntry {
                    id: row.get("id"),
                    source: row.get("source"),
                    page: page as u32,
                    chunk_index: row.get("chunk_index"),
                    text: row.get("text"),
                    similarity: cosine_similarity(&query_vec, &vector),
                }
            })
            .collect();

        // Sort: similarity desc, then id asc for a deterministic order
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        scored.truncate(top_k);

        Ok(scored)
    }

    /// Delete every entry and vector. Used by the explicit re-ingest path.
    pub async fn clear(&self) -> Result<(), IndexError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM entry_vectors")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM entries").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
