//! Query-time retrieval: question → ranked, deduplicated context passages.
//!
//! The retriever is the read side of the index. Callers hand the
//! resulting passages to an answer-composition step (a language model or
//! a heuristic summarizer); an empty list means "no grounding context"
//! and is a valid, expected state — not a failure.

use std::collections::HashSet;

use crate::error::IndexError;
use crate::index::VectorIndex;
use crate::models::Passage;

pub struct Retriever {
    index: VectorIndex,
    min_similarity: f32,
}

impl Retriever {
    pub fn new(index: VectorIndex, min_similarity: f32) -> Self {
        Self {
            index,
            min_similarity,
        }
    }

    /// Return up to `top_k` passages relevant to `question`, ranked by
    /// descending similarity.
    ///
    /// Passages below the similarity floor are dropped, and identical
    /// texts (overlap windows can repeat across pages) are collapsed to
    /// their best-ranked occurrence. An empty index yields `Ok(vec![])`.
    /// An embedder outage propagates: silently returning empty context
    /// would mask a real failure.
    pub async fn search(&self, question: &str, top_k: usize) -> Result<Vec<Passage>, IndexError> {
        let entries = self.index.query(question, top_k).await?;

        let mut seen = HashSet::new();
        let passages = entries
            .into_iter()
            .filter(|e| e.similarity >= self.min_similarity)
            .filter(|e| seen.insert(e.text.clone()))
            .map(|e| Passage {
                text: e.text,
                source: e.source,
                page: e.page,
                similarity: e.similarity,
            })
            .collect();

        Ok(passages)
    }
}
