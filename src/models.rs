//! Core data types that flow through the ingestion and retrieval pipeline.

/// One page of raw text extracted from a source document.
///
/// Plain-text files always produce a single page with `number = 1`.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number in source order.
    pub number: u32,
    pub text: String,
}

/// A bounded word window extracted from one page of one document.
///
/// `chunk_index` is contiguous from 0 within each (source, page) pair;
/// consecutive chunks on a page overlap by a fixed word count. Ids are
/// fresh per ingestion run; no content hash is kept.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: String,
    /// Source document path, relative to the document folder.
    pub source: String,
    /// 1-based page the chunk was extracted from.
    pub page: u32,
    /// 0-based position within the page's chunk sequence.
    pub chunk_index: i64,
    pub text: String,
}

/// A stored entry returned from a nearest-neighbor query, with its
/// cosine similarity to the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub id: String,
    pub source: String,
    pub page: u32,
    pub chunk_index: i64,
    pub text: String,
    pub similarity: f32,
}

/// A ranked context passage handed to the answer-composition layer.
/// Request-scoped; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub text: String,
    pub source: String,
    pub page: u32,
    pub similarity: f32,
}
