//! Error taxonomy for the grounding pipeline.
//!
//! Failures local to one document ([`LoadError`]) are contained by the
//! ingestion pipeline: logged, the file skipped, the run continues.
//! Failures that would leave the index in a bad state or signal a backend
//! outage ([`IndexError`]) propagate to the caller. An empty index is not
//! an error anywhere; queries against it return an empty result.

use thiserror::Error;

/// A source document could not be read or parsed.
///
/// One bad document must not abort the whole ingestion run, so the
/// pipeline catches this per file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf extraction failed: {0}")]
    Pdf(String),
}

/// Invalid chunking parameters, rejected before any work starts.
#[derive(Debug, Error)]
#[error("invalid chunking config: {0}")]
pub struct ConfigError(pub String);

/// A failure inside the embedding index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The injected embedder failed (network outage, bad credentials,
    /// model unavailable). Not swallowed: returning stale or empty
    /// context would mask a real outage.
    #[error("embedding failed: {0}")]
    Embedding(anyhow::Error),

    /// The underlying store failed, reading or writing. On the write
    /// path, prior batches remain committed and remaining ingestion is
    /// aborted.
    #[error("index storage failed: {0}")]
    Storage(#[from] sqlx::Error),
}
