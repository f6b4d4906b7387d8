//! # Grounded
//!
//! A local-first document grounding core for chatbot answers.
//!
//! Grounded ingests a folder of source documents (PDF or plain text),
//! splits them into overlapping word-window chunks, embeds the chunks,
//! and persists them in a durable SQLite-backed vector index. At query
//! time it embeds the question and returns the nearest chunks as ranked
//! context passages, ready to be composed into a grounded answer by an
//! external chat service.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌─────────────┐
//! │  Loader   │──▶│ Chunker  │──▶│ VectorIndex │
//! │ PDF/text  │   │ windows  │   │ SQLite+blob │
//! └───────────┘   └──────────┘   └──────┬──────┘
//!      ingest (once, at startup)        │
//!                                       ▼
//!                                ┌───────────┐
//!                                │ Retriever │──▶ ranked passages
//!                                └───────────┘
//! ```
//!
//! The embedding model is injected through the [`embedding::Embedder`]
//! trait, so the core runs against OpenAI, Ollama, a local model, or a
//! test double without changes.
//!
//! ## Quick Start
//!
//! ```bash
//! grounded init                       # create the index store
//! grounded ingest                     # index the document folder
//! grounded search "screening age"    # print ranked passages
//! grounded stats                      # entry counts per source
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`models`] | Core data types |
//! | [`loader`] | Per-page text extraction (PDF, plain text) |
//! | [`chunk`] | Overlapping word-window chunker |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Durable nearest-neighbor store |
//! | [`ingest`] | One-shot ingestion pipeline |
//! | [`retrieve`] | Ranked, deduplicated passage retrieval |
//! | [`error`] | Error taxonomy |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod chunk;
pub mod config;
pub mod db;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingest;
pub mod loader;
pub mod migrate;
pub mod models;
pub mod retrieve;
