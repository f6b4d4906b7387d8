//! # Grounded CLI
//!
//! The `grounded` binary drives the grounding pipeline: initialize the
//! index store, ingest the document folder, run similarity searches, and
//! inspect what is indexed.
//!
//! ## Usage
//!
//! ```bash
//! grounded --config ./config/grounded.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `grounded init` | Create the SQLite store and run schema migrations |
//! | `grounded ingest` | Index the configured document folder (no-op if already populated) |
//! | `grounded search "<question>"` | Print ranked context passages |
//! | `grounded stats` | Entry count and per-source breakdown |

mod chunk;
mod config;
mod db;
mod embedding;
mod error;
mod index;
mod ingest;
mod loader;
mod migrate;
mod models;
mod retrieve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::index::VectorIndex;
use crate::retrieve::Retriever;

/// Grounded — ingest source documents and retrieve ranked context
/// passages for chatbot answers.
#[derive(Parser)]
#[command(
    name = "grounded",
    about = "Grounded — a local-first document grounding core for chatbot answers",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/grounded.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the index store.
    ///
    /// Creates the SQLite database file and schema. Idempotent.
    Init,

    /// Ingest the configured document folder.
    ///
    /// Loads each PDF or text file, chunks it into overlapping word
    /// windows, embeds the chunks, and writes them to the index in
    /// batches. Skips everything if the index is already populated.
    Ingest {
        /// Clear the index first and re-ingest from scratch.
        #[arg(long)]
        force: bool,

        /// Show file and chunk counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Retrieve ranked context passages for a question.
    Search {
        /// The question text.
        question: String,

        /// Number of passages to return.
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Show entry count and per-source breakdown.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg.index.dir).await?;
            migrate::run_migrations(&pool).await?;
            pool.close().await;
            println!("Index store initialized successfully.");
        }
        Commands::Ingest { force, dry_run } => {
            let index = open_index(&cfg).await?;
            let report = ingest::run_ingest(&cfg, &index, force, dry_run).await?;

            if dry_run {
                println!("ingest (dry-run)");
                println!("  files found: {}", report.files_found);
                println!("  estimated chunks: {}", report.chunks_written);
                return Ok(());
            }

            println!("ingest");
            if report.files_found == 0 {
                println!("  nothing to ingest");
                return Ok(());
            }
            if report.skipped_existing {
                println!("  index already populated; skipping (use --force to re-ingest)");
                return Ok(());
            }
            println!("  files found: {}", report.files_found);
            println!("  files indexed: {}", report.files_indexed);
            println!("  extraction skipped: {}", report.files_skipped);
            println!("  chunks written: {}", report.chunks_written);
            println!("ok");
        }
        Commands::Search { question, top_k } => {
            let index = open_index(&cfg).await?;
            let retriever = Retriever::new(index, cfg.retrieval.min_similarity);
            let top_k = top_k.unwrap_or(cfg.retrieval.top_k);

            let passages = retriever.search(&question, top_k).await?;
            if passages.is_empty() {
                println!("No results.");
                return Ok(());
            }

            for (i, passage) in passages.iter().enumerate() {
                println!(
                    "{}. [{:.2}] {} (page {})",
                    i + 1,
                    passage.similarity,
                    passage.source,
                    passage.page
                );
                println!("    excerpt: \"{}\"", excerpt(&passage.text, 240));
                println!();
            }
        }
        Commands::Stats => {
            let index = open_index(&cfg).await?;
            println!("entries: {}", index.count().await?);
            for (source, n) in index.source_counts().await? {
                println!("  {}: {}", source, n);
            }
        }
    }

    Ok(())
}

async fn open_index(cfg: &config::Config) -> anyhow::Result<VectorIndex> {
    let pool = db::connect(&cfg.index.dir).await?;
    migrate::run_migrations(&pool).await?;
    let embedder = embedding::create_embedder(&cfg.embedding)?;
    Ok(VectorIndex::new(pool, embedder, cfg.embedding.batch_size))
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace('\n', " ");
    let trimmed = cleaned.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
