//! One-shot ingestion: document folder → loader → chunker → vector index.
//!
//! Runs once at startup. Per-file extraction failures are logged and the
//! file skipped; a failure while writing to the index aborts the rest of
//! the run and propagates. If the index already holds entries, the whole
//! pass is skipped — re-ingestion of an already-populated index is a
//! no-op unless the caller forces a reset first.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::chunk::chunk_words;
use crate::config::Config;
use crate::index::VectorIndex;
use crate::loader;
use crate::models::Chunk;

/// Outcome summary of one ingestion pass.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub files_found: usize,
    pub files_indexed: usize,
    /// Files whose extraction failed and were skipped.
    pub files_skipped: usize,
    pub chunks_written: u64,
    /// True when the pass was skipped because the index was already populated.
    pub skipped_existing: bool,
}

/// Ingest every matching document under the configured folder.
///
/// `force` clears the index first, re-indexing from scratch. `dry_run`
/// enumerates and chunks but writes nothing.
pub async fn run_ingest(
    config: &Config,
    index: &VectorIndex,
    force: bool,
    dry_run: bool,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    let files = enumerate_documents(&config.documents.dir, config)?;
    report.files_found = files.len();

    if files.is_empty() {
        return Ok(report);
    }

    if force && !dry_run {
        index.clear().await?;
    }

    // Coarse idempotency: a populated index means a previous run already
    // ingested this folder. New files dropped in later are not detected;
    // `force` is the explicit way to pick them up.
    if !dry_run && index.count().await? > 0 {
        report.skipped_existing = true;
        return Ok(report);
    }

    let mut pending: Vec<Chunk> = Vec::new();

    for path in &files {
        let source = relative_source(&config.documents.dir, path);

        let pages = match loader::load_pages(path) {
            Ok(pages) => pages,
            Err(e) => {
                eprintln!("Warning: skipping {}: {}", path.display(), e);
                report.files_skipped += 1;
                continue;
            }
        };

        for page in &pages {
            let texts = chunk_words(
                &page.text,
                config.chunking.chunk_size,
                config.chunking.overlap,
            )?;
            for (i, text) in texts.into_iter().enumerate() {
                pending.push(Chunk {
                    id: Uuid::new_v4().to_string(),
                    source: source.clone(),
                    page: page.number,
                    chunk_index: i as i64,
                    text,
                });
            }
        }

        report.files_indexed += 1;
    }

    if dry_run {
        report.chunks_written = pending.len() as u64;
        return Ok(report);
    }

    report.chunks_written = index.add(&pending).await?;

    Ok(report)
}

/// List matching files under `dir`, sorted by relative path so chunk ids
/// are assigned in a stable order within one run.
fn enumerate_documents(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!("Document folder does not exist: {}", dir.display());
    }

    let include_set = build_globset(&config.documents.include_globs)?;
    let exclude_set = build_globset(&config.documents.exclude_globs)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);

        if exclude_set.is_match(relative) {
            continue;
        }
        if !include_set.is_match(relative) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Source key: the path relative to the document folder, with `/`
/// separators. Bare filenames would collide across subfolders.
fn relative_source(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}
