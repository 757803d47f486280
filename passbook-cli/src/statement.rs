//! Statement files to parsed outcomes.
//!
//! A `.txt` file is pdftotext output with pages separated by form feeds.
//! A `.json` file is a list of pages, each a list of positioned words.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use passbook_core::{YearContext, detect_year_in_name};
use passbook_ingest::{PageInput, PositionedWord, StatementOutcome, StatementParser, split_document};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn load_pages(path: &Path, y_tolerance: f32) -> Result<Vec<PageInput>> {
    let source = path.display().to_string();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(split_document(&source, &raw));
    }

    let pages: Vec<Vec<PositionedWord>> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(pages
        .iter()
        .enumerate()
        .map(|(i, words)| PageInput::from_words(i as u32 + 1, source.as_str(), words, y_tolerance))
        .collect())
}

/// A four-digit year in the file name counts as detected metadata.
pub fn year_for_file(path: &Path, base: YearContext) -> YearContext {
    let from_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(detect_year_in_name);
    YearContext {
        detected: base.detected.or(from_name),
        ..base
    }
}

pub fn parse_file(
    parser: &StatementParser,
    path: &Path,
    base: YearContext,
    y_tolerance: f32,
) -> Result<StatementOutcome> {
    let pages = load_pages(path, y_tolerance)?;
    let year = year_for_file(path, base);
    let outcome = parser
        .parse_statement_with(year, &pages)
        .with_context(|| format!("parse {}", path.display()))?;
    info!(
        "{}: {} transactions, {} diagnostics",
        path.display(),
        outcome.transactions.len(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

/// One blocking task per statement. Results come back in input order;
/// files that fail are logged and skipped.
pub async fn parse_files(
    parser: Arc<StatementParser>,
    files: Vec<PathBuf>,
    base: YearContext,
    y_tolerance: f32,
) -> Result<Vec<StatementOutcome>> {
    for path in &files {
        if !path.exists() {
            bail!("statement not found: {}", path.display());
        }
    }

    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let parser = Arc::clone(&parser);
            let display = path.display().to_string();
            let handle = tokio::task::spawn_blocking(move || {
                parse_file(&parser, &path, base, y_tolerance)
            });
            (display, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (display, handle) in handles {
        match handle.await.context("join parse task")? {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => warn!("skipping {display}: {err:#}"),
        }
    }
    Ok(outcomes)
}
