use crate::document::MacroExpander;
use crate::index::IndexEngine;
use crate::output::IndexView;
use crate::scan::scan_document;
use crate::utils::config::IndexConfig;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Scan a document and digest its index
pub fn compile_source(source: &str, config: &IndexConfig) -> IndexView {
    let engine = IndexEngine::from_config(config.clone());
    let mut scanned = scan_document(source, &MacroExpander::default());
    let index = engine.digest(&mut scanned.builder, scanned.kind);
    IndexView::new(&index, &engine)
}

pub fn compile_file(path: &Path, config: &IndexConfig) -> Result<IndexView> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let view = compile_source(&source, config).with_source(path.display().to_string());
    info!(
        path = %path.display(),
        entries = view.entries,
        groups = view.groups.len(),
        "compiled index"
    );
    Ok(view)
}

/// Compile several documents in parallel.
/// Every document gets its own entry collection; results keep input order.
pub fn compile_files(paths: &[PathBuf], config: &IndexConfig) -> Result<Vec<IndexView>> {
    paths
        .par_iter()
        .map(|path| compile_file(path, config))
        .collect()
}
