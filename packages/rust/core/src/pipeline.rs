//! End-to-end `build` pipeline: API list → parse → render → write reference.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use refbuilder_shared::{BuildConfig, RefBuilderError, Result, Symbol, SymbolKind};

use crate::assembler;
use crate::parser::{self, ApiList};

/// Result of the `build_reference` pipeline.
#[derive(Debug)]
pub struct BuildResult {
    /// Directory the reference was written to.
    pub destination: PathBuf,
    /// Path of the index page.
    pub index_path: PathBuf,
    /// Symbol pages written, in input order.
    pub pages: Vec<PathBuf>,
    /// Number of class pages.
    pub classes: usize,
    /// Number of struct pages.
    pub structs: usize,
    /// Number of section headers echoed into the index.
    pub headers: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called once the API list is parsed, with the number of symbols to write.
    fn started(&self, total: usize);
    /// Called just before a symbol's page is written.
    fn writing_symbol(&self, kind: SymbolKind, file_name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn writing_symbol(&self, _kind: SymbolKind, _file_name: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Read and parse an API list from disk.
pub fn read_api_list(path: &Path) -> Result<ApiList> {
    let content = std::fs::read_to_string(path).map_err(|e| RefBuilderError::io(path, e))?;
    parser::parse_api_list(&content)
}

/// Parse and validate an API list without writing anything.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn check_reference(input: &Path) -> Result<ApiList> {
    let list = read_api_list(input)?;
    info!(
        symbols = list.symbol_count(),
        headers = list.header_count(),
        "API list is valid"
    );
    Ok(list)
}

/// Run the full `build` pipeline.
///
/// 1. Read and parse the whole API list (nothing is written on a parse error)
/// 2. Check the destination directory
/// 3. Write one page per symbol, then the index
#[instrument(skip_all, fields(input = %config.input.display(), dest = %config.destination.display()))]
pub fn build_reference(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    info!("starting reference build");

    let list = read_api_list(&config.input)?;
    let total = list.symbol_count();
    progress.started(total);

    let output = assembler::assemble(config, &list, |symbol: &Symbol, current| {
        progress.writing_symbol(symbol.kind, &symbol.file_name(), current, total);
    })?;

    let result = BuildResult {
        destination: config.destination.clone(),
        index_path: output.index,
        pages: output.pages,
        classes: list.count_kind(SymbolKind::Class),
        structs: list.count_kind(SymbolKind::Struct),
        headers: list.header_count(),
        elapsed: start.elapsed(),
    };

    info!(
        classes = result.classes,
        structs = result.structs,
        headers = result.headers,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "reference build complete"
    );

    progress.done(&result);
    Ok(result)
}
