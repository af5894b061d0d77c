//! Reference directory assembler.
//!
//! Takes a parsed API list and writes one stub page per symbol plus the
//! index page into the destination directory. Existing files are overwritten;
//! files from earlier runs that no longer correspond to a symbol are left alone.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use refbuilder_shared::{BuildConfig, RefBuilderError, Result, Symbol};

use crate::parser::ApiList;
use crate::render;

/// Paths written by a successful assembly.
#[derive(Debug, Clone, Default)]
pub struct AssembleOutput {
    /// Symbol pages, in input order.
    pub pages: Vec<PathBuf>,
    /// The index page.
    pub index: PathBuf,
}

/// Write every symbol page and then the index page.
///
/// `before_write` is called with each symbol and its 1-based position just
/// before its page is written. The first I/O failure aborts the run; pages
/// already written stay on disk.
#[instrument(skip_all, fields(dest = %config.destination.display(), symbols = list.symbol_count()))]
pub fn assemble(
    config: &BuildConfig,
    list: &ApiList,
    mut before_write: impl FnMut(&Symbol, usize),
) -> Result<AssembleOutput> {
    ensure_destination(&config.destination, config.create_destination)?;

    for file in list.duplicate_files() {
        warn!(file = %file, "several symbols map to the same page; the last one wins");
    }

    let mut pages = Vec::with_capacity(list.symbol_count());
    for (idx, symbol) in list.symbols().enumerate() {
        before_write(symbol, idx + 1);
        pages.push(write_symbol_page(&config.destination, symbol, config)?);
    }

    let index = config.index_path();
    let content = render::render_index(&list.lines, &config.index);
    write_text(&index, &content)?;

    info!(
        pages = pages.len(),
        index = %index.display(),
        "reference assembly complete"
    );

    Ok(AssembleOutput { pages, index })
}

/// Check that the destination exists and is a directory, creating it when allowed.
pub fn ensure_destination(destination: &Path, create: bool) -> Result<()> {
    if destination.is_dir() {
        return Ok(());
    }
    if destination.exists() {
        return Err(RefBuilderError::validation(format!(
            "destination '{}' is not a directory",
            destination.display()
        )));
    }
    if !create {
        return Err(RefBuilderError::validation(format!(
            "destination directory '{}' does not exist",
            destination.display()
        )));
    }

    std::fs::create_dir_all(destination).map_err(|e| RefBuilderError::io(destination, e))?;
    debug!(path = %destination.display(), "destination directory created");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write a single symbol's page into the destination directory.
///
/// The page name must be a single plain path component so that the page
/// lands directly inside `destination`.
fn write_symbol_page(destination: &Path, symbol: &Symbol, config: &BuildConfig) -> Result<PathBuf> {
    let file_name = symbol.file_name();
    let mut components = Path::new(&file_name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(RefBuilderError::validation(format!(
            "page name '{file_name}' for '{}' would leave the destination directory",
            symbol.qualified_name
        )));
    }

    let path = destination.join(&file_name);
    let content = render::render_symbol_page(symbol, &config.directive);
    write_text(&path, &content)?;

    debug!(path = %path.display(), kind = %symbol.kind, "wrote page");
    Ok(path)
}

/// Create or truncate `path` and write `content` through a buffered handle.
///
/// The buffer is flushed explicitly so that write errors are reported
/// instead of being swallowed on drop.
fn write_text(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| RefBuilderError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|e| RefBuilderError::io(path, e))?;
    writer.flush().map_err(|e| RefBuilderError::io(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_api_list;
    use refbuilder_shared::{AppConfig, InputLine, SymbolKind};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rb-assembler-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_config(destination: &Path) -> BuildConfig {
        BuildConfig::from(&AppConfig::default()).with_paths(None, Some(destination.into()))
    }

    #[test]
    fn assemble_writes_pages_and_index() {
        let tmp = temp_dir();
        let config = make_config(&tmp);
        let list = parse_api_list("# Display\nUI::Button\nMono::Audio#struct\n").unwrap();

        let mut seen = Vec::new();
        let out = assemble(&config, &list, |s, n| seen.push((s.base_name.clone(), n))).unwrap();

        assert_eq!(out.pages, vec![tmp.join("UI_Button.md"), tmp.join("Mono_Audio.md")]);
        assert_eq!(out.index, tmp.join("reference.md"));
        assert!(out.index.exists());
        assert_eq!(seen, vec![("Button".to_string(), 1), ("Audio".to_string(), 2)]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_destination_fails_without_create() {
        let tmp = temp_dir();
        let dest = tmp.join("reference");
        let err = ensure_destination(&dest, false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!dest.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_destination_created_when_allowed() {
        let tmp = temp_dir();
        let dest = tmp.join("nested").join("reference");
        ensure_destination(&dest, true).unwrap();
        assert!(dest.is_dir());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn destination_that_is_a_file_is_rejected() {
        let tmp = temp_dir();
        let dest = tmp.join("reference");
        std::fs::write(&dest, "not a dir").unwrap();

        let err = ensure_destination(&dest, true).unwrap_err();
        assert!(err.to_string().contains("not a directory"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn page_outside_destination_is_refused() {
        let tmp = temp_dir();
        let dest = tmp.join("reference");
        std::fs::create_dir_all(&dest).unwrap();
        let config = make_config(&dest);

        // Built directly: the parser already rejects these names.
        let list = ApiList {
            lines: vec![InputLine::Symbol(Symbol::new("../Evil::X", SymbolKind::Class))],
        };

        let err = assemble(&config, &list, |_, _| {}).unwrap_err();
        assert!(err.to_string().contains("would leave the destination"));
        assert!(!tmp.join("Evil_X.md").exists());
        assert_eq!(std::fs::read_dir(&dest).unwrap().count(), 0);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn stale_pages_are_left_in_place() {
        let tmp = temp_dir();
        let config = make_config(&tmp);
        std::fs::write(tmp.join("Old_Thing.md"), "stale").unwrap();

        let list = parse_api_list("UI::Button\n").unwrap();
        assemble(&config, &list, |_, _| {}).unwrap();

        assert_eq!(std::fs::read_to_string(tmp.join("Old_Thing.md")).unwrap(), "stale");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
