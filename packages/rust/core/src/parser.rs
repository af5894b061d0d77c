//! API list parser.
//!
//! The API list is a plain-text file with one entry per line:
//! - `# Section` lines are echoed into the index as headers
//! - `ns::Name` lines document a class
//! - `ns::Name #struct` lines document a struct
//! - blank lines are ignored
//!
//! Whitespace inside a symbol line is not significant: `mono :: ui :: Button`
//! and `mono::ui::Button` name the same symbol.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use refbuilder_shared::{
    InputLine, NAMESPACE_SEPARATOR, RefBuilderError, Result, STRUCT_MARKER, Symbol, SymbolKind,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A fully classified API list, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiList {
    /// Every line of the input, including headers and blanks.
    pub lines: Vec<InputLine>,
}

impl ApiList {
    /// All symbols in input order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.lines.iter().filter_map(InputLine::as_symbol)
    }

    /// Number of symbol lines.
    pub fn symbol_count(&self) -> usize {
        self.symbols().count()
    }

    /// Number of symbols of the given kind.
    pub fn count_kind(&self, kind: SymbolKind) -> usize {
        self.symbols().filter(|s| s.kind == kind).count()
    }

    /// Number of section header lines.
    pub fn header_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, InputLine::Header(_)))
            .count()
    }

    /// Section headers in input order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            InputLine::Header(h) => Some(h.as_str()),
            InputLine::Symbol(_) | InputLine::Blank => None,
        })
    }

    /// Generated file names claimed by more than one symbol. On disk the
    /// last one wins.
    pub fn duplicate_files(&self) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut dupes = Vec::new();
        for symbol in self.symbols() {
            let count = seen.entry(symbol.file_name()).or_default();
            *count += 1;
            if *count == 2 {
                dupes.push(symbol.file_name());
            }
        }
        dupes
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse the contents of an API list.
///
/// Parsing is all-or-nothing: the first malformed line aborts with a
/// [`RefBuilderError::Parse`] carrying its 1-based line number.
#[instrument(skip_all, fields(bytes = content.len()))]
pub fn parse_api_list(content: &str) -> Result<ApiList> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect::<Result<Vec<_>>>()?;

    debug!(lines = lines.len(), "API list parsed");
    Ok(ApiList { lines })
}

/// Classify a single line of the API list.
pub fn parse_line(line_no: usize, raw: &str) -> Result<InputLine> {
    let line = raw.trim_end();

    if line.trim_start().is_empty() {
        return Ok(InputLine::Blank);
    }

    if line.trim_start().starts_with('#') {
        return Ok(InputLine::Header(line.to_string()));
    }

    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    let (name, kind) = match compact.strip_suffix(STRUCT_MARKER) {
        Some(name) => (name, SymbolKind::Struct),
        None => (compact.as_str(), SymbolKind::Class),
    };

    if name.contains(STRUCT_MARKER) {
        return Err(RefBuilderError::parse(
            line_no,
            format!("struct marker '{STRUCT_MARKER}' must end the line: '{line}'"),
        ));
    }
    if name.contains('#') {
        return Err(RefBuilderError::parse(
            line_no,
            format!("unexpected '#' in symbol name: '{line}'"),
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(RefBuilderError::parse(
            line_no,
            format!("path separator in symbol name '{name}'"),
        ));
    }
    for segment in name.split(NAMESPACE_SEPARATOR) {
        if segment.is_empty() {
            return Err(RefBuilderError::parse(
                line_no,
                format!("empty namespace segment in '{name}'"),
            ));
        }
        if segment.contains(':') {
            return Err(RefBuilderError::parse(
                line_no,
                format!("stray ':' in '{name}', namespaces are separated by '::'"),
            ));
        }
        if segment == "." || segment == ".." {
            return Err(RefBuilderError::parse(
                line_no,
                format!("'{segment}' is not a valid namespace segment in '{name}'"),
            ));
        }
    }

    let symbol = Symbol::new(name, kind);
    if !symbol.is_namespaced() {
        warn!(line = line_no, name, "symbol has no namespace separator");
    }

    Ok(InputLine::Symbol(symbol))
}
