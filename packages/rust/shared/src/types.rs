//! Core domain types for the API list and the reference pages built from it.

use serde::{Deserialize, Serialize};

/// Namespace separator inside a qualified name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Trailing token that marks a symbol as a struct.
pub const STRUCT_MARKER: &str = "#struct";

// ---------------------------------------------------------------------------
// SymbolKind
// ---------------------------------------------------------------------------

/// Whether a symbol is documented as a class or a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Struct,
}

impl SymbolKind {
    /// The Breathe directive that extracts this kind of symbol.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Class => "doxygenclass",
            Self::Struct => "doxygenstruct",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Struct => f.write_str("struct"),
        }
    }
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// A documented symbol derived from one line of the API list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Fully qualified name with whitespace and struct marker removed
    /// (e.g. `mono::ui::Button`).
    pub qualified_name: String,
    /// Final namespace segment, used as the page title.
    pub base_name: String,
    /// Class or struct.
    pub kind: SymbolKind,
}

impl Symbol {
    /// Build a symbol from an already-cleaned qualified name.
    pub fn new(qualified_name: impl Into<String>, kind: SymbolKind) -> Self {
        let qualified_name = qualified_name.into();
        let base_name = qualified_name
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        Self {
            qualified_name,
            base_name,
            kind,
        }
    }

    /// File stem of the generated page (`mono::ui::Button` -> `mono_ui_Button`).
    pub fn file_stem(&self) -> String {
        self.qualified_name.replace(NAMESPACE_SEPARATOR, "_")
    }

    /// File name of the generated page, including the `.md` extension.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.file_stem())
    }

    /// Whether the name has more than one namespace segment.
    pub fn is_namespaced(&self) -> bool {
        self.qualified_name.contains(NAMESPACE_SEPARATOR)
    }
}

// ---------------------------------------------------------------------------
// InputLine
// ---------------------------------------------------------------------------

/// One classified line of the API list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InputLine {
    /// Section header echoed into the index (line starts with `#`).
    Header(String),
    /// A class or struct to document.
    Symbol(Symbol),
    /// Empty or whitespace-only line.
    Blank,
}

impl InputLine {
    /// The symbol carried by this line, if any.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            Self::Header(_) | Self::Blank => None,
        }
    }
}
