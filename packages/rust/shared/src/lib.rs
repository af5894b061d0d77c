//! Shared types, error model, and configuration for refbuilder.
//!
//! This crate is the foundation depended on by the other refbuilder crates.
//! It provides:
//! - [`RefBuilderError`]: the unified error type
//! - Domain types ([`InputLine`], [`Symbol`], [`SymbolKind`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, DEFAULT_TRAILER, DefaultsConfig, DirectiveConfig, IndexConfig,
    config_dir, config_file_path, init_config_at, load_config, load_config_from,
    validate_config,
};
pub use error::{RefBuilderError, Result};
pub use types::{InputLine, NAMESPACE_SEPARATOR, STRUCT_MARKER, Symbol, SymbolKind};
