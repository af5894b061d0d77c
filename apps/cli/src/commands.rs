//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use refbuilder_core::pipeline::{self, BuildResult, ProgressReporter};
use refbuilder_shared::{
    AppConfig, BuildConfig, SymbolKind, config_file_path, init_config_at, load_config,
    load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// refbuilder: generate API reference stubs from a list of symbols.
#[derive(Parser)]
#[command(
    name = "refbuilder",
    version,
    about = "Generate Breathe reference stubs and an index from a list of classes and structs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.refbuilder/refbuilder.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write one stub page per symbol and the reference index.
    Build {
        /// API list to read (defaults to api_classes.txt).
        input: Option<PathBuf>,

        /// Existing directory to write into (defaults to reference).
        destination: Option<PathBuf>,
    },

    /// Parse and validate an API list without writing anything.
    Check {
        /// API list to read (defaults to api_classes.txt).
        input: Option<PathBuf>,

        /// Print the classified lines as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so that stdout
/// carries only command output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "refbuilder=info",
        1 => "refbuilder=debug",
        _ => "refbuilder=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Build { input, destination } => {
            cmd_build(config_path.as_deref(), input, destination)
        }
        Command::Check { input, json } => cmd_check(config_path.as_deref(), input, json),
        Command::Config { action } => match action {
            ConfigAction::Init { force } => cmd_config_init(config_path.as_deref(), force),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

/// Load config from an explicit path, or from the default location.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_build(
    config_path: Option<&Path>,
    input: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> Result<()> {
    let app = resolve_config(config_path)?;
    let build = BuildConfig::from(&app).with_paths(input, destination);

    info!(
        input = %build.input.display(),
        destination = %build.destination.display(),
        "building reference"
    );

    let reporter = CliProgress::new();
    let result = pipeline::build_reference(&build, &reporter)?;

    // Print summary
    println!();
    println!("  Reference written!");
    println!("  Classes:  {}", result.classes);
    println!("  Structs:  {}", result.structs);
    println!("  Sections: {}", result.headers);
    println!("  Index:    {}", result.index_path.display());
    println!(
        "  Time:     {:.1}ms",
        result.elapsed.as_secs_f64() * 1000.0
    );
    println!();

    Ok(())
}

fn cmd_check(config_path: Option<&Path>, input: Option<PathBuf>, json: bool) -> Result<()> {
    let app = resolve_config(config_path)?;
    let build = BuildConfig::from(&app).with_paths(input, None);

    let list = pipeline::check_reference(&build.input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list.lines)?);
        return Ok(());
    }

    println!(
        "{}: {} symbols ({} classes, {} structs) in {} sections",
        build.input.display(),
        list.symbol_count(),
        list.count_kind(SymbolKind::Class),
        list.count_kind(SymbolKind::Struct),
        list.header_count(),
    );
    for header in list.headers() {
        println!("  {header}");
    }
    for file in list.duplicate_files() {
        println!("  warning: {file} is generated by more than one symbol");
    }

    Ok(())
}

fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    if path.exists() && !force {
        return Err(eyre!(
            "config file already exists at '{}' (use --force to overwrite)",
            path.display()
        ));
    }

    init_config_at(&path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Per-symbol progress message printed on stdout.
fn progress_line(kind: SymbolKind, file_name: &str) -> String {
    format!("Writing {kind}: {file_name}")
}

/// Prints one `Writing <kind>: <file>` line per symbol on stdout while an
/// indicatif bar tracks completion on stderr.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn writing_symbol(&self, kind: SymbolKind, file_name: &str, current: usize, _total: usize) {
        self.bar.suspend(|| println!("{}", progress_line(kind, file_name)));
        self.bar.set_message(file_name.to_string());
        self.bar.set_position(current as u64);
    }

    fn done(&self, _result: &BuildResult) {
        self.bar.finish_and_clear();
    }
}
