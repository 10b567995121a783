//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info, Level};

use panhwpx_ast::PandocDocument;
use panhwpx_hwpx::{
    resolve_skeleton_path, write_atomically, HwpxConverter, Skeleton, StyleConfig,
};

#[derive(Parser, Debug)]
#[command(name = "panhwpx")]
#[command(author, version, about = "Convert Pandoc JSON to HWPX", long_about = None)]
struct Cli {
    /// Output HWPX file
    #[arg(short, long)]
    output: PathBuf,

    /// Pandoc JSON input (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Skeleton package (defaults to Skeleton.hwpx next to the executable,
    /// then in the current directory)
    #[arg(short, long)]
    skeleton: Option<PathBuf>,

    /// Style configuration TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Options for a single conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Pandoc JSON file; `None` reads stdin
    pub input: Option<PathBuf>,
    /// Destination package
    pub output: PathBuf,
    /// Explicit skeleton package
    pub skeleton: Option<PathBuf>,
    /// Style configuration file
    pub config: Option<PathBuf>,
}

impl Cli {
    fn into_options(self) -> ConvertOptions {
        ConvertOptions {
            input: self.input,
            output: self.output,
            skeleton: self.skeleton,
            config: self.config,
        }
    }
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    convert_command(&cli.into_options())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` directives are honored on top of the verbosity level.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // A subscriber may already be installed when embedded in another tool
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute a conversion
pub fn convert_command(options: &ConvertOptions) -> Result<()> {
    let doc = read_document(options.input.as_deref())?;

    let config = match &options.config {
        Some(path) => StyleConfig::load(path)
            .with_context(|| format!("Failed to load style configuration: {}", path.display()))?,
        None => StyleConfig::default(),
    };

    let skeleton_path = locate_skeleton(options.skeleton.as_deref())?;
    let skeleton = Skeleton::load(&skeleton_path)
        .with_context(|| format!("Failed to open skeleton: {}", skeleton_path.display()))?;
    debug!(skeleton = %skeleton_path.display(), "loaded skeleton");

    let bytes = HwpxConverter::new(config)
        .convert(&doc, &skeleton)
        .context("Failed to convert document")?;

    write_atomically(&options.output, &bytes)
        .with_context(|| format!("Failed to write output: {}", options.output.display()))?;

    info!(
        output = %options.output.display(),
        blocks = doc.blocks.len(),
        "conversion complete"
    );
    Ok(())
}

/// Read and decode the Pandoc document from a file or stdin
fn read_document(input: Option<&Path>) -> Result<PandocDocument> {
    let (json, source) = match input {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("Failed to read input from stdin")?;
            (json, "<stdin>".to_string())
        }
    };

    PandocDocument::from_json_str(&json)
        .with_context(|| format!("Malformed Pandoc JSON input: {}", source))
}

fn locate_skeleton(explicit: Option<&Path>) -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;

    resolve_skeleton_path(explicit, exe_dir.as_deref(), &working_dir)
        .context("Skeleton package not found")
}
