//! The Tern lowering driver.
//!
//! Provides the `ternc` command with the following subcommands:
//!
//! - `ternc lower <input>` - Lower a resolved tree (JSON) and write the IL (JSON)
//! - `ternc check <input>` - Lower a resolved tree and report the outcome only
//!
//! Options:
//! - `--output` - Where to write the IL (stdout when absent)
//! - `--compact` - Write the IL on one line
//! - `--config` - Path to a tern.toml (default: next to the input)
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output
//! - `-v` - Debug logging unless RUST_LOG says otherwise

mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tern_ast::ResolvedProgram;
use tern_lower::{lower_program, render_diagnostic, DiagnosticOptions, LowerError};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ternc", version, about = "Lower resolved programs to the Tern IL")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a resolved tree and write the IL as JSON
    Lower {
        #[command(flatten)]
        common: CommonArgs,

        /// Output path for the IL (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the IL on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Lower a resolved tree and report success or failure without writing
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the resolved tree (JSON)
    input: PathBuf,

    /// Path to a tern.toml (default: next to the input)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output diagnostics as JSON (one object per line) instead of human-readable format
    #[arg(long)]
    json: bool,

    /// Disable colorized output
    #[arg(long = "no-color")]
    no_color: bool,
}

/// Where the lowered IL goes, if anywhere.
enum Emit {
    Nothing,
    Stdout { pretty: bool },
    File { path: PathBuf, pretty: bool },
}

/// Why a run failed. Lowering errors were already rendered.
enum Failure {
    Lowering,
    Other(String),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let (common, emit) = match cli.command {
        Commands::Lower {
            common,
            output,
            compact,
        } => (common, Some((output, compact))),
        Commands::Check { common } => (common, None),
    };

    let json = common.json;
    if let Err(failure) = run(&common, emit) {
        if let Failure::Other(e) = failure {
            if json {
                let msg = serde_json::json!({
                    "code": "C0001",
                    "severity": "error",
                    "message": e,
                    "file": null,
                    "line": null,
                    "col": null,
                    "node": null,
                });
                eprintln!("{}", msg);
            } else {
                eprintln!("error: {}", e);
            }
        }
        process::exit(1);
    }
}

/// Load the tree and configuration, lower, then emit or report.
fn run(common: &CommonArgs, emit: Option<(Option<PathBuf>, bool)>) -> Result<(), Failure> {
    let (config, found) =
        Config::discover(common.config.as_deref(), &common.input).map_err(Failure::Other)?;
    if let Some(path) = &found {
        debug!(config = %path.display(), "loaded configuration");
    }

    let diag_opts = DiagnosticOptions {
        color: config.diagnostics.color && !common.no_color && !common.json,
        json: common.json,
    };
    let emit = match emit {
        None => Emit::Nothing,
        Some((output, compact)) => {
            let pretty = config.output.pretty && !compact;
            match output {
                Some(path) => Emit::File { path, pretty },
                None => Emit::Stdout { pretty },
            }
        }
    };

    let tree = read_tree(&common.input).map_err(Failure::Other)?;
    let mut program = match lower_program(&tree) {
        Ok(program) => program,
        Err(err) => {
            report(&err, &tree, &common.input, &diag_opts);
            return Err(Failure::Lowering);
        }
    };
    if let Some(name) = config.lower.program_name {
        program.name = name;
    }

    match emit {
        Emit::Nothing => {
            if !common.json {
                eprintln!(
                    "  Checked: {} ({} declarations)",
                    common.input.display(),
                    program.all_decls().len()
                );
            }
        }
        Emit::Stdout { pretty } => {
            println!("{}", to_json(&program, pretty).map_err(Failure::Other)?);
        }
        Emit::File { path, pretty } => {
            let text = to_json(&program, pretty).map_err(Failure::Other)?;
            std::fs::write(&path, text + "\n")
                .map_err(|e| Failure::Other(format!("Failed to write '{}': {}", path.display(), e)))?;
            info!(output = %path.display(), "wrote IL");
            if !common.json {
                eprintln!("  Lowered: {}", path.display());
            }
        }
    }
    Ok(())
}

fn read_tree(input: &Path) -> Result<ResolvedProgram, String> {
    if !input.is_file() {
        return Err(format!("Input file '{}' does not exist", input.display()));
    }
    let text = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("'{}' is not a resolved tree: {}", input.display(), e))
}

fn to_json(program: &tern_il::Program, pretty: bool) -> Result<String, String> {
    let text = if pretty {
        serde_json::to_string_pretty(program)
    } else {
        serde_json::to_string(program)
    };
    text.map_err(|e| format!("Failed to serialize the IL: {}", e))
}

/// Render a lowering error to stderr, with the source text when it can be found.
fn report(err: &LowerError, tree: &ResolvedProgram, input: &Path, opts: &DiagnosticOptions) {
    let source = err
        .loc()
        .and_then(|loc| tree.file_path(loc))
        .and_then(|path| read_source(path, input));
    eprintln!("{}", render_diagnostic(err, tree, source.as_deref(), opts));
}

/// Source paths in the tree are tried as given, then relative to the input.
fn read_source(path: &str, input: &Path) -> Option<String> {
    let path = Path::new(path);
    let mut candidates = vec![path.to_path_buf()];
    if path.is_relative() {
        if let Some(dir) = input.parent() {
            candidates.push(dir.join(path));
        }
    }
    candidates
        .into_iter()
        .find(|p| p.is_file())
        .and_then(|p| std::fs::read_to_string(p).ok())
}
