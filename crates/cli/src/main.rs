//! `O3PipeView` trace reconstruction CLI.
//!
//! Reads a log produced by an out-of-order core with fetch-sequence annotations
//! enabled and writes the per-instruction trace consumed by gem5's
//! `o3-pipeview.py`. It performs:
//! 1. **Argument parsing:** Input log, optional output file and JSON configuration.
//! 2. **Logging:** Diagnostics go to stderr, filtered by `RUST_LOG` or `-v`.
//! 3. **Conversion:** Runs the reconstruction and reports fatal trace errors.
//!
//! Examples:
//!   pipeview -f boom.out > boom.trace
//!   pipeview -f boom.out -o boom.trace --stats

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipeview_core::sim::loader;
use pipeview_core::{Config, ConvertError, ConvertStats, Converter};

#[derive(Parser, Debug)]
#[command(
    name = "pipeview",
    author,
    version,
    about = "Rebuild per-instruction O3PipeView traces from an interleaved core log",
    long_about = "Rebuild per-instruction O3PipeView traces from an interleaved core log.\n\nEvery line of the input must start with the instruction's fetch sequence number,\nfollowed by a separator (default ';'). The output lists each instruction's stages\ncontiguously, in program order, including squashed instructions.\n\nExamples:\n  pipeview -f boom.out > boom.trace\n  pipeview -f boom.out -o boom.trace --stats"
)]
struct Cli {
    /// The input *.out file to parse.
    #[arg(short, long)]
    file: PathBuf,

    /// Write the trace here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration overriding the trace format defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print conversion statistics to stderr when done.
    #[arg(long)]
    stats: bool,

    /// Drop instructions still in flight at end of input instead of emitting them as squashed.
    #[arg(long)]
    no_flush: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    match run(&cli) {
        Ok(stats) => {
            if cli.stats {
                stats.print();
            }
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

/// Installs a stderr subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration and input, then converts into the selected sink.
fn run(cli: &Cli) -> Result<ConvertStats, ConvertError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.no_flush {
        config.reconcile.flush_pending = false;
    }

    let text = loader::load_trace(&cli.file)?;
    let converter = Converter::new(config);

    match &cli.output {
        Some(path) => {
            let file = create_output(path)?;
            converter.run(&text, BufWriter::new(file))
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let stats = converter.run(&text, &mut out)?;
            out.flush()?;
            Ok(stats)
        }
    }
}

fn create_output(path: &Path) -> Result<File, ConvertError> {
    File::create(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}
