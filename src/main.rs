//! md5check entrypoint.

mod contract;
mod error;
mod front_end;
mod hashing;
mod paths;
mod surface;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::front_end::FrontEnd;
use crate::hashing::Algorithm;
use crate::paths::dropped_path;
use crate::surface::{ConsoleSurface, DisplaySurface, OutputFormat};

/// CLI arguments for the checker.
#[derive(Parser, Debug)]
#[command(
    name = "md5check",
    version,
    about = "Print the MD5 digest of each file",
    arg_required_else_help = true
)]
struct Args {
    /// Files to hash (missing paths and directories are skipped)
    paths: Vec<PathBuf>,

    /// Also hash paths read from stdin, one per line, as they arrive
    #[arg(long)]
    stdin: bool,

    /// Digest algorithm (md5 or sha256)
    #[arg(long, value_name = "NAME", default_value = "md5")]
    algorithm: String,

    /// Hash up to N files at once; results then appear as they complete
    #[arg(long, short, value_name = "N", default_value_t = 1)]
    jobs: usize,

    /// Emit JSON lines instead of `path → digest`
    #[arg(long)]
    json: bool,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Hash startup arguments, then any dropped paths, and report the outcome.
fn run(args: Args) -> Result<ExitCode> {
    let format = if args.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };
    let mut surface = ConsoleSurface::new(io::stdout(), io::stderr(), format);

    let algorithm = match Algorithm::from_name(&args.algorithm) {
        Ok(algorithm) => algorithm,
        Err(err) => {
            surface.notify(&err)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut front_end = FrontEnd::new(algorithm, args.jobs);
    front_end.accept_startup(args.paths);
    if front_end.pending() == 0 && !args.stdin {
        warn!("no regular files to hash");
    }
    let mut summary = front_end.process(&mut surface);

    if args.stdin {
        for line in io::stdin().lock().split(b'\n') {
            let line = line.context("read dropped path from stdin")?;
            let Some(path) = dropped_path(line) else {
                continue;
            };
            front_end.drop_paths([path]);
            summary += front_end.process(&mut surface);
        }
    }

    debug!(
        hashed = summary.hashed,
        failed = summary.failed,
        "finished"
    );
    if summary.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
