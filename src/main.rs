use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use memstrip::{strip_unused_memory, Options};

mod logger;

/// Removes an unused linear memory, and the exports pointing at it, from a
/// WebAssembly module.
#[derive(Parser, Debug)]
#[command(name = "memstrip", version, about)]
struct Args {
    /// Module to read
    input: PathBuf,

    /// Where to write the stripped module
    output: PathBuf,

    /// Scan function bodies in parallel
    #[arg(long, env = "MEMSTRIP_PARALLEL")]
    parallel: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_logging(args.verbose);

    if let Err(error) = run(&args) {
        eprintln!("Error: {error:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(path = %args.input.display(), bytes = input.len(), "read module");

    let options = Options {
        parallel: args.parallel,
    };
    let stripped = strip_unused_memory(&input, &options)
        .with_context(|| format!("cannot remove memory from {}", args.input.display()))?;
    debug!("no memory instructions found, memory section removed");
    for export in &stripped.removed_exports {
        debug!(name = %export.name, index = export.index, "removed memory export");
    }

    fs::write(&args.output, &stripped.bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        bytes = stripped.bytes.len(),
        saved = stripped.saved(),
        "wrote module"
    );
    Ok(())
}
