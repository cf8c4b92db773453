//! quavatar - Main entry point
//!
//! Parses command-line arguments, sets up logging and runs the overlay.
//!
//! # Usage
//!
//! ```bash
//! quavatar --help                                   # Show help
//! arecord -q -f FLOAT_LE -c1 -r44100 -t raw | quavatar
//! quavatar --source mic --log-file quavatar.log      # Needs `--features capture`
//! ```

use anyhow::Context;
use quavatar::cli::Args;
use quavatar::Error;
use std::fs::File;

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    init_logging(&args)?;

    log::info!("Starting quavatar");
    log::debug!("CLI args: {args:?}");

    match quavatar::run(&args) {
        Ok(()) => Ok(()),
        Err(Error::Audio(err)) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        Err(err) => Err(err).context("quavatar stopped"),
    }
}

/// Logs go to `--log-file` when given, since the overlay owns the terminal.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_filter()),
    );
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
