use std::path::PathBuf;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CpppError;

/** Log level implied by `--quiet` / `--verbose` / `--debug`, before the
`RUST_LOG` environment override (which always wins, mirroring the
original's `CPPP_LOG_LEVEL` override of its own `--quiet`/`--verbose`/`--debug`
flags). */
fn default_filter(cli: &Cli) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    }
}

/** Installs the global `tracing` subscriber for this process (§9's
redesign note: "replace global logging state ... with a logger value
threaded through the driver; the core does not observe it"). Call once,
from `main` — the core modules (`search`, `realize`, `components`, ...)
never configure or query this, they only emit `tracing` events, which are
no-ops until this subscriber is installed.
*/
pub fn init(cli: &Cli) -> Result<(), CpppError> {
    let writer = match &cli.log {
        None => BoxMakeWriter::new(std::io::stderr),
        Some(path) => {
            let file = open_log_file(path)?;
            BoxMakeWriter::new(file)
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .init();
    Ok(())
}

fn open_log_file(path: &PathBuf) -> Result<std::fs::File, CpppError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CpppError::LogUnavailable {
            path: path.clone(),
            source,
        })
}
