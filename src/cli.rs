use std::path::PathBuf;

use clap::Parser;

/** CLI surface (§6.2): a single positional input path plus flags for output
redirection and log verbosity. */
#[derive(Debug, Parser)]
#[command(name = "cppp", version, about)]
pub struct Cli {
    /// path to the input file (one or more concatenated matrix instances)
    pub input: PathBuf,

    /// write solutions here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// suppress non-fatal logs
    #[arg(long, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// enable info-level logs
    #[arg(long)]
    pub verbose: bool,

    /// enable debug-level logs and integrity checks
    #[arg(long)]
    pub debug: bool,

    /// redirect logs here instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

/// Process exit codes (§6.2).
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const MALFORMED_HEADER: i32 = 1;
    pub const MALFORMED_CELLS: i32 = 2;
    pub const MALFORMED_MID_INSTANCE: i32 = 3;
    pub const BAD_CLI: i32 = 4;
    pub const NO_INPUT: i32 = 5;
    pub const OUTPUT_OPEN_FAILED: i32 = 6;
}
