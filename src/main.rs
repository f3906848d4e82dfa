#![warn(missing_debug_implementations)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use cppp::cli::{exit_code, Cli};
use cppp::error::{CpppError, MalformedInputStage};
use cppp::instance::MatrixLoader;
use cppp::search::{SearchEngine, SearchOutcome};
use cppp::strategy::Alphabetic;

/** parses the CLI, wires up logging, reads every instance out of the input
file, runs the search engine on each, and writes one result line per
instance */
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `clap` already printed usage/help to stderr.
            let _ = err.print();
            return ExitCode::from(exit_code::BAD_CLI as u8);
        }
    };

    if let Err(err) = cppp::logging::init(&cli) {
        eprintln!("{err}");
        return ExitCode::from(exit_code::BAD_CLI as u8);
    }

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_code::OK as u8),
        Err(err) => {
            tracing::error!(%err, "run failed");
            ExitCode::from(exit_code_for(&err) as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CpppError> {
    let input = std::fs::read_to_string(&cli.input).map_err(|source| CpppError::InputUnavailable {
        path: cli.input.clone(),
        source,
    })?;

    let mut out: Box<dyn Write> = match &cli.output {
        None => Box::new(std::io::stdout()),
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|source| CpppError::OutputUnavailable {
                path: path.clone(),
                source,
            })?;
            Box::new(file)
        }
    };

    let mut loader = MatrixLoader::new(&input);
    let engine = SearchEngine::new(Alphabetic);

    let mut instance_ix = 0;
    while let Some(instance) = loader.read_next()? {
        tracing::info!(instance = instance_ix, n = instance.n_orig, m = instance.m_orig, "read instance");
        let outcome = engine.run(std::rc::Rc::new(instance));
        write_outcome(&mut out, &outcome).map_err(|source| CpppError::OutputUnavailable {
            path: cli.output.clone().unwrap_or_default(),
            source,
        })?;
        instance_ix += 1;
    }

    Ok(())
}

fn write_outcome(out: &mut dyn Write, outcome: &SearchOutcome) -> std::io::Result<()> {
    match outcome {
        SearchOutcome::Solved(witness) => {
            let line = witness
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}")
        }
        SearchOutcome::NotFound => writeln!(out, "Not found"),
    }
}

fn exit_code_for(err: &CpppError) -> i32 {
    match err {
        CpppError::MalformedInput { stage, .. } => match stage {
            MalformedInputStage::Header => exit_code::MALFORMED_HEADER,
            MalformedInputStage::Cells => exit_code::MALFORMED_CELLS,
            MalformedInputStage::MidInstance => exit_code::MALFORMED_MID_INSTANCE,
        },
        CpppError::InputUnavailable { .. } => exit_code::NO_INPUT,
        CpppError::OutputUnavailable { .. } => exit_code::OUTPUT_OPEN_FAILED,
        CpppError::LogUnavailable { .. } => exit_code::BAD_CLI,
    }
}
