//! This is the command line tool for headshare. It generates C, C++ or
//! Cython declarations from the FFI-facing items in Rust source.

mod args;
mod config;
mod parse;
mod writer;

use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use headshare_core::ir::ParsedData;
use log::{error, info};

use crate::args::{Args, Command};
use crate::writer::Output;

fn main() -> ExitCode {
    let options = Args::parse();

    if let Some(subcommand) = options.subcommand {
        match subcommand {
            Command::Completions { shell } => {
                let mut cmd = Args::command();
                let bin_name = cmd.get_name().to_string();
                generate(shell, &mut cmd, bin_name, &mut io::stdout());
            }
        }
        return ExitCode::SUCCESS;
    }

    if let Err(err) = init_logging(&options) {
        eprintln!("headshare failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(&options) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            error!("headshare failed to generate declarations: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(options: &Args) -> Result<(), flexi_logger::FlexiLoggerError> {
    let level = if options.quiet {
        "error"
    } else {
        match options.verbosity {
            0 => "warn",
            1 => "info",
            _ => "trace",
        }
    };
    flexi_logger::Logger::try_with_env_or_str(level)?.start()?;
    Ok(())
}

fn run(options: &Args) -> anyhow::Result<i32> {
    let config_file = options.config_file.as_deref();

    if options.generate_config {
        let config = config::override_configuration(headshare_core::Config::default(), options);
        config::store_config(&config, config_file)?;
        return Ok(0);
    }

    if options.output.is_none() && options.verify {
        error!("cannot verify declarations against stdout; specify a file to compare against");
        return Ok(2);
    }

    info!("headshare started generating declarations");

    let first_input = options
        .inputs
        .first()
        .ok_or_else(|| anyhow!("no inputs provided"))?;
    let config = config::load_config(config_file, first_input)?;
    let config = config::override_configuration(config, options);

    let files = parse::collect_sources(options)?;
    info!("parsing {} source files", files.len());
    let parsed_data = parse::parse_sources(&files)?;
    check_parse_errors(&parsed_data)?;

    let bindings = headshare_core::generate(config, parsed_data)
        .context("failed to generate declarations")?;

    let destination = match &options.output {
        Some(path) => Output::File(path),
        None => Output::Stdout,
    };
    let code = writer::write_bindings(&bindings, destination, options.verify)?;

    info!("headshare finished generating declarations");
    Ok(code)
}

/// Prints out all parsing errors if any and returns Err.
fn check_parse_errors(parsed_data: &ParsedData) -> anyhow::Result<()> {
    if parsed_data.errors.is_empty() {
        return Ok(());
    }
    for file_error in &parsed_data.errors {
        error!(
            "parsing error: \"{}\" in file \"{}\"",
            file_error.error, file_error.file_name
        );
    }
    Err(anyhow!("errors encountered during parsing"))
}
