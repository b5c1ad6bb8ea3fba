// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tonwerk — grayscale transforms from the command line.
//
// Entry point. Initialises logging, parses arguments, and runs exactly one
// operation: decode the input, reduce it to intensity, transform, encode.

mod cli;
mod io;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tonwerk_core::error::Result;
use tonwerk_core::human_errors::humanize_error;
use tonwerk_core::TransformConfig;
use tonwerk_transform::apply_to_image;
use tracing::{error, info};

use cli::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Some(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Tonwerk failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// Run the parsed command. Returns the written path, or `None` when only
/// describing the operation.
fn run(cli: &Cli) -> Result<Option<PathBuf>> {
    let config = match &cli.config {
        Some(path) => TransformConfig::from_json_file(path)?,
        None => TransformConfig::default(),
    };

    let op = cli.command.to_operation(&config);
    op.validate()?;

    if cli.describe {
        println!("{}", serde_json::to_string_pretty(&op)?);
        return Ok(None);
    }

    info!(%op, input = %cli.input.display(), "Tonwerk starting");

    let image = io::open_image(&cli.input)?;
    let output = apply_to_image(&op, &image)?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| io::derived_output_path(&cli.input, op.name()));
    io::save_raster(&output.into_intensity(), &path)?;

    info!(output = %path.display(), "Done");
    Ok(Some(path))
}
