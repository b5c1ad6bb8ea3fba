// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their mapping onto `Operation`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tonwerk_core::human_errors::humanize_error;
use tonwerk_core::params::{parse_number, parse_window};
use tonwerk_core::{Operation, TransformConfig, WindowSize};

#[derive(Debug, Parser)]
#[command(name = "tonwerk")]
#[command(version, about = "Grayscale point transforms and adaptive binarization", long_about = None)]
pub struct Cli {
    /// Input image (JPEG, PNG, TIFF, BMP, ...)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image; defaults to <stem>.<operation>.<ext> beside the input
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON file with default window sizes, k, epsilon and offset
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved operation as JSON and exit without processing
    #[arg(long)]
    pub describe: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a constant to every pixel (saturating)
    Add {
        #[arg(long, allow_negative_numbers = true, value_parser = value_arg)]
        value: f64,
    },
    /// Photographic negative
    Negate,
    /// Multiply every pixel by a constant (saturating)
    Multiply {
        #[arg(long, allow_negative_numbers = true, value_parser = value_arg)]
        value: f64,
    },
    /// Raise every pixel to a power (result is not rescaled)
    Power {
        #[arg(long, allow_negative_numbers = true, value_parser = exponent_arg)]
        exponent: f64,
    },
    /// Logarithmic compression
    Log,
    /// Stretch [min, max] onto [0, 255]
    LinearContrast,
    /// Gaussian adaptive mean threshold
    Adaptive {
        /// Neighbourhood size (odd)
        #[arg(long, value_parser = window_arg)]
        window: Option<WindowSize>,
        /// Constant subtracted from the local mean
        #[arg(long, allow_negative_numbers = true, value_parser = offset_arg)]
        offset: Option<f64>,
    },
    /// Bernsen local threshold
    Bernsen {
        /// Neighbourhood size (odd)
        #[arg(long, value_parser = window_arg)]
        window: Option<WindowSize>,
        /// Minimum local contrast for the mid-range threshold
        #[arg(long, value_parser = epsilon_arg)]
        epsilon: Option<f64>,
    },
    /// Sauvola local threshold
    Sauvola {
        /// Neighbourhood size (odd)
        #[arg(long, value_parser = window_arg)]
        window: Option<WindowSize>,
        /// Sensitivity
        #[arg(short, long, allow_negative_numbers = true, value_parser = k_arg)]
        k: Option<f64>,
    },
}

impl Command {
    /// Resolve to an operation, filling unset parameters from `config`.
    pub fn to_operation(&self, config: &TransformConfig) -> Operation {
        match *self {
            Command::Add { value } => Operation::Add { value },
            Command::Negate => Operation::Negate,
            Command::Multiply { value } => Operation::Multiply { value },
            Command::Power { exponent } => Operation::Power { exponent },
            Command::Log => Operation::Log,
            Command::LinearContrast => Operation::LinearContrast,
            Command::Adaptive { window, offset } => Operation::AdaptiveMean {
                window: window.unwrap_or(config.adaptive_window),
                offset: offset.unwrap_or(config.adaptive_offset),
            },
            Command::Bernsen { window, epsilon } => Operation::Bernsen {
                window: window.unwrap_or(config.local_window),
                epsilon: epsilon.unwrap_or(config.bernsen_epsilon),
            },
            Command::Sauvola { window, k } => Operation::Sauvola {
                window: window.unwrap_or(config.local_window),
                k: k.unwrap_or(config.sauvola_k),
            },
        }
    }
}

// -- Value parsers ------------------------------------------------------------

fn window_arg(text: &str) -> Result<WindowSize, String> {
    parse_window(text).map_err(|err| humanize_error(&err).to_string())
}

fn number_arg(name: &str, text: &str) -> Result<f64, String> {
    parse_number(name, text).map_err(|err| humanize_error(&err).to_string())
}

fn value_arg(text: &str) -> Result<f64, String> {
    number_arg("value", text)
}

fn exponent_arg(text: &str) -> Result<f64, String> {
    number_arg("exponent", text)
}

fn offset_arg(text: &str) -> Result<f64, String> {
    number_arg("offset", text)
}

fn epsilon_arg(text: &str) -> Result<f64, String> {
    number_arg("epsilon", text)
}

fn k_arg(text: &str) -> Result<f64, String> {
    number_arg("k", text)
}
