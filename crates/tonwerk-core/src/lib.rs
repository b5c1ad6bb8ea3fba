// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tonwerk — Raster type, operations, and error definitions shared across all
// crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod params;
pub mod raster;
pub mod types;

pub use config::TransformConfig;
pub use error::{Result, TonwerkError};
pub use params::WindowSize;
pub use raster::Raster;
pub use types::*;
