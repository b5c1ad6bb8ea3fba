// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform configuration — default parameters for the window-based methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{WindowSize, ensure_finite};

/// Default parameters used when a caller does not supply them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Neighbourhood size for Bernsen and Sauvola (default 15).
    pub local_window: WindowSize,
    /// Neighbourhood size for the Gaussian adaptive mean (default 11).
    pub adaptive_window: WindowSize,
    /// Constant subtracted from the adaptive mean (default 3.0).
    pub adaptive_offset: f64,
    /// Sauvola sensitivity `k` (default 0.5).
    pub sauvola_k: f64,
    /// Bernsen contrast cutoff (default 15.0).
    pub bernsen_epsilon: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            local_window: WindowSize::DEFAULT_LOCAL,
            adaptive_window: WindowSize::DEFAULT_ADAPTIVE,
            adaptive_offset: 3.0,
            sauvola_k: 0.5,
            bernsen_epsilon: 15.0,
        }
    }
}

impl TransformConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric defaults are finite.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("adaptive_offset", self.adaptive_offset)?;
        ensure_finite("sauvola_k", self.sauvola_k)?;
        ensure_finite("bernsen_epsilon", self.bernsen_epsilon)?;
        Ok(())
    }
}
