// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameter validation. Everything here runs before a transform touches a
// single pixel, so a rejected call never yields partial output.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonwerkError};

/// Side length of a square local window. Always odd and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowSize(usize);

impl WindowSize {
    /// Default for Bernsen and Sauvola.
    pub const DEFAULT_LOCAL: WindowSize = WindowSize(15);
    /// Default for the Gaussian adaptive mean.
    pub const DEFAULT_ADAPTIVE: WindowSize = WindowSize(11);

    /// Validate a window size. Even sizes and zero are rejected.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(TonwerkError::invalid(
                "window_size",
                "neighbourhood size must be at least 1",
            ));
        }
        if size % 2 == 0 {
            return Err(TonwerkError::invalid(
                "window_size",
                format!("neighbourhood size must be odd, got {size}"),
            ));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Padding needed on each side: `(size - 1) / 2`.
    pub fn border(self) -> usize {
        (self.0 - 1) / 2
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = TonwerkError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<WindowSize> for usize {
    fn from(window: WindowSize) -> usize {
        window.0
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reject NaN and infinities.
pub fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TonwerkError::invalid(name, format!("expected a finite number, got {value}")))
    }
}

/// Parse a user-supplied number, e.g. from a text field or argument.
pub fn parse_number(name: &str, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| TonwerkError::invalid(name, format!("`{}` is not a number", text.trim())))?;
    ensure_finite(name, value)
}

/// Parse and validate a window size.
pub fn parse_window(text: &str) -> Result<WindowSize> {
    let size: usize = text.trim().parse().map_err(|_| {
        TonwerkError::invalid(
            "window_size",
            format!("`{}` is not a positive integer", text.trim()),
        )
    })?;
    WindowSize::new(size)
}
