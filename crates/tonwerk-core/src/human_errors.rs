// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command-line front end.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::TonwerkError;

/// Who has to act to get past the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user typed something we cannot use; fixing the input fixes it.
    ActionRequired,
    /// The file or environment is the problem, not the parameters.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (first line of output).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n  {}", self.message, self.suggestion)
    }
}

/// Convert a `TonwerkError` into a `HumanError`.
pub fn humanize_error(err: &TonwerkError) -> HumanError {
    match err {
        TonwerkError::InvalidParameter { name, reason } if name == "window_size" => HumanError {
            message: window_heading(reason).into(),
            suggestion: format!("Pick an odd size such as 3, 11 or 15. ({reason})"),
            severity: Severity::ActionRequired,
        },

        TonwerkError::InvalidParameter { name, reason } if name == "dimensions" => HumanError {
            message: "The picture is empty.".into(),
            suggestion: format!("Choose an image that is at least one pixel wide and tall. ({reason})"),
            severity: Severity::Permanent,
        },

        TonwerkError::InvalidParameter { name, reason } => HumanError {
            message: "Wrong value input.".into(),
            suggestion: format!("Enter a plain number for `{name}`, e.g. 25 or -0.5. ({reason})"),
            severity: Severity::ActionRequired,
        },

        TonwerkError::DimensionMismatch { expected, actual } => HumanError {
            message: "The picture data is damaged.".into(),
            suggestion: format!("Expected {expected} pixels but found {actual}. Try re-exporting the image."),
            severity: Severity::Permanent,
        },

        TonwerkError::ImageError(detail) => HumanError {
            message: "We couldn't read or write that picture.".into(),
            suggestion: format!(
                "Check the file is a JPEG, PNG, TIFF or BMP image and the folder is writable. ({detail})"
            ),
            severity: Severity::Permanent,
        },

        TonwerkError::Io(io) => HumanError {
            message: "A file couldn't be opened.".into(),
            suggestion: format!("Check the path exists and you have permission to read it. ({io})"),
            severity: Severity::Permanent,
        },

        TonwerkError::Serialization(detail) => HumanError {
            message: "The settings file couldn't be understood.".into(),
            suggestion: format!("Check it is valid JSON with odd window sizes. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

fn window_heading(reason: &str) -> &'static str {
    if reason.contains("at least 1") {
        "Neighbourhood size must be at least 1."
    } else if reason.contains("too large") {
        "Neighbourhood is too large for this picture."
    } else {
        "Neighbourhood size must be odd."
    }
}
