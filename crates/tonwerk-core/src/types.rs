// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the closed set of transform operations and their output.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{WindowSize, ensure_finite};
use crate::raster::Raster;

/// One transform together with its parameter record.
///
/// Serialized with an `op` tag, e.g. `{"op":"sauvola","window":15,"k":0.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// `src + value`, saturating.
    Add { value: f64 },
    /// `255 - src`.
    Negate,
    /// `src * value`, saturating.
    Multiply { value: f64 },
    /// `src ^ exponent` in floating point.
    Power { exponent: f64 },
    /// Logarithmic compression scaled by the global maximum.
    Log,
    /// Linear stretch of `[min, max]` onto `[0, 255]`.
    LinearContrast,
    /// Gaussian-weighted local mean minus `offset`.
    AdaptiveMean { window: WindowSize, offset: f64 },
    /// Local mid-range threshold, gated by local contrast.
    Bernsen { window: WindowSize, epsilon: f64 },
    /// Local mean and standard deviation threshold.
    Sauvola { window: WindowSize, k: f64 },
}

impl Operation {
    /// Short kebab-case name, used in logs and derived file names.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Negate => "negate",
            Operation::Multiply { .. } => "multiply",
            Operation::Power { .. } => "power",
            Operation::Log => "log",
            Operation::LinearContrast => "linear-contrast",
            Operation::AdaptiveMean { .. } => "adaptive",
            Operation::Bernsen { .. } => "bernsen",
            Operation::Sauvola { .. } => "sauvola",
        }
    }

    /// Check every numeric parameter is finite. Window sizes are already
    /// valid by construction.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Operation::Add { value } | Operation::Multiply { value } => {
                ensure_finite("value", value)?;
            }
            Operation::Power { exponent } => {
                ensure_finite("exponent", exponent)?;
            }
            Operation::AdaptiveMean { offset, .. } => {
                ensure_finite("offset", offset)?;
            }
            Operation::Bernsen { epsilon, .. } => {
                ensure_finite("epsilon", epsilon)?;
            }
            Operation::Sauvola { k, .. } => {
                ensure_finite("k", k)?;
            }
            Operation::Negate | Operation::Log | Operation::LinearContrast => {}
        }
        Ok(())
    }

    /// Whether the result is binary (every sample 0 or 255).
    pub fn is_binarization(&self) -> bool {
        matches!(
            self,
            Operation::AdaptiveMean { .. } | Operation::Bernsen { .. } | Operation::Sauvola { .. }
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add { value } => write!(f, "add({value})"),
            Operation::Multiply { value } => write!(f, "multiply({value})"),
            Operation::Power { exponent } => write!(f, "power({exponent})"),
            Operation::AdaptiveMean { window, offset } => {
                write!(f, "adaptive(window={window}, offset={offset})")
            }
            Operation::Bernsen { window, epsilon } => {
                write!(f, "bernsen(window={window}, epsilon={epsilon})")
            }
            Operation::Sauvola { window, k } => write!(f, "sauvola(window={window}, k={k})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Result of applying an [`Operation`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput {
    /// 8-bit intensity result.
    Intensity(Raster<u8>),
    /// Floating result, produced only by the power transform. Not rescaled.
    Float(Raster<f32>),
}

impl TransformOutput {
    pub fn width(&self) -> usize {
        match self {
            TransformOutput::Intensity(r) => r.width(),
            TransformOutput::Float(r) => r.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            TransformOutput::Intensity(r) => r.height(),
            TransformOutput::Float(r) => r.height(),
        }
    }

    /// 8-bit view for display or storage. Floating results are narrowed with
    /// a saturating cast.
    pub fn into_intensity(self) -> Raster<u8> {
        match self {
            TransformOutput::Intensity(r) => r,
            TransformOutput::Float(r) => r.to_u8_saturating(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_json_uses_op_tag() {
        let op = Operation::Sauvola {
            window: WindowSize::new(15).unwrap(),
            k: 0.5,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"sauvola","window":15,"k":0.5}"#);

        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn unit_variants_parse_from_tag_only() {
        let op: Operation = serde_json::from_str(r#"{"op":"linear_contrast"}"#).unwrap();
        assert_eq!(op, Operation::LinearContrast);
    }

    #[test]
    fn even_window_in_json_is_rejected() {
        let res = serde_json::from_str::<Operation>(r#"{"op":"bernsen","window":14,"epsilon":15.0}"#);
        assert!(res.is_err());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        assert!(Operation::Add { value: f64::NAN }.validate().is_err());
        assert!(Operation::Power { exponent: f64::INFINITY }.validate().is_err());
        assert!(Operation::Multiply { value: 2.0 }.validate().is_ok());
    }

    #[test]
    fn display_includes_parameters() {
        let op = Operation::Bernsen {
            window: WindowSize::new(3).unwrap(),
            epsilon: 15.0,
        };
        assert_eq!(op.to_string(), "bernsen(window=3, epsilon=15)");
        assert_eq!(Operation::Negate.to_string(), "negate");
    }

    #[test]
    fn float_output_narrows_on_request() {
        let raster = Raster::from_samples(2, 1, vec![1.0f32, 1000.0]).unwrap();
        let out = TransformOutput::Float(raster);
        assert_eq!(out.width(), 2);
        assert_eq!(out.into_intensity().samples(), &[1, 255]);
    }
}
