// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation dispatch — maps each `Operation` variant to its transform.

use image::DynamicImage;
use tonwerk_core::error::Result;
use tonwerk_core::{Operation, Raster, TransformOutput};
use tracing::{debug, instrument};

use crate::histogram::{linear_contrast_stretch, log_transform};
use crate::intensity::to_intensity;
use crate::point::{add, multiply, negate, power};
use crate::threshold::{adaptive_mean, bernsen, sauvola};

/// Apply one operation to an intensity raster.
///
/// Parameters are validated before any pixel is processed.
#[instrument(skip(src), fields(op = %op, width = src.width(), height = src.height()))]
pub fn apply(op: &Operation, src: &Raster<u8>) -> Result<TransformOutput> {
    op.validate()?;

    let output = match *op {
        Operation::Add { value } => TransformOutput::Intensity(add(src, value)?),
        Operation::Negate => TransformOutput::Intensity(negate(src)),
        Operation::Multiply { value } => TransformOutput::Intensity(multiply(src, value)?),
        Operation::Power { exponent } => TransformOutput::Float(power(src, exponent)?),
        Operation::Log => TransformOutput::Intensity(log_transform(src)),
        Operation::LinearContrast => TransformOutput::Intensity(linear_contrast_stretch(src)),
        Operation::AdaptiveMean { window, offset } => {
            TransformOutput::Intensity(adaptive_mean(src, window, offset)?)
        }
        Operation::Bernsen { window, epsilon } => {
            TransformOutput::Intensity(bernsen(src, window, epsilon)?)
        }
        Operation::Sauvola { window, k } => TransformOutput::Intensity(sauvola(src, window, k)?),
    };

    debug!("Operation complete");
    Ok(output)
}

/// Reduce a decoded image to intensity, then apply `op`.
pub fn apply_to_image(op: &Operation, image: &DynamicImage) -> Result<TransformOutput> {
    op.validate()?;
    let raster = to_intensity(image)?;
    apply(op, &raster)
}
