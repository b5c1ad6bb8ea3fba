// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour reduction — conversion between decoded `image` buffers and the
// single-channel `Raster`.

use image::{DynamicImage, GrayImage};
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::Raster;
use tracing::{debug, instrument};

/// Reduce any decoded image to one intensity channel.
///
/// Uses the `image` crate's luma conversion. Already-gray 8-bit images pass
/// through unchanged.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn to_intensity(image: &DynamicImage) -> Result<Raster<u8>> {
    let gray = image.to_luma8();
    debug!(color = ?image.color(), "Reduced to intensity");
    from_gray_image(&gray)
}

/// Copy a `GrayImage` into a raster.
pub fn from_gray_image(gray: &GrayImage) -> Result<Raster<u8>> {
    let (width, height) = gray.dimensions();
    Raster::from_samples(width as usize, height as usize, gray.as_raw().clone())
}

/// Copy a raster into a `GrayImage` for encoding.
pub fn to_gray_image(raster: &Raster<u8>) -> Result<GrayImage> {
    let width = dimension_u32(raster.width())?;
    let height = dimension_u32(raster.height())?;
    GrayImage::from_raw(width, height, raster.samples().to_vec()).ok_or_else(|| {
        TonwerkError::ImageError(format!("buffer does not fit a {width}x{height} gray image"))
    })
}

pub(crate) fn dimension_u32(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| TonwerkError::ImageError(format!("dimension {value} exceeds u32 range")))
}
