// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global point transforms — `g = alpha * f + beta` and its derivatives, plus
// the floating-point power transform.

use tonwerk_core::error::Result;
use tonwerk_core::params::ensure_finite;
use tonwerk_core::raster::saturate_u8;
use tonwerk_core::Raster;
use tracing::{info, instrument};

use crate::parallel::map_raster;

/// `dst = clamp(alpha * src + beta, 0, 255)`, rounded to the nearest level
/// (ties to even).
///
/// An 8-bit input has only 256 possible values, so the remap is evaluated
/// once per level into a lookup table and then applied per pixel.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn linear_remap(src: &Raster<u8>, alpha: f64, beta: f64) -> Result<Raster<u8>> {
    ensure_finite("alpha", alpha)?;
    ensure_finite("beta", beta)?;
    info!(alpha, beta, "Applying linear remap");
    Ok(remap_unchecked(src, alpha, beta))
}

/// Add `value` to every sample, saturating at 0 and 255.
pub fn add(src: &Raster<u8>, value: f64) -> Result<Raster<u8>> {
    ensure_finite("value", value)?;
    linear_remap(src, 1.0, value)
}

/// Photographic negative: `255 - src`.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn negate(src: &Raster<u8>) -> Raster<u8> {
    info!("Negating");
    remap_unchecked(src, -1.0, 255.0)
}

/// Scale every sample by `value`, saturating at 255.
pub fn multiply(src: &Raster<u8>, value: f64) -> Result<Raster<u8>> {
    ensure_finite("value", value)?;
    linear_remap(src, value, 0.0)
}

/// `dst = src ^ exponent`, computed in `f32` with no rescaling or clamping.
///
/// `0 ^ 0` is 1.0. Callers that need a displayable image must narrow the
/// result themselves; this transform does not contrast-stretch.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn power(src: &Raster<u8>, exponent: f64) -> Result<Raster<f32>> {
    ensure_finite("exponent", exponent)?;
    info!(exponent, "Applying power transform");
    let exponent = exponent as f32;
    Ok(map_raster(src, |s| f32::from(s).powf(exponent)))
}

fn remap_unchecked(src: &Raster<u8>, alpha: f64, beta: f64) -> Raster<u8> {
    let lut: [u8; 256] = std::array::from_fn(|level| saturate_u8(alpha * level as f64 + beta));
    map_raster(src, |s| lut[usize::from(s)])
}
