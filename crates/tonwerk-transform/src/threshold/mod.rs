// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive threshold engine — local window statistics and the per-pixel
// binary decision shared by every method.

pub mod adaptive;
pub mod local;
pub mod window;

pub use adaptive::{adaptive_mean, gaussian_kernel};
pub use local::{bernsen, sauvola};
pub use window::pad_replicate;

use tonwerk_core::Raster;

use crate::parallel::fill_rows;

/// White when the sample is strictly above the threshold, black otherwise.
#[inline]
pub(crate) fn decide(sample: u8, threshold: f64) -> u8 {
    if f64::from(sample) > threshold { 255 } else { 0 }
}

/// Binarize `src` against a per-pixel threshold `threshold(x, y)`.
pub(crate) fn binarize_with<F>(src: &Raster<u8>, threshold: F) -> Raster<u8>
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    let mut out = src.blank_like(0u8);
    fill_rows(out.samples_mut(), src.width(), |y, row| {
        for (x, (dst, &sample)) in row.iter_mut().zip(src.row(y)).enumerate() {
            *dst = decide(sample, threshold(x, y));
        }
    });
    out
}
