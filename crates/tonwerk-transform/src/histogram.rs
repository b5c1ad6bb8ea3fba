// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Histogram-range transforms — two passes over the raster: a global min/max
// scan, then a per-pixel remap onto 0–255.
//
// Fractional results are truncated toward zero, the same as assigning a
// real value straight into an 8-bit sample.

use tonwerk_core::Raster;
use tracing::{debug, info, instrument};

use crate::parallel::map_raster;

/// Logarithmic compression: `dst = c * log10(1 + src)` with
/// `c = 255 / log10(1 + max)`.
///
/// An all-black raster has no defined `c`; it is returned as all zeros.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn log_transform(src: &Raster<u8>) -> Raster<u8> {
    let f_max = src.max();
    info!(f_max, "Applying log transform");

    if f_max == 0 {
        debug!("All-zero raster; returning zeros");
        return src.blank_like(0u8);
    }

    let denom = (1.0 + f64::from(f_max)).log10();
    // Divide first: the ratio is exactly 1.0 at the maximum, so it maps to 255.
    let lut: [u8; 256] = std::array::from_fn(|level| {
        let scaled = 255.0 * ((1.0 + level as f64).log10() / denom);
        scaled.clamp(0.0, 255.0) as u8
    });
    map_raster(src, |s| lut[usize::from(s)])
}

/// Linear contrast stretch: `dst = c * (src - min)` with
/// `c = 255 / (max - min)`.
///
/// A flat raster (`max == min`) is returned as all zeros.
#[instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn linear_contrast_stretch(src: &Raster<u8>) -> Raster<u8> {
    let (f_min, f_max) = src.min_max();
    info!(f_min, f_max, "Applying linear contrast stretch");

    if f_max == f_min {
        debug!(value = f_min, "Flat raster; returning zeros");
        return src.blank_like(0u8);
    }

    // Integer arithmetic gives the exact truncated value of c * (s - min).
    let range = u32::from(f_max - f_min);
    map_raster(src, |s| {
        let offset = u32::from(s - f_min);
        (255 * offset / range) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_raster_stretches_to_zero() {
        let r = Raster::filled(5, 5, 42u8).unwrap();
        let out = linear_contrast_stretch(&r);
        assert!(out.samples().iter().all(|&s| s == 0));
        assert!(out.same_shape(&r));
    }

    #[test]
    fn stretch_hits_full_range() {
        let r = Raster::from_samples(4, 1, vec![50u8, 60, 53, 57]).unwrap();
        let out = linear_contrast_stretch(&r);
        assert_eq!(out.min_max(), (0, 255));
        // 255 * 3 / 10 = 76.5 -> truncated
        assert_eq!(out.get(2, 0), 76);
    }

    #[test]
    fn stretch_covers_every_range_width() {
        for hi in 1u8..=255 {
            let r = Raster::from_samples(2, 1, vec![0u8, hi]).unwrap();
            assert_eq!(linear_contrast_stretch(&r).min_max(), (0, 255), "range {hi}");
        }
    }

    #[test]
    fn log_of_black_is_black() {
        let r = Raster::filled(3, 2, 0u8).unwrap();
        assert!(log_transform(&r).samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn log_is_monotonic_and_bounded() {
        let r = Raster::from_fn(16, 16, |x, y| (y * 16 + x) as u8).unwrap();
        let out = log_transform(&r);
        let samples = out.samples();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(samples[0], 0);
        assert_eq!(samples[255], 255);
    }

    #[test]
    fn log_maps_max_to_white_for_any_max() {
        for f_max in 1u8..=255 {
            let r = Raster::from_samples(2, 1, vec![0u8, f_max]).unwrap();
            assert_eq!(log_transform(&r).get(1, 0), 255, "max {f_max}");
        }
    }

    #[test]
    fn log_brightens_midtones() {
        let r = Raster::from_samples(2, 1, vec![15u8, 255]).unwrap();
        // 255 * log10(16) / log10(256) = 127.5
        assert_eq!(log_transform(&r).get(0, 0), 127);
    }
}
