// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gaussian adaptive mean threshold.

use image::{ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::params::ensure_finite;
use tonwerk_core::{Raster, WindowSize};
use tracing::{debug, info, instrument};

use super::binarize_with;
use super::window::padded_dimensions;
use crate::intensity::dimension_u32;

/// Binarize against a Gaussian-weighted local mean minus `offset`.
///
/// The weighted mean is rounded to the nearest intensity level before the
/// offset is subtracted. Output is 255 where `src > mean - offset`.
#[instrument(skip(src), fields(width = src.width(), height = src.height(), window = window.get()))]
pub fn adaptive_mean(src: &Raster<u8>, window: WindowSize, offset: f64) -> Result<Raster<u8>> {
    ensure_finite("offset", offset)?;
    padded_dimensions(src, window.border())?;
    info!(offset, "Applying adaptive mean threshold");

    let kernel = gaussian_kernel(window);
    let means = gaussian_means(src, &kernel)?;
    debug!(taps = kernel.len(), "Gaussian mean computed");

    let width = src.width();
    Ok(binarize_with(src, |x, y| {
        f64::from(means[y * width + x]).round_ties_even() - offset
    }))
}

/// Normalised 1-D Gaussian kernel with `window` taps.
///
/// Sizes up to 7 use fixed binomial-style kernels; larger sizes sample a
/// Gaussian with `sigma = 0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(window: WindowSize) -> Vec<f64> {
    match window.get() {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        size => {
            let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let centre = window.border() as f64;
            let weights: Vec<f64> = (0..size)
                .map(|i| {
                    let d = i as f64 - centre;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let total: f64 = weights.iter().sum();
            weights.into_iter().map(|w| w / total).collect()
        }
    }
}

/// Separable Gaussian-weighted mean of every pixel, row-major.
///
/// `imageproc` clamps reads to the nearest edge, which matches replicate
/// padding.
fn gaussian_means(src: &Raster<u8>, kernel: &[f64]) -> Result<Vec<f32>> {
    let width = dimension_u32(src.width())?;
    let height = dimension_u32(src.height())?;
    let image: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_raw(width, height, src.to_f32().into_samples()).ok_or_else(|| {
            TonwerkError::ImageError(format!("buffer does not fit a {width}x{height} float image"))
        })?;
    let taps: Vec<f32> = kernel.iter().map(|&w| w as f32).collect();
    Ok(separable_filter_equal(&image, &taps).into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::pad_replicate;

    #[test]
    fn kernels_are_normalised_and_symmetric() {
        for size in [1, 3, 5, 7, 9, 11, 15, 31] {
            let kernel = gaussian_kernel(WindowSize::new(size).unwrap());
            assert_eq!(kernel.len(), size);
            let total: f64 = kernel.iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "size {size}");
            for i in 0..size {
                assert!((kernel[i] - kernel[size - 1 - i]).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn kernel_peaks_in_the_centre() {
        let kernel = gaussian_kernel(WindowSize::DEFAULT_ADAPTIVE);
        let centre = kernel[5];
        assert!(kernel.iter().all(|&w| w <= centre));
    }

    #[test]
    fn means_replicate_the_border() {
        // Window wider than the raster: every read past the edge repeats it.
        let src = Raster::from_fn(4, 3, |x, y| ((x * 61 + y * 29) % 256) as u8).unwrap();
        let window = WindowSize::new(9).unwrap();
        let kernel = gaussian_kernel(window);
        let means = gaussian_means(&src, &kernel).unwrap();

        let padded = pad_replicate(&src, window.border()).unwrap();
        for y in 0..src.height() {
            for x in 0..src.width() {
                let mut expected = 0.0;
                for (j, wy) in kernel.iter().enumerate() {
                    for (i, wx) in kernel.iter().enumerate() {
                        expected += wy * wx * f64::from(padded.get(x + i, y + j));
                    }
                }
                let got = f64::from(means[y * src.width() + x]);
                assert!((got - expected).abs() < 1e-3, "({x}, {y}): {got} vs {expected}");
            }
        }
    }

    #[test]
    fn oversized_window_is_rejected() {
        let src = Raster::filled(3, 3, 100u8).unwrap();
        let widest = WindowSize::new(usize::MAX).unwrap();
        assert!(adaptive_mean(&src, widest, 3.0).is_err());
    }

    #[test]
    fn flat_raster_is_all_white() {
        let src = Raster::filled(12, 9, 77u8).unwrap();
        let out = adaptive_mean(&src, WindowSize::DEFAULT_ADAPTIVE, 3.0).unwrap();
        assert!(out.samples().iter().all(|&s| s == 255));
    }

    #[test]
    fn dark_dot_stays_dark() {
        let src = Raster::from_fn(7, 7, |x, y| if (x, y) == (3, 3) { 20 } else { 255 }).unwrap();
        let out = adaptive_mean(&src, WindowSize::new(3).unwrap(), 3.0).unwrap();
        // Centre mean = 0.25 * 20 + 0.75 * 255 = 196.25 -> 196, threshold 193.
        assert_eq!(out.get(3, 3), 0);
        assert_eq!(out.get(2, 3), 255);
        assert_eq!(out.get(0, 0), 255);
    }

    #[test]
    fn outputs_are_binary() {
        let src = Raster::from_fn(40, 30, |x, y| ((x * 7 + y * 13) % 256) as u8).unwrap();
        let out = adaptive_mean(&src, WindowSize::new(9).unwrap(), 3.0).unwrap();
        assert!(out.same_shape(&src));
        assert!(out.samples().iter().all(|&s| s == 0 || s == 255));
    }

    #[test]
    fn large_offset_whitens_everything() {
        let src = Raster::from_fn(10, 10, |x, _| (x * 25) as u8).unwrap();
        let out = adaptive_mean(&src, WindowSize::new(5).unwrap(), 300.0).unwrap();
        assert!(out.samples().iter().all(|&s| s == 255));
    }

    #[test]
    fn nan_offset_is_rejected() {
        let src = Raster::filled(2, 2, 1u8).unwrap();
        assert!(adaptive_mean(&src, WindowSize::DEFAULT_ADAPTIVE, f64::NAN).is_err());
    }
}
