// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local-window binarization: Bernsen (local contrast) and Sauvola (local mean
// and standard deviation).

use tonwerk_core::error::Result;
use tonwerk_core::params::ensure_finite;
use tonwerk_core::{Raster, WindowSize};
use tracing::{debug, info, instrument};

use super::binarize_with;
use super::window::{SummedArea, WindowExtrema, pad_replicate};

/// Bernsen binarization.
///
/// For each pixel, `c = max - min` over the window. If `c > epsilon` the
/// threshold is the mid-range `(min + max) / 2`; otherwise it is 0, so in
/// low-contrast windows every non-black pixel becomes white.
#[instrument(skip(src), fields(width = src.width(), height = src.height(), window = window.get()))]
pub fn bernsen(src: &Raster<u8>, window: WindowSize, epsilon: f64) -> Result<Raster<u8>> {
    ensure_finite("epsilon", epsilon)?;
    info!(epsilon, "Applying Bernsen threshold");

    let padded = pad_replicate(src, window.border())?;
    let extrema = WindowExtrema::new(&padded, window, src.width(), src.height());
    debug!(padded_w = padded.width(), padded_h = padded.height(), "Window extrema computed");

    Ok(binarize_with(src, |x, y| {
        let (lo, hi) = extrema.get(x, y);
        bernsen_threshold(lo, hi, epsilon)
    }))
}

/// Sauvola binarization.
///
/// `t = mean * (1 + k * (std_dev / 128 - 1))`, with the population standard
/// deviation of the window.
#[instrument(skip(src), fields(width = src.width(), height = src.height(), window = window.get()))]
pub fn sauvola(src: &Raster<u8>, window: WindowSize, k: f64) -> Result<Raster<u8>> {
    ensure_finite("k", k)?;
    info!(k, "Applying Sauvola threshold");

    let padded = pad_replicate(src, window.border())?;
    let table = SummedArea::new(&padded);
    let size = window.get();
    debug!(padded_w = padded.width(), padded_h = padded.height(), "Summed-area tables built");

    Ok(binarize_with(src, |x, y| {
        let (mean, std_dev) = table.mean_std_dev(x, y, size);
        sauvola_threshold(mean, std_dev, k)
    }))
}

fn bernsen_threshold(lo: u8, hi: u8, epsilon: f64) -> f64 {
    let contrast = f64::from(hi - lo);
    if contrast > epsilon {
        (f64::from(lo) + f64::from(hi)) / 2.0
    } else {
        0.0
    }
}

fn sauvola_threshold(mean: f64, std_dev: f64, k: f64) -> f64 {
    mean * (1.0 + k * (std_dev / 128.0 - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: usize) -> Raster<u8> {
        Raster::from_fn(size, size, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 }).unwrap()
    }

    fn dot_on_white() -> Raster<u8> {
        Raster::from_fn(7, 7, |x, y| if (x, y) == (3, 3) { 20 } else { 255 }).unwrap()
    }

    fn is_binary(r: &Raster<u8>) -> bool {
        r.samples().iter().all(|&s| s == 0 || s == 255)
    }

    #[test]
    fn huge_windows_fail_instead_of_overflowing() {
        let src = Raster::filled(3, 3, 100u8).unwrap();
        let widest = WindowSize::new(usize::MAX).unwrap();
        assert!(bernsen(&src, widest, 15.0).is_err());
        assert!(sauvola(&src, widest, 0.5).is_err());
        let huge = WindowSize::new(100_001).unwrap();
        assert!(bernsen(&src, huge, 15.0).is_err());
    }

    #[test]
    fn bernsen_checkerboard_threshold_is_mid_range() {
        let src = checkerboard(16);
        assert_eq!(bernsen_threshold(0, 255, 15.0), 127.5);

        let out = bernsen(&src, WindowSize::new(3).unwrap(), 15.0).unwrap();
        // Every 3x3 window (borders included) spans 0..255, so the output
        // reproduces the input.
        assert_eq!(out, src);
    }

    #[test]
    fn bernsen_low_contrast_uses_zero_threshold() {
        assert_eq!(bernsen_threshold(100, 110, 15.0), 0.0);
        // Contrast equal to epsilon is not "greater than".
        assert_eq!(bernsen_threshold(100, 115, 15.0), 0.0);

        let src = Raster::from_fn(8, 8, |x, _| 100 + (x as u8)).unwrap();
        let out = bernsen(&src, WindowSize::new(3).unwrap(), 15.0).unwrap();
        assert!(out.samples().iter().all(|&s| s == 255));
    }

    #[test]
    fn bernsen_black_flat_region_stays_black() {
        let src = Raster::filled(5, 5, 0u8).unwrap();
        let out = bernsen(&src, WindowSize::new(3).unwrap(), 15.0).unwrap();
        assert!(out.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn window_of_one_uses_pixel_alone() {
        let src = Raster::from_samples(3, 1, vec![0u8, 1, 200]).unwrap();
        let one = WindowSize::new(1).unwrap();
        assert_eq!(bernsen(&src, one, 15.0).unwrap().samples(), &[0, 255, 255]);
        // sd = 0, so t = src * (1 - k).
        assert_eq!(sauvola(&src, one, 0.5).unwrap().samples(), &[0, 255, 255]);
    }

    #[test]
    fn sauvola_keeps_dark_dot_on_white() {
        let src = dot_on_white();
        let out = sauvola(&src, WindowSize::new(3).unwrap(), 0.5).unwrap();
        for y in 0..7 {
            for x in 0..7 {
                let expected = if (x, y) == (3, 3) { 0 } else { 255 };
                assert_eq!(out.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn sauvola_flat_threshold_is_half_mean() {
        assert_eq!(sauvola_threshold(100.0, 0.0, 0.5), 50.0);
        assert_eq!(sauvola_threshold(200.0, 128.0, 0.5), 200.0);

        let src = Raster::filled(6, 4, 100u8).unwrap();
        let out = sauvola(&src, WindowSize::DEFAULT_LOCAL, 0.5).unwrap();
        assert!(out.samples().iter().all(|&s| s == 255));
    }

    #[test]
    fn outputs_are_binary_and_shape_preserving() {
        let src = Raster::from_fn(23, 17, |x, y| ((x * 31 + y * 17 + x * y * 3) % 256) as u8).unwrap();
        for size in [1, 3, 7, 15, 31] {
            let window = WindowSize::new(size).unwrap();
            let b = bernsen(&src, window, 15.0).unwrap();
            let s = sauvola(&src, window, 0.5).unwrap();
            assert!(is_binary(&b) && is_binary(&s), "window {size}");
            assert!(b.same_shape(&src) && s.same_shape(&src));
        }
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let src = checkerboard(4);
        assert!(bernsen(&src, WindowSize::DEFAULT_LOCAL, f64::NAN).is_err());
        assert!(sauvola(&src, WindowSize::DEFAULT_LOCAL, f64::INFINITY).is_err());
    }

    #[test]
    fn large_image_takes_parallel_path() {
        let src = Raster::from_fn(250, 160, |x, y| ((x ^ y) & 0xff) as u8).unwrap();
        let window = WindowSize::new(5).unwrap();
        let out = sauvola(&src, window, 0.5).unwrap();
        assert!(is_binary(&out));
        assert!(out.same_shape(&src));
    }
}
