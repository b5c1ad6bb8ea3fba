// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local window statistics over an edge-replicated padded buffer.
//
// The padded buffer has `border = (size - 1) / 2` extra pixels on each side,
// so the window centred on output pixel (x, y) has its top-left corner at
// padded (x, y). All tables here are built once and only read afterwards.

use tonwerk_core::error::Result;
use tonwerk_core::{Raster, TonwerkError, WindowSize};

use crate::parallel::fill_rows;

/// Upper bound on the samples of a padded buffer (4 Gi).
pub const MAX_PADDED_SAMPLES: usize = 1 << 32;

/// Dimensions of `src` grown by `border` on every side.
///
/// Fails with `InvalidParameter` on `window_size` when the padded buffer
/// would overflow or exceed [`MAX_PADDED_SAMPLES`].
pub fn padded_dimensions(src: &Raster<u8>, border: usize) -> Result<(usize, usize)> {
    let too_large = || {
        TonwerkError::invalid(
            "window_size",
            format!(
                "neighbourhood with border {border} is too large for a {}x{} image",
                src.width(),
                src.height()
            ),
        )
    };
    let grow = |len: usize| {
        border
            .checked_mul(2)
            .and_then(|pad| len.checked_add(pad))
            .ok_or_else(too_large)
    };
    let (width, height) = (grow(src.width())?, grow(src.height())?);
    match width.checked_mul(height) {
        Some(samples) if samples <= MAX_PADDED_SAMPLES => Ok((width, height)),
        _ => Err(too_large()),
    }
}

/// Edge-replicated copy of `src` with `border` extra pixels on every side.
///
/// Out-of-range reads take the nearest edge sample, so the result is
/// `(width + 2 * border) x (height + 2 * border)`.
pub fn pad_replicate(src: &Raster<u8>, border: usize) -> Result<Raster<u8>> {
    let (width, height) = (src.width(), src.height());
    let (padded_width, padded_height) = padded_dimensions(src, border)?;
    Raster::from_fn(padded_width, padded_height, |x, y| {
        let sx = x.saturating_sub(border).min(width - 1);
        let sy = y.saturating_sub(border).min(height - 1);
        src.get(sx, sy)
    })
}

// -- Summed-area tables -------------------------------------------------------

/// Summed-area tables of sample values and squared sample values.
///
/// `sum[y * (w+1) + x]` holds the sum over the rectangle [0, 0) to (x, y)
/// (exclusive on both axes), with a zero row and column in front.
pub(crate) struct SummedArea {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl SummedArea {
    pub(crate) fn new(padded: &Raster<u8>) -> Self {
        let (w, h) = (padded.width(), padded.height());
        let stride = w + 1;
        let mut sum = vec![0u64; stride * (h + 1)];
        let mut sum_sq = vec![0u64; stride * (h + 1)];

        for y in 0..h {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for (x, &sample) in padded.row(y).iter().enumerate() {
                let v = u64::from(sample);
                row_sum += v;
                row_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                let above = y * stride + x + 1;
                sum[idx] = row_sum + sum[above];
                sum_sq[idx] = row_sq + sum_sq[above];
            }
        }

        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Sum and squared sum of the `size x size` block whose top-left corner
    /// is padded (x, y).
    pub(crate) fn block(&self, x: usize, y: usize, size: usize) -> (u64, u64) {
        let (x2, y2) = (x + size, y + size);
        let corners = |table: &[u64]| {
            (table[y2 * self.stride + x2] + table[y * self.stride + x])
                - (table[y * self.stride + x2] + table[y2 * self.stride + x])
        };
        (corners(&self.sum), corners(&self.sum_sq))
    }

    /// Mean and population standard deviation of a block.
    pub(crate) fn mean_std_dev(&self, x: usize, y: usize, size: usize) -> (f64, f64) {
        let (sum, sum_sq) = self.block(x, y, size);
        let n = (size * size) as u128;
        let (sum, sum_sq) = (u128::from(sum), u128::from(sum_sq));
        // n * sum_sq >= sum^2 (Cauchy-Schwarz), so this never underflows.
        let spread = n * sum_sq - sum * sum;
        let mean = sum as f64 / n as f64;
        let variance = spread as f64 / (n * n) as f64;
        (mean, variance.sqrt())
    }
}

// -- Separable min / max ------------------------------------------------------

/// Per-pixel `(min, max)` of the local window, for every output pixel.
pub(crate) struct WindowExtrema {
    width: usize,
    extrema: Vec<(u8, u8)>,
}

impl WindowExtrema {
    /// Horizontal pass over every padded row, then a vertical pass over the
    /// horizontal results. Exact, `O(size)` per pixel and pass.
    pub(crate) fn new(padded: &Raster<u8>, window: WindowSize, width: usize, height: usize) -> Self {
        let size = window.get();

        let mut horizontal = vec![(0u8, 0u8); padded.height() * width];
        fill_rows(&mut horizontal, width, |y, row| {
            let src = padded.row(y);
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = extrema_of(src[x..x + size].iter().copied());
            }
        });

        let mut extrema = vec![(0u8, 0u8); width * height];
        fill_rows(&mut extrema, width, |y, row| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = (y..y + size)
                    .map(|py| horizontal[py * width + x])
                    .fold((u8::MAX, u8::MIN), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
            }
        });

        Self { width, extrema }
    }

    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> (u8, u8) {
        self.extrema[y * self.width + x]
    }
}

fn extrema_of(samples: impl Iterator<Item = u8>) -> (u8, u8) {
    samples.fold((u8::MAX, u8::MIN), |(lo, hi), s| (lo.min(s), hi.max(s)))
}
