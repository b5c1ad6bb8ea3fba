// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster — the single-channel intensity grid every transform consumes and
// produces.

use crate::error::{Result, TonwerkError};

/// A row-major grid of intensity samples.
///
/// `Raster<u8>` is the displayable 0–255 representation. `Raster<f32>` is the
/// floating intermediate produced by the power transform.
///
/// Invariants: `width > 0`, `height > 0`, `samples.len() == width * height`.
/// Every constructor enforces them, so transforms never re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T = u8> {
    width: usize,
    height: usize,
    samples: Vec<T>,
}

impl<T: Copy> Raster<T> {
    // -- Construction ---------------------------------------------------------

    /// Wrap existing row-major samples.
    pub fn from_samples(width: usize, height: usize, samples: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if samples.len() != expected {
            return Err(TonwerkError::DimensionMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A raster where every sample equals `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            samples: vec![value; width * height],
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    fn from_parts_unchecked(width: usize, height: usize, samples: Vec<T>) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self {
            width,
            height,
            samples,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples (`width * height`).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a raster has at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.samples[y * self.width + x]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.samples[start..start + self.width]
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Mutable access to the samples. The shape cannot change through it.
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// Apply `f` to every sample, producing a raster of the same shape.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Raster<U> {
        Raster {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(|&s| f(s)).collect(),
        }
    }

    /// Allocate an output of this raster's shape, filled with `value`.
    pub fn blank_like<U: Copy>(&self, value: U) -> Raster<U> {
        Raster::from_parts_unchecked(self.width, self.height, vec![value; self.len()])
    }

    /// Same shape as `other`.
    pub fn same_shape<U>(&self, other: &Raster<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl Raster<u8> {
    /// Global minimum and maximum intensity.
    pub fn min_max(&self) -> (u8, u8) {
        self.samples
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)))
    }

    /// Global maximum intensity.
    pub fn max(&self) -> u8 {
        self.min_max().1
    }

    /// Widen to the floating representation without rescaling.
    pub fn to_f32(&self) -> Raster<f32> {
        self.map(f32::from)
    }
}

impl Raster<f32> {
    /// Narrow to 8-bit by saturating cast: round to nearest, clamp to 0–255,
    /// NaN becomes 0.
    pub fn to_u8_saturating(&self) -> Raster<u8> {
        self.map(|v| saturate_u8(f64::from(v)))
    }
}

/// Round-to-nearest (ties to even) saturating cast into the 0–255 range.
#[inline]
pub fn saturate_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TonwerkError::invalid(
            "dimensions",
            format!("raster must be at least 1x1, got {width}x{height}"),
        ));
    }
    Ok(())
}
