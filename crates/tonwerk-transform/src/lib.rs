// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tonwerk-transform — Grayscale raster transforms.
//
// Provides point operations (linear remap, add, negate, multiply, power),
// histogram-range transforms (log compression, linear contrast stretch), and
// adaptive binarization (Gaussian adaptive mean, Bernsen, Sauvola). Every
// transform takes its source raster explicitly and returns a new one.

pub mod dispatch;
pub mod histogram;
pub mod intensity;
pub mod point;
pub mod threshold;

mod parallel;

// Re-export the entry points so callers can use `tonwerk_transform::sauvola` etc.
pub use dispatch::{apply, apply_to_image};
pub use histogram::{linear_contrast_stretch, log_transform};
pub use intensity::{from_gray_image, to_gray_image, to_intensity};
pub use point::{add, linear_remap, multiply, negate, power};
pub use threshold::{adaptive_mean, bernsen, pad_replicate, sauvola};
