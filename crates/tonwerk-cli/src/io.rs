// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decode/encode for the command line. The transform crates never touch
// the filesystem; this is the only place that does.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::Raster;
use tonwerk_transform::to_gray_image;
use tracing::{debug, info, instrument};

/// Decode an image file. The format is inferred from its contents/extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|err| {
        TonwerkError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    info!(width = image.width(), height = image.height(), "Image loaded");
    Ok(image)
}

/// Encode an intensity raster. The format is inferred from the extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn save_raster(raster: &Raster<u8>, path: &Path) -> Result<()> {
    let gray = to_gray_image(raster)?;
    gray.save(path).map_err(|err| {
        TonwerkError::ImageError(format!("failed to save image to {}: {}", path.display(), err))
    })?;
    debug!("Image written");
    Ok(())
}

/// `photo.jpg` + `sauvola` -> `photo.sauvola.jpg`, in the same directory.
/// Inputs without an extension get `.png`.
pub fn derived_output_path(input: &Path, operation: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    input.with_file_name(format!("{stem}.{operation}.{ext}"))
}
