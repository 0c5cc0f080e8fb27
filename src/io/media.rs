// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map image loading and resampling.
//!
//! The map is decoded once at startup and kept at full resolution; every
//! canvas resize produces a fresh copy resampled to the exact viewport.

use anyhow::{Context, Result};
use image::{imageops::FilterType, RgbaImage};
use std::path::Path;

/// RGBA pixels ready to upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// The background map at its original resolution.
pub struct MapImage {
    original: RgbaImage,
}

impl MapImage {
    /// Decode the map image from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let original = image::open(path)
            .with_context(|| format!("Failed to load map image {}", path.display()))?
            .to_rgba8();
        log::info!(
            "Loaded map image: {} ({}x{})",
            path.display(),
            original.width(),
            original.height()
        );
        Ok(Self { original })
    }

    /// Resample the map to exactly `width` x `height` pixels (Lanczos).
    pub fn resample(&self, width: u32, height: u32) -> LoadedImage {
        let width = width.max(1);
        let height = height.max(1);
        let resized = image::imageops::resize(&self.original, width, height, FilterType::Lanczos3);
        LoadedImage {
            width,
            height,
            pixels: resized.into_raw(),
        }
    }
}
