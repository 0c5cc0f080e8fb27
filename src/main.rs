// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pinmap - labeled pins on a map image
//!
//! A desktop application for marking places on a static map with named,
//! colored, draggable pins that are remembered between sessions.

mod annotator;
mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use annotator::MapAnnotator;
use anyhow::Result;
use app::PinmapApp;
use io::media::MapImage;
use std::path::Path;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let (config, annotator, map) = match startup() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Startup failed: {:#}", e);
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Pinmap")
                .set_description(format!("{:#}", e))
                .show();
            return Err(e);
        }
    };

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Pinmap",
        options,
        Box::new(|_cc| Ok(Box::new(PinmapApp::new(config, annotator, map)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

/// Load settings, the map and the saved entries. Any failure is fatal.
fn startup() -> Result<(config::AppConfig, MapAnnotator, MapImage)> {
    let config = config::load_config(Path::new(config::CONFIG_FILE))?;
    let map = MapImage::open(&config.map_image)?;

    let mut annotator = MapAnnotator::new(config.default_color, Some(config.state_file.clone()));
    annotator.load_state(io::serialization::read_state(&config.state_file)?);

    Ok((config, annotator, map))
}
