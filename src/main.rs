// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! shelfmask - interactive region masking for shelf photographs.
//!
//! A desktop viewer for marking stored items on a shelf photo with a
//! rectangle, polygon or lasso, previewing the clipped region, and picking
//! existing masks by clicking on them.

mod app;
mod ui;

use anyhow::Result;
use app::ShelfmaskApp;
use shelfmask::EngineConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EngineConfig::from_env();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("shelfmask"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "shelfmask",
        options,
        Box::new(move |_cc| Ok(Box::new(ShelfmaskApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
