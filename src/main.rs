//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Entry point and main functions of the `pivwin` executable.
//!

use pivwin::args;
use pivwin::error::{Error, Result};
use pivwin::image::fits::{load_fits, save_fits};
use pivwin::logging::Logger;
use pivwin::region::{extract_subregion, subregion_geometry};
use pivwin::window::gaussian::{apply_window, make_gaussian_filter_2d};

const VERSION_STRING: &'static str = include_str!(concat!(env!("OUT_DIR"), "/version"));

fn print_header() {
    println!(r#"
_________________

   {}
   Interrogation window extraction and Gaussian apodization for PIV

   Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>

   This program is licensed under MIT license (see LICENSE.txt for details).

_________________
"#,
        VERSION_STRING
    );
}

fn apodize_region(config: &args::Configuration, logger: &Logger) -> Result<()> {
    let grid_point = config.grid_point();
    let region_size = config.region_size();
    let effective_size = config.effective_size();

    logger.info(&format!("Loading {}...", config.input_file()));
    let image = load_fits(config.input_file()).map_err(Error::Fits)?;
    logger.verbose(&format!("Image size: {}x{}.", image.width(), image.height()));

    let geometry = subregion_geometry(
        image.height(), image.width(), grid_point.y, grid_point.x, region_size.y, region_size.x
    )?;
    logger.verbose(&format!(
        "Region centered at {}, requested {:?}, copied from image {:?}, padding {:?}.",
        geometry.center, geometry.requested, geometry.clipped, geometry.padding
    ));

    let region = extract_subregion(&image, grid_point.y, grid_point.x, region_size.y, region_size.x)?;

    let window = make_gaussian_filter_2d(region_size.y, region_size.x, effective_size.y, effective_size.x)?;
    logger.verbose(&format!(
        "Gaussian std. dev.: {:.6} along rows ({} iterations), {:.6} along columns ({} iterations).",
        window.height_profile.std_dev(), window.height_profile.solution.iterations,
        window.width_profile.std_dev(), window.width_profile.solution.iterations
    ));

    let apodized = apply_window(&region, &window.window)?;

    if let Some(region_file) = config.region_file() {
        logger.info(&format!("saving: {}", region_file));
        save_fits(&region, region_file).map_err(Error::Fits)?;
    }

    if let Some(window_file) = config.window_file() {
        logger.info(&format!("saving: {}", window_file));
        save_fits(&window.window, window_file).map_err(Error::Fits)?;
    }

    logger.info(&format!("saving: {}", config.output_file()));
    save_fits(&apodized, config.output_file()).map_err(Error::Fits)?;

    Ok(())
}

fn run_program() -> bool {
    print_header();
    println!();

    let config = match args::parse_command_line(std::env::args()) {
        Ok(config) => match config {
            None => return true, // help was requested
            Some(config) => config
        },
        Err(_) => { println!("\nUse --{} for more information.\n", args::cmdline::HELP); return false; }
    };

    let logger = Logger::new(config.log_level());

    let tstart = std::time::Instant::now();

    if let Err(e) = apodize_region(&config, &logger) {
        logger.error(&format!("Error: {}.", e));
        return false;
    }

    let elapsed = tstart.elapsed();
    let mins = elapsed.as_secs() / 60;
    let secs = elapsed.as_secs() % 60;
    let frac_secs = elapsed.as_secs_f32() - (mins * 60) as f32 - secs as f32;
    logger.info(&format!("Completed in {} min {:02}.{:0.0} s.", mins, secs, frac_secs * 10.0));

    true
}

fn main() {
    std::process::exit(if run_program() { 0 } else { 1 });
}
