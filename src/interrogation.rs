//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Preparation of apodized interrogation regions.
//!

use cgmath::Vector2;
use crate::error::Result;
use crate::image::{Image, Pixel, Point};
use crate::logging::Logger;
use crate::region::extract_subregion;
use crate::window::gaussian::{apply_window, make_gaussian_filter_2d, GaussianWindow};
use rayon::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterrogationParams {
    /// Subregion size in pixels; `x`: width, `y`: height.
    pub region_size: Vector2<u32>,
    /// Effective window lengths; `x`: along columns, `y`: along rows.
    pub effective_size: Vector2<f64>
}

impl InterrogationParams {
    pub fn new(height: u32, width: u32, effective_rows: f64, effective_cols: f64) -> InterrogationParams {
        InterrogationParams{
            region_size: Vector2{ x: width, y: height },
            effective_size: Vector2{ x: effective_cols, y: effective_rows }
        }
    }

    /// Returns the window shared by all regions extracted with these parameters.
    pub fn make_window(&self) -> Result<GaussianWindow> {
        make_gaussian_filter_2d(
            self.region_size.y,
            self.region_size.x,
            self.effective_size.y,
            self.effective_size.x
        )
    }
}

pub struct InterrogationRegions {
    pub window: GaussianWindow,
    /// Apodized regions, in the order of grid points.
    pub regions: Vec<Image<f64>>
}

/// Extracts and apodizes the region around a single grid point.
pub fn prepare_region<T: Pixel>(
    image: &Image<T>,
    grid_point: &Point,
    params: &InterrogationParams,
    window: &Image<f64>
) -> Result<Image<f64>> {
    let region = extract_subregion(
        image,
        grid_point.row(),
        grid_point.col(),
        params.region_size.y,
        params.region_size.x
    )?;

    apply_window(&region, window)
}

/// Extracts regions around all `grid_points` (in parallel) and multiplies them by a common Gaussian window.
///
/// If any region fails, returns the error of the first failing grid point.
///
pub fn prepare_regions<T: Pixel>(
    image: &Image<T>,
    grid_points: &[Point],
    params: &InterrogationParams,
    logger: &Logger
) -> Result<InterrogationRegions> {
    let window = params.make_window()?;
    logger.verbose(&format!(
        "Gaussian window {}x{}: std. dev. {:.4} (rows, {} iterations), {:.4} (cols, {} iterations).",
        params.region_size.x, params.region_size.y,
        window.height_profile.std_dev(), window.height_profile.solution.iterations,
        window.width_profile.std_dev(), window.width_profile.solution.iterations
    ));

    let results: Vec<Result<Image<f64>>> = grid_points
        .par_iter()
        .map(|grid_point| prepare_region(image, grid_point, params, &window.window))
        .collect();

    let regions = results.into_iter().collect::<Result<Vec<_>>>()?;
    logger.verbose(&format!("Prepared {} interrogation region(s).", regions.len()));

    Ok(InterrogationRegions{ window, regions })
}
