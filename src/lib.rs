//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Preprocessing for particle image velocimetry: extraction of fixed-size interrogation regions
//! around arbitrary (possibly out-of-bounds) grid points, and apodization with separable Gaussian
//! windows specified by their effective length rather than standard deviation.
//!

pub mod args;
pub mod error;
pub mod image;
pub mod interrogation;
pub mod logging;
pub mod region;
pub mod window;

pub use error::{Axis, Error, Result};
pub use image::{Image, Pixel, PixelFormat, Point, Rect};
pub use region::{extract_subregion, extract_subregion_into, subregion_geometry, Padding, SubregionGeometry};
