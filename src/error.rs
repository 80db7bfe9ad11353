//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Error type.
//!

use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum Axis {
    #[strum(serialize = "rows")]
    Rows,
    #[strum(serialize = "cols")]
    Cols
}

#[derive(Error, Debug)]
pub enum Error {
    /// Subregion size is zero, exceeds the source image, or leaves nothing to copy after clipping.
    #[error("invalid {axis} dimension: requested {requested}, source has {available}")]
    InvalidDimension { axis: Axis, requested: i64, available: u32 },

    #[error("invalid effective length {target} for {} ({length} samples): {reason}", axis_name(.axis))]
    InvalidTarget { axis: Option<Axis>, length: usize, target: f64, reason: &'static str },

    #[error("standard deviation for effective length {target} ({length} samples, {}) did not converge after {iterations} iterations", axis_name(.axis))]
    NonConvergence { axis: Option<Axis>, length: usize, target: f64, iterations: usize },

    /// Dimensions are (width, height, channels).
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: (u32, u32, usize), actual: (u32, u32, usize) },

    #[cfg(feature = "fits")]
    #[error("FITS error: {0:?}")]
    Fits(crate::image::fits::FitsError)
}

pub type Result<T> = std::result::Result<T, Error>;

fn axis_name(axis: &Option<Axis>) -> String {
    match axis {
        Some(axis) => format!("{} axis", axis),
        None => "axis".to_string()
    }
}

impl Error {
    /// Tags a window solver error with the axis it was computed for.
    pub fn on_axis(self, axis: Axis) -> Error {
        match self {
            Error::InvalidTarget{ length, target, reason, .. } =>
                Error::InvalidTarget{ axis: Some(axis), length, target, reason },

            Error::NonConvergence{ length, target, iterations, .. } =>
                Error::NonConvergence{ axis: Some(axis), length, target, iterations },

            other => other
        }
    }
}
