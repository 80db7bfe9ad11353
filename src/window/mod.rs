//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Gaussian apodization windows parameterized by effective length.
//!
//! The effective length of a window is the length of a rectangular window of height 1
//! having the same (trapezoidal) area.
//!

pub mod gaussian;
pub mod integrate;
pub mod solver;

pub use gaussian::{
    apply_window, make_gaussian_filter_2d, make_gaussian_filter_2d_into, make_gaussian_profile, multiply_by_window,
    GaussianWindow, WindowProfile
};
pub use integrate::trapz;
pub use solver::{find_gaussian_std, GaussianStd};
