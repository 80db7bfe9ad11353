//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Separable Gaussian apodization windows.
//!

use crate::error::{Axis, Error, Result};
use crate::image::{Image, Pixel};
use rayon::prelude::*;
use super::solver::{centered_domain, find_gaussian_std, gaussian_values, GaussianStd};

/// 1-D Gaussian evaluated at integer offsets from the domain center.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowProfile {
    pub solution: GaussianStd,
    pub values: Vec<f64>
}

impl WindowProfile {
    pub fn std_dev(&self) -> f64 { self.solution.std_dev }

    pub fn len(&self) -> usize { self.values.len() }
}

#[derive(Clone, Debug)]
pub struct GaussianWindow {
    /// Profile along the vertical axis (`height` values).
    pub height_profile: WindowProfile,
    /// Profile along the horizontal axis (`width` values).
    pub width_profile: WindowProfile,
    pub window: Image<f64>
}

/// Returns a Gaussian profile of `length` samples whose effective length is `effective_length`.
pub fn make_gaussian_profile(length: usize, effective_length: f64) -> Result<WindowProfile> {
    let solution = find_gaussian_std(length, effective_length)?;

    let x = centered_domain(length);
    let mut values = vec![0.0; length];
    gaussian_values(&x, solution.std_dev, &mut values);

    Ok(WindowProfile{ solution, values })
}

/// Creates a `width`x`height` single-channel window; see `make_gaussian_filter_2d_into`.
pub fn make_gaussian_filter_2d(
    height: u32,
    width: u32,
    effective_rows: f64,
    effective_cols: f64
) -> Result<GaussianWindow> {
    let mut window = Image::<f64>::new(width, height, 1);
    let (height_profile, width_profile) = make_gaussian_filter_2d_into(&mut window, effective_rows, effective_cols)?;

    Ok(GaussianWindow{ height_profile, width_profile, window })
}

/// Fills `window` with the outer product of two Gaussian profiles: one along the vertical axis with
/// effective length `effective_rows`, and one along the horizontal axis with `effective_cols`.
///
/// Returns (height profile, width profile). Solver errors are tagged with the axis they concern.
///
pub fn make_gaussian_filter_2d_into(
    window: &mut Image<f64>,
    effective_rows: f64,
    effective_cols: f64
) -> Result<(WindowProfile, WindowProfile)> {
    if window.channels() != 1 {
        return Err(Error::ShapeMismatch{
            expected: (window.width(), window.height(), 1),
            actual: window.shape()
        });
    }

    let height_profile = make_gaussian_profile(window.height() as usize, effective_rows)
        .map_err(|e| e.on_axis(Axis::Rows))?;
    let width_profile = make_gaussian_profile(window.width() as usize, effective_cols)
        .map_err(|e| e.on_axis(Axis::Cols))?;

    let width = window.width() as usize;
    window.pixels_mut()
        .par_chunks_mut(width)
        .zip(height_profile.values.par_iter())
        .for_each(|(line, h_value)| {
            for (value, w_value) in line.iter_mut().zip(width_profile.values.iter()) {
                *value = h_value * w_value;
            }
        });

    Ok((height_profile, width_profile))
}

/// Multiplies each channel of `image` by `window` element-wise.
pub fn multiply_by_window(image: &mut Image<f64>, window: &Image<f64>) -> Result<()> {
    if window.channels() != 1 || image.width() != window.width() || image.height() != window.height() {
        return Err(Error::ShapeMismatch{
            expected: (image.width(), image.height(), 1),
            actual: window.shape()
        });
    }

    let channels = image.channels();
    for y in 0..image.height() {
        let wnd_line = window.line(y);
        for (pixel, wnd_value) in image.line_mut(y).chunks_mut(channels).zip(wnd_line.iter()) {
            for value in pixel.iter_mut() {
                *value *= wnd_value;
            }
        }
    }

    Ok(())
}

/// Returns `region` converted to `f64` and multiplied by `window`.
pub fn apply_window<T: Pixel>(region: &Image<T>, window: &Image<f64>) -> Result<Image<f64>> {
    let mut result = region.to_f64();
    multiply_by_window(&mut result, window)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::integrate::trapz;
    use crate::window::solver::RELATIVE_TOLERANCE;

    #[test]
    fn given_profile_peak_at_center_and_symmetric() {
        let profile = make_gaussian_profile(33, 10.0).unwrap();

        assert_eq!(33, profile.len());
        assert_eq!(1.0, profile.values[16]);
        for k in 0..16 {
            assert_eq!(profile.values[k], profile.values[32 - k]);
            assert!(profile.values[k] < profile.values[k + 1]);
        }

        let area = trapz(&centered_domain(33), &profile.values);
        assert!((area / 10.0 - 1.0).abs() <= RELATIVE_TOLERANCE);
    }

    #[test]
    fn given_target_shape_window_has_exactly_that_shape() {
        let result = make_gaussian_filter_2d(48, 80, 20.0, 30.0).unwrap();
        assert_eq!((80, 48, 1), result.window.shape());
        assert_eq!(48, result.height_profile.len());
        assert_eq!(80, result.width_profile.len());
    }

    #[test]
    fn window_is_outer_product_of_profiles() {
        let result = make_gaussian_filter_2d(64, 96, 20.0, 40.0).unwrap();

        for y in 0..64 {
            let line = result.window.line(y);
            for x in 0..96 {
                assert_eq!(
                    result.height_profile.values[y as usize] * result.width_profile.values[x],
                    line[x]
                );
            }
        }
    }

    #[test]
    fn given_different_lengths_per_axis_solve_independently() {
        let result = make_gaussian_filter_2d(128, 128, 64.0, 32.0).unwrap();
        assert_eq!(find_gaussian_std(128, 64.0).unwrap(), result.height_profile.solution);
        assert_eq!(find_gaussian_std(128, 32.0).unwrap(), result.width_profile.solution);
        assert!(result.height_profile.std_dev() > result.width_profile.std_dev());
    }

    #[test]
    fn given_invalid_rows_target_report_rows_axis() {
        match make_gaussian_filter_2d(1, 64, 1.0, 16.0) {
            Err(Error::InvalidTarget{ axis: Some(Axis::Rows), length: 1, .. }) => (),
            other => panic!("Expected: InvalidTarget for rows, got {:?}.", other)
        }
    }

    #[test]
    fn given_invalid_cols_target_report_cols_axis() {
        match make_gaussian_filter_2d(64, 32, 16.0, 40.0) {
            Err(Error::InvalidTarget{ axis: Some(Axis::Cols), length: 32, .. }) => (),
            other => panic!("Expected: InvalidTarget for cols, got {:?}.", other)
        }
    }

    #[test]
    fn given_multichannel_target_fail() {
        let mut window = Image::<f64>::new(16, 16, 3);
        match make_gaussian_filter_2d_into(&mut window, 4.0, 4.0) {
            Err(Error::ShapeMismatch{ .. }) => (),
            other => panic!("Expected: ShapeMismatch, got {:?}.", other)
        }
    }

    #[test]
    fn given_uniform_region_windowed_equals_window() {
        let window = make_gaussian_filter_2d(16, 24, 6.0, 8.0).unwrap().window;
        let region = Image::<u8>::from_fn(24, 16, |_, _| 1);

        assert_eq!(window, apply_window(&region, &window).unwrap());
    }

    #[test]
    fn given_multichannel_region_window_each_channel() {
        let window = Image::<f64>::new_from_pixels(2, 1, 1, vec![0.5, 0.25]).unwrap();
        let region = Image::<u16>::new_from_pixels(2, 1, 3, vec![2, 4, 8, 16, 32, 64]).unwrap();

        let result = apply_window(&region, &window).unwrap();
        assert_eq!(&[1.0, 2.0, 4.0, 4.0, 8.0, 16.0], result.pixels());
    }

    #[test]
    fn given_window_of_different_size_fail() {
        let window = Image::<f64>::new(8, 8, 1);
        let region = Image::<f32>::new(8, 9, 1);
        match apply_window(&region, &window) {
            Err(Error::ShapeMismatch{ .. }) => (),
            other => panic!("Expected: ShapeMismatch, got {:?}.", other)
        }
    }
}
