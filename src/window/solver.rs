//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Standard deviation of a Gaussian window with a given effective length.
//!

use crate::error::{Error, Result};
use super::integrate::trapz;

/// Initial guess of the standard deviation, relative to the effective length.
pub const INITIAL_STD_DEV_FACTOR: f64 = 50.0;

/// Initial upper bound of the standard deviation, relative to the number of samples.
pub const MAX_STD_DEV_FACTOR: f64 = 100.0;

/// Maximum accepted |1 - area / effective length|.
pub const RELATIVE_TOLERANCE: f64 = 1.0e-5;

pub const MAX_ITERATIONS: usize = 200;

/// Maximum number of doublings of the upper bound when it does not bracket the target.
const MAX_BOUND_EXPANSIONS: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct GaussianStd {
    pub std_dev: f64,
    /// Trapezoidal area under the sampled Gaussian with `std_dev`.
    pub area: f64,
    /// Number of bisection steps; 0 if the initial guess was already within tolerance.
    pub iterations: usize
}

/// Returns sample positions `k - (n - 1)/2`, `k` = 0..n.
pub fn centered_domain(n: usize) -> Vec<f64> {
    let domain_centroid = (n as f64 - 1.0) / 2.0;
    (0..n).map(|k| k as f64 - domain_centroid).collect()
}

/// Evaluates exp(-x²/(2σ²)) at each `x` and writes the values to `output`.
pub fn gaussian_values(x: &[f64], std_dev: f64, output: &mut [f64]) {
    assert!(x.len() == output.len());

    let denominator = 2.0 * std_dev * std_dev;
    for (out, x) in output.iter_mut().zip(x.iter()) {
        *out = (-x * x / denominator).exp();
    }
}

fn invalid_target(length: usize, target: f64, reason: &'static str) -> Error {
    Error::InvalidTarget{ axis: None, length, target, reason }
}

/// Finds the standard deviation of a Gaussian sampled at `dimension_length` integer offsets from the
/// domain center, whose trapezoidal area equals `effective_window_length`, i.e. the length of a
/// rectangular window of height 1 having the same area.
///
/// The effective length must lie in the range attainable by such a Gaussian: below `dimension_length - 1`
/// (the limit for infinite standard deviation) and, for an odd number of samples, not below 1
/// (the limit for zero standard deviation, where only the central sample remains).
///
pub fn find_gaussian_std(dimension_length: usize, effective_window_length: f64) -> Result<GaussianStd> {
    let n = dimension_length;
    let target = effective_window_length;

    if n <= 1 {
        return Err(invalid_target(n, target, "at least 2 samples are required"));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(invalid_target(n, target, "must be positive and finite"));
    }
    if target >= (n - 1) as f64 {
        return Err(invalid_target(n, target, "must be smaller than the number of samples minus 1"));
    }
    if n % 2 == 1 && target < 1.0 {
        return Err(invalid_target(n, target, "must be at least 1 for an odd number of samples"));
    }

    let x = centered_domain(n);
    let mut g = vec![0.0; n];
    let mut gaussian_area = |std_dev: f64| {
        gaussian_values(&x, std_dev, &mut g);
        trapz(&x, &g)
    };
    let area_error = |area: f64| (1.0 - area / target).abs();

    let mut std_dev = INITIAL_STD_DEV_FACTOR * target;
    let mut area = gaussian_area(std_dev);
    if area_error(area) <= RELATIVE_TOLERANCE {
        return Ok(GaussianStd{ std_dev, area, iterations: 0 });
    }

    let mut std_dev_min = 0.0;
    let mut std_dev_max = MAX_STD_DEV_FACTOR * n as f64;

    // the area increases monotonically with the standard deviation, so the initial guess
    // already narrows down the search interval
    if area > target {
        std_dev_max = std_dev_max.min(std_dev);
    } else {
        std_dev_min = std_dev;
        std_dev_max = std_dev_max.max(std_dev);
    }

    let mut num_expansions = 0;
    while gaussian_area(std_dev_max) < target {
        if num_expansions == MAX_BOUND_EXPANSIONS {
            return Err(Error::NonConvergence{ axis: None, length: n, target, iterations: 0 });
        }
        std_dev_min = std_dev_max;
        std_dev_max *= 2.0;
        num_expansions += 1;
    }

    for iteration in 1..=MAX_ITERATIONS {
        std_dev = std_dev_min + (std_dev_max - std_dev_min) / 2.0;
        area = gaussian_area(std_dev);

        if area_error(area) <= RELATIVE_TOLERANCE {
            return Ok(GaussianStd{ std_dev, area, iterations: iteration });
        }

        if area < target {
            std_dev_min = std_dev;
        } else {
            std_dev_max = std_dev;
        }
    }

    Err(Error::NonConvergence{ axis: None, length: n, target, iterations: MAX_ITERATIONS })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(n: usize, std_dev: f64) -> f64 {
        let x = centered_domain(n);
        let mut g = vec![0.0; n];
        gaussian_values(&x, std_dev, &mut g);
        trapz(&x, &g)
    }

    fn assert_invalid_target(result: Result<GaussianStd>) {
        match result {
            Err(Error::InvalidTarget{ axis: None, .. }) => (),
            other => panic!("Expected: InvalidTarget, got {:?}.", other)
        }
    }

    #[test]
    fn domain_is_centered() {
        assert_eq!(vec![-1.5, -0.5, 0.5, 1.5], centered_domain(4));
        assert_eq!(vec![-2.0, -1.0, 0.0, 1.0, 2.0], centered_domain(5));
    }

    #[test]
    fn given_128_samples_and_length_64_converge() {
        let result = find_gaussian_std(128, 64.0).unwrap();

        assert!(result.iterations > 0);
        assert!((area_of(128, result.std_dev) - 64.0).abs() / 64.0 <= RELATIVE_TOLERANCE);
        assert_eq!(area_of(128, result.std_dev), result.area);
        assert!((result.std_dev - 25.9).abs() < 0.01);
    }

    #[test]
    fn given_same_inputs_return_identical_result() {
        let first = find_gaussian_std(97, 30.5).unwrap();
        for _ in 0..5 {
            assert_eq!(first, find_gaussian_std(97, 30.5).unwrap());
        }
    }

    #[test]
    fn given_increasing_length_std_dev_does_not_decrease() {
        let targets = [2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 96.0, 120.0];
        let std_devs: Vec<f64> = targets.iter().map(|t| find_gaussian_std(128, *t).unwrap().std_dev).collect();

        for pair in std_devs.windows(2) {
            assert!(pair[0] <= pair[1], "{:?}", std_devs);
        }
    }

    #[test]
    fn given_initial_guess_below_target_widen_search_and_converge() {
        let target = 126.9995;
        // the initial guess alone does not reach the target within tolerance
        let initial_area = area_of(128, INITIAL_STD_DEV_FACTOR * target);
        assert!(initial_area < target);
        assert!((1.0 - initial_area / target).abs() > RELATIVE_TOLERANCE);

        let result = find_gaussian_std(128, target).unwrap();

        assert!(result.std_dev > INITIAL_STD_DEV_FACTOR * target);
        assert!(result.std_dev > MAX_STD_DEV_FACTOR * 128.0);
        assert!((area_of(128, result.std_dev) - target).abs() / target <= RELATIVE_TOLERANCE);
    }

    #[test]
    fn given_two_samples_converge() {
        // area equals the Gaussian value at ±0.5
        let result = find_gaussian_std(2, 0.5).unwrap();
        let expected = (0.5f64.powi(2) / (2.0 * 2.0f64.ln())).sqrt();
        assert!((result.std_dev - expected).abs() < 1.0e-4);
    }

    #[test]
    fn given_too_few_samples_fail() {
        assert_invalid_target(find_gaussian_std(0, 0.5));
        assert_invalid_target(find_gaussian_std(1, 0.5));
    }

    #[test]
    fn given_non_positive_or_non_finite_length_fail() {
        assert_invalid_target(find_gaussian_std(64, 0.0));
        assert_invalid_target(find_gaussian_std(64, -3.0));
        assert_invalid_target(find_gaussian_std(64, std::f64::NAN));
        assert_invalid_target(find_gaussian_std(64, std::f64::INFINITY));
    }

    #[test]
    fn given_unattainable_length_fail() {
        assert_invalid_target(find_gaussian_std(128, 127.0));
        assert_invalid_target(find_gaussian_std(16, 20.0));
        assert_invalid_target(find_gaussian_std(3, 0.5));
    }

    #[test]
    fn given_odd_samples_and_length_1_converge() {
        let result = find_gaussian_std(9, 1.0).unwrap();
        assert!((area_of(9, result.std_dev) - 1.0).abs() <= RELATIVE_TOLERANCE);
    }
}
