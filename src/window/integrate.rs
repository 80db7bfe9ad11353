//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Numerical integration.
//!

/// Approximates the integral of `y` over `x` using the trapezoidal rule.
///
/// `x` must be increasing, but its values need not be evenly spaced. For a single sample
/// (no intervals) returns 0.0.
///
pub fn trapz(x: &[f64], y: &[f64]) -> f64 {
    assert!(x.len() == y.len() && !x.is_empty());

    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| (xw[1] - xw[0]) * (yw[1] + yw[0]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::trapz;

    fn domain(n: usize) -> Vec<f64> { (0..n).map(|k| k as f64).collect() }

    #[test]
    fn given_constant_function_area_is_rectangle() {
        for &n in &[2, 3, 17, 128] {
            let x = domain(n);
            let y = vec![2.5; n];
            assert_eq!(2.5 * (n - 1) as f64, trapz(&x, &y));
        }
    }

    #[test]
    fn given_single_sample_area_is_zero() {
        assert_eq!(0.0, trapz(&[3.0], &[100.0]));
    }

    #[test]
    fn given_reversed_samples_area_is_unchanged() {
        let x = vec![-2.0, -0.5, 0.25, 1.0, 4.0];
        let y = vec![0.1, 3.0, -1.0, 2.0, 0.5];
        let x_rev: Vec<f64> = x.iter().rev().map(|v| -v).collect();
        let y_rev: Vec<f64> = y.iter().rev().cloned().collect();

        assert!((trapz(&x, &y) - trapz(&x_rev, &y_rev)).abs() < 1.0e-12);
    }

    #[test]
    fn given_uneven_spacing_integrate_linear_exactly() {
        let x = vec![0.0, 0.1, 0.5, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        // integral of 2x + 1 over [0, 3]
        assert!((trapz(&x, &y) - 12.0).abs() < 1.0e-12);
    }

    #[test]
    fn given_wide_dynamic_range_keep_small_contributions() {
        let n = 1001;
        let x = domain(n);
        let mut y = vec![1.0; n];
        y[0] = 1.0e8;
        y[1] = 1.0e8;
        // unit contributions would be lost entirely with a single-precision accumulator
        let expected = 1.0e8 + (1.0e8 + 1.0) / 2.0 + (n - 3) as f64;
        assert_eq!(expected, trapz(&x, &y));
    }
}
