//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Command-line options definitions and parsing.
//!

use cgmath::Vector2;
use crate::logging;
use std::collections::HashMap;
use strum::IntoEnumIterator;

pub mod cmdline {
    pub const HELP:           &str = "help";
    pub const INPUT:          &str = "input";
    pub const GRID_POINT:     &str = "grid_point";
    pub const REGION_SIZE:    &str = "region_size";
    pub const EFFECTIVE_SIZE: &str = "effective_size";
    pub const OUTPUT:         &str = "output";
    pub const SAVE_WINDOW:    &str = "save_window";
    pub const SAVE_REGION:    &str = "save_region";
    pub const LOG_LEVEL:      &str = "log_level";
}

pub const DEFAULT_REGION_SIZE: u32 = 128;
pub const DEFAULT_EFFECTIVE_SIZE: f64 = 64.0;
pub const DEFAULT_OUTPUT_FILE: &str = "apodized.fits";

#[derive(Debug)]
pub struct Configuration {
    input_file: String,
    grid_point: Vector2<i32>,
    region_size: Vector2<u32>,
    effective_size: Vector2<f64>,
    output_file: String,
    window_file: Option<String>,
    region_file: Option<String>,
    log_level: logging::Level
}

impl Configuration {
    pub fn input_file(&self) -> &str { &self.input_file }
    /// `x`: column, `y`: row.
    pub fn grid_point(&self) -> Vector2<i32> { self.grid_point }
    /// `x`: width, `y`: height.
    pub fn region_size(&self) -> Vector2<u32> { self.region_size }
    /// `x`: along columns, `y`: along rows.
    pub fn effective_size(&self) -> Vector2<f64> { self.effective_size }
    pub fn output_file(&self) -> &str { &self.output_file }
    pub fn window_file(&self) -> &Option<String> { &self.window_file }
    pub fn region_file(&self) -> &Option<String> { &self.region_file }
    pub fn log_level(&self) -> logging::Level { self.log_level }
}

impl std::str::FromStr for logging::Level {
    type Err = ();
    fn from_str(s: &str) -> Result<logging::Level, ()> {

        for level in logging::Level::iter() {
            if s == Into::<&str>::into(level) {
                return Ok(level);
            }
        }

        Err(())
    }
}

pub fn print_help() {
    println!(
r#"Command-line options:

  --{} <file>

    Input image (FITS). Required.


  --{} <row> <col>

    Center of the interrogation region. May lie outside the image; it is clamped to the image
    extents (the position one past the last row/column is allowed). Required.


  --{} <height> <width>

    Size of the interrogation region in pixels. Parts outside the image are filled with zeros.
    Default: {} {}.


  --{} <rows> <cols>

    Effective length of the Gaussian window along each axis, i.e. the length of a rectangular
    window with the same area. Must be smaller than the region size minus 1. Default: {} {}.


  --{} <file>

    Output file (FITS) for the apodized region. Default: "{}".


  --{} <file>

    If specified, the Gaussian window is saved to this file (FITS).


  --{} <file>

    If specified, the extracted region (before apodization) is saved to this file (FITS).


  --{} <{}|{}|{}>

    Chooses the amount of messages to print during processing.

"#,
        cmdline::INPUT,

        cmdline::GRID_POINT,

        cmdline::REGION_SIZE, DEFAULT_REGION_SIZE, DEFAULT_REGION_SIZE,

        cmdline::EFFECTIVE_SIZE, DEFAULT_EFFECTIVE_SIZE, DEFAULT_EFFECTIVE_SIZE,

        cmdline::OUTPUT, DEFAULT_OUTPUT_FILE,

        cmdline::SAVE_WINDOW,

        cmdline::SAVE_REGION,

        cmdline::LOG_LEVEL,
        Into::<&str>::into(logging::Level::Quiet),
        Into::<&str>::into(logging::Level::Info),
        Into::<&str>::into(logging::Level::Verbose),
    );
}

/// Returns the value of a single-valued option of type `T`.
fn get_option_value<T: std::str::FromStr>(
    option: &str,
    option_values: &HashMap<String, Vec<String>>
) -> Result<Option<T>, ()> {
    match option_values.get(option) {
        None => Ok(None),
        Some(vals) => if vals.is_empty() {
            eprintln!("Value missing for option {}.", option);
            Err(())
        } else if vals.len() > 1 {
            eprintln!("Too many values for option {}.", option);
            Err(())
        } else {
            match vals[0].parse::<T>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    eprintln!("Invalid value for option {}: {}.", option, vals[0]);
                    Err(())
                }
            }
        }
    }
}

/// Returns the value of a two-valued option given as `<vertical> <horizontal>`
/// (stored as `y` and `x`, respectively).
fn get_option_pair<T: std::str::FromStr>(
    option: &str,
    option_values: &HashMap<String, Vec<String>>
) -> Result<Option<Vector2<T>>, ()> {
    match option_values.get(option) {
        None => Ok(None),
        Some(vals) => if vals.len() != 2 {
            eprintln!("Expected 2 values for option {}, got {}.", option, vals.len());
            Err(())
        } else {
            match (vals[0].parse::<T>(), vals[1].parse::<T>()) {
                (Ok(y), Ok(x)) => Ok(Some(Vector2{ x, y })),
                _ => {
                    eprintln!("Invalid values for option {}: {} {}.", option, vals[0], vals[1]);
                    Err(())
                }
            }
        }
    }
}

/// Returns Ok(None) if help was requested.
pub fn parse_command_line<I: Iterator<Item=String>>(stream: I) -> Result<Option<Configuration>, ()> {
    let allowed_options = vec![
     cmdline::HELP,
     cmdline::INPUT,
     cmdline::GRID_POINT,
     cmdline::REGION_SIZE,
     cmdline::EFFECTIVE_SIZE,
     cmdline::OUTPUT,
     cmdline::SAVE_WINDOW,
     cmdline::SAVE_REGION,
     cmdline::LOG_LEVEL
    ];

    // key: option name
    let mut option_values = HashMap::<String, Vec<String>>::new();

    let mut current: Option<&mut Vec<String>> = None;

    for arg in stream.skip(1) /*skip the binary name*/ {
        if arg.starts_with("--") {
            match &arg[2..] {
                cmdline::HELP => { print_help(); return Ok(None); },
                x if !allowed_options.contains(&x) => {
                    eprintln!("Unknown command-line option: {}.", x); return Err(());
                },
                opt => current = Some(option_values.entry(opt.to_string()).or_insert(vec![])),
            }
        } else {
            match current.as_mut() {
                None => {
                    eprintln!("Unexpected value: {}.", arg);
                    return Err(());
                },
                Some(values) => values.push(arg)
            }
        }
    }

    let input_file = match get_option_value::<String>(cmdline::INPUT, &option_values)? {
        Some(file) => file,
        None => { eprintln!("Input file not specified."); return Err(()); }
    };

    let grid_point = match get_option_pair::<i32>(cmdline::GRID_POINT, &option_values)? {
        Some(point) => point,
        None => { eprintln!("Grid point not specified. Expected: <row> <col>."); return Err(()); }
    };

    let region_size = get_option_pair::<u32>(cmdline::REGION_SIZE, &option_values)?
        .unwrap_or(Vector2{ x: DEFAULT_REGION_SIZE, y: DEFAULT_REGION_SIZE });
    if region_size.x == 0 || region_size.y == 0 {
        eprintln!("Region size must be positive.");
        return Err(());
    }

    let effective_size = get_option_pair::<f64>(cmdline::EFFECTIVE_SIZE, &option_values)?
        .unwrap_or(Vector2{ x: DEFAULT_EFFECTIVE_SIZE, y: DEFAULT_EFFECTIVE_SIZE });
    if !(effective_size.x.is_finite() && effective_size.y.is_finite() && effective_size.x > 0.0 && effective_size.y > 0.0) {
        eprintln!("Effective size must be positive.");
        return Err(());
    }

    let output_file = get_option_value::<String>(cmdline::OUTPUT, &option_values)?
        .unwrap_or(DEFAULT_OUTPUT_FILE.to_string());

    let window_file = get_option_value::<String>(cmdline::SAVE_WINDOW, &option_values)?;

    let region_file = get_option_value::<String>(cmdline::SAVE_REGION, &option_values)?;

    let log_level = get_option_value::<logging::Level>(cmdline::LOG_LEVEL, &option_values)?
        .unwrap_or(logging::Level::Info);

    Ok(Some(Configuration{
        input_file,
        grid_point,
        region_size,
        effective_size,
        output_file,
        window_file,
        region_file,
        log_level
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Prepends "--".
    macro_rules! as_opt { ($e:expr) => { ("--".to_string() + &$e.to_string()).as_str() } }

    fn parse(args: &[&str]) -> Result<Option<Configuration>, ()> {
        parse_command_line(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn when_help_requested_succeed() {
        let config = parse(&["binary", as_opt!(cmdline::HELP)]);
        assert!(config.ok().unwrap().is_none());
    }

    #[test]
    fn when_no_input_fail() {
        let config = parse(&["binary", as_opt!(cmdline::GRID_POINT), "400", "590"]);
        assert!(config.is_err());
    }

    #[test]
    fn when_no_grid_point_fail() {
        let config = parse(&["binary", as_opt!(cmdline::INPUT), "image.fits"]);
        assert!(config.is_err());
    }

    #[test]
    fn when_only_required_given_use_defaults() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "400", "590"
        ]).unwrap().unwrap();

        assert_eq!("image.fits", config.input_file());
        assert_eq!(Vector2{ x: 590, y: 400 }, config.grid_point());
        assert_eq!(Vector2{ x: DEFAULT_REGION_SIZE, y: DEFAULT_REGION_SIZE }, config.region_size());
        assert_eq!(Vector2{ x: DEFAULT_EFFECTIVE_SIZE, y: DEFAULT_EFFECTIVE_SIZE }, config.effective_size());
        assert_eq!(DEFAULT_OUTPUT_FILE, config.output_file());
        assert!(config.window_file().is_none());
        assert!(config.region_file().is_none());
        assert_eq!(logging::Level::Info, config.log_level());
    }

    #[test]
    fn when_all_options_given_succeed() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "-5", "12",
            as_opt!(cmdline::REGION_SIZE), "64", "32",
            as_opt!(cmdline::EFFECTIVE_SIZE), "20.5", "10",
            as_opt!(cmdline::OUTPUT), "out.fits",
            as_opt!(cmdline::SAVE_WINDOW), "window.fits",
            as_opt!(cmdline::SAVE_REGION), "region.fits",
            as_opt!(cmdline::LOG_LEVEL), "verbose"
        ]).unwrap().unwrap();

        assert_eq!(Vector2{ x: 12, y: -5 }, config.grid_point());
        assert_eq!(Vector2{ x: 32, y: 64 }, config.region_size());
        assert_eq!(Vector2{ x: 10.0, y: 20.5 }, config.effective_size());
        assert_eq!("out.fits", config.output_file());
        assert_eq!(&Some("window.fits".to_string()), config.window_file());
        assert_eq!(&Some("region.fits".to_string()), config.region_file());
        assert_eq!(logging::Level::Verbose, config.log_level());
    }

    #[test]
    fn when_grid_point_incomplete_fail() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "400"
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn when_region_size_zero_fail() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "400", "590",
            as_opt!(cmdline::REGION_SIZE), "0", "64"
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn when_effective_size_not_positive_fail() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "400", "590",
            as_opt!(cmdline::EFFECTIVE_SIZE), "-1", "64"
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn when_invalid_number_fail() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "four", "590"
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn when_invalid_log_level_fail() {
        let config = parse(&[
            "binary",
            as_opt!(cmdline::INPUT), "image.fits",
            as_opt!(cmdline::GRID_POINT), "400", "590",
            as_opt!(cmdline::LOG_LEVEL), "loud"
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn when_unknown_option_fail() {
        let config = parse(&["binary", "--some_unknown_option"]);
        assert!(config.is_err());
    }

    #[test]
    fn when_value_without_option_fail() {
        let config = parse(&["binary", "image.fits"]);
        assert!(config.is_err());
    }
}
