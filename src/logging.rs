//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Console logger.
//!

#[derive(Copy, Clone, Debug, strum_macros::EnumIter, PartialEq, PartialOrd)]
pub enum Level {
    Quiet,
    Info,
    Verbose
}

impl From<Level> for &str {
    fn from(level: Level) -> &'static str {
        match level {
            Level::Quiet   => "quiet",
            Level::Info    => "info",
            Level::Verbose => "verbose"
        }
    }
}

pub struct Logger {
    level: Level
}

impl Logger {
    pub fn new(level: Level) -> Logger { Logger{ level } }

    pub fn level(&self) -> Level { self.level }

    pub fn info(&self, msg: &str) {
        if self.level >= Level::Info {
            println!("{}", msg);
        }
    }

    pub fn verbose(&self, msg: &str) {
        if self.level >= Level::Verbose {
            println!("{}", msg);
        }
    }

    /// Printed regardless of level.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg);
    }
}
