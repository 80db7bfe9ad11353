//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Point and rectangle structs.
//!

/// Pixel position; `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "(row {}, col {})", self.y, self.x)
    }
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point { Point{ x, y } }

    /// Creates a point from (row, column) order used by grid point specifications.
    pub fn from_row_col(row: i32, col: i32) -> Point { Point{ x: col, y: row } }

    pub fn row(&self) -> i32 { self.y }

    pub fn col(&self) -> i32 { self.x }

    pub fn zero() -> Point { Point{ x: 0, y: 0 } }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32
}

impl Rect {
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// An empty `other` is contained only if its position lies inside.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(&other.get_pos()) &&
        other.right() <= self.right() &&
        other.bottom() <= self.bottom()
    }

    pub fn get_pos(&self) -> Point { Point{ x: self.x, y: self.y } }

    /// Column one past the last one.
    pub fn right(&self) -> i32 { self.x + self.width as i32 }

    /// Row one past the last one.
    pub fn bottom(&self) -> i32 { self.y + self.height as i32 }
}
