//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Extraction of fixed-size subregions (interrogation regions) around grid points.
//!

use crate::error::{Axis, Error, Result};
use crate::image::{Image, Pixel, Point, Rect};

/// Number of zero-filled rows/columns on each side of an extracted subregion.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SubregionGeometry {
    /// Grid point clamped to [0, image rows] x [0, image columns].
    pub center: Point,
    /// Requested rectangle; may extend outside the image.
    pub requested: Rect,
    /// Part of `requested` inside the image.
    pub clipped: Rect,
    pub padding: Padding
}

/// Requested and clipped extent of a subregion along one axis.
struct AxisExtent {
    center: i64,
    start: i64,
    clipped_start: i64,
    clipped_len: i64,
    pad_before: i64,
    pad_after: i64
}

fn axis_extent(grid_point: i32, size: u32, image_len: u32, axis: Axis) -> Result<AxisExtent> {
    let invalid = || Error::InvalidDimension{ axis, requested: size as i64, available: image_len };

    if size == 0 || size > image_len {
        return Err(invalid());
    }

    let size = size as i64;
    let image_len = image_len as i64;

    // the far edge itself (one past the last pixel) is a valid center
    let center = (grid_point as i64).max(0).min(image_len);

    let start = center - (size + 1) / 2 + 1;
    let end = start + size;

    let (clipped_start, clipped_len) = if start < 0 {
        (0, size + start)
    } else if end > image_len {
        (start, size - (end - image_len))
    } else {
        (start, size)
    };

    if clipped_len <= 0 {
        return Err(invalid());
    }

    Ok(AxisExtent{
        center,
        start,
        clipped_start,
        clipped_len,
        pad_before: (-start).max(0),
        pad_after: (end - image_len).max(0)
    })
}

/// Determines the rectangle of a `sub_region_width`x`sub_region_height` subregion centered at
/// (`grid_point_row`, `grid_point_col`), its intersection with the image and the padding needed
/// to restore the requested size.
///
/// The requested rectangle starts at `center - ceil(size/2) + 1` along each axis.
///
pub fn subregion_geometry(
    image_rows: u32,
    image_cols: u32,
    grid_point_row: i32,
    grid_point_col: i32,
    sub_region_height: u32,
    sub_region_width: u32
) -> Result<SubregionGeometry> {
    let vert = axis_extent(grid_point_row, sub_region_height, image_rows, Axis::Rows)?;
    let horz = axis_extent(grid_point_col, sub_region_width, image_cols, Axis::Cols)?;

    Ok(SubregionGeometry{
        center: Point::from_row_col(vert.center as i32, horz.center as i32),
        requested: Rect{
            x: horz.start as i32,
            y: vert.start as i32,
            width: sub_region_width,
            height: sub_region_height
        },
        clipped: Rect{
            x: horz.clipped_start as i32,
            y: vert.clipped_start as i32,
            width: horz.clipped_len as u32,
            height: vert.clipped_len as u32
        },
        padding: Padding{
            top: vert.pad_before as u32,
            bottom: vert.pad_after as u32,
            left: horz.pad_before as u32,
            right: horz.pad_after as u32
        }
    })
}

/// Returns a `sub_region_width`x`sub_region_height` copy of the image fragment centered at
/// (`grid_point_row`, `grid_point_col`). Areas outside the image are filled with zeros.
///
/// The result has the same pixel type and channel count as `image`.
///
pub fn extract_subregion<T: Pixel>(
    image: &Image<T>,
    grid_point_row: i32,
    grid_point_col: i32,
    sub_region_height: u32,
    sub_region_width: u32
) -> Result<Image<T>> {
    // validate before allocating the output
    subregion_geometry(image.height(), image.width(), grid_point_row, grid_point_col, sub_region_height, sub_region_width)?;

    let mut output = Image::<T>::new(sub_region_width, sub_region_height, image.channels());
    extract_subregion_into(image, &mut output, grid_point_row, grid_point_col, sub_region_height, sub_region_width)?;

    Ok(output)
}

/// Like `extract_subregion`, but writes into a preallocated `output`, which must have the requested
/// size and `image`'s channel count. All of `output` is overwritten.
pub fn extract_subregion_into<T: Pixel>(
    image: &Image<T>,
    output: &mut Image<T>,
    grid_point_row: i32,
    grid_point_col: i32,
    sub_region_height: u32,
    sub_region_width: u32
) -> Result<SubregionGeometry> {
    let expected = (sub_region_width, sub_region_height, image.channels());
    if output.shape() != expected {
        return Err(Error::ShapeMismatch{ expected, actual: output.shape() });
    }

    let geometry = subregion_geometry(
        image.height(), image.width(), grid_point_row, grid_point_col, sub_region_height, sub_region_width
    )?;

    for value in output.pixels_mut() {
        *value = T::zero();
    }

    image.copy_rect_into(
        &geometry.clipped,
        output,
        Point{ x: geometry.padding.left as i32, y: geometry.padding.top as i32 }
    );

    Ok(geometry)
}
