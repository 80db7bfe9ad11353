//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! FITS image format handling code (low-level).
//!

use super::Image;
use std::mem::MaybeUninit;
use std::os::raw::{c_int, c_long};

const TDOUBLE: c_int = 82;
const DOUBLE_IMG: c_int = -64;

#[derive(Debug)]
pub enum FitsError {
    InvalidFileName,
    CannotOpenFile,
    InvalidImage,
    UnsupportedPixelFormat,
    CannotReadImage,
    CannotCreateFile,
    CannotCreateImage,
    CannotWriteImage
}

struct FitsFileHandle {
    fptr: *mut fitsio_sys::fitsfile
}

impl Drop for FitsFileHandle {
    fn drop(&mut self) {
        if !self.fptr.is_null() {
            let mut status = 0;
            unsafe { fitsio_sys::ffclos(self.fptr, &mut status) };
        }
    }
}

fn to_c_string(s: String) -> Result<std::ffi::CString, FitsError> {
    std::ffi::CString::new(s).map_err(|_| FitsError::InvalidFileName)
}

/// Returns (file, width, height) of the primary HDU.
fn open_fits_file(file_name: &str) -> Result<(FitsFileHandle, u32, u32), FitsError> {
    let c_file_name = to_c_string(file_name.to_string() + "[0]")?;
    let mut file = FitsFileHandle{ fptr: std::ptr::null_mut() };
    let mut status = 0;
    const READONLY: c_int = 0;
    unsafe { fitsio_sys::ffopen(
        &mut file.fptr as *mut *mut _,
        c_file_name.as_ptr(),
        READONLY,
        &mut status
    ) };
    if status != 0 { return Err(FitsError::CannotOpenFile); }

    let mut bits_per_pixel = MaybeUninit::<c_int>::uninit();
    let mut num_axes = MaybeUninit::<c_int>::uninit();
    let mut dimensions: [c_long; 3] = [0; 3];
    unsafe { fitsio_sys::ffghpr(
        file.fptr as *mut _,
        3,
        std::ptr::null_mut(),
        bits_per_pixel.as_mut_ptr(),
        num_axes.as_mut_ptr(),
        dimensions.as_mut_ptr(),
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        &mut status
    ) };
    if status != 0 {
        return Err(FitsError::InvalidImage);
    }
    let num_axes = unsafe { num_axes.assume_init() };

    if num_axes != 2 || dimensions[0] <= 0 || dimensions[1] <= 0 {
        return Err(FitsError::InvalidImage);
    }

    Ok((file, dimensions[0] as u32, dimensions[1] as u32))
}

/// Loads the primary image of a FITS file; values of any stored type are converted to `f64`.
pub fn load_fits(file_name: &str) -> Result<Image<f64>, FitsError> {
    let (file, width, height) = open_fits_file(file_name)?;

    let mut image = Image::<f64>::new(width, height, 1);

    let mut status = 0;

    // FITS rows are stored in reverse order
    for y in 0..height {
        unsafe { fitsio_sys::ffgpv(
            file.fptr as *mut _,
            TDOUBLE,
            (1 + y as i64 * width as i64) as _,
            width as _,
            std::ptr::null_mut(),
            image.line_mut(height - 1 - y).as_mut_ptr() as *mut _,
            std::ptr::null_mut(),
            &mut status
        ) };
        if status != 0 {
            return Err(FitsError::CannotReadImage);
        }
    }

    Ok(image)
}

/// Saves a single-channel image; overwrites an existing file.
pub fn save_fits(image: &Image<f64>, file_name: &str) -> Result<(), FitsError> {
    if image.channels() != 1 {
        return Err(FitsError::UnsupportedPixelFormat);
    }

    let mut dimensions: [c_long; 2] = [
        image.width() as _,
        image.height() as _
    ];

    // a leading "!" overwrites an existing file
    let c_file_name = to_c_string("!".to_string() + file_name)?;

    let mut status = 0;
    let mut file = FitsFileHandle{ fptr: std::ptr::null_mut() };
    unsafe { fitsio_sys::ffinit(
        &mut file.fptr as *mut *mut _,
        c_file_name.as_ptr(),
        &mut status
    ) };
    if status != 0 { return Err(FitsError::CannotCreateFile); }

    unsafe { fitsio_sys::ffcrim(file.fptr as *mut _, DOUBLE_IMG, 2, dimensions.as_mut_ptr(), &mut status) };
    if status != 0 { return Err(FitsError::CannotCreateImage); }

    // FITS rows are stored in reverse order
    for y in 0..image.height() {
        unsafe { fitsio_sys::ffppr(
            file.fptr as *mut _,
            TDOUBLE,
            (1 + (image.height() - 1 - y) as i64 * image.width() as i64) as _,
            image.width() as _,
            image.line(y).as_ptr() as *mut _,
            &mut status
        ) };
        if status != 0 { return Err(FitsError::CannotWriteImage); }
    }

    Ok(())
}
