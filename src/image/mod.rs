//
// pivwin - Interrogation window extraction and Gaussian apodization for PIV
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Image data structure and basic operations.
//!

#[cfg(feature = "fits")]
pub mod fits;
pub mod point;

pub use point::{Point, Rect};
use crate::error::{Error, Result};
use num_traits::{ToPrimitive, Zero};

/// Produces a range of specified length.
macro_rules! range { ($start:expr, $len:expr) => { $start .. $start + $len } }

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    Mono8,
    Mono16,
    Mono32f,
    Mono64f,

    RGB8,
    RGB16,
    RGB32f,
    RGB64f
}

pub fn num_channels(pix_fmt: PixelFormat) -> usize {
    match pix_fmt {
        PixelFormat::Mono8   |
        PixelFormat::Mono16  |
        PixelFormat::Mono32f |
        PixelFormat::Mono64f => 1,

        PixelFormat::RGB8   |
        PixelFormat::RGB16  |
        PixelFormat::RGB32f |
        PixelFormat::RGB64f => 3
    }
}

/// Type of a single channel value.
pub trait Pixel: Copy + Default + Zero + ToPrimitive + Send + Sync + 'static {
    const MONO_FORMAT: PixelFormat;
    const RGB_FORMAT: PixelFormat;
}

impl Pixel for u8 {
    const MONO_FORMAT: PixelFormat = PixelFormat::Mono8;
    const RGB_FORMAT: PixelFormat = PixelFormat::RGB8;
}

impl Pixel for u16 {
    const MONO_FORMAT: PixelFormat = PixelFormat::Mono16;
    const RGB_FORMAT: PixelFormat = PixelFormat::RGB16;
}

impl Pixel for f32 {
    const MONO_FORMAT: PixelFormat = PixelFormat::Mono32f;
    const RGB_FORMAT: PixelFormat = PixelFormat::RGB32f;
}

impl Pixel for f64 {
    const MONO_FORMAT: PixelFormat = PixelFormat::Mono64f;
    const RGB_FORMAT: PixelFormat = PixelFormat::RGB64f;
}

/// Owned image; pixels are stored row-major and contiguously (no padding between rows),
/// with `channels` interleaved values per pixel.
#[derive(Clone, PartialEq)]
pub struct Image<T> {
    width: u32,
    height: u32,
    channels: usize,
    pixels: Vec<T>
}

impl<T: Pixel + std::fmt::Debug> std::fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Image {}x{}, {} channel(s), pixels = {:?}...",
            self.width,
            self.height,
            self.channels,
            &self.pixels[..self.pixels.len().min(8)]
        )
    }
}

impl<T: Pixel> Image<T> {
    /// Creates a zero-filled image.
    pub fn new(width: u32, height: u32, channels: usize) -> Image<T> {
        assert!(channels > 0);
        Image{
            width,
            height,
            channels,
            pixels: vec![T::zero(); width as usize * height as usize * channels]
        }
    }

    /// Creates a new image using the specified storage.
    ///
    /// `pixels` must contain exactly `width` * `height` * `channels` values.
    ///
    pub fn new_from_pixels(width: u32, height: u32, channels: usize, pixels: Vec<T>) -> Result<Image<T>> {
        let expected_len = width as usize * height as usize * channels;
        if channels == 0 || pixels.len() != expected_len {
            return Err(Error::ShapeMismatch{
                expected: (width, height, channels),
                actual: (width, if width == 0 || channels == 0 { 0 } else {
                    (pixels.len() / (width as usize * channels)) as u32
                }, channels)
            });
        }

        Ok(Image{ width, height, channels, pixels })
    }

    /// Creates a single-channel image with values provided by `f(x, y)`.
    pub fn from_fn<F: Fn(u32, u32) -> T>(width: u32, height: u32, f: F) -> Image<T> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }

        Image{ width, height, channels: 1, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns (width, height, channels).
    pub fn shape(&self) -> (u32, u32, usize) {
        (self.width, self.height, self.channels)
    }

    /// Returns `None` if the channel count has no corresponding format.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        match self.channels {
            1 => Some(T::MONO_FORMAT),
            3 => Some(T::RGB_FORMAT),
            _ => None
        }
    }

    /// Returns channel values per line.
    pub fn values_per_line(&self) -> usize {
        self.width as usize * self.channels
    }

    pub fn pixels(&self) -> &[T] {
        &self.pixels[..]
    }

    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels[..]
    }

    pub fn take_pixel_data(self) -> Vec<T> {
        self.pixels
    }

    pub fn line(&self, y: u32) -> &[T] {
        assert!(y < self.height);
        let vals_per_line = self.values_per_line();

        &self.pixels[range!(y as usize * vals_per_line, vals_per_line)]
    }

    pub fn line_mut(&mut self, y: u32) -> &mut [T] {
        assert!(y < self.height);
        let vals_per_line = self.values_per_line();

        &mut self.pixels[range!(y as usize * vals_per_line, vals_per_line)]
    }

    /// Returns the values of pixel (`x`, `y`), one per channel.
    pub fn pixel(&self, x: u32, y: u32) -> &[T] {
        assert!(x < self.width);
        &self.line(y)[range!(x as usize * self.channels, self.channels)]
    }

    pub fn img_rect(&self) -> Rect {
        Rect{ x: 0, y: 0, width: self.width, height: self.height }
    }

    /// Copies `src_rect` of `self` into `dest_img` at `dest_pos`.
    ///
    /// Both rectangles must lie within their images and the channel counts must match;
    /// pixels of `dest_img` outside the destination rectangle are left unchanged.
    ///
    pub fn copy_rect_into(&self, src_rect: &Rect, dest_img: &mut Image<T>, dest_pos: Point) {
        assert!(self.channels == dest_img.channels);
        assert!(self.img_rect().contains_rect(src_rect));
        assert!(dest_img.img_rect().contains_rect(
            &Rect{ x: dest_pos.x, y: dest_pos.y, width: src_rect.width, height: src_rect.height }
        ));

        let line_copy_len = src_rect.width as usize * self.channels;
        let src_line_ofs = src_rect.x as usize * self.channels;
        let dest_line_ofs = dest_pos.x as usize * dest_img.channels;

        for y in 0..src_rect.height {
            let src_line = &self.line(src_rect.y as u32 + y)[range!(src_line_ofs, line_copy_len)];
            let dest_line = &mut dest_img.line_mut(dest_pos.y as u32 + y)[range!(dest_line_ofs, line_copy_len)];

            dest_line.copy_from_slice(src_line);
        }
    }

    /// Returns the image with all values converted to `f64`.
    #[must_use]
    pub fn to_f64(&self) -> Image<f64> {
        Image{
            width: self.width,
            height: self.height,
            channels: self.channels,
            pixels: self.pixels.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect()
        }
    }
}
