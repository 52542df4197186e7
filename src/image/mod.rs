//! Dense 2-D sample grids.
//!
//! `ImageView` is a borrowed row-major view into a 1D buffer with an explicit
//! stride, counted in elements between row starts. ROI slices are zero-copy
//! views that keep the parent stride. `OwnedImage` is the contiguous `f64`
//! grid every stage of the pipeline produces: backgrounds, filters, rotated
//! filters and correlation surfaces.

use crate::util::{RotCorrError, RotCorrResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Borrowed 2D view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> RotCorrResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> RotCorrResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(RotCorrError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at column `x`, row `y` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns row `y` as a slice of length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Iterates over all rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> RotCorrResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(RotCorrError::InvalidDimensions { width, height });
        }
        let out_of_bounds = RotCorrError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        if !fits_x || !fits_y {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or(RotCorrError::BufferTooSmall {
            needed: start + 1,
            got: self.data.len(),
        })?;
        ImageView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> RotCorrResult<usize> {
    if width == 0 || height == 0 {
        return Err(RotCorrError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(RotCorrError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(RotCorrError::InvalidDimensions { width, height })
}
