//! Owned contiguous `f64` grid.

use crate::image::ImageView;
use crate::util::{RotCorrError, RotCorrResult};

/// Owned contiguous row-major grid of real-valued samples.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> RotCorrResult<Self> {
        let expected = checked_len(width, height)?;
        if data.len() < expected {
            return Err(RotCorrError::BufferTooSmall {
                needed: expected,
                got: data.len(),
            });
        }
        if data.len() > expected {
            return Err(RotCorrError::BufferTooLarge {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a grid filled with `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> RotCorrResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }

    /// Creates a grid of zeros.
    pub fn zeros(width: usize, height: usize) -> RotCorrResult<Self> {
        Self::filled(width, height, 0.0)
    }

    /// Creates a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> RotCorrResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies any strided view into a contiguous grid.
    pub fn from_view(view: ImageView<'_, f64>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns a borrowed view of the grid.
    pub fn view(&self) -> ImageView<'_, f64> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
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

    /// Returns the row-major samples.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the grid and returns its samples.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Returns the sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns row `y`.
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Largest sample; NaN samples are ignored unless every sample is NaN.
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NAN, f64::max)
    }

    /// Smallest sample; NaN samples are ignored unless every sample is NaN.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NAN, f64::min)
    }

    /// Copies the rectangle with top-left `(x, y)` into a new grid.
    pub fn sub_image(&self, x: usize, y: usize, width: usize, height: usize) -> RotCorrResult<Self> {
        Ok(Self::from_view(self.view().roi(x, y, width, height)?))
    }

    /// Applies `f` to every sample and returns the result as a new grid.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.iter().copied().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Returns a copy with the grid's own mean subtracted from every sample.
    pub fn zero_mean(&self) -> Self {
        let mean = self.mean();
        self.map(|v| v - mean)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

fn checked_len(width: usize, height: usize) -> RotCorrResult<usize> {
    if width == 0 || height == 0 {
        return Err(RotCorrError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(RotCorrError::InvalidDimensions { width, height })
}
