// Copyright (C) 2026 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! In-memory RGB pixel grid.

use ndarray::prelude::*;

use crate::error::{Error, Result};

/// Samples per pixel. Callers convert to RGB before building a grid.
pub const CHANNELS: usize = 3;

/// Owned `H x W x 3` grid of 8-bit RGB samples, row-major.
///
/// The shape is fixed at construction and survives any scramble/descramble
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    data: Array3<u8>,
}

impl PixelGrid {
    /// Wraps a decoded row-major sample buffer.
    pub fn from_raw(height: usize, width: usize, channels: usize, buf: Vec<u8>) -> Result<Self> {
        if channels != CHANNELS {
            return Err(Error::UnsupportedFormat(format!(
                "expected {CHANNELS} channels (RGB), got {channels}"
            )));
        }
        let expected = height * width * channels;
        if buf.len() != expected {
            return Err(Error::UnsupportedFormat(format!(
                "buffer holds {} bytes, {height}x{width}x{channels} needs {expected}",
                buf.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), buf)
            .map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
        Ok(Self { data })
    }

    pub(crate) fn from_array(data: Array3<u8>) -> Self {
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn pixel_count(&self) -> usize {
        self.height() * self.width()
    }

    /// Row-major sample slice, suitable for `image::save_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice().expect("Should be standard-layout")
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub(crate) fn array(&self) -> &Array3<u8> {
        &self.data
    }
}
