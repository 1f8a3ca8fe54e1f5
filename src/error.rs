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

//! Error types for the scrambling core.
//!
//! Every error is detected before an output buffer is produced, so a failed
//! call never leaves a half-transformed grid behind.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Key generation was asked for a zero-sized image.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The key does not fit the grid it is being applied to.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),

    /// Pixel data the core cannot work with.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}
