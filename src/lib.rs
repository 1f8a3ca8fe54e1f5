//! Library to reversibly scramble RGB images with a pseudorandom key.
//!
//! Scrambling permutes and complements pixel data such that:
//!
//! * No pixel value is duplicated nor removed.
//! * The output grid has the same shape as the input.
//! * Given the restore key, the original image is recovered exactly,
//!   channel for channel.
//!
//! Two schemes are provided: a structured one (column permutation, per-row
//! rotation, periodic row inversion) and a flat one (a single permutation
//! over every pixel). Both are obfuscation, not encryption: the key space
//! is a permutation of indices, with no diffusion or authentication.

// Copyright (C) 2026 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod error;
mod grid;
mod key;
mod scramble;

#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::grid::{PixelGrid, CHANNELS};
#[doc(inline)]
pub use crate::key::{FlatKey, RestoreKey, Strategy, StructuredKey};
#[doc(inline)]
pub use crate::scramble::{descramble, scramble, scramble_with_key};
