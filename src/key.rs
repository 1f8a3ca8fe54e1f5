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

//! Restore keys: generation, validation, and the on-disk format.
//!
//! A key is produced once per scramble, is read-only afterwards, and must
//! reach the descrambler unmodified. Index fields are `u32` so a key file
//! written on one platform replays identically on another.

use std::io::{Read, Write};

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest gap between two inverted rows.
const INVERT_STEP_MIN: u32 = 10;
/// Largest gap between two inverted rows.
const INVERT_STEP_MAX: u32 = 30;

/// Which scrambling scheme to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Column permutation + per-row rotation + periodic row inversion.
    Structured,
    /// One permutation over every pixel.
    Flat,
}

/// Unbiased Fisher-Yates over `0..n`.
///
/// Bounds are drawn as `u32` so the same seed yields the same permutation on
/// 32- and 64-bit targets.
fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<u32> {
    let mut perm: Vec<u32> = (0..n as u32).collect();
    for i in (1..perm.len()).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        perm.swap(i, j);
    }
    perm
}

/// Each index in `0..n` appears exactly once.
fn is_permutation(indices: &[u32], n: usize) -> bool {
    if indices.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in indices {
        match seen.get_mut(i as usize) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

/// Everything needed to undo a structured scramble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredKey {
    /// Output column `k` was filled from input column `column_permutation[k]`.
    pub column_permutation: Vec<u32>,
    /// Left rotation applied to each row, in `[0, width)`.
    pub row_shifts: Vec<u32>,
    /// Rows whose samples were complemented, strictly increasing.
    pub inverted_rows: Vec<u32>,
}

impl StructuredKey {
    pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(format!("{width}x{height} image")));
        }

        let column_permutation = random_permutation(width, rng);
        let row_shifts = (0..height).map(|_| rng.gen_range(0..width as u32)).collect();

        // Row 0 is always inverted; every following gap is redrawn, so the
        // row set is part of the key and is stored, not recomputed.
        let mut inverted_rows = Vec::new();
        let mut row = 0u32;
        while (row as usize) < height {
            inverted_rows.push(row);
            row += rng.gen_range(INVERT_STEP_MIN..=INVERT_STEP_MAX);
        }

        debug!(
            "structured key: {width} columns, {height} shifts, {} inverted rows",
            inverted_rows.len()
        );
        Ok(Self {
            column_permutation,
            row_shifts,
            inverted_rows,
        })
    }

    pub(crate) fn validate_for(&self, width: usize, height: usize) -> Result<()> {
        if !is_permutation(&self.column_permutation, width) {
            return Err(Error::KeyMismatch(format!(
                "column permutation does not cover 0..{width}"
            )));
        }
        if self.row_shifts.len() != height {
            return Err(Error::KeyMismatch(format!(
                "{} row shifts for {height} rows",
                self.row_shifts.len()
            )));
        }
        if let Some(s) = self.row_shifts.iter().find(|&&s| s as usize >= width) {
            return Err(Error::KeyMismatch(format!(
                "row shift {s} out of range for width {width}"
            )));
        }
        if let Some(r) = self.inverted_rows.iter().find(|&&r| r as usize >= height) {
            return Err(Error::KeyMismatch(format!(
                "inverted row {r} out of range for height {height}"
            )));
        }
        Ok(())
    }
}

/// Everything needed to undo a flat scramble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatKey {
    /// Scrambled pixel `i` was read from flattened position `permutation[i]`.
    pub permutation: Vec<u32>,
}

impl FlatKey {
    pub fn generate<R: Rng>(pixel_count: usize, rng: &mut R) -> Result<Self> {
        if pixel_count == 0 {
            return Err(Error::InvalidDimensions("zero pixel count".into()));
        }
        debug!("flat key: {pixel_count} pixel permutation");
        Ok(Self {
            permutation: random_permutation(pixel_count, rng),
        })
    }

    pub(crate) fn validate_for(&self, pixel_count: usize) -> Result<()> {
        if self.permutation.len() != pixel_count {
            return Err(Error::KeyMismatch(format!(
                "key permutes {} pixels, image has {pixel_count}",
                self.permutation.len()
            )));
        }
        if !is_permutation(&self.permutation, pixel_count) {
            return Err(Error::KeyMismatch(
                "permutation has repeated or out-of-range indices".into(),
            ));
        }
        Ok(())
    }
}

/// A restore key tagged with the strategy that produced it.
///
/// Serialized as JSON with a `strategy` field, so a key file can only be
/// replayed through the scheme it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RestoreKey {
    Structured(StructuredKey),
    Flat(FlatKey),
}

impl RestoreKey {
    /// Generates a fresh key for an image of the given dimensions, drawing
    /// entropy only from `rng`.
    pub fn generate<R: Rng>(
        strategy: Strategy,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self> {
        match strategy {
            Strategy::Structured => {
                StructuredKey::generate(width, height, rng).map(Self::Structured)
            }
            Strategy::Flat => {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimensions(format!("{width}x{height} image")));
                }
                FlatKey::generate(width * height, rng).map(Self::Flat)
            }
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Structured(_) => Strategy::Structured,
            Self::Flat(_) => Strategy::Flat,
        }
    }

    /// Writes the key as pretty-printed JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }

    /// Reads a key previously written by [`RestoreKey::to_writer`].
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}
