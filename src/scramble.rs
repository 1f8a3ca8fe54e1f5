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

//! Forward and inverse pixel transforms.
//!
//! Both strategies take a borrowed grid and return a fresh one; the caller's
//! buffer is never touched. Keys are validated against the grid shape before
//! any output is allocated.

use log::debug;
use ndarray::prelude::*;
use ndarray::Zip;
use rand::Rng;

use crate::error::Result;
use crate::grid::PixelGrid;
use crate::key::{FlatKey, RestoreKey, Strategy, StructuredKey};

/// Scrambles `grid` under a freshly generated key for `strategy`.
///
/// The returned key is the only way back; it must reach
/// [`descramble`] unmodified.
pub fn scramble<R: Rng>(
    grid: &PixelGrid,
    strategy: Strategy,
    rng: &mut R,
) -> Result<(PixelGrid, RestoreKey)> {
    let key = RestoreKey::generate(strategy, grid.width(), grid.height(), rng)?;
    let out = scramble_with_key(grid, &key)?;
    Ok((out, key))
}

/// Scrambles `grid` under an existing key.
pub fn scramble_with_key(grid: &PixelGrid, key: &RestoreKey) -> Result<PixelGrid> {
    match key {
        RestoreKey::Structured(k) => structured_scramble(grid, k),
        RestoreKey::Flat(k) => flat_scramble(grid, k),
    }
}

/// Undoes a scramble. The key's tag selects the inverse scheme, so a key can
/// never be replayed through the wrong strategy.
pub fn descramble(grid: &PixelGrid, key: &RestoreKey) -> Result<PixelGrid> {
    match key {
        RestoreKey::Structured(k) => structured_descramble(grid, k),
        RestoreKey::Flat(k) => flat_descramble(grid, k),
    }
}

#[derive(Clone, Copy)]
enum Rotate {
    Left,
    Right,
}

/// Cyclic per-row rotation by each row's shift. Rows are independent, so
/// they rotate in parallel.
fn rotate_rows(mut arr: ArrayViewMut3<u8>, shifts: &[u32], dir: Rotate) {
    let channels = arr.dim().2;
    let shifts = ArrayView1::from(shifts);
    Zip::from(arr.outer_iter_mut())
        .and(shifts)
        .par_for_each(|mut row, &shift| {
            let row = row.as_slice_mut().expect("Should be standard-layout");
            let k = shift as usize * channels;
            match dir {
                Rotate::Left => row.rotate_left(k),
                Rotate::Right => row.rotate_right(k),
            }
        });
}

/// Complements every sample in the row. Involutive.
fn invert_row(mut row: ArrayViewMut2<u8>) {
    row.mapv_inplace(|v| 255 - v);
}

/// Column gather, then per-row left rotation, then row inversion,
/// in exactly that order.
fn structured_scramble(grid: &PixelGrid, key: &StructuredKey) -> Result<PixelGrid> {
    key.validate_for(grid.width(), grid.height())?;
    debug!(
        "structured scramble of {}x{} grid",
        grid.width(),
        grid.height()
    );

    let cols: Vec<usize> = key.column_permutation.iter().map(|&c| c as usize).collect();
    let mut out = grid.array().select(Axis(1), &cols).as_standard_layout().into_owned();

    rotate_rows(out.view_mut(), &key.row_shifts, Rotate::Left);

    for &r in &key.inverted_rows {
        invert_row(out.index_axis_mut(Axis(0), r as usize));
    }

    Ok(PixelGrid::from_array(out))
}

/// The forward steps undone back-to-front: re-complement inverted rows,
/// rotate rows right, then gather columns through the inverse permutation.
fn structured_descramble(grid: &PixelGrid, key: &StructuredKey) -> Result<PixelGrid> {
    key.validate_for(grid.width(), grid.height())?;
    debug!(
        "structured descramble of {}x{} grid",
        grid.width(),
        grid.height()
    );

    let mut arr = grid.array().to_owned();

    for &r in &key.inverted_rows {
        invert_row(arr.index_axis_mut(Axis(0), r as usize));
    }

    rotate_rows(arr.view_mut(), &key.row_shifts, Rotate::Right);

    // Argsort of the forward permutation: column j went to the output slot
    // holding j, so pulling through `inverse` puts it back.
    let mut inverse = vec![0usize; key.column_permutation.len()];
    for (k, &c) in key.column_permutation.iter().enumerate() {
        inverse[c as usize] = k;
    }
    let arr = arr.select(Axis(1), &inverse).as_standard_layout().into_owned();

    Ok(PixelGrid::from_array(arr))
}

/// Gather: scrambled pixel `i` reads from flattened position `permutation[i]`.
fn flat_scramble(grid: &PixelGrid, key: &FlatKey) -> Result<PixelGrid> {
    key.validate_for(grid.pixel_count())?;
    debug!("flat scramble of {} pixels", grid.pixel_count());

    let (h, w, c) = grid.array().dim();
    let flat = grid
        .array()
        .view()
        .into_shape((h * w, c))
        .expect("Should be standard-layout");

    let indices: Vec<usize> = key.permutation.iter().map(|&i| i as usize).collect();
    let out = flat.select(Axis(0), &indices);
    let out = out
        .into_shape((h, w, c))
        .expect("Should be standard-layout");

    Ok(PixelGrid::from_array(out))
}

/// Scatter: scrambled pixel `i` goes home to flattened position
/// `permutation[i]`. Gathering a second time would not invert the gather.
fn flat_descramble(grid: &PixelGrid, key: &FlatKey) -> Result<PixelGrid> {
    key.validate_for(grid.pixel_count())?;
    debug!("flat descramble of {} pixels", grid.pixel_count());

    let (h, w, c) = grid.array().dim();
    let flat = grid
        .array()
        .view()
        .into_shape((h * w, c))
        .expect("Should be standard-layout");

    let mut out = Array2::<u8>::zeros((h * w, c));
    for (i, &p) in key.permutation.iter().enumerate() {
        out.row_mut(p as usize).assign(&flat.row(i));
    }
    let out = out
        .into_shape((h, w, c))
        .expect("Should be standard-layout");

    Ok(PixelGrid::from_array(out))
}
