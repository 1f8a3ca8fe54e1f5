//! Main Program for Pixelveil
//! Run with `--help` for more instruction

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

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use clap::{Parser, Subcommand, ValueEnum};
use image::io::Reader as ImageReader;
use image::save_buffer;
use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sha2::{Digest, Sha256};

use pixelveil::{descramble, scramble, PixelGrid, RestoreKey, Strategy, CHANNELS};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scramble an image and write its restore key
    Scramble {
        /// Input file
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Restore key file to write
        #[arg(short = 'k', long)]
        key: PathBuf,

        /// Scrambling scheme
        #[arg(long, value_enum, default_value = "structured")]
        strategy: StrategyArg,

        /// Random seed
        #[arg(long)]
        seed: Option<String>,
    },
    /// Restore a scrambled image from its key
    Descramble {
        /// Scrambled input file
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Restore key file written during scrambling
        #[arg(short = 'k', long)]
        key: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    /// Column permutation, row rotation, periodic row inversion
    Structured,
    /// Single whole-image permutation
    Flat,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Structured => Strategy::Structured,
            StrategyArg::Flat => Strategy::Flat,
        }
    }
}

fn load_rgb(path: &Path) -> Result<PixelGrid, Error> {
    let im = ImageReader::new(BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    ))
    .with_guessed_format()?
    .decode()?
    .into_rgb8();

    let (width, height) = im.dimensions();
    Ok(PixelGrid::from_raw(
        height as usize,
        width as usize,
        CHANNELS,
        im.into_raw(),
    )?)
}

fn save_rgb(grid: &PixelGrid, path: &Path) -> Result<(), Error> {
    save_buffer(
        path,
        grid.as_bytes(),
        grid.width() as u32,
        grid.height() as u32,
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

fn make_rng(seed: Option<String>) -> Xoshiro256StarStar {
    if let Some(seed) = seed {
        let mut hasher = Sha256::new();
        hasher.update(seed);

        Xoshiro256StarStar::from_seed(hasher.finalize().into())
    } else {
        Xoshiro256StarStar::from_entropy()
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Scramble {
            input,
            output,
            key,
            strategy,
            seed,
        } => {
            let grid = load_rgb(&input)?;
            info!(
                "scrambling {} ({}x{})",
                input.display(),
                grid.width(),
                grid.height()
            );

            let mut random = make_rng(seed);
            let (scrambled, restore) = scramble(&grid, strategy.into(), &mut random)?;

            save_rgb(&scrambled, &output)?;
            let mut writer = BufWriter::new(
                File::create(&key).with_context(|| format!("creating {}", key.display()))?,
            );
            restore.to_writer(&mut writer)?;
            writer.flush()?;
            info!("wrote {} and key {}", output.display(), key.display());
        }
        Command::Descramble { input, output, key } => {
            let grid = load_rgb(&input)?;
            let restore = RestoreKey::from_reader(BufReader::new(
                File::open(&key).with_context(|| format!("opening {}", key.display()))?,
            ))?;

            let restored = descramble(&grid, &restore)?;

            save_rgb(&restored, &output)?;
            info!("restored {} to {}", input.display(), output.display());
        }
    }

    Ok(())
}
