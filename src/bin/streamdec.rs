// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use streamdec::core::decompress::{Decompress, Decompressor};
use streamdec::core::error::{Result, StreamError};
use streamdec::core::format::{Encoding, StreamFormat};
use streamdec::core::transcode::transcode;

/// Streaming audio decoder
#[derive(Parser)]
#[command(name = "streamdec")]
#[command(about = "Decode raw PCM or Microsoft ADPCM streams to native PCM", long_about = None)]
struct Args {
    /// Input stream file ("-" for stdin)
    input: PathBuf,

    /// Output PCM file ("-" for stdout)
    output: PathBuf,

    /// Stream format file (TOML)
    #[arg(short = 'f', long)]
    format: Option<PathBuf>,

    /// Encoding (u8, s8, s16le, s16be, s32le, s32be, ms_adpcm)
    #[arg(short = 'e', long)]
    encoding: Option<String>,

    /// Number of interleaved channels
    #[arg(short = 'c', long)]
    channels: Option<u16>,

    /// ADPCM block size in bytes
    #[arg(short = 'b', long)]
    block_size: Option<usize>,

    /// ADPCM samples per channel per block (derived from the block size if omitted)
    #[arg(short = 's', long)]
    samples_per_block: Option<usize>,

    /// Input buffer size in bytes
    #[arg(long, default_value = "4096")]
    input_chunk: usize,

    /// Output buffer size in bytes
    #[arg(long, default_value = "16384")]
    output_chunk: usize,
}

/// Combine the format file and command line flags into one stream format
fn resolve_format(args: &Args) -> Result<StreamFormat> {
    let mut format = match (&args.format, &args.encoding) {
        (Some(path), _) => {
            info!("Loading stream format from: {}", path.display());
            StreamFormat::load(path)?
        }
        (None, Some(_)) => StreamFormat::plain(Encoding::Unsigned8, 1),
        (None, None) => {
            return Err(StreamError::Config(
                "either --format or --encoding is required".to_string(),
            ))
        }
    };

    if let Some(name) = &args.encoding {
        format.encoding = Encoding::from_name(name)?;
    }
    if let Some(channels) = args.channels {
        format.channels = channels;
    }

    if format.encoding == Encoding::MsAdpcm {
        if let Some(block_size) = args.block_size {
            format.block_size = block_size;
            format.samples_per_block = 0;
        }
        if let Some(samples) = args.samples_per_block {
            format.samples_per_block = samples;
        }
        if format.block_size == 0 {
            return Err(StreamError::Config(
                "Microsoft ADPCM needs --block-size or a format file".to_string(),
            ));
        }
        if format.samples_per_block == 0 {
            format.samples_per_block =
                StreamFormat::ms_adpcm(format.channels, format.block_size).samples_per_block;
        }
    }

    format.validate()?;
    Ok(format)
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("streamdec v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let format = resolve_format(&args).inspect_err(|e| error!("Invalid stream format: {}", e))?;
    info!(
        "Format: {:?}, {} channel(s), block {} bytes, {} samples per block",
        format.encoding, format.channels, format.block_size, format.samples_per_block
    );

    let mut decoder = Decompressor::new(&format)?;

    let mut reader = open_input(&args.input)?;
    let mut writer = open_output(&args.output)?;

    let stats = transcode(
        &mut reader,
        &mut writer,
        &mut decoder,
        args.input_chunk,
        args.output_chunk,
    )
    .inspect_err(|e| error!("Decoding failed: {}", e))?;

    info!(
        "Wrote {} bytes of {:?} PCM to {}",
        stats.bytes_written,
        decoder.sample_type(),
        args.output.display()
    );

    Ok(())
}
