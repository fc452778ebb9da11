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

//! Reader to writer transcoding
//!
//! Drives any [`Decompress`] implementation from a [`Read`] source into a
//! [`Write`] sink through fixed-size buffers. The buffer sizes are free
//! parameters; since every codec is resumable, they change the number of
//! calls but never the bytes written.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use streamdec::core::decompress::Decompressor;
//! use streamdec::core::format::{Encoding, StreamFormat};
//! use streamdec::core::transcode::transcode;
//!
//! let format = StreamFormat::plain(Encoding::Signed8, 1);
//! let mut decoder = Decompressor::new(&format).unwrap();
//!
//! let mut reader = Cursor::new(vec![0x00u8, 0x7F, 0x80]);
//! let mut pcm = Vec::new();
//!
//! let stats = transcode(&mut reader, &mut pcm, &mut decoder, 2, 1).unwrap();
//! assert_eq!(pcm, [0x80, 0xFF, 0x00]);
//! assert_eq!(stats.bytes_read, 3);
//! ```

use std::io::{ErrorKind, Read, Write};

use log::{debug, info};

use super::decompress::Decompress;
use super::error::{Result, StreamError};

/// Totals of one transcoding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeStats {
    /// Bytes pulled from the reader
    pub bytes_read: u64,

    /// Bytes handed to the writer
    pub bytes_written: u64,

    /// Number of `process` calls made
    pub calls: u64,
}

/// Fill as much of `buf` as one read allows, retrying on interrupts
fn read_some<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Decode everything `reader` yields into `writer`
///
/// Input is read `input_chunk` bytes at a time and only refilled once the
/// decoder has consumed all of it. Every call's output (at most
/// `output_chunk` bytes) is written before the next call. After end of
/// input the decoder is called until it produces nothing more, which
/// drains any bytes it still holds.
///
/// # Arguments
///
/// * `reader` - Compressed stream source
/// * `writer` - PCM sink
/// * `decoder` - Decompressor, normally freshly created or reset
/// * `input_chunk` - Input buffer size in bytes
/// * `output_chunk` - Output buffer size in bytes
///
/// # Returns
///
/// Byte and call totals for the run
///
/// # Errors
///
/// Returns error if a buffer size is zero or the reader or writer fails.
pub fn transcode<R, W, D>(
    reader: &mut R,
    writer: &mut W,
    decoder: &mut D,
    input_chunk: usize,
    output_chunk: usize,
) -> Result<TranscodeStats>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    D: Decompress + ?Sized,
{
    if input_chunk == 0 {
        return Err(StreamError::InvalidBufferSize {
            name: "input_chunk",
        });
    }
    if output_chunk == 0 {
        return Err(StreamError::InvalidBufferSize {
            name: "output_chunk",
        });
    }

    info!(
        "Transcoding {} stream ({} byte input, {} byte output buffers)",
        String::from_utf8_lossy(&decoder.signature()),
        input_chunk,
        output_chunk
    );

    let mut input = vec![0u8; input_chunk];
    let mut output = vec![0u8; output_chunk];
    let mut stats = TranscodeStats::default();

    let mut start = 0;
    let mut end = 0;
    let mut eof = false;

    loop {
        if start == end && !eof {
            start = 0;
            end = read_some(reader, &mut input)?;
            stats.bytes_read += end as u64;
            eof = end == 0;
        }

        let progress = decoder.process(&mut output, &input[start..end]);
        stats.calls += 1;

        writer.write_all(&output[..progress.produced])?;
        stats.bytes_written += progress.produced as u64;
        start += progress.consumed;

        if eof && progress.produced == 0 {
            break;
        }
    }

    writer.flush()?;

    debug!(
        "Decoder totals: {} bytes in, {} bytes out",
        decoder.total_input(),
        decoder.total_output()
    );
    info!(
        "Transcoded {} bytes into {} bytes of PCM in {} calls",
        stats.bytes_read, stats.bytes_written, stats.calls
    );

    Ok(stats)
}
