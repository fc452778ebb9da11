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

//! Decompressor contract
//!
//! Every codec in this crate turns a compressed byte stream into PCM one
//! [`process`](Decompress::process) call at a time. Calls take whatever input
//! and output space the caller has on hand; a value that straddles a buffer
//! boundary is carried over in a [`CacheBuffer`](cache::CacheBuffer) so the concatenated output of
//! any chunking equals the output of one unbounded call.
//!
//! # Status Codes
//!
//! | Status           | Meaning                                               |
//! |------------------|-------------------------------------------------------|
//! | `Complete`       | All input consumed and the output filled exactly      |
//! | `DataStarvation` | Output has room left but the input ran dry            |
//! | `BufferTooSmall` | Output filled while input bytes are still unconsumed  |
//!
//! None of these are failures; the caller just calls again.
//!
//! # Example
//!
//! ```
//! use streamdec::core::decompress::{Decompress, Decompressor, Status};
//! use streamdec::core::format::{Encoding, StreamFormat};
//!
//! let format = StreamFormat::plain(Encoding::Signed8, 1);
//! let mut decoder = Decompressor::new(&format).unwrap();
//!
//! let mut output = [0u8; 4];
//! let progress = decoder.process(&mut output, &[0x00, 0x7F, 0x80, 0xFF]);
//!
//! assert_eq!(progress.status, Status::Complete);
//! assert_eq!(output, [0x80, 0xFF, 0x00, 0x7F]);
//! ```

pub mod cache;
pub mod cursor;

#[cfg(test)]
mod tests;

use super::adpcm::MsAdpcmDecoder;
use super::error::Result;
use super::format::{ByteOrder, Encoding, StreamFormat};
use super::plain::{Endian16, Endian32, Signed8, Unsigned8};
use cursor::{InputCursor, OutputCursor};

/// Outcome of one `process` call
///
/// Advisory only; every status is recoverable by calling again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Input fully consumed, output filled
    Complete,
    /// Output has room but more input is needed
    DataStarvation,
    /// Input remains because the output filled first
    BufferTooSmall,
}

/// Result of one `process` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Input bytes consumed by this call
    pub consumed: usize,

    /// Output bytes produced by this call
    pub produced: usize,

    pub status: Status,
}

/// PCM sample type a decompressor emits, always in host byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    /// Unsigned 8 bit
    U8,
    /// Signed 16 bit
    I16,
    /// Signed 32 bit
    I32,
}

impl SampleType {
    /// Size of one sample in bytes
    pub fn size(self) -> usize {
        match self {
            SampleType::U8 => 1,
            SampleType::I16 => 2,
            SampleType::I32 => 4,
        }
    }
}

/// Four character code identifying a codec
pub type Signature = [u8; 4];

/// Byte accounting shared by every decompressor
///
/// Totals only grow; they are cleared by `reset`. The `last_*` fields
/// describe the most recent call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_input: usize,
    pub total_output: usize,
    pub last_input: usize,
    pub last_output: usize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record a finished call and derive its status
    ///
    /// # Arguments
    ///
    /// * `input` - Input cursor as the call left it
    /// * `output` - Output cursor as the call left it
    pub fn finish(&mut self, input: &InputCursor<'_>, output: &OutputCursor<'_>) -> Progress {
        let consumed = input.position();
        let produced = output.position();

        self.last_input = consumed;
        self.last_output = produced;
        self.total_input += consumed;
        self.total_output += produced;

        let status = if !output.is_full() {
            Status::DataStarvation
        } else if !input.is_empty() {
            Status::BufferTooSmall
        } else {
            Status::Complete
        };

        Progress {
            consumed,
            produced,
            status,
        }
    }
}

/// Streaming decompressor interface
///
/// Not reentrant: one call at a time per instance. Implementations never
/// block, never allocate and never panic inside `process`.
pub trait Decompress {
    /// Decode as much of `input` into `output` as both sides allow
    ///
    /// # Arguments
    ///
    /// * `output` - Destination for PCM bytes (may be empty)
    /// * `input` - Compressed bytes (may be empty)
    ///
    /// # Returns
    ///
    /// Bytes consumed and produced by this call plus the advisory status
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress;

    /// Return to the start-of-stream state and clear all counters
    fn reset(&mut self);

    /// Byte accounting since the last reset
    fn counters(&self) -> &Counters;

    /// Codec identifier
    fn signature(&self) -> Signature;

    /// PCM type written to the output
    fn sample_type(&self) -> SampleType;

    /// Total input bytes consumed since the last reset
    fn total_input(&self) -> usize {
        self.counters().total_input
    }

    /// Total output bytes produced since the last reset
    fn total_output(&self) -> usize {
        self.counters().total_output
    }

    /// Input bytes consumed by the last call
    fn last_input(&self) -> usize {
        self.counters().last_input
    }

    /// Output bytes produced by the last call
    fn last_output(&self) -> usize {
        self.counters().last_output
    }
}

/// The closed family of codecs this crate provides
#[derive(Debug, Clone)]
pub enum Decompressor {
    Unsigned8(Unsigned8),
    Signed8(Signed8),
    Endian16(Endian16),
    Endian32(Endian32),
    MsAdpcm(MsAdpcmDecoder),
}

impl Decompressor {
    /// Build the decompressor for a stream format
    ///
    /// # Errors
    ///
    /// Returns error if the ADPCM block framing is invalid.
    pub fn new(format: &StreamFormat) -> Result<Self> {
        format.validate()?;

        let decoder = match format.encoding {
            Encoding::Unsigned8 => Decompressor::Unsigned8(Unsigned8::new()),
            Encoding::Signed8 => Decompressor::Signed8(Signed8::new()),
            Encoding::Pcm16Le => Decompressor::Endian16(Endian16::new(ByteOrder::Little)),
            Encoding::Pcm16Be => Decompressor::Endian16(Endian16::new(ByteOrder::Big)),
            Encoding::Pcm32Le => Decompressor::Endian32(Endian32::new(ByteOrder::Little)),
            Encoding::Pcm32Be => Decompressor::Endian32(Endian32::new(ByteOrder::Big)),
            Encoding::MsAdpcm => Decompressor::MsAdpcm(MsAdpcmDecoder::new(format)?),
        };

        log::debug!(
            "Created {} decompressor for {:?}",
            String::from_utf8_lossy(&decoder.signature()),
            format.encoding
        );

        Ok(decoder)
    }

    fn inner(&self) -> &dyn Decompress {
        match self {
            Decompressor::Unsigned8(d) => d,
            Decompressor::Signed8(d) => d,
            Decompressor::Endian16(d) => d,
            Decompressor::Endian32(d) => d,
            Decompressor::MsAdpcm(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Decompress {
        match self {
            Decompressor::Unsigned8(d) => d,
            Decompressor::Signed8(d) => d,
            Decompressor::Endian16(d) => d,
            Decompressor::Endian32(d) => d,
            Decompressor::MsAdpcm(d) => d,
        }
    }
}

impl Decompress for Decompressor {
    #[inline]
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress {
        self.inner_mut().process(output, input)
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }

    fn counters(&self) -> &Counters {
        self.inner().counters()
    }

    fn signature(&self) -> Signature {
        self.inner().signature()
    }

    fn sample_type(&self) -> SampleType {
        self.inner().sample_type()
    }
}
