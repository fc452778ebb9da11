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

//! Plain PCM format converters
//!
//! Uncompressed PCM that only differs from the host's native layout by
//! sign convention or byte order:
//!
//! - [`Unsigned8`]: straight copy
//! - [`Signed8`]: flips the sign bit so the output is unsigned 8 bit
//! - [`Endian16`] / [`Endian32`]: reverse the byte order of each value when
//!   the stream order differs from the host
//!
//! The endian converters cache the bytes of a value split across calls,
//! so the emitted bytes never depend on how the stream was chunked.

#[cfg(test)]
mod tests;

use super::decompress::cache::CacheBuffer;
use super::decompress::cursor::{InputCursor, OutputCursor};
use super::decompress::{Counters, Decompress, Progress, SampleType, Signature};
use super::format::ByteOrder;

/// Copy as many bytes as both sides allow
fn copy_through(output: &mut OutputCursor<'_>, input: &mut InputCursor<'_>) {
    let count = input.remaining().min(output.remaining());
    output.write(input.take(count));
}

/// Unsigned 8 bit PCM passthrough
#[derive(Debug, Clone, Default)]
pub struct Unsigned8 {
    counters: Counters,
}

impl Unsigned8 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decompress for Unsigned8 {
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress {
        let mut input = InputCursor::new(input);
        let mut output = OutputCursor::new(output);
        copy_through(&mut output, &mut input);
        self.counters.finish(&input, &output)
    }

    fn reset(&mut self) {
        self.counters.clear();
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn signature(&self) -> Signature {
        *b"RAW8"
    }

    fn sample_type(&self) -> SampleType {
        SampleType::U8
    }
}

/// Signed 8 bit PCM to unsigned 8 bit
#[derive(Debug, Clone, Default)]
pub struct Signed8 {
    counters: Counters,
}

impl Signed8 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decompress for Signed8 {
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress {
        let mut input = InputCursor::new(input);
        let mut output = OutputCursor::new(output);

        let count = input.remaining().min(output.remaining());
        let src = input.take(count);
        for (dest, &byte) in output.claim(count).iter_mut().zip(src) {
            *dest = byte ^ 0x80;
        }

        self.counters.finish(&input, &output)
    }

    fn reset(&mut self) {
        self.counters.clear();
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn signature(&self) -> Signature {
        *b"SGN8"
    }

    fn sample_type(&self) -> SampleType {
        SampleType::U8
    }
}

/// Converter state between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConvertState {
    /// No value in flight, convert whole values straight through
    Bulk,
    /// Collecting the bytes of a value split by the input boundary
    FillingCache,
    /// Emitting a converted value split by the output boundary
    CacheFull,
}

/// Multi-byte PCM byte order converter
///
/// `N` is the size of one value in bytes (2 or 4).
#[derive(Debug, Clone)]
pub struct EndianConverter<const N: usize> {
    /// Byte order of the incoming stream
    order: ByteOrder,

    state: ConvertState,

    /// Holds one value while it straddles a call boundary
    cache: CacheBuffer,

    counters: Counters,
}

/// 16 bit PCM byte order converter
pub type Endian16 = EndianConverter<2>;

/// 32 bit PCM byte order converter
pub type Endian32 = EndianConverter<4>;

impl<const N: usize> EndianConverter<N> {
    /// Create a converter for a stream stored in `order`
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            state: ConvertState::Bulk,
            cache: CacheBuffer::new(),
            counters: Counters::new(),
        }
    }

    /// Byte order of the incoming stream
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes of a split value currently held over
    pub fn cached_bytes(&self) -> usize {
        match self.state {
            ConvertState::Bulk => 0,
            ConvertState::FillingCache => self.cache.fill_count(),
            ConvertState::CacheFull => self.cache.pending(),
        }
    }

    /// Reverse every whole value both sides have room for
    ///
    /// # Returns
    ///
    /// true if a partial value is left that needs the cache
    #[inline(always)]
    fn convert_bulk(output: &mut OutputCursor<'_>, input: &mut InputCursor<'_>) -> bool {
        let count = input.remaining().min(output.remaining());
        let whole = count - count % N;

        let src = input.take(whole);
        let dest = output.claim(whole);
        for (d, s) in dest.chunks_exact_mut(N).zip(src.chunks_exact(N)) {
            d.copy_from_slice(s);
            d.reverse();
        }

        count != whole
    }
}

impl<const N: usize> Decompress for EndianConverter<N> {
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress {
        let mut input = InputCursor::new(input);
        let mut output = OutputCursor::new(output);

        if self.order.is_native() {
            copy_through(&mut output, &mut input);
            return self.counters.finish(&input, &output);
        }

        loop {
            match self.state {
                ConvertState::Bulk => {
                    if !Self::convert_bulk(&mut output, &mut input) {
                        break;
                    }
                    self.cache.begin_fill(N);
                    self.state = ConvertState::FillingCache;
                }
                ConvertState::FillingCache => {
                    if !self.cache.fill_from(&mut input) {
                        break;
                    }
                    self.cache.as_mut_slice().reverse();
                    self.cache.begin_drain();
                    self.state = ConvertState::CacheFull;
                }
                ConvertState::CacheFull => {
                    if !self.cache.drain_into(&mut output) {
                        break;
                    }
                    self.state = ConvertState::Bulk;
                }
            }
        }

        self.counters.finish(&input, &output)
    }

    fn reset(&mut self) {
        self.counters.clear();
        self.cache.clear();
        self.state = ConvertState::Bulk;
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn signature(&self) -> Signature {
        match (N, self.order) {
            (2, ByteOrder::Little) => *b"16LE",
            (2, ByteOrder::Big) => *b"16BE",
            (_, ByteOrder::Little) => *b"32LE",
            (_, ByteOrder::Big) => *b"32BE",
        }
    }

    fn sample_type(&self) -> SampleType {
        if N == 2 {
            SampleType::I16
        } else {
            SampleType::I32
        }
    }
}
