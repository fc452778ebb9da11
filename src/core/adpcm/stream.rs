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

//! Resumable Microsoft ADPCM stream decoder
//!
//! The decoder is a state machine whose position survives between calls.
//! A call runs states until the input runs dry or the output fills, then
//! returns; the next call picks up in the same state.
//!
//! # State Flow
//!
//! ```text
//! Init -> InitMono/InitStereo -> FillingCache (header) -> GetDecoder*
//!      -> [CacheFull] -> WriteSamples* -> WritingSamples* <-> CacheFull
//!      -> [SkipPadding] -> InitMono/InitStereo -> ...
//! ```
//!
//! `FillingCache` and `CacheFull` are shared sub-states that return to
//! `resume_state` once the cache is full or empty.

use super::{lead_samples, parse_header, AdpcmChannel, HEADER_BYTES_PER_CHANNEL};
use crate::core::decompress::cache::CacheBuffer;
use crate::core::decompress::cursor::{InputCursor, OutputCursor};
use crate::core::decompress::{Counters, Decompress, Progress, SampleType, Signature};
use crate::core::error::{Result, StreamError};
use crate::core::format::{Encoding, StreamFormat};

/// Output bytes per decoded byte (two 16-bit samples)
const BYTES_OUT_PER_BYTE_IN: usize = 4;

/// Decoder position between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Start of stream
    Init,
    /// Start of a mono block
    InitMono,
    /// Start of a stereo block
    InitStereo,
    /// Mono header available, emit its samples
    GetDecoderMono,
    /// Stereo header available, emit its samples
    GetDecoderStereo,
    /// Set up nibble decoding for a mono block
    WriteSamplesMono,
    /// Set up nibble decoding for a stereo block
    WriteSamplesStereo,
    /// Decoding mono nibbles
    WritingSamplesMono,
    /// Decoding stereo nibbles
    WritingSamplesStereo,
    /// Discarding pad bytes at the end of a block
    SkipPadding,
    /// Collecting input bytes into the cache
    FillingCache,
    /// Emitting cached output bytes
    CacheFull,
}

/// Streaming Microsoft ADPCM decoder
///
/// Produces native-endian 16-bit PCM, interleaved for stereo. Output for a
/// given input stream is identical no matter how the input and output are
/// split across calls.
#[derive(Debug, Clone)]
pub struct MsAdpcmDecoder {
    /// Block framing of the stream
    pub(crate) format: StreamFormat,

    /// Predictor per channel (only the first is used for mono)
    pub(crate) channels: [AdpcmChannel; 2],

    state: DecodeState,

    /// Where `FillingCache`/`CacheFull` continue once done
    resume_state: DecodeState,

    /// Samples per channel still to decode in the current block
    samples_remaining: usize,

    /// Pad bytes still to skip in the current block
    padding_remaining: usize,

    cache: CacheBuffer,

    counters: Counters,
}

impl MsAdpcmDecoder {
    /// Create a decoder for a Microsoft ADPCM stream
    ///
    /// # Arguments
    ///
    /// * `format` - Stream format with the block framing from the container
    ///
    /// # Errors
    ///
    /// Returns error if the format is not Microsoft ADPCM or its framing is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use streamdec::core::adpcm::MsAdpcmDecoder;
    /// use streamdec::core::format::StreamFormat;
    ///
    /// let decoder = MsAdpcmDecoder::new(&StreamFormat::ms_adpcm(2, 2048)).unwrap();
    /// assert!(decoder.is_stereo());
    /// ```
    pub fn new(format: &StreamFormat) -> Result<Self> {
        if format.encoding != Encoding::MsAdpcm {
            return Err(StreamError::UnsupportedEncoding(format!(
                "{:?} is not Microsoft ADPCM",
                format.encoding
            )));
        }
        format.validate()?;

        Ok(Self {
            format: *format,
            channels: [AdpcmChannel::default(); 2],
            state: DecodeState::Init,
            resume_state: DecodeState::Init,
            samples_remaining: 0,
            padding_remaining: 0,
            cache: CacheBuffer::new(),
            counters: Counters::new(),
        })
    }

    /// Block framing this decoder was built for
    pub fn format(&self) -> &StreamFormat {
        &self.format
    }

    pub fn is_stereo(&self) -> bool {
        self.format.channels == 2
    }

    /// Number of channels (1 or 2)
    pub fn channel_count(&self) -> usize {
        self.format.channels as usize
    }

    /// Predictor state of one channel
    pub fn channel(&self, index: usize) -> Option<&AdpcmChannel> {
        self.channels[..self.channel_count()].get(index)
    }

    /// Current state machine position
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Samples per channel left in the current block
    pub fn samples_remaining(&self) -> usize {
        self.samples_remaining
    }

    fn init_state(&self) -> DecodeState {
        if self.is_stereo() {
            DecodeState::InitStereo
        } else {
            DecodeState::InitMono
        }
    }

    /// State to enter once every sample of the block is out
    fn end_of_block(&mut self) -> DecodeState {
        self.padding_remaining = self
            .format
            .block_size
            .saturating_sub(self.format.adpcm_payload_bytes());

        if self.padding_remaining > 0 {
            DecodeState::SkipPadding
        } else {
            self.init_state()
        }
    }

    /// Start collecting a block header
    fn begin_header(&mut self, next: DecodeState) {
        log::trace!("ADPCM: reading block header ({:?})", next);
        self.cache
            .begin_fill(HEADER_BYTES_PER_CHANNEL * self.channel_count());
        self.resume_state = next;
        self.state = DecodeState::FillingCache;
    }

    /// Seed the predictors from the cached header and emit the lead samples
    fn get_decoder(&mut self, output: &mut OutputCursor<'_>, next: DecodeState) {
        let count = self.channel_count();
        parse_header(self.cache.as_slice(), &mut self.channels[..count]);

        let (bytes, len) = lead_samples(&self.channels[..count]);
        if output.remaining() >= len {
            output.write(&bytes[..len]);
            self.state = next;
        } else {
            self.cache.load(&bytes[..len]);
            self.resume_state = next;
            self.state = DecodeState::CacheFull;
        }
    }

    /// Set up nibble decoding for a freshly opened block
    fn write_samples(&mut self, writing: DecodeState) {
        self.samples_remaining = self.format.samples_per_block.saturating_sub(2);
        self.state = if self.samples_remaining == 0 {
            // Header-only block
            self.end_of_block()
        } else {
            writing
        };
    }

    /// Decode mono nibbles
    ///
    /// # Returns
    ///
    /// false when the call has to stop
    fn writing_samples_mono(
        &mut self,
        output: &mut OutputCursor<'_>,
        input: &mut InputCursor<'_>,
    ) -> bool {
        if input.is_empty() {
            return false;
        }

        // Fast path: whole bytes with room for both samples
        let count = (self.samples_remaining / 2)
            .min(input.remaining())
            .min(output.remaining() / BYTES_OUT_PER_BYTE_IN);

        if count > 0 {
            let src = input.take(count);
            let dest = output.claim(count * BYTES_OUT_PER_BYTE_IN);
            let channel = &mut self.channels[0];

            for (d, &byte) in dest.chunks_exact_mut(BYTES_OUT_PER_BYTE_IN).zip(src) {
                d[..2].copy_from_slice(&channel.decode(byte >> 4).to_ne_bytes());
                d[2..].copy_from_slice(&channel.decode(byte).to_ne_bytes());
            }

            self.samples_remaining -= count * 2;
            if self.samples_remaining == 0 {
                self.state = self.end_of_block();
                return true;
            }
        }

        if input.is_empty() || output.is_full() {
            return false;
        }

        // Slow path: one byte through the cache
        let Some(byte) = input.next_byte() else {
            return false;
        };

        let channel = &mut self.channels[0];
        let mut bytes = [0u8; BYTES_OUT_PER_BYTE_IN];
        bytes[..2].copy_from_slice(&channel.decode(byte >> 4).to_ne_bytes());

        let len = if self.samples_remaining < 2 {
            // Odd sample count, the low nibble is padding
            self.samples_remaining = 0;
            2
        } else {
            bytes[2..].copy_from_slice(&channel.decode(byte).to_ne_bytes());
            self.samples_remaining -= 2;
            4
        };

        self.cache.load(&bytes[..len]);
        self.resume_state = if self.samples_remaining > 0 {
            DecodeState::WritingSamplesMono
        } else {
            self.end_of_block()
        };
        self.state = DecodeState::CacheFull;
        true
    }

    /// Decode stereo nibbles
    ///
    /// # Returns
    ///
    /// false when the call has to stop
    fn writing_samples_stereo(
        &mut self,
        output: &mut OutputCursor<'_>,
        input: &mut InputCursor<'_>,
    ) -> bool {
        if input.is_empty() {
            return false;
        }

        // Fast path: each byte is one left/right pair
        let count = self
            .samples_remaining
            .min(input.remaining())
            .min(output.remaining() / BYTES_OUT_PER_BYTE_IN);

        if count > 0 {
            let src = input.take(count);
            let dest = output.claim(count * BYTES_OUT_PER_BYTE_IN);
            let [left, right] = &mut self.channels;

            for (d, &byte) in dest.chunks_exact_mut(BYTES_OUT_PER_BYTE_IN).zip(src) {
                d[..2].copy_from_slice(&left.decode(byte >> 4).to_ne_bytes());
                d[2..].copy_from_slice(&right.decode(byte).to_ne_bytes());
            }

            self.samples_remaining -= count;
            if self.samples_remaining == 0 {
                self.state = self.end_of_block();
                return true;
            }
        }

        if input.is_empty() || output.is_full() {
            return false;
        }

        // Slow path: one pair through the cache
        let Some(byte) = input.next_byte() else {
            return false;
        };

        let [left, right] = &mut self.channels;
        let mut bytes = [0u8; BYTES_OUT_PER_BYTE_IN];
        bytes[..2].copy_from_slice(&left.decode(byte >> 4).to_ne_bytes());
        bytes[2..].copy_from_slice(&right.decode(byte).to_ne_bytes());
        self.samples_remaining -= 1;

        self.cache.load(&bytes);
        self.resume_state = if self.samples_remaining > 0 {
            DecodeState::WritingSamplesStereo
        } else {
            self.end_of_block()
        };
        self.state = DecodeState::CacheFull;
        true
    }
}

impl Decompress for MsAdpcmDecoder {
    fn process(&mut self, output: &mut [u8], input: &[u8]) -> Progress {
        let mut input = InputCursor::new(input);
        let mut output = OutputCursor::new(output);

        loop {
            match self.state {
                DecodeState::Init => {
                    self.state = self.init_state();
                }
                DecodeState::InitMono => {
                    self.begin_header(DecodeState::GetDecoderMono);
                }
                DecodeState::InitStereo => {
                    self.begin_header(DecodeState::GetDecoderStereo);
                }
                DecodeState::GetDecoderMono => {
                    self.get_decoder(&mut output, DecodeState::WriteSamplesMono);
                }
                DecodeState::GetDecoderStereo => {
                    self.get_decoder(&mut output, DecodeState::WriteSamplesStereo);
                }
                DecodeState::WriteSamplesMono => {
                    self.write_samples(DecodeState::WritingSamplesMono);
                }
                DecodeState::WriteSamplesStereo => {
                    self.write_samples(DecodeState::WritingSamplesStereo);
                }
                DecodeState::WritingSamplesMono => {
                    if !self.writing_samples_mono(&mut output, &mut input) {
                        break;
                    }
                }
                DecodeState::WritingSamplesStereo => {
                    if !self.writing_samples_stereo(&mut output, &mut input) {
                        break;
                    }
                }
                DecodeState::SkipPadding => {
                    self.padding_remaining -= input.skip(self.padding_remaining);
                    if self.padding_remaining > 0 {
                        break;
                    }
                    self.state = self.init_state();
                }
                DecodeState::FillingCache => {
                    if !self.cache.fill_from(&mut input) {
                        break;
                    }
                    self.state = self.resume_state;
                }
                DecodeState::CacheFull => {
                    if !self.cache.drain_into(&mut output) {
                        break;
                    }
                    self.state = self.resume_state;
                }
            }
        }

        self.counters.finish(&input, &output)
    }

    fn reset(&mut self) {
        self.counters.clear();
        self.cache.clear();
        self.channels = [AdpcmChannel::default(); 2];
        self.state = DecodeState::Init;
        self.resume_state = DecodeState::Init;
        self.samples_remaining = 0;
        self.padding_remaining = 0;
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn signature(&self) -> Signature {
        *b"MSAD"
    }

    fn sample_type(&self) -> SampleType {
        SampleType::I16
    }
}
