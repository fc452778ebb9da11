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

//! Whole-block decoding
//!
//! For callers that already hold complete blocks (a memory-mapped file, a
//! sound bank) and do not need resumability.

use super::stream::MsAdpcmDecoder;
use super::{parse_header, HEADER_BYTES_PER_CHANNEL};
use crate::core::error::{Result, StreamError};

impl MsAdpcmDecoder {
    /// Samples per channel a block of `available` bytes decodes to
    ///
    /// A short trailing block still decodes if its header is intact; the
    /// sample count then follows from the bytes present. Fewer bytes than a
    /// header yield nothing.
    pub fn samples_in_block(&self, available: usize) -> usize {
        let channels = self.channel_count();
        let available = available.min(self.format.block_size);

        if available < HEADER_BYTES_PER_CHANNEL * channels {
            return 0;
        }

        if available < self.format.block_size {
            let derived = (available - 6 * channels) * 2 / channels;
            derived.min(self.format.samples_per_block)
        } else {
            self.format.samples_per_block
        }
    }

    /// Decode one complete block into interleaved samples
    ///
    /// Only the first `block_size` bytes of `input` are used. The
    /// predictors are reloaded from the block header; the streaming state
    /// machine is left untouched.
    ///
    /// # Arguments
    ///
    /// * `output` - Destination for interleaved 16-bit samples
    /// * `input` - One block of ADPCM data
    ///
    /// # Returns
    ///
    /// Number of `i16` values written (samples per channel times channels)
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::OutputTooSmall`] if `output` cannot hold the block.
    ///
    /// # Example
    ///
    /// ```
    /// use streamdec::core::adpcm::MsAdpcmDecoder;
    /// use streamdec::core::format::StreamFormat;
    ///
    /// let mut decoder = MsAdpcmDecoder::new(&StreamFormat::ms_adpcm(1, 8)).unwrap();
    ///
    /// // Preset 0, scale 16, sample1 = 100, sample2 = 50, one nibble byte
    /// let block = [0, 16, 0, 100, 0, 50, 0, 0x00];
    /// let mut samples = [0i16; 4];
    ///
    /// let written = decoder.decode_block(&mut samples, &block).unwrap();
    /// assert_eq!(written, 4);
    /// assert_eq!(samples, [50, 100, 100, 100]);
    /// ```
    pub fn decode_block(&mut self, output: &mut [i16], input: &[u8]) -> Result<usize> {
        let channels = self.channel_count();
        let samples = self.samples_in_block(input.len());

        if samples == 0 {
            return Ok(0);
        }

        let available = input.len().min(self.format.block_size);
        if available < self.format.block_size {
            log::warn!(
                "ADPCM: short final block ({} of {} bytes), decoding {} samples",
                available,
                self.format.block_size,
                samples
            );
        }

        let needed = samples * channels;
        if output.len() < needed {
            return Err(StreamError::OutputTooSmall {
                needed,
                got: output.len(),
            });
        }

        let header_len = HEADER_BYTES_PER_CHANNEL * channels;
        parse_header(&input[..header_len], &mut self.channels[..channels]);

        for (i, channel) in self.channels[..channels].iter().enumerate() {
            output[i] = channel.history_2;
            output[channels + i] = channel.history_1;
        }

        let nibbles = &input[header_len..available];
        let mut pos = 2 * channels;

        if channels == 1 {
            let channel = &mut self.channels[0];
            'bytes: for &byte in nibbles {
                for code in [byte >> 4, byte] {
                    if pos == needed {
                        break 'bytes;
                    }
                    output[pos] = channel.decode(code);
                    pos += 1;
                }
            }
        } else {
            let [left, right] = &mut self.channels;
            for &byte in nibbles {
                if pos == needed {
                    break;
                }
                output[pos] = left.decode(byte >> 4);
                output[pos + 1] = right.decode(byte);
                pos += 2;
            }
        }

        Ok(needed)
    }
}
