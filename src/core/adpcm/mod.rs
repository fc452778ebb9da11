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

//! Microsoft ADPCM (Adaptive Differential Pulse Code Modulation) decoder
//!
//! Microsoft ADPCM stores 16-bit PCM as 4 bits per sample. Audio is split
//! into fixed-size blocks; each block opens with a header per channel that
//! selects a predictor and seeds it with two literal samples.
//!
//! # Block Header Format
//!
//! All multi-byte fields are little endian. Fields are grouped by kind,
//! one entry per channel (left first for stereo):
//!
//! ```text
//! Mono (7 bytes):    [index][scale:2][sample1:2][sample2:2]
//! Stereo (14 bytes): [index L][index R][scale L:2][scale R:2]
//!                    [sample1 L:2][sample1 R:2][sample2 L:2][sample2 R:2]
//! ```
//!
//! `sample1` is the most recent sample (`history_1`, the `coef1` tap) and
//! `sample2` the one before it (`history_2`, the `coef2` tap). The block's
//! first output samples are the header samples, oldest first.
//!
//! # Nibbles
//!
//! After the header every byte holds two 4-bit codes, high nibble first.
//! Stereo bytes carry the left code in the high nibble and the right code
//! in the low nibble.

mod block;
mod stream;

#[cfg(test)]
mod tests;

pub use stream::{DecodeState, MsAdpcmDecoder};

/// Header bytes each channel contributes to a block
pub const HEADER_BYTES_PER_CHANNEL: usize = 7;

/// Lower bound of the adaptive scale
pub const MIN_SCALE: i32 = 16;

/// Upper bound of the adaptive scale, keeps `ADAPTATION_TABLE[d] * scale` in range
pub const MAX_SCALE: i32 = i32::MAX / 768;

/// Scale multipliers indexed by 4-bit code (8.8 fixed point)
pub const ADAPTATION_TABLE: [i32; 16] = [
    230, 230, 230, 230, 307, 409, 512, 614, 768, 614, 512, 409, 307, 230, 230, 230,
];

/// Signed delta indexed by 4-bit code
pub const DELTA_TABLE: [i32; 16] = [0, 1, 2, 3, 4, 5, 6, 7, -8, -7, -6, -5, -4, -3, -2, -1];

/// Predictor coefficient presets (8.8 fixed point)
pub const COEF1_TABLE: [i32; 7] = [256, 512, 0, 192, 240, 460, 392];
pub const COEF2_TABLE: [i32; 7] = [0, -256, 0, 64, 0, -208, -232];

/// Nibble bytes one block needs for `samples_per_block` samples per channel
///
/// The first two samples of every channel come from the header.
pub fn nibble_bytes(samples_per_block: usize, channels: usize) -> usize {
    let nibbles = samples_per_block.saturating_sub(2) * channels;
    nibbles.div_ceil(2)
}

/// Per-channel predictor state
///
/// Reloaded from every block header; the nibbles of the block then evolve it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdpcmChannel {
    /// Weight of `history_1`
    pub coef1: i32,

    /// Weight of `history_2`
    pub coef2: i32,

    /// Adaptive step size
    pub scale: i32,

    /// Most recent decoded sample
    pub history_1: i16,

    /// Sample decoded before `history_1`
    pub history_2: i16,
}

impl AdpcmChannel {
    /// Create a channel from a block header's fields
    ///
    /// # Arguments
    ///
    /// * `index` - Coefficient preset (values past the table use the last preset)
    /// * `scale` - Initial step size
    /// * `history_1` - Most recent sample
    /// * `history_2` - Sample before that
    pub fn from_header(index: u8, scale: i16, history_1: i16, history_2: i16) -> Self {
        let (coef1, coef2) = coefficients(index);
        Self {
            coef1,
            coef2,
            scale: scale as i32,
            history_1,
            history_2,
        }
    }

    /// Decode one 4-bit code into a 16-bit sample
    ///
    /// Only the low 4 bits of `code` are used.
    ///
    /// # Example
    ///
    /// ```
    /// use streamdec::core::adpcm::AdpcmChannel;
    ///
    /// let mut channel = AdpcmChannel::from_header(0, 16, 0, 0);
    /// assert_eq!(channel.decode(8), -128);
    /// assert_eq!(channel.scale, 48);
    /// ```
    #[inline(always)]
    pub fn decode(&mut self, code: u8) -> i16 {
        let code = (code & 0x0F) as usize;
        let scale = self.scale;

        let new_scale = ((ADAPTATION_TABLE[code] * scale) >> 8).clamp(MIN_SCALE, MAX_SCALE);

        // Delta uses the step size from before this update
        let delta = DELTA_TABLE[code] * scale;
        let predicted =
            (self.history_1 as i32 * self.coef1 + self.history_2 as i32 * self.coef2) >> 8;

        let sample = (delta + predicted).clamp(i16::MIN as i32, i16::MAX as i32) as i16;

        self.history_2 = self.history_1;
        self.history_1 = sample;
        self.scale = new_scale;

        sample
    }
}

/// Look up a coefficient preset, clamping out of range indices
///
/// Streams in the wild occasionally carry indices past the standard table;
/// they decode with the last preset instead of being rejected.
pub fn coefficients(index: u8) -> (i32, i32) {
    let mut slot = index as usize;
    if slot >= COEF1_TABLE.len() {
        log::warn!("ADPCM coefficient index {} out of range, using 6", index);
        slot = COEF1_TABLE.len() - 1;
    }
    (COEF1_TABLE[slot], COEF2_TABLE[slot])
}

/// Load every channel's predictor from a block header
///
/// `header` must hold `7 * channels.len()` bytes.
pub fn parse_header(header: &[u8], channels: &mut [AdpcmChannel]) {
    let n = channels.len();
    let field = |offset: usize| i16::from_le_bytes([header[offset], header[offset + 1]]);

    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = AdpcmChannel::from_header(
            header[i],
            field(n + 2 * i),
            field(3 * n + 2 * i),
            field(5 * n + 2 * i),
        );

        log::trace!(
            "ADPCM header ch{}: coef=({}, {}) scale={}",
            i,
            channel.coef1,
            channel.coef2,
            channel.scale
        );
    }
}

/// Native-endian bytes of the two lead samples each channel's header carries
///
/// Oldest first, interleaved across channels.
///
/// # Returns
///
/// The byte buffer and the number of bytes used (4 mono, 8 stereo)
pub fn lead_samples(channels: &[AdpcmChannel]) -> ([u8; 8], usize) {
    let mut bytes = [0u8; 8];
    let n = channels.len();

    for (i, channel) in channels.iter().enumerate() {
        let older = 2 * i;
        let newer = 2 * (n + i);
        bytes[older..older + 2].copy_from_slice(&channel.history_2.to_ne_bytes());
        bytes[newer..newer + 2].copy_from_slice(&channel.history_1.to_ne_bytes());
    }

    (bytes, 4 * n)
}
