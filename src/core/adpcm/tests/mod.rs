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

//! ADPCM decoder tests
//!
//! Tests are organized into the following modules:
//! - `predictor`: Per-nibble predictor arithmetic, scale floor and clamping
//! - `block`: Whole-block decoding, header layout and short final blocks
//! - `stream`: Resumable state machine across arbitrary call boundaries

mod predictor;

use crate::core::format::StreamFormat;

/// Build a mono block: header fields followed by nibble bytes
pub(super) fn mono_block(index: u8, scale: i16, sample1: i16, sample2: i16, nibbles: &[u8]) -> Vec<u8> {
    let mut block = vec![index];
    block.extend_from_slice(&scale.to_le_bytes());
    block.extend_from_slice(&sample1.to_le_bytes());
    block.extend_from_slice(&sample2.to_le_bytes());
    block.extend_from_slice(nibbles);
    block
}

/// Build a stereo block from `(index, scale, sample1, sample2)` per channel
pub(super) fn stereo_block(
    left: (u8, i16, i16, i16),
    right: (u8, i16, i16, i16),
    nibbles: &[u8],
) -> Vec<u8> {
    let mut block = vec![left.0, right.0];
    block.extend_from_slice(&left.1.to_le_bytes());
    block.extend_from_slice(&right.1.to_le_bytes());
    block.extend_from_slice(&left.2.to_le_bytes());
    block.extend_from_slice(&right.2.to_le_bytes());
    block.extend_from_slice(&left.3.to_le_bytes());
    block.extend_from_slice(&right.3.to_le_bytes());
    block.extend_from_slice(nibbles);
    block
}

/// Explicit framing for tests that need odd sample counts or padding
pub(super) fn framing(channels: u16, block_size: usize, samples_per_block: usize) -> StreamFormat {
    StreamFormat {
        samples_per_block,
        block_size,
        ..StreamFormat::ms_adpcm(channels, block_size)
    }
}

/// Reinterpret native-endian output bytes as samples
pub(super) fn to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|c| i16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

/// Deterministic pseudo-random bytes (xorshift)
pub(super) fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}
