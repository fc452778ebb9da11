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

//! Test fixtures for common decoding scenarios

use streamdec::core::decompress::Decompress;
use streamdec::core::format::{ByteOrder, Encoding};

/// Output buffer used once the scripted chunk sizes are exhausted
const DRAIN_CHUNK: usize = 64;

/// Upper bound on scripted calls before switching to draining
const MAX_SCRIPTED_CALLS: usize = 100_000;

/// Deterministic pseudo-random bytes (xorshift)
#[allow(dead_code)]
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
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

/// 16 bit encoding whose byte order differs from the host
#[allow(dead_code)]
pub fn foreign_pcm16() -> Encoding {
    match ByteOrder::native() {
        ByteOrder::Little => Encoding::Pcm16Be,
        ByteOrder::Big => Encoding::Pcm16Le,
    }
}

/// 32 bit encoding whose byte order differs from the host
#[allow(dead_code)]
pub fn foreign_pcm32() -> Encoding {
    match ByteOrder::native() {
        ByteOrder::Little => Encoding::Pcm32Be,
        ByteOrder::Big => Encoding::Pcm32Le,
    }
}

/// Decode `input` with one call and an output buffer big enough for anything
#[allow(dead_code)]
pub fn decode_whole<D: Decompress>(decoder: &mut D, input: &[u8]) -> Vec<u8> {
    let mut output = vec![0u8; input.len() * 4 + 64];
    let progress = decoder.process(&mut output, input);
    output.truncate(progress.produced);
    output
}

/// Decode `input` with call sizes taken round-robin from the two scripts
///
/// Zero sizes are allowed. Once the input is used up (or the scripts stall)
/// the decoder is drained with ordinary buffers until it produces nothing.
#[allow(dead_code)]
pub fn decode_scripted<D: Decompress>(
    decoder: &mut D,
    input: &[u8],
    input_sizes: &[usize],
    output_sizes: &[usize],
) -> Vec<u8> {
    assert!(!input_sizes.is_empty() && !output_sizes.is_empty());

    let largest = output_sizes.iter().copied().max().unwrap_or(0);
    let mut buf = vec![0u8; largest.max(DRAIN_CHUNK)];
    let mut out = Vec::new();
    let mut pos = 0;

    for call in 0..MAX_SCRIPTED_CALLS {
        if pos == input.len() {
            break;
        }
        let in_len = input_sizes[call % input_sizes.len()].min(input.len() - pos);
        let out_len = output_sizes[call % output_sizes.len()];

        let progress = decoder.process(&mut buf[..out_len], &input[pos..pos + in_len]);
        assert!(progress.consumed <= in_len);
        assert!(progress.produced <= out_len);

        out.extend_from_slice(&buf[..progress.produced]);
        pos += progress.consumed;
    }

    loop {
        let progress = decoder.process(&mut buf[..DRAIN_CHUNK], &input[pos..]);
        out.extend_from_slice(&buf[..progress.produced]);
        pos += progress.consumed;

        if pos == input.len() && progress.produced == 0 {
            break;
        }
    }

    out
}
