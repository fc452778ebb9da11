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

//! Custom assertions for decoded PCM

/// Assert two PCM byte buffers match, reporting the first difference
#[allow(dead_code)]
pub fn assert_pcm_eq(actual: &[u8], expected: &[u8]) {
    if let Some(index) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "PCM mismatch at byte {}: expected 0x{:02X}, got 0x{:02X}",
            index, expected[index], actual[index]
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "PCM length mismatch: expected {} bytes, got {}",
        expected.len(),
        actual.len()
    );
}

/// Reinterpret native-endian bytes as 16 bit samples
#[allow(dead_code)]
pub fn samples_i16(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|c| i16::from_ne_bytes([c[0], c[1]]))
        .collect()
}
