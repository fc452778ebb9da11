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

//! Cache buffer
//!
//! A small fixed holding area for bytes that straddle a call boundary.
//! It is used in one of two directions at a time:
//!
//! - **Filling**: collecting input bytes until `target` bytes are present
//!   (a partial sample, a partial ADPCM header).
//! - **Draining**: handing already-decoded bytes to the output when the
//!   caller's buffer is smaller than one value.

use super::cursor::{InputCursor, OutputCursor};

/// Largest cache any codec needs (stereo ADPCM header)
pub const CACHE_CAPACITY: usize = 14;

/// Fixed-capacity byte holding area
#[derive(Debug, Clone)]
pub struct CacheBuffer {
    /// Cached bytes
    bytes: [u8; CACHE_CAPACITY],

    /// Number of valid bytes
    fill: usize,

    /// Number of bytes the current use needs
    target: usize,

    /// Next byte to drain
    drained: usize,
}

impl Default for CacheBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; CACHE_CAPACITY],
            fill: 0,
            target: 0,
            drained: 0,
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.fill = 0;
        self.target = 0;
        self.drained = 0;
    }

    /// Bytes currently held
    #[inline(always)]
    pub fn fill_count(&self) -> usize {
        self.fill
    }

    /// Bytes the current use needs
    #[inline(always)]
    pub fn target_size(&self) -> usize {
        self.target
    }

    /// Bytes still waiting to be drained
    #[inline(always)]
    pub fn pending(&self) -> usize {
        self.fill - self.drained
    }

    /// Start collecting `target` input bytes
    pub fn begin_fill(&mut self, target: usize) {
        debug_assert!(target <= CACHE_CAPACITY);
        self.fill = 0;
        self.target = target.min(CACHE_CAPACITY);
        self.drained = 0;
    }

    /// Pull bytes from the input toward the target
    ///
    /// # Returns
    ///
    /// true once the target is satisfied
    pub fn fill_from(&mut self, input: &mut InputCursor<'_>) -> bool {
        let chunk = input.take(self.target - self.fill);
        self.bytes[self.fill..self.fill + chunk.len()].copy_from_slice(chunk);
        self.fill += chunk.len();
        self.is_full()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.fill == self.target
    }

    /// The filled bytes
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.fill]
    }

    /// The filled bytes, for in-place conversion
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.fill]
    }

    /// Load decoded bytes to be drained to the output
    pub fn load(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= CACHE_CAPACITY);
        let count = bytes.len().min(CACHE_CAPACITY);
        self.bytes[..count].copy_from_slice(&bytes[..count]);
        self.fill = count;
        self.target = count;
        self.drained = 0;
    }

    /// Switch a filled cache over to draining
    pub fn begin_drain(&mut self) {
        self.drained = 0;
    }

    /// Copy as many pending bytes as fit into the output
    ///
    /// # Returns
    ///
    /// true once every byte has been drained
    pub fn drain_into(&mut self, output: &mut OutputCursor<'_>) -> bool {
        let written = output.write(&self.bytes[self.drained..self.fill]);
        self.drained += written;
        self.pending() == 0
    }
}
