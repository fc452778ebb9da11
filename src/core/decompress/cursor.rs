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

//! Bounds-checked buffer walkers
//!
//! Every codec walks the caller's buffers through these two cursors. The
//! final positions are the consumed/produced byte counts of a call.

/// Read position over a caller-supplied input slice
#[derive(Debug)]
pub struct InputCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> InputCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes consumed so far
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Consume up to `count` bytes and return them
    ///
    /// Returns fewer bytes than asked for when the input runs out.
    #[inline(always)]
    pub fn take(&mut self, count: usize) -> &'a [u8] {
        let count = count.min(self.remaining());
        let data: &'a [u8] = self.data;
        let chunk = &data[self.pos..self.pos + count];
        self.pos += count;
        chunk
    }

    /// Consume one byte
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Discard up to `count` bytes, returning how many were skipped
    pub fn skip(&mut self, count: usize) -> usize {
        self.take(count).len()
    }
}

/// Write position over a caller-supplied output slice
#[derive(Debug)]
pub struct OutputCursor<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> OutputCursor<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Room left in the output
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes produced so far
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Reserve the next `count` bytes for direct writing
    ///
    /// Returns fewer bytes than asked for when the output runs out.
    #[inline(always)]
    pub fn claim(&mut self, count: usize) -> &mut [u8] {
        let count = count.min(self.remaining());
        let start = self.pos;
        self.pos += count;
        &mut self.data[start..start + count]
    }

    /// Copy as much of `bytes` as fits, returning the number written
    #[inline(always)]
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let dest = self.claim(bytes.len());
        let count = dest.len();
        dest.copy_from_slice(&bytes[..count]);
        count
    }
}
