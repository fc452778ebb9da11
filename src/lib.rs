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

//! Incremental streaming audio decompression
//!
//! This library decodes compressed or foreign-layout audio into host-native
//! PCM one call at a time. Callers hand over whatever input and output space
//! they have; the decoders remember where they stopped, so the decoded
//! output never depends on how the stream was split into calls.
//!
//! Supported encodings are unsigned/signed 8-bit PCM, 16/32-bit PCM in
//! either byte order, and Microsoft ADPCM (mono and stereo).
//!
//! # Example
//!
//! ```
//! use streamdec::core::decompress::{Decompress, Decompressor};
//! use streamdec::core::format::StreamFormat;
//!
//! let mut decoder = Decompressor::new(&StreamFormat::ms_adpcm(1, 8)).unwrap();
//! let block = [0, 16, 0, 100, 0, 50, 0, 0x00];
//!
//! // Feed the block in two pieces
//! let mut pcm = [0u8; 8];
//! let first = decoder.process(&mut pcm, &block[..5]);
//! let second = decoder.process(&mut pcm, &block[first.consumed..]);
//!
//! assert_eq!(first.produced, 0);
//! assert_eq!(second.produced, 8);
//! ```

pub mod core;
