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

//! Core decoding components
//!
//! This module contains the streaming decompression engine:
//! - Decompressor contract (status codes, counters, cache buffer)
//! - Plain PCM converters (8-bit sign, 16/32-bit byte order)
//! - Microsoft ADPCM predictor, block decoder and resumable stream decoder
//! - Stream format configuration
//! - Reader to writer transcoding

pub mod adpcm;
pub mod decompress;
pub mod error;
pub mod format;
pub mod plain;
pub mod transcode;

// Re-export commonly used types
pub use adpcm::MsAdpcmDecoder;
pub use decompress::{Decompress, Decompressor, Progress, SampleType, Status};
pub use error::{Result, StreamError};
pub use format::{ByteOrder, Encoding, StreamFormat};
pub use plain::{Endian16, Endian32, Signed8, Unsigned8};
pub use transcode::{transcode, TranscodeStats};
