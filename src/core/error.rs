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

/// Stream decoder error types
///
/// These cover setup and I/O only. The streaming `process` call never
/// fails; it reports progress through [`Status`](crate::core::decompress::Status).
use thiserror::Error;

/// Result type for decoder setup and file operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Main error type for the decoder
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Invalid channel count: {channels} (Microsoft ADPCM supports 1 or 2)")]
    InvalidChannelCount { channels: u16 },

    #[error("Invalid block size: {block_size} bytes (at least {minimum} required)")]
    InvalidBlockSize { block_size: usize, minimum: usize },

    #[error("Invalid samples per block: {samples_per_block} (at least 2 required)")]
    InvalidSamplesPerBlock { samples_per_block: usize },

    #[error("Output buffer too small: {got} samples (expected {needed})")]
    OutputTooSmall { needed: usize, got: usize },

    #[error("Invalid buffer size for {name}: must be greater than zero")]
    InvalidBufferSize { name: &'static str },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
