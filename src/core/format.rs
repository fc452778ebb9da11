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

//! Stream format description
//!
//! The container parser (a WAV `fmt ` chunk reader, an AIFF `COMM` reader, ...)
//! lives outside this crate. What it hands over is captured in [`StreamFormat`]:
//! the encoding of the payload plus the Microsoft ADPCM block framing.
//!
//! # Config File
//!
//! Formats can also be read from a TOML file:
//!
//! ```text
//! encoding = "ms_adpcm"
//! channels = 2
//! block_size = 2048
//! samples_per_block = 2036
//! ```
//!
//! # Example
//!
//! ```
//! use streamdec::core::format::{Encoding, StreamFormat};
//!
//! let format = StreamFormat::from_toml_str("encoding = \"pcm16_be\"\nchannels = 2").unwrap();
//! assert_eq!(format.encoding, Encoding::Pcm16Be);
//! assert_eq!(format.channels, 2);
//! ```

use super::adpcm::{nibble_bytes, HEADER_BYTES_PER_CHANNEL};
use super::error::{Result, StreamError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Byte order of multi-byte samples in a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the host running this code
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Check if this order matches the host
    #[inline(always)]
    pub fn is_native(self) -> bool {
        self == Self::native()
    }
}

/// Payload encoding of an incoming stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Unsigned 8 bit PCM
    Unsigned8,
    /// Signed 8 bit PCM
    Signed8,
    /// 16 bit little endian PCM
    Pcm16Le,
    /// 16 bit big endian PCM
    Pcm16Be,
    /// 32 bit little endian PCM
    Pcm32Le,
    /// 32 bit big endian PCM
    Pcm32Be,
    /// Microsoft ADPCM (WAV format tag 0x0002)
    MsAdpcm,
}

impl Encoding {
    /// Parse the snake_case name used in config files and on the command line
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnsupportedEncoding`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "unsigned8" | "u8" => Ok(Encoding::Unsigned8),
            "signed8" | "s8" => Ok(Encoding::Signed8),
            "pcm16_le" | "s16le" => Ok(Encoding::Pcm16Le),
            "pcm16_be" | "s16be" => Ok(Encoding::Pcm16Be),
            "pcm32_le" | "s32le" => Ok(Encoding::Pcm32Le),
            "pcm32_be" | "s32be" => Ok(Encoding::Pcm32Be),
            "ms_adpcm" | "adpcm" => Ok(Encoding::MsAdpcm),
            other => Err(StreamError::UnsupportedEncoding(other.to_string())),
        }
    }

    /// Byte order of the encoded values, if the encoding has one
    pub fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Encoding::Pcm16Le | Encoding::Pcm32Le | Encoding::MsAdpcm => Some(ByteOrder::Little),
            Encoding::Pcm16Be | Encoding::Pcm32Be => Some(ByteOrder::Big),
            Encoding::Unsigned8 | Encoding::Signed8 => None,
        }
    }
}

/// Everything a decompressor needs to know about a stream
///
/// Set once per stream and immutable for its duration. The block framing
/// fields are only consulted for [`Encoding::MsAdpcm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    /// Payload encoding
    pub encoding: Encoding,

    /// Number of interleaved channels
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Size in bytes of one ADPCM block (WAV `nBlockAlign`)
    #[serde(default)]
    pub block_size: usize,

    /// Samples per channel in one ADPCM block, header samples included
    #[serde(default)]
    pub samples_per_block: usize,
}

fn default_channels() -> u16 {
    1
}

impl StreamFormat {
    /// Create a format for an encoding without block framing
    pub fn plain(encoding: Encoding, channels: u16) -> Self {
        Self {
            encoding,
            channels,
            block_size: 0,
            samples_per_block: 0,
        }
    }

    /// Create a Microsoft ADPCM format from the block size alone
    ///
    /// Samples per block are derived the way WAV writers derive them:
    /// every byte after the per-channel 6 byte preamble carries two nibbles.
    ///
    /// # Example
    ///
    /// ```
    /// use streamdec::core::format::StreamFormat;
    ///
    /// let format = StreamFormat::ms_adpcm(1, 256);
    /// assert_eq!(format.samples_per_block, 500);
    /// ```
    pub fn ms_adpcm(channels: u16, block_size: usize) -> Self {
        let ch = channels.max(1) as usize;
        let samples_per_block = block_size.saturating_sub(6 * ch) * 2 / ch;
        Self {
            encoding: Encoding::MsAdpcm,
            channels,
            block_size,
            samples_per_block,
        }
    }

    /// Parse a format from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Config`] if the text is not a valid format table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| StreamError::Config(e.to_string()))
    }

    /// Load a format from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML is malformed or names an unknown encoding
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize the format back to TOML
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| StreamError::Config(e.to_string()))
    }

    /// Bytes of ADPCM input that one block actually decodes from
    ///
    /// Header plus nibble bytes; anything between this and `block_size` is padding.
    pub fn adpcm_payload_bytes(&self) -> usize {
        let ch = self.channels as usize;
        HEADER_BYTES_PER_CHANNEL * ch + nibble_bytes(self.samples_per_block, ch)
    }

    /// Validate the ADPCM block framing
    ///
    /// Plain encodings have no framing and always pass.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Channel count is not 1 or 2
    /// - Samples per block is below the two header samples
    /// - The block is too small to hold its header and nibbles
    pub fn validate(&self) -> Result<()> {
        if self.encoding != Encoding::MsAdpcm {
            return Ok(());
        }

        if !(1..=2).contains(&self.channels) {
            return Err(StreamError::InvalidChannelCount {
                channels: self.channels,
            });
        }

        if self.samples_per_block < 2 {
            return Err(StreamError::InvalidSamplesPerBlock {
                samples_per_block: self.samples_per_block,
            });
        }

        let minimum = self.adpcm_payload_bytes();
        if self.block_size < minimum {
            return Err(StreamError::InvalidBlockSize {
                block_size: self.block_size,
                minimum,
            });
        }

        Ok(())
    }
}
