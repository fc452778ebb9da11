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

//! Predictor arithmetic tests

use super::super::*;

#[test]
fn test_decode_code_8_from_rest() {
    let mut channel = AdpcmChannel::from_header(0, 16, 0, 0);
    assert_eq!(channel.coef1, 256);
    assert_eq!(channel.coef2, 0);

    let sample = channel.decode(8);
    assert_eq!(sample, -128);
    assert_eq!(channel.scale, 48);
    assert_eq!(channel.history_1, -128);
    assert_eq!(channel.history_2, 0);
}

#[test]
fn test_decode_code_0_holds_scale_floor() {
    let mut channel = AdpcmChannel::from_header(0, 16, 0, 0);

    // (230 * 16) >> 8 = 14, floored to 16
    let sample = channel.decode(0);
    assert_eq!(sample, 0);
    assert_eq!(channel.scale, 16);
}

#[test]
fn test_decode_uses_pre_update_scale() {
    let mut channel = AdpcmChannel::from_header(0, 100, 0, 0);

    // delta[7] = 7, scale before update = 100
    assert_eq!(channel.decode(7), 700);
    // adapt[7] = 614 -> (614 * 100) >> 8 = 239
    assert_eq!(channel.scale, 239);
}

#[test]
fn test_decode_second_order_prediction() {
    // Preset 1: coef1 = 512, coef2 = -256 (linear extrapolation)
    let mut channel = AdpcmChannel::from_header(1, 16, 200, 100);

    // (200 * 512 + 100 * -256) >> 8 = 300
    assert_eq!(channel.decode(0), 300);
    assert_eq!(channel.history_1, 300);
    assert_eq!(channel.history_2, 200);

    // (300 * 512 + 200 * -256) >> 8 = 400
    assert_eq!(channel.decode(0), 400);
}

#[test]
fn test_decode_prediction_shift_applies_to_sum() {
    // Preset 3: coef1 = 192, coef2 = 64
    let mut channel = AdpcmChannel::from_header(3, 16, 1, 1);

    // (1 * 192 + 1 * 64) >> 8 = 1, separate shifts would give 0
    assert_eq!(channel.decode(0), 1);
}

#[test]
fn test_decode_clamps_high() {
    let mut channel = AdpcmChannel::from_header(0, 10000, 32000, 0);
    assert_eq!(channel.decode(7), i16::MAX);
}

#[test]
fn test_decode_clamps_low() {
    let mut channel = AdpcmChannel::from_header(0, 10000, -32000, 0);
    assert_eq!(channel.decode(8), i16::MIN);
}

#[test]
fn test_decode_ignores_high_bits() {
    let mut a = AdpcmChannel::from_header(0, 16, 0, 0);
    let mut b = a;
    assert_eq!(a.decode(0xF8), b.decode(0x08));
    assert_eq!(a, b);
}

#[test]
fn test_scale_ceiling_prevents_overflow() {
    let mut channel = AdpcmChannel::from_header(0, i16::MAX, 0, 0);

    // Code 8 triples the scale every step
    for _ in 0..100 {
        channel.decode(8);
        assert!(channel.scale >= MIN_SCALE);
        assert!(channel.scale <= MAX_SCALE);
    }
    assert_eq!(channel.scale, MAX_SCALE);
}

#[test]
fn test_negative_header_scale_recovers() {
    let mut channel = AdpcmChannel::from_header(0, -50, 0, 0);
    channel.decode(1);
    assert_eq!(channel.scale, MIN_SCALE);
}

#[test]
fn test_coefficients_clamp_index() {
    assert_eq!(coefficients(0), (256, 0));
    assert_eq!(coefficients(5), (460, -208));
    assert_eq!(coefficients(6), (392, -232));
    assert_eq!(coefficients(7), (392, -232));
    assert_eq!(coefficients(255), (392, -232));
}

#[test]
fn test_nibble_bytes() {
    assert_eq!(nibble_bytes(2, 1), 0);
    assert_eq!(nibble_bytes(500, 1), 249);
    assert_eq!(nibble_bytes(5, 1), 2);
    assert_eq!(nibble_bytes(500, 2), 498);
    assert_eq!(nibble_bytes(0, 2), 0);
}

#[test]
fn test_parse_header_mono_layout() {
    let header = [2u8, 0x10, 0x00, 0x34, 0x12, 0xCC, 0xFF];
    let mut channels = [AdpcmChannel::default(); 1];

    parse_header(&header, &mut channels);
    assert_eq!(channels[0].coef1, 0);
    assert_eq!(channels[0].coef2, 0);
    assert_eq!(channels[0].scale, 16);
    assert_eq!(channels[0].history_1, 0x1234);
    assert_eq!(channels[0].history_2, -52);
}

#[test]
fn test_lead_samples_order() {
    let channels = [
        AdpcmChannel::from_header(0, 16, 1, 2),
        AdpcmChannel::from_header(0, 16, 3, 4),
    ];

    let (bytes, len) = lead_samples(&channels);
    assert_eq!(len, 8);
    assert_eq!(super::to_samples(&bytes), vec![2, 4, 1, 3]);

    let (bytes, len) = lead_samples(&channels[..1]);
    assert_eq!(len, 4);
    assert_eq!(super::to_samples(&bytes[..len]), vec![2, 1]);
}
