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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use streamdec::core::adpcm::{AdpcmChannel, MsAdpcmDecoder};
use streamdec::core::decompress::{Decompress, Decompressor};
use streamdec::core::format::{ByteOrder, Encoding, StreamFormat};

/// Deterministic pseudo-random bytes
fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x1234_5678u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn predictor_benchmark(c: &mut Criterion) {
    c.bench_function("adpcm_predictor", |b| {
        let mut channel = AdpcmChannel::from_header(5, 256, 1000, -1000);
        b.iter(|| {
            for code in 0..16u8 {
                black_box(channel.decode(black_box(code)));
            }
        });
    });
}

fn adpcm_stream_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("adpcm_stream");
    let data = noise(2048 * 64);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for channels in [1u16, 2] {
        let format = StreamFormat::ms_adpcm(channels, 2048);
        let mut output = vec![0u8; data.len() * 4];

        group.bench_with_input(BenchmarkId::new("whole", channels), &channels, |b, _| {
            let mut decoder = MsAdpcmDecoder::new(&format).unwrap();
            b.iter(|| {
                decoder.reset();
                black_box(decoder.process(&mut output, black_box(&data)));
            });
        });
    }

    // Small output buffers push every sample pair through the cache
    let format = StreamFormat::ms_adpcm(2, 2048);
    group.bench_function("chunked_3_byte_output", |b| {
        let mut decoder = MsAdpcmDecoder::new(&format).unwrap();
        let mut output = [0u8; 3];
        b.iter(|| {
            decoder.reset();
            let mut pos = 0;
            loop {
                let progress = decoder.process(&mut output, &data[pos..]);
                pos += progress.consumed;
                if progress.produced == 0 {
                    break;
                }
            }
            black_box(pos);
        });
    });

    group.finish();
}

fn adpcm_block_benchmark(c: &mut Criterion) {
    let format = StreamFormat::ms_adpcm(2, 2048);
    let block = noise(format.block_size);
    let mut samples = vec![0i16; format.samples_per_block * 2];

    c.bench_function("adpcm_decode_block", |b| {
        let mut decoder = MsAdpcmDecoder::new(&format).unwrap();
        b.iter(|| {
            black_box(decoder.decode_block(&mut samples, black_box(&block)).unwrap());
        });
    });
}

fn endian_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("endian");
    let data = noise(1 << 16);
    group.throughput(Throughput::Bytes(data.len() as u64));

    let foreign = |little, big| match ByteOrder::native() {
        ByteOrder::Little => big,
        ByteOrder::Big => little,
    };

    for (name, encoding) in [
        ("swap16", foreign(Encoding::Pcm16Le, Encoding::Pcm16Be)),
        ("swap32", foreign(Encoding::Pcm32Le, Encoding::Pcm32Be)),
        ("signed8", Encoding::Signed8),
    ] {
        let mut decoder = Decompressor::new(&StreamFormat::plain(encoding, 2)).unwrap();
        let mut output = vec![0u8; data.len()];

        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(decoder.process(&mut output, black_box(&data)));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    predictor_benchmark,
    adpcm_stream_benchmark,
    adpcm_block_benchmark,
    endian_benchmark
);
criterion_main!(benches);
