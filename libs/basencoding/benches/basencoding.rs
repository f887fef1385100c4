#![allow(unused_crate_dependencies)]
use std::hint::black_box;

use basencoding::{BaseSpec, TextEncoding, decode, encode};
use criterion::{Criterion, criterion_group, criterion_main};

const GENERAL: BaseSpec = BaseSpec::Char(b'z');
const POW2: BaseSpec = BaseSpec::Char(b'w');

fn bench_encode(c: &mut Criterion) {
    fn bench(c: &mut Criterion, name: &str, spec: BaseSpec, data: &[u8]) {
        c.bench_function(name, |b| {
            b.iter(|| encode(black_box(data), spec).expect("spec is valid"))
        });
    }

    bench(c, "encode_general_small", GENERAL, &create_data::<16>());
    bench(c, "encode_general_large", GENERAL, &create_data::<4000>());
    bench(c, "encode_pow2_small", POW2, &create_data::<16>());
    bench(c, "encode_pow2_large", POW2, &create_data::<4000>());
}

fn bench_decode(c: &mut Criterion) {
    fn bench(c: &mut Criterion, name: &str, spec: BaseSpec, data: &[u8]) {
        let text = encode(data, spec).expect("spec is valid");

        c.bench_function(name, |b| {
            b.iter(|| decode(black_box(&text), spec, TextEncoding::Utf8).expect("data is valid"))
        });
    }

    bench(c, "decode_general_small", GENERAL, &create_data::<16>());
    bench(c, "decode_general_large", GENERAL, &create_data::<4000>());
    bench(c, "decode_pow2_small", POW2, &create_data::<16>());
    bench(c, "decode_pow2_large", POW2, &create_data::<4000>());
}

fn bench_infer(c: &mut Criterion) {
    let text = encode(b"the quick brown fox jumps over the lazy dog", GENERAL).expect("spec is valid");

    c.bench_function("decode_infer", |b| {
        b.iter(|| decode(black_box(&text), BaseSpec::Absent, TextEncoding::Utf8))
    });
}

fn create_data<const LEN: usize>() -> [u8; LEN] {
    let mut buf = [0u8; LEN];

    #[expect(clippy::cast_possible_truncation)]
    for (index, b) in buf.iter_mut().enumerate() {
        // never zero, so the leading byte survives
        *b = u8::MAX - (index % 255) as u8;
    }

    buf
}

criterion_group!(codec, bench_encode, bench_decode, bench_infer);
criterion_main!(codec);
