use std::hint::black_box;

use beson::{Int128, UInt128};
use criterion::{criterion_group, criterion_main, Criterion};

const A: u128 = 0xDEAD_BEEF_0123_4567_89AB_CDEF_F00D_CAFE;
const B: u128 = 0x0000_0000_0000_0001_FFFF_FFFF_0000_0003;

fn bench_add_mul(c: &mut Criterion) {
    let (a, b) = (UInt128::from(A), UInt128::from(B));
    c.bench_function("uint128 add", |bn| {
        bn.iter(|| black_box(black_box(a) + black_box(b)))
    });
    c.bench_function("uint128 mul", |bn| {
        bn.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_div(c: &mut Criterion) {
    let (a, b) = (UInt128::from(A), UInt128::from(B));
    c.bench_function("uint128 div_rem", |bn| {
        bn.iter(|| black_box(black_box(a).div_rem(black_box(b)).unwrap()))
    });
    let (x, y) = (Int128::from(-(A as i128 >> 1)), Int128::from(-7i64));
    c.bench_function("int128 checked_div_rem", |bn| {
        bn.iter(|| black_box(black_box(x).checked_div_rem(black_box(y)).unwrap()))
    });
}

fn bench_decimal(c: &mut Criterion) {
    let v = UInt128::MAX;
    let text = v.to_decimal_string();
    c.bench_function("uint128 to_decimal_string", |bn| {
        bn.iter(|| black_box(black_box(v).to_decimal_string()))
    });
    c.bench_function("uint128 from_decimal_str", |bn| {
        bn.iter(|| black_box(UInt128::from_decimal_str(black_box(&text)).unwrap()))
    });
}

criterion_group!(benches, bench_add_mul, bench_div, bench_decimal);
criterion_main!(benches);
