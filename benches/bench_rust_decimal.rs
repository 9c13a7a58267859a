//! Head-to-head timings against `rust_decimal` on the 28-digit range both
//! types can represent.

use bigdec::{ContextDecimal, Precision, RoundingMode};
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use std::hint::black_box;
use std::str::FromStr;

/// Same digit budget as `rust_decimal`'s 96-bit mantissa.
const MC: Precision = Precision::new(28, RoundingMode::HalfEven);

fn bench_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("addition");
    group.bench_function("rust_decimal", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("987.654321").unwrap();
        b.iter(|| black_box(black_box(x) + black_box(y)));
    });
    group.bench_function("bigdec", |b| {
        let x = ContextDecimal::from_str("123.456789").unwrap();
        let y = ContextDecimal::from_str("987.654321").unwrap();
        b.iter(|| black_box(black_box(&x).add_with(black_box(&y), &MC).unwrap()));
    });
    group.finish();
}

fn bench_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiplication");
    group.bench_function("rust_decimal", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) * black_box(y)));
    });
    group.bench_function("bigdec", |b| {
        let x = ContextDecimal::from_str("123.456789").unwrap();
        let y = ContextDecimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(&x).multiply_with(black_box(&y), &MC).unwrap()));
    });
    group.finish();
}

fn bench_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");
    group.bench_function("rust_decimal", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) / black_box(y)));
    });
    group.bench_function("bigdec", |b| {
        let x = ContextDecimal::from_str("123.456789").unwrap();
        let y = ContextDecimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(&x).divide_with(black_box(&y), &MC).unwrap()));
    });
    group.finish();
}

fn bench_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("power_12");
    group.bench_function("rust_decimal", |b| {
        let x = Decimal::from_str("1.0125").unwrap();
        b.iter(|| black_box(black_box(x).powi(12)));
    });
    group.bench_function("bigdec", |b| {
        let x = ContextDecimal::from_str("1.0125").unwrap();
        b.iter(|| black_box(black_box(&x).pow_with(12, &MC).unwrap()));
    });
    group.finish();
}

fn bench_rounding(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_to_2_decimals");
    group.bench_function("rust_decimal", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| {
            black_box(black_box(d).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        });
    });
    group.bench_function("bigdec", |b| {
        let d = ContextDecimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(&d).set_scale(2, RoundingMode::HalfEven).unwrap()));
    });
    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.bench_function("rust_decimal", |b| {
        b.iter(|| black_box(Decimal::from_str(black_box("123.456789")).unwrap()));
    });
    group.bench_function("bigdec", |b| {
        b.iter(|| black_box(ContextDecimal::from_str(black_box("123.456789")).unwrap()));
    });
    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.bench_function("rust_decimal", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(d.to_string()));
    });
    group.bench_function("bigdec", |b| {
        let d = ContextDecimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(d.to_string()));
    });
    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");
    group.bench_function("rust_decimal", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("123.4567900").unwrap();
        b.iter(|| black_box(black_box(x) < black_box(y)));
    });
    group.bench_function("bigdec", |b| {
        let x = ContextDecimal::from_str("123.456789").unwrap();
        let y = ContextDecimal::from_str("123.4567900").unwrap();
        b.iter(|| black_box(black_box(&x).numeric_cmp(black_box(&y)).is_lt()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_addition,
    bench_multiplication,
    bench_division,
    bench_power,
    bench_rounding,
    bench_parsing,
    bench_formatting,
    bench_comparison,
);

criterion_main!(benches);
