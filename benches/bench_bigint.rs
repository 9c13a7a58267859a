use bigdec::BigInt;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::str::FromStr;

const A: &str = "123456789012345678901234567890123456789012345678901234567890";
const B: &str = "987654321098765432109876543210";

// ============================================================================
// Arithmetic
// ============================================================================

fn bench_addition(c: &mut Criterion) {
    c.bench_function("bigint_addition", |b| {
        let x = BigInt::from_str(A).unwrap();
        let y = BigInt::from_str(B).unwrap();
        b.iter(|| black_box(black_box(&x) + black_box(&y)));
    });
}

fn bench_multiplication(c: &mut Criterion) {
    c.bench_function("bigint_multiplication", |b| {
        let x = BigInt::from_str(A).unwrap();
        let y = BigInt::from_str(B).unwrap();
        b.iter(|| black_box(black_box(&x) * black_box(&y)));
    });
}

fn bench_division(c: &mut Criterion) {
    c.bench_function("bigint_div_rem", |b| {
        let x = BigInt::from_str(A).unwrap();
        let y = BigInt::from_str(B).unwrap();
        b.iter(|| black_box(black_box(&x).div_rem(black_box(&y)).unwrap()));
    });
}

fn bench_pow(c: &mut Criterion) {
    c.bench_function("bigint_pow_3_200", |b| {
        let x = BigInt::from(3);
        b.iter(|| black_box(black_box(&x).pow(200)));
    });
}

// ============================================================================
// Number Theory
// ============================================================================

fn bench_gcd(c: &mut Criterion) {
    c.bench_function("bigint_gcd", |b| {
        let x = BigInt::from_str(A).unwrap();
        let y = BigInt::from_str(B).unwrap();
        b.iter(|| black_box(black_box(&x).gcd(black_box(&y))));
    });
}

fn bench_mod_pow(c: &mut Criterion) {
    c.bench_function("bigint_mod_pow", |b| {
        let base = BigInt::from_str(B).unwrap();
        let exponent = BigInt::from_str(A).unwrap();
        let modulus = BigInt::from_str("170141183460469231731687303715884105727").unwrap();
        b.iter(|| black_box(base.mod_pow(black_box(&exponent), &modulus).unwrap()));
    });
}

fn bench_is_probable_prime(c: &mut Criterion) {
    c.bench_function("bigint_is_probable_prime_m127", |b| {
        let p = BigInt::from_str("170141183460469231731687303715884105727").unwrap();
        b.iter(|| black_box(black_box(&p).is_probable_prime(50)));
    });
}

fn bench_probable_prime(c: &mut Criterion) {
    c.bench_function("bigint_probable_prime_128_bits", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| black_box(BigInt::probable_prime(128, &mut rng).unwrap()));
    });
}

// ============================================================================
// Conversions
// ============================================================================

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("bigint_parsing", |b| {
        b.iter(|| black_box(BigInt::from_str(black_box(A)).unwrap()));
    });
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("bigint_formatting", |b| {
        let x = BigInt::from_str(A).unwrap();
        b.iter(|| black_box(x.to_string()));
    });
}

fn bench_hex_formatting(c: &mut Criterion) {
    c.bench_function("bigint_formatting_radix_16", |b| {
        let x = BigInt::from_str(A).unwrap();
        b.iter(|| black_box(x.to_string_radix(16)));
    });
}

fn bench_byte_array(c: &mut Criterion) {
    c.bench_function("bigint_byte_array_roundtrip", |b| {
        let x = -BigInt::from_str(A).unwrap();
        b.iter(|| black_box(BigInt::from_byte_array(&black_box(&x).to_byte_array()).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_addition,
    bench_multiplication,
    bench_division,
    bench_pow,
    bench_gcd,
    bench_mod_pow,
    bench_is_probable_prime,
    bench_probable_prime,
    bench_parsing,
    bench_formatting,
    bench_hex_formatting,
    bench_byte_array,
);

criterion_main!(benches);
