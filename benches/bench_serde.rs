use bigdec::{BigInt, ContextDecimal, Precision, ScaledDecimal};
use criterion::{Criterion, criterion_group, criterion_main};
use serde::{Deserialize, Serialize};
use std::{hint::black_box, str::FromStr};

const WIDE: &str = "-123456789012345678901234567890.0987654321";

// ============================================================================
// JSON Serialization/Deserialization
// ============================================================================

fn bench_bigint_json(c: &mut Criterion) {
    c.bench_function("bigint_roundtrip_json", |b| {
        let x = BigInt::from_str("-123456789012345678901234567890").unwrap();
        b.iter(|| {
            let json = serde_json::to_string(black_box(&x)).unwrap();
            black_box(serde_json::from_str::<BigInt>(&json).unwrap())
        });
    });
}

fn bench_context_serialize_json(c: &mut Criterion) {
    c.bench_function("context_serialize_json", |b| {
        let d = ContextDecimal::from_str(WIDE).unwrap();
        b.iter(|| black_box(serde_json::to_string(black_box(&d)).unwrap()));
    });
}

fn bench_context_deserialize_json(c: &mut Criterion) {
    c.bench_function("context_deserialize_json", |b| {
        let json = format!("\"{WIDE}\"");
        b.iter(|| black_box(serde_json::from_str::<ContextDecimal>(black_box(&json)).unwrap()));
    });
}

fn bench_scaled_roundtrip_json(c: &mut Criterion) {
    c.bench_function("scaled_roundtrip_json", |b| {
        let d = ScaledDecimal::from_str(WIDE).unwrap();
        b.iter(|| {
            let json = serde_json::to_string(black_box(&d)).unwrap();
            black_box(serde_json::from_str::<ScaledDecimal>(&json).unwrap())
        });
    });
}

// ============================================================================
// Struct Serialization (Realistic Use Case)
// ============================================================================

#[derive(Serialize, Deserialize)]
struct Ledger {
    balance: ContextDecimal,
    rate: ContextDecimal,
    context: Precision,
}

fn ledger() -> Ledger {
    Ledger {
        balance: ContextDecimal::from_str("1000000.00").unwrap(),
        rate: ContextDecimal::from_str("0.0425").unwrap(),
        context: Precision::DECIMAL64,
    }
}

fn bench_struct_serialize_json(c: &mut Criterion) {
    c.bench_function("ledger_serialize_json", |b| {
        let ledger = ledger();
        b.iter(|| black_box(serde_json::to_string(black_box(&ledger)).unwrap()));
    });
}

fn bench_struct_deserialize_json(c: &mut Criterion) {
    c.bench_function("ledger_deserialize_json", |b| {
        let json = serde_json::to_string(&ledger()).unwrap();
        b.iter(|| black_box(serde_json::from_str::<Ledger>(black_box(&json)).unwrap()));
    });
}

// ============================================================================
// Binary Serialization (Bincode)
// ============================================================================

fn bench_context_serialize_bincode(c: &mut Criterion) {
    c.bench_function("context_serialize_bincode", |b| {
        let d = ContextDecimal::from_str(WIDE).unwrap();
        b.iter(|| black_box(bincode::serialize(black_box(&d)).unwrap()));
    });
}

fn bench_context_deserialize_bincode(c: &mut Criterion) {
    c.bench_function("context_deserialize_bincode", |b| {
        let bytes = bincode::serialize(&ContextDecimal::from_str(WIDE).unwrap()).unwrap();
        b.iter(|| black_box(bincode::deserialize::<ContextDecimal>(black_box(&bytes)).unwrap()));
    });
}

fn bench_struct_roundtrip_bincode(c: &mut Criterion) {
    c.bench_function("ledger_roundtrip_bincode", |b| {
        let ledger = ledger();
        b.iter(|| {
            let bytes = bincode::serialize(black_box(&ledger)).unwrap();
            black_box(bincode::deserialize::<Ledger>(&bytes).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_bigint_json,
    bench_context_serialize_json,
    bench_context_deserialize_json,
    bench_scaled_roundtrip_json,
    bench_struct_serialize_json,
    bench_struct_deserialize_json,
    bench_context_serialize_bincode,
    bench_context_deserialize_bincode,
    bench_struct_roundtrip_bincode,
);

criterion_main!(benches);
