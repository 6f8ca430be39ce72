//! # Sigchain Signing Benchmarks
//!
//! | Benchmark | Measures |
//! |-----------|----------|
//! | `chained-sign` | Full `sign_transaction` path per algorithm: lease, sign, store |
//! | `chain-replay` | Offline `verify_chain` over histories of increasing length |
//! | `payload` | Payload composition and parsing |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sc_01_device_store::{InMemoryStore, KeyedStore};
use sc_02_signature_chain::{
    compose_payload, parse_payload, verify_chain, ChainConfig, SignatureChainService,
    SignatureDeviceApi,
};
use shared_crypto::{EccCurve, KeyParameters};
use shared_types::SignatureAlgorithm;
use std::sync::Arc;
use std::time::Duration;

fn engine(
    curve: EccCurve,
) -> SignatureChainService<Arc<InMemoryStore<sc_02_signature_chain::SignatureDevice>>> {
    let params = KeyParameters::new(2048, curve).expect("valid key parameters");
    SignatureChainService::new(Arc::new(InMemoryStore::new()), &ChainConfig::new(params))
}

// ============================================================================
// Chained signing through the service
// ============================================================================

fn bench_chained_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained-sign");
    group.measurement_time(Duration::from_secs(10));

    let service = engine(EccCurve::P256);
    for algorithm in [SignatureAlgorithm::Ecc, SignatureAlgorithm::Rsa] {
        let id = service.create_device(algorithm, None).expect("device created");
        group.bench_with_input(
            BenchmarkId::new("sign_transaction", algorithm),
            &id,
            |b, id| b.iter(|| black_box(service.sign_transaction(id, "benchmark payload"))),
        );
    }

    group.finish();
}

// ============================================================================
// Offline replay
// ============================================================================

fn bench_chain_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain-replay");

    for curve in [EccCurve::Secp256k1, EccCurve::P256] {
        let store = Arc::new(InMemoryStore::new());
        let params = KeyParameters::new(2048, curve).expect("valid key parameters");
        let service = SignatureChainService::new(Arc::clone(&store), &ChainConfig::new(params));
        let id = service
            .create_device(SignatureAlgorithm::Ecc, None)
            .expect("device created");

        let records: Vec<_> = (0..100)
            .map(|n| {
                service
                    .sign_transaction(&id, &format!("record-{}", n))
                    .expect("signed")
            })
            .collect();
        let device: sc_02_signature_chain::SignatureDevice =
            store.get(id.as_str()).expect("device stored");

        for length in [10, 100] {
            group.throughput(Throughput::Elements(length as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("verify_chain_{}", curve), length),
                &length,
                |b, &length| {
                    b.iter(|| {
                        black_box(verify_chain(
                            &id,
                            SignatureAlgorithm::Ecc,
                            &device.public_key,
                            service.registry(),
                            &records[..length],
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Payload layout
// ============================================================================

fn bench_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload");
    let link = "MEUCIQDx2kz1l7Hh8x3v0y2m7f3m5yq9v1d0n8d1b2c3d4e5fAIgR0n8n4y1Qk3k2Z9f8r7x6w5v4u3t2s1r0q9p8o7n6m5=";

    group.bench_function("compose", |b| {
        b.iter(|| black_box(compose_payload(black_box(41), "order_42_paid", link)))
    });

    let payload = compose_payload(41, "order_42_paid", link);
    group.bench_function("parse", |b| b.iter(|| black_box(parse_payload(&payload))));

    group.finish();
}

criterion_group!(benches, bench_chained_sign, bench_chain_replay, bench_payload);
criterion_main!(benches);
