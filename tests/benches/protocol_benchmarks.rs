//! # Veilform Protocol Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | vf-05 Aggregate View | summary over 10k records | < 1ms |
//! | vf-05 Aggregate View | filter + page over 10k records | < 5ms |
//! | shared-crypto | encrypt one value | < 50µs |
//! | shared-crypto | public decryption with proof | < 100µs per handle |

#![allow(clippy::excessive_nesting)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_crypto::{FheCoprocessor, ProofAuthority};
use shared_types::{Address, CiphertextHandle, Record, RecordId, Timestamp, Verification};
use std::time::Duration;
use vf_05_aggregate_view::{filter_records, summarize, AggregateView, ViewConfig, ViewQuery};

const CONTRACT: Address = Address::new([0xC0; 20]);
const OWNER: Address = Address::new([0xA1; 20]);
const NOW: Timestamp = Timestamp(1_700_000_000);

fn records(count: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    let titles = ["Salary", "Medical", "Vote", "Budget", "Survey"];
    (0..count)
        .map(|i| {
            let verification = if rng.gen_bool(0.3) {
                Verification::Verified {
                    plaintext: rng.gen_range(0..1_000_000),
                }
            } else {
                Verification::Unverified
            };
            Record {
                id: RecordId::new(format!("form-{i}")),
                title: format!("{} #{i}", titles[i % titles.len()]),
                description: format!("Confidential entry {i}"),
                ciphertext_handle: CiphertextHandle(rng.gen()),
                public_value: rng.gen_range(1..=100),
                creator: OWNER,
                created_at: Timestamp(NOW.0 - rng.gen_range(0..172_800)),
                verification,
            }
        })
        .collect()
}

// ============================================================================
// VF-05: Aggregate View
// ============================================================================

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("vf-05-summary");

    for size in [100, 1_000, 10_000] {
        let set = records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("summarize", size), &set, |b, set| {
            b.iter(|| black_box(summarize(set, NOW)))
        });
    }

    group.finish();
}

fn bench_filter_and_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("vf-05-filter-page");
    let view = AggregateView::new(&ViewConfig::default());

    for size in [100, 1_000, 10_000] {
        let set = records(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("filter", size), &set, |b, set| {
            b.iter(|| black_box(filter_records(set, "medical").len()))
        });

        let query = ViewQuery::search("salary").page(3);
        group.bench_with_input(BenchmarkId::new("page", size), &set, |b, set| {
            b.iter(|| black_box(view.page(set, &query)))
        });
    }

    group.finish();
}

// ============================================================================
// SHARED-CRYPTO: Simulated Co-processor
// ============================================================================

fn bench_coprocessor(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto-coprocessor");
    group.measurement_time(Duration::from_secs(5));
    let fhe = FheCoprocessor::new(ProofAuthority::generate());

    group.bench_function("encrypt", |b| {
        b.iter(|| black_box(fhe.encrypt(black_box(42), &CONTRACT, &OWNER)))
    });

    for count in [1, 8, 32] {
        let handles: Vec<_> = (0..count)
            .filter_map(|v| fhe.encrypt(v, &CONTRACT, &OWNER).ok())
            .map(|input| input.handle)
            .collect();
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(
            BenchmarkId::new("public_decrypt", count),
            &handles,
            |b, handles| b.iter(|| black_box(fhe.public_decrypt(handles))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_summary,
    bench_filter_and_page,
    bench_coprocessor
);
criterion_main!(benches);
