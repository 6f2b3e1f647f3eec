use bloom::BloomChain;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

const N_KEYS: usize = 10_000;

fn build_chain(e: f64) -> BloomChain {
    let mut chain = BloomChain::new();
    chain.set_error(e).unwrap();
    for i in 0..N_KEYS {
        chain.add(format!("key{i}").as_bytes());
    }
    chain
}

fn bloom_add_benchmark(c: &mut Criterion) {
    c.bench_function("bloom_add_10k", |b| {
        b.iter_batched(
            BloomChain::new,
            |mut chain| {
                for i in 0..N_KEYS {
                    chain.add(format!("key{i}").as_bytes());
                }
            },
            BatchSize::LargeInput,
        );
    });
}

fn bloom_exists_hit_benchmark(c: &mut Criterion) {
    c.bench_function("bloom_exists_hit_10k", |b| {
        b.iter_batched(
            || build_chain(0.01),
            |chain| {
                for i in 0..N_KEYS {
                    assert!(chain.exists(format!("key{i}").as_bytes()));
                }
            },
            BatchSize::LargeInput,
        );
    });
}

fn bloom_exists_miss_benchmark(c: &mut Criterion) {
    c.bench_function("bloom_exists_miss_10k", |b| {
        b.iter_batched(
            || build_chain(0.01),
            |chain| {
                for i in 0..N_KEYS {
                    assert!(!chain.exists(format!("missing{i}").as_bytes()));
                }
            },
            BatchSize::LargeInput,
        );
    });
}

fn bloom_card_benchmark(c: &mut Criterion) {
    c.bench_function("bloom_card_10k", |b| {
        b.iter_batched(
            || build_chain(0.01),
            |chain| {
                chain.card();
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bloom_add_benchmark,
    bloom_exists_hit_benchmark,
    bloom_exists_miss_benchmark,
    bloom_card_benchmark
);
criterion_main!(benches);
