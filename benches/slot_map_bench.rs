use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dense_slotmap::{DenseSlotMap, Handle, OrderedSlotMap, SlotMap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// `count` distinct positions out of `n`, chosen by LCG.
fn random_picks(n: usize, count: usize) -> Vec<usize> {
    let mut sel = std::collections::HashSet::with_capacity(count);
    let mut s = 0x9e3779b97f4a7c15u64;
    while sel.len() < count {
        s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
        sel.insert((s as usize) % n);
    }
    sel.into_iter().collect()
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("slot_map::insert_fresh_100k", |b| {
        b.iter_batched(
            DenseSlotMap::<u64>::new,
            |mut m| {
                for x in lcg(1).take(100_000) {
                    black_box(m.insert(x));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("baseline::slotmap_dense_insert_fresh_100k", |b| {
        b.iter_batched(
            slotmap::DenseSlotMap::<slotmap::DefaultKey, u64>::new,
            |mut m| {
                for x in lcg(1).take(100_000) {
                    black_box(m.insert(x));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_recycled_100k(c: &mut Criterion) {
    c.bench_function("slot_map::insert_recycled_100k", |b| {
        b.iter_batched(
            || {
                // Pre-grow and then erase everything so every id is on the free list
                let mut m: SlotMap<u64> = SlotMap::with_capacity(110_000);
                let handles: Vec<Handle> = lcg(2).take(110_000).map(|x| m.insert(x)).collect();
                for h in handles {
                    m.erase(h);
                }
                m
            },
            |mut m| {
                for x in lcg(3).take(100_000) {
                    black_box(m.insert(x));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_erase_random_10k(c: &mut Criterion) {
    c.bench_function("slot_map::erase_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut m: SlotMap<u64> = SlotMap::new();
                let handles: Vec<Handle> = lcg(5).take(110_000).map(|x| m.insert(x)).collect();
                let to_erase: Vec<Handle> = random_picks(handles.len(), 10_000)
                    .into_iter()
                    .map(|i| handles[i])
                    .collect();
                (m, to_erase)
            },
            |(mut m, to_erase)| {
                for h in to_erase {
                    m.erase(h);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    // O(n) erase: keep the map small enough to finish in reasonable time.
    c.bench_function("ordered_slot_map::erase_random_1k_of_11k", |b| {
        b.iter_batched(
            || {
                let mut m: OrderedSlotMap<u64> = SlotMap::new();
                let handles: Vec<Handle> = lcg(5).take(11_000).map(|x| m.insert(x)).collect();
                let to_erase: Vec<Handle> = random_picks(handles.len(), 1_000)
                    .into_iter()
                    .map(|i| handles[i])
                    .collect();
                (m, to_erase)
            },
            |(mut m, to_erase)| {
                for h in to_erase {
                    m.erase(h);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_10k(c: &mut Criterion) {
    c.bench_function("slot_map::get_hit_10k_on_100k", |b| {
        let mut m: SlotMap<u64> = SlotMap::new();
        let handles: Vec<Handle> = lcg(7).take(100_000).map(|x| m.insert(x)).collect();
        let queries: Vec<Handle> = random_picks(handles.len(), 10_000)
            .into_iter()
            .map(|i| handles[i])
            .collect();
        b.iter(|| {
            for h in &queries {
                black_box(m.get(*h).ok());
            }
        })
    });

    c.bench_function("slot_map::get_stale_10k_on_100k", |b| {
        let mut m: SlotMap<u64> = SlotMap::new();
        let handles: Vec<Handle> = lcg(11).take(100_000).map(|x| m.insert(x)).collect();
        let stale: Vec<Handle> = handles.iter().step_by(10).copied().collect();
        for h in &stale {
            m.erase(*h);
        }
        b.iter(|| {
            for h in &stale {
                black_box(m.get(*h).is_err());
            }
        })
    });
}

fn bench_iter(c: &mut Criterion) {
    c.bench_function("slot_map::iter_all_100k", |b| {
        let mut m: SlotMap<u64> = SlotMap::new();
        for x in lcg(999).take(100_000) {
            m.insert(x);
        }
        b.iter(|| {
            let mut sum = 0u64;
            for v in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("slot_map::iter_mut_increment_all_100k", |b| {
        b.iter_batched(
            || {
                let mut m: SlotMap<u64> = SlotMap::new();
                for x in lcg(1001).take(100_000) {
                    m.insert(x);
                }
                m
            },
            |mut m| {
                for v in m.iter_mut() {
                    *v = v.wrapping_add(1);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_recycled_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_erase_random_10k,
              bench_get_10k,
              bench_iter
}
criterion_main!(benches_insert, benches_ops);
