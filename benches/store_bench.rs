//! Benchmarks for localfs-cache store operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use localfs_cache::{Config, FileStore};
use tempfile::TempDir;

fn setup_store() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .cache_dir(temp_dir.path())
        .sync_writes(false)
        .build();
    (temp_dir, FileStore::new(config))
}

fn store_benchmarks(c: &mut Criterion) {
    let payload: Vec<u64> = (0..256).collect();

    c.bench_function("store_overwrite_single_key", |b| {
        let (_temp, store) = setup_store();
        b.iter(|| store.store("bench", "key", black_box(&payload)).unwrap());
    });

    c.bench_function("fetch_single_key", |b| {
        let (_temp, store) = setup_store();
        store.store("bench", "key", &payload).unwrap();
        b.iter(|| {
            let value: Option<Vec<u64>> = store.fetch("bench", black_box("key")).unwrap();
            value
        });
    });

    c.bench_function("fetch_miss", |b| {
        let (_temp, store) = setup_store();
        b.iter(|| {
            let value: Option<Vec<u64>> = store.fetch("bench", black_box("missing")).unwrap();
            value
        });
    });

    c.bench_function("list_100_keys", |b| {
        let (_temp, store) = setup_store();
        for i in 0..100 {
            store.store("bench", &format!("key{}", i), &i).unwrap();
        }
        b.iter(|| store.list(black_box("bench")).unwrap());
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
