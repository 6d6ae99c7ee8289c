use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use nl2sql::engine::Engine;
use nl2sql::persist::SqliteStorage;
use nl2sql::rules::RuleTable;
use nl2sql::seed;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("compile builtin rules", |b| b.iter(|| RuleTable::builtin().unwrap()));

    let engine = Engine::new().unwrap();
    let suggestions = engine.suggestions();
    c.bench_function("match suggestions", |b| {
        b.iter(|| {
            for query in suggestions {
                black_box(engine.translate(black_box(query)).is_matched());
            }
        })
    });
    // worst case: every variant of every recognizer is tried
    c.bench_function("match nothing", |b| {
        b.iter(|| engine.translate(black_box("asdkjasdlkj random text")).is_matched())
    });

    let storage = SqliteStorage::in_memory().unwrap();
    seed::provision(&storage).unwrap();
    let engine = Engine::new().unwrap().with_storage(Arc::new(storage));
    c.bench_function("translate and execute", |b| {
        b.iter(|| engine.translate_and_execute(black_box("Sales of Laptop Pro 15 on 2023-03-15")).is_success())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
