//! Generation Benchmarks
//!
//! Benchmarks for flat, nested, parameterized and pooled model generation.
//!
//! Run with: `cargo bench --bench generate_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ensayo::prelude::*;
use ensayo::FieldValue;
use std::rc::Rc;

fn bench_generate_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_models");
    let mut generator = Generator::seeded(Seed::from_u64(42));

    group.bench_function("role", |b| {
        b.iter(|| black_box(generator.generate::<Role>().unwrap()));
    });
    group.bench_function("project", |b| {
        b.iter(|| black_box(generator.generate::<Project>().unwrap()));
    });
    group.bench_function("user", |b| {
        b.iter(|| black_box(generator.generate::<User>().unwrap()));
    });
    group.bench_function("server_auth_settings", |b| {
        b.iter(|| black_box(generator.generate::<ServerAuthSettings>().unwrap()));
    });

    group.finish();
}

fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("parameters");
    let mut generator = Generator::seeded(Seed::from_u64(42));

    for count in [0usize, 1, 3, 8] {
        let params: Vec<FieldValue> = (0..count).map(|i| format!("p{i}").into()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &params, |b, params| {
            b.iter(|| {
                let user: User = generator.generate_with(params.clone()).unwrap();
                black_box(user)
            });
        });
    }

    group.finish();
}

fn bench_pooled(c: &mut Criterion) {
    let mut group = c.benchmark_group("pooled");
    let mut generator = Generator::seeded(Seed::from_u64(42));

    let empty = ReusePool::new();
    group.bench_function("build_type_empty_pool", |b| {
        b.iter(|| {
            let build_type: BuildType = generator.generate_pooled(&empty, params![]).unwrap();
            black_box(build_type)
        });
    });

    let project: Rc<Project> = Rc::new(generator.generate().unwrap());
    let mut pool = ReusePool::new();
    for _ in 0..16 {
        pool.add(Rc::new(generator.generate::<Role>().unwrap()));
    }
    pool.add(project);
    group.bench_function("build_type_pool_hit_after_16", |b| {
        b.iter(|| {
            let build_type: BuildType = generator.generate_pooled(&pool, params![]).unwrap();
            black_box(build_type)
        });
    });

    group.bench_function("test_data_session", |b| {
        b.iter(|| black_box(TestData::generate(&mut generator).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_generate_models, bench_parameters, bench_pooled);
criterion_main!(benches);
